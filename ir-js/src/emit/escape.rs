use std::fmt::Write;

/// Appends `value` as a double-quoted string literal, escaping what
/// `JSON.stringify` escapes plus the U+2028/U+2029 line separators.
pub fn quote_string(out: &mut String, value: &str) {
  out.push('"');
  for ch in value.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\u{8}' => out.push_str("\\b"),
      '\u{c}' => out.push_str("\\f"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' => {
        let _ = write!(out, "\\u{:04x}", ch as u32);
      }
      ch => out.push(ch),
    }
  }
  out.push('"');
}

pub fn is_identifier_start(ch: char) -> bool {
  ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

pub fn is_identifier_part(ch: char) -> bool {
  ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Whether `name` can be written as a bare property key.
pub fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
    _ => false,
  }
}
