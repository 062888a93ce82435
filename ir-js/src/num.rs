//! ECMAScript Number semantics used by constant folding and the emitter.

/// Shortest round-trip decimal digits of a finite, positive `value`, plus the
/// exponent `n` such that `value = 0.DIGITS × 10^n`.
fn decimal_digits(value: f64) -> (String, i32) {
  let mut buffer = ryu::Buffer::new();
  let text = buffer.format_finite(value);
  let (mantissa, exponent) = match text.split_once('e') {
    Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
    None => (text, 0),
  };
  let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
  let mut point = int_part.len() as i32 + exponent;
  let all = format!("{int_part}{frac_part}");
  let trimmed = all.trim_start_matches('0');
  point -= (all.len() - trimmed.len()) as i32;
  let digits = trimmed.trim_end_matches('0');
  (digits.to_string(), point)
}

/// `Number.prototype.toString()` with radix 10.
pub fn number_to_string(value: f64) -> String {
  if value.is_nan() {
    return "NaN".to_string();
  }
  if value == 0.0 {
    return "0".to_string();
  }
  if value.is_infinite() {
    return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
  }
  if value < 0.0 {
    return format!("-{}", number_to_string(-value));
  }
  let (digits, n) = decimal_digits(value);
  let k = digits.len() as i32;
  if k <= n && n <= 21 {
    format!("{digits}{}", "0".repeat((n - k) as usize))
  } else if 0 < n && n <= 21 {
    format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
  } else if -6 < n && n <= 0 {
    format!("0.{}{digits}", "0".repeat((-n) as usize))
  } else {
    exponential(&digits, n)
  }
}

/// `Number.prototype.toExponential()` without a fraction digit count.
pub fn number_to_exponential(value: f64) -> String {
  if !value.is_finite() {
    return number_to_string(value);
  }
  if value == 0.0 {
    return "0e+0".to_string();
  }
  if value < 0.0 {
    return format!("-{}", number_to_exponential(-value));
  }
  let (digits, n) = decimal_digits(value);
  exponential(&digits, n)
}

fn exponential(digits: &str, n: i32) -> String {
  let e = n - 1;
  let sign = if e < 0 { '-' } else { '+' };
  let (first, rest) = digits.split_at(1);
  if rest.is_empty() {
    format!("{first}e{sign}{}", e.abs())
  } else {
    format!("{first}.{rest}e{sign}{}", e.abs())
  }
}

/// WhiteSpace and LineTerminator code points, the set ToNumber trims.
fn is_js_whitespace(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\u{B}'
      | '\u{C}'
      | ' '
      | '\u{A0}'
      | '\u{FEFF}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200A}'
      | '\u{202F}'
      | '\u{205F}'
      | '\u{3000}'
      | '\n'
      | '\r'
      | '\u{2028}'
      | '\u{2029}'
  )
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
  if digits.is_empty() {
    return f64::NAN;
  }
  let mut value = 0.0f64;
  for c in digits.chars() {
    match c.to_digit(radix) {
      Some(d) => value = value * radix as f64 + d as f64,
      None => return f64::NAN,
    }
  }
  value
}

fn is_decimal_literal(text: &str) -> bool {
  let bytes = text.as_bytes();
  let mut i = 0;
  let mut digits = 0;
  while i < bytes.len() && bytes[i].is_ascii_digit() {
    i += 1;
    digits += 1;
  }
  if i < bytes.len() && bytes[i] == b'.' {
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
      digits += 1;
    }
  }
  if digits == 0 {
    return false;
  }
  if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
    i += 1;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
      i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
    }
    if i == start {
      return false;
    }
  }
  i == bytes.len()
}

/// ToNumber applied to a string.
pub fn string_to_number(text: &str) -> f64 {
  let text = text.trim_matches(is_js_whitespace);
  if text.is_empty() {
    return 0.0;
  }
  let lower = text.get(..2).map(|p| p.to_ascii_lowercase());
  match lower.as_deref() {
    Some("0x") => return parse_radix(&text[2..], 16),
    Some("0o") => return parse_radix(&text[2..], 8),
    Some("0b") => return parse_radix(&text[2..], 2),
    _ => {}
  }
  let (negative, unsigned) = match text.as_bytes()[0] {
    b'-' => (true, &text[1..]),
    b'+' => (false, &text[1..]),
    _ => (false, text),
  };
  let magnitude = if unsigned == "Infinity" {
    f64::INFINITY
  } else if is_decimal_literal(unsigned) {
    // Rust's parser accepts the same forms once both sides of the point have
    // a digit.
    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if unsigned.starts_with('.') {
      normalized.push('0');
    }
    normalized.push_str(unsigned);
    let mut normalized = normalized.replace(".e", ".0e").replace(".E", ".0E");
    if normalized.ends_with('.') {
      normalized.push('0');
    }
    normalized.parse::<f64>().unwrap_or(f64::NAN)
  } else {
    f64::NAN
  };
  if negative {
    -magnitude
  } else {
    magnitude
  }
}

fn to_uint32_modulo(value: f64) -> f64 {
  if !value.is_finite() {
    return 0.0;
  }
  value.trunc().rem_euclid(4294967296.0)
}

pub fn to_int32(value: f64) -> i32 {
  to_uint32_modulo(value) as u32 as i32
}

pub fn to_uint32(value: f64) -> u32 {
  to_uint32_modulo(value) as u32
}

/// `Math.pow` / `**`, which disagree with `f64::powf` on a few inputs.
pub fn pow(base: f64, exponent: f64) -> f64 {
  if exponent.is_nan() {
    return f64::NAN;
  }
  if base.abs() == 1.0 && exponent.is_infinite() {
    return f64::NAN;
  }
  base.powf(exponent)
}
