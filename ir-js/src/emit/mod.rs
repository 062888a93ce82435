//! Precedence-aware JavaScript text generation.
//!
//! The emitter inserts parentheses only where the [`Level`] ladder requires
//! them and, in minified mode, drops all optional whitespace while keeping
//! adjacent tokens from fusing (`a+ +b`, `a- --b`, `x<! --y`, `return x`).

mod escape;
mod precedence;

pub use escape::is_identifier_name;
pub use escape::quote_string;
pub use precedence::Level;

use crate::ir::BinaryOp;
use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::Tree;
use crate::ir::UnaryOp;
use crate::num::number_to_exponential;
use crate::num::number_to_string;
use escape::is_identifier_part;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmitMode {
  /// Indented, one statement per line, spaces around operators.
  #[default]
  Normal,
  /// No optional whitespace; statement semicolons are elided before `}`.
  Minified,
}

/// Renders one module tree as JavaScript source text.
pub fn emit(tree: &Tree, module: NodeId, mode: EmitMode) -> String {
  let mut emitter = Emitter::new(tree, mode);
  emitter.emit_module(module);
  emitter.out
}

/// Operator tokens that fuse with a following prefix operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fusable {
  Plus,
  Minus,
  Not,
}

struct Emitter<'a> {
  tree: &'a Tree,
  mode: EmitMode,
  out: String,
  indent: String,
  needs_semicolon: bool,
  previous_operator: Option<Fusable>,
  previous_operator_end: usize,
  in_for_setup: bool,
}

impl<'a> Emitter<'a> {
  fn new(tree: &'a Tree, mode: EmitMode) -> Self {
    Self {
      tree,
      mode,
      out: String::new(),
      indent: String::new(),
      needs_semicolon: false,
      previous_operator: None,
      previous_operator_end: 0,
      in_for_setup: false,
    }
  }

  fn minified(&self) -> bool {
    self.mode == EmitMode::Minified
  }

  fn space(&mut self) {
    if !self.minified() {
      self.out.push(' ');
    }
  }

  fn newline(&mut self) {
    if !self.minified() {
      self.out.push('\n');
    }
  }

  fn increase_indent(&mut self) {
    if !self.minified() {
      self.indent.push_str("  ");
    }
  }

  fn decrease_indent(&mut self) {
    if !self.minified() {
      self.indent.truncate(self.indent.len().saturating_sub(2));
    }
  }

  fn write_indent(&mut self) {
    let indent = std::mem::take(&mut self.indent);
    self.out.push_str(&indent);
    self.indent = indent;
  }

  fn space_before_identifier(&mut self) {
    if let Some(last) = self.out.chars().next_back() {
      if is_identifier_part(last) || !last.is_ascii() {
        self.out.push(' ');
      }
    }
  }

  fn space_before_operator(&mut self, op: UnaryOp) {
    if self.out.len() != self.previous_operator_end {
      return;
    }
    let fuses = match (self.previous_operator, op) {
      (Some(Fusable::Plus), UnaryOp::Positive | UnaryOp::PrefixIncrement) => true,
      (Some(Fusable::Minus), UnaryOp::Negative | UnaryOp::PrefixDecrement) => true,
      (Some(Fusable::Not), UnaryOp::PrefixDecrement) => self.out.ends_with("<!"),
      _ => false,
    };
    if fuses {
      self.out.push(' ');
    }
  }

  fn record_operator(&mut self, fusable: Option<Fusable>) {
    self.previous_operator = fusable;
    self.previous_operator_end = self.out.len();
  }

  fn semicolon_after_statement(&mut self) {
    if self.minified() {
      self.needs_semicolon = true;
    } else {
      self.out.push_str(";\n");
    }
  }

  fn semicolon_if_needed(&mut self) {
    if self.needs_semicolon {
      self.out.push(';');
      self.needs_semicolon = false;
    }
  }

  fn symbol_name(&self, node: NodeId) -> &'a str {
    self.tree.symbol_name(self.tree.symbol_of(node))
  }

  fn emit_module(&mut self, module: NodeId) {
    assert_eq!(*self.tree.kind(module), Kind::Module, "can only emit modules");
    self.emit_statements(module);
    if self.minified() && !self.out.is_empty() {
      self.semicolon_if_needed();
      self.out.push('\n');
    }
  }

  fn emit_statements(&mut self, parent: NodeId) {
    for child in self.tree.children(parent) {
      self.semicolon_if_needed();
      self.emit_statement(child);
    }
  }

  fn emit_block(&mut self, block: NodeId) {
    self.out.push('{');
    self.newline();
    self.increase_indent();
    self.emit_statements(block);
    self.decrease_indent();
    self.write_indent();
    self.out.push('}');
    self.needs_semicolon = false;
  }

  fn emit_block_inside_statement(&mut self, node: NodeId) {
    if *self.tree.kind(node) == Kind::Block {
      self.space();
      self.emit_block(node);
      self.newline();
    } else {
      self.newline();
      self.increase_indent();
      self.emit_statement(node);
      self.decrease_indent();
    }
  }

  /// Whether `when_true` ends in an unbraced `if` without `else` that would
  /// capture the `else` of its parent.
  fn is_ambiguous_before_else(&self, mut node: NodeId) -> bool {
    let tree = self.tree;
    loop {
      node = match tree.kind(node) {
        Kind::If => {
          let when_false = tree.if_false(node);
          if tree.is_empty(when_false) {
            return true;
          }
          when_false
        }
        Kind::For => tree.for_body(node),
        Kind::ForIn => tree.for_in_body(node),
        Kind::While => tree.while_body(node),
        Kind::Label(_) => tree.label_body(node),
        _ => return false,
      };
    }
  }

  fn emit_keyword_statement(&mut self, keyword: &str) {
    self.write_indent();
    self.space_before_identifier();
    self.out.push_str(keyword);
  }

  fn emit_statement(&mut self, node: NodeId) {
    let tree = self.tree;
    match tree.kind(node) {
      Kind::Block => {
        self.write_indent();
        self.emit_block(node);
        self.newline();
      }
      Kind::Break(label) | Kind::Continue(label) => {
        let keyword = if matches!(tree.kind(node), Kind::Break(_)) {
          "break"
        } else {
          "continue"
        };
        self.emit_keyword_statement(keyword);
        if let Some(label) = label {
          self.out.push(' ');
          self.out.push_str(tree.symbol_name(*label));
        }
        self.semicolon_after_statement();
      }
      Kind::Debugger => {
        self.emit_keyword_statement("debugger");
        self.semicolon_after_statement();
      }
      Kind::Directive(text) => {
        // The raw text keeps its escapes, so only the quote needs choosing.
        let quote = if text.contains('"') { '\'' } else { '"' };
        self.write_indent();
        self.out.push(quote);
        self.out.push_str(text);
        self.out.push(quote);
        self.semicolon_after_statement();
      }
      Kind::DoWhile => {
        self.emit_keyword_statement("do");
        self.emit_block_inside_statement(tree.do_while_body(node));
        self.semicolon_if_needed();
        self.write_indent();
        self.out.push_str("while");
        self.space();
        self.out.push('(');
        self.emit_expression(tree.do_while_test(node), Level::Lowest);
        self.out.push(')');
        self.semicolon_after_statement();
      }
      Kind::Empty => {
        self.write_indent();
        self.out.push(';');
        self.newline();
      }
      Kind::Expression => {
        self.write_indent();
        let start = self.out.len();
        self.emit_expression(tree.expression_value(node), Level::Lowest);
        if self.out[start..].starts_with('{') {
          self.out.insert(start, '(');
          self.out.push(')');
        }
        self.semicolon_after_statement();
      }
      Kind::For => {
        self.emit_keyword_statement("for");
        self.space();
        self.out.push('(');
        let setup = tree.for_setup(node);
        self.in_for_setup = true;
        match tree.kind(setup) {
          Kind::Variables => self.emit_variables(setup),
          Kind::Empty => {}
          _ => self.emit_expression(setup, Level::Lowest),
        }
        self.in_for_setup = false;
        self.out.push(';');
        let test = tree.for_test(node);
        if !tree.is_empty(test) {
          self.space();
          self.emit_expression(test, Level::Lowest);
        }
        self.out.push(';');
        let update = tree.for_update(node);
        if !tree.is_empty(update) {
          self.space();
          self.emit_expression(update, Level::Lowest);
        }
        self.out.push(')');
        self.emit_block_inside_statement(tree.for_body(node));
      }
      Kind::ForIn => {
        self.emit_keyword_statement("for");
        self.space();
        self.out.push('(');
        let setup = tree.for_in_setup(node);
        self.in_for_setup = true;
        if matches!(tree.kind(setup), Kind::Variable(_)) {
          self.out.push_str("var");
          self.emit_variable(setup);
        } else {
          self.emit_expression(setup, Level::Postfix);
        }
        self.in_for_setup = false;
        self.space_before_identifier();
        self.out.push_str("in");
        self.space();
        self.emit_expression(tree.for_in_value(node), Level::Lowest);
        self.out.push(')');
        self.emit_block_inside_statement(tree.for_in_body(node));
      }
      Kind::Function(_) => {
        self.emit_keyword_statement("function ");
        self.out.push_str(self.symbol_name(node));
        self.out.push('(');
        let params = tree.function_params(node);
        for (i, &param) in params.iter().enumerate() {
          if i > 0 {
            self.out.push(',');
            self.space();
          }
          self.space_before_identifier();
          self.out.push_str(self.symbol_name(param));
        }
        self.out.push(')');
        self.space();
        self.emit_block(tree.function_body(node));
        self.newline();
      }
      Kind::If => self.emit_if(node),
      Kind::Label(_) => {
        if !self.indent.is_empty() {
          self.decrease_indent();
          self.write_indent();
          self.increase_indent();
        }
        self.space_before_identifier();
        self.out.push_str(self.symbol_name(node));
        self.out.push(':');
        self.newline();
        self.emit_statement(tree.label_body(node));
      }
      Kind::Return => {
        self.emit_keyword_statement("return");
        let value = tree.return_value(node);
        if !tree.is_undefined(value) {
          self.space();
          self.emit_expression(value, Level::Lowest);
        }
        self.semicolon_after_statement();
      }
      Kind::Throw => {
        self.emit_keyword_statement("throw");
        self.space();
        self.emit_expression(tree.throw_value(node), Level::Lowest);
        self.semicolon_after_statement();
      }
      Kind::Try => {
        self.emit_keyword_statement("try");
        self.space();
        self.emit_block(tree.try_block(node));
        let catch = tree.try_catch(node);
        if !tree.is_empty(catch) {
          self.space();
          self.out.push_str("catch");
          self.space();
          self.out.push('(');
          self.out.push_str(self.symbol_name(catch));
          self.out.push(')');
          self.space();
          self.emit_block(tree.catch_body(catch));
        }
        let finally = tree.try_finally(node);
        if !tree.is_empty(finally) {
          self.space();
          self.out.push_str("finally");
          self.space();
          self.emit_block(finally);
        }
        self.newline();
      }
      Kind::Variables => {
        self.write_indent();
        self.space_before_identifier();
        self.emit_variables(node);
        self.semicolon_after_statement();
      }
      Kind::While => {
        self.emit_keyword_statement("while");
        self.space();
        self.out.push('(');
        self.emit_expression(tree.while_test(node), Level::Lowest);
        self.out.push(')');
        self.emit_block_inside_statement(tree.while_body(node));
      }
      other => panic!("cannot emit {} node as a statement", other.name()),
    }
  }

  fn emit_if(&mut self, mut node: NodeId) {
    let tree = self.tree;
    self.write_indent();
    loop {
      self.space_before_identifier();
      self.out.push_str("if");
      self.space();
      self.out.push('(');
      self.emit_expression(tree.if_test(node), Level::Lowest);
      self.out.push(')');

      let when_true = tree.if_true(node);
      let when_false = tree.if_false(node);
      if tree.is_empty(when_false) {
        self.emit_block_inside_statement(when_true);
        break;
      }

      if self.is_ambiguous_before_else(when_true) {
        self.space();
        self.out.push('{');
        self.newline();
        self.increase_indent();
        self.emit_statement(when_true);
        self.decrease_indent();
        self.needs_semicolon = false;
        self.write_indent();
        self.out.push('}');
        self.newline();
      } else {
        self.emit_block_inside_statement(when_true);
      }

      self.semicolon_if_needed();
      self.write_indent();
      self.out.push_str("else");
      if *tree.kind(when_false) != Kind::If {
        self.emit_block_inside_statement(when_false);
        break;
      }
      self.out.push(' ');
      node = when_false;
    }
  }

  fn emit_variables(&mut self, node: NodeId) {
    self.out.push_str("var ");
    for (i, variable) in self.tree.children(node).enumerate() {
      if i > 0 {
        self.out.push(',');
        self.space();
      }
      self.emit_variable(variable);
    }
  }

  fn emit_variable(&mut self, variable: NodeId) {
    self.space_before_identifier();
    self.out.push_str(self.symbol_name(variable));
    let value = self.tree.variable_value(variable);
    if !self.tree.is_undefined(value) {
      self.space();
      self.out.push('=');
      self.space();
      self.emit_expression(value, Level::Comma);
    }
  }

  fn emit_comma_separated(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
    for (i, node) in nodes.into_iter().enumerate() {
      if i > 0 {
        self.out.push(',');
        self.space();
      }
      self.emit_expression(node, Level::Comma);
    }
  }

  /// Whether a `new` target would hand its argument list to an inner call.
  fn has_call_in_member_chain(&self, mut node: NodeId) -> bool {
    loop {
      node = match self.tree.kind(node) {
        Kind::Call => return true,
        Kind::Member(_) => self.tree.member_value(node),
        Kind::Index => self.tree.index_target(node),
        _ => return false,
      };
    }
  }

  fn emit_expression(&mut self, node: NodeId, level: Level) {
    let tree = self.tree;
    match tree.kind(node) {
      Kind::Array => {
        self.out.push('[');
        for element in tree.children(node) {
          let previous = tree.previous_sibling(element);
          if tree.is_undefined(element) {
            if previous.is_some() {
              self.out.push(',');
            }
            if tree.next_sibling(element).is_none() {
              self.out.push(',');
            }
          } else {
            if previous.is_some() {
              self.out.push(',');
              self.space();
            }
            self.emit_expression(element, Level::Comma);
          }
        }
        self.out.push(']');
      }
      Kind::Boolean(value) => {
        if self.minified() {
          let text = if *value { "!0" } else { "!1" };
          if level >= Level::Prefix {
            self.out.push('(');
            self.out.push_str(text);
            self.out.push(')');
          } else {
            self.out.push_str(text);
          }
        } else {
          self.space_before_identifier();
          self.out.push_str(if *value { "true" } else { "false" });
        }
      }
      Kind::Call => {
        self.emit_expression(tree.call_target(node), Level::Postfix);
        self.out.push('(');
        self.emit_comma_separated(tree.children(node).skip(1));
        self.out.push(')');
      }
      Kind::Conditional => {
        let wrap = level >= Level::Conditional;
        if wrap {
          self.out.push('(');
        }
        self.emit_expression(tree.conditional_test(node), Level::Conditional);
        self.space();
        self.out.push('?');
        self.space();
        self.emit_expression(tree.conditional_true(node), Level::Conditional.looser());
        self.space();
        self.out.push(':');
        self.space();
        self.emit_expression(tree.conditional_false(node), Level::Conditional.looser());
        if wrap {
          self.out.push(')');
        }
      }
      Kind::Identifier(symbol) => {
        self.space_before_identifier();
        self.out.push_str(tree.symbol_name(*symbol));
      }
      Kind::Index => {
        self.emit_expression(tree.index_target(node), Level::Member);
        self.out.push('[');
        self.emit_expression(tree.index_property(node), Level::Lowest);
        self.out.push(']');
      }
      Kind::Member(symbol) => {
        self.emit_expression(tree.member_value(node), Level::Member);
        self.out.push('.');
        self.out.push_str(tree.symbol_name(*symbol));
      }
      Kind::New => {
        self.space_before_identifier();
        self.out.push_str("new");
        self.space();
        let target = tree.call_target(node);
        if self.has_call_in_member_chain(target) {
          self.out.push('(');
          self.emit_expression(target, Level::Lowest);
          self.out.push(')');
        } else {
          self.emit_expression(target, Level::Member);
        }
        self.out.push('(');
        self.emit_comma_separated(tree.children(node).skip(1));
        self.out.push(')');
      }
      Kind::Null => {
        self.space_before_identifier();
        self.out.push_str("null");
      }
      Kind::Number(value) => self.emit_number(*value, level),
      Kind::Object => {
        self.out.push('{');
        for (i, property) in tree.children(node).enumerate() {
          if i > 0 {
            self.out.push(',');
            self.space();
          }
          let key = self.symbol_name(property);
          if is_identifier_name(key) {
            self.out.push_str(key);
          } else {
            quote_string(&mut self.out, key);
          }
          self.out.push(':');
          self.space();
          self.emit_expression(tree.property_value(property), Level::Comma);
        }
        self.out.push('}');
      }
      Kind::RegExp(source) => {
        if self.out.ends_with('/') {
          self.out.push(' ');
        }
        self.out.push_str(source);
      }
      Kind::Sequence => {
        let wrap = level >= Level::Comma;
        if wrap {
          self.out.push('(');
        }
        self.emit_comma_separated(tree.children(node));
        if wrap {
          self.out.push(')');
        }
      }
      Kind::String(value) => quote_string(&mut self.out, value),
      Kind::This => {
        self.space_before_identifier();
        self.out.push_str("this");
      }
      Kind::Undefined => {
        if level >= Level::Prefix {
          self.out.push_str("(void 0)");
        } else {
          self.space_before_identifier();
          self.out.push_str("void 0");
        }
      }
      Kind::Unary(op) => self.emit_unary(node, *op, level),
      Kind::Binary(op) => {
        let op = *op;
        let own = Level::of_binary(op);
        let wrap = level >= own || (op == BinaryOp::In && self.in_for_setup);
        let fusable = match op {
          BinaryOp::Add => Some(Fusable::Plus),
          BinaryOp::Subtract => Some(Fusable::Minus),
          _ => None,
        };
        if wrap {
          self.out.push('(');
        }
        self.emit_expression(tree.binary_left(node), own.looser());
        self.emit_binary_operator(op.text(), op.is_keyword(), fusable);
        self.emit_expression(tree.binary_right(node), own);
        if wrap {
          self.out.push(')');
        }
      }
      Kind::Assign(op) => {
        let wrap = level >= Level::Assign;
        if wrap {
          self.out.push('(');
        }
        self.emit_expression(tree.binary_left(node), Level::Assign);
        self.emit_binary_operator(op.text(), false, None);
        self.emit_expression(tree.binary_right(node), Level::Assign.looser());
        if wrap {
          self.out.push(')');
        }
      }
      other => panic!("cannot emit {} node as an expression", other.name()),
    }
  }

  fn emit_binary_operator(&mut self, text: &str, keyword: bool, fusable: Option<Fusable>) {
    self.space();
    if keyword {
      self.space_before_identifier();
      self.out.push_str(text);
      self.record_operator(None);
    } else {
      // `/` after a regular expression or another `/` must not read as `//`.
      if text.starts_with('/') && self.out.ends_with('/') {
        self.out.push(' ');
      }
      self.out.push_str(text);
      self.record_operator(fusable);
    }
    self.space();
  }

  fn emit_unary(&mut self, node: NodeId, op: UnaryOp, level: Level) {
    let value = self.tree.unary_value(node);
    if op.is_postfix() {
      let wrap = level >= Level::Postfix;
      if wrap {
        self.out.push('(');
      }
      self.emit_expression(value, Level::Postfix.looser());
      self.out.push_str(op.text());
      if wrap {
        self.out.push(')');
      }
      return;
    }

    let wrap = level >= Level::Prefix;
    if wrap {
      self.out.push('(');
    }
    if op.is_keyword() {
      self.space_before_identifier();
      self.out.push_str(op.text());
      self.record_operator(None);
      self.space();
    } else {
      self.space_before_operator(op);
      self.out.push_str(op.text());
      self.record_operator(match op {
        UnaryOp::Positive => Some(Fusable::Plus),
        UnaryOp::Negative => Some(Fusable::Minus),
        UnaryOp::Not => Some(Fusable::Not),
        _ => None,
      });
    }
    self.emit_expression(value, Level::Prefix.looser());
    if wrap {
      self.out.push(')');
    }
  }

  fn number_text(&self, value: f64) -> String {
    if value == 0.0 && value.is_sign_negative() {
      return "-0".to_string();
    }
    let normal = number_to_string(value);
    if !self.minified() {
      return normal;
    }
    let normal = reduce_number(&normal);
    let exponential = reduce_number(&number_to_exponential(value));
    if exponential.len() < normal.len() {
      exponential
    } else {
      normal
    }
  }

  fn emit_number(&mut self, value: f64, level: Level) {
    let text = self.number_text(value);
    if let Some(magnitude) = text.strip_prefix('-') {
      if level >= Level::Prefix {
        self.out.push_str("(-");
        self.out.push_str(magnitude);
        self.out.push(')');
        return;
      }
      self.space_before_operator(UnaryOp::Negative);
      self.out.push_str(&text);
    } else {
      self.space_before_identifier();
      self.out.push_str(&text);
    }
    if level >= Level::Member && !text.contains(['.', 'e', 'E']) {
      self.out.push(' ');
    }
  }
}

/// Drops characters a number literal does not need: a leading zero before
/// the decimal point and the `+` of a positive exponent.
fn reduce_number(text: &str) -> String {
  let (sign, magnitude) = match text.strip_prefix('-') {
    Some(magnitude) => ("-", magnitude),
    None => ("", text),
  };
  let magnitude = magnitude.strip_prefix("0.").map_or_else(
    || magnitude.to_string(),
    |fraction| format!(".{fraction}"),
  );
  format!("{sign}{}", magnitude.replace('+', ""))
}

#[cfg(test)]
mod tests {
  use super::reduce_number;

  #[test]
  fn reduces_number_text() {
    assert_eq!(reduce_number("0.5"), ".5");
    assert_eq!(reduce_number("-0.5"), "-.5");
    assert_eq!(reduce_number("1e+100"), "1e100");
    assert_eq!(reduce_number("10.5"), "10.5");
    assert_eq!(reduce_number("0"), "0");
  }
}
