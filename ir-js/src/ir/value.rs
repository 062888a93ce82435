use super::Kind;
use super::NodeId;
use super::Tree;
use super::UnaryOp;
use crate::num::number_to_string;
use crate::num::string_to_number;

impl Tree {
  pub fn is_literal(&self, id: NodeId) -> bool {
    self.kind(id).is_literal()
  }

  pub fn is_empty(&self, id: NodeId) -> bool {
    *self.kind(id) == Kind::Empty
  }

  pub fn is_undefined(&self, id: NodeId) -> bool {
    *self.kind(id) == Kind::Undefined
  }

  pub fn is_string(&self, id: NodeId, value: &str) -> bool {
    matches!(self.kind(id), Kind::String(s) if s == value)
  }

  /// ToBoolean of a literal; `None` for anything else.
  pub fn as_boolean(&self, id: NodeId) -> Option<bool> {
    match self.kind(id) {
      Kind::Boolean(value) => Some(*value),
      Kind::Null | Kind::Undefined => Some(false),
      Kind::Number(value) => Some(*value != 0.0 && !value.is_nan()),
      Kind::String(value) => Some(!value.is_empty()),
      _ => None,
    }
  }

  /// ToNumber of a literal; `None` for anything else.
  pub fn as_number(&self, id: NodeId) -> Option<f64> {
    match self.kind(id) {
      Kind::Boolean(value) => Some(if *value { 1.0 } else { 0.0 }),
      Kind::Null => Some(0.0),
      Kind::Undefined => Some(f64::NAN),
      Kind::Number(value) => Some(*value),
      Kind::String(value) => Some(string_to_number(value)),
      _ => None,
    }
  }

  /// ToString of a literal; `None` for anything else.
  pub fn as_string(&self, id: NodeId) -> Option<String> {
    match self.kind(id) {
      Kind::Boolean(value) => Some(value.to_string()),
      Kind::Null => Some("null".to_string()),
      Kind::Undefined => Some("undefined".to_string()),
      Kind::Number(value) => Some(number_to_string(*value)),
      Kind::String(value) => Some(value.clone()),
      _ => None,
    }
  }

  pub fn is_truthy(&self, id: NodeId) -> bool {
    self.as_boolean(id) == Some(true)
  }

  pub fn is_falsy(&self, id: NodeId) -> bool {
    self.as_boolean(id) == Some(false)
  }

  /// Whether evaluating the expression may be observable. Literals, bare
  /// identifiers and `this` are not; array and object literals are not when
  /// none of their elements are; side-effect-free operands keep the pure
  /// unary operators pure. Everything else is assumed to be observable.
  pub fn has_side_effects(&self, id: NodeId) -> bool {
    match self.kind(id) {
      Kind::Boolean(_)
      | Kind::Null
      | Kind::Number(_)
      | Kind::String(_)
      | Kind::Undefined
      | Kind::RegExp(_)
      | Kind::Identifier(_)
      | Kind::This => false,
      Kind::Unary(
        UnaryOp::Complement
        | UnaryOp::Negative
        | UnaryOp::Not
        | UnaryOp::Positive
        | UnaryOp::TypeOf
        | UnaryOp::Void,
      ) => self.has_side_effects(self.unary_value(id)),
      Kind::Array => self.children(id).any(|element| self.has_side_effects(element)),
      Kind::Object => self
        .children(id)
        .any(|property| self.has_side_effects(self.property_value(property))),
      _ => true,
    }
  }

  /// Deep structural equality: same kinds, payloads and symbols, recursively.
  pub fn looks_the_same_as(&self, a: NodeId, b: NodeId) -> bool {
    let same_kind = match (self.kind(a), self.kind(b)) {
      (Kind::Number(x), Kind::Number(y)) => x.to_bits() == y.to_bits(),
      (x, y) => x == y,
    };
    if !same_kind {
      return false;
    }
    let mut left = self.children(a);
    let mut right = self.children(b);
    loop {
      match (left.next(), right.next()) {
        (None, None) => return true,
        (Some(x), Some(y)) if self.looks_the_same_as(x, y) => {}
        _ => return false,
      }
    }
  }

  /// Whether the subtree declares a `var` binding or a function, which a
  /// dropped branch would take with it.
  pub fn declares_bindings(&self, id: NodeId) -> bool {
    match self.kind(id) {
      Kind::Variables | Kind::Function(_) => true,
      kind if kind.is_expression() => false,
      _ => self.children(id).any(|child| self.declares_bindings(child)),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::ir::BinaryOp;
  use crate::ir::Tree;
  use crate::ir::UnaryOp;

  #[test]
  fn literal_coercions() {
    let mut tree = Tree::new();
    let empty = tree.create_string("");
    let zero = tree.create_number(0.0);
    let nan = tree.create_number(f64::NAN);
    let text = tree.create_string(" 12 ");
    let null = tree.create_null();
    assert!(tree.is_falsy(empty));
    assert!(tree.is_falsy(zero));
    assert!(tree.is_falsy(nan));
    assert!(tree.is_truthy(text));
    assert_eq!(tree.as_number(text), Some(12.0));
    assert_eq!(tree.as_number(null), Some(0.0));
    assert_eq!(tree.as_string(null).as_deref(), Some("null"));
    let this = tree.create_this();
    assert_eq!(tree.as_boolean(this), None);
  }

  #[test]
  fn side_effects_of_containers() {
    let mut tree = Tree::new();
    let f = tree.create_symbol("f");
    let x = tree.create_symbol("x");
    let callee = tree.create_identifier(f);
    let call = tree.create_call(callee, &[]);
    let pure_element = tree.create_identifier(x);
    let pure = tree.create_array(&[pure_element]);
    assert!(!tree.has_side_effects(pure));
    let effectful = tree.create_array(&[call]);
    assert!(tree.has_side_effects(effectful));
    let value = tree.create_number(1.0);
    let property = tree.create_property(x, value);
    let object = tree.create_object(&[property]);
    assert!(!tree.has_side_effects(object));
    let operand = tree.create_this();
    let negated = tree.create_unary(UnaryOp::Negative, operand);
    assert!(!tree.has_side_effects(negated));
    let left = tree.create_number(1.0);
    let right = tree.create_number(2.0);
    let sum = tree.create_binary(BinaryOp::Add, left, right);
    assert!(tree.has_side_effects(sum));
  }

  #[test]
  fn structural_equality() {
    let mut tree = Tree::new();
    let x = tree.create_symbol("x");
    let y = tree.create_symbol("x");
    let a = tree.create_identifier(x);
    let b = tree.create_identifier(x);
    let c = tree.create_identifier(y);
    assert!(tree.looks_the_same_as(a, b));
    assert!(!tree.looks_the_same_as(a, c));
    let one = tree.create_number(1.0);
    let call_a = tree.create_call(a, &[one]);
    let one_again = tree.create_number(1.0);
    let call_b = tree.create_call(b, &[one_again]);
    assert!(tree.looks_the_same_as(call_a, call_b));
    let zero = tree.create_number(0.0);
    let negative_zero = tree.create_number(-0.0);
    assert!(!tree.looks_the_same_as(zero, negative_zero));
  }
}
