use super::Mangler;
use crate::ir::BinaryOp;
use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::Tree;
use crate::ir::UnaryOp;
use crate::num::pow;
use crate::num::to_int32;
use crate::num::to_uint32;
use std::cmp::Ordering;

/// Result of `typeof` when it follows from the operand's kind alone.
fn typeof_name(kind: &Kind) -> Option<&'static str> {
  Some(match kind {
    Kind::String(_) | Kind::Unary(UnaryOp::TypeOf) => "string",
    Kind::Boolean(_) | Kind::Unary(UnaryOp::Not) => "boolean",
    Kind::Number(_)
    | Kind::Unary(UnaryOp::Negative | UnaryOp::Positive | UnaryOp::Complement) => "number",
    Kind::Undefined | Kind::Unary(UnaryOp::Void) => "undefined",
    Kind::Null | Kind::Array | Kind::Object | Kind::RegExp(_) => "object",
    _ => return None,
  })
}

/// Whether evaluating `node` always produces a string.
fn is_definitely_string(tree: &Tree, node: NodeId) -> bool {
  match tree.kind(node) {
    Kind::String(_) => true,
    Kind::Binary(BinaryOp::Add) => {
      is_definitely_string(tree, tree.binary_left(node))
        || is_definitely_string(tree, tree.binary_right(node))
    }
    _ => false,
  }
}

fn is_add(tree: &Tree, node: NodeId) -> bool {
  *tree.kind(node) == Kind::Binary(BinaryOp::Add)
}

/// Orders two strings by UTF-16 code units, as relational operators do.
fn compare_strings(a: &str, b: &str) -> Ordering {
  a.encode_utf16().cmp(b.encode_utf16())
}

/// `==` between two literals.
fn loose_equals(tree: &Tree, left: NodeId, right: NodeId) -> Option<bool> {
  Some(match (tree.kind(left), tree.kind(right)) {
    (Kind::Null | Kind::Undefined, Kind::Null | Kind::Undefined) => true,
    (Kind::Null | Kind::Undefined, _) | (_, Kind::Null | Kind::Undefined) => false,
    (Kind::String(a), Kind::String(b)) => a == b,
    _ => tree.as_number(left)? == tree.as_number(right)?,
  })
}

/// `===` between two literals.
fn strict_equals(tree: &Tree, left: NodeId, right: NodeId) -> Option<bool> {
  Some(match (tree.kind(left), tree.kind(right)) {
    (Kind::Null, Kind::Null) | (Kind::Undefined, Kind::Undefined) => true,
    (Kind::Boolean(a), Kind::Boolean(b)) => a == b,
    (Kind::Number(a), Kind::Number(b)) => a == b,
    (Kind::String(a), Kind::String(b)) => a == b,
    (a, b) if a.is_literal() && b.is_literal() => false,
    _ => return None,
  })
}

/// `<` and friends between two literals; `None` when either side converts to
/// NaN, which makes every comparison false.
fn compare(tree: &Tree, left: NodeId, right: NodeId) -> Option<Ordering> {
  if let (Kind::String(a), Kind::String(b)) = (tree.kind(left), tree.kind(right)) {
    return Some(compare_strings(a, b));
  }
  tree.as_number(left)?.partial_cmp(&tree.as_number(right)?)
}

/// Value of a binary operator applied to two literals.
enum Folded {
  Boolean(bool),
  Number(f64),
  String(String),
}

fn fold_binary(tree: &Tree, op: BinaryOp, left: NodeId, right: NodeId) -> Option<Folded> {
  let number = |f: fn(f64, f64) -> f64| -> Option<Folded> {
    Some(Folded::Number(f(tree.as_number(left)?, tree.as_number(right)?)))
  };
  let int32 = |f: fn(i32, i32) -> i32| -> Option<Folded> {
    let (a, b) = (tree.as_number(left)?, tree.as_number(right)?);
    Some(Folded::Number(f(to_int32(a), to_int32(b)) as f64))
  };
  let ordered = |f: fn(Ordering) -> bool| -> Option<Folded> {
    Some(Folded::Boolean(compare(tree, left, right).is_some_and(f)))
  };
  match op {
    BinaryOp::Add => {
      if matches!(tree.kind(left), Kind::String(_)) || matches!(tree.kind(right), Kind::String(_)) {
        let mut text = tree.as_string(left)?;
        text.push_str(&tree.as_string(right)?);
        Some(Folded::String(text))
      } else {
        number(|a, b| a + b)
      }
    }
    BinaryOp::Subtract => number(|a, b| a - b),
    BinaryOp::Multiply => number(|a, b| a * b),
    BinaryOp::Divide => number(|a, b| a / b),
    BinaryOp::Remainder => number(|a, b| a % b),
    BinaryOp::BitwiseAnd => int32(|a, b| a & b),
    BinaryOp::BitwiseOr => int32(|a, b| a | b),
    BinaryOp::BitwiseXor => int32(|a, b| a ^ b),
    BinaryOp::ShiftLeft => int32(|a, b| a.wrapping_shl(b as u32 & 31)),
    BinaryOp::ShiftRight => int32(|a, b| a >> (b as u32 & 31)),
    BinaryOp::ShiftRightUnsigned => {
      let a = to_uint32(tree.as_number(left)?);
      let b = to_uint32(tree.as_number(right)?);
      Some(Folded::Number((a >> (b & 31)) as f64))
    }
    BinaryOp::Equal => loose_equals(tree, left, right).map(Folded::Boolean),
    BinaryOp::NotEqual => loose_equals(tree, left, right).map(|eq| Folded::Boolean(!eq)),
    BinaryOp::EqualStrict => strict_equals(tree, left, right).map(Folded::Boolean),
    BinaryOp::NotEqualStrict => strict_equals(tree, left, right).map(|eq| Folded::Boolean(!eq)),
    BinaryOp::LessThan => ordered(|o| o == Ordering::Less),
    BinaryOp::LessThanEqual => ordered(|o| o != Ordering::Greater),
    BinaryOp::GreaterThan => ordered(|o| o == Ordering::Greater),
    BinaryOp::GreaterThanEqual => ordered(|o| o != Ordering::Less),
    BinaryOp::In | BinaryOp::InstanceOf | BinaryOp::LogicalAnd | BinaryOp::LogicalOr => None,
  }
}

impl Mangler<'_> {
  fn become_folded(&mut self, node: NodeId, value: Folded) {
    match value {
      Folded::Boolean(value) => self.tree.become_boolean(node, value),
      Folded::Number(value) => self.tree.become_number(node, value),
      Folded::String(value) => self.tree.become_string(node, value),
    }
  }

  pub(super) fn mangle_unary(&mut self, node: NodeId, op: UnaryOp) {
    let tree = &*self.tree;
    let value = tree.unary_value(node);
    let folded = match op {
      UnaryOp::Not => tree.as_boolean(value).map(|b| Folded::Boolean(!b)),
      UnaryOp::Negative => tree.as_number(value).map(|n| Folded::Number(-n)),
      UnaryOp::Positive => tree.as_number(value).map(Folded::Number),
      UnaryOp::Complement => tree.as_number(value).map(|n| Folded::Number(!to_int32(n) as f64)),
      UnaryOp::TypeOf if !tree.has_side_effects(value) => {
        typeof_name(tree.kind(value)).map(|name| Folded::String(name.to_string()))
      }
      UnaryOp::Void if !tree.has_side_effects(value) => {
        self.tree.become_undefined(node);
        self.rewrote("void-of-pure");
        return;
      }
      _ => None,
    };
    if let Some(folded) = folded {
      self.become_folded(node, folded);
      self.rewrote("fold-unary");
      return;
    }

    // `!!!x` is `!x`.
    if op == UnaryOp::Not && *tree.kind(value) == Kind::Unary(UnaryOp::Not) {
      let inner = tree.unary_value(value);
      if *tree.kind(inner) == Kind::Unary(UnaryOp::Not) {
        self.become_detached(node, inner);
        self.rewrote("collapse-triple-not");
      }
    }
  }

  pub(super) fn mangle_binary(&mut self, node: NodeId, op: BinaryOp) {
    let left = self.tree.binary_left(node);
    let right = self.tree.binary_right(node);

    if op.is_logical() {
      // The left operand decides the result; it is a literal and can go.
      if let Some(truthy) = self.tree.as_boolean(left) {
        let result = if truthy == (op == BinaryOp::LogicalAnd) {
          right
        } else {
          left
        };
        self.become_detached(node, result);
        self.rewrote("fold-logical");
      }
      return;
    }

    if self.tree.is_literal(left) && self.tree.is_literal(right) {
      if let Some(folded) = fold_binary(self.tree, op, left, right) {
        self.become_folded(node, folded);
        self.rewrote("fold-binary");
      }
      return;
    }

    if op == BinaryOp::Add {
      while *self.tree.kind(node) == Kind::Binary(BinaryOp::Add) && self.normalize_concat(node) {}
    }
  }

  /// Applies one string concatenation rewrite to `node`, an addition whose
  /// operands are not both literals. Returns whether one applied.
  fn normalize_concat(&mut self, node: NodeId) -> bool {
    let left = self.tree.binary_left(node);
    let right = self.tree.binary_right(node);
    if self.tree.is_literal(left) && self.tree.is_literal(right) {
      if let Some(folded) = fold_binary(self.tree, BinaryOp::Add, left, right) {
        self.become_folded(node, folded);
        self.rewrote("fold-concat");
        return true;
      }
      return false;
    }

    // (x + "a") + 0 => x + "a0"
    if is_add(self.tree, left) && self.tree.is_literal(right) {
      let inner = self.tree.binary_right(left);
      if let Kind::String(prefix) = self.tree.kind(inner) {
        let text = self.tree.as_string(right).map(|suffix| format!("{prefix}{suffix}"));
        if let Some(text) = text {
          self.tree.become_string(inner, text);
          self.become_detached(node, left);
          self.rewrote("concat-append-literal");
          return true;
        }
      }
    }

    // x + "" => x, when x is already a string
    if self.tree.is_string(right, "") && is_definitely_string(self.tree, left) {
      self.become_detached(node, left);
      self.rewrote("concat-drop-empty-suffix");
      return true;
    }

    // ("" + x) + 0 => x + "0"
    if is_add(self.tree, left) && self.tree.is_literal(right) {
      let head = self.tree.binary_left(left);
      if self.tree.is_string(head, "") {
        if let Some(text) = self.tree.as_string(right) {
          let rest = self.tree.binary_right(left);
          self.tree.remove(rest);
          self.tree.replace_with(left, rest);
          self.tree.become_string(right, text);
          self.rewrote("concat-move-empty-prefix");
          return true;
        }
      }
    }

    // 0 + ("a" + x) => "0a" + x
    if self.tree.is_literal(left) && is_add(self.tree, right) {
      let head = self.tree.binary_left(right);
      if let Kind::String(suffix) = self.tree.kind(head) {
        let text = self.tree.as_string(left).map(|prefix| format!("{prefix}{suffix}"));
        if let Some(text) = text {
          self.tree.become_string(left, text);
          let rest = self.tree.binary_right(right);
          self.tree.remove(rest);
          self.tree.replace_with(right, rest);
          self.rewrote("concat-prepend-literal");
          return true;
        }
      }
    }

    // 0 + (x + "") => "0" + x
    if self.tree.is_literal(left) && is_add(self.tree, right) {
      let tail = self.tree.binary_right(right);
      if self.tree.is_string(tail, "") {
        if let Some(text) = self.tree.as_string(left) {
          self.tree.become_string(left, text);
          let rest = self.tree.binary_left(right);
          self.tree.remove(rest);
          self.tree.replace_with(right, rest);
          self.rewrote("concat-move-empty-suffix");
          return true;
        }
      }
    }

    false
  }

  /// `Math.pow(a, b)` on numeric literals, when `Math` is the global.
  pub(super) fn mangle_call(&mut self, node: NodeId) {
    let tree = &*self.tree;
    let target = tree.call_target(node);
    if *tree.kind(target) != Kind::Member(self.known.math_pow)
      || *tree.kind(tree.member_value(target)) != Kind::Identifier(self.known.math)
    {
      return;
    }
    let args = tree.call_args(node);
    let &[base, exponent] = args.as_slice() else {
      return;
    };
    if let (&Kind::Number(base), &Kind::Number(exponent)) = (tree.kind(base), tree.kind(exponent)) {
      self.tree.become_number(node, pow(base, exponent));
      self.rewrote("fold-math-pow");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::compare_strings;
  use super::fold_binary;
  use super::Folded;
  use crate::ir::BinaryOp;
  use crate::ir::NodeId;
  use crate::ir::Tree;
  use std::cmp::Ordering;

  fn fold_numbers(op: BinaryOp, a: f64, b: f64) -> f64 {
    let mut tree = Tree::new();
    let left = tree.create_number(a);
    let right = tree.create_number(b);
    match fold_binary(&tree, op, left, right) {
      Some(Folded::Number(value)) => value,
      _ => panic!("expected a number"),
    }
  }

  type Make = fn(&mut Tree) -> NodeId;

  fn fold_boolean(tree: &mut Tree, op: BinaryOp, left: Make, right: Make) -> bool {
    let left = left(tree);
    let right = right(tree);
    match fold_binary(tree, op, left, right) {
      Some(Folded::Boolean(value)) => value,
      _ => panic!("expected a boolean"),
    }
  }

  #[test]
  fn folds_integer_operators() {
    assert_eq!(fold_numbers(BinaryOp::ShiftLeft, 3.0, 5.0), 96.0);
    assert_eq!(fold_numbers(BinaryOp::ShiftRight, -33.0, 5.0), -2.0);
    assert_eq!(fold_numbers(BinaryOp::ShiftRightUnsigned, -33.0, 5.0), 134217726.0);
    assert_eq!(fold_numbers(BinaryOp::ShiftLeft, 1.0, 33.0), 2.0);
    assert_eq!(fold_numbers(BinaryOp::BitwiseOr, 4294967296.5, 1.0), 1.0);
    assert_eq!(fold_numbers(BinaryOp::Remainder, -7.0, 2.0), -1.0);
  }

  #[test]
  fn folds_comparisons_like_javascript() {
    let mut tree = Tree::new();
    assert!(fold_boolean(&mut tree, BinaryOp::Equal, |t| t.create_null(), |t| t.create_undefined()));
    assert!(!fold_boolean(&mut tree, BinaryOp::EqualStrict, |t| t.create_null(), |t| t.create_undefined()));
    assert!(fold_boolean(&mut tree, BinaryOp::Equal, |t| t.create_string("1"), |t| t.create_boolean(true)));
    assert!(!fold_boolean(&mut tree, BinaryOp::Equal, |t| t.create_null(), |t| t.create_number(0.0)));
    assert!(!fold_boolean(&mut tree, BinaryOp::LessThanEqual, |t| t.create_undefined(), |t| t.create_number(0.0)));
    assert!(fold_boolean(&mut tree, BinaryOp::LessThan, |t| t.create_string("10"), |t| t.create_string("9")));
    assert!(!fold_boolean(&mut tree, BinaryOp::LessThan, |t| t.create_string("10"), |t| t.create_number(9.0)));
    assert!(fold_boolean(&mut tree, BinaryOp::NotEqual, |t| t.create_number(f64::NAN), |t| t.create_number(f64::NAN)));
  }

  #[test]
  fn strings_compare_by_code_units() {
    assert_eq!(compare_strings("\u{ff61}", "\u{1f600}"), Ordering::Greater);
    assert_eq!(compare_strings("a", "ab"), Ordering::Less);
  }
}
