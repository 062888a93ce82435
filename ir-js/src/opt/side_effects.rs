use super::Mangler;
use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::UnaryOp;

impl Mangler<'_> {
  /// Collects, in evaluation order, the subtrees of `node` that must still be
  /// evaluated when its value is discarded. Containers and operators whose
  /// only job is to combine values are taken apart; anything else that has
  /// side effects is kept whole.
  pub(super) fn collect_effects(&self, node: NodeId, parts: &mut Vec<NodeId>) {
    let tree = &*self.tree;
    if !tree.has_side_effects(node) {
      return;
    }
    match tree.kind(node) {
      Kind::Array | Kind::Sequence => {
        for child in tree.children(node) {
          self.collect_effects(child, parts);
        }
      }
      Kind::Object => {
        for property in tree.children(node) {
          self.collect_effects(tree.property_value(property), parts);
        }
      }
      Kind::Member(_) => self.collect_effects(tree.member_value(node), parts),
      Kind::Index => {
        self.collect_effects(tree.index_target(node), parts);
        self.collect_effects(tree.index_property(node), parts);
      }
      Kind::Unary(op) if !op.is_assign() && *op != UnaryOp::Delete => {
        self.collect_effects(tree.unary_value(node), parts);
      }
      Kind::Binary(op) if !op.is_logical() => {
        self.collect_effects(tree.binary_left(node), parts);
        self.collect_effects(tree.binary_right(node), parts);
      }
      // `a && b()` keeps the short circuit unless only `a` matters.
      Kind::Binary(_) if !tree.has_side_effects(tree.binary_right(node)) => {
        self.collect_effects(tree.binary_left(node), parts);
      }
      Kind::Conditional
        if !tree.has_side_effects(tree.conditional_true(node))
          && !tree.has_side_effects(tree.conditional_false(node)) =>
      {
        self.collect_effects(tree.conditional_test(node), parts);
      }
      _ => parts.push(node),
    }
  }

  /// Rewrites the attached expression `value` in place down to its effects.
  /// Returns `false`, leaving `value` untouched, when it has none; the caller
  /// then decides what replaces it.
  pub(super) fn reduce_to_effects(&mut self, value: NodeId) -> bool {
    let mut parts = Vec::new();
    self.collect_effects(value, &mut parts);
    let unchanged = match parts.as_slice() {
      &[only] => only == value,
      _ => {
        *self.tree.kind(value) == Kind::Sequence
          && self.tree.children(value).eq(parts.iter().copied())
      }
    };
    match parts.as_slice() {
      [] => false,
      _ if unchanged => true,
      _ => {
        for &part in &parts {
          self.tree.remove(part);
        }
        let replacement = match parts.as_slice() {
          &[only] => only,
          _ => self.tree.create_sequence(&parts),
        };
        self.tree.become_node(value, replacement);
        self.rewrote("reduce-to-effects");
        true
      }
    }
  }
}
