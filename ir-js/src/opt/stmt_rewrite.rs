use super::Mangler;
use crate::ir::Kind;
use crate::ir::NodeId;

impl Mangler<'_> {
  /// Whether a block can be dissolved into the list or statement slot that
  /// holds it. Blocks declaring functions keep their braces.
  pub(super) fn is_dissolvable_block(&self, node: NodeId) -> bool {
    *self.tree.kind(node) == Kind::Block
      && !self
        .tree
        .children(node)
        .any(|child| matches!(self.tree.kind(child), Kind::Function(_)))
  }

  /// Rewrites the statement list of a module or block: nested blocks are
  /// flattened, empty statements dropped, and neighbouring statements merged
  /// where a single statement can do the work of both.
  pub(super) fn mangle_statements(&mut self, list: NodeId) {
    self.flatten_statements(list);
    self.merge_statements(list);
  }

  fn flatten_statements(&mut self, list: NodeId) {
    let mut child = self.tree.first_child(list);
    while let Some(current) = child {
      child = self.tree.next_sibling(current);
      if self.tree.is_empty(current) {
        self.tree.remove(current);
        self.rewrote("drop-empty-statement");
      } else if self.is_dissolvable_block(current) {
        // The block's own list was mangled when it was visited.
        self.tree.replace_with_children(current);
        self.rewrote("flatten-block");
      }
    }
  }

  fn merge_statements(&mut self, list: NodeId) {
    let mut child = self.tree.first_child(list);
    while let Some(current) = child {
      let Some(next) = self.tree.next_sibling(current) else {
        break;
      };
      child = if self.merge_pair(current, next) {
        // `current` may have absorbed `next` and be able to absorb more.
        self.tree.parent(current).map(|_| current).or(Some(next))
      } else {
        Some(next)
      };
    }
  }

  /// Merges `current` into `next` or `next` into `current`. Returns whether
  /// the pair was merged.
  fn merge_pair(&mut self, current: NodeId, next: NodeId) -> bool {
    match (self.tree.kind(current), self.tree.kind(next)) {
      (Kind::Variables, Kind::Variables) => {
        self.tree.append_children_from(current, next);
        self.tree.remove(next);
        self.rewrote("merge-variables");
      }
      (Kind::Expression, Kind::Expression) => {
        let first = self.tree.expression_value(current);
        let second = self.tree.expression_value(next);
        self.tree.remove(first);
        self.tree.remove(second);
        let joined = self.join_sequence(first, second);
        self.tree.append_child(current, joined);
        self.tree.remove(next);
        self.rewrote("merge-expressions");
      }
      (Kind::Expression, Kind::Return) => {
        let value = self.tree.return_value(next);
        if self.tree.is_undefined(value) {
          return false;
        }
        self.prepend_effects(current, value);
        self.rewrote("merge-into-return");
      }
      (Kind::Expression, Kind::Throw) => {
        let value = self.tree.throw_value(next);
        self.prepend_effects(current, value);
        self.rewrote("merge-into-throw");
      }
      (Kind::Expression, Kind::For) => {
        let setup = self.tree.for_setup(next);
        if self.tree.is_empty(setup) {
          let value = self.tree.expression_value(current);
          self.tree.remove(value);
          self.tree.replace_with(setup, value);
          self.tree.remove(current);
        } else if self.tree.kind(setup).is_expression() {
          self.prepend_effects(current, setup);
        } else {
          return false;
        }
        self.rewrote("merge-into-for-setup");
      }
      _ => return false,
    }
    true
  }

  /// Moves the value of expression statement `statement` in front of the
  /// expression `target` as `statement, target`, then drops `statement`.
  fn prepend_effects(&mut self, statement: NodeId, target: NodeId) {
    let first = self.tree.expression_value(statement);
    self.tree.remove(first);
    self.tree.remove(statement);
    let placeholder = self.tree.create_undefined();
    self.tree.replace_with(target, placeholder);
    let joined = self.join_sequence(first, target);
    self.tree.become_node(placeholder, joined);
  }
}
