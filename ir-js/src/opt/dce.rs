use super::Mangler;
use crate::ir::Kind;
use crate::ir::NodeId;

impl Mangler<'_> {
  /// An expression statement keeps only what its discarded value needs to
  /// evaluate, and disappears when that is nothing.
  pub(super) fn mangle_expression_statement(&mut self, statement: NodeId) {
    let value = self.tree.expression_value(statement);
    if !self.reduce_to_effects(value) {
      self.tree.become_empty(statement);
      self.rewrote("drop-pure-statement");
    }
  }

  /// Flattens nested sequences, drops discarded elements without effects and
  /// unwraps a sequence left with one element.
  pub(super) fn mangle_sequence(&mut self, sequence: NodeId) {
    let mut child = self.tree.first_child(sequence);
    while let Some(current) = child {
      child = self.tree.next_sibling(current);
      if *self.tree.kind(current) == Kind::Sequence {
        self.tree.replace_with_children(current);
        self.rewrote("flatten-sequence");
      }
    }

    let mut child = self.tree.first_child(sequence);
    while let Some(current) = child {
      child = self.tree.next_sibling(current);
      if child.is_none() {
        break;
      }
      if !self.reduce_to_effects(current) {
        self.tree.remove(current);
        self.rewrote("drop-pure-sequence-element");
      } else if *self.tree.kind(current) == Kind::Sequence {
        self.tree.replace_with_children(current);
      }
    }

    let first = self.tree.first_child(sequence);
    if let Some(only) = first.filter(|&only| self.tree.next_sibling(only).is_none()) {
      self.become_detached(sequence, only);
      self.rewrote("unwrap-sequence");
    }
  }
}
