//! The mangler: local, semantics-preserving rewrites applied bottom-up.
//!
//! Every node's children are mangled before the node itself, and rewriting a
//! node only ever touches that node's own subtree. Nodes are rewritten in
//! place through the `become_*` primitives, so a parent that is iterating
//! over its children never sees its child list change underneath it.
//!
//! One call is a single pass. The pipeline runs it again while constant
//! inlining keeps exposing new work.

use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::SymbolId;
use crate::ir::Tree;
use crate::ir::UnaryOp;
use tracing::debug;
use tracing::trace;

mod cf_rewrite;
mod const_fold;
mod dce;
mod side_effects;
mod stmt_rewrite;

/// Symbols some rewrites need to recognize by identity rather than by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownSymbols {
  /// The global `Math` binding.
  pub math: SymbolId,
  /// The `pow` property name.
  pub math_pow: SymbolId,
}

/// Mangles the subtree rooted at `root` in place. Returns whether anything
/// changed.
pub fn mangle(tree: &mut Tree, root: NodeId, known: &KnownSymbols) -> bool {
  let mut mangler = Mangler {
    tree,
    known,
    rewrites: 0,
  };
  mangler.visit(root);
  debug!(rewrites = mangler.rewrites, "mangled");
  mangler.rewrites > 0
}

struct Mangler<'a> {
  tree: &'a mut Tree,
  known: &'a KnownSymbols,
  rewrites: usize,
}

impl Mangler<'_> {
  fn rewrote(&mut self, rule: &'static str) {
    self.rewrites += 1;
    trace!(rule, "rewrote");
  }

  fn visit(&mut self, node: NodeId) {
    let mut child = self.tree.first_child(node);
    while let Some(current) = child {
      child = self.tree.next_sibling(current);
      self.visit(current);
    }
    self.rewrite(node);
  }

  /// Applies the rules for the node's current kind. Rules that turn a node
  /// into a different kind call this again so the new form gets its own
  /// rules applied.
  fn rewrite(&mut self, node: NodeId) {
    match self.tree.kind(node) {
      Kind::Module | Kind::Block => self.mangle_statements(node),
      Kind::Expression => self.mangle_expression_statement(node),
      Kind::If => self.mangle_if(node),
      Kind::While => self.mangle_while(node),
      Kind::For => self.mangle_for(node),
      Kind::DoWhile | Kind::ForIn | Kind::Label(_) => self.mangle_loop_body(node),
      Kind::Try => self.mangle_try(node),
      Kind::Conditional => self.mangle_conditional(node),
      Kind::Sequence => self.mangle_sequence(node),
      Kind::Call => self.mangle_call(node),
      &Kind::Unary(op) => self.mangle_unary(node, op),
      &Kind::Binary(op) => self.mangle_binary(node, op),
      _ => {}
    }
  }

  /// Detaches and returns the three children of a node that has exactly
  /// three.
  fn take_three(&mut self, node: NodeId) -> [NodeId; 3] {
    let children = self.tree.take_children(node);
    let &[a, b, c] = children.as_slice() else {
      panic!(
        "{} node must have 3 children, found {}",
        self.tree.kind(node).name(),
        children.len()
      );
    };
    [a, b, c]
  }

  /// Replaces `node` with its detached descendant `replacement`, keeping the
  /// id of `node`.
  fn become_detached(&mut self, node: NodeId, replacement: NodeId) {
    self.tree.remove(replacement);
    self.tree.become_node(node, replacement);
  }

  /// `a, b` with nested sequences on either side flattened. Both operands
  /// must be detached.
  fn join_sequence(&mut self, first: NodeId, second: NodeId) -> NodeId {
    let sequence = self.tree.create_sequence(&[]);
    for part in [first, second] {
      if *self.tree.kind(part) == Kind::Sequence {
        self.tree.append_children_from(sequence, part);
      } else {
        self.tree.append_child(sequence, part);
      }
    }
    sequence
  }

  /// Logical negation of a detached expression, folding literals and
  /// cancelling an existing `!`.
  fn negate(&mut self, value: NodeId) -> NodeId {
    if *self.tree.kind(value) == Kind::Unary(UnaryOp::Not) {
      let inner = self.tree.unary_value(value);
      return self.tree.remove(inner);
    }
    if let Some(truthy) = self.tree.as_boolean(value) {
      return self.tree.create_boolean(!truthy);
    }
    self.tree.create_unary(UnaryOp::Not, value)
  }
}
