//! Definition/use collection and constant-variable inlining.

use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::SymbolId;
use crate::ir::Tree;
use std::collections::BTreeMap;
use tracing::trace;

/// Nodes that read or write one symbol, in visit order.
#[derive(Clone, Debug, Default)]
pub struct SymbolUsage {
  pub reads: Vec<NodeId>,
  pub writes: Vec<NodeId>,
}

impl SymbolUsage {
  pub fn count(&self) -> usize {
    self.reads.len() + self.writes.len()
  }
}

/// Records, per symbol, every node that reads it (identifier and member
/// references, `break`/`continue` labels) and every node that writes it
/// (declarations, property keys, assignment and update targets).
///
/// The records point into the tree as it was when scanned. Any mutation makes
/// them stale, so scan again before relying on them.
#[derive(Debug, Default)]
pub struct Scanner {
  usages: BTreeMap<SymbolId, SymbolUsage>,
}

impl Scanner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn usage(&self, symbol: SymbolId) -> Option<&SymbolUsage> {
    self.usages.get(&symbol)
  }

  /// Every recorded symbol in creation order.
  pub fn usages(&self) -> impl Iterator<Item = (SymbolId, &SymbolUsage)> {
    self.usages.iter().map(|(&symbol, usage)| (symbol, usage))
  }

  fn read(&mut self, symbol: SymbolId, node: NodeId) {
    self.usages.entry(symbol).or_default().reads.push(node);
  }

  fn write(&mut self, symbol: SymbolId, node: NodeId) {
    self.usages.entry(symbol).or_default().writes.push(node);
  }

  pub fn scan(&mut self, tree: &Tree, root: NodeId) {
    match tree.kind(root) {
      Kind::Identifier(symbol) => self.read(*symbol, root),
      Kind::Member(symbol) => {
        self.read(*symbol, root);
        self.scan(tree, tree.member_value(root));
      }
      Kind::Break(Some(label)) | Kind::Continue(Some(label)) => self.read(*label, root),
      Kind::Function(symbol)
      | Kind::Label(symbol)
      | Kind::Property(symbol)
      | Kind::Variable(symbol)
      | Kind::Catch(symbol) => {
        self.write(*symbol, root);
        self.scan_children(tree, root);
      }
      Kind::Unary(op) if op.is_assign() => self.scan_target(tree, tree.unary_value(root)),
      Kind::Assign(_) => {
        self.scan_target(tree, tree.binary_left(root));
        self.scan(tree, tree.binary_right(root));
      }
      Kind::ForIn => {
        let setup = tree.for_in_setup(root);
        if tree.kind(setup).is_expression() {
          self.scan_target(tree, setup);
        } else {
          self.scan(tree, setup);
        }
        self.scan(tree, tree.for_in_value(root));
        self.scan(tree, tree.for_in_body(root));
      }
      _ => self.scan_children(tree, root),
    }
  }

  fn scan_children(&mut self, tree: &Tree, node: NodeId) {
    for child in tree.children(node) {
      self.scan(tree, child);
    }
  }

  fn scan_target(&mut self, tree: &Tree, target: NodeId) {
    match tree.kind(target) {
      Kind::Identifier(symbol) => self.write(*symbol, target),
      Kind::Member(symbol) => {
        let symbol = *symbol;
        self.scan(tree, tree.member_value(target));
        self.write(symbol, target);
      }
      _ => self.scan(tree, target),
    }
  }

  /// Replaces reads of variables that are written exactly once, by a `var`
  /// declaration with a literal initializer, with copies of that literal. A
  /// declaration whose reads were all replaced is removed, and a declaration
  /// list left empty becomes an empty statement.
  ///
  /// Returns whether the tree changed.
  pub fn inline_constant_variables(&self, tree: &mut Tree) -> bool {
    let mut changed = false;
    for (&symbol, usage) in &self.usages {
      let &[write] = usage.writes.as_slice() else {
        continue;
      };
      if !matches!(tree.kind(write), Kind::Variable(_)) {
        continue;
      }
      let Some(list) = tree.parent(write) else {
        continue;
      };
      if *tree.kind(list) != Kind::Variables {
        continue;
      }
      let value = tree.variable_value(write);
      if !tree.is_literal(value) {
        continue;
      }

      let mut inlined_all = true;
      for &read in &usage.reads {
        if *tree.kind(read) == Kind::Identifier(symbol) {
          let copy = tree.clone_subtree(value);
          tree.become_node(read, copy);
          changed = true;
        } else {
          inlined_all = false;
        }
      }
      if inlined_all {
        tree.remove(write);
        if !tree.has_children(list) {
          tree.become_empty(list);
        }
        changed = true;
      }
      trace!(
        symbol = tree.symbol_name(symbol),
        reads = usage.reads.len(),
        removed = inlined_all,
        "inlined constant variable"
      );
    }
    changed
  }
}

#[cfg(test)]
mod tests {
  use super::Scanner;
  use crate::ir::AssignOp;
  use crate::ir::Kind;
  use crate::ir::Tree;
  use crate::ir::UnaryOp;

  #[test]
  fn records_reads_and_writes() {
    let mut tree = Tree::new();
    let x = tree.create_symbol("x");
    let prop = tree.create_pinned_symbol("prop");
    let module = tree.create_module();
    let init = tree.create_number(1.0);
    let decl = tree.create_variable(x, init);
    let list = tree.create_variables();
    tree.append_child(list, decl);
    tree.append_child(module, list);
    // x.prop = x;
    let object = tree.create_identifier(x);
    let target = tree.create_member(object, prop);
    let value = tree.create_identifier(x);
    let assign = tree.create_assign(AssignOp::Assign, target, value);
    let stmt = tree.create_expression(assign);
    tree.append_child(module, stmt);
    // x++;
    let operand = tree.create_identifier(x);
    let update = tree.create_unary(UnaryOp::PostfixIncrement, operand);
    let stmt = tree.create_expression(update);
    tree.append_child(module, stmt);

    let mut scanner = Scanner::new();
    scanner.scan(&tree, module);
    let usage = scanner.usage(x).unwrap();
    assert_eq!(usage.reads, vec![object, value]);
    assert_eq!(usage.writes, vec![decl, operand]);
    let usage = scanner.usage(prop).unwrap();
    assert!(usage.reads.is_empty());
    assert_eq!(usage.writes, vec![target]);
  }

  #[test]
  fn inlines_single_literal_declaration() {
    let mut tree = Tree::new();
    let x = tree.create_symbol("x");
    let f = tree.create_symbol("f");
    let module = tree.create_module();
    let init = tree.create_string("s");
    let decl = tree.create_variable(x, init);
    let list = tree.create_variables();
    tree.append_child(list, decl);
    tree.append_child(module, list);
    let callee = tree.create_identifier(f);
    let arg = tree.create_identifier(x);
    let call = tree.create_call(callee, &[arg]);
    let stmt = tree.create_expression(call);
    tree.append_child(module, stmt);

    let mut scanner = Scanner::new();
    scanner.scan(&tree, module);
    assert!(scanner.inline_constant_variables(&mut tree));
    assert_eq!(*tree.kind(arg), Kind::String("s".to_string()));
    assert_eq!(*tree.kind(list), Kind::Empty);
    tree.verify(module);

    let mut rescan = Scanner::new();
    rescan.scan(&tree, module);
    assert!(!rescan.inline_constant_variables(&mut tree));
  }

  #[test]
  fn keeps_parameters_and_reassigned_variables() {
    let mut tree = Tree::new();
    let f = tree.create_symbol("f");
    let a = tree.create_symbol("a");
    let body = tree.create_block();
    let value = tree.create_identifier(a);
    let ret = tree.create_return(Some(value));
    tree.append_child(body, ret);
    let param_init = tree.create_undefined();
    let param = tree.create_variable(a, param_init);
    let function = tree.create_function(f, body, &[param]);
    let module = tree.create_module();
    tree.append_child(module, function);

    let mut scanner = Scanner::new();
    scanner.scan(&tree, module);
    assert!(!scanner.inline_constant_variables(&mut tree));
    assert_eq!(*tree.kind(value), Kind::Identifier(a));
  }
}
