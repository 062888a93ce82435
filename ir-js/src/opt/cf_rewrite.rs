use super::Mangler;
use crate::ir::BinaryOp;
use crate::ir::Kind;
use crate::ir::NodeId;
use crate::ir::UnaryOp;

impl Mangler<'_> {
  /// Unwraps a block in statement position: `{}` becomes `;` and `{ a; }`
  /// becomes `a;`.
  fn collapse_body(&mut self, body: NodeId) {
    if !self.is_dissolvable_block(body) {
      return;
    }
    match self.tree.first_child(body) {
      None => {
        self.tree.become_empty(body);
        self.rewrote("collapse-empty-block");
      }
      Some(only) if self.tree.next_sibling(only).is_none() => {
        self.become_detached(body, only);
        self.rewrote("collapse-single-statement-block");
      }
      Some(_) => {}
    }
  }

  pub(super) fn mangle_loop_body(&mut self, node: NodeId) {
    let body = match self.tree.kind(node) {
      Kind::DoWhile => self.tree.do_while_body(node),
      Kind::ForIn => self.tree.for_in_body(node),
      _ => self.tree.label_body(node),
    };
    self.collapse_body(body);
  }

  pub(super) fn mangle_if(&mut self, node: NodeId) {
    self.collapse_body(self.tree.if_true(node));
    self.collapse_body(self.tree.if_false(node));

    let test = self.tree.if_test(node);
    let when_true = self.tree.if_true(node);
    let when_false = self.tree.if_false(node);

    if let Some(truthy) = self.tree.as_boolean(test) {
      let (taken, dropped) = if truthy {
        (when_true, when_false)
      } else {
        (when_false, when_true)
      };
      if !self.tree.declares_bindings(dropped) {
        self.become_detached(node, taken);
        self.rewrote("if-literal-test");
        self.rewrite(node);
        return;
      }
    }

    let true_kind = self.tree.kind(when_true).clone();
    let false_kind = self.tree.kind(when_false).clone();
    match (true_kind, false_kind) {
      (Kind::Empty, Kind::Empty) => {
        self.tree.remove(test);
        let statement = self.tree.create_expression(test);
        self.tree.become_node(node, statement);
        self.rewrote("if-empty-branches");
        self.rewrite(node);
      }
      (Kind::Empty, _) => {
        let [test, when_true, when_false] = self.take_three(node);
        let negated = self.negate(test);
        for child in [negated, when_false, when_true] {
          self.tree.append_child(node, child);
        }
        self.rewrote("if-invert-empty-branch");
        self.rewrite(node);
      }
      (_, _) if self.tree.kind(test) == &Kind::Unary(UnaryOp::Not) && !self.tree.is_empty(when_false) => {
        let [test, when_true, when_false] = self.take_three(node);
        let inner = self.negate(test);
        for child in [inner, when_false, when_true] {
          self.tree.append_child(node, child);
        }
        self.rewrote("if-swap-negated-test");
        self.rewrite(node);
      }
      (Kind::Expression, Kind::Expression) => {
        self.join_branches(node, Kind::Expression);
        self.rewrote("if-to-conditional");
        self.rewrite(node);
      }
      (Kind::Return, Kind::Return) => {
        self.join_branches(node, Kind::Return);
        self.rewrote("if-to-conditional-return");
      }
      (Kind::Throw, Kind::Throw) => {
        self.join_branches(node, Kind::Throw);
        self.rewrote("if-to-conditional-throw");
      }
      (Kind::Expression, Kind::Empty) => {
        let [test, when_true, _] = self.take_three(node);
        let value = self.tree.expression_value(when_true);
        self.tree.remove(value);
        let logical = if *self.tree.kind(test) == Kind::Unary(UnaryOp::Not) {
          let inner = self.negate(test);
          self.tree.create_binary(BinaryOp::LogicalOr, inner, value)
        } else {
          self.tree.create_binary(BinaryOp::LogicalAnd, test, value)
        };
        let statement = self.tree.create_expression(logical);
        self.tree.become_node(node, statement);
        self.rewrote("if-to-logical");
        self.rewrite(node);
      }
      _ => {}
    }
  }

  /// Turns `if (t) X(a); else X(b);` into `X(t ? a : b);` where `X` is an
  /// expression, `return` or `throw` statement.
  fn join_branches(&mut self, node: NodeId, statement: Kind) {
    let [test, when_true, when_false] = self.take_three(node);
    let a = self.tree.first_child(when_true);
    let b = self.tree.first_child(when_false);
    let (Some(a), Some(b)) = (a, b) else {
      panic!("{} branches must carry a value", statement.name());
    };
    self.tree.remove(a);
    self.tree.remove(b);
    let conditional = self.tree.create_conditional(test, a, b);
    let joined = match statement {
      Kind::Expression => self.tree.create_expression(conditional),
      Kind::Return => self.tree.create_return(Some(conditional)),
      _ => self.tree.create_throw(conditional),
    };
    self.tree.become_node(node, joined);
    let conditional = self.tree.first_child(node);
    if let Some(conditional) = conditional {
      self.rewrite(conditional);
    }
  }

  pub(super) fn mangle_while(&mut self, node: NodeId) {
    let children = self.tree.take_children(node);
    let &[test, body] = children.as_slice() else {
      panic!("While node must have 2 children, found {}", children.len());
    };
    let setup = self.tree.create_empty();
    let update = self.tree.create_empty();
    let replacement = self.tree.create_for(setup, test, update, body);
    self.tree.become_node(node, replacement);
    self.rewrote("while-to-for");
    self.mangle_for(node);
  }

  pub(super) fn mangle_for(&mut self, node: NodeId) {
    self.collapse_body(self.tree.for_body(node));

    let test = self.tree.for_test(node);
    if self.tree.is_truthy(test) {
      self.tree.become_empty(test);
      self.rewrote("for-drop-truthy-test");
    }
    for slot in [self.tree.for_setup(node), self.tree.for_update(node)] {
      if self.tree.kind(slot).is_expression() && !self.reduce_to_effects(slot) {
        self.tree.become_empty(slot);
        self.rewrote("for-drop-pure-clause");
      }
    }
  }

  pub(super) fn mangle_try(&mut self, node: NodeId) {
    let catch = self.tree.try_catch(node);
    if let &Kind::Catch(binding) = self.tree.kind(catch) {
      let body = self.tree.catch_body(catch);
      let rethrows = match self.tree.first_child(body) {
        Some(only) if self.tree.next_sibling(only).is_none() => {
          *self.tree.kind(only) == Kind::Throw
            && *self.tree.kind(self.tree.throw_value(only)) == Kind::Identifier(binding)
        }
        _ => false,
      };
      if rethrows {
        self.tree.become_empty(catch);
        self.rewrote("try-drop-rethrowing-catch");
      }
    }

    let finally = self.tree.try_finally(node);
    if *self.tree.kind(finally) == Kind::Block && !self.tree.has_children(finally) {
      self.tree.become_empty(finally);
      self.rewrote("try-drop-empty-finally");
    }

    let block = self.tree.try_block(node);
    let catch = self.tree.try_catch(node);
    if !self.tree.has_children(block) {
      // Nothing can throw, so only the finally block ever runs.
      if self.tree.is_empty(finally) {
        self.tree.become_empty(node);
      } else {
        self.become_detached(node, finally);
      }
      self.rewrote("try-empty-block");
    } else if self.tree.is_empty(catch) && self.tree.is_empty(finally) {
      self.become_detached(node, block);
      self.rewrote("try-without-handlers");
    }
  }

  pub(super) fn mangle_conditional(&mut self, node: NodeId) {
    loop {
      let test = self.tree.conditional_test(node);
      if let Some(truthy) = self.tree.as_boolean(test) {
        let taken = if truthy {
          self.tree.conditional_true(node)
        } else {
          self.tree.conditional_false(node)
        };
        self.become_detached(node, taken);
        self.rewrote("conditional-literal-test");
        return;
      }
      if *self.tree.kind(test) != Kind::Unary(UnaryOp::Not) {
        break;
      }
      let [test, when_true, when_false] = self.take_three(node);
      let inner = self.negate(test);
      for child in [inner, when_false, when_true] {
        self.tree.append_child(node, child);
      }
      self.rewrote("conditional-swap-negated-test");
    }

    let test = self.tree.conditional_test(node);
    let when_true = self.tree.conditional_true(node);
    let when_false = self.tree.conditional_false(node);
    let pure_test = !self.tree.has_side_effects(test);

    if self.tree.looks_the_same_as(when_true, when_false) {
      if pure_test {
        self.become_detached(node, when_true);
      } else {
        let [test, when_true, _] = self.take_three(node);
        let sequence = self.join_sequence(test, when_true);
        self.tree.become_node(node, sequence);
      }
      self.rewrote("conditional-identical-branches");
    } else if pure_test && self.tree.looks_the_same_as(test, when_true) {
      let [test, _, when_false] = self.take_three(node);
      let logical = self.tree.create_binary(BinaryOp::LogicalOr, test, when_false);
      self.tree.become_node(node, logical);
      self.rewrote("conditional-to-or");
    } else if pure_test && self.tree.looks_the_same_as(test, when_false) {
      let [test, when_true, _] = self.take_three(node);
      let logical = self.tree.create_binary(BinaryOp::LogicalAnd, test, when_true);
      self.tree.become_node(node, logical);
      self.rewrote("conditional-to-and");
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::emit::emit;
  use crate::emit::EmitMode;
  use crate::ir::NodeId;
  use crate::ir::Tree;
  use crate::opt::mangle;
  use crate::opt::KnownSymbols;

  struct Fixture {
    tree: Tree,
    known: KnownSymbols,
    module: NodeId,
  }

  impl Fixture {
    fn new() -> Self {
      let mut tree = Tree::new();
      let known = KnownSymbols {
        math: tree.create_pinned_symbol("Math"),
        math_pow: tree.create_pinned_symbol("pow"),
      };
      let module = tree.create_module();
      Fixture { tree, known, module }
    }

    fn push(&mut self, statement: NodeId) {
      self.tree.append_child(self.module, statement);
    }

    fn mangled(mut self) -> String {
      mangle(&mut self.tree, self.module, &self.known);
      self.tree.verify(self.module);
      emit(&self.tree, self.module, EmitMode::Normal)
    }
  }

  #[test]
  fn if_with_one_expression_branch_becomes_logical() {
    let mut f = Fixture::new();
    let a = f.tree.create_symbol("a");
    let g = f.tree.create_symbol("g");
    for negated in [false, true] {
      let mut test = f.tree.create_identifier(a);
      if negated {
        test = f.tree.create_unary(crate::ir::UnaryOp::Not, test);
      }
      let callee = f.tree.create_identifier(g);
      let call = f.tree.create_call(callee, &[]);
      let branch = f.tree.create_expression(call);
      let block = f.tree.create_block();
      f.tree.append_child(block, branch);
      let statement = f.tree.create_if(test, block, None);
      f.push(statement);
    }
    assert_eq!(f.mangled(), "a && g(), a || g();\n");
  }

  #[test]
  fn if_with_returns_becomes_conditional_return() {
    let mut f = Fixture::new();
    let a = f.tree.create_symbol("a");
    let test = f.tree.create_identifier(a);
    let one = f.tree.create_number(1.0);
    let two = f.tree.create_number(2.0);
    let when_true = f.tree.create_return(Some(one));
    let when_false = f.tree.create_return(Some(two));
    let statement = f.tree.create_if(test, when_true, Some(when_false));
    f.push(statement);
    assert_eq!(f.mangled(), "return a ? 1 : 2;\n");
  }

  #[test]
  fn literal_test_keeps_branch_declaring_variables() {
    let mut f = Fixture::new();
    let v = f.tree.create_symbol("v");
    let test = f.tree.create_boolean(false);
    let init = f.tree.create_number(1.0);
    let declaration = f.tree.create_variable(v, init);
    let list = f.tree.create_variables();
    f.tree.append_child(list, declaration);
    let statement = f.tree.create_if(test, list, None);
    f.push(statement);
    assert_eq!(f.mangled(), "if (false)\n  var v = 1;\n");
  }

  #[test]
  fn while_becomes_for() {
    let mut f = Fixture::new();
    let test = f.tree.create_boolean(true);
    let body = f.tree.create_break(None);
    let statement = f.tree.create_while(test, body);
    f.push(statement);
    assert_eq!(f.mangled(), "for (;;)\n  break;\n");
  }

  #[test]
  fn try_without_handlers_unwraps() {
    let mut f = Fixture::new();
    let g = f.tree.create_symbol("g");
    let e = f.tree.create_symbol("e");
    let callee = f.tree.create_identifier(g);
    let call = f.tree.create_call(callee, &[]);
    let statement = f.tree.create_expression(call);
    let block = f.tree.create_block();
    f.tree.append_child(block, statement);
    let thrown = f.tree.create_identifier(e);
    let rethrow = f.tree.create_throw(thrown);
    let catch_body = f.tree.create_block();
    f.tree.append_child(catch_body, rethrow);
    let catch = f.tree.create_catch(e, catch_body);
    let finally = f.tree.create_block();
    let statement = f.tree.create_try(block, Some(catch), Some(finally));
    f.push(statement);
    assert_eq!(f.mangled(), "g();\n");
  }
}
