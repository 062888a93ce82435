use super::Kind;
use super::NodeId;
use super::SymbolId;
use super::Tree;

// Role accessors. Each one checks the node kind and panics when asked for a
// role the kind does not have.

impl Tree {
  fn nth_child(&self, id: NodeId, index: usize, role: &str) -> NodeId {
    self
      .children(id)
      .nth(index)
      .unwrap_or_else(|| panic!("{} node has no {role}", self.kind(id).name()))
  }

  fn expect_kind(&self, id: NodeId, role: &str, ok: bool) {
    assert!(ok, "{role} requested from {} node", self.kind(id).name());
  }

  /// Symbol of a declaring or referencing node.
  pub fn symbol_of(&self, id: NodeId) -> SymbolId {
    match self.kind(id) {
      Kind::Property(symbol)
      | Kind::Variable(symbol)
      | Kind::Catch(symbol)
      | Kind::Function(symbol)
      | Kind::Label(symbol)
      | Kind::Identifier(symbol)
      | Kind::Member(symbol) => *symbol,
      other => panic!("symbol requested from {} node", other.name()),
    }
  }

  /// Target label of a `break` or `continue`.
  pub fn jump_label(&self, id: NodeId) -> Option<SymbolId> {
    match self.kind(id) {
      Kind::Break(label) | Kind::Continue(label) => *label,
      other => panic!("jump label requested from {} node", other.name()),
    }
  }

  pub fn number_value(&self, id: NodeId) -> f64 {
    match self.kind(id) {
      Kind::Number(value) => *value,
      other => panic!("number requested from {} node", other.name()),
    }
  }

  pub fn string_value(&self, id: NodeId) -> &str {
    match self.kind(id) {
      Kind::String(value) => value,
      other => panic!("string requested from {} node", other.name()),
    }
  }

  pub fn boolean_value(&self, id: NodeId) -> bool {
    match self.kind(id) {
      Kind::Boolean(value) => *value,
      other => panic!("boolean requested from {} node", other.name()),
    }
  }

  pub fn expression_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "expression value", *self.kind(id) == Kind::Expression);
    self.nth_child(id, 0, "value")
  }

  pub fn variable_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "variable value", matches!(self.kind(id), Kind::Variable(_)));
    self.nth_child(id, 0, "value")
  }

  pub fn property_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "property value", matches!(self.kind(id), Kind::Property(_)));
    self.nth_child(id, 0, "value")
  }

  pub fn function_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "function body", matches!(self.kind(id), Kind::Function(_)));
    self.nth_child(id, 0, "body")
  }

  pub fn function_params(&self, id: NodeId) -> Vec<NodeId> {
    self.expect_kind(id, "function parameters", matches!(self.kind(id), Kind::Function(_)));
    self.children(id).skip(1).collect()
  }

  pub fn return_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "return value", *self.kind(id) == Kind::Return);
    self.nth_child(id, 0, "value")
  }

  pub fn throw_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "throw value", *self.kind(id) == Kind::Throw);
    self.nth_child(id, 0, "value")
  }

  pub fn if_test(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "if test", *self.kind(id) == Kind::If);
    self.nth_child(id, 0, "test")
  }

  pub fn if_true(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "if branch", *self.kind(id) == Kind::If);
    self.nth_child(id, 1, "branch")
  }

  pub fn if_false(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "else branch", *self.kind(id) == Kind::If);
    self.nth_child(id, 2, "else branch")
  }

  pub fn for_setup(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for setup", *self.kind(id) == Kind::For);
    self.nth_child(id, 0, "setup")
  }

  pub fn for_test(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for test", *self.kind(id) == Kind::For);
    self.nth_child(id, 1, "test")
  }

  pub fn for_update(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for update", *self.kind(id) == Kind::For);
    self.nth_child(id, 2, "update")
  }

  pub fn for_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for body", *self.kind(id) == Kind::For);
    self.nth_child(id, 3, "body")
  }

  pub fn for_in_setup(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for-in setup", *self.kind(id) == Kind::ForIn);
    self.nth_child(id, 0, "setup")
  }

  pub fn for_in_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for-in value", *self.kind(id) == Kind::ForIn);
    self.nth_child(id, 1, "value")
  }

  pub fn for_in_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "for-in body", *self.kind(id) == Kind::ForIn);
    self.nth_child(id, 2, "body")
  }

  pub fn do_while_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "do-while body", *self.kind(id) == Kind::DoWhile);
    self.nth_child(id, 0, "body")
  }

  pub fn do_while_test(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "do-while test", *self.kind(id) == Kind::DoWhile);
    self.nth_child(id, 1, "test")
  }

  pub fn while_test(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "while test", *self.kind(id) == Kind::While);
    self.nth_child(id, 0, "test")
  }

  pub fn while_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "while body", *self.kind(id) == Kind::While);
    self.nth_child(id, 1, "body")
  }

  pub fn label_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "label body", matches!(self.kind(id), Kind::Label(_)));
    self.nth_child(id, 0, "body")
  }

  pub fn try_block(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "try block", *self.kind(id) == Kind::Try);
    self.nth_child(id, 0, "block")
  }

  /// `Catch` node or `Empty`.
  pub fn try_catch(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "catch clause", *self.kind(id) == Kind::Try);
    self.nth_child(id, 1, "catch clause")
  }

  /// `Block` node or `Empty`.
  pub fn try_finally(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "finally block", *self.kind(id) == Kind::Try);
    self.nth_child(id, 2, "finally block")
  }

  pub fn catch_body(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "catch body", matches!(self.kind(id), Kind::Catch(_)));
    self.nth_child(id, 0, "body")
  }

  pub fn call_target(&self, id: NodeId) -> NodeId {
    self.expect_kind(
      id,
      "call target",
      matches!(self.kind(id), Kind::Call | Kind::New),
    );
    self.nth_child(id, 0, "target")
  }

  pub fn call_args(&self, id: NodeId) -> Vec<NodeId> {
    self.expect_kind(id, "call arguments", matches!(self.kind(id), Kind::Call | Kind::New));
    self.children(id).skip(1).collect()
  }

  pub fn member_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "member object", matches!(self.kind(id), Kind::Member(_)));
    self.nth_child(id, 0, "object")
  }

  pub fn index_target(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "index target", *self.kind(id) == Kind::Index);
    self.nth_child(id, 0, "target")
  }

  pub fn index_property(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "index property", *self.kind(id) == Kind::Index);
    self.nth_child(id, 1, "property")
  }

  pub fn conditional_test(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "conditional test", *self.kind(id) == Kind::Conditional);
    self.nth_child(id, 0, "test")
  }

  pub fn conditional_true(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "conditional branch", *self.kind(id) == Kind::Conditional);
    self.nth_child(id, 1, "branch")
  }

  pub fn conditional_false(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "conditional branch", *self.kind(id) == Kind::Conditional);
    self.nth_child(id, 2, "branch")
  }

  pub fn unary_value(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "unary operand", self.kind(id).is_unary());
    self.nth_child(id, 0, "operand")
  }

  pub fn binary_left(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "left operand", self.kind(id).is_binary());
    self.nth_child(id, 0, "left operand")
  }

  pub fn binary_right(&self, id: NodeId) -> NodeId {
    self.expect_kind(id, "right operand", self.kind(id).is_binary());
    self.nth_child(id, 1, "right operand")
  }
}
