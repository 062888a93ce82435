use super::AssignOp;
use super::BinaryOp;
use super::Kind;
use super::NodeId;
use super::SymbolId;
use super::Tree;
use super::UnaryOp;

// Constructors check the structural invariants of the kind they build and
// panic on a violation.

impl Tree {
  pub(crate) fn assert_expression(&self, id: NodeId, role: &str) {
    assert!(
      self.kind(id).is_expression(),
      "{role} must be an expression, got {}",
      self.kind(id).name()
    );
  }

  pub(crate) fn assert_statement(&self, id: NodeId, role: &str) {
    assert!(
      self.kind(id).is_statement(),
      "{role} must be a statement, got {}",
      self.kind(id).name()
    );
  }

  pub(crate) fn assert_kind(&self, id: NodeId, role: &str, ok: bool) {
    assert!(ok, "{role} has invalid kind {}", self.kind(id).name());
  }

  fn with_children(&mut self, kind: Kind, children: &[NodeId]) -> NodeId {
    let node = self.create(kind);
    for &child in children {
      self.append_child(node, child);
    }
    node
  }

  pub fn create_module(&mut self) -> NodeId {
    self.create(Kind::Module)
  }

  pub fn create_block(&mut self) -> NodeId {
    self.create(Kind::Block)
  }

  pub fn create_empty(&mut self) -> NodeId {
    self.create(Kind::Empty)
  }

  pub fn create_debugger(&mut self) -> NodeId {
    self.create(Kind::Debugger)
  }

  pub fn create_directive(&mut self, text: impl Into<String>) -> NodeId {
    self.create(Kind::Directive(text.into()))
  }

  pub fn create_break(&mut self, label: Option<SymbolId>) -> NodeId {
    self.create(Kind::Break(label))
  }

  pub fn create_continue(&mut self, label: Option<SymbolId>) -> NodeId {
    self.create(Kind::Continue(label))
  }

  pub fn create_expression(&mut self, value: NodeId) -> NodeId {
    self.assert_expression(value, "expression statement value");
    self.with_children(Kind::Expression, &[value])
  }

  pub fn create_variables(&mut self) -> NodeId {
    self.create(Kind::Variables)
  }

  pub fn create_variable(&mut self, symbol: SymbolId, value: NodeId) -> NodeId {
    self.assert_expression(value, "variable initializer");
    self.with_children(Kind::Variable(symbol), &[value])
  }

  /// `params` are `Variable` nodes; their initializers are ignored on output
  /// and are normally `Undefined`.
  pub fn create_function(&mut self, symbol: SymbolId, body: NodeId, params: &[NodeId]) -> NodeId {
    self.assert_kind(body, "function body", *self.kind(body) == Kind::Block);
    for &param in params {
      self.assert_kind(
        param,
        "function parameter",
        matches!(self.kind(param), Kind::Variable(_)),
      );
    }
    let node = self.with_children(Kind::Function(symbol), &[body]);
    for &param in params {
      self.append_child(node, param);
    }
    node
  }

  pub fn create_for(&mut self, setup: NodeId, test: NodeId, update: NodeId, body: NodeId) -> NodeId {
    self.assert_kind(
      setup,
      "for setup",
      matches!(self.kind(setup), Kind::Empty | Kind::Variables) || self.kind(setup).is_expression(),
    );
    self.assert_kind(
      test,
      "for test",
      *self.kind(test) == Kind::Empty || self.kind(test).is_expression(),
    );
    self.assert_kind(
      update,
      "for update",
      *self.kind(update) == Kind::Empty || self.kind(update).is_expression(),
    );
    self.assert_statement(body, "for body");
    self.with_children(Kind::For, &[setup, test, update, body])
  }

  pub fn create_for_in(&mut self, setup: NodeId, value: NodeId, body: NodeId) -> NodeId {
    self.assert_kind(
      setup,
      "for-in setup",
      matches!(self.kind(setup), Kind::Variable(_)) || self.kind(setup).is_expression(),
    );
    self.assert_expression(value, "for-in value");
    self.assert_statement(body, "for-in body");
    self.with_children(Kind::ForIn, &[setup, value, body])
  }

  pub fn create_property(&mut self, key: SymbolId, value: NodeId) -> NodeId {
    self.assert_expression(value, "property value");
    self.with_children(Kind::Property(key), &[value])
  }

  /// A bare `return;` carries an `Undefined` value.
  pub fn create_return(&mut self, value: Option<NodeId>) -> NodeId {
    let value = match value {
      Some(value) => value,
      None => self.create_undefined(),
    };
    self.assert_expression(value, "return value");
    self.with_children(Kind::Return, &[value])
  }

  pub fn create_throw(&mut self, value: NodeId) -> NodeId {
    self.assert_expression(value, "throw value");
    self.with_children(Kind::Throw, &[value])
  }

  /// A missing else branch is an `Empty` statement.
  pub fn create_if(&mut self, test: NodeId, when_true: NodeId, when_false: Option<NodeId>) -> NodeId {
    let when_false = match when_false {
      Some(when_false) => when_false,
      None => self.create_empty(),
    };
    self.assert_expression(test, "if test");
    self.assert_statement(when_true, "if branch");
    self.assert_statement(when_false, "else branch");
    self.with_children(Kind::If, &[test, when_true, when_false])
  }

  pub fn create_do_while(&mut self, body: NodeId, test: NodeId) -> NodeId {
    self.assert_statement(body, "do-while body");
    self.assert_expression(test, "do-while test");
    self.with_children(Kind::DoWhile, &[body, test])
  }

  pub fn create_label(&mut self, symbol: SymbolId, body: NodeId) -> NodeId {
    self.assert_statement(body, "label body");
    self.with_children(Kind::Label(symbol), &[body])
  }

  pub fn create_while(&mut self, test: NodeId, body: NodeId) -> NodeId {
    self.assert_expression(test, "while test");
    self.assert_statement(body, "while body");
    self.with_children(Kind::While, &[test, body])
  }

  pub fn create_try(
    &mut self,
    block: NodeId,
    catch: Option<NodeId>,
    finally: Option<NodeId>,
  ) -> NodeId {
    self.assert_kind(block, "try block", *self.kind(block) == Kind::Block);
    let catch = match catch {
      Some(catch) => {
        self.assert_kind(catch, "catch clause", matches!(self.kind(catch), Kind::Catch(_)));
        catch
      }
      None => self.create_empty(),
    };
    let finally = match finally {
      Some(finally) => {
        self.assert_kind(finally, "finally block", *self.kind(finally) == Kind::Block);
        finally
      }
      None => self.create_empty(),
    };
    self.with_children(Kind::Try, &[block, catch, finally])
  }

  pub fn create_catch(&mut self, symbol: SymbolId, body: NodeId) -> NodeId {
    self.assert_kind(body, "catch body", *self.kind(body) == Kind::Block);
    self.with_children(Kind::Catch(symbol), &[body])
  }

  pub fn create_call(&mut self, target: NodeId, args: &[NodeId]) -> NodeId {
    self.assert_expression(target, "call target");
    for &arg in args {
      self.assert_expression(arg, "call argument");
    }
    let node = self.with_children(Kind::Call, &[target]);
    for &arg in args {
      self.append_child(node, arg);
    }
    node
  }

  pub fn create_new(&mut self, target: NodeId, args: &[NodeId]) -> NodeId {
    self.assert_expression(target, "new target");
    for &arg in args {
      self.assert_expression(arg, "new argument");
    }
    let node = self.with_children(Kind::New, &[target]);
    for &arg in args {
      self.append_child(node, arg);
    }
    node
  }

  pub fn create_identifier(&mut self, symbol: SymbolId) -> NodeId {
    self.create(Kind::Identifier(symbol))
  }

  pub fn create_member(&mut self, value: NodeId, symbol: SymbolId) -> NodeId {
    self.assert_expression(value, "member object");
    self.with_children(Kind::Member(symbol), &[value])
  }

  pub fn create_index(&mut self, target: NodeId, property: NodeId) -> NodeId {
    self.assert_expression(target, "index target");
    self.assert_expression(property, "index property");
    self.with_children(Kind::Index, &[target, property])
  }

  pub fn create_conditional(&mut self, test: NodeId, when_true: NodeId, when_false: NodeId) -> NodeId {
    self.assert_expression(test, "conditional test");
    self.assert_expression(when_true, "conditional branch");
    self.assert_expression(when_false, "conditional branch");
    self.with_children(Kind::Conditional, &[test, when_true, when_false])
  }

  pub fn create_sequence(&mut self, values: &[NodeId]) -> NodeId {
    for &value in values {
      self.assert_expression(value, "sequence element");
    }
    self.with_children(Kind::Sequence, values)
  }

  pub fn create_unary(&mut self, op: UnaryOp, value: NodeId) -> NodeId {
    self.assert_expression(value, "unary operand");
    self.with_children(Kind::Unary(op), &[value])
  }

  pub fn create_binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
    self.assert_expression(left, "binary operand");
    self.assert_expression(right, "binary operand");
    self.with_children(Kind::Binary(op), &[left, right])
  }

  pub fn create_assign(&mut self, op: AssignOp, target: NodeId, value: NodeId) -> NodeId {
    self.assert_expression(target, "assignment target");
    self.assert_expression(value, "assignment value");
    self.with_children(Kind::Assign(op), &[target, value])
  }

  /// Holes are `Undefined` elements.
  pub fn create_array(&mut self, elements: &[NodeId]) -> NodeId {
    for &element in elements {
      self.assert_expression(element, "array element");
    }
    self.with_children(Kind::Array, elements)
  }

  pub fn create_object(&mut self, properties: &[NodeId]) -> NodeId {
    for &property in properties {
      self.assert_kind(
        property,
        "object member",
        matches!(self.kind(property), Kind::Property(_)),
      );
    }
    self.with_children(Kind::Object, properties)
  }

  pub fn create_this(&mut self) -> NodeId {
    self.create(Kind::This)
  }

  pub fn create_null(&mut self) -> NodeId {
    self.create(Kind::Null)
  }

  pub fn create_undefined(&mut self) -> NodeId {
    self.create(Kind::Undefined)
  }

  pub fn create_boolean(&mut self, value: bool) -> NodeId {
    self.create(Kind::Boolean(value))
  }

  pub fn create_number(&mut self, value: f64) -> NodeId {
    self.create(Kind::Number(value))
  }

  pub fn create_string(&mut self, value: impl Into<String>) -> NodeId {
    self.create(Kind::String(value.into()))
  }

  pub fn create_regexp(&mut self, source: impl Into<String>) -> NodeId {
    self.create(Kind::RegExp(source.into()))
  }
}
