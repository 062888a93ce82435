use super::estree::EsNode;
use super::scope::ScopeKind;
use super::Lowerer;
use crate::err::LowerError;
use crate::ir::NodeId;
use crate::ir::SymbolId;

impl Lowerer {
  pub(super) fn lower_statement(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    let tree_node = match node.typ {
      "BlockStatement" => self.lower_block(node)?,
      "BreakStatement" => {
        let label = self.jump_label(node)?;
        self.tree.create_break(label)
      }
      "ContinueStatement" => {
        let label = self.jump_label(node)?;
        self.tree.create_continue(label)
      }
      "DebuggerStatement" => self.tree.create_debugger(),
      "EmptyStatement" => self.tree.create_empty(),
      "ExpressionStatement" => match node.optional_str("directive") {
        Some(directive) => self.tree.create_directive(directive),
        None => {
          let value = self.lower_expression(node.node("expression")?)?;
          self.tree.create_expression(value)
        }
      },
      "ForStatement" => {
        let setup = match node.optional("init")? {
          Some(init) if init.typ == "VariableDeclaration" => self.lower_variables(init)?,
          Some(init) => self.lower_expression(init)?,
          None => self.tree.create_empty(),
        };
        let test = self.lower_optional_expression(node, "test")?;
        let update = self.lower_optional_expression(node, "update")?;
        let body = self.lower_statement(node.node("body")?)?;
        self.tree.create_for(setup, test, update, body)
      }
      "ForInStatement" => {
        let left = node.node("left")?;
        let setup = if left.typ == "VariableDeclaration" {
          self.lower_for_in_variable(left)?
        } else {
          self.lower_assign_target(left)?
        };
        let value = self.lower_expression(node.node("right")?)?;
        let body = self.lower_statement(node.node("body")?)?;
        self.tree.create_for_in(setup, value, body)
      }
      "FunctionDeclaration" => self.lower_function(node)?,
      "IfStatement" => {
        let test = self.lower_expression(node.node("test")?)?;
        let when_true = self.lower_statement(node.node("consequent")?)?;
        let when_false = match node.optional("alternate")? {
          Some(alternate) => Some(self.lower_statement(alternate)?),
          None => None,
        };
        self.tree.create_if(test, when_true, when_false)
      }
      "LabeledStatement" => {
        let name = node.node("label")?.identifier_name()?;
        let symbol = self.tree.create_symbol(name);
        self.labels.push((name.to_string(), symbol));
        let body = self.lower_statement(node.node("body")?);
        self.labels.pop();
        let body = body?;
        self.tree.create_label(symbol, body)
      }
      "ReturnStatement" => {
        let value = match node.optional("argument")? {
          Some(argument) => Some(self.lower_expression(argument)?),
          None => None,
        };
        self.tree.create_return(value)
      }
      "ThrowStatement" => {
        let value = self.lower_expression(node.node("argument")?)?;
        self.tree.create_throw(value)
      }
      "TryStatement" => {
        let block = self.lower_block(node.node("block")?)?;
        let catch = match node.optional("handler")? {
          Some(handler) => Some(self.lower_catch(handler)?),
          None => None,
        };
        let finally = match node.optional("finalizer")? {
          Some(finalizer) => Some(self.lower_block(finalizer)?),
          None => None,
        };
        self.tree.create_try(block, catch, finally)
      }
      "VariableDeclaration" => self.lower_variables(node)?,
      "WhileStatement" => {
        let test = self.lower_expression(node.node("test")?)?;
        let body = self.lower_statement(node.node("body")?)?;
        self.tree.create_while(test, body)
      }
      "DoWhileStatement" => {
        let body = self.lower_statement(node.node("body")?)?;
        let test = self.lower_expression(node.node("test")?)?;
        self.tree.create_do_while(body, test)
      }
      _ => return Err(node.unsupported()),
    };
    Ok(tree_node)
  }

  fn lower_block(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    if node.typ != "BlockStatement" {
      return Err(node.malformed("type"));
    }
    let block = self.tree.create_block();
    for statement in node.list("body")? {
      let statement = self.lower_statement(statement)?;
      self.tree.append_child(block, statement);
    }
    Ok(block)
  }

  fn lower_optional_expression(
    &mut self,
    node: EsNode<'_>,
    field: &'static str,
  ) -> Result<NodeId, LowerError> {
    match node.optional(field)? {
      Some(value) => self.lower_expression(value),
      None => Ok(self.tree.create_empty()),
    }
  }

  fn jump_label(&mut self, node: EsNode<'_>) -> Result<Option<SymbolId>, LowerError> {
    let Some(label) = node.optional("label")? else {
      return Ok(None);
    };
    let name = label.identifier_name()?;
    self
      .labels
      .iter()
      .rev()
      .find(|(label, _)| label == name)
      .map(|&(_, symbol)| Some(symbol))
      .ok_or_else(|| node.malformed("label"))
  }

  fn check_var(&self, node: EsNode<'_>) -> Result<(), LowerError> {
    match node.str("kind")? {
      "var" => Ok(()),
      kind => Err(LowerError::unsupported(format!("{kind} declaration"))),
    }
  }

  fn lower_variables(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    self.check_var(node)?;
    let list = self.tree.create_variables();
    for declarator in node.list("declarations")? {
      let symbol = self.resolve(declarator.node("id")?.identifier_name()?);
      let value = match declarator.optional("init")? {
        Some(init) => self.lower_expression(init)?,
        None => self.tree.create_undefined(),
      };
      let variable = self.tree.create_variable(symbol, value);
      self.tree.append_child(list, variable);
    }
    Ok(list)
  }

  fn lower_for_in_variable(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    self.check_var(node)?;
    let declarators = node.list("declarations")?;
    let &[declarator] = declarators.as_slice() else {
      return Err(node.malformed("declarations"));
    };
    if declarator.optional("init")?.is_some() {
      return Err(LowerError::unsupported("for-in initializer"));
    }
    let symbol = self.resolve(declarator.node("id")?.identifier_name()?);
    let value = self.tree.create_undefined();
    Ok(self.tree.create_variable(symbol, value))
  }

  fn lower_catch(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    let Some(param) = node.optional("param")? else {
      return Err(LowerError::unsupported("catch without binding"));
    };
    let name = param.identifier_name()?;
    self.in_scope(ScopeKind::Catch, |this| {
      let symbol = this.declare(name);
      let body = this.lower_block(node.node("body")?)?;
      Ok(this.tree.create_catch(symbol, body))
    })
  }

  fn lower_function(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    if node.flag("generator") {
      return Err(LowerError::unsupported("generator function"));
    }
    if node.flag("async") {
      return Err(LowerError::unsupported("async function"));
    }
    // Hoisted into the enclosing function when that was entered.
    let symbol = self.resolve(node.node("id")?.identifier_name()?);
    let labels = std::mem::take(&mut self.labels);
    let function = self.in_scope(ScopeKind::Function, |this| {
      let mut params = Vec::new();
      for param in node.list("params")? {
        let symbol = this.declare(param.identifier_name()?);
        let value = this.tree.create_undefined();
        params.push(this.tree.create_variable(symbol, value));
      }
      let body = node.node("body")?;
      this.hoist(&body.list("body")?)?;
      let body = this.lower_block(body)?;
      Ok(this.tree.create_function(symbol, body, &params))
    });
    self.labels = labels;
    function
  }
}
