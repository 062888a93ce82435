use super::estree::EsNode;
use super::Lowerer;
use crate::err::LowerError;
use crate::ir::AssignOp;
use crate::ir::BinaryOp;
use crate::ir::NodeId;
use crate::ir::UnaryOp;
use crate::num::number_to_string;
use crate::num::string_to_number;
use serde_json::Value;

fn binary_op(operator: &str) -> Option<BinaryOp> {
  Some(match operator {
    "+" => BinaryOp::Add,
    "&" => BinaryOp::BitwiseAnd,
    "|" => BinaryOp::BitwiseOr,
    "^" => BinaryOp::BitwiseXor,
    "/" => BinaryOp::Divide,
    "==" => BinaryOp::Equal,
    "===" => BinaryOp::EqualStrict,
    ">" => BinaryOp::GreaterThan,
    ">=" => BinaryOp::GreaterThanEqual,
    "in" => BinaryOp::In,
    "instanceof" => BinaryOp::InstanceOf,
    "<" => BinaryOp::LessThan,
    "<=" => BinaryOp::LessThanEqual,
    "&&" => BinaryOp::LogicalAnd,
    "||" => BinaryOp::LogicalOr,
    "*" => BinaryOp::Multiply,
    "!=" => BinaryOp::NotEqual,
    "!==" => BinaryOp::NotEqualStrict,
    "%" => BinaryOp::Remainder,
    "<<" => BinaryOp::ShiftLeft,
    ">>" => BinaryOp::ShiftRight,
    ">>>" => BinaryOp::ShiftRightUnsigned,
    "-" => BinaryOp::Subtract,
    _ => return None,
  })
}

fn assign_op(operator: &str) -> Option<AssignOp> {
  Some(match operator {
    "=" => AssignOp::Assign,
    "+=" => AssignOp::Add,
    "&=" => AssignOp::BitwiseAnd,
    "|=" => AssignOp::BitwiseOr,
    "^=" => AssignOp::BitwiseXor,
    "/=" => AssignOp::Divide,
    "*=" => AssignOp::Multiply,
    "%=" => AssignOp::Remainder,
    "<<=" => AssignOp::ShiftLeft,
    ">>=" => AssignOp::ShiftRight,
    ">>>=" => AssignOp::ShiftRightUnsigned,
    "-=" => AssignOp::Subtract,
    _ => return None,
  })
}

fn unary_op(operator: &str) -> Option<UnaryOp> {
  Some(match operator {
    "~" => UnaryOp::Complement,
    "delete" => UnaryOp::Delete,
    "-" => UnaryOp::Negative,
    "!" => UnaryOp::Not,
    "+" => UnaryOp::Positive,
    "typeof" => UnaryOp::TypeOf,
    "void" => UnaryOp::Void,
    _ => return None,
  })
}

fn unsupported_operator(operator: &str) -> LowerError {
  LowerError::unsupported(format!("`{operator}` operator"))
}

impl Lowerer {
  pub(super) fn lower_expression(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    let tree_node = match node.typ {
      "Identifier" => {
        let symbol = self.resolve(node.identifier_name()?);
        self.tree.create_identifier(symbol)
      }
      "Literal" => self.lower_literal(node)?,
      "ThisExpression" => self.tree.create_this(),
      "ParenthesizedExpression" => self.lower_expression(node.node("expression")?)?,
      "ArrayExpression" => {
        let mut elements = Vec::new();
        for element in node.nodes("elements")? {
          elements.push(match element {
            Some(element) => self.lower_expression(element)?,
            None => self.tree.create_undefined(),
          });
        }
        self.tree.create_array(&elements)
      }
      "ObjectExpression" => {
        let mut properties = Vec::new();
        for property in node.list("properties")? {
          properties.push(self.lower_property(property)?);
        }
        self.tree.create_object(&properties)
      }
      "ConditionalExpression" => {
        let test = self.lower_expression(node.node("test")?)?;
        let when_true = self.lower_expression(node.node("consequent")?)?;
        let when_false = self.lower_expression(node.node("alternate")?)?;
        self.tree.create_conditional(test, when_true, when_false)
      }
      "MemberExpression" => self.lower_member(node)?,
      "CallExpression" | "NewExpression" => {
        if node.flag("optional") {
          return Err(LowerError::unsupported("optional call"));
        }
        let target = self.lower_expression(node.node("callee")?)?;
        let mut args = Vec::new();
        for arg in node.list("arguments")? {
          args.push(self.lower_expression(arg)?);
        }
        if node.typ == "NewExpression" {
          self.tree.create_new(target, &args)
        } else {
          self.tree.create_call(target, &args)
        }
      }
      "SequenceExpression" => {
        let mut values = Vec::new();
        for value in node.list("expressions")? {
          values.push(self.lower_expression(value)?);
        }
        self.tree.create_sequence(&values)
      }
      "UnaryExpression" => {
        let operator = node.str("operator")?;
        let op = unary_op(operator).ok_or_else(|| unsupported_operator(operator))?;
        let value = self.lower_expression(node.node("argument")?)?;
        self.tree.create_unary(op, value)
      }
      "UpdateExpression" => {
        let op = match (node.str("operator")?, node.flag("prefix")) {
          ("++", true) => UnaryOp::PrefixIncrement,
          ("++", false) => UnaryOp::PostfixIncrement,
          ("--", true) => UnaryOp::PrefixDecrement,
          ("--", false) => UnaryOp::PostfixDecrement,
          (operator, _) => return Err(unsupported_operator(operator)),
        };
        let value = self.lower_assign_target(node.node("argument")?)?;
        self.tree.create_unary(op, value)
      }
      "BinaryExpression" | "LogicalExpression" => {
        let operator = node.str("operator")?;
        let left = self.lower_expression(node.node("left")?)?;
        let right = self.lower_expression(node.node("right")?)?;
        if operator == "**" {
          let math = self.tree.create_identifier(self.known.math);
          let pow = self.tree.create_member(math, self.known.math_pow);
          self.tree.create_call(pow, &[left, right])
        } else {
          let op = binary_op(operator).ok_or_else(|| unsupported_operator(operator))?;
          self.tree.create_binary(op, left, right)
        }
      }
      "AssignmentExpression" => {
        let operator = node.str("operator")?;
        let op = assign_op(operator).ok_or_else(|| unsupported_operator(operator))?;
        let target = self.lower_assign_target(node.node("left")?)?;
        let value = self.lower_expression(node.node("right")?)?;
        self.tree.create_assign(op, target, value)
      }
      "TemplateLiteral" => self.lower_template(node)?,
      _ => return Err(node.unsupported()),
    };
    Ok(tree_node)
  }

  /// Targets of assignments, updates and `for-in` heads: identifiers and
  /// member accesses. Destructuring patterns are not supported.
  pub(super) fn lower_assign_target(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    match node.typ {
      "Identifier" | "MemberExpression" | "ParenthesizedExpression" => self.lower_expression(node),
      _ => Err(node.unsupported()),
    }
  }

  fn lower_member(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    if node.flag("optional") {
      return Err(LowerError::unsupported("optional member access"));
    }
    let object = node.node("object")?;
    if object.typ == "Super" {
      return Err(object.unsupported());
    }
    let value = self.lower_expression(object)?;
    let property = node.node("property")?;
    if node.flag("computed") {
      let property = self.lower_expression(property)?;
      Ok(self.tree.create_index(value, property))
    } else {
      let symbol = self.scopes.property(&mut self.tree, property.identifier_name()?);
      Ok(self.tree.create_member(value, symbol))
    }
  }

  fn lower_property(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    if node.typ != "Property" {
      return Err(node.unsupported());
    }
    match node.str("kind")? {
      "init" => {}
      "get" => return Err(LowerError::unsupported("getter")),
      "set" => return Err(LowerError::unsupported("setter")),
      _ => return Err(node.malformed("kind")),
    }
    if node.flag("method") {
      return Err(LowerError::unsupported("method"));
    }
    if node.flag("computed") {
      return Err(LowerError::unsupported("computed property key"));
    }
    let key = node.node("key")?;
    let name = match key.typ {
      "Identifier" => key.identifier_name()?.to_string(),
      "Literal" => match key.raw("value") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Number(number)) => {
          number_to_string(number.as_f64().ok_or_else(|| key.malformed("value"))?)
        }
        _ => return Err(key.malformed("value")),
      },
      _ => return Err(key.unsupported()),
    };
    let symbol = self.scopes.property(&mut self.tree, &name);
    let value = self.lower_expression(node.node("value")?)?;
    Ok(self.tree.create_property(symbol, value))
  }

  fn lower_literal(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    if let Some(regex) = node.raw("regex").filter(|regex| !regex.is_null()) {
      let pattern = regex
        .get("pattern")
        .and_then(Value::as_str)
        .ok_or_else(|| node.malformed("regex"))?;
      let flags = regex.get("flags").and_then(Value::as_str).unwrap_or("");
      return Ok(self.tree.create_regexp(format!("/{pattern}/{flags}")));
    }
    if node.raw("bigint").is_some_and(|bigint| !bigint.is_null()) {
      return Err(LowerError::unsupported("BigInt literal"));
    }
    Ok(match node.raw("value") {
      Some(Value::Bool(value)) => self.tree.create_boolean(*value),
      Some(Value::Number(number)) => {
        let value = number.as_f64().ok_or_else(|| node.malformed("value"))?;
        self.tree.create_number(value)
      }
      Some(Value::String(value)) => self.tree.create_string(value.as_str()),
      // JSON has no encoding for numbers such as `1e999`; their value is
      // serialized as `null` and only `raw` keeps the literal.
      Some(Value::Null) | None => match node.raw("raw").and_then(Value::as_str) {
        Some(raw) if raw != "null" => self.tree.create_number(string_to_number(raw)),
        _ => self.tree.create_null(),
      },
      Some(_) => return Err(node.malformed("value")),
    })
  }

  /// `` `a${b}c${d}` `` becomes `"a" + b + "c" + d + ""`. Every quasi is kept,
  /// even empty ones, so the chain always starts with a string and `+` always
  /// concatenates.
  fn lower_template(&mut self, node: EsNode<'_>) -> Result<NodeId, LowerError> {
    let quasis = node.list("quasis")?;
    let expressions = node.list("expressions")?;
    if quasis.len() != expressions.len() + 1 {
      return Err(node.malformed("quasis"));
    }
    let cooked = |quasi: EsNode<'_>| -> Result<String, LowerError> {
      quasi
        .raw("value")
        .and_then(|value| value.get("cooked"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| quasi.malformed("value"))
    };
    let mut chain = self.tree.create_string(cooked(quasis[0])?);
    for (&expression, &quasi) in expressions.iter().zip(&quasis[1..]) {
      let value = self.lower_expression(expression)?;
      chain = self.tree.create_binary(BinaryOp::Add, chain, value);
      let text = self.tree.create_string(cooked(quasi)?);
      chain = self.tree.create_binary(BinaryOp::Add, chain, text);
    }
    Ok(chain)
  }
}

#[cfg(test)]
mod tests {
  use super::super::lower;
  use super::super::SourceFile;
  use crate::emit::emit;
  use crate::emit::EmitMode;
  use crate::err::LowerError;
  use serde_json::json;
  use serde_json::Value;

  fn lower_expression_text(expression: Value) -> Result<String, LowerError> {
    let program = json!({
      "type": "Program",
      "body": [{ "type": "ExpressionStatement", "expression": expression }],
    });
    let result = lower(&[SourceFile::new("input.js", program)])?;
    Ok(emit(&result.tree, result.modules[0], EmitMode::Normal))
  }

  fn identifier(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
  }

  fn quasi(cooked: &str) -> Value {
    json!({ "type": "TemplateElement", "value": { "cooked": cooked, "raw": cooked } })
  }

  #[test]
  fn templates_become_concatenation() {
    let template = json!({
      "type": "TemplateLiteral",
      "quasis": [quasi("("), quasi(" "), quasi(")")],
      "expressions": [identifier("a"), identifier("b")],
    });
    assert_eq!(
      lower_expression_text(template).unwrap(),
      "\"(\" + a + \" \" + b + \")\";\n"
    );
  }

  #[test]
  fn exponent_becomes_math_pow() {
    let power = json!({
      "type": "BinaryExpression",
      "operator": "**",
      "left": identifier("a"),
      "right": { "type": "Literal", "value": 2, "raw": "2" },
    });
    assert_eq!(lower_expression_text(power).unwrap(), "Math.pow(a, 2);\n");
  }

  #[test]
  fn literals_keep_their_kind() {
    let array = json!({
      "type": "ArrayExpression",
      "elements": [
        { "type": "Literal", "value": null, "raw": "null" },
        { "type": "Literal", "value": null, "raw": "1e999" },
        { "type": "Literal", "value": null, "raw": "/a+/g", "regex": { "pattern": "a+", "flags": "g" } },
        { "type": "Literal", "value": "s", "raw": "'s'" },
        { "type": "Literal", "value": true, "raw": "true" },
      ],
    });
    assert_eq!(
      lower_expression_text(array).unwrap(),
      "[null, Infinity, /a+/g, \"s\", true];\n"
    );
  }

  #[test]
  fn rejects_functions_in_expressions() {
    let function = json!({
      "type": "ArrowFunctionExpression",
      "params": [],
      "body": identifier("a"),
    });
    assert_eq!(
      lower_expression_text(function).unwrap_err(),
      LowerError::unsupported("ArrowFunctionExpression")
    );
  }
}
