#![allow(dead_code)]

//! ESTree JSON builders and pipeline shortcuts shared by the integration
//! tests.

use ir_js::emit;
use ir_js::lower;
use ir_js::mangle;
use ir_js::scan::Scanner;
use ir_js::EmitMode;
use ir_js::SourceFile;
use serde_json::json;
use serde_json::Value;

pub fn id(name: &str) -> Value {
  json!({ "type": "Identifier", "name": name })
}

pub fn num(value: f64) -> Value {
  json!({ "type": "Literal", "value": value, "raw": value.to_string() })
}

pub fn string(value: &str) -> Value {
  json!({ "type": "Literal", "value": value, "raw": format!("{value:?}") })
}

pub fn boolean(value: bool) -> Value {
  json!({ "type": "Literal", "value": value, "raw": value.to_string() })
}

pub fn null() -> Value {
  json!({ "type": "Literal", "value": null, "raw": "null" })
}

pub fn regex(pattern: &str, flags: &str) -> Value {
  json!({
    "type": "Literal",
    "value": null,
    "raw": format!("/{pattern}/{flags}"),
    "regex": { "pattern": pattern, "flags": flags },
  })
}

pub fn this() -> Value {
  json!({ "type": "ThisExpression" })
}

/// `null` elements are holes.
pub fn array(elements: Vec<Value>) -> Value {
  json!({ "type": "ArrayExpression", "elements": elements })
}

pub fn object(properties: Vec<(&str, Value)>) -> Value {
  let properties: Vec<Value> = properties
    .into_iter()
    .map(|(key, value)| {
      let key = if key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        id(key)
      } else {
        string(key)
      };
      json!({
        "type": "Property",
        "kind": "init",
        "key": key,
        "value": value,
        "computed": false,
        "method": false,
        "shorthand": false,
      })
    })
    .collect();
  json!({ "type": "ObjectExpression", "properties": properties })
}

pub fn call(callee: Value, args: Vec<Value>) -> Value {
  json!({ "type": "CallExpression", "callee": callee, "arguments": args, "optional": false })
}

pub fn new(callee: Value, args: Vec<Value>) -> Value {
  json!({ "type": "NewExpression", "callee": callee, "arguments": args })
}

pub fn member(object: Value, name: &str) -> Value {
  json!({ "type": "MemberExpression", "object": object, "property": id(name), "computed": false })
}

pub fn index(object: Value, property: Value) -> Value {
  json!({ "type": "MemberExpression", "object": object, "property": property, "computed": true })
}

pub fn seq(expressions: Vec<Value>) -> Value {
  json!({ "type": "SequenceExpression", "expressions": expressions })
}

pub fn cond(test: Value, consequent: Value, alternate: Value) -> Value {
  json!({
    "type": "ConditionalExpression",
    "test": test,
    "consequent": consequent,
    "alternate": alternate,
  })
}

pub fn unary(operator: &str, argument: Value) -> Value {
  json!({ "type": "UnaryExpression", "operator": operator, "prefix": true, "argument": argument })
}

pub fn update(operator: &str, prefix: bool, argument: Value) -> Value {
  json!({ "type": "UpdateExpression", "operator": operator, "prefix": prefix, "argument": argument })
}

pub fn binary(operator: &str, left: Value, right: Value) -> Value {
  let typ = match operator {
    "&&" | "||" | "??" => "LogicalExpression",
    _ => "BinaryExpression",
  };
  json!({ "type": typ, "operator": operator, "left": left, "right": right })
}

pub fn assign(operator: &str, left: Value, right: Value) -> Value {
  json!({ "type": "AssignmentExpression", "operator": operator, "left": left, "right": right })
}

/// A template literal alternating `quasis` and `expressions`.
pub fn template(quasis: &[&str], expressions: Vec<Value>) -> Value {
  let count = quasis.len();
  let quasis: Vec<Value> = quasis
    .iter()
    .enumerate()
    .map(|(i, text)| {
      json!({
        "type": "TemplateElement",
        "value": { "cooked": text, "raw": text },
        "tail": i + 1 == count,
      })
    })
    .collect();
  json!({ "type": "TemplateLiteral", "quasis": quasis, "expressions": expressions })
}

pub fn expr(expression: Value) -> Value {
  json!({ "type": "ExpressionStatement", "expression": expression })
}

/// A directive prologue entry; `raw` is the text between the quotes.
pub fn directive(raw: &str) -> Value {
  json!({ "type": "ExpressionStatement", "expression": string(raw), "directive": raw })
}

pub fn vars(declarations: Vec<(&str, Option<Value>)>) -> Value {
  let declarations: Vec<Value> = declarations
    .into_iter()
    .map(|(name, init)| json!({ "type": "VariableDeclarator", "id": id(name), "init": init }))
    .collect();
  json!({ "type": "VariableDeclaration", "kind": "var", "declarations": declarations })
}

pub fn var(name: &str) -> Value {
  vars(vec![(name, None)])
}

pub fn block(body: Vec<Value>) -> Value {
  json!({ "type": "BlockStatement", "body": body })
}

pub fn empty() -> Value {
  json!({ "type": "EmptyStatement" })
}

pub fn debugger() -> Value {
  json!({ "type": "DebuggerStatement" })
}

pub fn if_(test: Value, consequent: Value, alternate: Option<Value>) -> Value {
  json!({ "type": "IfStatement", "test": test, "consequent": consequent, "alternate": alternate })
}

pub fn for_(init: Option<Value>, test: Option<Value>, update: Option<Value>, body: Value) -> Value {
  json!({ "type": "ForStatement", "init": init, "test": test, "update": update, "body": body })
}

pub fn for_in(left: Value, right: Value, body: Value) -> Value {
  json!({ "type": "ForInStatement", "left": left, "right": right, "body": body })
}

pub fn while_(test: Value, body: Value) -> Value {
  json!({ "type": "WhileStatement", "test": test, "body": body })
}

pub fn do_while(body: Value, test: Value) -> Value {
  json!({ "type": "DoWhileStatement", "body": body, "test": test })
}

pub fn label(name: &str, body: Value) -> Value {
  json!({ "type": "LabeledStatement", "label": id(name), "body": body })
}

pub fn break_(label: Option<&str>) -> Value {
  json!({ "type": "BreakStatement", "label": label.map(id) })
}

pub fn continue_(label: Option<&str>) -> Value {
  json!({ "type": "ContinueStatement", "label": label.map(id) })
}

pub fn ret(argument: Option<Value>) -> Value {
  json!({ "type": "ReturnStatement", "argument": argument })
}

pub fn throw(argument: Value) -> Value {
  json!({ "type": "ThrowStatement", "argument": argument })
}

/// `handler` is the catch binding and body.
pub fn try_(body: Vec<Value>, handler: Option<(&str, Vec<Value>)>, finalizer: Option<Vec<Value>>) -> Value {
  let handler = handler.map(|(param, body)| {
    json!({ "type": "CatchClause", "param": id(param), "body": block(body) })
  });
  json!({
    "type": "TryStatement",
    "block": block(body),
    "handler": handler,
    "finalizer": finalizer.map(block),
  })
}

pub fn function(name: &str, params: &[&str], body: Vec<Value>) -> Value {
  let params: Vec<Value> = params.iter().map(|param| id(param)).collect();
  json!({
    "type": "FunctionDeclaration",
    "id": id(name),
    "params": params,
    "body": block(body),
    "generator": false,
    "async": false,
  })
}

pub fn program(body: Vec<Value>) -> Value {
  json!({ "type": "Program", "sourceType": "script", "body": body })
}

fn single_file(body: Vec<Value>) -> [SourceFile; 1] {
  [SourceFile::new("input.js", program(body))]
}

/// Lowers and emits without any optimization.
pub fn emitted(body: Vec<Value>, mode: EmitMode) -> String {
  let result = lower(&single_file(body)).unwrap();
  assert_eq!(result.modules.len(), 1);
  emit(&result.tree, result.modules[0], mode)
}

/// Lowers, runs one mangle pass, and emits in normal mode.
pub fn mangled(body: Vec<Value>) -> String {
  let mut result = lower(&single_file(body)).unwrap();
  let module = result.modules[0];
  mangle(&mut result.tree, module, &result.known);
  result.tree.verify(module);
  emit(&result.tree, module, EmitMode::Normal)
}

/// Lowers, inlines constants once, and emits.
pub fn inlined(body: Vec<Value>, mode: EmitMode) -> String {
  let mut result = lower(&single_file(body)).unwrap();
  let module = result.modules[0];
  let mut scanner = Scanner::new();
  scanner.scan(&result.tree, module);
  scanner.inline_constant_variables(&mut result.tree);
  emit(&result.tree, module, mode)
}
