use crate::{compile_files, CompileOptions, EmitMode, SourceFile};
use serde_json::{json, Value};

fn identifier(name: &str) -> Value {
  json!({ "type": "Identifier", "name": name })
}

fn number(value: f64) -> Value {
  json!({ "type": "Literal", "value": value, "raw": value.to_string() })
}

fn call(callee: &str, args: Vec<Value>) -> Value {
  json!({ "type": "CallExpression", "callee": identifier(callee), "arguments": args })
}

fn statement(expression: Value) -> Value {
  json!({ "type": "ExpressionStatement", "expression": expression })
}

fn var(name: &str, init: Value) -> Value {
  json!({
    "type": "VariableDeclaration",
    "kind": "var",
    "declarations": [{ "type": "VariableDeclarator", "id": identifier(name), "init": init }],
  })
}

fn program(body: Vec<Value>) -> Value {
  json!({ "type": "Program", "sourceType": "script", "body": body })
}

fn compiled(body: Vec<Value>, options: CompileOptions) -> String {
  compile_files(&[SourceFile::new("input.js", program(body))], &options).unwrap()
}

/// `var a = 1 + 2; f(a);`
fn sum_then_call() -> Vec<Value> {
  let sum = json!({ "type": "BinaryExpression", "operator": "+", "left": number(1.0), "right": number(2.0) });
  vec![var("a", sum), statement(call("f", vec![identifier("a")]))]
}

#[test]
fn test_default_options() {
  let options = CompileOptions::default();
  assert_eq!(options, CompileOptions::new(EmitMode::Normal));
  assert!(options.optimize);
  assert!(!options.rename);
}

#[test]
fn test_second_round_inlines_folded_constants() {
  assert_eq!(
    compiled(sum_then_call(), CompileOptions::new(EmitMode::Normal)),
    "f(3);\n"
  );
  assert_eq!(
    compiled(sum_then_call(), CompileOptions::new(EmitMode::Minified)),
    "f(3);\n"
  );
}

#[test]
fn test_unoptimized_output_keeps_source_shape() {
  let options = CompileOptions::new(EmitMode::Normal).with_optimize(false);
  assert_eq!(compiled(sum_then_call(), options), "var a = 1 + 2;\nf(a);\n");
}

#[test]
fn test_renaming_skips_pinned_names() {
  let body = vec![
    var("long", call("g", vec![])),
    statement(call("a", vec![identifier("long")])),
  ];
  let options = CompileOptions::new(EmitMode::Minified).with_rename(true);
  assert_eq!(compiled(body, options), "var b=g();a(b);\n");
}

#[test]
fn test_renaming_is_deterministic() {
  let body = || {
    vec![
      var("first", call("g", vec![])),
      var("second", call("g", vec![])),
      statement(call("h", vec![identifier("second"), identifier("first"), identifier("second")])),
    ]
  };
  let options = CompileOptions::new(EmitMode::Minified).with_rename(true);
  let output = compiled(body(), options);
  assert_eq!(output, "var b=g(),a=g();h(a,b,a);\n");
  assert_eq!(compiled(body(), options), output);
}

#[test]
fn test_empty_inputs_emit_nothing() {
  for mode in [EmitMode::Normal, EmitMode::Minified] {
    assert_eq!(compiled(vec![], CompileOptions::new(mode)), "");
  }
  let declaration = SourceFile::declaration("env.d.ts", program(vec![var("g", Value::Null)]));
  assert_eq!(
    compile_files(&[declaration], &CompileOptions::default()).unwrap(),
    ""
  );
}
