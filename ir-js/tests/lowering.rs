#[path = "common/mod.rs"]
mod common;

use common::*;
use ir_js::compile_files;
use ir_js::compile_json;
use ir_js::lower;
use ir_js::CompileError;
use ir_js::CompileOptions;
use ir_js::EmitMode;
use ir_js::LowerError;
use ir_js::SourceFile;
use serde_json::json;
use serde_json::Value;

fn lower_error(body: Vec<Value>) -> LowerError {
  lower(&[SourceFile::new("input.js", program(body))]).unwrap_err()
}

fn unoptimized(mode: EmitMode) -> CompileOptions {
  CompileOptions::new(mode).with_optimize(false)
}

#[test]
fn rejects_block_scoped_declarations() {
  for kind in ["let", "const"] {
    let mut declaration = var("x");
    declaration["kind"] = json!(kind);
    assert_eq!(
      lower_error(vec![declaration]),
      LowerError::unsupported(format!("{kind} declaration"))
    );
  }
}

#[test]
fn rejects_constructs_outside_the_subset() {
  let arrow = json!({
    "type": "ArrowFunctionExpression",
    "params": [],
    "body": id("x"),
    "expression": true,
  });
  assert_eq!(
    lower_error(vec![expr(arrow)]),
    LowerError::unsupported("ArrowFunctionExpression")
  );
  let switch = json!({ "type": "SwitchStatement", "discriminant": id("x"), "cases": [] });
  assert_eq!(
    lower_error(vec![switch]),
    LowerError::unsupported("SwitchStatement")
  );
}

#[test]
fn reports_malformed_nodes() {
  assert_eq!(
    lower_error(vec![json!({ "type": "ExpressionStatement" })]),
    LowerError::malformed("ExpressionStatement", "expression")
  );
  assert_eq!(
    lower_error(vec![break_(Some("nowhere"))]),
    LowerError::malformed("BreakStatement", "label")
  );
}

#[test]
fn labels_do_not_leak_into_functions() {
  let body = vec![label(
    "outer",
    block(vec![function("f", &[], vec![break_(Some("outer"))])]),
  )];
  assert_eq!(
    lower_error(body),
    LowerError::malformed("BreakStatement", "label")
  );
}

#[test]
fn function_scopes_shadow_globals() {
  let body = vec![
    vars(vec![("x", Some(num(1.0)))]),
    function("f", &[], vec![expr(id("x")), var("x")]),
  ];
  let files = [SourceFile::new("input.js", program(body))];
  let options = unoptimized(EmitMode::Normal).with_rename(true);
  // The hoisted local `x` is used twice and gets the first name.
  assert_eq!(
    compile_files(&files, &options).unwrap(),
    "var b = 1;\nfunction c() {\n  a;\n  var a;\n}\n"
  );
}

#[test]
fn catch_bindings_are_scoped_to_their_body() {
  let body = vec![
    var("e"),
    try_(vec![], Some(("e", vec![expr(id("e"))])), None),
    expr(id("e")),
  ];
  let files = [SourceFile::new("input.js", program(body))];
  let options = unoptimized(EmitMode::Minified).with_rename(true);
  assert_eq!(
    compile_files(&files, &options).unwrap(),
    "var a;try{}catch(b){b}a;\n"
  );
}

#[test]
fn declaration_files_provide_pinned_globals() {
  let files = [
    SourceFile::declaration("env.d.ts", program(vec![var("console")])),
    SourceFile::new(
      "main.js",
      program(vec![
        vars(vec![("message", Some(string("hi")))]),
        expr(call(member(id("console"), "log"), vec![id("message"), id("message")])),
      ]),
    ),
  ];
  let options = CompileOptions::new(EmitMode::Minified).with_rename(true);
  assert_eq!(
    compile_files(&files, &options).unwrap(),
    "console.log(\"hi\",\"hi\");\n"
  );
}

#[test]
fn keeps_directive_prologues() {
  let body = vec![
    directive("use strict"),
    directive("say \"hi\""),
    function("g", &[], vec![directive("use strict"), expr(call(id("f"), vec![]))]),
    expr(call(id("g"), vec![])),
  ];
  let files = [SourceFile::new("input.js", program(body))];
  assert_eq!(
    compile_files(&files, &CompileOptions::new(EmitMode::Normal)).unwrap(),
    concat!(
      "\"use strict\";\n",
      "'say \"hi\"';\n",
      "function g() {\n",
      "  \"use strict\";\n",
      "  f();\n",
      "}\n",
      "g();\n",
    )
  );
  assert_eq!(
    compile_files(&files, &CompileOptions::new(EmitMode::Minified)).unwrap(),
    "\"use strict\";'say \"hi\"';function g(){\"use strict\";f()}g();\n"
  );
}

#[test]
fn files_are_emitted_in_order() {
  let files = [
    SourceFile::new("a.js", program(vec![vars(vec![("shared", Some(call(id("f"), vec![])))])])),
    SourceFile::new("b.js", program(vec![expr(call(id("g"), vec![id("shared")]))])),
  ];
  assert_eq!(
    compile_files(&files, &CompileOptions::new(EmitMode::Normal)).unwrap(),
    "var shared = f();\ng(shared);\n"
  );
}

#[test]
fn compiles_json_programs_and_file_lists() {
  let single = program(vec![expr(call(id("f"), vec![binary("+", num(1.0), num(2.0))]))]);
  let bytes = serde_json::to_vec(&single).unwrap();
  assert_eq!(
    compile_json(&bytes, &CompileOptions::new(EmitMode::Minified)).unwrap(),
    "f(3);\n"
  );

  let files = json!([
    { "name": "env.d.ts", "declaration": true, "program": program(vec![var("f")]) },
    { "name": "main.js", "program": single },
  ]);
  let bytes = serde_json::to_vec(&files).unwrap();
  assert_eq!(
    compile_json(&bytes, &unoptimized(EmitMode::Normal)).unwrap(),
    "f(1 + 2);\n"
  );
}

#[test]
fn compile_json_reports_each_failure_kind() {
  let options = CompileOptions::default();
  assert!(matches!(
    compile_json(b"\xff\xfe", &options),
    Err(CompileError::InvalidUtf8(_))
  ));
  assert!(matches!(
    compile_json(b"{\"type\": ", &options),
    Err(CompileError::InvalidJson(_))
  ));
  let with = program(vec![json!({ "type": "WithStatement", "object": id("o"), "body": empty() })]);
  let bytes = serde_json::to_vec(&with).unwrap();
  match compile_json(&bytes, &options) {
    Err(CompileError::Lower(err)) => assert_eq!(err, LowerError::unsupported("WithStatement")),
    other => panic!("expected a lowering error, got {other:?}"),
  }
}
