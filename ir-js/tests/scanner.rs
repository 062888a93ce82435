#[path = "common/mod.rs"]
mod common;

use common::*;
use ir_js::compile_files;
use ir_js::CompileOptions;
use ir_js::EmitMode;
use ir_js::SourceFile;
use serde_json::Value;

/// `function foo(a) { var x = 1, y = x + 2, z = 3, u; z++; return x + y + z + a + u; }`
fn foo() -> Vec<Value> {
  let sum = ["y", "z", "a", "u"]
    .into_iter()
    .fold(id("x"), |sum, name| binary("+", sum, id(name)));
  vec![function(
    "foo",
    &["a"],
    vec![
      vars(vec![
        ("x", Some(num(1.0))),
        ("y", Some(binary("+", id("x"), num(2.0)))),
        ("z", Some(num(3.0))),
        ("u", None),
      ]),
      expr(update("++", false, id("z"))),
      ret(Some(sum)),
    ],
  )]
}

#[test]
fn inlines_constant_variables() {
  assert_eq!(
    inlined(foo(), EmitMode::Normal),
    concat!(
      "function foo(a) {\n",
      "  var y = 1 + 2, z = 3;\n",
      "  z++;\n",
      "  return 1 + y + z + a + void 0;\n",
      "}\n",
    )
  );
  assert_eq!(
    inlined(foo(), EmitMode::Minified),
    "function foo(a){var y=1+2,z=3;z++;return 1+y+z+a+void 0}\n"
  );
}

#[test]
fn leaves_variables_written_elsewhere() {
  let body = vec![
    vars(vec![("a", Some(num(1.0))), ("b", Some(string("s")))]),
    expr(assign("=", id("a"), num(2.0))),
    expr(call(id("f"), vec![id("a"), id("b")])),
  ];
  assert_eq!(
    inlined(body, EmitMode::Normal),
    "var a = 1;\na = 2;\nf(a, \"s\");\n"
  );
}

#[test]
fn removes_declaration_lists_left_empty() {
  let body = vec![
    var("unused"),
    vars(vec![("n", Some(null()))]),
    expr(call(id("f"), vec![id("n"), id("n")])),
  ];
  assert_eq!(
    inlined(body, EmitMode::Normal),
    ";\n;\nf(null, null);\n"
  );
}

#[test]
fn renames_local_symbols_by_use_count() {
  let body = vec![
    vars(vec![("value", Some(call(id("f"), vec![])))]),
    expr(call(id("g"), vec![id("value"), id("value")])),
  ];
  let files = [SourceFile::new("input.js", program(body))];
  let options = CompileOptions::new(EmitMode::Minified).with_rename(true);
  assert_eq!(
    compile_files(&files, &options).unwrap(),
    "var a=f();g(a,a);\n"
  );
}
