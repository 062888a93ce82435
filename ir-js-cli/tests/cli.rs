use assert_cmd::Command;
use serde_json::json;
use serde_json::Value;
use std::time::Duration;

fn ir_js_cli() -> Command {
  Command::new(env!("CARGO_BIN_EXE_ir-js"))
}

/// `var answer = 6 * 7; print(answer);`
fn program() -> Value {
  let product = json!({
    "type": "BinaryExpression",
    "operator": "*",
    "left": { "type": "Literal", "value": 6, "raw": "6" },
    "right": { "type": "Literal", "value": 7, "raw": "7" },
  });
  json!({
    "type": "Program",
    "body": [
      {
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{
          "type": "VariableDeclarator",
          "id": { "type": "Identifier", "name": "answer" },
          "init": product,
        }],
      },
      {
        "type": "ExpressionStatement",
        "expression": {
          "type": "CallExpression",
          "callee": { "type": "Identifier", "name": "print" },
          "arguments": [{ "type": "Identifier", "name": "answer" }],
        },
      },
    ],
  })
}

fn stdout_of(args: &[&str], input: &Value) -> String {
  let assert = ir_js_cli()
    .timeout(Duration::from_secs(5))
    .args(args)
    .write_stdin(serde_json::to_vec(input).unwrap())
    .assert()
    .success()
    .code(0);
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );
  String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn optimizes_by_default() {
  assert_eq!(stdout_of(&[], &program()), "print(42);\n");
}

#[test]
fn no_optimize_keeps_declarations() {
  assert_eq!(
    stdout_of(&["--no-optimize", "--minify"], &program()),
    "var answer=6*7;print(answer);\n"
  );
}

#[test]
fn rename_shortens_locals() {
  assert_eq!(
    stdout_of(&["--no-optimize", "--rename", "-m"], &program()),
    "var a=6*7;print(a);\n"
  );
}

#[test]
fn rename_help_warns_about_script_globals() {
  let assert = ir_js_cli().arg("--help").assert().success();
  let help = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
  assert!(help.contains("--rename"), "{help}");
  assert!(help.contains("get renamed too"), "{help}");
  assert!(help.contains("declaration file"), "{help}");
}

#[test]
fn rename_keeps_names_from_declaration_files() {
  let files = json!([
    { "name": "env.d.ts", "declaration": true, "program": {
      "type": "Program",
      "body": [{
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{
          "type": "VariableDeclarator",
          "id": { "type": "Identifier", "name": "answer" },
          "init": null,
        }],
      }],
    } },
    { "name": "main.js", "program": {
      "type": "Program",
      "body": [{
        "type": "ExpressionStatement",
        "expression": {
          "type": "AssignmentExpression",
          "operator": "=",
          "left": { "type": "Identifier", "name": "answer" },
          "right": { "type": "Literal", "value": 42, "raw": "42" },
        },
      }],
    } },
  ]);
  assert_eq!(stdout_of(&["--rename", "-m"], &files), "answer=42;
");
}

#[test]
fn accepts_file_lists() {
  let files = json!([{ "name": "main.js", "program": program() }]);
  assert_eq!(stdout_of(&["-m"], &files), "print(42);\n");
}

#[test]
fn reads_and_writes_files() {
  let dir = std::env::temp_dir().join(format!("ir-js-cli-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let input = dir.join("input.json");
  let output = dir.join("output.js");
  std::fs::write(&input, serde_json::to_vec(&program()).unwrap()).unwrap();

  ir_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(&input)
    .arg("--output")
    .arg(&output)
    .assert()
    .success();
  assert_eq!(std::fs::read_to_string(&output).unwrap(), "print(42);\n");
  std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unsupported_constructs_fail_with_a_message() {
  let input = json!({
    "type": "Program",
    "body": [{
      "type": "VariableDeclaration",
      "kind": "let",
      "declarations": [],
    }],
  });
  let assert = ir_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(serde_json::to_vec(&input).unwrap())
    .assert()
    .failure()
    .code(1);
  assert!(assert.get_output().stdout.is_empty());
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(
    stderr.contains("unsupported construct: let declaration"),
    "unexpected stderr: {stderr}"
  );
}

#[test]
fn invalid_input_fails() {
  for input in [&b"\xff"[..], b"not json"] {
    ir_js_cli()
      .timeout(Duration::from_secs(5))
      .write_stdin(input)
      .assert()
      .failure()
      .code(1);
  }
}
