use ir_js::{compile_json, CompileOptions, EmitMode};

/// `var greeting = "Hello, " + "world"; console.log(greeting);`
const SOURCE: &str = r#"{
  "type": "Program",
  "body": [
    {
      "type": "VariableDeclaration",
      "kind": "var",
      "declarations": [{
        "type": "VariableDeclarator",
        "id": { "type": "Identifier", "name": "greeting" },
        "init": {
          "type": "BinaryExpression",
          "operator": "+",
          "left": { "type": "Literal", "value": "Hello, ", "raw": "\"Hello, \"" },
          "right": { "type": "Literal", "value": "world", "raw": "\"world\"" }
        }
      }]
    },
    {
      "type": "ExpressionStatement",
      "expression": {
        "type": "CallExpression",
        "callee": {
          "type": "MemberExpression",
          "object": { "type": "Identifier", "name": "console" },
          "property": { "type": "Identifier", "name": "log" },
          "computed": false
        },
        "arguments": [{ "type": "Identifier", "name": "greeting" }]
      }
    }
  ]
}"#;

fn main() {
  for mode in [EmitMode::Normal, EmitMode::Minified] {
    match compile_json(SOURCE.as_bytes(), &CompileOptions::new(mode)) {
      Ok(code) => print!("{code}"),
      Err(err) => eprintln!("{err}"),
    }
  }
}
