//! Lowering of ESTree programs into the IR.
//!
//! The input is the JSON form of an ESTree `Program` as produced by any
//! ESTree-compatible front end. Only the ES5 subset the IR can express is
//! accepted; anything else is reported as [`LowerError::Unsupported`] naming
//! the construct.
//!
//! Names are resolved with ES5 rules: `var` and function declarations hoist to
//! the enclosing function (or the shared global scope at the top level of a
//! file), parameters bind in their function, and a catch clause binds its
//! parameter for its body only. A name nothing declares resolves to a pinned
//! global symbol, shared by every file. Declaration files contribute their
//! top-level bindings as pinned globals and lower to no module.

use crate::err::LowerError;
use crate::ir::NodeId;
use crate::ir::SymbolId;
use crate::ir::Tree;
use crate::opt::KnownSymbols;
use estree::EsNode;
use scope::ScopeId;
use scope::ScopeKind;
use scope::Scopes;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

mod estree;
mod expr;
mod scope;
mod stmt;

/// One input file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceFile {
  pub name: String,
  /// Declaration files only describe globals provided by the environment.
  #[serde(default)]
  pub declaration: bool,
  /// An ESTree `Program`.
  pub program: Value,
}

impl SourceFile {
  pub fn new(name: impl Into<String>, program: Value) -> Self {
    SourceFile {
      name: name.into(),
      declaration: false,
      program,
    }
  }

  pub fn declaration(name: impl Into<String>, program: Value) -> Self {
    SourceFile {
      name: name.into(),
      declaration: true,
      program,
    }
  }
}

#[derive(Debug)]
pub struct LoweringResult {
  pub known: KnownSymbols,
  pub tree: Tree,
  /// One `Module` per non-declaration file, in input order.
  pub modules: Vec<NodeId>,
}

pub fn lower(files: &[SourceFile]) -> Result<LoweringResult, LowerError> {
  let mut tree = Tree::new();
  let mut scopes = Scopes::new();
  let known = KnownSymbols {
    math: scopes.global_symbol(&mut tree, "Math"),
    math_pow: scopes.property(&mut tree, "pow"),
  };

  let mut programs = Vec::with_capacity(files.len());
  for file in files {
    let program = EsNode::new(&file.program)?;
    if program.typ != "Program" {
      return Err(program.malformed("type"));
    }
    programs.push((file, program.list("body")?));
  }

  // Every file's top-level declarations are visible to every other file.
  let mut lowerer = Lowerer {
    scope: scopes.global(),
    tree,
    scopes,
    known,
    labels: Vec::new(),
  };
  for (file, body) in &programs {
    let mut names = Vec::new();
    for &statement in body {
      collect_hoisted(statement, &mut names)?;
    }
    for name in names {
      if file.declaration {
        lowerer.scopes.global_symbol(&mut lowerer.tree, name);
      } else {
        let global = lowerer.scopes.global();
        lowerer.scopes.declare(&mut lowerer.tree, global, name);
      }
    }
  }

  let mut modules = Vec::new();
  for (file, body) in &programs {
    if file.declaration {
      continue;
    }
    let module = lowerer.tree.create_module();
    for &statement in body {
      let statement = lowerer.lower_statement(statement)?;
      lowerer.tree.append_child(module, statement);
    }
    debug!(file = %file.name, nodes = lowerer.tree.node_count(), "lowered file");
    modules.push(module);
  }

  Ok(LoweringResult {
    known: lowerer.known,
    tree: lowerer.tree,
    modules,
  })
}

/// Collects the names `var` and function declarations in `statement` bind in
/// the enclosing function, without entering nested functions.
fn collect_hoisted<'a>(statement: EsNode<'a>, names: &mut Vec<&'a str>) -> Result<(), LowerError> {
  match statement.typ {
    "VariableDeclaration" => {
      for declarator in statement.list("declarations")? {
        if let Ok(name) = declarator.node("id")?.identifier_name() {
          names.push(name);
        }
      }
    }
    "FunctionDeclaration" => names.push(statement.node("id")?.identifier_name()?),
    "BlockStatement" => {
      for child in statement.list("body")? {
        collect_hoisted(child, names)?;
      }
    }
    "IfStatement" => {
      collect_hoisted(statement.node("consequent")?, names)?;
      if let Some(alternate) = statement.optional("alternate")? {
        collect_hoisted(alternate, names)?;
      }
    }
    "ForStatement" => {
      if let Some(init) = statement.optional("init")? {
        collect_hoisted(init, names)?;
      }
      collect_hoisted(statement.node("body")?, names)?;
    }
    "ForInStatement" => {
      collect_hoisted(statement.node("left")?, names)?;
      collect_hoisted(statement.node("body")?, names)?;
    }
    "WhileStatement" | "DoWhileStatement" | "LabeledStatement" => {
      collect_hoisted(statement.node("body")?, names)?;
    }
    "TryStatement" => {
      collect_hoisted(statement.node("block")?, names)?;
      if let Some(handler) = statement.optional("handler")? {
        collect_hoisted(handler.node("body")?, names)?;
      }
      if let Some(finalizer) = statement.optional("finalizer")? {
        collect_hoisted(finalizer, names)?;
      }
    }
    _ => {}
  }
  Ok(())
}

struct Lowerer {
  tree: Tree,
  scopes: Scopes,
  known: KnownSymbols,
  scope: ScopeId,
  /// Labels enclosing the current statement within the current function.
  labels: Vec<(String, SymbolId)>,
}

impl Lowerer {
  /// Runs `f` inside a fresh scope of `kind`, restoring the current scope
  /// afterwards even when `f` fails.
  fn in_scope<T>(
    &mut self,
    kind: ScopeKind,
    f: impl FnOnce(&mut Self) -> Result<T, LowerError>,
  ) -> Result<T, LowerError> {
    let outer = self.scope;
    self.scope = self.scopes.push(kind, outer);
    let result = f(self);
    self.scope = outer;
    result
  }

  fn hoist(&mut self, statements: &[EsNode<'_>]) -> Result<(), LowerError> {
    debug_assert_eq!(self.scopes.kind(self.scope), ScopeKind::Function);
    let mut names = Vec::new();
    for &statement in statements {
      collect_hoisted(statement, &mut names)?;
    }
    for name in names {
      self.scopes.declare(&mut self.tree, self.scope, name);
    }
    Ok(())
  }

  fn resolve(&mut self, name: &str) -> SymbolId {
    self.scopes.resolve(&mut self.tree, self.scope, name)
  }

  fn declare(&mut self, name: &str) -> SymbolId {
    self.scopes.declare(&mut self.tree, self.scope, name)
  }
}

#[cfg(test)]
mod tests {
  use super::lower;
  use super::SourceFile;
  use crate::err::LowerError;
  use crate::ir::Kind;
  use serde_json::json;

  fn identifier(name: &str) -> serde_json::Value {
    json!({ "type": "Identifier", "name": name })
  }

  fn read(name: &str) -> serde_json::Value {
    json!({ "type": "ExpressionStatement", "expression": identifier(name) })
  }

  fn var(name: &str) -> serde_json::Value {
    json!({
      "type": "VariableDeclaration",
      "kind": "var",
      "declarations": [{ "type": "VariableDeclarator", "id": identifier(name), "init": null }],
    })
  }

  fn program(body: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "type": "Program", "sourceType": "script", "body": body })
  }

  #[test]
  fn files_share_top_level_bindings() {
    let files = [
      SourceFile::declaration("env.d.ts", program(vec![var("console")])),
      SourceFile::new("a.js", program(vec![var("x"), read("console")])),
      SourceFile::new("b.js", program(vec![read("x"), read("Math")])),
    ];
    let result = lower(&files).unwrap();
    assert_eq!(result.modules.len(), 2);
    let tree = &result.tree;

    let a = tree.child_ids(result.modules[0]);
    let b = tree.child_ids(result.modules[1]);
    let declared = tree.symbol_of(tree.first_child(a[0]).unwrap());
    let used = tree.symbol_of(tree.expression_value(b[0]));
    assert_eq!(declared, used);
    assert!(!tree.symbol(declared).pinned);

    let console = tree.symbol_of(tree.expression_value(a[1]));
    assert!(tree.symbol(console).pinned);
    assert_eq!(
      *tree.kind(tree.expression_value(b[1])),
      Kind::Identifier(result.known.math)
    );
  }

  #[test]
  fn rejects_programs_of_the_wrong_type() {
    let files = [SourceFile::new("a.js", json!({ "type": "Module", "body": [] }))];
    assert_eq!(
      lower(&files).unwrap_err(),
      LowerError::malformed("Module", "type")
    );
  }
}
