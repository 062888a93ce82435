//! Middle and back end of a JavaScript compiler.
//!
//! Programs arrive as ESTree JSON, are lowered into an arena IR ([`ir`]),
//! optimized by constant inlining ([`scan`]) and local rewriting ([`opt`]),
//! optionally renamed ([`rename`]), and printed back as JavaScript
//! ([`emit`]).

use ir::NodeId;
use ir::Tree;
use lower::LoweringResult;
use opt::KnownSymbols;
use scan::Scanner;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use tracing::debug_span;

pub mod emit;
pub mod err;
pub mod ir;
pub mod lower;
pub mod num;
pub mod opt;
pub mod rename;
pub mod scan;
#[cfg(test)]
mod tests;

pub use emit::emit;
pub use emit::EmitMode;
pub use err::CompileError;
pub use err::LowerError;
pub use lower::lower;
pub use lower::SourceFile;
pub use opt::mangle;

/// What [`compile_files`] does besides lowering and emitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
  pub mode: EmitMode,
  /// Inline constants and mangle. On by default.
  pub optimize: bool,
  /// Give symbols short names after optimizing. Off by default.
  ///
  /// Top-level `var` and function declarations are renamed like any other
  /// symbol, which changes the script's global names. Globals that must keep
  /// their name belong in a declaration [`SourceFile`].
  pub rename: bool,
}

impl CompileOptions {
  pub fn new(mode: EmitMode) -> Self {
    Self {
      mode,
      optimize: true,
      rename: false,
    }
  }

  pub fn with_optimize(mut self, optimize: bool) -> Self {
    self.optimize = optimize;
    self
  }

  pub fn with_rename(mut self, rename: bool) -> Self {
    self.rename = rename;
    self
  }
}

impl Default for CompileOptions {
  fn default() -> Self {
    Self::new(EmitMode::Normal)
  }
}

fn scan_modules(tree: &Tree, modules: &[NodeId]) -> Scanner {
  let mut scanner = Scanner::new();
  for &module in modules {
    scanner.scan(tree, module);
  }
  scanner
}

fn mangle_modules(tree: &mut Tree, modules: &[NodeId], known: &KnownSymbols) -> bool {
  let mut changed = false;
  for &module in modules {
    changed |= mangle(tree, module, known);
  }
  changed
}

/// Constant inlining followed by mangling, then both again when the second
/// round of inlining finds something the mangler exposed.
pub fn optimize(tree: &mut Tree, modules: &[NodeId], known: &KnownSymbols) {
  let inlined = scan_modules(tree, modules).inline_constant_variables(tree);
  let mangled = mangle_modules(tree, modules, known);
  debug!(inlined, mangled, "first optimization round");

  let inlined = scan_modules(tree, modules).inline_constant_variables(tree);
  if inlined {
    let mangled = mangle_modules(tree, modules, known);
    debug!(mangled, "second optimization round");
  }
  if cfg!(debug_assertions) {
    for &module in modules {
      tree.verify(module);
    }
  }
}

/// Lowers, optimizes and emits `files`, concatenating the output of every
/// non-declaration file in order.
///
/// # Examples
///
/// ```
/// use ir_js::{compile_files, CompileOptions, EmitMode, SourceFile};
/// use serde_json::json;
///
/// let program = json!({
///   "type": "Program",
///   "body": [{
///     "type": "ExpressionStatement",
///     "expression": {
///       "type": "CallExpression",
///       "callee": { "type": "Identifier", "name": "print" },
///       "arguments": [{
///         "type": "BinaryExpression",
///         "operator": "*",
///         "left": { "type": "Literal", "value": 6, "raw": "6" },
///         "right": { "type": "Literal", "value": 7, "raw": "7" },
///       }],
///     },
///   }],
/// });
/// let options = CompileOptions::new(EmitMode::Normal);
/// let output = compile_files(&[SourceFile::new("main.js", program)], &options).unwrap();
/// assert_eq!(output, "print(42);\n");
/// ```
pub fn compile_files(files: &[SourceFile], options: &CompileOptions) -> Result<String, CompileError> {
  let span = debug_span!("compile", files = files.len());
  let _guard = span.enter();

  let LoweringResult {
    known,
    mut tree,
    modules,
  } = lower(files)?;
  debug!(modules = modules.len(), nodes = tree.node_count(), "lowered");

  if options.optimize {
    optimize(&mut tree, &modules, &known);
  }
  if options.rename {
    let scanner = scan_modules(&tree, &modules);
    let renamed = rename::rename_symbols(&mut tree, &scanner);
    debug!(renamed, "renamed symbols");
  }

  let mut output = String::new();
  for &module in &modules {
    output.push_str(&emit(&tree, module, options.mode));
  }
  debug!(bytes = output.len(), "emitted");
  Ok(output)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
  Files(Vec<SourceFile>),
  Program(Value),
}

/// Compiles a JSON document holding either one ESTree `Program` or an array
/// of [`SourceFile`]s.
pub fn compile_json(source: &[u8], options: &CompileOptions) -> Result<String, CompileError> {
  let text = std::str::from_utf8(source).map_err(CompileError::InvalidUtf8)?;
  let files = match serde_json::from_str::<Input>(text)? {
    Input::Files(files) => files,
    Input::Program(program) => vec![SourceFile::new("<input>", program)],
  };
  compile_files(&files, options)
}
