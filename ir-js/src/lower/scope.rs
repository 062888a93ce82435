use crate::ir::SymbolId;
use crate::ir::Tree;
use ahash::HashMap;
use ahash::HashMapExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct ScopeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ScopeKind {
  /// Top level of every non-declaration file. Files share it.
  Global,
  /// Function body, holding parameters and hoisted declarations.
  Function,
  /// A catch clause, holding only its binding.
  Catch,
}

#[derive(Debug)]
struct ScopeData {
  kind: ScopeKind,
  parent: Option<ScopeId>,
  bindings: HashMap<String, SymbolId>,
}

/// ES5 scopes for one compilation plus the two pinned namespaces: globals
/// nobody declares and property names.
#[derive(Debug)]
pub(super) struct Scopes {
  scopes: Vec<ScopeData>,
  globals: HashMap<String, SymbolId>,
  properties: HashMap<String, SymbolId>,
}

impl Scopes {
  pub fn new() -> Self {
    Scopes {
      scopes: vec![ScopeData {
        kind: ScopeKind::Global,
        parent: None,
        bindings: HashMap::new(),
      }],
      globals: HashMap::new(),
      properties: HashMap::new(),
    }
  }

  pub fn global(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn kind(&self, scope: ScopeId) -> ScopeKind {
    self.scopes[scope.0].kind
  }

  pub fn push(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
    let id = ScopeId(self.scopes.len());
    self.scopes.push(ScopeData {
      kind,
      parent: Some(parent),
      bindings: HashMap::new(),
    });
    id
  }

  /// Binds `name` in `scope`. Redeclaring a name in the same scope yields
  /// the existing symbol, as `var` does.
  pub fn declare(&mut self, tree: &mut Tree, scope: ScopeId, name: &str) -> SymbolId {
    let bindings = &mut self.scopes[scope.0].bindings;
    if let Some(&symbol) = bindings.get(name) {
      return symbol;
    }
    let symbol = tree.create_symbol(name);
    bindings.insert(name.to_string(), symbol);
    symbol
  }

  /// The pinned global `name`, created on first use.
  pub fn global_symbol(&mut self, tree: &mut Tree, name: &str) -> SymbolId {
    *self
      .globals
      .entry(name.to_string())
      .or_insert_with(|| tree.create_pinned_symbol(name))
  }

  /// The pinned property name `name`, created on first use.
  pub fn property(&mut self, tree: &mut Tree, name: &str) -> SymbolId {
    *self
      .properties
      .entry(name.to_string())
      .or_insert_with(|| tree.create_pinned_symbol(name))
  }

  /// Resolves `name` from `scope` outwards, falling back to a pinned global.
  pub fn resolve(&mut self, tree: &mut Tree, scope: ScopeId, name: &str) -> SymbolId {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = &self.scopes[id.0];
      if let Some(&symbol) = data.bindings.get(name) {
        return symbol;
      }
      current = data.parent;
    }
    self.global_symbol(tree, name)
  }
}
