//! Arena-backed intermediate representation.
//!
//! Every node of a compilation lives in one [`Tree`] and is addressed by a
//! [`NodeId`]. Nodes form ordered trees through parent, first/last child and
//! previous/next sibling links stored in the arena slots, so rewriting a node
//! in place ([`Tree::become_node`]) keeps its id valid for every holder.
//!
//! A node has at most one parent. Insertion asserts that the inserted node is
//! detached and removal detaches it completely; breaking either rule is a bug
//! in the caller and panics.

mod access;
mod build;
mod check;
mod kind;
mod value;

pub use kind::AssignOp;
pub use kind::BinaryOp;
pub use kind::Category;
pub use kind::Kind;
pub use kind::UnaryOp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Identity of a named entity. Two references denote the same entity iff they
/// hold the same `SymbolId`; ids are handed out in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Debug)]
pub struct Symbol {
  pub name: String,
  /// Pinned symbols keep their name: globals the program does not declare,
  /// property keys and member names.
  pub pinned: bool,
}

#[derive(Clone, Debug)]
struct Slot {
  kind: Kind,
  parent: Option<NodeId>,
  first_child: Option<NodeId>,
  last_child: Option<NodeId>,
  previous: Option<NodeId>,
  next: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Tree {
  nodes: Vec<Slot>,
  symbols: Vec<Symbol>,
}

pub struct Children<'a> {
  tree: &'a Tree,
  next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    let current = self.next?;
    self.next = self.tree.next_sibling(current);
    Some(current)
  }
}

impl Tree {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn create_symbol(&mut self, name: impl Into<String>) -> SymbolId {
    self.push_symbol(name.into(), false)
  }

  pub fn create_pinned_symbol(&mut self, name: impl Into<String>) -> SymbolId {
    self.push_symbol(name.into(), true)
  }

  fn push_symbol(&mut self, name: String, pinned: bool) -> SymbolId {
    let id = SymbolId(u32::try_from(self.symbols.len()).expect("too many symbols"));
    self.symbols.push(Symbol { name, pinned });
    id
  }

  pub fn symbol(&self, id: SymbolId) -> &Symbol {
    &self.symbols[id.index()]
  }

  pub fn symbol_name(&self, id: SymbolId) -> &str {
    &self.symbols[id.index()].name
  }

  pub fn rename_symbol(&mut self, id: SymbolId, name: impl Into<String>) {
    self.symbols[id.index()].name = name.into();
  }

  pub fn symbol_ids(&self) -> impl Iterator<Item = SymbolId> {
    (0..self.symbols.len() as u32).map(SymbolId)
  }

  /// Allocates a detached node without children.
  pub fn create(&mut self, kind: Kind) -> NodeId {
    let id = NodeId(u32::try_from(self.nodes.len()).expect("too many nodes"));
    self.nodes.push(Slot {
      kind,
      parent: None,
      first_child: None,
      last_child: None,
      previous: None,
      next: None,
    });
    id
  }

  pub fn kind(&self, id: NodeId) -> &Kind {
    &self.nodes[id.index()].kind
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].parent
  }

  pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].first_child
  }

  pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].last_child
  }

  pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].previous
  }

  pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].next
  }

  pub fn children(&self, id: NodeId) -> Children<'_> {
    Children {
      tree: self,
      next: self.first_child(id),
    }
  }

  /// Snapshot of the child list, for loops that mutate the tree.
  pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
    self.children(id).collect()
  }

  pub fn child_count(&self, id: NodeId) -> usize {
    self.children(id).count()
  }

  pub fn has_children(&self, id: NodeId) -> bool {
    self.first_child(id).is_some()
  }

  pub fn is_detached(&self, id: NodeId) -> bool {
    let slot = &self.nodes[id.index()];
    slot.parent.is_none() && slot.previous.is_none() && slot.next.is_none()
  }

  pub fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
    while let Some(parent) = self.parent(node) {
      if parent == ancestor {
        return true;
      }
      node = parent;
    }
    false
  }

  pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
    self.insert_before(parent, child, None);
  }

  /// Inserts `child` before `before`, or at the end when `before` is `None`.
  pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) {
    assert_ne!(parent, child, "cannot insert a node into itself");
    assert!(
      self.is_detached(child),
      "{} node is already attached",
      self.kind(child).name()
    );
    debug_assert!(
      !self.is_ancestor(child, parent),
      "cannot insert a node into its own subtree"
    );
    match before {
      None => {
        let last = self.last_child(parent);
        self.nodes[child.index()].previous = last;
        match last {
          Some(last) => self.nodes[last.index()].next = Some(child),
          None => self.nodes[parent.index()].first_child = Some(child),
        }
        self.nodes[parent.index()].last_child = Some(child);
      }
      Some(before) => {
        assert_eq!(
          self.parent(before),
          Some(parent),
          "insertion point is not a child of the parent"
        );
        let previous = self.previous_sibling(before);
        self.nodes[child.index()].previous = previous;
        self.nodes[child.index()].next = Some(before);
        self.nodes[before.index()].previous = Some(child);
        match previous {
          Some(previous) => self.nodes[previous.index()].next = Some(child),
          None => self.nodes[parent.index()].first_child = Some(child),
        }
      }
    }
    self.nodes[child.index()].parent = Some(parent);
  }

  /// Detaches `id` from its parent and siblings. Removing a detached node is
  /// a no-op.
  pub fn remove(&mut self, id: NodeId) -> NodeId {
    let slot = &self.nodes[id.index()];
    let (parent, previous, next) = (slot.parent, slot.previous, slot.next);
    if let Some(parent) = parent {
      match previous {
        Some(previous) => self.nodes[previous.index()].next = next,
        None => self.nodes[parent.index()].first_child = next,
      }
      match next {
        Some(next) => self.nodes[next.index()].previous = previous,
        None => self.nodes[parent.index()].last_child = previous,
      }
    }
    let slot = &mut self.nodes[id.index()];
    slot.parent = None;
    slot.previous = None;
    slot.next = None;
    id
  }

  /// Detaches and returns every child of `id`, in order.
  pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
    let children = self.child_ids(id);
    for &child in &children {
      self.remove(child);
    }
    children
  }

  pub fn remove_children(&mut self, id: NodeId) {
    self.take_children(id);
  }

  /// Moves every child of `from` to the end of `to`.
  pub fn append_children_from(&mut self, to: NodeId, from: NodeId) {
    for child in self.take_children(from) {
      self.append_child(to, child);
    }
  }

  /// Puts detached `new` where `old` is and detaches `old`.
  pub fn replace_with(&mut self, old: NodeId, new: NodeId) {
    let parent = self
      .parent(old)
      .expect("cannot replace a node without a parent");
    self.insert_before(parent, new, Some(old));
    self.remove(old);
  }

  /// Splices the children of `node` into its parent at its position and
  /// detaches `node`.
  pub fn replace_with_children(&mut self, node: NodeId) {
    let parent = self
      .parent(node)
      .expect("cannot splice a node without a parent");
    for child in self.take_children(node) {
      self.insert_before(parent, child, Some(node));
    }
    self.remove(node);
  }

  /// Turns `target` into `source` in place: `target` keeps its id and position
  /// but takes over the kind, payload and children of `source`. `source` must
  /// be detached and is left behind as an empty husk.
  pub fn become_node(&mut self, target: NodeId, source: NodeId) {
    assert_ne!(target, source, "a node cannot become itself");
    assert!(
      self.is_detached(source),
      "{} node must be detached before another node becomes it",
      self.kind(source).name()
    );
    assert!(
      !self.is_ancestor(source, target),
      "a node cannot become one of its ancestors"
    );
    self.remove_children(target);
    let kind = std::mem::replace(&mut self.nodes[source.index()].kind, Kind::Empty);
    self.nodes[target.index()].kind = kind;
    self.append_children_from(target, source);
  }

  fn become_leaf(&mut self, target: NodeId, kind: Kind) {
    self.remove_children(target);
    self.nodes[target.index()].kind = kind;
  }

  pub fn become_empty(&mut self, target: NodeId) {
    self.become_leaf(target, Kind::Empty);
  }

  pub fn become_undefined(&mut self, target: NodeId) {
    self.become_leaf(target, Kind::Undefined);
  }

  pub fn become_boolean(&mut self, target: NodeId, value: bool) {
    self.become_leaf(target, Kind::Boolean(value));
  }

  pub fn become_number(&mut self, target: NodeId, value: f64) {
    self.become_leaf(target, Kind::Number(value));
  }

  pub fn become_string(&mut self, target: NodeId, value: impl Into<String>) {
    self.become_leaf(target, Kind::String(value.into()));
  }

  /// Deep copy of the subtree rooted at `id`. The copy is detached and shares
  /// symbols with the original.
  pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
    let copy = self.create(self.kind(id).clone());
    for child in self.child_ids(id) {
      let child_copy = self.clone_subtree(child);
      self.append_child(copy, child_copy);
    }
    copy
  }
}
