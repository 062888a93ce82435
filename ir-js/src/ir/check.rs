use super::Category;
use super::Kind;
use super::NodeId;
use super::Tree;

impl Tree {
  /// Walks the subtree rooted at `id` and panics on the first node whose
  /// children do not fit its kind, or whose links are inconsistent.
  pub fn verify(&self, id: NodeId) {
    let children = self.child_ids(id);
    for &child in &children {
      assert_eq!(
        self.parent(child),
        Some(id),
        "{} child of {} has a stale parent link",
        self.kind(child).name(),
        self.kind(id).name()
      );
    }
    self.verify_shape(id, &children);
    for child in children {
      self.verify(child);
    }
  }

  fn verify_shape(&self, id: NodeId, children: &[NodeId]) {
    let kind = self.kind(id);
    let category = |child: NodeId| self.kind(child).category();
    let is_expression = |child: NodeId| category(child) == Category::Expression;
    let is_statement = |child: NodeId| category(child) == Category::Statement;
    let is_empty = |child: NodeId| *self.kind(child) == Kind::Empty;
    let is_block = |child: NodeId| *self.kind(child) == Kind::Block;
    let arity = |n: usize| {
      assert_eq!(
        children.len(),
        n,
        "{} node must have {n} children, found {}",
        kind.name(),
        children.len()
      );
    };
    let check = |ok: bool, what: &str| {
      assert!(ok, "{} node has an invalid {what}", kind.name());
    };
    match kind {
      Kind::Module | Kind::Block => {
        for &child in children {
          check(is_statement(child), "statement");
        }
      }
      Kind::Variables => {
        for &child in children {
          check(category(child) == Category::Variable, "declaration");
        }
      }
      Kind::Object => {
        for &child in children {
          check(category(child) == Category::Property, "member");
        }
      }
      Kind::Array | Kind::Sequence => {
        for &child in children {
          check(is_expression(child), "element");
        }
      }
      Kind::Call | Kind::New => {
        check(!children.is_empty(), "target");
        for &child in children {
          check(is_expression(child), "operand");
        }
      }
      Kind::Function(_) => {
        check(children.first().is_some_and(|&body| is_block(body)), "body");
        for &param in &children[1..] {
          check(category(param) == Category::Variable, "parameter");
        }
      }
      Kind::For => {
        arity(4);
        check(
          is_expression(children[0]) || matches!(self.kind(children[0]), Kind::Empty | Kind::Variables),
          "setup",
        );
        check(is_expression(children[1]) || is_empty(children[1]), "test");
        check(is_expression(children[2]) || is_empty(children[2]), "update");
        check(is_statement(children[3]), "body");
      }
      Kind::ForIn => {
        arity(3);
        check(
          is_expression(children[0]) || category(children[0]) == Category::Variable,
          "setup",
        );
        check(is_expression(children[1]), "value");
        check(is_statement(children[2]), "body");
      }
      Kind::If => {
        arity(3);
        check(is_expression(children[0]), "test");
        check(is_statement(children[1]), "branch");
        check(is_statement(children[2]), "else branch");
      }
      Kind::Try => {
        arity(3);
        check(is_block(children[0]), "block");
        check(
          is_empty(children[1]) || category(children[1]) == Category::Catch,
          "catch clause",
        );
        check(is_empty(children[2]) || is_block(children[2]), "finally block");
      }
      Kind::Catch(_) => {
        arity(1);
        check(is_block(children[0]), "body");
      }
      Kind::DoWhile => {
        arity(2);
        check(is_statement(children[0]), "body");
        check(is_expression(children[1]), "test");
      }
      Kind::While => {
        arity(2);
        check(is_expression(children[0]), "test");
        check(is_statement(children[1]), "body");
      }
      Kind::Label(_) => {
        arity(1);
        check(is_statement(children[0]), "body");
      }
      Kind::Expression
      | Kind::Return
      | Kind::Throw
      | Kind::Variable(_)
      | Kind::Property(_)
      | Kind::Member(_)
      | Kind::Unary(_) => {
        arity(1);
        check(is_expression(children[0]), "operand");
      }
      Kind::Index | Kind::Binary(_) | Kind::Assign(_) => {
        arity(2);
        check(children.iter().all(|&c| is_expression(c)), "operand");
      }
      Kind::Conditional => {
        arity(3);
        check(children.iter().all(|&c| is_expression(c)), "operand");
      }
      Kind::Break(_)
      | Kind::Continue(_)
      | Kind::Debugger
      | Kind::Directive(_)
      | Kind::Empty
      | Kind::Boolean(_)
      | Kind::Identifier(_)
      | Kind::Null
      | Kind::Number(_)
      | Kind::RegExp(_)
      | Kind::String(_)
      | Kind::This
      | Kind::Undefined => arity(0),
    }
  }
}
