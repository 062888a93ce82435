use super::SymbolId;

/// Operators of unary expressions. The increment and decrement forms assign
/// to their operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
  Complement,
  Delete,
  Negative,
  Not,
  Positive,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  TypeOf,
  Void,
}

impl UnaryOp {
  pub fn is_assign(self) -> bool {
    matches!(
      self,
      UnaryOp::PostfixDecrement
        | UnaryOp::PostfixIncrement
        | UnaryOp::PrefixDecrement
        | UnaryOp::PrefixIncrement
    )
  }

  pub fn is_postfix(self) -> bool {
    matches!(self, UnaryOp::PostfixDecrement | UnaryOp::PostfixIncrement)
  }

  /// Keyword operators need word boundaries around them instead of operator
  /// fusion checks.
  pub fn is_keyword(self) -> bool {
    matches!(self, UnaryOp::Delete | UnaryOp::TypeOf | UnaryOp::Void)
  }

  pub fn text(self) -> &'static str {
    match self {
      UnaryOp::Complement => "~",
      UnaryOp::Delete => "delete",
      UnaryOp::Negative => "-",
      UnaryOp::Not => "!",
      UnaryOp::Positive => "+",
      UnaryOp::PostfixDecrement | UnaryOp::PrefixDecrement => "--",
      UnaryOp::PostfixIncrement | UnaryOp::PrefixIncrement => "++",
      UnaryOp::TypeOf => "typeof",
      UnaryOp::Void => "void",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  BitwiseAnd,
  BitwiseOr,
  BitwiseXor,
  Divide,
  Equal,
  EqualStrict,
  GreaterThan,
  GreaterThanEqual,
  In,
  InstanceOf,
  LessThan,
  LessThanEqual,
  LogicalAnd,
  LogicalOr,
  Multiply,
  NotEqual,
  NotEqualStrict,
  Remainder,
  ShiftLeft,
  ShiftRight,
  ShiftRightUnsigned,
  Subtract,
}

impl BinaryOp {
  pub fn is_logical(self) -> bool {
    matches!(self, BinaryOp::LogicalAnd | BinaryOp::LogicalOr)
  }

  pub fn is_keyword(self) -> bool {
    matches!(self, BinaryOp::In | BinaryOp::InstanceOf)
  }

  pub fn text(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::BitwiseAnd => "&",
      BinaryOp::BitwiseOr => "|",
      BinaryOp::BitwiseXor => "^",
      BinaryOp::Divide => "/",
      BinaryOp::Equal => "==",
      BinaryOp::EqualStrict => "===",
      BinaryOp::GreaterThan => ">",
      BinaryOp::GreaterThanEqual => ">=",
      BinaryOp::In => "in",
      BinaryOp::InstanceOf => "instanceof",
      BinaryOp::LessThan => "<",
      BinaryOp::LessThanEqual => "<=",
      BinaryOp::LogicalAnd => "&&",
      BinaryOp::LogicalOr => "||",
      BinaryOp::Multiply => "*",
      BinaryOp::NotEqual => "!=",
      BinaryOp::NotEqualStrict => "!==",
      BinaryOp::Remainder => "%",
      BinaryOp::ShiftLeft => "<<",
      BinaryOp::ShiftRight => ">>",
      BinaryOp::ShiftRightUnsigned => ">>>",
      BinaryOp::Subtract => "-",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
  Assign,
  Add,
  BitwiseAnd,
  BitwiseOr,
  BitwiseXor,
  Divide,
  Multiply,
  Remainder,
  ShiftLeft,
  ShiftRight,
  ShiftRightUnsigned,
  Subtract,
}

impl AssignOp {
  pub fn text(self) -> &'static str {
    match self {
      AssignOp::Assign => "=",
      AssignOp::Add => "+=",
      AssignOp::BitwiseAnd => "&=",
      AssignOp::BitwiseOr => "|=",
      AssignOp::BitwiseXor => "^=",
      AssignOp::Divide => "/=",
      AssignOp::Multiply => "*=",
      AssignOp::Remainder => "%=",
      AssignOp::ShiftLeft => "<<=",
      AssignOp::ShiftRight => ">>=",
      AssignOp::ShiftRightUnsigned => ">>>=",
      AssignOp::Subtract => "-=",
    }
  }
}

/// Syntactic category of a node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
  Module,
  Property,
  Variable,
  Catch,
  Statement,
  Expression,
}

/// Node kind plus its kind-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
  Module,
  Property(SymbolId),
  Variable(SymbolId),
  Catch(SymbolId),

  Block,
  Break(Option<SymbolId>),
  Continue(Option<SymbolId>),
  Debugger,
  /// A directive prologue entry such as `"use strict"`, holding its raw
  /// text between the quotes.
  Directive(String),
  DoWhile,
  Empty,
  Expression,
  For,
  ForIn,
  Function(SymbolId),
  If,
  Label(SymbolId),
  Return,
  Throw,
  Try,
  Variables,
  While,

  Array,
  Boolean(bool),
  Call,
  Conditional,
  Identifier(SymbolId),
  Index,
  Member(SymbolId),
  New,
  Null,
  Number(f64),
  Object,
  RegExp(String),
  Sequence,
  String(String),
  This,
  Undefined,
  Unary(UnaryOp),
  Binary(BinaryOp),
  Assign(AssignOp),
}

impl Kind {
  pub fn category(&self) -> Category {
    match self {
      Kind::Module => Category::Module,
      Kind::Property(_) => Category::Property,
      Kind::Variable(_) => Category::Variable,
      Kind::Catch(_) => Category::Catch,
      Kind::Block
      | Kind::Break(_)
      | Kind::Continue(_)
      | Kind::Debugger
      | Kind::Directive(_)
      | Kind::DoWhile
      | Kind::Empty
      | Kind::Expression
      | Kind::For
      | Kind::ForIn
      | Kind::Function(_)
      | Kind::If
      | Kind::Label(_)
      | Kind::Return
      | Kind::Throw
      | Kind::Try
      | Kind::Variables
      | Kind::While => Category::Statement,
      Kind::Array
      | Kind::Boolean(_)
      | Kind::Call
      | Kind::Conditional
      | Kind::Identifier(_)
      | Kind::Index
      | Kind::Member(_)
      | Kind::New
      | Kind::Null
      | Kind::Number(_)
      | Kind::Object
      | Kind::RegExp(_)
      | Kind::Sequence
      | Kind::String(_)
      | Kind::This
      | Kind::Undefined
      | Kind::Unary(_)
      | Kind::Binary(_)
      | Kind::Assign(_) => Category::Expression,
    }
  }

  pub fn is_statement(&self) -> bool {
    self.category() == Category::Statement
  }

  pub fn is_expression(&self) -> bool {
    self.category() == Category::Expression
  }

  pub fn is_unary(&self) -> bool {
    matches!(self, Kind::Unary(_))
  }

  pub fn is_unary_assign(&self) -> bool {
    matches!(self, Kind::Unary(op) if op.is_assign())
  }

  /// Assignments count as binary: both have a left and a right operand.
  pub fn is_binary(&self) -> bool {
    matches!(self, Kind::Binary(_) | Kind::Assign(_))
  }

  pub fn is_binary_assign(&self) -> bool {
    matches!(self, Kind::Assign(_))
  }

  pub fn is_literal(&self) -> bool {
    matches!(
      self,
      Kind::Boolean(_) | Kind::Null | Kind::Number(_) | Kind::String(_) | Kind::Undefined
    )
  }

  /// Short kind name used in assertion messages and logs.
  pub fn name(&self) -> &'static str {
    match self {
      Kind::Module => "Module",
      Kind::Property(_) => "Property",
      Kind::Variable(_) => "Variable",
      Kind::Catch(_) => "Catch",
      Kind::Block => "Block",
      Kind::Break(_) => "Break",
      Kind::Continue(_) => "Continue",
      Kind::Debugger => "Debugger",
      Kind::Directive(_) => "Directive",
      Kind::DoWhile => "DoWhile",
      Kind::Empty => "Empty",
      Kind::Expression => "Expression",
      Kind::For => "For",
      Kind::ForIn => "ForIn",
      Kind::Function(_) => "Function",
      Kind::If => "If",
      Kind::Label(_) => "Label",
      Kind::Return => "Return",
      Kind::Throw => "Throw",
      Kind::Try => "Try",
      Kind::Variables => "Variables",
      Kind::While => "While",
      Kind::Array => "Array",
      Kind::Boolean(_) => "Boolean",
      Kind::Call => "Call",
      Kind::Conditional => "Conditional",
      Kind::Identifier(_) => "Identifier",
      Kind::Index => "Index",
      Kind::Member(_) => "Member",
      Kind::New => "New",
      Kind::Null => "Null",
      Kind::Number(_) => "Number",
      Kind::Object => "Object",
      Kind::RegExp(_) => "RegExp",
      Kind::Sequence => "Sequence",
      Kind::String(_) => "String",
      Kind::This => "This",
      Kind::Undefined => "Undefined",
      Kind::Unary(_) => "Unary",
      Kind::Binary(_) => "Binary",
      Kind::Assign(_) => "Assign",
    }
  }
}
