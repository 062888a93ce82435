use crate::ir::BinaryOp;

/// Binding strength of expression contexts, loosest first. A child expression
/// is parenthesized iff the level its parent asks for is at least the child's
/// own level.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Level {
  Lowest,
  Comma,
  Assign,
  Conditional,
  LogicalOr,
  LogicalAnd,
  BitwiseOr,
  BitwiseXor,
  BitwiseAnd,
  Equal,
  Compare,
  Shift,
  Add,
  Multiply,
  Prefix,
  Postfix,
  Call,
  Member,
}

const LADDER: [Level; 18] = [
  Level::Lowest,
  Level::Comma,
  Level::Assign,
  Level::Conditional,
  Level::LogicalOr,
  Level::LogicalAnd,
  Level::BitwiseOr,
  Level::BitwiseXor,
  Level::BitwiseAnd,
  Level::Equal,
  Level::Compare,
  Level::Shift,
  Level::Add,
  Level::Multiply,
  Level::Prefix,
  Level::Postfix,
  Level::Call,
  Level::Member,
];

impl Level {
  /// The next looser level.
  pub fn looser(self) -> Level {
    LADDER[(self as usize).saturating_sub(1)]
  }

  pub fn of_binary(op: BinaryOp) -> Level {
    match op {
      BinaryOp::LogicalOr => Level::LogicalOr,
      BinaryOp::LogicalAnd => Level::LogicalAnd,
      BinaryOp::BitwiseOr => Level::BitwiseOr,
      BinaryOp::BitwiseXor => Level::BitwiseXor,
      BinaryOp::BitwiseAnd => Level::BitwiseAnd,
      BinaryOp::Equal | BinaryOp::EqualStrict | BinaryOp::NotEqual | BinaryOp::NotEqualStrict => {
        Level::Equal
      }
      BinaryOp::GreaterThan
      | BinaryOp::GreaterThanEqual
      | BinaryOp::In
      | BinaryOp::InstanceOf
      | BinaryOp::LessThan
      | BinaryOp::LessThanEqual => Level::Compare,
      BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::ShiftRightUnsigned => Level::Shift,
      BinaryOp::Add | BinaryOp::Subtract => Level::Add,
      BinaryOp::Divide | BinaryOp::Multiply | BinaryOp::Remainder => Level::Multiply,
    }
  }
}
