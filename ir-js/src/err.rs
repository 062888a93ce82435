use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::Utf8Error;

/// Why an ESTree program could not be lowered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LowerError {
  /// Valid JavaScript outside the supported subset, named by its ESTree type
  /// or a short description such as `let declaration`.
  Unsupported { construct: String },
  /// A node missing a field its type requires, or holding the wrong shape.
  Malformed {
    construct: String,
    field: &'static str,
  },
}

impl LowerError {
  pub fn unsupported(construct: impl Into<String>) -> Self {
    LowerError::Unsupported {
      construct: construct.into(),
    }
  }

  pub fn malformed(construct: impl Into<String>, field: &'static str) -> Self {
    LowerError::Malformed {
      construct: construct.into(),
      field,
    }
  }
}

impl Display for LowerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      LowerError::Unsupported { construct } => write!(f, "unsupported construct: {construct}"),
      LowerError::Malformed { construct, field } => {
        write!(f, "malformed {construct} node: bad or missing `{field}`")
      }
    }
  }
}

impl Error for LowerError {}

#[derive(Debug)]
pub enum CompileError {
  InvalidUtf8(Utf8Error),
  InvalidJson(serde_json::Error),
  Lower(LowerError),
}

impl Display for CompileError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CompileError::InvalidUtf8(err) => write!(f, "input is not valid UTF-8: {err}"),
      CompileError::InvalidJson(err) => write!(f, "input is not a valid ESTree document: {err}"),
      CompileError::Lower(err) => err.fmt(f),
    }
  }
}

impl Error for CompileError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      CompileError::InvalidUtf8(err) => Some(err),
      CompileError::InvalidJson(err) => Some(err),
      CompileError::Lower(err) => Some(err),
    }
  }
}

impl From<LowerError> for CompileError {
  fn from(err: LowerError) -> Self {
    CompileError::Lower(err)
  }
}

impl From<serde_json::Error> for CompileError {
  fn from(err: serde_json::Error) -> Self {
    CompileError::InvalidJson(err)
  }
}
