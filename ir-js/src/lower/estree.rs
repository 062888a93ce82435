//! Typed access to ESTree nodes held as JSON values.

use crate::err::LowerError;
use serde_json::Value;

/// One ESTree node: its `type` plus the object holding its fields.
#[derive(Clone, Copy, Debug)]
pub(super) struct EsNode<'a> {
  pub typ: &'a str,
  value: &'a Value,
}

impl<'a> EsNode<'a> {
  pub fn new(value: &'a Value) -> Result<Self, LowerError> {
    let typ = value
      .get("type")
      .and_then(Value::as_str)
      .ok_or_else(|| LowerError::malformed("node", "type"))?;
    Ok(EsNode { typ, value })
  }

  pub fn malformed(&self, field: &'static str) -> LowerError {
    LowerError::malformed(self.typ, field)
  }

  pub fn unsupported(&self) -> LowerError {
    LowerError::unsupported(self.typ)
  }

  /// A field that is absent or `null`.
  pub fn optional(&self, field: &'static str) -> Result<Option<EsNode<'a>>, LowerError> {
    match self.value.get(field) {
      None | Some(Value::Null) => Ok(None),
      Some(value) => EsNode::new(value).map(Some),
    }
  }

  pub fn node(&self, field: &'static str) -> Result<EsNode<'a>, LowerError> {
    self.optional(field)?.ok_or_else(|| self.malformed(field))
  }

  /// An array of nodes. `null` entries are kept as `None`, which is how
  /// ESTree spells array holes.
  pub fn nodes(&self, field: &'static str) -> Result<Vec<Option<EsNode<'a>>>, LowerError> {
    self
      .value
      .get(field)
      .and_then(Value::as_array)
      .ok_or_else(|| self.malformed(field))?
      .iter()
      .map(|value| match value {
        Value::Null => Ok(None),
        value => EsNode::new(value).map(Some),
      })
      .collect()
  }

  /// An array of nodes without holes.
  pub fn list(&self, field: &'static str) -> Result<Vec<EsNode<'a>>, LowerError> {
    self
      .nodes(field)?
      .into_iter()
      .map(|node| node.ok_or_else(|| self.malformed(field)))
      .collect()
  }

  pub fn str(&self, field: &'static str) -> Result<&'a str, LowerError> {
    self
      .value
      .get(field)
      .and_then(Value::as_str)
      .ok_or_else(|| self.malformed(field))
  }

  /// A string field that may be absent.
  pub fn optional_str(&self, field: &'static str) -> Option<&'a str> {
    self.value.get(field).and_then(Value::as_str)
  }

  /// A boolean flag; absent means `false`.
  pub fn flag(&self, field: &'static str) -> bool {
    self.value.get(field).and_then(Value::as_bool).unwrap_or(false)
  }

  /// The raw JSON of a field, for literal values.
  pub fn raw(&self, field: &'static str) -> Option<&'a Value> {
    self.value.get(field)
  }

  /// The name of an `Identifier` node.
  pub fn identifier_name(&self) -> Result<&'a str, LowerError> {
    match self.typ {
      "Identifier" => self.str("name"),
      _ => Err(self.unsupported()),
    }
  }
}
