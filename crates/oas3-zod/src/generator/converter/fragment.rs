use std::fmt;

use super::complexity::schema_complexity;
use crate::generator::schema::SchemaOrRef;

/// One hop of the reference chain that led to a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RefFrame {
  pub name: String,
  pub ref_path: String,
}

/// Metadata handed from a parent translation to its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FragmentMeta {
  /// References traversed to reach this node, outermost first.
  pub referenced_by: Vec<RefFrame>,
  pub is_required: Option<bool>,
  /// Property name when the node is an object property.
  pub name: Option<String>,
}

impl FragmentMeta {
  pub(crate) fn is_required(&self) -> bool {
    self.is_required.unwrap_or(false)
  }

  /// Metadata for a nested node: the reference chain carries over, nothing else does.
  pub(crate) fn child(&self) -> Self {
    Self {
      referenced_by: self.referenced_by.clone(),
      ..Self::default()
    }
  }

  pub(crate) fn property(&self, name: &str, is_required: bool) -> Self {
    Self {
      referenced_by: self.referenced_by.clone(),
      is_required: Some(is_required),
      name: Some(name.to_string()),
    }
  }

  /// Names along the chain, excluding the last hop.
  pub(crate) fn refs_path(&self) -> Vec<&str> {
    let len = self.referenced_by.len().saturating_sub(1);
    self.referenced_by[..len].iter().map(|frame| frame.name.as_str()).collect()
  }

  /// The closest enclosing named schema, if any.
  pub(crate) fn owner(&self) -> Option<&str> {
    self.referenced_by.last().map(|frame| frame.name.as_str())
  }
}

/// Output of translating one schema node.
///
/// The expression is assigned once; a reference node's expression is the
/// bare identifier of its target.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CodeFragment {
  schema: SchemaOrRef,
  meta: FragmentMeta,
  code: String,
}

impl CodeFragment {
  pub(crate) fn new(schema: SchemaOrRef, inherited: &FragmentMeta, frame: Option<RefFrame>) -> Self {
    let mut meta = inherited.clone();
    if let Some(frame) = frame {
      meta.referenced_by.push(frame);
    }
    Self {
      schema,
      meta,
      code: String::new(),
    }
  }

  #[must_use]
  pub(crate) fn assign(mut self, code: impl Into<String>) -> Self {
    debug_assert!(self.code.is_empty(), "fragment expression assigned twice");
    self.code = code.into();
    self
  }

  pub(crate) fn meta(&self) -> &FragmentMeta {
    &self.meta
  }

  pub(crate) fn complexity(&self) -> i64 {
    schema_complexity(&self.schema)
  }

  /// Whether the fragment is complex enough to deserve its own declaration.
  ///
  /// A negative threshold keeps everything inline.
  pub(crate) fn exceeds_complexity(&self, threshold: i64) -> bool {
    threshold >= 0 && self.complexity() >= threshold
  }
}

impl fmt::Display for CodeFragment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.code)
  }
}
