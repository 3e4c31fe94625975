use indexmap::IndexMap;

use crate::generator::{
  errors::{ConversionError, ConversionResult},
  metrics::GenerationWarning,
  resolver::SchemaResolver,
};

/// Mutable state shared by every translation of one document.
///
/// Holds the name to expression map that doubles as cache and emission
/// record: once a name is present it is never translated again.
#[derive(Debug)]
pub(crate) struct ConversionContext {
  resolver: Option<SchemaResolver>,
  schemas: IndexMap<String, String>,
  warnings: Vec<GenerationWarning>,
}

impl ConversionContext {
  pub(crate) fn new(resolver: SchemaResolver) -> Self {
    Self {
      resolver: Some(resolver),
      schemas: IndexMap::new(),
      warnings: vec![],
    }
  }

  /// A context without a document. Translating a reference fails with
  /// [`ConversionError::MissingContext`].
  #[cfg(test)]
  pub(crate) fn detached() -> Self {
    Self {
      resolver: None,
      schemas: IndexMap::new(),
      warnings: vec![],
    }
  }

  pub(crate) fn resolver(&mut self) -> ConversionResult<&mut SchemaResolver> {
    self.resolver.as_mut().ok_or(ConversionError::MissingContext)
  }

  pub(crate) fn has_resolver(&self) -> bool {
    self.resolver.is_some()
  }

  pub(crate) fn contains(&self, name: &str) -> bool {
    self.schemas.contains_key(name)
  }

  #[cfg(test)]
  pub(crate) fn get(&self, name: &str) -> Option<&str> {
    self.schemas.get(name).map(String::as_str)
  }

  /// Records an expression unless the name already has one. Returns whether it was stored.
  pub(crate) fn insert_if_absent(&mut self, name: &str, code: String) -> bool {
    if self.schemas.contains_key(name) {
      return false;
    }
    self.schemas.insert(name.to_string(), code);
    true
  }

  #[cfg(test)]
  pub(crate) fn schemas(&self) -> &IndexMap<String, String> {
    &self.schemas
  }

  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    if !self.warnings.contains(&warning) {
      self.warnings.push(warning);
    }
  }

  #[cfg(test)]
  pub(crate) fn warnings(&self) -> &[GenerationWarning] {
    &self.warnings
  }

  pub(crate) fn into_parts(self) -> (Option<SchemaResolver>, IndexMap<String, String>, Vec<GenerationWarning>) {
    (self.resolver, self.schemas, self.warnings)
  }
}
