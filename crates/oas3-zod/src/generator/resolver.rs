use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::{
  document::OpenApiDocument,
  errors::{ConversionError, ConversionResult},
  schema::SchemaOrRef,
};
use crate::utils::{autocorrect_ref, component_name, normalize_string, parse_schema_ref_path, schema_ref_path};

/// Canonical identity of a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedRef {
  /// The (autocorrected) reference string.
  pub ref_path: String,
  /// Last pointer segment as written in the document.
  pub name: String,
  /// Declaration identifier, unique per document.
  pub normalized: String,
}

/// Maps references to identifiers and dereferences them within one document.
///
/// Every lookup is memoized: a reference keeps the identifier it was first
/// given, and later references that normalize to the same identifier get a
/// numeric suffix.
#[derive(Debug)]
pub(crate) struct SchemaResolver {
  components: IndexMap<String, Arc<SchemaOrRef>>,
  raw: Value,
  by_ref: IndexMap<String, ResolvedRef>,
  by_name: IndexMap<String, String>,
  pointer_cache: IndexMap<String, Arc<SchemaOrRef>>,
}

impl SchemaResolver {
  pub(crate) fn new(document: &OpenApiDocument) -> Self {
    let components = document
      .schemas
      .iter()
      .map(|(name, schema)| (name.clone(), Arc::new(schema.clone())))
      .collect::<IndexMap<_, _>>();

    let mut resolver = Self {
      components,
      raw: document.raw().clone(),
      by_ref: IndexMap::new(),
      by_name: IndexMap::new(),
      pointer_cache: IndexMap::new(),
    };

    for component_ref in resolver.component_refs() {
      resolver.resolve_ref(&component_ref);
    }

    resolver
  }

  /// References to every component schema, in declaration order.
  pub(crate) fn component_refs(&self) -> Vec<String> {
    self
      .components
      .keys()
      .map(|name| schema_ref_path(name))
      .collect()
  }

  pub(crate) fn resolve_ref(&mut self, ref_path: &str) -> ResolvedRef {
    let ref_path = autocorrect_ref(ref_path);
    if let Some(resolved) = self.by_ref.get(&ref_path) {
      return resolved.clone();
    }

    let name = component_name(&ref_path);
    let base = normalize_string(&name);
    let mut normalized = base.clone();
    let mut counter = 1;
    while self.by_name.contains_key(&normalized) {
      counter += 1;
      normalized = format!("{base}{counter}");
    }

    let resolved = ResolvedRef {
      ref_path: ref_path.clone(),
      name,
      normalized: normalized.clone(),
    };
    self.by_name.insert(normalized, ref_path.clone());
    self.by_ref.insert(ref_path, resolved.clone());
    resolved
  }

  /// Inverse of [`Self::resolve_ref`] for identifiers handed out earlier.
  pub(crate) fn resolve_schema_name(&self, normalized: &str) -> Option<&ResolvedRef> {
    self
      .by_name
      .get(normalized)
      .and_then(|ref_path| self.by_ref.get(ref_path))
  }

  pub(crate) fn get_schema_by_ref(&mut self, ref_path: &str) -> ConversionResult<Arc<SchemaOrRef>> {
    let ref_path = self.resolve_ref(ref_path).ref_path;

    if let Some(name) = parse_schema_ref_path(&ref_path) {
      return self
        .components
        .get(&name)
        .cloned()
        .ok_or(ConversionError::SchemaNotFound(ref_path));
    }

    if let Some(schema) = self.pointer_cache.get(&ref_path) {
      return Ok(Arc::clone(schema));
    }

    let pointer = ref_path
      .strip_prefix('#')
      .ok_or_else(|| ConversionError::SchemaNotFound(ref_path.clone()))?;
    let value = self
      .raw
      .pointer(pointer)
      .ok_or_else(|| ConversionError::SchemaNotFound(ref_path.clone()))?;
    if value.is_null() {
      return Err(ConversionError::MissingSchema);
    }

    let schema = serde_json::from_value::<SchemaOrRef>(value.clone())
      .map(Arc::new)
      .map_err(|_| ConversionError::SchemaNotFound(ref_path.clone()))?;
    self.pointer_cache.insert(ref_path, Arc::clone(&schema));
    Ok(schema)
  }
}
