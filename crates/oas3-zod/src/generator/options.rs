use std::{fmt, sync::Arc};

use super::{converter::FragmentMeta, schema::SchemaOrRef};

/// Hook that may rewrite a schema node before it is translated.
///
/// Returning `None` keeps the node unchanged.
pub(crate) type SchemaRefiner = Arc<dyn Fn(&SchemaOrRef, &FragmentMeta) -> Option<SchemaOrRef> + Send + Sync>;

/// Options steering schema translation and module assembly.
#[derive(Clone, bon::Builder)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct ConversionOptions {
  /// Translate every component schema, not only the ones reached through references.
  #[builder(default)]
  pub should_export_all_schemas: bool,
  /// Emit a static type declaration for every schema instead of only circular ones.
  #[builder(default)]
  pub should_export_all_types: bool,
  /// Treat properties as required when an object has no `required` array.
  #[builder(default)]
  pub with_implicit_required_props: bool,
  #[builder(default = true)]
  pub with_default_values: bool,
  /// Accepted for compatibility; documentation comments are not emitted.
  #[builder(default)]
  pub with_docs: bool,
  #[builder(default)]
  pub with_description: bool,
  /// Schemas scoring below this stay inline. `-1` keeps everything inline.
  #[builder(default = 4)]
  pub complexity_threshold: i64,
  #[builder(default)]
  pub all_readonly: bool,
  #[builder(default)]
  pub strict_objects: bool,
  /// Whether objects without an `additionalProperties` keyword accept unknown keys.
  #[builder(default = true)]
  pub additional_properties_default_value: bool,
  /// Accepted for compatibility; only affects endpoint naming, which is not generated.
  #[builder(default)]
  pub export_all_named_schemas: bool,
  pub schema_refiner: Option<SchemaRefiner>,
}

impl Default for ConversionOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl fmt::Debug for ConversionOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConversionOptions")
      .field("should_export_all_schemas", &self.should_export_all_schemas)
      .field("should_export_all_types", &self.should_export_all_types)
      .field("with_implicit_required_props", &self.with_implicit_required_props)
      .field("with_default_values", &self.with_default_values)
      .field("with_docs", &self.with_docs)
      .field("with_description", &self.with_description)
      .field("complexity_threshold", &self.complexity_threshold)
      .field("all_readonly", &self.all_readonly)
      .field("strict_objects", &self.strict_objects)
      .field(
        "additional_properties_default_value",
        &self.additional_properties_default_value,
      )
      .field("export_all_named_schemas", &self.export_all_named_schemas)
      .field("schema_refiner", &self.schema_refiner.as_ref().map(|_| "<fn>"))
      .finish()
  }
}

impl ConversionOptions {
  pub(crate) fn refine(&self, schema: &SchemaOrRef, meta: &FragmentMeta) -> Option<SchemaOrRef> {
    self.schema_refiner.as_ref().and_then(|refiner| refiner(schema, meta))
  }
}
