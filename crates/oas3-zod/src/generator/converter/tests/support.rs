use serde_json::{Value, json};

use crate::generator::{
  converter::{ConversionContext, FragmentMeta, ZodConverter},
  document::OpenApiDocument,
  options::ConversionOptions,
  resolver::SchemaResolver,
  schema::{ObjectSchema, SchemaOrRef},
};

pub(super) fn document(schemas: Value) -> OpenApiDocument {
  OpenApiDocument::from_value(json!({
    "openapi": "3.1.0",
    "info": { "title": "Test API", "version": "1.0.0" },
    "components": { "schemas": schemas }
  }))
  .expect("failed to parse test document")
}

pub(super) fn context(schemas: Value) -> ConversionContext {
  ConversionContext::new(SchemaResolver::new(&document(schemas)))
}

pub(super) fn node(value: Value) -> SchemaOrRef {
  serde_json::from_value(value).expect("failed to parse test schema")
}

pub(super) fn object(value: Value) -> ObjectSchema {
  serde_json::from_value(value).expect("failed to parse test schema")
}

/// Translates a schema that contains no references.
pub(super) fn translate(value: Value, options: &ConversionOptions) -> String {
  let mut ctx = ConversionContext::detached();
  translate_in(&mut ctx, value, options)
}

pub(super) fn translate_in(ctx: &mut ConversionContext, value: Value, options: &ConversionOptions) -> String {
  ZodConverter::new(options)
    .translate(&node(value), ctx, &FragmentMeta::default())
    .expect("translation failed")
    .to_string()
}

pub(super) fn defaults() -> ConversionOptions {
  ConversionOptions::default()
}
