use serde_json::{Value, json};

use crate::generator::{
  document::OpenApiDocument, options::ConversionOptions, orchestrator::Orchestrator, resolver::SchemaResolver,
  schema::SCHEMA_REF_PREFIX,
};

pub(super) fn document(schemas: Value) -> OpenApiDocument {
  OpenApiDocument::from_value(json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "components": { "schemas": schemas }
  }))
  .expect("failed to parse test document")
}

pub(super) fn resolver(schemas: Value) -> SchemaResolver {
  SchemaResolver::new(&document(schemas))
}

pub(super) fn orchestrator(schemas: Value, options: ConversionOptions, roots: &[&str]) -> Orchestrator {
  Orchestrator::new(
    document(schemas),
    options,
    roots.iter().map(|root| (*root).to_string()).collect(),
  )
}

pub(super) fn schema_ref(name: &str) -> String {
  format!("{SCHEMA_REF_PREFIX}{name}")
}

/// `User <-> Middle` cycle plus a `Root` that only points into it.
pub(super) fn user_middle_root() -> Value {
  json!({
    "User": {
      "type": "object",
      "properties": {
        "name": { "type": "string" },
        "middle": { "$ref": "#/components/schemas/Middle" }
      }
    },
    "Middle": {
      "type": "object",
      "properties": { "user": { "$ref": "#/components/schemas/User" } }
    },
    "Root": {
      "type": "object",
      "properties": {
        "recursive": { "$ref": "#/components/schemas/User" },
        "basic": { "type": "number" }
      }
    }
  })
}

/// A `Pet` that references `Tag`.
pub(super) fn pet_and_tag() -> Value {
  json!({
    "Pet": {
      "type": "object",
      "required": ["id"],
      "properties": {
        "id": { "type": "integer" },
        "tag": { "$ref": "#/components/schemas/Tag" }
      }
    },
    "Tag": { "type": "string" }
  })
}
