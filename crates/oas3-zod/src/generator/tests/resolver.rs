use serde_json::json;

use super::support::{resolver, schema_ref};
use crate::generator::{
  document::OpenApiDocument, errors::ConversionError, resolver::SchemaResolver, schema::SchemaOrRef,
};

#[test]
fn test_component_refs_follow_declaration_order() {
  let resolver = resolver(json!({
    "Zebra": { "type": "string" },
    "Apple": { "type": "string" },
    "a/b": { "type": "string" }
  }));

  assert_eq!(
    resolver.component_refs(),
    vec![schema_ref("Zebra"), schema_ref("Apple"), schema_ref("a~1b")]
  );
}

#[test]
fn test_colliding_names_get_numeric_suffixes() {
  let mut resolver = resolver(json!({
    "pet-owner": { "type": "string" },
    "pet_owner": { "type": "integer" },
    "pet owner": { "type": "boolean" }
  }));

  assert_eq!(resolver.resolve_ref(&schema_ref("pet-owner")).normalized, "pet_owner");
  assert_eq!(resolver.resolve_ref(&schema_ref("pet_owner")).normalized, "pet_owner2");
  assert_eq!(resolver.resolve_ref(&schema_ref("pet owner")).normalized, "pet_owner3");

  let resolved = resolver.resolve_schema_name("pet_owner2").expect("identifier should be known");
  assert_eq!(resolved.name, "pet_owner");
  assert_eq!(resolved.ref_path, schema_ref("pet_owner"));
}

#[test]
fn test_identifiers_are_stable() {
  let mut resolver = resolver(json!({ "1st-Place": { "type": "string" } }));

  let first = resolver.resolve_ref(&schema_ref("1st-Place"));
  let second = resolver.resolve_ref(&schema_ref("1st-Place"));

  assert_eq!(first.normalized, "_1st_Place");
  assert_eq!(first, second);
  assert!(resolver.resolve_schema_name("Unknown").is_none());
}

#[test]
fn test_missing_slash_is_autocorrected() {
  let mut resolver = resolver(json!({ "Pet": { "type": "string" } }));

  let resolved = resolver.resolve_ref("#components/schemas/Pet");
  assert_eq!(resolved.ref_path, schema_ref("Pet"));
  assert_eq!(resolved.normalized, "Pet", "autocorrected refs share the component identifier");

  let schema = resolver.get_schema_by_ref("#components/schemas/Pet").unwrap();
  assert!(schema.as_schema().is_some_and(|schema| schema.has_type("string")));
}

#[test]
fn test_escaped_component_names() {
  let mut resolver = resolver(json!({ "a/b": { "type": "number" } }));

  let resolved = resolver.resolve_ref(&schema_ref("a~1b"));
  assert_eq!(resolved.name, "a/b");
  assert_eq!(resolved.normalized, "a_b");
  assert!(resolver.get_schema_by_ref(&schema_ref("a~1b")).is_ok());
}

#[test]
fn test_json_pointer_references() {
  let mut resolver = resolver(json!({
    "Pet": { "type": "object", "properties": { "id": { "type": "integer" } } }
  }));

  let schema = resolver
    .get_schema_by_ref("#/components/schemas/Pet/properties/id")
    .expect("pointer should resolve");
  assert!(schema.as_schema().is_some_and(|schema| schema.has_type("integer")));
  assert_eq!(resolver.resolve_ref("#/components/schemas/Pet/properties/id").normalized, "id");
}

#[test]
fn test_missing_targets() {
  let mut resolver = resolver(json!({}));
  assert_eq!(
    resolver.get_schema_by_ref(&schema_ref("Missing")),
    Err(ConversionError::SchemaNotFound(schema_ref("Missing")))
  );
  assert_eq!(
    resolver.get_schema_by_ref("#/paths/nowhere"),
    Err(ConversionError::SchemaNotFound("#/paths/nowhere".to_string()))
  );
  assert!(matches!(
    resolver.get_schema_by_ref("other.yaml#/Pet"),
    Err(ConversionError::SchemaNotFound(_))
  ));
}

#[test]
fn test_null_pointer_target_is_missing_schema() {
  let document = OpenApiDocument::from_value(json!({
    "openapi": "3.1.0",
    "info": { "title": "Nulls", "version": "1" },
    "x-placeholder": null
  }))
  .unwrap();
  let mut resolver = SchemaResolver::new(&document);

  assert_eq!(
    resolver.get_schema_by_ref("#/x-placeholder"),
    Err(ConversionError::MissingSchema)
  );
}

#[test]
fn test_component_reference_aliases() {
  let mut resolver = resolver(json!({
    "Alias": { "$ref": "#/components/schemas/Target" },
    "Target": { "type": "boolean" }
  }));

  let alias = resolver.get_schema_by_ref(&schema_ref("Alias")).unwrap();
  assert_eq!(
    *alias,
    SchemaOrRef::Ref {
      ref_path: schema_ref("Target")
    }
  );
}
