use serde_json::json;

use super::support::{context, defaults, document, node, object, translate_in};
use crate::generator::{
  converter::required::RequiredSplit,
  options::ConversionOptions,
  resolver::SchemaResolver,
  schema::SchemaOrRef,
};

#[test]
fn test_infer_separates_required_only_stubs() {
  let all_of = vec![
    node(json!({ "$ref": "#/components/schemas/User" })),
    node(json!({ "required": ["name"] })),
    node(json!({ "required": ["email"] })),
  ];

  let split = RequiredSplit::infer(&all_of);

  assert_eq!(split.members, vec![node(json!({ "$ref": "#/components/schemas/User" }))]);
  assert!(split.has_required());
  assert_eq!(split.composed.required, vec!["name", "email"]);
  assert!(split.composed.has_type("object"));
  assert_eq!(
    split.composed.property("name"),
    Some(&SchemaOrRef::from(object(json!({})))),
    "property schemas start empty until patched"
  );
}

#[test]
fn test_infer_keeps_shaped_members() {
  let all_of = vec![
    node(json!({ "type": "object", "required": ["a"], "properties": { "a": { "type": "string" } } })),
    node(json!({ "required": [] })),
  ];

  let split = RequiredSplit::infer(&all_of);

  assert_eq!(split.members.len(), 2, "an empty required list is not a stub");
  assert!(!split.has_required());
}

#[test]
fn test_patch_from_reference_overwrites_every_required_property() {
  let mut resolver = SchemaResolver::new(&document(json!({
    "User": { "type": "object", "properties": { "name": { "type": "string" } } }
  })));

  let mut split = RequiredSplit::infer(&[
    node(json!({ "$ref": "#/components/schemas/User" })),
    node(json!({ "required": ["name", "missing"] })),
  ]);
  split
    .patch_from(&node(json!({ "$ref": "#/components/schemas/User" })), &mut resolver)
    .unwrap();

  assert_eq!(split.composed.property("name"), Some(&node(json!({ "type": "string" }))));
  assert_eq!(
    split.composed.property("missing"),
    Some(&node(json!({}))),
    "absent properties fall back to an empty schema"
  );
}

#[test]
fn test_patch_from_inline_fills_declared_properties_only() {
  let mut resolver = SchemaResolver::new(&document(json!({})));

  let mut split = RequiredSplit::infer(&[node(json!({ "required": ["a", "b"] }))]);
  split
    .patch_from(
      &node(json!({ "type": "object", "properties": { "a": { "type": "integer" } } })),
      &mut resolver,
    )
    .unwrap();

  assert_eq!(split.composed.property("a"), Some(&node(json!({ "type": "integer" }))));
  assert_eq!(split.composed.property("b"), Some(&node(json!({}))));
}

#[test]
fn test_all_of_infers_required_from_referenced_member() {
  let mut ctx = context(json!({
    "user": {
      "type": "object",
      "properties": { "name": { "type": "string" }, "email": { "type": "string" } }
    },
    "userWithName": {
      "allOf": [{ "$ref": "#/components/schemas/user" }, { "required": ["name"] }]
    }
  }));
  let options = ConversionOptions::builder()
    .with_implicit_required_props(true)
    .should_export_all_schemas(true)
    .build();

  let code = translate_in(&mut ctx, json!({ "$ref": "#/components/schemas/userWithName" }), &options);

  assert_eq!(code, "userWithName");
  assert_eq!(
    ctx.get("userWithName"),
    Some("user.and(z.looseObject({ name: z.string() }))")
  );
  assert_eq!(
    ctx.get("user"),
    Some("z.looseObject({ name: z.string(), email: z.string() })")
  );
}

#[test]
fn test_all_of_with_only_stubs() {
  let mut ctx = context(json!({}));
  let code = translate_in(&mut ctx, json!({ "allOf": [{ "required": ["id"] }, { "required": ["name"] }] }), &defaults());
  assert_eq!(code, "z.looseObject({ id: z.unknown(), name: z.unknown() })");
}
