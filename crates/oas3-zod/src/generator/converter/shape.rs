use crate::generator::schema::{ObjectSchema, SchemaOrRef, SchemaTypeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimitiveType {
  String,
  Number,
  Integer,
  Boolean,
}

impl PrimitiveType {
  fn parse(schema_type: &str) -> Option<Self> {
    match schema_type {
      "string" => Some(Self::String),
      "number" => Some(Self::Number),
      "integer" => Some(Self::Integer),
      "boolean" => Some(Self::Boolean),
      _ => None,
    }
  }
}

/// The construct a schema node represents, decided once per node.
///
/// Variants are listed in dispatch priority: a node with both `oneOf` and
/// `type: string` is a [`SchemaShape::OneOf`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum SchemaShape<'a> {
  Reference(&'a str),
  TypeList(&'a ObjectSchema, &'a [String]),
  Null,
  OneOf(&'a ObjectSchema),
  AnyOf(&'a [SchemaOrRef]),
  AllOf(&'a ObjectSchema),
  Primitive(&'a ObjectSchema, PrimitiveType),
  Array(&'a ObjectSchema),
  Object(&'a ObjectSchema),
  Unknown,
  Unsupported(&'a str),
}

impl<'a> SchemaShape<'a> {
  pub(crate) fn classify(node: &'a SchemaOrRef) -> Self {
    let schema = match node {
      SchemaOrRef::Ref { ref_path } => return Self::Reference(ref_path),
      SchemaOrRef::Schema(schema) => schema.as_ref(),
    };

    if let Some(SchemaTypeSet::Multiple(types)) = &schema.schema_type {
      return Self::TypeList(schema, types);
    }

    let schema_type = match &schema.schema_type {
      Some(SchemaTypeSet::Single(ty)) => Some(ty.as_str()),
      _ => None,
    };

    if schema_type.is_some_and(|ty| ty.eq_ignore_ascii_case("null")) {
      return Self::Null;
    }
    if !schema.one_of.is_empty() {
      return Self::OneOf(schema);
    }
    if !schema.any_of.is_empty() {
      return Self::AnyOf(&schema.any_of);
    }
    if !schema.all_of.is_empty() {
      return Self::AllOf(schema);
    }

    let lowered = schema_type.map(str::to_lowercase);
    if let Some(primitive) = lowered.as_deref().and_then(PrimitiveType::parse) {
      return Self::Primitive(schema, primitive);
    }
    if lowered.as_deref() == Some("array") {
      return Self::Array(schema);
    }
    if lowered.as_deref() == Some("object") || schema.has_object_hints() {
      return Self::Object(schema);
    }

    match schema_type {
      None => Self::Unknown,
      Some(other) => Self::Unsupported(other),
    }
  }
}
