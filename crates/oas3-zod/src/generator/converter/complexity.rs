use super::shape::SchemaShape;
use crate::generator::schema::{AdditionalProperties, ObjectSchema, SchemaOrRef, SchemaTypeSet};

const REFERENCE: i64 = 2;
const ONE_OF: i64 = 2;
const ANY_OF: i64 = 3;
const ALL_OF: i64 = 2;
const ENUM: i64 = 1;
const ARRAY: i64 = 1;
const RECORD: i64 = 1;
const OBJECT: i64 = 2;
const EMPTY_OBJECT: i64 = 1;
const PRIMITIVE: i64 = 1;

/// Rough cost of a schema node, used to decide whether it is worth naming.
///
/// References are cheap since their target is already named; combinators and
/// objects add up the cost of what they contain.
pub(crate) fn schema_complexity(node: &SchemaOrRef) -> i64 {
  match SchemaShape::classify(node) {
    SchemaShape::Reference(_) => REFERENCE,
    SchemaShape::TypeList(schema, types) => {
      let per_type = types
        .iter()
        .map(|ty| schema_complexity(&with_single_type(schema, ty)))
        .sum::<i64>();
      if types.len() == 1 { per_type } else { ONE_OF + per_type }
    }
    SchemaShape::Null => PRIMITIVE,
    SchemaShape::OneOf(schema) => composite(ONE_OF, &schema.one_of),
    SchemaShape::AnyOf(members) => composite(ANY_OF, members),
    SchemaShape::AllOf(schema) => composite(ALL_OF, &schema.all_of),
    SchemaShape::Primitive(schema, _) => match &schema.enum_values {
      Some(values) => PRIMITIVE + ENUM + i64::try_from(values.len()).unwrap_or(i64::MAX),
      None => PRIMITIVE,
    },
    SchemaShape::Array(schema) => ARRAY + schema.items.as_deref().map_or(0, schema_complexity),
    SchemaShape::Object(schema) => object_complexity(schema),
    SchemaShape::Unknown | SchemaShape::Unsupported(_) => 0,
  }
}

fn composite(weight: i64, members: &[SchemaOrRef]) -> i64 {
  let inner = members.iter().map(schema_complexity).sum::<i64>();
  if members.len() == 1 { inner } else { weight + inner }
}

fn object_complexity(schema: &ObjectSchema) -> i64 {
  match &schema.additional_properties {
    Some(AdditionalProperties::Schema(value)) if !value.is_empty_schema() => return RECORD + schema_complexity(value),
    Some(AdditionalProperties::Bool(true)) if schema.properties.is_none() => return RECORD,
    _ => {}
  }

  match &schema.properties {
    Some(properties) if !properties.is_empty() => OBJECT + properties.values().map(schema_complexity).sum::<i64>(),
    _ => EMPTY_OBJECT,
  }
}

pub(crate) fn with_single_type(schema: &ObjectSchema, schema_type: &str) -> SchemaOrRef {
  ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(schema_type.to_string())),
    ..schema.clone()
  }
  .into()
}
