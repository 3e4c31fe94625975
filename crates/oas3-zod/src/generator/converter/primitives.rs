use serde_json::Value;

use super::shape::PrimitiveType;
use crate::{generator::schema::ObjectSchema, utils::js_number};

/// String formats that have a dedicated top-level constructor.
pub(crate) const STRING_FORMATS: &[(&str, &str)] = &[
  ("email", "z.email()"),
  ("hostname", "z.url()"),
  ("uri", "z.url()"),
  ("uri-reference", "z.url()"),
  ("uuid", "z.uuid()"),
  ("date-time", "z.iso.datetime()"),
  ("date", "z.iso.date()"),
  ("time", "z.iso.time()"),
  ("duration", "z.iso.duration()"),
  ("emoji", "z.emoji()"),
  ("base64", "z.base64()"),
  ("base64url", "z.base64url()"),
  ("nanoid", "z.nanoid()"),
  ("cuid", "z.cuid()"),
  ("cuid2", "z.cuid2()"),
  ("ulid", "z.ulid()"),
  ("ipv4", "z.ipv4()"),
  ("ipv6", "z.ipv6()"),
  ("cidrv4", "z.cidrv4()"),
  ("cidrv6", "z.cidrv6()"),
];

pub(crate) const BINARY_FORMAT: &str = "binary";

pub(crate) fn base_validator(schema: &ObjectSchema, primitive: PrimitiveType) -> &'static str {
  match primitive {
    PrimitiveType::Integer if schema.format.as_deref() == Some("int64") => "z.bigint()",
    PrimitiveType::Integer => "z.int()",
    PrimitiveType::Number => "z.number()",
    PrimitiveType::Boolean => "z.boolean()",
    PrimitiveType::String => string_validator(schema.format.as_deref()),
  }
}

fn string_validator(format: Option<&str>) -> &'static str {
  let Some(format) = format else {
    return "z.string()";
  };
  if format == BINARY_FORMAT {
    return "z.instanceof(File)";
  }
  STRING_FORMATS
    .iter()
    .find(|(name, _)| *name == format)
    .map_or("z.string()", |(_, constructor)| *constructor)
}

/// Enum member rendered inside a string enum: everything but `null` is quoted.
pub(crate) fn quoted_literal(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::String(_) => value.to_string(),
    other => Value::String(bare_literal(other)).to_string(),
  }
}

/// Enum member rendered as a raw literal.
pub(crate) fn bare_literal(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Number(number) => js_number(number),
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

/// String members in the enum of a non-string type can never validate.
pub(crate) fn is_impossible_enum(values: &[Value], primitive: PrimitiveType) -> bool {
  primitive != PrimitiveType::String && values.iter().any(Value::is_string)
}

pub(crate) fn enum_validator(values: &[Value], primitive: PrimitiveType) -> String {
  if primitive == PrimitiveType::String {
    if let [value] = values {
      return format!("z.literal({})", quoted_literal(value));
    }
    let members = values.iter().map(quoted_literal).collect::<Vec<_>>().join(", ");
    return format!("z.enum([{members}])");
  }

  if is_impossible_enum(values, primitive) {
    return "z.never()".to_string();
  }

  if let [value] = values {
    return format!("z.literal({})", bare_literal(value));
  }
  let members = values
    .iter()
    .map(|value| format!("z.literal({})", bare_literal(value)))
    .collect::<Vec<_>>()
    .join(", ");
  format!("z.union([{members}])")
}
