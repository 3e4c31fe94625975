use serde_json::Value;

use super::{
  primitives::{BINARY_FORMAT, bare_literal, is_impossible_enum, quoted_literal},
  required::RequiredSplit,
  shape::{PrimitiveType, SchemaShape},
};
use crate::{
  generator::{
    errors::{ConversionError, ConversionResult},
    options::ConversionOptions,
    resolver::SchemaResolver,
    schema::{ObjectSchema, SchemaOrRef, SchemaTypeSet},
  },
  utils::wrap_with_quotes_if_needed,
};

const INDENT: &str = "  ";

/// A rendered type expression, remembering whether it is a bare union.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TsType {
  text: String,
  is_union: bool,
}

impl TsType {
  fn plain(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_union: false,
    }
  }

  fn union(members: Vec<TsType>) -> Self {
    if members.len() == 1 {
      return members.into_iter().next().unwrap_or_else(|| Self::plain("never"));
    }
    if members.is_empty() {
      return Self::plain("never");
    }
    Self {
      text: members.iter().map(TsType::grouped).collect::<Vec<_>>().join(" | "),
      is_union: true,
    }
  }

  /// Text safe to use as an operand of `&` or `|`.
  fn grouped(&self) -> String {
    if self.is_union {
      format!("({})", self.text)
    } else {
      self.text.clone()
    }
  }

  fn nullable(self) -> Self {
    Self {
      text: format!("{} | null", self.text),
      is_union: true,
    }
  }
}

/// Walks a schema the same way as the validator translator but emits static
/// TypeScript types, so a validator can be annotated with `z.ZodType<T>`.
pub(crate) struct TypeScriptConverter<'a> {
  options: &'a ConversionOptions,
}

impl<'a> TypeScriptConverter<'a> {
  pub(crate) fn new(options: &'a ConversionOptions) -> Self {
    Self { options }
  }

  /// Renders `type Name = ...;`.
  pub(crate) fn declaration(
    &self,
    name: &str,
    schema: &SchemaOrRef,
    resolver: &mut SchemaResolver,
  ) -> ConversionResult<String> {
    let ty = self.type_of(schema, resolver, 0)?;
    Ok(format!("type {name} = {};", ty.text))
  }

  fn type_of(&self, node: &SchemaOrRef, resolver: &mut SchemaResolver, depth: usize) -> ConversionResult<TsType> {
    let ty = match SchemaShape::classify(node) {
      SchemaShape::Reference(ref_path) => return Ok(TsType::plain(resolver.resolve_ref(ref_path).normalized)),
      SchemaShape::TypeList(schema, types) => {
        let members = types
          .iter()
          .map(|ty| self.type_of(&type_list_member(schema, ty), resolver, depth))
          .collect::<ConversionResult<Vec<_>>>()?;
        TsType::union(members)
      }
      SchemaShape::Null => return Ok(TsType::plain("null")),
      SchemaShape::OneOf(schema) => self.union_of(&schema.one_of, resolver, depth)?,
      SchemaShape::AnyOf(members) => self.union_of(members, resolver, depth)?,
      SchemaShape::AllOf(schema) => self.intersection_of(schema, resolver, depth)?,
      SchemaShape::Primitive(schema, primitive) => primitive_type(schema, primitive),
      SchemaShape::Array(schema) => self.array_type(schema, resolver, depth)?,
      SchemaShape::Object(schema) => self.object_type(schema, resolver, depth)?,
      SchemaShape::Unknown => TsType::plain("unknown"),
      SchemaShape::Unsupported(schema_type) => {
        return Err(ConversionError::UnsupportedSchemaType(schema_type.to_lowercase()));
      }
    };

    let nullable = node
      .as_schema()
      .is_some_and(|schema| schema.nullable && !has_null_member(schema));
    Ok(if nullable { ty.nullable() } else { ty })
  }

  fn union_of(&self, members: &[SchemaOrRef], resolver: &mut SchemaResolver, depth: usize) -> ConversionResult<TsType> {
    let members = members
      .iter()
      .map(|member| self.type_of(member, resolver, depth))
      .collect::<ConversionResult<Vec<_>>>()?;
    Ok(TsType::union(members))
  }

  fn intersection_of(
    &self,
    schema: &ObjectSchema,
    resolver: &mut SchemaResolver,
    depth: usize,
  ) -> ConversionResult<TsType> {
    if let [single] = schema.all_of.as_slice() {
      return self.type_of(single, resolver, depth);
    }

    let mut split = RequiredSplit::infer(&schema.all_of);
    let mut parts = Vec::new();
    for member in split.members.clone() {
      parts.push(self.type_of(&member, resolver, depth)?);
      split.patch_from(&member, resolver)?;
    }
    if split.has_required() {
      let composed = SchemaOrRef::from(split.composed);
      parts.push(self.type_of(&composed, resolver, depth)?);
    }

    Ok(match parts.as_slice() {
      [] => TsType::plain("unknown"),
      [single] => single.clone(),
      _ => TsType::plain(parts.iter().map(TsType::grouped).collect::<Vec<_>>().join(" & ")),
    })
  }

  fn array_type(&self, schema: &ObjectSchema, resolver: &mut SchemaResolver, depth: usize) -> ConversionResult<TsType> {
    let item = match schema.items.as_deref() {
      Some(items) => self.type_of(items, resolver, depth)?.text,
      None => "any".to_string(),
    };
    let wrapper = if self.options.all_readonly { "ReadonlyArray" } else { "Array" };
    Ok(TsType::plain(format!("{wrapper}<{item}>")))
  }

  fn object_type(&self, schema: &ObjectSchema, resolver: &mut SchemaResolver, depth: usize) -> ConversionResult<TsType> {
    if let Some(value) = schema.additional_properties.as_ref().and_then(|ap| ap.value_schema()) {
      let value = self.type_of(value, resolver, depth)?;
      return Ok(TsType::plain(format!("Record<string, {}>", value.text)));
    }

    // Only the `required` array makes a type property required.
    let is_partial = schema.required.is_empty();

    let properties = schema.properties.iter().flatten().collect::<Vec<_>>();
    let body = if properties.is_empty() {
      "{}".to_string()
    } else {
      let field_indent = INDENT.repeat(depth + 1);
      let mut lines = vec!["{".to_string()];
      for (name, property) in properties {
        let is_required = is_partial || schema.required.contains(name);
        let ty = self.type_of(property, resolver, depth + 1)?;
        let key = wrap_with_quotes_if_needed(name);
        if is_required {
          lines.push(format!("{field_indent}{key}: {};", ty.text));
        } else {
          lines.push(format!("{field_indent}{key}?: {} | undefined;", ty.text));
        }
      }
      lines.push(format!("{}}}", INDENT.repeat(depth)));
      lines.join("\n")
    };

    let body = if is_partial { format!("Partial<{body}>") } else { body };
    let body = if self.options.all_readonly { format!("Readonly<{body}>") } else { body };
    Ok(TsType::plain(body))
  }
}

fn primitive_type(schema: &ObjectSchema, primitive: PrimitiveType) -> TsType {
  if let Some(values) = &schema.enum_values {
    return enum_type(values, primitive);
  }

  TsType::plain(match primitive {
    PrimitiveType::String if schema.format.as_deref() == Some(BINARY_FORMAT) => "File",
    PrimitiveType::String => "string",
    PrimitiveType::Integer if schema.format.as_deref() == Some("int64") => "bigint",
    PrimitiveType::Integer | PrimitiveType::Number => "number",
    PrimitiveType::Boolean => "boolean",
  })
}

fn enum_type(values: &[Value], primitive: PrimitiveType) -> TsType {
  if is_impossible_enum(values, primitive) {
    return TsType::plain("never");
  }

  let literal = if primitive == PrimitiveType::String { quoted_literal } else { bare_literal };
  TsType::union(values.iter().map(|value| TsType::plain(literal(value))).collect())
}

/// One member of a type list. Nullability belongs to the list as a whole.
fn type_list_member(schema: &ObjectSchema, schema_type: &str) -> SchemaOrRef {
  ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(schema_type.to_string())),
    nullable: false,
    ..schema.clone()
  }
  .into()
}

/// Whether the rendered type already has a `null` member.
fn has_null_member(schema: &ObjectSchema) -> bool {
  let null_enum = schema.enum_values.as_ref().is_some_and(|values| values.contains(&Value::Null));
  let null_type = match &schema.schema_type {
    Some(SchemaTypeSet::Multiple(types)) => types.iter().any(|ty| ty.eq_ignore_ascii_case("null")),
    _ => false,
  };
  null_enum || null_type
}
