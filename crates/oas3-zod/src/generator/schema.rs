//! Serde model of the OpenAPI Schema Object.
//!
//! Covers both the 3.0 dialect (`nullable`, boolean `exclusiveMinimum`) and the
//! 3.1 dialect (type lists, numeric exclusive bounds). Property maps keep their
//! declaration order because emitted object shapes must follow it.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A schema node: either a `$ref` pointer or an inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum SchemaOrRef {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Schema(Box<ObjectSchema>),
}

impl SchemaOrRef {
  pub(crate) fn as_schema(&self) -> Option<&ObjectSchema> {
    match self {
      Self::Schema(schema) => Some(schema),
      Self::Ref { .. } => None,
    }
  }
}

impl From<ObjectSchema> for SchemaOrRef {
  fn from(schema: ObjectSchema) -> Self {
    Self::Schema(Box::new(schema))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum SchemaTypeSet {
  Single(String),
  Multiple(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum AdditionalProperties {
  Bool(bool),
  Schema(Box<SchemaOrRef>),
}

impl AdditionalProperties {
  /// Returns the value schema when it carries at least one keyword.
  pub(crate) fn value_schema(&self) -> Option<&SchemaOrRef> {
    match self {
      Self::Schema(schema) if !schema.is_empty_schema() => Some(schema),
      _ => None,
    }
  }

  /// Whether unknown keys are permitted. An empty schema (`{}`) allows anything.
  pub(crate) fn allows_extra_keys(&self) -> bool {
    !matches!(self, Self::Bool(false))
  }
}

/// `exclusiveMinimum`/`exclusiveMaximum` are flags in 3.0 and thresholds in 3.1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExclusiveBound {
  Flag(bool),
  Value(Number),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Discriminator {
  pub property_name: String,
  #[serde(default)]
  pub mapping: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectSchema {
  #[serde(rename = "type", default)]
  pub schema_type: Option<SchemaTypeSet>,
  #[serde(default)]
  pub one_of: Vec<SchemaOrRef>,
  #[serde(default)]
  pub any_of: Vec<SchemaOrRef>,
  #[serde(default)]
  pub all_of: Vec<SchemaOrRef>,
  #[serde(default)]
  pub properties: Option<IndexMap<String, SchemaOrRef>>,
  #[serde(default)]
  pub required: Vec<String>,
  #[serde(default)]
  pub additional_properties: Option<AdditionalProperties>,
  #[serde(default)]
  pub items: Option<Box<SchemaOrRef>>,
  #[serde(rename = "enum", default)]
  pub enum_values: Option<Vec<Value>>,
  #[serde(default)]
  pub minimum: Option<Number>,
  #[serde(default)]
  pub maximum: Option<Number>,
  #[serde(default)]
  pub exclusive_minimum: Option<ExclusiveBound>,
  #[serde(default)]
  pub exclusive_maximum: Option<ExclusiveBound>,
  #[serde(default)]
  pub multiple_of: Option<Number>,
  #[serde(default)]
  pub min_length: Option<u64>,
  #[serde(default)]
  pub max_length: Option<u64>,
  #[serde(default)]
  pub pattern: Option<String>,
  #[serde(default)]
  pub min_items: Option<u64>,
  #[serde(default)]
  pub max_items: Option<u64>,
  #[serde(default)]
  pub format: Option<String>,
  #[serde(default, deserialize_with = "deserialize_present")]
  pub default: Option<Value>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub nullable: bool,
  #[serde(default)]
  pub discriminator: Option<Discriminator>,
}

/// Keeps `default: null` distinguishable from an absent `default`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
  D: Deserializer<'de>,
{
  Value::deserialize(deserializer).map(Some)
}

impl ObjectSchema {
  pub(crate) fn with_type(mut self, schema_type: &str) -> Self {
    self.schema_type = Some(SchemaTypeSet::Single(schema_type.to_string()));
    self
  }

  /// The declared type when exactly one is given, lowercased.
  pub(crate) fn single_type(&self) -> Option<String> {
    match self.schema_type.as_ref()? {
      SchemaTypeSet::Single(ty) => Some(ty.to_lowercase()),
      SchemaTypeSet::Multiple(_) => None,
    }
  }

  pub(crate) fn has_type(&self, expected: &str) -> bool {
    self.single_type().as_deref() == Some(expected)
  }

  pub(crate) fn has_enum(&self) -> bool {
    self.enum_values.is_some()
  }

  /// `properties` present, or `additionalProperties` set to anything but `false`.
  pub(crate) fn has_object_hints(&self) -> bool {
    self.properties.is_some()
      || self
        .additional_properties
        .as_ref()
        .is_some_and(|additional| !matches!(additional, AdditionalProperties::Bool(false)))
  }

  pub(crate) fn property(&self, name: &str) -> Option<&SchemaOrRef> {
    self.properties.as_ref().and_then(|props| props.get(name))
  }
}

impl SchemaOrRef {
  pub(crate) fn is_empty_schema(&self) -> bool {
    match self {
      Self::Ref { .. } => false,
      Self::Schema(schema) => **schema == ObjectSchema::default(),
    }
  }
}
