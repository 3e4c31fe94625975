use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::schema::SchemaOrRef;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub version: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Components {
  #[serde(default)]
  pub schemas: IndexMap<String, SchemaOrRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DocumentShape {
  #[serde(default)]
  info: Info,
  #[serde(default)]
  components: Option<Components>,
}

/// YAML happily reads `version: 1.0` as a float.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(text) => text,
    Value::Null => String::new(),
    other => other.to_string(),
  })
}

/// An OpenAPI document held both as typed components and as raw JSON.
///
/// The raw tree serves JSON-pointer references that point outside
/// `#/components/schemas`.
#[derive(Debug, Clone)]
pub(crate) struct OpenApiDocument {
  pub info: Info,
  pub schemas: IndexMap<String, SchemaOrRef>,
  raw: Value,
}

impl OpenApiDocument {
  pub(crate) fn from_value(raw: Value) -> anyhow::Result<Self> {
    let shape: DocumentShape = serde_path_to_error::deserialize(&raw)
      .map_err(|err| anyhow::anyhow!("invalid OpenAPI document at '{}': {}", err.path(), err.inner()))?;

    Ok(Self {
      info: shape.info,
      schemas: shape.components.map(|components| components.schemas).unwrap_or_default(),
      raw,
    })
  }

  pub(crate) fn raw(&self) -> &Value {
    &self.raw
  }
}
