use thiserror::Error;

/// Failures raised while translating a schema graph.
///
/// Any of these aborts the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ConversionError {
  #[error("Schema {0} not found")]
  SchemaNotFound(String),
  #[error("Context is required")]
  MissingContext,
  #[error("Unsupported schema type: {0}")]
  UnsupportedSchemaType(String),
  #[error("Schema is required")]
  MissingSchema,
}

pub(crate) type ConversionResult<T> = Result<T, ConversionError>;
