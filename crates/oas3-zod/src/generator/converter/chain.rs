use serde_json::Value;

use crate::{
  generator::{
    options::ConversionOptions,
    schema::{ExclusiveBound, ObjectSchema},
  },
  utils::{escape_control_characters, js_number},
};

/// Builds the method chain appended to a base validator, such as `.min(1).optional()`.
///
/// Calls appear in a fixed order: type-specific validations, `describe`,
/// presence, then `default`. A reference (`None`) only contributes presence
/// and nothing else since its keywords live on the target.
pub(crate) fn zod_chain(schema: Option<&ObjectSchema>, is_required: bool, options: &ConversionOptions) -> String {
  let mut chains = Vec::new();

  if let Some(schema) = schema {
    let validations = match schema.single_type().as_deref() {
      Some("string") => string_validations(schema),
      Some("number" | "integer") => number_validations(schema),
      Some("array") => array_validations(schema),
      _ => vec![],
    };
    chains.extend(validations);

    if options.with_description
      && let Some(description) = schema.description.as_deref().filter(|text| !text.is_empty())
    {
      chains.push(describe(description));
    }
  }

  let nullable = schema.is_some_and(|schema| schema.nullable);
  if let Some(presence) = presence(nullable, is_required) {
    chains.push(presence.to_string());
  }

  if options.with_default_values
    && let Some(schema) = schema
    && let Some(default) = &schema.default
  {
    chains.push(format!("default({})", default_literal(schema, default)));
  }

  if chains.is_empty() {
    String::new()
  } else {
    format!(".{}", chains.join("."))
  }
}

fn presence(nullable: bool, is_required: bool) -> Option<&'static str> {
  match (nullable, is_required) {
    (true, false) => Some("nullish()"),
    (true, true) => Some("nullable()"),
    (false, false) => Some("optional()"),
    (false, true) => None,
  }
}

fn describe(description: &str) -> String {
  if description.contains(['\n', '\r']) {
    format!("describe(`{}`)", description.replace('`', "\\`"))
  } else {
    let quoted = serde_json::to_string(description).unwrap_or_else(|_| format!("\"{description}\""));
    format!("describe({quoted})")
  }
}

fn default_literal(schema: &ObjectSchema, default: &Value) -> String {
  let numeric = matches!(schema.single_type().as_deref(), Some("number" | "integer"));
  match default {
    Value::Number(number) if numeric => js_number(number),
    Value::String(text) if numeric => unwrap_quotes(text).to_string(),
    other => serde_json::to_string(other).unwrap_or_else(|_| "undefined".to_string()),
  }
}

fn unwrap_quotes(text: &str) -> &str {
  text
    .strip_prefix('"')
    .and_then(|inner| inner.strip_suffix('"'))
    .unwrap_or(text)
}

fn string_validations(schema: &ObjectSchema) -> Vec<String> {
  let mut validations = Vec::new();

  if !schema.has_enum() {
    if let Some(min) = schema.min_length {
      validations.push(format!("min({min})"));
    }
    if let Some(max) = schema.max_length {
      validations.push(format!("max({max})"));
    }
  }

  if let Some(pattern) = schema.pattern.as_deref().filter(|pattern| !pattern.is_empty()) {
    validations.push(format!("regex({})", format_pattern(pattern)));
  }

  validations
}

fn number_validations(schema: &ObjectSchema) -> Vec<String> {
  if schema.has_enum() {
    return vec![];
  }

  let mut validations = Vec::new();

  match (&schema.minimum, &schema.exclusive_minimum) {
    (Some(min), Some(ExclusiveBound::Flag(true))) => validations.push(format!("gt({})", js_number(min))),
    (Some(min), _) => validations.push(format!("gte({})", js_number(min))),
    (None, Some(ExclusiveBound::Value(min))) => validations.push(format!("gt({})", js_number(min))),
    (None, _) => {}
  }

  match (&schema.maximum, &schema.exclusive_maximum) {
    (Some(max), Some(ExclusiveBound::Flag(true))) => validations.push(format!("lt({})", js_number(max))),
    (Some(max), _) => validations.push(format!("lte({})", js_number(max))),
    (None, Some(ExclusiveBound::Value(max))) => validations.push(format!("lt({})", js_number(max))),
    (None, _) => {}
  }

  if let Some(multiple) = schema.multiple_of.as_ref().filter(|n| n.as_f64() != Some(0.0)) {
    validations.push(format!("multipleOf({})", js_number(multiple)));
  }

  validations
}

fn array_validations(schema: &ObjectSchema) -> Vec<String> {
  let mut validations = Vec::new();

  if let Some(min) = schema.min_items.filter(|&n| n > 0) {
    validations.push(format!("min({min})"));
  }
  if let Some(max) = schema.max_items.filter(|&n| n > 0) {
    validations.push(format!("max({max})"));
  }

  validations
}

/// Renders a pattern as a regex literal: strips `/.../` delimiters, escapes
/// control characters and slashes, and adds the `u` flag for `\u`/`\p` escapes.
pub(crate) fn format_pattern(pattern: &str) -> String {
  let body = if pattern.starts_with('/') && pattern.ends_with('/') {
    pattern.get(1..pattern.len().saturating_sub(1)).unwrap_or_default()
  } else {
    pattern
  };

  let escaped = escape_control_characters(body);
  if escaped.contains("\\u") || escaped.contains("\\p") {
    format!("/{escaped}/u")
  } else {
    format!("/{escaped}/")
  }
}
