use std::{fmt::Write as _, sync::LazyLock};

use any_ascii::any_ascii;
use regex::Regex;
use serde_json::{Number, Value};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static PLAIN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z][A-Za-z0-9_]*$").unwrap());

/// Turns an arbitrary schema name into a declaration identifier.
///
/// Names starting with a digit get a `_` prefix, the rest is transliterated to
/// ASCII, trimmed, and every run of whitespace, dashes, or other non-word
/// characters becomes a single `_`.
pub(crate) fn normalize_string(input: &str) -> String {
  let prefixed = if input.starts_with(|c: char| c.is_ascii_digit()) {
    format!("_{input}")
  } else {
    input.to_string()
  };

  let ascii = any_ascii(&prefixed);
  let spaced = WHITESPACE_RE.replace_all(ascii.trim(), "_");
  let dashed = DASHES_RE.replace_all(&spaced, "_");
  NON_WORD_RE.replace_all(&dashed, "_").into_owned()
}

/// Quotes an object key unless it is a plain identifier.
pub(crate) fn wrap_with_quotes_if_needed(key: &str) -> String {
  if PLAIN_KEY_RE.is_match(key) {
    key.to_string()
  } else {
    Value::from(key).to_string()
  }
}

/// Escapes control characters and forward slashes so the text can sit inside a regex literal.
///
/// Every `/` is escaped, including one that was already escaped in the source
/// pattern, so `^\/$` becomes `^\\/$`.
pub(crate) fn escape_control_characters(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '\t' => out.push_str("\\t"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '/' => out.push_str("\\/"),
      '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
        let _ = write!(out, "\\x{:02x}", u32::from(ch));
      }
      '\u{feff}' | '\u{fffe}' | '\u{ffff}' => {
        let _ = write!(out, "\\u{:04x}", u32::from(ch));
      }
      _ => out.push(ch),
    }
  }
  out
}

/// Renders a JSON number the way a JavaScript engine prints it (`1.0` as `1`).
pub(crate) fn js_number(number: &Number) -> String {
  if let Some(int) = number.as_i64() {
    return int.to_string();
  }
  if let Some(uint) = number.as_u64() {
    return uint.to_string();
  }
  number.as_f64().map_or_else(|| number.to_string(), |float| float.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_string() {
    assert_eq!(normalize_string("Pet"), "Pet");
    assert_eq!(normalize_string("1Pet"), "_1Pet");
    assert_eq!(normalize_string("pet-store  item"), "pet_store_item");
    assert_eq!(normalize_string("Pet.Category"), "Pet_Category");
    assert_eq!(normalize_string("a---b"), "a_b");
    assert_eq!(normalize_string("  padded "), "padded");
    assert_eq!(normalize_string("Café"), "Cafe");
  }

  #[test]
  fn test_wrap_with_quotes_if_needed() {
    assert_eq!(wrap_with_quotes_if_needed("name"), "name");
    assert_eq!(wrap_with_quotes_if_needed("name_2"), "name_2");
    assert_eq!(wrap_with_quotes_if_needed("kebab-case"), "\"kebab-case\"");
    assert_eq!(wrap_with_quotes_if_needed("_private"), "\"_private\"");
    assert_eq!(wrap_with_quotes_if_needed("1st"), "\"1st\"");
    assert_eq!(wrap_with_quotes_if_needed("@odata.type"), "\"@odata.type\"");
    assert_eq!(wrap_with_quotes_if_needed("say \"hi\""), r#""say \"hi\"""#);
  }

  #[test]
  fn test_escape_control_characters() {
    assert_eq!(escape_control_characters("^/$"), "^\\/$");
    assert_eq!(escape_control_characters("^\\/$"), "^\\\\/$");
    assert_eq!(escape_control_characters("a\tb\nc\rd"), "a\\tb\\nc\\rd");
    assert_eq!(escape_control_characters("\u{1}"), "\\x01");
    assert_eq!(escape_control_characters("\u{feff}"), "\\ufeff");
    assert_eq!(escape_control_characters("[a-z]+"), "[a-z]+");
  }

  #[test]
  fn test_js_number() {
    let parse = |text: &str| serde_json::from_str::<Number>(text).unwrap();
    assert_eq!(js_number(&parse("3")), "3");
    assert_eq!(js_number(&parse("-4")), "-4");
    assert_eq!(js_number(&parse("1.0")), "1");
    assert_eq!(js_number(&parse("0.25")), "0.25");
    assert_eq!(js_number(&parse("18446744073709551615")), "18446744073709551615");
  }
}
