use crate::generator::schema::SCHEMA_REF_PREFIX;

/// Repairs the common `#components/...` typo into a JSON pointer.
pub(crate) fn autocorrect_ref(ref_path: &str) -> String {
  match ref_path.strip_prefix('#') {
    Some(rest) if !rest.starts_with('/') => format!("#/{rest}"),
    _ => ref_path.to_string(),
  }
}

/// Parses a `#/components/schemas/<name>` reference and returns the unescaped name.
///
/// Returns `None` for external references, other component kinds, and
/// pointers that descend into a schema (`#/components/schemas/A/properties/b`).
pub(crate) fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  let name = autocorrect_ref(ref_path).strip_prefix(SCHEMA_REF_PREFIX)?.to_string();
  if name.is_empty() || name.contains('/') {
    return None;
  }
  Some(unescape_pointer_segment(&name))
}

/// The last segment of a JSON pointer, used as the display name of a reference.
pub(crate) fn component_name(ref_path: &str) -> String {
  let segment = ref_path.rsplit('/').next().unwrap_or(ref_path);
  unescape_pointer_segment(segment)
}

pub(crate) fn unescape_pointer_segment(segment: &str) -> String {
  segment.replace("~1", "/").replace("~0", "~")
}

fn escape_pointer_segment(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}

/// The `#/components/schemas/<name>` reference for a component name.
pub(crate) fn schema_ref_path(name: &str) -> String {
  format!("{SCHEMA_REF_PREFIX}{}", escape_pointer_segment(name))
}
