pub mod refs;
pub mod spec;
pub mod text;

pub(crate) use refs::{autocorrect_ref, component_name, parse_schema_ref_path, schema_ref_path};
pub(crate) use text::{escape_control_characters, js_number, normalize_string, wrap_with_quotes_if_needed};
