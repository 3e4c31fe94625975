use itertools::Itertools;

use super::orchestrator::{CodeMetadata, GeneratedOutput};

/// Renders a complete TypeScript module: header, `zod` import, type
/// declarations, one constant per schema and the `schemas` export.
pub(crate) fn render_module(metadata: &CodeMetadata, source_path: &str, output: &GeneratedOutput) -> String {
  let mut sections = vec![render_header(metadata, source_path), "import { z } from \"zod\";".to_string()];

  if !output.types.is_empty() {
    sections.push(output.types.values().join("\n\n"));
  }

  if !output.schemas.is_empty() {
    sections.push(
      output
        .schemas
        .iter()
        .map(|(name, code)| render_constant(name, code, output.emitted_types.contains(name)))
        .join("\n\n"),
    );
    sections.push(render_exports(output.schemas.keys()));
  }

  let mut module = sections.join("\n\n");
  module.push('\n');
  module
}

fn render_header(metadata: &CodeMetadata, source_path: &str) -> String {
  let description = metadata
    .description
    .as_deref()
    .map_or_else(|| "No description provided".to_string(), |text| text.lines().join("\n// "));

  format!(
    "// AUTO-GENERATED CODE - DO NOT EDIT!\n//\n// {}\n// Source: {source_path}\n// Version: {}\n// Generated by `oas3-zod`\n//\n// {description}",
    metadata.title, metadata.version
  )
}

fn render_constant(name: &str, code: &str, has_type: bool) -> String {
  if has_type {
    format!("const {name}: z.ZodType<{name}> = {code};")
  } else {
    format!("const {name} = {code};")
  }
}

fn render_exports<'a>(names: impl Iterator<Item = &'a String>) -> String {
  format!("export const schemas = {{\n{}\n}};", names.map(|name| format!("  {name},")).join("\n"))
}

#[cfg(test)]
mod tests {
  use indexmap::{IndexMap, IndexSet};

  use super::*;

  fn metadata() -> CodeMetadata {
    CodeMetadata {
      title: "Pet Store".to_string(),
      version: "1.0.0".to_string(),
      description: Some("First line\nSecond line".to_string()),
    }
  }

  #[test]
  fn test_render_header_comments_every_description_line() {
    let header = render_header(&metadata(), "petstore.yaml");
    assert!(header.starts_with("// AUTO-GENERATED CODE - DO NOT EDIT!"));
    assert!(header.contains("// Pet Store\n"));
    assert!(header.contains("// Source: petstore.yaml\n"));
    assert!(header.contains("// Version: 1.0.0\n"));
    assert!(header.ends_with("// First line\n// Second line"));
  }

  #[test]
  fn test_render_module_annotates_emitted_types() {
    let output = GeneratedOutput {
      schemas: IndexMap::from([
        ("Tag".to_string(), "z.string()".to_string()),
        (
          "Node".to_string(),
          "z.lazy(() => z.looseObject({ next: Node }).partial())".to_string(),
        ),
      ]),
      types: IndexMap::from([(
        "Node".to_string(),
        "type Node = Partial<{\n  next: Node;\n}>;".to_string(),
      )]),
      emitted_types: IndexSet::from(["Node".to_string()]),
      ..GeneratedOutput::default()
    };

    let module = render_module(&metadata(), "spec.json", &output);

    assert!(module.contains("import { z } from \"zod\";"));
    assert!(module.contains("type Node = Partial<{\n  next: Node;\n}>;"));
    assert!(module.contains("const Tag = z.string();"));
    assert!(module.contains("const Node: z.ZodType<Node> = z.lazy(() => z.looseObject({ next: Node }).partial());"));
    assert!(module.ends_with("export const schemas = {\n  Tag,\n  Node,\n};\n"));

    let type_pos = module.find("type Node").expect("type declaration rendered");
    let const_pos = module.find("const Tag").expect("constant rendered");
    assert!(type_pos < const_pos, "types should precede constants");
  }

  #[test]
  fn test_render_module_without_schemas_skips_exports() {
    let module = render_module(&metadata(), "spec.json", &GeneratedOutput::default());
    assert!(module.contains("import { z } from \"zod\";"));
    assert!(!module.contains("export const schemas"));
  }
}
