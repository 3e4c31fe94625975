use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{dependency_graph::DependencyGraph, document::OpenApiDocument, resolver::SchemaResolver},
  ui::{
    Colors,
    colors::comfy,
    term_width,
  },
  utils::spec::SpecLoader,
};

/// One row of the schema listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SchemaSummary {
  name: String,
  identifier: String,
  dependencies: Vec<String>,
  circular: bool,
}

fn summarize(document: &OpenApiDocument) -> Vec<SchemaSummary> {
  let mut resolver = SchemaResolver::new(document);
  let refs = resolver.component_refs();
  let graph = DependencyGraph::build(&refs, &mut resolver);

  refs
    .iter()
    .map(|ref_path| {
      let resolved = resolver.resolve_ref(ref_path);
      let dependencies = graph
        .shallow
        .get(&resolved.ref_path)
        .into_iter()
        .flatten()
        .map(|dep| resolver.resolve_ref(dep).normalized)
        .collect();

      SchemaSummary {
        circular: graph.is_circular(&resolved.ref_path),
        name: resolved.name,
        identifier: resolved.normalized,
        dependencies,
      }
    })
    .collect()
}

pub async fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let summaries = summarize(&document);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["SCHEMA", "IDENTIFIER", "DEPENDENCIES", "CIRCULAR"] {
    row.add_cell(Cell::new(header).fg(comfy(colors.label())));
  }
  table.set_header(row);

  for summary in summaries {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(summary.name)
        .fg(comfy(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(summary.identifier).fg(comfy(colors.primary())));
    row.add_cell(Cell::new(summary.dependencies.join(", ")).fg(comfy(colors.info())));
    row.add_cell(
      Cell::new(if summary.circular { "yes" } else { "" })
        .fg(comfy(colors.accent()))
        .set_alignment(CellAlignment::Center),
    );
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
