//! Orchestration for the OpenAPI to Zod generation pipeline.
//!
//! The `Orchestrator` owns one parsed document and produces the validator
//! expressions, static type declarations and statistics for it. Every call to
//! [`Orchestrator::generate`] works on a fresh context, so nothing carries over
//! between documents or runs.

use indexmap::{IndexMap, IndexSet};

use super::{
  codegen::render_module,
  converter::{ConversionContext, FragmentMeta, RefFrame, TypeScriptConverter, ZodConverter},
  dependency_graph::DependencyGraph,
  document::OpenApiDocument,
  errors::ConversionError,
  metrics::GenerationStats,
  options::ConversionOptions,
  resolver::SchemaResolver,
  topological::topological_sort,
};
use crate::utils::schema_ref_path;

/// High-level entry point for turning a document into a Zod module.
pub struct Orchestrator {
  document: OpenApiDocument,
  options: ConversionOptions,
  roots: Vec<String>,
}

/// Metadata about the document for the generated file header.
#[derive(Debug, Clone)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// Everything produced for one document, ready to be rendered.
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
  /// Identifier to validator expression, in emission order.
  pub schemas: IndexMap<String, String>,
  /// Identifier to `type Name = ...;` declaration.
  pub types: IndexMap<String, String>,
  /// Identifiers whose constant is annotated with `z.ZodType<Name>`.
  pub emitted_types: IndexSet<String>,
  pub stats: GenerationStats,
}

impl Orchestrator {
  /// `roots` names the component schemas to translate. With no roots, or with
  /// `should_export_all_schemas`, every component schema is translated.
  pub(crate) fn new(document: OpenApiDocument, options: ConversionOptions, roots: Vec<String>) -> Self {
    Self {
      document,
      options,
      roots,
    }
  }

  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata {
      title: self.document.info.title.clone(),
      version: self.document.info.version.clone(),
      description: self.document.info.description.clone(),
    }
  }

  /// Runs the full pipeline:
  /// 1. Builds the reference graphs over every component schema
  /// 2. Translates the requested schemas, pulling in everything they reference
  /// 3. Wraps circular schemas in `z.lazy`
  /// 4. Emits static types for circular schemas (or all, when requested)
  /// 5. Orders the output so dependencies come first
  pub(crate) fn generate(&self) -> anyhow::Result<GeneratedOutput> {
    let mut resolver = SchemaResolver::new(&self.document);
    let component_refs = resolver.component_refs();
    let graph = DependencyGraph::build(&component_refs, &mut resolver);

    let mut stats = GenerationStats::default();
    let mut ctx = ConversionContext::new(resolver);
    let zod = ZodConverter::new(&self.options);

    let export_all = self.options.should_export_all_schemas || self.roots.is_empty();
    let root_refs = self.roots.iter().map(|name| schema_ref_path(name)).collect::<Vec<_>>();
    let selected = if export_all {
      root_refs.iter().chain(&component_refs).collect::<IndexSet<_>>()
    } else {
      root_refs.iter().collect::<IndexSet<_>>()
    };

    for ref_path in selected {
      let resolved = ctx.resolver()?.resolve_ref(ref_path);
      let target = ctx.resolver()?.get_schema_by_ref(&resolved.ref_path)?;
      let meta = FragmentMeta {
        referenced_by: vec![RefFrame {
          name: resolved.normalized.clone(),
          ref_path: resolved.ref_path.clone(),
        }],
        ..FragmentMeta::default()
      };

      let fragment = zod.translate(&target, &mut ctx, &meta)?;
      if fragment.exceeds_complexity(self.options.complexity_threshold) {
        stats.record_complex_schema(&resolved.normalized, fragment.complexity());
      }
      ctx.insert_if_absent(&resolved.normalized, fragment.to_string());
    }

    let (resolver, schemas, warnings) = ctx.into_parts();
    let mut resolver = resolver.ok_or(ConversionError::MissingContext)?;

    let mut circular = IndexSet::new();
    let schemas = schemas
      .into_iter()
      .map(|(name, code)| {
        let is_circular = resolver
          .resolve_schema_name(&name)
          .is_some_and(|resolved| graph.is_circular(&resolved.ref_path));
        if is_circular {
          circular.insert(name.clone());
          (name, format!("z.lazy(() => {code})"))
        } else {
          (name, code)
        }
      })
      .collect::<IndexMap<_, _>>();

    let (types, emitted_types) = self.emit_types(&graph, &schemas, &circular, &mut resolver)?;

    let topo_order = topological_sort(&graph.deep)
      .iter()
      .map(|ref_path| resolver.resolve_ref(ref_path).normalized)
      .collect::<IndexSet<_>>();
    let schemas = order_schemas(schemas, &topo_order);

    let cycles = graph
      .cycles()
      .into_iter()
      .map(|cycle| {
        cycle
          .iter()
          .map(|ref_path| resolver.resolve_ref(ref_path).normalized)
          .collect::<Vec<_>>()
      })
      .collect::<Vec<_>>();

    stats.record_schemas(schemas.len());
    stats.record_types(types.len());
    stats.record_circular(circular.len());
    stats.record_cycles(cycles);
    stats.record_warnings(warnings);

    Ok(GeneratedOutput {
      schemas,
      types,
      emitted_types,
      stats,
    })
  }

  fn emit_types(
    &self,
    graph: &DependencyGraph,
    schemas: &IndexMap<String, String>,
    circular: &IndexSet<String>,
    resolver: &mut SchemaResolver,
  ) -> anyhow::Result<(IndexMap<String, String>, IndexSet<String>)> {
    let ts = TypeScriptConverter::new(&self.options);
    let export_all_types = self.options.should_export_all_types;

    let mut types = IndexMap::new();
    let mut emitted = IndexSet::new();

    for (ref_path, deps) in &graph.deep {
      let name = resolver.resolve_ref(ref_path).normalized;
      let is_circular = circular.contains(&name);
      if !(is_circular || export_all_types) || !schemas.contains_key(&name) {
        continue;
      }

      if !types.contains_key(&name) {
        let target = resolver.get_schema_by_ref(ref_path)?;
        types.insert(name.clone(), ts.declaration(&name, &target, resolver)?);
      }
      emitted.insert(name);

      for dep in deps {
        let dep_name = resolver.resolve_ref(dep).normalized;
        if circular.contains(&dep_name) || types.contains_key(&dep_name) {
          continue;
        }

        let target = resolver.get_schema_by_ref(dep)?;
        types.insert(dep_name.clone(), ts.declaration(&dep_name, &target, resolver)?);
        if export_all_types && target.as_schema().is_some_and(|schema| schema.has_type("object")) {
          emitted.insert(dep_name);
        }
      }
    }

    // Schemas without references never become graph keys.
    if export_all_types {
      for name in schemas.keys() {
        if types.contains_key(name) {
          continue;
        }
        let Some(ref_path) = resolver.resolve_schema_name(name).map(|resolved| resolved.ref_path.clone()) else {
          continue;
        };
        let target = resolver.get_schema_by_ref(&ref_path)?;
        types.insert(name.clone(), ts.declaration(name, &target, resolver)?);
        if target.as_schema().is_some_and(|schema| schema.has_type("object")) {
          emitted.insert(name.clone());
        }
      }
    }

    Ok((types, emitted))
  }

  /// Generates the complete module text, including the file header.
  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<(String, GenerationStats)> {
    let output = self.generate()?;
    let code = render_module(&self.metadata(), source_path, &output);
    Ok((code, output.stats))
  }
}

/// Names the topological order never reached come first in their existing
/// order, then the rest follow the topological order.
fn order_schemas(mut schemas: IndexMap<String, String>, topo_order: &IndexSet<String>) -> IndexMap<String, String> {
  let mut ordered = schemas
    .iter()
    .filter(|(name, _)| !topo_order.contains(*name))
    .map(|(name, code)| (name.clone(), code.clone()))
    .collect::<IndexMap<_, _>>();

  for name in topo_order {
    if let Some(code) = schemas.shift_remove(name) {
      ordered.insert(name.clone(), code);
    }
  }

  ordered
}
