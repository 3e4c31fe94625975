use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::{resolver::SchemaResolver, schema::SchemaOrRef};

pub(crate) type RefGraph = IndexMap<String, IndexSet<String>>;

/// Reference graph of a set of named schemas.
///
/// `shallow` holds the references found directly inside each schema, `deep`
/// its transitive closure. A reference is circular exactly when its deep set
/// contains itself. Both maps keep first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DependencyGraph {
  pub(crate) shallow: RefGraph,
  pub(crate) deep: RefGraph,
}

impl DependencyGraph {
  pub(crate) fn build(refs: &[String], resolver: &mut SchemaResolver) -> Self {
    let mut collector = RefCollector {
      resolver,
      shallow: RefGraph::new(),
      visited: HashSet::new(),
    };

    for ref_path in refs {
      let ref_path = collector.resolver.resolve_ref(ref_path).ref_path;
      if let Ok(schema) = collector.resolver.get_schema_by_ref(&ref_path) {
        collector.visit(&schema, &ref_path);
      }
    }

    let shallow = collector.shallow;
    let deep = build_deep_graph(&shallow);
    Self { shallow, deep }
  }

  pub(crate) fn is_circular(&self, ref_path: &str) -> bool {
    self.deep.get(ref_path).is_some_and(|deps| deps.contains(ref_path))
  }

  /// Strongly connected groups of references, including single self-references.
  pub(crate) fn cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.shallow {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|mut scc| {
        scc.reverse();
        scc.into_iter().map(String::from).collect()
      })
      .collect()
  }
}

struct RefCollector<'a> {
  resolver: &'a mut SchemaResolver,
  shallow: RefGraph,
  visited: HashSet<String>,
}

impl RefCollector<'_> {
  fn visit(&mut self, schema: &SchemaOrRef, from_ref: &str) {
    let schema = match schema {
      SchemaOrRef::Ref { ref_path } => {
        let ref_path = self.resolver.resolve_ref(ref_path).ref_path;
        self
          .shallow
          .entry(from_ref.to_string())
          .or_default()
          .insert(ref_path.clone());

        if self.visited.contains(&ref_path) {
          return;
        }
        self.visited.insert(from_ref.to_string());

        if let Ok(target) = self.resolver.get_schema_by_ref(&ref_path) {
          self.visit(&target, &ref_path);
        }
        return;
      }
      SchemaOrRef::Schema(schema) => schema,
    };

    for member in schema.all_of.iter().chain(&schema.one_of).chain(&schema.any_of) {
      self.visit(member, from_ref);
    }

    if let Some(items) = &schema.items {
      self.visit(items, from_ref);
    }

    if let Some(properties) = &schema.properties {
      for property in properties.values() {
        self.visit(property, from_ref);
      }
    }

    if let Some(value) = schema.additional_properties.as_ref().and_then(|ap| ap.value_schema()) {
      self.visit(value, from_ref);
    }
  }
}

fn build_deep_graph(shallow: &RefGraph) -> RefGraph {
  let mut deep = RefGraph::new();
  for root in shallow.keys() {
    let mut deps = IndexSet::new();
    let mut expanded = HashSet::new();
    if let Some(direct) = shallow.get(root) {
      for dep in direct {
        collect_transitive(shallow, root, dep, &mut deps, &mut expanded);
      }
    }
    deep.insert(root.clone(), deps);
  }
  deep
}

fn collect_transitive(
  shallow: &RefGraph,
  root: &str,
  dep: &str,
  deps: &mut IndexSet<String>,
  expanded: &mut HashSet<String>,
) {
  deps.insert(dep.to_string());
  if root == dep {
    return;
  }

  if let Some(transitive) = shallow.get(dep) {
    for next in transitive {
      if expanded.insert(next.clone()) {
        collect_transitive(shallow, root, next, deps, expanded);
      }
    }
  }
}
