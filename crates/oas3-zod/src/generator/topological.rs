use std::collections::HashSet;

use indexmap::IndexSet;

use super::dependency_graph::RefGraph;

/// Orders the graph's keys so dependencies come before their dependents.
///
/// Edges that point back to a node on the current path are skipped, so
/// cycles and self-references never fail; members of a cycle are emitted in
/// first-encounter order. Dependencies that are not keys themselves are
/// emitted as well.
pub(crate) fn topological_sort(graph: &RefGraph) -> Vec<String> {
  let mut sorter = TopologicalSorter {
    graph,
    sorted: IndexSet::new(),
    visited: HashSet::new(),
  };

  for name in graph.keys() {
    if !sorter.visited.contains(name.as_str()) {
      sorter.visit(name, &[]);
    }
  }

  sorter.sorted.into_iter().collect()
}

struct TopologicalSorter<'a> {
  graph: &'a RefGraph,
  sorted: IndexSet<String>,
  visited: HashSet<&'a str>,
}

impl<'a> TopologicalSorter<'a> {
  fn visit(&mut self, name: &'a str, ancestors: &[&'a str]) {
    let mut path = ancestors.to_vec();
    path.push(name);
    self.visited.insert(name);

    let graph = self.graph;
    if let Some(deps) = graph.get(name) {
      for dep in deps {
        if path.contains(&dep.as_str()) || self.visited.contains(dep.as_str()) {
          continue;
        }
        self.visit(dep, &path);
      }
    }

    if !self.sorted.contains(name) {
      self.sorted.insert(name.to_string());
    }
  }
}
