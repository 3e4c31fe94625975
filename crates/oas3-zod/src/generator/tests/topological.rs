use indexmap::IndexSet;

use crate::generator::{dependency_graph::RefGraph, topological::topological_sort};

fn graph(edges: Vec<(&str, Vec<&str>)>) -> RefGraph {
  edges
    .into_iter()
    .map(|(node, deps)| {
      (
        node.to_string(),
        deps.into_iter().map(str::to_string).collect::<IndexSet<_>>(),
      )
    })
    .collect()
}

#[test]
fn test_dependencies_come_first() {
  let sorted = topological_sort(&graph(vec![("A", vec!["B"]), ("B", vec!["C"])]));
  assert_eq!(sorted, vec!["C", "B", "A"], "non-key dependencies are emitted too");
}

#[test]
fn test_independent_nodes_keep_key_order() {
  let sorted = topological_sort(&graph(vec![("A", vec![]), ("B", vec![]), ("C", vec!["A"])]));
  assert_eq!(sorted, vec!["A", "B", "C"]);
}

#[test]
fn test_cycles_do_not_fail() {
  assert_eq!(topological_sort(&graph(vec![("A", vec!["A"])])), vec!["A"]);
  assert_eq!(
    topological_sort(&graph(vec![("User", vec!["Middle", "User"]), ("Middle", vec!["User", "Middle"])])),
    vec!["Middle", "User"]
  );
}

#[test]
fn test_shared_dependency_is_emitted_once() {
  let sorted = topological_sort(&graph(vec![("A", vec!["Shared"]), ("B", vec!["Shared"])]));
  assert_eq!(sorted, vec!["Shared", "A", "B"]);
}

#[test]
fn test_empty_graph() {
  assert!(topological_sort(&RefGraph::new()).is_empty());
}
