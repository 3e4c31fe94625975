pub(crate) mod codegen;
pub(crate) mod converter;
pub(crate) mod dependency_graph;
pub(crate) mod document;
pub(crate) mod errors;
pub(crate) mod metrics;
pub(crate) mod options;
pub mod orchestrator;
pub(crate) mod resolver;
pub(crate) mod schema;
pub(crate) mod topological;

#[cfg(test)]
mod tests;
