mod resolver;
mod support;
mod topological;
