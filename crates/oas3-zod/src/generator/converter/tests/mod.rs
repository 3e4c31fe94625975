mod required;
mod support;
