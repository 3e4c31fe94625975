mod chain;
mod complexity;
mod context;
mod fragment;
mod primitives;
mod required;
mod shape;
mod typescript;
mod zod;

#[cfg(test)]
mod tests;

pub(crate) use context::ConversionContext;
pub(crate) use fragment::{FragmentMeta, RefFrame};
pub(crate) use typescript::TypeScriptConverter;
pub(crate) use zod::ZodConverter;
