//! Recursive translation of schema nodes into Zod validator expressions.

use std::sync::Arc;

use super::{
  chain::zod_chain,
  complexity::with_single_type,
  context::ConversionContext,
  fragment::{CodeFragment, FragmentMeta, RefFrame},
  primitives::{base_validator, enum_validator, is_impossible_enum},
  required::RequiredSplit,
  shape::{PrimitiveType, SchemaShape},
};
use crate::{
  generator::{
    errors::{ConversionError, ConversionResult},
    metrics::GenerationWarning,
    options::ConversionOptions,
    schema::{ObjectSchema, SchemaOrRef},
  },
  utils::wrap_with_quotes_if_needed,
};

const INLINE_OWNER: &str = "<inline>";

pub(crate) struct ZodConverter<'a> {
  options: &'a ConversionOptions,
}

impl<'a> ZodConverter<'a> {
  pub(crate) fn new(options: &'a ConversionOptions) -> Self {
    Self { options }
  }

  /// Translates one schema node.
  ///
  /// Referenced schemas are never inlined: the returned fragment holds the
  /// target's identifier and the target's own expression is recorded in
  /// `ctx` the first time it is reached.
  pub(crate) fn translate(
    &self,
    schema: &SchemaOrRef,
    ctx: &mut ConversionContext,
    inherited: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    let refined = self.options.refine(schema, inherited);
    let schema = refined.as_ref().unwrap_or(schema);

    let frame = match schema {
      SchemaOrRef::Ref { ref_path } => {
        let resolved = ctx.resolver()?.resolve_ref(ref_path);
        Some(RefFrame {
          name: resolved.normalized,
          ref_path: resolved.ref_path,
        })
      }
      SchemaOrRef::Schema(_) => None,
    };

    let fragment = CodeFragment::new(schema.clone(), inherited, frame);
    let meta = fragment.meta().child();

    match SchemaShape::classify(schema) {
      SchemaShape::Reference(ref_path) => self.translate_reference(fragment, ref_path, ctx, &meta),
      SchemaShape::TypeList(schema, types) => {
        if let [single] = types {
          return self.translate(&with_single_type(schema, single), ctx, &meta);
        }
        let members = types
          .iter()
          .map(|ty| self.translate(&with_single_type(schema, ty), ctx, &meta))
          .collect::<ConversionResult<Vec<_>>>()?;
        Ok(fragment.assign(format!("z.union([{}])", join(&members))))
      }
      SchemaShape::Null => Ok(fragment.assign("z.null()")),
      SchemaShape::OneOf(schema) => self.translate_one_of(fragment, schema, ctx, &meta),
      SchemaShape::AnyOf(members) => {
        if let [single] = members {
          let inner = self.translate(single, ctx, &meta)?;
          return Ok(fragment.assign(inner.to_string()));
        }
        let members = self.translate_all(members, ctx, &meta)?;
        Ok(fragment.assign(format!("z.union([{}])", join(&members))))
      }
      SchemaShape::AllOf(schema) => self.translate_all_of(fragment, schema, ctx, &meta),
      SchemaShape::Primitive(schema, primitive) => Ok(self.translate_primitive(fragment, schema, primitive, ctx)),
      SchemaShape::Array(schema) => self.translate_array(fragment, schema, ctx, &meta),
      SchemaShape::Object(schema) => self.translate_object(fragment, schema, ctx, &meta),
      SchemaShape::Unknown => Ok(fragment.assign("z.unknown()")),
      SchemaShape::Unsupported(schema_type) => Err(ConversionError::UnsupportedSchemaType(schema_type.to_lowercase())),
    }
  }

  fn translate_all(
    &self,
    members: &[SchemaOrRef],
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<Vec<CodeFragment>> {
    members.iter().map(|member| self.translate(member, ctx, meta)).collect()
  }

  fn translate_reference(
    &self,
    fragment: CodeFragment,
    ref_path: &str,
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    let name = fragment.meta().owner().unwrap_or_default().to_string();

    let refs_path = fragment.meta().refs_path();
    let is_back_edge = refs_path.len() > 1 && refs_path.contains(&name.as_str());

    if !is_back_edge && !ctx.contains(&name) {
      let target = ctx.resolver()?.get_schema_by_ref(ref_path)?;
      let expanded = self.translate(&target, ctx, meta)?;
      ctx.insert_if_absent(&name, expanded.to_string());
    }

    Ok(fragment.assign(name))
  }

  fn translate_one_of(
    &self,
    fragment: CodeFragment,
    schema: &ObjectSchema,
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    if let [single] = schema.one_of.as_slice() {
      let inner = self.translate(single, ctx, meta)?;
      return Ok(fragment.assign(inner.to_string()));
    }

    // An intersected branch loses its literal discriminant, so fall back to a plain union.
    let has_multiple_all_of = schema
      .one_of
      .iter()
      .any(|branch| branch.as_schema().is_some_and(|branch| branch.all_of.len() > 1));

    let members = self.translate_all(&schema.one_of, ctx, meta)?;
    match &schema.discriminator {
      Some(discriminator) if !has_multiple_all_of => Ok(fragment.assign(format!(
        "z.discriminatedUnion(\"{}\", [{}])",
        discriminator.property_name,
        join(&members)
      ))),
      _ => Ok(fragment.assign(format!("z.union([{}])", join(&members)))),
    }
  }

  fn translate_all_of(
    &self,
    fragment: CodeFragment,
    schema: &ObjectSchema,
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    if let [single] = schema.all_of.as_slice() {
      let inner = self.translate(single, ctx, meta)?;
      return Ok(fragment.assign(inner.to_string()));
    }

    let mut split = RequiredSplit::infer(&schema.all_of);
    let mut parts = Vec::with_capacity(split.members.len() + 1);
    for member in split.members.clone() {
      parts.push(self.translate(&member, ctx, meta)?);
      if ctx.has_resolver() {
        split.patch_from(&member, ctx.resolver()?)?;
      }
    }

    if split.has_required() {
      let composed = SchemaOrRef::from(split.composed);
      parts.push(self.translate(&composed, ctx, meta)?);
    }

    let mut parts = parts.iter().map(ToString::to_string);
    let Some(first) = parts.next() else {
      return Ok(fragment.assign("z.unknown()"));
    };
    let code = parts.fold(first, |acc, part| format!("{acc}.and({part})"));
    Ok(fragment.assign(code))
  }

  fn translate_primitive(
    &self,
    fragment: CodeFragment,
    schema: &ObjectSchema,
    primitive: PrimitiveType,
    ctx: &mut ConversionContext,
  ) -> CodeFragment {
    let Some(values) = &schema.enum_values else {
      return fragment.assign(base_validator(schema, primitive));
    };

    if is_impossible_enum(values, primitive) {
      let owner = fragment.meta().owner().unwrap_or(INLINE_OWNER).to_string();
      ctx.warn(GenerationWarning::ImpossibleEnum {
        schema_name: owner,
        schema_type: schema.single_type().unwrap_or_default(),
      });
    }
    fragment.assign(enum_validator(values, primitive))
  }

  fn translate_array(
    &self,
    fragment: CodeFragment,
    schema: &ObjectSchema,
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    let readonly = self.readonly_suffix();
    let Some(items) = schema.items.as_deref() else {
      return Ok(fragment.assign(format!("z.array(z.any()){readonly}")));
    };

    let item = self.translate(items, ctx, meta)?;
    let chain = zod_chain(items.as_schema(), true, self.options);
    Ok(fragment.assign(format!("z.array({item}{chain}){readonly}")))
  }

  fn translate_object(
    &self,
    fragment: CodeFragment,
    schema: &ObjectSchema,
    ctx: &mut ConversionContext,
    meta: &FragmentMeta,
  ) -> ConversionResult<CodeFragment> {
    if let Some(value) = schema.additional_properties.as_ref().and_then(|ap| ap.value_schema()) {
      if schema.properties.as_ref().is_some_and(|props| !props.is_empty()) {
        let owner = fragment.meta().owner().unwrap_or(INLINE_OWNER).to_string();
        ctx.warn(GenerationWarning::PropertiesIgnoredForRecord { schema_name: owner });
      }
      let inner = self.translate(value, ctx, meta)?;
      let chain = zod_chain(value.as_schema(), true, self.options);
      return Ok(fragment.assign(format!("z.record({inner}{chain})")));
    }

    let implicit_required = self.options.with_implicit_required_props;
    let has_required_array = !schema.required.is_empty();
    let is_partial = !implicit_required && !has_required_array;

    let mut entries = Vec::new();
    for (name, property) in schema.properties.iter().flatten() {
      let is_required = if is_partial {
        true
      } else if has_required_array {
        schema.required.contains(name)
      } else {
        implicit_required
      };
      let property_meta = meta.property(name, is_required);

      let actual: Arc<SchemaOrRef> = match property {
        SchemaOrRef::Ref { ref_path } if ctx.has_resolver() => ctx.resolver()?.get_schema_by_ref(ref_path)?,
        _ => Arc::new(property.clone()),
      };

      let child = self.translate(property, ctx, &property_meta)?;
      let chain = zod_chain(actual.as_schema(), property_meta.is_required(), self.options);
      entries.push(format!("{}: {child}{chain}", wrap_with_quotes_if_needed(name)));
    }

    let body = if entries.is_empty() {
      "{}".to_string()
    } else {
      format!("{{ {} }}", entries.join(", "))
    };

    let allows_extra_keys = schema
      .additional_properties
      .as_ref()
      .map_or(self.options.additional_properties_default_value, |ap| {
        ap.allows_extra_keys()
      });
    let constructor = if self.options.strict_objects {
      "strictObject"
    } else if allows_extra_keys {
      "looseObject"
    } else {
      "object"
    };

    let partial = if is_partial { ".partial()" } else { "" };
    let readonly = self.readonly_suffix();
    Ok(fragment.assign(format!("z.{constructor}({body}){partial}{readonly}")))
  }

  fn readonly_suffix(&self) -> &'static str {
    if self.options.all_readonly { ".readonly()" } else { "" }
  }
}

fn join(fragments: &[CodeFragment]) -> String {
  fragments.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
