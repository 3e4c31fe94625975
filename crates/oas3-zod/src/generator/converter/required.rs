use indexmap::IndexMap;

use crate::generator::{
  errors::ConversionResult,
  resolver::SchemaResolver,
  schema::{ObjectSchema, SchemaOrRef},
};

/// `allOf` members split into real schemas plus one synthesized object that
/// collects the `required` lists of required-only stubs.
///
/// A stub such as `{ required: ["name"] }` would otherwise translate to an
/// empty object intersection. Its property schemas are copied from the
/// sibling members via [`RequiredSplit::patch_from`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequiredSplit {
  pub members: Vec<SchemaOrRef>,
  pub composed: ObjectSchema,
}

impl RequiredSplit {
  pub(crate) fn infer(all_of: &[SchemaOrRef]) -> Self {
    let (stubs, members): (Vec<_>, Vec<_>) = all_of.iter().cloned().partition(is_required_only);

    let required = stubs
      .iter()
      .filter_map(SchemaOrRef::as_schema)
      .flat_map(|stub| stub.required.iter().cloned())
      .collect::<Vec<_>>();

    let properties = required
      .iter()
      .map(|name| (name.clone(), SchemaOrRef::from(ObjectSchema::default())))
      .collect::<IndexMap<_, _>>();

    let composed = ObjectSchema {
      properties: Some(properties),
      required,
      ..ObjectSchema::default()
    }
    .with_type("object");

    Self { members, composed }
  }

  pub(crate) fn has_required(&self) -> bool {
    !self.composed.required.is_empty()
  }

  /// Copies the required properties' schemas from a sibling member.
  ///
  /// A referenced sibling overwrites every required property, falling back to
  /// `{}` when the target lacks it. An inline sibling only fills in the
  /// properties it declares.
  pub(crate) fn patch_from(&mut self, member: &SchemaOrRef, resolver: &mut SchemaResolver) -> ConversionResult<()> {
    let required = self.composed.required.clone();
    let Some(properties) = self.composed.properties.as_mut() else {
      return Ok(());
    };

    match member {
      SchemaOrRef::Ref { ref_path } => {
        let target = resolver.get_schema_by_ref(ref_path)?;
        let target = target.as_schema();
        for name in required {
          let patched = target
            .and_then(|schema| schema.property(&name))
            .cloned()
            .unwrap_or_else(|| ObjectSchema::default().into());
          properties.insert(name, patched);
        }
      }
      SchemaOrRef::Schema(schema) => {
        for name in required {
          if let Some(property) = schema.property(&name) {
            properties.insert(name, property.clone());
          }
        }
      }
    }

    Ok(())
  }
}

/// A non-reference member that carries `required` and nothing that gives it a shape.
fn is_required_only(member: &SchemaOrRef) -> bool {
  member.as_schema().is_some_and(|schema| {
    !schema.required.is_empty()
      && schema.schema_type.is_none()
      && schema.properties.is_none()
      && schema.all_of.is_empty()
      && schema.any_of.is_empty()
      && schema.one_of.is_empty()
  })
}
