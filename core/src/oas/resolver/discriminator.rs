#![deny(missing_docs)]

//! # Discriminator Expansion
//!
//! For every definition that declares a `discriminator`, computes the set of
//! definition names that may appear as the discriminator value.
//!
//! A name `N` is allowed for base `S` when `N` is `S` itself, or when `N` is an
//! `allOf` composition whose last element is `{"$ref": "#/definitions/S"}`.
//! Only this single level of subtyping is resolved.

use crate::error::{AppError, AppResult};
use crate::oas::models::{DiscriminatorDescriptor, DiscriminatorIndex};
use crate::oas::ref_utils::{extract_definition_name, ref_target};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;

/// Builds the discriminator index for a `definitions` object.
pub fn expand_discriminators(definitions: &Map<String, JsonValue>) -> AppResult<DiscriminatorIndex> {
    let mut index = DiscriminatorIndex::new();
    for (base, schema) in definitions {
        let Some(field) = discriminator_field(schema)? else {
            continue;
        };

        let mut allowed = BTreeSet::new();
        allowed.insert(base.clone());
        for (name, candidate) in definitions {
            if extends(candidate, base) {
                allowed.insert(name.clone());
            }
        }

        tracing::debug!(base = %base, field = %field, subtypes = allowed.len(), "expanded discriminator");
        index.insert(base.clone(), DiscriminatorDescriptor { field, allowed });
    }
    Ok(index)
}

/// Reads the discriminator property name of a schema, if any.
pub(crate) fn discriminator_field(schema: &JsonValue) -> AppResult<Option<String>> {
    match schema.get("discriminator") {
        None => Ok(None),
        Some(JsonValue::String(field)) => Ok(Some(field.clone())),
        Some(other) => Err(AppError::InvalidDescription(format!(
            "discriminator must be a property name, found {}",
            other
        ))),
    }
}

/// Whether `candidate` is `allOf: [..., {"$ref": "#/definitions/<base>"}]`.
fn extends(candidate: &JsonValue, base: &str) -> bool {
    candidate
        .get("allOf")
        .and_then(|all_of| all_of.as_array())
        .and_then(|parts| parts.last())
        .and_then(ref_target)
        .and_then(extract_definition_name)
        .is_some_and(|name| name == base)
}
