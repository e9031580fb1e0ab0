#![deny(missing_docs)]

//! # Body Resolution
//!
//! Turns a declared body schema (request body parameter or response `schema`)
//! into a compiled [`BodySchema`].
//!
//! `$ref` chains are followed. When the chain ends at a definition that carries a
//! discriminator, the body is dispatched on that field: each allowed definition
//! name maps to its own compiled schema.

use crate::engine::SchemaEngine;
use crate::error::{AppError, AppResult};
use crate::oas::models::{BodySchema, DiscriminatedSchema, DiscriminatorIndex};
use crate::oas::normalization::normalize_nullable_schemas;
use crate::oas::ref_utils::{extract_definition_name, ref_target};
use crate::oas::resolver::refs::resolve_reference;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Shared inputs for compiling body schemas.
pub struct BodyContext<'a> {
    /// Root description document (for `$ref` resolution).
    pub root: &'a JsonValue,
    /// Normalized `definitions` object attached to every compiled body schema.
    pub definitions: &'a JsonValue,
    /// Discriminator descriptors by base definition name.
    pub discriminators: &'a DiscriminatorIndex,
    /// Engine used to compile schemas.
    pub engine: &'a dyn SchemaEngine,
}

/// Resolves and compiles a body schema.
pub fn resolve_body_schema(ctx: &BodyContext<'_>, schema: &JsonValue) -> AppResult<BodySchema> {
    let (target, definition) = follow_refs(ctx.root, schema)?;

    if let Some(descriptor) = definition
        .as_deref()
        .and_then(|name| ctx.discriminators.get(name))
    {
        let mut allowed = IndexMap::new();
        for name in &descriptor.allowed {
            let concrete = lookup_definition(ctx.definitions, name);
            allowed.insert(name.clone(), ctx.engine.compile(concrete, Some(ctx.definitions))?);
        }
        return Ok(BodySchema::Discriminated(DiscriminatedSchema {
            field: descriptor.field.clone(),
            allowed,
        }));
    }

    let compiled = match definition {
        // Definitions are already normalized.
        Some(name) => ctx
            .engine
            .compile(lookup_definition(ctx.definitions, &name), Some(ctx.definitions))?,
        None => {
            let mut inline = target.clone();
            normalize_nullable_schemas(&mut inline);
            ctx.engine.compile(&inline, Some(ctx.definitions))?
        }
    };
    Ok(BodySchema::Plain(compiled))
}

/// Follows a `$ref` chain, remembering the last definition name passed through.
fn follow_refs<'a>(
    root: &'a JsonValue,
    schema: &'a JsonValue,
) -> AppResult<(&'a JsonValue, Option<String>)> {
    let mut current = schema;
    let mut definition = None;
    let mut visiting = HashSet::new();
    while let Some(pointer) = ref_target(current) {
        if !visiting.insert(pointer.to_string()) {
            return Err(AppError::UnresolvableReference(format!(
                "{} (reference cycle)",
                pointer
            )));
        }
        current = resolve_reference(root, pointer)?;
        definition = extract_definition_name(pointer);
    }
    Ok((current, definition))
}

fn lookup_definition<'a>(definitions: &'a JsonValue, name: &str) -> &'a JsonValue {
    static EMPTY: JsonValue = JsonValue::Null;
    definitions.get(name).unwrap_or(&EMPTY)
}
