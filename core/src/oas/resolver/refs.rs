#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Resolves `$ref` pointers against the root description document.
//!
//! Failures are fatal load-time errors: a description whose references do not
//! resolve is never turned into an operation table.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::{local_pointer_segments, ref_target};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Resolves a single pointer (e.g. `#/definitions/Item`) to its target fragment.
pub fn resolve_reference<'a>(root: &'a JsonValue, pointer: &str) -> AppResult<&'a JsonValue> {
    let segments = local_pointer_segments(pointer)
        .ok_or_else(|| AppError::UnresolvableReference(pointer.to_string()))?;

    let mut current = root;
    for segment in &segments {
        current = match current {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| AppError::UnresolvableReference(pointer.to_string()))?;
    }
    Ok(current)
}

/// Follows `{"$ref": ...}` chains until a non-reference object is reached.
///
/// Values that are not reference objects are returned unchanged. Cycles
/// (`A -> B -> A`) are reported as unresolvable.
pub fn resolve_transitively<'a>(root: &'a JsonValue, value: &'a JsonValue) -> AppResult<&'a JsonValue> {
    let mut current = value;
    let mut visiting = HashSet::new();
    while let Some(pointer) = ref_target(current) {
        if !visiting.insert(pointer.to_string()) {
            return Err(AppError::UnresolvableReference(format!(
                "{} (reference cycle)",
                pointer
            )));
        }
        current = resolve_reference(root, pointer)?;
    }
    Ok(current)
}
