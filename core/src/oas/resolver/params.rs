#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Logic for resolving Swagger 2.0 parameter objects into [`ParameterDefinition`]s
//! and merging path-level with operation-level declarations.
//!
//! Merging rules:
//! - Path-level parameters come first, operation-level second; the later entry
//!   for the same `(name, location)` replaces the earlier one wholesale.
//! - Header names are lower-cased before keying, so `X-Id` and `x-id` are the
//!   same header. Every other location keeps its declared casing.

use crate::error::{AppError, AppResult};
use crate::oas::models::{
    CollectionFormat, ItemsDefinition, ParamType, ParameterDefinition, ParameterLocation,
    CONSTRAINT_KEYWORDS,
};
use crate::oas::resolver::refs::resolve_transitively;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// A local shim for Parameter to ensure robust parsing of fields.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (path, query, header, body, formData).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Primitive type (non-body parameters).
    #[serde(rename = "type")]
    pub schema_type: Option<ParamType>,
    /// Format modifier (e.g. int64, date-time).
    pub format: Option<String>,
    /// Array item schema.
    pub items: Option<ItemsDefinition>,
    /// Array serialization.
    #[serde(rename = "collectionFormat")]
    pub collection_format: Option<CollectionFormat>,
    /// Allow empty values.
    #[serde(rename = "allowEmptyValue", default)]
    pub allow_empty_value: bool,
    /// Schema definition (body parameters).
    pub schema: Option<JsonValue>,
}

/// Resolves a declared parameter list (inline objects or `$ref`s).
///
/// Parameters in unsupported locations (`formData`) are skipped.
/// Duplicate identities inside one list are rejected.
pub fn resolve_parameters(
    root: &JsonValue,
    params: &[JsonValue],
) -> AppResult<Vec<ParameterDefinition>> {
    let mut result = Vec::new();
    let mut seen = HashSet::new();
    for param_or_ref in params {
        let raw = resolve_transitively(root, param_or_ref)?;
        let Some(param) = process_parameter(raw)? else {
            continue;
        };
        let key = match param.location {
            ParameterLocation::Header => (param.name.to_ascii_lowercase(), param.location),
            _ => (param.name.clone(), param.location),
        };
        if !seen.insert(key) {
            return Err(AppError::InvalidDescription(format!(
                "Duplicate parameter '{}' in location '{}'",
                param.name, param.location
            )));
        }
        result.push(param);
    }
    Ok(result)
}

/// Combines path-level and operation-level parameters.
///
/// Operation-level declarations win over path-level ones sharing identity.
pub fn merge_parameters(
    path_level: Vec<ParameterDefinition>,
    operation_level: Vec<ParameterDefinition>,
) -> Vec<ParameterDefinition> {
    let mut merged: IndexMap<(String, ParameterLocation), ParameterDefinition> = IndexMap::new();
    for mut param in path_level.into_iter().chain(operation_level) {
        if param.location == ParameterLocation::Header {
            param.name = param.name.to_ascii_lowercase();
        }
        merged.insert(param.identity(), param);
    }
    merged.into_values().collect()
}

/// Converts a response Header Object into an optional header parameter.
///
/// Header Objects carry no `name`/`in`; the map key supplies the name.
pub(crate) fn header_definition(name: &str, raw: &JsonValue) -> AppResult<ParameterDefinition> {
    let mut obj = raw.as_object().cloned().unwrap_or_default();
    obj.insert("name".to_string(), JsonValue::String(name.to_ascii_lowercase()));
    obj.insert("in".to_string(), JsonValue::String("header".to_string()));
    obj.insert("required".to_string(), JsonValue::Bool(false));

    process_parameter(&JsonValue::Object(obj))?.ok_or_else(|| {
        AppError::InvalidDescription(format!("Response header '{}' could not be resolved", name))
    })
}

/// Helper to convert a resolved parameter object into a `ParameterDefinition`.
///
/// Returns `Ok(None)` for locations the validator has no request map for.
fn process_parameter(raw: &JsonValue) -> AppResult<Option<ParameterDefinition>> {
    let shim: ShimParameter = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::InvalidDescription(format!("Malformed parameter {}: {}", raw, e)))?;

    let location = match shim.parameter_in.as_str() {
        "path" => ParameterLocation::Path,
        "query" => ParameterLocation::Query,
        "header" => ParameterLocation::Header,
        "body" => ParameterLocation::Body,
        other => {
            tracing::warn!(
                parameter = %shim.name,
                location = other,
                "skipping parameter in unsupported location"
            );
            return Ok(None);
        }
    };

    if location == ParameterLocation::Path && !shim.required {
        return Err(AppError::InvalidDescription(format!(
            "Path parameter '{}' must set required: true",
            shim.name
        )));
    }

    if location == ParameterLocation::Body && shim.schema.is_none() {
        return Err(AppError::InvalidDescription(format!(
            "Body parameter '{}' must define a schema",
            shim.name
        )));
    }

    Ok(Some(ParameterDefinition {
        constraints: extract_constraints(raw),
        name: shim.name,
        location,
        required: shim.required,
        param_type: shim.schema_type,
        format: shim.format,
        items: shim.items,
        collection_format: shim.collection_format,
        allow_empty_value: shim.allow_empty_value,
        schema: shim.schema,
    }))
}

/// Copies the whitelisted constraint keywords out of a parameter object.
///
/// `type: file` is not a JSON Schema type and is dropped.
pub(crate) fn extract_constraints(raw: &JsonValue) -> Map<String, JsonValue> {
    let mut constraints = Map::new();
    let Some(obj) = raw.as_object() else {
        return constraints;
    };
    for keyword in CONSTRAINT_KEYWORDS {
        if let Some(value) = obj.get(keyword) {
            if keyword == "type" && value == "file" {
                continue;
            }
            constraints.insert(keyword.to_string(), value.clone());
        }
    }
    constraints
}
