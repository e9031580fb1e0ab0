#![deny(missing_docs)]

//! # Response Resolution
//!
//! Builds a [`ResponseSchema`] per declared status: headers become optional
//! header parameters with a synthesized sub-schema, and the `schema` (if any)
//! is compiled like a request body.

use crate::error::{AppError, AppResult};
use crate::oas::models::{ParameterLocation, ResponseSchema};
use crate::oas::resolver::body::{resolve_body_schema, BodyContext};
use crate::oas::resolver::params::header_definition;
use crate::oas::resolver::refs::resolve_transitively;
use crate::oas::routes::builder::build_location_schema;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Resolves every declared response of an operation.
///
/// Extension keys (`x-...`) are skipped.
pub fn resolve_responses(
    ctx: &BodyContext<'_>,
    responses: &IndexMap<String, JsonValue>,
) -> AppResult<IndexMap<String, ResponseSchema>> {
    let mut resolved = IndexMap::new();
    for (status, raw) in responses {
        if status.starts_with("x-") {
            continue;
        }
        if status != "default" && status.parse::<u16>().is_err() {
            return Err(AppError::InvalidDescription(format!(
                "Response key '{}' is neither a status code nor 'default'",
                status
            )));
        }
        let response = resolve_transitively(ctx.root, raw)?;
        resolved.insert(status.clone(), resolve_response(ctx, status, response)?);
    }
    Ok(resolved)
}

fn resolve_response(
    ctx: &BodyContext<'_>,
    status: &str,
    response: &JsonValue,
) -> AppResult<ResponseSchema> {
    let mut headers = Vec::new();
    if let Some(declared) = response.get("headers").and_then(|h| h.as_object()) {
        for (name, header) in declared {
            headers.push(header_definition(name, header)?);
        }
    }

    let header_schema = build_location_schema(ctx.engine, &headers, ParameterLocation::Header)?;

    let body = response
        .get("schema")
        .map(|schema| resolve_body_schema(ctx, schema))
        .transpose()?;

    Ok(ResponseSchema {
        status: status.to_string(),
        headers,
        header_schema,
        body,
    })
}
