#![deny(missing_docs)]

//! # Operation Builder
//!
//! Turns one path-item operation into an immutable [`OperationSchema`]:
//! merged parameters, one synthesized sub-schema per non-body location, the
//! compiled body schema and the response contracts.

use crate::engine::SchemaEngine;
use crate::error::{AppError, AppResult};
use crate::oas::models::{LocationSchema, OperationSchema, ParameterDefinition, ParameterLocation};
use crate::oas::resolver::body::{resolve_body_schema, BodyContext};
use crate::oas::resolver::params::{merge_parameters, resolve_parameters};
use crate::oas::resolver::responses::resolve_responses;
use crate::oas::routes::shims::ShimOperation;
use crate::oas::validation::validate_operation_parameters;
use serde_json::{json, Map, Value as JsonValue};

/// Builds the operation schema for `(path, method)`.
///
/// `path_level` holds the already resolved parameters shared by the path item.
pub fn build_operation_schema(
    ctx: &BodyContext<'_>,
    path: &str,
    method: &str,
    path_level: &[ParameterDefinition],
    operation: &ShimOperation,
) -> AppResult<OperationSchema> {
    let method = method.to_ascii_lowercase();
    let operation_level = resolve_parameters(ctx.root, &operation.parameters)?;
    let parameters = merge_parameters(path_level.to_vec(), operation_level);
    validate_operation_parameters(path, &method, &parameters)?;

    let header_schema = build_location_schema(ctx.engine, &parameters, ParameterLocation::Header)?;
    let path_schema = build_location_schema(ctx.engine, &parameters, ParameterLocation::Path)?;
    let query_schema = build_location_schema(ctx.engine, &parameters, ParameterLocation::Query)?;

    let body_schema = match parameters
        .iter()
        .find(|p| p.location == ParameterLocation::Body)
    {
        Some(body) => {
            let schema = body.schema.as_ref().ok_or_else(|| {
                AppError::InvalidDescription(format!(
                    "Body parameter '{}' must define a schema",
                    body.name
                ))
            })?;
            Some(resolve_body_schema(ctx, schema)?)
        }
        None => None,
    };

    let responses = resolve_responses(ctx, &operation.responses)?;

    tracing::debug!(
        path = %path,
        method = %method,
        parameters = parameters.len(),
        responses = responses.len(),
        "built operation schema"
    );

    Ok(OperationSchema {
        path: path.to_string(),
        method,
        operation_id: operation.operation_id.clone(),
        parameters,
        header_schema,
        path_schema,
        query_schema,
        body_schema,
        responses,
    })
}

/// Synthesizes and compiles `{"properties": {name: constraints, ...}}` for one location.
///
/// The schema carries no `required` list: presence is checked by the validator
/// before the schema pass, so missing values never reach the engine.
pub(crate) fn build_location_schema(
    engine: &dyn SchemaEngine,
    params: &[ParameterDefinition],
    location: ParameterLocation,
) -> AppResult<LocationSchema> {
    let mut properties = Map::new();
    for param in params.iter().filter(|p| p.location == location) {
        properties.insert(
            param.name.clone(),
            JsonValue::Object(param.constraints.clone()),
        );
    }

    if properties.is_empty() {
        return Ok(LocationSchema::empty());
    }

    let schema = json!({ "properties": properties });
    let compiled = engine.compile(&schema, None)?;
    Ok(LocationSchema {
        schema,
        compiled: Some(compiled),
    })
}
