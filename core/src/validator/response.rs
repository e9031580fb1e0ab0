//! # Response Validation
//!
//! Checks a response against the contract its status selects: the exact status
//! code first, then `default`. Declared headers are optional; a declared body
//! schema makes the body mandatory.

use crate::exchange::Response;
use crate::oas::models::{OperationSchema, ParameterLocation};
use crate::validator::errors::{Rejection, ValidationError};
use crate::validator::request::{check_parameter, validate_body, validate_location, Presence};
use serde_json::Map;

/// Validates `response` against `operation`.
pub fn validate_response(operation: &OperationSchema, response: &Response) -> Result<(), Rejection> {
    let Some(contract) = operation.response_for(response.status) else {
        return Err(Rejection::Invalid(vec![ValidationError::UnexpectedStatus {
            status: response.status,
        }]));
    };

    let mut errors = Vec::new();
    let mut instance = Map::new();
    for header in &contract.headers {
        if let Presence::Coerced { value, .. } = check_parameter(header, &response.headers, &mut errors)
        {
            instance.insert(header.name.clone(), value);
        }
    }
    errors.extend(validate_location(
        ParameterLocation::Header,
        &contract.header_schema,
        instance,
    ));

    if let Some(schema) = &contract.body {
        match &response.body {
            Some(body) => errors.extend(validate_body(schema, body, "body")),
            None => errors.push(ValidationError::missing(ParameterLocation::Body, "body")),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            path = %operation.path,
            method = %operation.method,
            status = response.status,
            errors = errors.len(),
            "response rejected"
        );
        Err(Rejection::Invalid(errors))
    }
}
