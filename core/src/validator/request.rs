//! # Request Validation
//!
//! Runs one request against its [`OperationSchema`]:
//!
//! 1. Presence pass over the merged parameters in declaration order: missing and
//!    empty values are reported, everything else is coerced into a working copy.
//! 2. Schema pass over header, path and query (in that order), then the body.
//!    Fields that failed the presence pass, or were passed through because
//!    `allowEmptyValue` is set, are left out of the validated instance.
//!
//! Routing happens before this module is reached.

use crate::exchange::{ParamMap, Request};
use crate::oas::models::{
    BodySchema, LocationSchema, OperationSchema, ParameterDefinition, ParameterLocation,
};
use crate::oas::ref_utils::unescape_pointer_segment;
use crate::validator::coercion::coerce_parameter;
use crate::validator::errors::{Rejection, ValidationError};
use serde_json::{Map, Value as JsonValue};

const SCHEMA_PASS_ORDER: [ParameterLocation; 3] = [
    ParameterLocation::Header,
    ParameterLocation::Path,
    ParameterLocation::Query,
];

/// Result of the presence check for one non-body parameter.
#[derive(Debug)]
pub(crate) enum Presence {
    /// Absent from the map (an error was recorded if it is required).
    Absent,
    /// Present but empty, and not accepted.
    Rejected,
    /// Present but empty and accepted as-is; excluded from the schema pass.
    PassThrough,
    /// Present and coerced; `key` is the request's own spelling of the name.
    Coerced {
        /// Map key the value was found under.
        key: String,
        /// Coerced value.
        value: JsonValue,
    },
}

/// Validates `request` against `operation`, returning the sanitized copy.
pub fn validate_request(
    operation: &OperationSchema,
    request: &Request,
) -> Result<Request, Rejection> {
    let mut sanitized = request.clone();
    let mut errors = Vec::new();
    let mut instances: [Map<String, JsonValue>; 3] = Default::default();
    let mut body_checked = false;

    for param in &operation.parameters {
        let Some(map) = params_for(request, param.location) else {
            body_checked = check_body(param, request.body.as_ref(), &mut errors);
            continue;
        };

        match check_parameter(param, map, &mut errors) {
            Presence::Coerced { key, value } => {
                if let Some(target) = params_for_mut(&mut sanitized, param.location) {
                    target.insert(key, value.clone());
                }
                if let Some(slot) = instance_slot(param.location) {
                    instances[slot].insert(param.name.clone(), value);
                }
            }
            Presence::Absent | Presence::Rejected | Presence::PassThrough => {}
        }
    }

    for (slot, location) in SCHEMA_PASS_ORDER.into_iter().enumerate() {
        if let Some(schema) = operation.location_schema(location) {
            let instance = std::mem::take(&mut instances[slot]);
            errors.extend(validate_location(location, schema, instance));
        }
    }

    if body_checked {
        if let (Some(schema), Some(body), Some(param)) = (
            operation.body_schema.as_ref(),
            request.body.as_ref(),
            body_parameter(operation),
        ) {
            errors.extend(validate_body(schema, body, &param.name));
        }
    }

    if errors.is_empty() {
        Ok(sanitized)
    } else {
        tracing::debug!(
            path = %operation.path,
            method = %operation.method,
            errors = errors.len(),
            "request rejected"
        );
        Err(Rejection::Invalid(errors))
    }
}

/// Presence check and coercion for one path, query or header parameter.
pub(crate) fn check_parameter(
    param: &ParameterDefinition,
    map: &ParamMap,
    errors: &mut Vec<ValidationError>,
) -> Presence {
    let Some((key, raw)) = find_value(param, map) else {
        if param.required {
            errors.push(ValidationError::missing(param.location, &param.name));
        }
        return Presence::Absent;
    };

    if is_empty(raw) {
        if param.allow_empty_value {
            return Presence::PassThrough;
        }
        errors.push(ValidationError::empty(param.location, &param.name));
        return Presence::Rejected;
    }

    Presence::Coerced {
        key: key.clone(),
        value: coerce_parameter(param, raw.clone()),
    }
}

/// Validates one location's collected values against its synthesized sub-schema.
///
/// Engine paths start at the parameter name (`/item_id`, `/tags/1`); the first
/// segment, with pointer escapes undone, names the parameter.
pub(crate) fn validate_location(
    location: ParameterLocation,
    schema: &LocationSchema,
    instance: Map<String, JsonValue>,
) -> Vec<ValidationError> {
    let Some(compiled) = &schema.compiled else {
        return Vec::new();
    };
    compiled
        .validate(&JsonValue::Object(instance))
        .into_iter()
        .map(|violation| {
            let name = violation
                .instance_path
                .trim_start_matches('/')
                .split('/')
                .next()
                .map(unescape_pointer_segment)
                .unwrap_or_default();
            ValidationError::from_violation(location, &name, violation)
        })
        .collect()
}

/// Validates a present body, dispatching on the discriminator when there is one.
///
/// Violations keep the engine's native JSON Pointer paths.
pub(crate) fn validate_body(
    schema: &BodySchema,
    body: &JsonValue,
    name: &str,
) -> Vec<ValidationError> {
    let compiled = match schema {
        BodySchema::Plain(compiled) => compiled,
        BodySchema::Discriminated(discriminated) => {
            let selected = body
                .get(&discriminated.field)
                .and_then(JsonValue::as_str)
                .and_then(|value| discriminated.allowed.get(value));
            match selected {
                Some(compiled) => compiled,
                None => {
                    return vec![ValidationError::InvalidDiscriminator {
                        location: ParameterLocation::Body,
                        field: discriminated.field.clone(),
                        allowed: discriminated.allowed_names(),
                    }]
                }
            }
        }
    };

    compiled
        .validate(body)
        .into_iter()
        .map(|violation| ValidationError::from_violation(ParameterLocation::Body, name, violation))
        .collect()
}

/// Presence check for the body parameter; `true` when the body should be validated.
fn check_body(
    param: &ParameterDefinition,
    body: Option<&JsonValue>,
    errors: &mut Vec<ValidationError>,
) -> bool {
    match body {
        None => {
            if param.required {
                errors.push(ValidationError::missing(ParameterLocation::Body, &param.name));
            }
            false
        }
        Some(value) if is_empty(value) => {
            if param.required && !param.allow_empty_value {
                errors.push(ValidationError::empty(ParameterLocation::Body, &param.name));
            }
            false
        }
        Some(_) => true,
    }
}

/// Looks a parameter up by name; headers match case-insensitively, exact spelling first.
pub(crate) fn find_value<'a>(
    param: &ParameterDefinition,
    map: &'a ParamMap,
) -> Option<(&'a String, &'a JsonValue)> {
    if let Some(found) = map.get_key_value(&param.name) {
        return Some(found);
    }
    if param.location != ParameterLocation::Header {
        return None;
    }
    map.iter().find(|(key, _)| param.matches_name(key))
}

fn is_empty(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

fn body_parameter(operation: &OperationSchema) -> Option<&ParameterDefinition> {
    operation
        .parameters
        .iter()
        .find(|p| p.location == ParameterLocation::Body)
}

fn instance_slot(location: ParameterLocation) -> Option<usize> {
    SCHEMA_PASS_ORDER.iter().position(|l| *l == location)
}

/// The request map for a location; the body has none.
fn params_for(request: &Request, location: ParameterLocation) -> Option<&ParamMap> {
    match location {
        ParameterLocation::Header => Some(&request.header_params),
        ParameterLocation::Path => Some(&request.path_params),
        ParameterLocation::Query => Some(&request.query_params),
        ParameterLocation::Body => None,
    }
}

fn params_for_mut(request: &mut Request, location: ParameterLocation) -> Option<&mut ParamMap> {
    match location {
        ParameterLocation::Header => Some(&mut request.header_params),
        ParameterLocation::Path => Some(&mut request.path_params),
        ParameterLocation::Query => Some(&mut request.query_params),
        ParameterLocation::Body => None,
    }
}
