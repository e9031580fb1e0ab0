#![deny(missing_docs)]

//! # Description Validation
//!
//! Structural checks run once while a description is loaded, before any
//! operation schema is built.
//!
//! Enforced rules:
//! - `swagger`, when present, must be `"2.0"`.
//! - Every `{name}` in a path template is declared as a `path` parameter, and
//!   every declared `path` parameter appears in the template.
//! - An operation declares at most one `body` parameter.
//! - A discriminator property is listed in its schema's `required` and `properties`.

use crate::error::{AppError, AppResult};
use crate::oas::models::{ParameterDefinition, ParameterLocation};
use crate::oas::resolver::discriminator::discriminator_field;
use crate::oas::routes::shims::ShimSwagger;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;

const TEMPLATE_PARAM_PATTERN: &str = r"\{([^}]+)\}";

/// Validates root-level fields.
pub(crate) fn validate_swagger_root(swagger: &ShimSwagger) -> AppResult<()> {
    if let Some(version) = &swagger.swagger {
        if version != "2.0" {
            return Err(AppError::InvalidDescription(format!(
                "Unsupported Swagger version: {}. Only 2.0 is supported.",
                version
            )));
        }
    }
    if let Some(base_path) = &swagger.base_path {
        if !base_path.starts_with('/') {
            return Err(AppError::InvalidDescription(format!(
                "basePath '{}' must start with '/'",
                base_path
            )));
        }
    }
    Ok(())
}

/// Names of the `{...}` segments of a path template, in order of appearance.
pub(crate) fn template_parameters(path: &str) -> AppResult<Vec<String>> {
    let re = Regex::new(TEMPLATE_PARAM_PATTERN)
        .map_err(|e| AppError::General(format!("Invalid template pattern: {}", e)))?;
    Ok(re
        .captures_iter(path)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect())
}

/// Validates the merged parameter list of one operation.
pub(crate) fn validate_operation_parameters(
    path: &str,
    method: &str,
    params: &[ParameterDefinition],
) -> AppResult<()> {
    let templated: BTreeSet<String> = template_parameters(path)?.into_iter().collect();
    let declared: BTreeSet<String> = params
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
        .map(|p| p.name.clone())
        .collect();

    if let Some(missing) = templated.difference(&declared).next() {
        return Err(AppError::InvalidDescription(format!(
            "{} {}: template parameter '{{{}}}' is not declared as a path parameter",
            method.to_ascii_uppercase(),
            path,
            missing
        )));
    }
    if let Some(extra) = declared.difference(&templated).next() {
        return Err(AppError::InvalidDescription(format!(
            "{} {}: path parameter '{}' does not appear in the template",
            method.to_ascii_uppercase(),
            path,
            extra
        )));
    }

    let bodies = params
        .iter()
        .filter(|p| p.location == ParameterLocation::Body)
        .count();
    if bodies > 1 {
        return Err(AppError::InvalidDescription(format!(
            "{} {}: at most one body parameter is allowed, found {}",
            method.to_ascii_uppercase(),
            path,
            bodies
        )));
    }

    Ok(())
}

/// Validates discriminator wiring across `definitions`.
pub(crate) fn validate_discriminators(definitions: &Map<String, JsonValue>) -> AppResult<()> {
    for (name, schema) in definitions {
        let Some(field) = discriminator_field(schema)? else {
            continue;
        };

        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .is_some_and(|r| r.iter().any(|v| v.as_str() == Some(field.as_str())));
        if !required {
            return Err(AppError::InvalidDescription(format!(
                "Definition '{}': discriminator '{}' must be listed in 'required'",
                name, field
            )));
        }

        let declared = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .is_some_and(|p| p.contains_key(&field));
        if !declared {
            return Err(AppError::InvalidDescription(format!(
                "Definition '{}': discriminator '{}' must be declared in 'properties'",
                name, field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::resolver::params::resolve_parameters;
    use serde_json::json;

    fn params(raw: JsonValue) -> Vec<ParameterDefinition> {
        let list = raw.as_array().cloned().unwrap_or_default();
        resolve_parameters(&json!({}), &list).unwrap()
    }

    fn swagger(raw: JsonValue) -> ShimSwagger {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_swagger_version() {
        assert!(validate_swagger_root(&swagger(json!({"swagger": "2.0"}))).is_ok());
        assert!(validate_swagger_root(&swagger(json!({}))).is_ok());
        let err = validate_swagger_root(&swagger(json!({"swagger": "3.0.0"}))).unwrap_err();
        assert!(format!("{err}").contains("Unsupported Swagger version"));
    }

    #[test]
    fn test_base_path_must_be_absolute() {
        let err =
            validate_swagger_root(&swagger(json!({"swagger": "2.0", "basePath": "v1"}))).unwrap_err();
        assert!(matches!(err, AppError::InvalidDescription(_)));
    }

    #[test]
    fn test_template_parameters() {
        assert_eq!(
            template_parameters("/items/{SCOPE}/{item_id}").unwrap(),
            vec!["SCOPE", "item_id"]
        );
        assert!(template_parameters("/health").unwrap().is_empty());
    }

    #[test]
    fn test_template_matches_declared_path_params() {
        let declared = params(json!([
            {"name": "SCOPE", "in": "path", "required": true, "type": "string"},
            {"name": "item_id", "in": "path", "required": true, "type": "integer"}
        ]));
        assert!(validate_operation_parameters("/items/{SCOPE}/{item_id}", "post", &declared).is_ok());
    }

    #[test]
    fn test_undeclared_template_parameter() {
        let declared = params(json!([
            {"name": "SCOPE", "in": "path", "required": true, "type": "string"}
        ]));
        let err =
            validate_operation_parameters("/items/{SCOPE}/{item_id}", "get", &declared).unwrap_err();
        assert!(format!("{err}").contains("'{item_id}' is not declared"));
    }

    #[test]
    fn test_path_parameter_outside_template() {
        let declared = params(json!([
            {"name": "id", "in": "path", "required": true, "type": "string"}
        ]));
        let err = validate_operation_parameters("/items", "get", &declared).unwrap_err();
        assert!(format!("{err}").contains("does not appear in the template"));
    }

    #[test]
    fn test_template_names_are_case_sensitive() {
        let declared = params(json!([
            {"name": "scope", "in": "path", "required": true, "type": "string"}
        ]));
        assert!(validate_operation_parameters("/items/{SCOPE}", "get", &declared).is_err());
    }

    #[test]
    fn test_single_body_parameter() {
        let declared = params(json!([
            {"name": "a", "in": "body", "schema": {"type": "object"}},
            {"name": "b", "in": "body", "schema": {"type": "object"}}
        ]));
        let err = validate_operation_parameters("/items", "post", &declared).unwrap_err();
        assert!(format!("{err}").contains("at most one body parameter"));
    }

    #[test]
    fn test_discriminator_must_be_required_and_declared() {
        let ok = json!({
            "Item": {
                "discriminator": "type",
                "required": ["type"],
                "properties": {"type": {"type": "string"}}
            }
        });
        assert!(validate_discriminators(ok.as_object().unwrap()).is_ok());

        let not_required = json!({
            "Item": {"discriminator": "type", "properties": {"type": {"type": "string"}}}
        });
        let err = validate_discriminators(not_required.as_object().unwrap()).unwrap_err();
        assert!(format!("{err}").contains("'required'"));

        let not_declared = json!({
            "Item": {"discriminator": "type", "required": ["type"]}
        });
        let err = validate_discriminators(not_declared.as_object().unwrap()).unwrap_err();
        assert!(format!("{err}").contains("'properties'"));
    }
}
