#![deny(missing_docs)]

//! # Swagger 2.0 Description Module
//!
//! - **models**: Resolved, ready-to-validate structures.
//! - **resolver**: Reference, parameter, discriminator, body and response resolution.
//! - **routes**: Path item parsing and the resolved operation table.
//! - **validation**: Structural checks run at load time.

pub mod models;
pub(crate) mod normalization;
pub(crate) mod ref_utils;
pub mod resolver;
pub mod routes;
pub(crate) mod validation;

use crate::engine::SchemaEngine;
use crate::error::{AppError, AppResult};
use crate::oas::routes::shims::{ShimPathItem, ShimSwagger};
use crate::oas::validation::validate_swagger_root;
use serde_json::{Map, Value as JsonValue};

pub use models::{
    BodySchema, CollectionFormat, DiscriminatorDescriptor, DiscriminatorIndex, ItemsDefinition,
    LocationSchema, OperationSchema, ParamType, ParameterDefinition, ParameterLocation,
    ResponseSchema,
};
pub use routes::ResolvedDescription;

/// A loaded, not yet resolved API description.
///
/// Keeps the raw document (for `$ref` resolution) next to the typed view of
/// its `paths` and `definitions`.
#[derive(Debug, Clone)]
pub struct Description {
    raw: JsonValue,
    swagger: ShimSwagger,
}

impl Description {
    /// Parses a YAML (or JSON, which YAML accepts) description.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let raw: JsonValue = serde_yaml::from_str(content)
            .map_err(|e| AppError::General(format!("Failed to parse description YAML: {}", e)))?;
        Self::from_json(raw)
    }

    /// Wraps an already deserialized description.
    pub fn from_json(raw: JsonValue) -> AppResult<Self> {
        if !raw.is_object() {
            return Err(AppError::InvalidDescription(
                "description root must be an object".into(),
            ));
        }
        let swagger: ShimSwagger = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::InvalidDescription(format!("{}", e)))?;
        validate_swagger_root(&swagger)?;
        Ok(Self { raw, swagger })
    }

    /// The raw document.
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    /// The `basePath`, if declared.
    pub fn base_path(&self) -> Option<&str> {
        self.swagger.base_path.as_deref()
    }

    /// Reusable schemas keyed by definition name.
    pub fn definitions(&self) -> &Map<String, JsonValue> {
        &self.swagger.definitions
    }

    /// Path items in declaration order (extensions excluded).
    pub fn path_items(&self) -> impl Iterator<Item = (&String, &ShimPathItem)> {
        self.swagger.paths.items.iter()
    }

    /// Builds the operation table with `engine`.
    pub fn resolve(&self, engine: &dyn SchemaEngine) -> AppResult<ResolvedDescription> {
        ResolvedDescription::build(self, engine)
    }
}
