#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for turning a loaded [`Description`] into the resolved operation table.
//! Orchestrates Shims -> Resolver -> Builder -> [`OperationSchema`]s.
//!
//! The table is built once per description and is read-only afterwards; it can be
//! shared across threads and used for any number of validations.

pub mod builder;
pub mod shims;

use crate::engine::SchemaEngine;
use crate::error::{AppError, AppResult};
use crate::exchange::{Request, Response};
use crate::oas::models::OperationSchema;
use crate::oas::normalization::normalize_nullable_schemas;
use crate::oas::resolver::body::BodyContext;
use crate::oas::resolver::discriminator::expand_discriminators;
use crate::oas::resolver::params::resolve_parameters;
use crate::oas::resolver::refs::resolve_reference;
use crate::oas::routes::builder::build_operation_schema;
use crate::oas::routes::shims::ShimPathItem;
use crate::oas::validation::validate_discriminators;
use crate::oas::Description;
use crate::validator::{self, Rejection};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::borrow::Cow;

/// Every operation of a description, ready to validate traffic.
#[derive(Debug, Clone)]
pub struct ResolvedDescription {
    base_path: Option<String>,
    operations: IndexMap<String, IndexMap<String, OperationSchema>>,
}

impl ResolvedDescription {
    /// Resolves every path item and operation of `description`.
    ///
    /// Any unresolvable reference or structural contract violation aborts the build.
    pub fn build(description: &Description, engine: &dyn SchemaEngine) -> AppResult<Self> {
        let root = description.raw();

        validate_discriminators(description.definitions())?;
        let discriminators = expand_discriminators(description.definitions())?;

        let mut definitions = JsonValue::Object(description.definitions().clone());
        normalize_nullable_schemas(&mut definitions);

        let ctx = BodyContext {
            root,
            definitions: &definitions,
            discriminators: &discriminators,
            engine,
        };

        let mut operations = IndexMap::new();
        for (path, item) in description.path_items() {
            let item = resolve_path_item(root, path, item)?;
            let path_level = resolve_parameters(root, &item.parameters)?;

            let mut methods = IndexMap::new();
            for (method, operation) in item.operations() {
                let schema = build_operation_schema(&ctx, path, method, &path_level, operation)?;
                methods.insert(method.to_string(), schema);
            }
            operations.insert(path.clone(), methods);
        }

        Ok(Self {
            base_path: description.base_path().map(str::to_string),
            operations,
        })
    }

    /// The description's `basePath`, if declared.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Iterates `(path, method, operation)` in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &OperationSchema)> {
        self.operations.iter().flat_map(|(path, methods)| {
            methods
                .iter()
                .map(move |(method, op)| (path.as_str(), method.as_str(), op))
        })
    }

    /// Number of operations across all paths.
    pub fn len(&self) -> usize {
        self.operations.values().map(IndexMap::len).sum()
    }

    /// Whether the description declares no operations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the operation for an exact path template and a method (any case).
    pub fn operation(&self, path: &str, method: &str) -> Option<&OperationSchema> {
        self.lookup(path, method).ok()
    }

    /// Routes to an operation, reporting which lookup step failed.
    pub fn lookup(&self, path: &str, method: &str) -> Result<&OperationSchema, Rejection> {
        let methods = self
            .operations
            .get(path)
            .ok_or_else(|| Rejection::PathNotFound {
                path: path.to_string(),
            })?;
        methods
            .get(method.to_ascii_lowercase().as_str())
            .ok_or_else(|| Rejection::MethodNotAllowed {
                path: path.to_string(),
                method: method.to_string(),
            })
    }

    /// Validates a request, returning its sanitized, type-coerced copy.
    pub fn validate_request(&self, request: &Request) -> Result<Request, Rejection> {
        let operation = self.lookup(&request.path, &request.method)?;
        validator::validate_request(operation, request)
    }

    /// Validates a response against the operation its request was routed to.
    pub fn validate_response(&self, response: &Response) -> Result<(), Rejection> {
        let operation = self.lookup(&response.request.path, &response.request.method)?;
        validator::validate_response(operation, response)
    }
}

/// Follows a path item `$ref`; sibling fields are not merged in.
fn resolve_path_item<'a>(
    root: &JsonValue,
    path: &str,
    item: &'a ShimPathItem,
) -> AppResult<Cow<'a, ShimPathItem>> {
    let Some(pointer) = &item.ref_path else {
        return Ok(Cow::Borrowed(item));
    };
    let target = resolve_reference(root, pointer)?;
    let resolved: ShimPathItem = serde_json::from_value(target.clone()).map_err(|e| {
        AppError::InvalidDescription(format!(
            "Path item '{}' references malformed '{}': {}",
            path, pointer, e
        ))
    })?;
    if resolved.ref_path.is_some() {
        return Err(AppError::InvalidDescription(format!(
            "Path item '{}' references another reference '{}'",
            path, pointer
        )));
    }
    Ok(Cow::Owned(resolved))
}
