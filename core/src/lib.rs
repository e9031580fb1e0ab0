#![deny(missing_docs)]

//! # oasgate Core
//!
//! Validates HTTP requests and responses against a Swagger 2.0 description.
//!
//! A [`Description`] is resolved once into a [`ResolvedDescription`]: one
//! immutable [`OperationSchema`] per `(path, method)`. Each request is then
//! routed, coerced from its wire representation and checked, producing either a
//! sanitized copy or every [`ValidationError`] at once.

/// Shared error types.
pub mod error;

/// Constraint checking capability.
pub mod engine;

/// Request and response values.
pub mod exchange;

/// Swagger 2.0 description loading and resolution.
pub mod oas;

/// Request and response validation.
pub mod validator;

pub use engine::{CompiledSchema, EngineViolation, JsonSchemaEngine, SchemaEngine, ViolationKind};
pub use error::{AppError, AppResult};
pub use exchange::{ParamMap, Request, Response};
pub use oas::resolver::{
    expand_discriminators, merge_parameters, resolve_reference, resolve_transitively,
};
pub use oas::routes::builder::build_operation_schema;
pub use oas::{
    BodySchema, CollectionFormat, Description, OperationSchema, ParamType, ParameterDefinition,
    ParameterLocation, ResolvedDescription,
};
pub use validator::{coerce_parameter, Rejection, ValidationError, ViolationDetails};
