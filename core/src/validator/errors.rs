#![deny(missing_docs)]

//! # Validation Errors
//!
//! Per-request outcomes. Routing failures ([`Rejection::PathNotFound`],
//! [`Rejection::MethodNotAllowed`]) are terminal and carry nothing else; every
//! other failure is accumulated into [`Rejection::Invalid`].

use crate::engine::{EngineViolation, ViolationKind};
use crate::oas::models::ParameterLocation;
use derive_more::Display;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// Expected/actual payload of a constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationDetails {
    /// The failing keyword's value in the schema (limit, pattern, enum options...).
    pub expected: JsonValue,
    /// The offending value.
    pub actual: JsonValue,
    /// Human-readable description.
    pub message: String,
}

/// One problem found in a request or response.
#[derive(Debug, Clone, PartialEq, Serialize, Display)]
#[serde(tag = "error")]
pub enum ValidationError {
    /// A required value is absent.
    #[display("missing {location} parameter '{name}'")]
    MissingParameter {
        /// Where it was expected.
        location: ParameterLocation,
        /// Parameter name.
        name: String,
    },

    /// A value is present but empty and `allowEmptyValue` is not set.
    #[display("empty {location} parameter '{name}'")]
    EmptyParameter {
        /// Where it was found.
        location: ParameterLocation,
        /// Parameter name.
        name: String,
    },

    /// A polymorphic body names a schema outside the allowed set.
    #[display("discriminator '{field}' does not name an allowed schema")]
    InvalidDiscriminator {
        /// Always [`ParameterLocation::Body`].
        location: ParameterLocation,
        /// The discriminator property.
        field: String,
        /// Accepted values.
        allowed: BTreeSet<String>,
    },

    /// The engine rejected a value.
    #[display("{location} parameter '{name}' at '{path}': {}", details.message)]
    SchemaViolation {
        /// Location of the parameter.
        location: ParameterLocation,
        /// Parameter name (the body parameter's name for body violations).
        name: String,
        /// JSON Pointer into the validated value.
        path: String,
        /// Violated constraint.
        kind: ViolationKind,
        /// Expected and actual values.
        details: ViolationDetails,
    },

    /// A response status with no matching response declaration and no `default`.
    #[display("status {status} is not declared")]
    UnexpectedStatus {
        /// The response status.
        status: u16,
    },
}

impl ValidationError {
    pub(crate) fn missing(location: ParameterLocation, name: &str) -> Self {
        Self::MissingParameter {
            location,
            name: name.to_string(),
        }
    }

    pub(crate) fn empty(location: ParameterLocation, name: &str) -> Self {
        Self::EmptyParameter {
            location,
            name: name.to_string(),
        }
    }

    pub(crate) fn from_violation(
        location: ParameterLocation,
        name: &str,
        violation: EngineViolation,
    ) -> Self {
        Self::SchemaViolation {
            location,
            name: name.to_string(),
            path: violation.instance_path,
            kind: violation.kind,
            details: ViolationDetails {
                expected: violation.expected,
                actual: violation.actual,
                message: violation.message,
            },
        }
    }

    /// The location the error refers to, if any.
    pub fn location(&self) -> Option<ParameterLocation> {
        match self {
            Self::MissingParameter { location, .. }
            | Self::EmptyParameter { location, .. }
            | Self::InvalidDiscriminator { location, .. }
            | Self::SchemaViolation { location, .. } => Some(*location),
            Self::UnexpectedStatus { .. } => None,
        }
    }
}

/// Why a request or response was not accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Display)]
pub enum Rejection {
    /// No path template equals the request path.
    #[display("no operation is declared for path '{path}'")]
    PathNotFound {
        /// The request path.
        path: String,
    },

    /// The path exists but does not declare the method.
    #[display("method '{method}' is not declared for path '{path}'")]
    MethodNotAllowed {
        /// The request path.
        path: String,
        /// The request method.
        method: String,
    },

    /// Every presence, discriminator and constraint error found.
    #[display("{} validation error(s)", _0.len())]
    Invalid(Vec<ValidationError>),
}

impl Rejection {
    /// The accumulated errors; empty for routing failures.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

impl std::error::Error for Rejection {}
