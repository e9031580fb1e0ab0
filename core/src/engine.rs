#![deny(missing_docs)]

//! # Schema Engine
//!
//! The constraint checker that every non-Swagger-specific check is delegated to
//! (type mismatch, required, min/max, length, pattern, enum, multipleOf, ...).
//!
//! The validator never inspects constraint keywords itself. It hands a sub-schema
//! and a value to a [`SchemaEngine`] and maps the resulting [`EngineViolation`]s
//! into its own error taxonomy.
//!
//! [`JsonSchemaEngine`] is the default implementation, backed by the `jsonschema`
//! crate and pinned to Draft 4 (the dialect Swagger 2.0 schemas are written in).

use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Category of a constraint violation, named after the JSON Schema keyword that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// `type`
    Type,
    /// `required`
    Required,
    /// `minimum`
    Minimum,
    /// `maximum`
    Maximum,
    /// `exclusiveMinimum`
    ExclusiveMinimum,
    /// `exclusiveMaximum`
    ExclusiveMaximum,
    /// `minLength`
    MinLength,
    /// `maxLength`
    MaxLength,
    /// `pattern`
    Pattern,
    /// `enum`
    Enum,
    /// `multipleOf`
    MultipleOf,
    /// `minItems`
    MinItems,
    /// `maxItems`
    MaxItems,
    /// `uniqueItems`
    UniqueItems,
    /// `minProperties`
    MinProperties,
    /// `maxProperties`
    MaxProperties,
    /// `additionalProperties`
    AdditionalProperties,
    /// `allOf`
    AllOf,
    /// `anyOf`
    AnyOf,
    /// `oneOf`
    OneOf,
    /// `not`
    Not,
    /// `format`
    Format,
    /// Any keyword without a dedicated variant.
    Other(String),
}

impl ViolationKind {
    /// Maps a JSON Schema keyword to its violation kind.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "type" => Self::Type,
            "required" => Self::Required,
            "minimum" => Self::Minimum,
            "maximum" => Self::Maximum,
            "exclusiveMinimum" => Self::ExclusiveMinimum,
            "exclusiveMaximum" => Self::ExclusiveMaximum,
            "minLength" => Self::MinLength,
            "maxLength" => Self::MaxLength,
            "pattern" => Self::Pattern,
            "enum" => Self::Enum,
            "multipleOf" => Self::MultipleOf,
            "minItems" => Self::MinItems,
            "maxItems" => Self::MaxItems,
            "uniqueItems" => Self::UniqueItems,
            "minProperties" => Self::MinProperties,
            "maxProperties" => Self::MaxProperties,
            "additionalProperties" => Self::AdditionalProperties,
            "allOf" => Self::AllOf,
            "anyOf" => Self::AnyOf,
            "oneOf" => Self::OneOf,
            "not" => Self::Not,
            "format" => Self::Format,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A single violation reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineViolation {
    /// Which constraint failed.
    pub kind: ViolationKind,
    /// JSON Pointer to the offending value inside the validated instance (`""` is the root).
    pub instance_path: String,
    /// JSON Pointer to the failing keyword inside the schema.
    pub schema_path: String,
    /// The keyword's value in the schema (the limit, the pattern, the enum options...).
    /// `Null` when the keyword could not be located (e.g. behind a `$ref`).
    pub expected: JsonValue,
    /// The offending instance value.
    pub actual: JsonValue,
    /// Human-readable message produced by the engine.
    pub message: String,
}

/// A schema compiled once and applied to many values.
pub trait CompiledSchema: Send + Sync + fmt::Debug {
    /// The schema document this was compiled from (definitions included).
    fn schema(&self) -> &JsonValue;

    /// Returns every violation of `instance`; empty when the value conforms.
    fn validate(&self, instance: &JsonValue) -> Vec<EngineViolation>;
}

/// Capability that turns a sub-schema into a [`CompiledSchema`].
///
/// Implementations must be pure: compiling and validating never perform I/O.
pub trait SchemaEngine: Send + Sync {
    /// Compiles `schema`. When `definitions` is given, local `#/definitions/...`
    /// references inside the schema resolve against it.
    fn compile(
        &self,
        schema: &JsonValue,
        definitions: Option<&JsonValue>,
    ) -> AppResult<Arc<dyn CompiledSchema>>;

    /// One-shot form: compile `schema` and validate `value` against it.
    fn validate(
        &self,
        schema: &JsonValue,
        definitions: Option<&JsonValue>,
        value: &JsonValue,
    ) -> AppResult<Vec<EngineViolation>> {
        Ok(self.compile(schema, definitions)?.validate(value))
    }
}

/// Default engine backed by the `jsonschema` crate (Draft 4).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine;

impl JsonSchemaEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaEngine for JsonSchemaEngine {
    fn compile(
        &self,
        schema: &JsonValue,
        definitions: Option<&JsonValue>,
    ) -> AppResult<Arc<dyn CompiledSchema>> {
        let document = attach_definitions(schema, definitions);

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft4);
        let validator = opts
            .build(&document)
            .map_err(|e| AppError::Schema(format!("{} (schema: {})", e, schema)))?;

        Ok(Arc::new(DraftFourSchema {
            document,
            validator,
        }))
    }
}

/// Copies `definitions` into the root of `schema` so `#/definitions/...` pointers resolve.
///
/// An existing `definitions` key on the schema is left untouched.
fn attach_definitions(schema: &JsonValue, definitions: Option<&JsonValue>) -> JsonValue {
    let mut document = schema.clone();
    if let (Some(defs), JsonValue::Object(map)) = (definitions, &mut document) {
        if !map.contains_key("definitions") {
            map.insert("definitions".to_string(), defs.clone());
        }
    }
    document
}

struct DraftFourSchema {
    document: JsonValue,
    validator: jsonschema::Validator,
}

// Manual Debug: the compiled validator is opaque.
impl fmt::Debug for DraftFourSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftFourSchema")
            .field("document", &self.document)
            .finish()
    }
}

impl CompiledSchema for DraftFourSchema {
    fn schema(&self) -> &JsonValue {
        &self.document
    }

    fn validate(&self, instance: &JsonValue) -> Vec<EngineViolation> {
        self.validator
            .iter_errors(instance)
            .map(|e| {
                let message = e.to_string();
                let schema_path = e.schema_path.to_string();
                let keyword = schema_path.rsplit('/').next().unwrap_or_default();
                EngineViolation {
                    kind: ViolationKind::from_keyword(keyword),
                    instance_path: e.instance_path.to_string(),
                    expected: self
                        .document
                        .pointer(&schema_path)
                        .cloned()
                        .unwrap_or(JsonValue::Null),
                    actual: e.instance.clone().into_owned(),
                    schema_path,
                    message,
                }
            })
            .collect()
    }
}
