#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Resolved, ready-to-validate structures built from a Swagger 2.0 description.
//!
//! Everything here is produced once at load time and is immutable afterwards;
//! none of it carries per-request state.

use crate::engine::CompiledSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Keywords copied from a parameter definition into its location sub-schema.
pub const CONSTRAINT_KEYWORDS: [&str; 14] = [
    "type",
    "items",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "maxItems",
    "minItems",
    "uniqueItems",
    "enum",
    "multipleOf",
];

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path template segment.
    Path,
    /// Query string.
    Query,
    /// HTTP header. Names are case-insensitive.
    Header,
    /// Request body.
    Body,
}

impl ParameterLocation {
    /// The Swagger `in` value for this location.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared primitive type of a non-body parameter (or of an array item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `file` (formData only; never a JSON Schema type).
    File,
}

/// Delimiter convention for array values serialized into a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated (`foo,bar`).
    #[default]
    Csv,
    /// Space separated (`foo bar`).
    Ssv,
    /// Tab separated (`foo\tbar`).
    Tsv,
    /// Pipe separated (`foo|bar`).
    Pipes,
    /// Repeated key (`foo=a&foo=b`); already a sequence by the time it reaches us.
    Multi,
}

impl CollectionFormat {
    /// The delimiter for the format, `None` for `multi`.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            Self::Csv => Some(','),
            Self::Ssv => Some(' '),
            Self::Tsv => Some('\t'),
            Self::Pipes => Some('|'),
            Self::Multi => None,
        }
    }
}

/// Swagger 2.0 `items` object for array parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsDefinition {
    /// Item type; defaults to `string` when missing.
    #[serde(rename = "type")]
    pub item_type: Option<ParamType>,
    /// Item format modifier.
    pub format: Option<String>,
    /// Delimiter for nested arrays.
    #[serde(rename = "collectionFormat")]
    pub collection_format: Option<CollectionFormat>,
    /// Nested item schema for multi-dimensional arrays.
    pub items: Option<Box<ItemsDefinition>>,
}

impl ItemsDefinition {
    /// Item type with the `string` default applied.
    pub fn effective_type(&self) -> ParamType {
        self.item_type.unwrap_or(ParamType::String)
    }
}

/// A fully resolved parameter declaration.
///
/// Identity is `(name, location)`. Header names are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDefinition {
    /// Parameter name (lower-cased for headers).
    pub name: String,
    /// Location.
    pub location: ParameterLocation,
    /// Whether absence is an error.
    pub required: bool,
    /// Declared type; `None` for body parameters.
    pub param_type: Option<ParamType>,
    /// Format modifier (e.g. `int64`).
    pub format: Option<String>,
    /// Item definition for `array` parameters.
    pub items: Option<ItemsDefinition>,
    /// Collection format for `array` parameters.
    pub collection_format: Option<CollectionFormat>,
    /// Whether an empty value is accepted as-is.
    pub allow_empty_value: bool,
    /// Whitelisted JSON Schema keywords (see [`CONSTRAINT_KEYWORDS`]).
    pub constraints: Map<String, JsonValue>,
    /// Body schema, possibly still a `{"$ref": ...}`.
    pub schema: Option<JsonValue>,
}

impl ParameterDefinition {
    /// Identity key used for merging.
    pub fn identity(&self) -> (String, ParameterLocation) {
        (self.name.clone(), self.location)
    }

    /// Whether `name` refers to this parameter, honoring header case-insensitivity.
    pub fn matches_name(&self, name: &str) -> bool {
        match self.location {
            ParameterLocation::Header => self.name.eq_ignore_ascii_case(name),
            _ => self.name == name,
        }
    }
}

/// Discriminator metadata for one base schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorDescriptor {
    /// Property whose value names the concrete schema.
    pub field: String,
    /// Definition names accepted as values of `field`.
    pub allowed: BTreeSet<String>,
}

/// Discriminator descriptors keyed by base definition name.
pub type DiscriminatorIndex = IndexMap<String, DiscriminatorDescriptor>;

/// Synthesized sub-schema for one parameter location.
#[derive(Debug, Clone)]
pub struct LocationSchema {
    /// `{"properties": {name: constraints, ...}}`, or `{}` when no parameter contributes.
    pub schema: JsonValue,
    /// Compiled form; `None` when the schema is empty.
    pub compiled: Option<Arc<dyn CompiledSchema>>,
}

impl LocationSchema {
    /// A location schema with no properties.
    pub fn empty() -> Self {
        Self {
            schema: JsonValue::Object(Map::new()),
            compiled: None,
        }
    }

    /// Whether any parameter contributed constraints.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_none()
    }
}

/// Body schema dispatched on a discriminator value.
#[derive(Debug, Clone)]
pub struct DiscriminatedSchema {
    /// Property carrying the concrete schema name.
    pub field: String,
    /// Concrete schemas keyed by discriminator value.
    pub allowed: IndexMap<String, Arc<dyn CompiledSchema>>,
}

impl DiscriminatedSchema {
    /// Names accepted for the discriminator field.
    pub fn allowed_names(&self) -> BTreeSet<String> {
        self.allowed.keys().cloned().collect()
    }
}

/// How a body (request or response) is validated.
#[derive(Debug, Clone)]
pub enum BodySchema {
    /// A single schema.
    Plain(Arc<dyn CompiledSchema>),
    /// A polymorphic base schema with its allowed subtypes.
    Discriminated(DiscriminatedSchema),
}

/// Resolved contract for one declared response.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    /// Status key as declared (`"200"`, `"default"`, ...).
    pub status: String,
    /// Declared headers as optional header parameters.
    pub headers: Vec<ParameterDefinition>,
    /// Synthesized header sub-schema.
    pub header_schema: LocationSchema,
    /// Body schema when the response declares one.
    pub body: Option<BodySchema>,
}

/// Everything needed to validate traffic for one `(path, method)` pair.
#[derive(Debug, Clone)]
pub struct OperationSchema {
    /// Path template.
    pub path: String,
    /// Lower-case HTTP method.
    pub method: String,
    /// `operationId`, when declared.
    pub operation_id: Option<String>,
    /// Merged parameters in declaration order.
    pub parameters: Vec<ParameterDefinition>,
    /// Header sub-schema.
    pub header_schema: LocationSchema,
    /// Path sub-schema.
    pub path_schema: LocationSchema,
    /// Query sub-schema.
    pub query_schema: LocationSchema,
    /// Body schema, when a body parameter is declared.
    pub body_schema: Option<BodySchema>,
    /// Responses keyed by status (`"default"` included).
    pub responses: IndexMap<String, ResponseSchema>,
}

impl OperationSchema {
    /// The sub-schema for a non-body location.
    pub fn location_schema(&self, location: ParameterLocation) -> Option<&LocationSchema> {
        match location {
            ParameterLocation::Header => Some(&self.header_schema),
            ParameterLocation::Path => Some(&self.path_schema),
            ParameterLocation::Query => Some(&self.query_schema),
            ParameterLocation::Body => None,
        }
    }

    /// The response contract for a status code, falling back to `default`.
    pub fn response_for(&self, status: u16) -> Option<&ResponseSchema> {
        self.responses
            .get(&status.to_string())
            .or_else(|| self.responses.get("default"))
    }
}
