#![deny(missing_docs)]

//! # Route Shims
//!
//! Intermediate deserialization layer for the parts of a Swagger 2.0 document
//! the validator needs. Parameters, schemas, and responses stay as raw JSON so
//! the resolver can follow `$ref`s against the root document.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Represents the Paths Object with support for vendor extensions.
#[derive(Debug, Clone, Default)]
pub struct ShimPaths {
    /// Parsed path items keyed by path template, in declaration order.
    pub items: IndexMap<String, ShimPathItem>,
    /// Vendor extensions attached to the Paths Object (x-...).
    pub extensions: Map<String, Value>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();
        let mut extensions = Map::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                extensions.insert(key, value);
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items, extensions })
    }
}

/// Schema for the root document.
#[derive(Debug, Clone, Deserialize)]
pub struct ShimSwagger {
    /// Swagger version; must be "2.0" when present.
    pub swagger: Option<String>,

    /// Base path prepended to every path template on the wire.
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,

    /// Path items.
    #[serde(default)]
    pub paths: ShimPaths,

    /// Reusable schemas.
    #[serde(default)]
    pub definitions: Map<String, Value>,
}

/// A Path Item: shared parameters plus one operation per method.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimPathItem {
    /// Local `$ref` to another path item.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// Parameters shared by every operation on this path.
    #[serde(default)]
    pub parameters: Vec<Value>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// OPTIONS operation.
    pub options: Option<ShimOperation>,
    /// HEAD operation.
    pub head: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
}

impl ShimPathItem {
    /// Declared operations as `(lower-case method, operation)` pairs.
    pub fn operations(&self) -> Vec<(&'static str, &ShimOperation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|o| (method, o)))
        .collect()
    }
}

/// A single operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOperation {
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Operation-specific parameters.
    #[serde(default)]
    pub parameters: Vec<Value>,
    /// Responses keyed by status code or `default`; extensions (`x-...`) are ignored.
    #[serde(default)]
    pub responses: IndexMap<String, Value>,
}
