#![deny(missing_docs)]

//! # Schema Normalization
//!
//! Rewrites Swagger-only schema flags into plain JSON Schema before a schema is
//! handed to the engine. Conservative: only known compatibility gaps are touched.

use serde_json::{json, Map, Value};

/// Normalizes `x-nullable` schema flags into JSON Schema null unions.
///
/// Swagger 2.0 has no way to express nullability, so descriptions use the
/// `x-nullable: true` vendor extension. Draft 4 expresses it with a `type` union.
///
/// The flag is rewritten into a `type` union where possible, or the schema is
/// wrapped in `anyOf` when no explicit `type` is present (e.g. a `$ref`).
pub(crate) fn normalize_nullable_schemas(value: &mut Value) {
    if let Value::Object(map) = value {
        if let Some(replacement) = apply_nullable_flag(map) {
            *value = replacement;
        }
    }

    match value {
        Value::Object(map) => {
            for v in map.values_mut() {
                normalize_nullable_schemas(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                normalize_nullable_schemas(v);
            }
        }
        _ => {}
    }
}

fn apply_nullable_flag(map: &mut Map<String, Value>) -> Option<Value> {
    let nullable = map
        .get("x-nullable")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if !nullable {
        return None;
    }

    map.remove("x-nullable");

    if let Some(type_val) = map.get_mut("type") {
        match type_val {
            Value::String(s) => {
                if s != "null" {
                    *type_val = Value::Array(vec![
                        Value::String(s.clone()),
                        Value::String("null".to_string()),
                    ]);
                }
            }
            Value::Array(arr) => {
                let has_null = arr.iter().any(|v| v.as_str() == Some("null"));
                if !has_null {
                    arr.push(Value::String("null".to_string()));
                }
            }
            _ => {}
        }
        return None;
    }

    let original = Value::Object(map.clone());
    Some(json!({ "anyOf": [original, { "type": "null" }] }))
}
