//! # Parameter Coercion
//!
//! Converts wire representations (strings, delimited lists) into the declared
//! parameter type. Coercion never fails: a value that cannot be converted is
//! returned unchanged and the schema pass reports the type mismatch.

use crate::oas::models::{CollectionFormat, ItemsDefinition, ParamType, ParameterDefinition};
use serde_json::{Number, Value as JsonValue};

/// Coerces a raw path, query or header value according to its declaration.
///
/// Already typed values pass through, so coercing a sanitized value is a no-op.
pub fn coerce_parameter(param: &ParameterDefinition, value: JsonValue) -> JsonValue {
    match param.param_type {
        Some(param_type) => coerce_value(
            param_type,
            param.collection_format,
            param.items.as_ref(),
            value,
        ),
        None => value,
    }
}

fn coerce_value(
    param_type: ParamType,
    collection_format: Option<CollectionFormat>,
    items: Option<&ItemsDefinition>,
    value: JsonValue,
) -> JsonValue {
    match param_type {
        ParamType::Number => coerce_number(value),
        ParamType::Integer => coerce_integer(value),
        ParamType::Boolean => coerce_boolean(value),
        ParamType::Array => coerce_array(collection_format.unwrap_or_default(), items, value),
        ParamType::String | ParamType::Object | ParamType::File => value,
    }
}

fn coerce_number(value: JsonValue) -> JsonValue {
    let JsonValue::String(raw) = &value else {
        return value;
    };
    match raw.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => JsonValue::Number(n),
        None => {
            tracing::trace!(value = %raw, "number coercion failed, keeping raw value");
            value
        }
    }
}

fn coerce_integer(value: JsonValue) -> JsonValue {
    let JsonValue::String(raw) = &value else {
        return value;
    };
    match parse_integer(raw) {
        Some(n) => JsonValue::Number(n),
        None => {
            tracing::trace!(value = %raw, "integer coercion failed, keeping raw value");
            value
        }
    }
}

fn parse_integer(raw: &str) -> Option<Number> {
    raw.parse::<i64>()
        .map(Number::from)
        .or_else(|_| raw.parse::<u64>().map(Number::from))
        .ok()
}

fn coerce_boolean(value: JsonValue) -> JsonValue {
    match &value {
        JsonValue::String(raw) if raw == "true" => JsonValue::Bool(true),
        JsonValue::String(raw) if raw == "false" => JsonValue::Bool(false),
        JsonValue::String(raw) => {
            tracing::trace!(value = %raw, "boolean coercion failed, keeping raw value");
            value
        }
        _ => value,
    }
}

fn coerce_array(
    format: CollectionFormat,
    items: Option<&ItemsDefinition>,
    value: JsonValue,
) -> JsonValue {
    // Sequences are taken as already typed; only wire text is split and coerced.
    let JsonValue::String(raw) = value else {
        return value;
    };
    let elements: Vec<JsonValue> = match format.delimiter() {
        Some(delimiter) => raw
            .split(delimiter)
            .map(|part| JsonValue::String(part.to_string()))
            .collect(),
        None => vec![JsonValue::String(raw)],
    };

    let item_type = items.map_or(ParamType::String, ItemsDefinition::effective_type);
    let nested_format = items.and_then(|i| i.collection_format);
    let nested_items = items.and_then(|i| i.items.as_deref());
    JsonValue::Array(
        elements
            .into_iter()
            .map(|element| coerce_value(item_type, nested_format, nested_items, element))
            .collect(),
    )
}
