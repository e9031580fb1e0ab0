#![deny(missing_docs)]

//! # Exchange Values
//!
//! The request and response values handed to the validator.
//!
//! Both are plain data: the validator never mutates them in place, it returns a
//! sanitized copy instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Raw parameter values keyed by parameter name.
pub type ParamMap = Map<String, JsonValue>;

/// An inbound HTTP request whose path has already been matched to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The matched path template (e.g. `/items/{id}`), not the concrete URL.
    pub path: String,
    /// HTTP method, compared case-insensitively.
    pub method: String,
    /// Header values. Names are matched case-insensitively.
    #[serde(default)]
    pub header_params: ParamMap,
    /// Path template values.
    #[serde(default)]
    pub path_params: ParamMap,
    /// Query string values.
    #[serde(default)]
    pub query_params: ParamMap,
    /// Decoded body, absent when the request carried none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl Request {
    /// Creates a request with empty parameter maps and no body.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Adds a header value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.header_params.insert(name.into(), value.into());
        self
    }

    /// Adds a path value.
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Adds a query value.
    pub fn with_query_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// An outbound response, paired with the request that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The originating request; used to locate the operation.
    pub request: Request,
    /// HTTP status code.
    pub status: u16,
    /// Response headers. Names are matched case-insensitively.
    #[serde(default)]
    pub headers: ParamMap,
    /// Decoded body, absent when the response carried none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: Request = serde_json::from_value(json!({
            "path": "/items/{id}",
            "method": "get",
            "pathParams": {"id": "1"},
            "queryParams": {"q": "x"}
        }))
        .unwrap();

        assert_eq!(request.path_params["id"], json!("1"));
        assert_eq!(request.query_params["q"], json!("x"));
        assert!(request.header_params.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let request = Request::new("POST", "/items")
            .with_header("X-Trace", "abc")
            .with_body(json!({"a": 1}));
        assert_eq!(request.header_params["X-Trace"], json!("abc"));
        assert_eq!(request.body, Some(json!({"a": 1})));
    }
}
