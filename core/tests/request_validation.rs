mod common;

use oasgate_core::{ParameterLocation, Rejection, Request, ValidationError, ViolationKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;

fn create_item_request() -> Request {
    Request::new("POST", "/items/{SCOPE}/{item_id}")
        .with_header("x-request-id", "xyz")
        .with_path_param("SCOPE", "foo")
        .with_path_param("item_id", "123")
        .with_query_param("Latitude", 11.11)
        .with_query_param("longitude", "22.22")
        .with_body(json!({"foo": {"bar": 666}}))
}

fn errors_of(rejection: Rejection) -> Vec<ValidationError> {
    match rejection {
        Rejection::Invalid(errors) => errors,
        other => panic!("expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_unknown_path_is_terminal() {
    let table = common::resolved();
    let request = Request::new("GET", "/items/{id}").with_header("x-request-id", "");
    assert_eq!(
        table.validate_request(&request).unwrap_err(),
        Rejection::PathNotFound {
            path: "/items/{id}".into()
        }
    );
}

#[test]
fn test_concrete_url_is_not_a_template_match() {
    let table = common::resolved();
    let request = Request::new("POST", "/items/foo/123");
    assert!(matches!(
        table.validate_request(&request).unwrap_err(),
        Rejection::PathNotFound { .. }
    ));
}

#[test]
fn test_undeclared_method_is_terminal() {
    let table = common::resolved();
    // Missing every required parameter; still only the routing failure is reported.
    let request = Request::new("DELETE", "/items/{SCOPE}/{item_id}");
    assert_eq!(
        table.validate_request(&request).unwrap_err(),
        Rejection::MethodNotAllowed {
            path: "/items/{SCOPE}/{item_id}".into(),
            method: "DELETE".into()
        }
    );
}

#[test]
fn test_round_trip_coerces_declared_types() {
    let table = common::resolved();
    let request = create_item_request();
    let sanitized = table.validate_request(&request).unwrap();

    let mut expected = request.clone();
    expected.path_params.insert("item_id".into(), json!(123));
    expected.query_params.insert("longitude".into(), json!(22.22));
    assert_eq!(sanitized, expected);
}

#[test]
fn test_sanitized_request_validates_unchanged() {
    let table = common::resolved();
    let sanitized = table.validate_request(&create_item_request()).unwrap();
    let again = table.validate_request(&sanitized).unwrap();
    assert_eq!(again, sanitized);
}

#[test]
fn test_missing_required_parameters() {
    let table = common::resolved();
    let mut request = create_item_request();
    request.header_params.clear();
    request.query_params.remove("Latitude");
    request.body = None;

    let errors: BTreeSet<String> = errors_of(table.validate_request(&request).unwrap_err())
        .iter()
        .map(ToString::to_string)
        .collect();
    let expected: BTreeSet<String> = [
        ValidationError::MissingParameter {
            location: ParameterLocation::Header,
            name: "x-request-id".into(),
        },
        ValidationError::MissingParameter {
            location: ParameterLocation::Query,
            name: "Latitude".into(),
        },
        ValidationError::MissingParameter {
            location: ParameterLocation::Body,
            name: "payload".into(),
        },
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(errors, expected);
}

#[test]
fn test_empty_parameters() {
    let table = common::resolved();
    let request = create_item_request()
        .with_header("x-request-id", "")
        .with_query_param("longitude", "");

    let errors = errors_of(table.validate_request(&request).unwrap_err());
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&ValidationError::EmptyParameter {
        location: ParameterLocation::Header,
        name: "x-request-id".into(),
    }));
    assert!(errors.contains(&ValidationError::EmptyParameter {
        location: ParameterLocation::Query,
        name: "longitude".into(),
    }));
}

#[test]
fn test_presence_and_schema_errors_are_combined() {
    let table = common::resolved();
    let mut request = create_item_request()
        .with_path_param("item_id", "abc")
        .with_body(json!({"foo": {"bar": "x"}}));
    request.header_params.clear();

    let errors = errors_of(table.validate_request(&request).unwrap_err());
    assert_eq!(errors.len(), 3);
    assert!(errors.contains(&ValidationError::MissingParameter {
        location: ParameterLocation::Header,
        name: "x-request-id".into(),
    }));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::SchemaViolation { location: ParameterLocation::Path, name, kind: ViolationKind::Type, .. }
            if name == "item_id"
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::SchemaViolation { location: ParameterLocation::Body, path, kind: ViolationKind::Type, .. }
            if path == "/foo/bar"
    )));
}

#[test]
fn test_header_names_are_case_insensitive() {
    let table = common::resolved();
    let mut request = create_item_request();
    request.header_params.clear();
    let request = request.with_header("X-REQUEST-ID", "xyz");
    let sanitized = table.validate_request(&request).unwrap();
    assert_eq!(sanitized.header_params["X-REQUEST-ID"], json!("xyz"));
}

#[test]
fn test_query_names_are_case_sensitive() {
    let table = common::resolved();
    let mut request = create_item_request();
    request.query_params.remove("Latitude");
    let request = request.with_query_param("latitude", 11.11);

    let errors = errors_of(table.validate_request(&request).unwrap_err());
    assert_eq!(
        errors,
        vec![ValidationError::MissingParameter {
            location: ParameterLocation::Query,
            name: "Latitude".into(),
        }]
    );
}

#[test]
fn test_array_query_parameters() {
    let table = common::resolved();
    let request = Request::new("GET", "/items")
        .with_query_param("tags", "foo,bar,baz")
        .with_query_param("ids", "1|2|3");
    let sanitized = table.validate_request(&request).unwrap();
    assert_eq!(sanitized.query_params["tags"], json!(["foo", "bar", "baz"]));
    assert_eq!(sanitized.query_params["ids"], json!([1, 2, 3]));
}

#[test]
fn test_pipes_collection_format_yields_same_sequence() {
    let table = common::resolved();
    let csv = table
        .validate_request(&Request::new("GET", "/items").with_query_param("tags", "foo,bar,baz"))
        .unwrap();
    let op = table.operation("/items", "get").unwrap();
    let mut tags = op
        .parameters
        .iter()
        .find(|p| p.name == "tags")
        .unwrap()
        .clone();
    tags.collection_format = Some(oasgate_core::CollectionFormat::Pipes);
    assert_eq!(
        oasgate_core::coerce_parameter(&tags, json!("foo|bar|baz")),
        csv.query_params["tags"]
    );
}

#[test]
fn test_array_item_type_violation() {
    let table = common::resolved();
    let request = Request::new("GET", "/items").with_query_param("ids", "1|two");
    let errors = errors_of(table.validate_request(&request).unwrap_err());
    assert_eq!(errors.len(), 1);
    let ValidationError::SchemaViolation { name, path, kind, .. } = &errors[0] else {
        panic!("expected a schema violation, got {:?}", errors[0]);
    };
    assert_eq!(name, "ids");
    assert_eq!(path, "/ids/1");
    assert_eq!(*kind, ViolationKind::Type);
}

#[test]
fn test_sequence_values_are_not_coerced() {
    let table = common::resolved();
    let request = Request::new("GET", "/items").with_query_param("ids", json!(["1", "2"]));
    let errors = errors_of(table.validate_request(&request).unwrap_err());
    let paths: BTreeSet<&str> = errors
        .iter()
        .map(|e| match e {
            ValidationError::SchemaViolation {
                location,
                name,
                path,
                kind,
                ..
            } => {
                assert_eq!(*location, ParameterLocation::Query);
                assert_eq!(name, "ids");
                assert_eq!(*kind, ViolationKind::Type);
                path.as_str()
            }
            other => panic!("expected a schema violation, got {:?}", other),
        })
        .collect();
    assert!(paths.contains("/ids/0"));

    let typed = Request::new("GET", "/items").with_query_param("ids", json!([1, 2]));
    let sanitized = table.validate_request(&typed).unwrap();
    assert_eq!(sanitized.query_params["ids"], json!([1, 2]));
}

#[test]
fn test_allow_empty_value_and_constraints() {
    let table = common::resolved();
    let ok = Request::new("GET", "/items").with_query_param("filter", "");
    assert!(table.validate_request(&ok).is_ok());

    let too_many = Request::new("GET", "/items").with_query_param("limit", "101");
    let errors = errors_of(table.validate_request(&too_many).unwrap_err());
    assert!(matches!(
        &errors[..],
        [ValidationError::SchemaViolation { kind: ViolationKind::Maximum, .. }]
    ));
}

#[test]
fn test_discriminator_dispatch_to_concrete_schema() {
    let table = common::resolved();
    let valid = Request::new("POST", "/things").with_body(json!({"type": "Bar", "bar": 1}));
    assert!(table.validate_request(&valid).is_ok());

    let base = Request::new("POST", "/things").with_body(json!({"type": "Item", "note": null}));
    assert!(table.validate_request(&base).is_ok());

    let invalid = Request::new("POST", "/things").with_body(json!({"type": "Bar", "bar": -1}));
    let errors = errors_of(table.validate_request(&invalid).unwrap_err());
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::SchemaViolation { location: ParameterLocation::Body, name, path, kind: ViolationKind::Minimum, .. }
            if name == "thing" && path == "/bar"
    ));
}

#[test]
fn test_unknown_discriminator_value() {
    let table = common::resolved();
    let request = Request::new("POST", "/things").with_body(json!({"type": "Qux", "bar": "nope"}));
    let errors = errors_of(table.validate_request(&request).unwrap_err());
    assert_eq!(
        errors,
        vec![ValidationError::InvalidDiscriminator {
            location: ParameterLocation::Body,
            field: "type".into(),
            allowed: ["Item", "Foo", "Bar"].iter().map(|s| s.to_string()).collect(),
        }]
    );
}

#[test]
fn test_operation_level_parameter_replaces_path_level() {
    let table = common::resolved();
    let op = table.operation("/things", "post").unwrap();
    let version = op.parameters.iter().find(|p| p.name == "version").unwrap();
    assert!(!version.required);
    assert_eq!(version.param_type, Some(oasgate_core::ParamType::Integer));

    // The path-level `required: true` is gone, not merged in.
    let without = Request::new("POST", "/things").with_body(json!({"type": "Item"}));
    assert!(table.validate_request(&without).is_ok());

    let wrong_type = without.clone().with_query_param("version", "v1");
    let errors = errors_of(table.validate_request(&wrong_type).unwrap_err());
    assert!(matches!(
        &errors[..],
        [ValidationError::SchemaViolation { name, kind: ViolationKind::Type, .. }] if name == "version"
    ));
}
