mod common;

use oasgate_core::{ParameterLocation, Rejection, Request, Response, ValidationError, ViolationKind};
use serde_json::json;

fn created(body: Option<serde_json::Value>) -> Response {
    Response {
        request: Request::new("post", "/items/{SCOPE}/{item_id}"),
        status: 201,
        headers: Default::default(),
        body,
    }
}

#[test]
fn test_response_routing_uses_originating_request() {
    let table = common::resolved();
    let mut response = created(None);
    response.request.path = "/nowhere".into();
    assert_eq!(
        table.validate_response(&response).unwrap_err(),
        Rejection::PathNotFound {
            path: "/nowhere".into()
        }
    );
}

#[test]
fn test_discriminated_response_body() {
    let table = common::resolved();
    assert!(table
        .validate_response(&created(Some(json!({"type": "Foo", "foo": "x"}))))
        .is_ok());

    let err = table
        .validate_response(&created(Some(json!({"type": "Qux"}))))
        .unwrap_err();
    assert!(matches!(
        err.errors(),
        [ValidationError::InvalidDiscriminator { field, .. }] if field == "type"
    ));
}

#[test]
fn test_declared_headers_are_coerced_and_optional() {
    let table = common::resolved();
    let mut response = created(Some(json!({"type": "Item"})));
    assert!(table.validate_response(&response).is_ok());

    response.headers.insert("X-Item-ID".into(), json!("42"));
    assert!(table.validate_response(&response).is_ok());

    response.headers.insert("X-Item-ID".into(), json!("forty-two"));
    let err = table.validate_response(&response).unwrap_err();
    assert!(matches!(
        err.errors(),
        [ValidationError::SchemaViolation { location: ParameterLocation::Header, kind: ViolationKind::Type, name, .. }]
            if name == "x-item-id"
    ));
}

#[test]
fn test_default_response_applies_to_undeclared_status() {
    let table = common::resolved();
    let mut response = created(Some(json!({"message": "boom"})));
    response.status = 503;
    assert!(table.validate_response(&response).is_ok());

    response.body = Some(json!({}));
    let err = table.validate_response(&response).unwrap_err();
    assert!(matches!(
        err.errors(),
        [ValidationError::SchemaViolation { kind: ViolationKind::Required, .. }]
    ));
}

#[test]
fn test_missing_body_and_unexpected_status() {
    let table = common::resolved();
    let err = table.validate_response(&created(None)).unwrap_err();
    assert_eq!(
        err.errors(),
        &[ValidationError::MissingParameter {
            location: ParameterLocation::Body,
            name: "body".into(),
        }]
    );

    let listed = Response {
        request: Request::new("GET", "/items"),
        status: 404,
        ..Response::default()
    };
    assert_eq!(
        table.validate_response(&listed).unwrap_err().errors(),
        &[ValidationError::UnexpectedStatus { status: 404 }]
    );
}
