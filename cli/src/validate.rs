#![deny(missing_docs)]

//! # Validate Commands
//!
//! `validate-request` and `validate-response`: check one document against the
//! description and print the outcome as JSON.
//!
//! Accepted requests print `{"valid": true, "request": <sanitized>}`; rejections
//! print `{"valid": false, "rejection": ...}`.

use crate::error::CliResult;
use crate::loader::{load_description, load_document, DescriptionArgs};
use oasgate_core::{Request, Response};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for `validate-request`.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    #[clap(flatten)]
    pub source: DescriptionArgs,

    /// Request document (YAML or JSON) with `path`, `method`, `headerParams`,
    /// `pathParams`, `queryParams` and `body`.
    pub request: PathBuf,
}

/// Arguments for `validate-response`.
#[derive(clap::Args, Debug, Clone)]
pub struct ResponseArgs {
    #[clap(flatten)]
    pub source: DescriptionArgs,

    /// Response document (YAML or JSON) with `request`, `status`, `headers` and `body`.
    pub response: PathBuf,
}

/// Validates a request. Returns whether it was accepted.
pub fn execute_request(args: &RequestArgs, out: &mut impl Write) -> CliResult<bool> {
    let table = load_description(&args.source.description)?;
    let request: Request = load_document(&args.request)?;

    let (accepted, report) = match table.validate_request(&request) {
        Ok(sanitized) => (true, json!({"valid": true, "request": sanitized})),
        Err(rejection) => (false, json!({"valid": false, "rejection": rejection})),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(accepted)
}

/// Validates a response. Returns whether it was accepted.
pub fn execute_response(args: &ResponseArgs, out: &mut impl Write) -> CliResult<bool> {
    let table = load_description(&args.source.description)?;
    let response: Response = load_document(&args.response)?;

    let (accepted, report) = match table.validate_response(&response) {
        Ok(()) => (true, json!({"valid": true})),
        Err(rejection) => (false, json!({"valid": false, "rejection": rejection})),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(accepted)
}
