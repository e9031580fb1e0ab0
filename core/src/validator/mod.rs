#![deny(missing_docs)]

//! # Validator Module
//!
//! - **coercion**: Wire value to declared type conversion.
//! - **request**: The request pipeline (presence, coercion, schema pass).
//! - **response**: Status selection, header and body checks for responses.
//! - **errors**: The per-request error taxonomy.

pub mod coercion;
pub mod errors;
pub mod request;
pub mod response;

pub use coercion::coerce_parameter;
pub use errors::{Rejection, ValidationError, ViolationDetails};
pub use request::validate_request;
pub use response::validate_response;
