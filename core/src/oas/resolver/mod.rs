#![deny(missing_docs)]

//! # Resolver Module
//!
//! Load-time resolution of a Swagger 2.0 description.
//!
//! Handles:
//! - `$ref` resolution against the root document, transitively.
//! - Parameter resolution (Inline and Reference) via `ShimParameter`, and path/operation merging.
//! - Discriminator expansion into allowed subtype sets.
//! - Body and response schema compilation.

pub mod body;
pub mod discriminator;
pub mod params;
pub mod refs;
pub mod responses;

pub use body::{resolve_body_schema, BodyContext};
pub use discriminator::expand_discriminators;
pub use params::{merge_parameters, resolve_parameters, ShimParameter};
pub use refs::{resolve_reference, resolve_transitively};
pub use responses::resolve_responses;
