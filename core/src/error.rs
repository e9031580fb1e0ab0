//! # Error Handling
//!
//! Provides the `AppError` enum used for every load-time and build-time failure.
//! Per-request validation outcomes are not errors in this sense; see
//! [`crate::validator::Rejection`].

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A `$ref` pointer that does not resolve inside the description.
    #[from(ignore)]
    #[display("Unresolvable reference: {_0}")]
    UnresolvableReference(String),

    /// The description violates a structural rule (bad parameter wiring, discriminator, ...).
    #[from(ignore)]
    #[display("Invalid description: {_0}")]
    InvalidDescription(String),

    /// The schema engine rejected a schema at compile time.
    #[from(ignore)]
    #[display("Schema Error: {_0}")]
    Schema(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
