//! Commerce error types.

use thiserror::Error;

use crate::checkout::ValidationErrors;

/// Errors that can occur in storefront operations.
///
/// Cart operations never fail; quantities below one and unknown ids are
/// treated as no-ops. Errors come from catalog loading and checkout.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout form failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Catalog data is inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(e: ValidationErrors) -> Self {
        CommerceError::Validation(e)
    }
}
