//! Commerce error types.

use thiserror::Error;

/// Errors raised while building or decoding storefront data.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A required form field was absent.
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// Quantity could not be parsed or was zero.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}
