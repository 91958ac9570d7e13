//! Cart module.
//!
//! Contains the add-to-cart payload and the cart summary.

mod payload;
mod summary;

pub use payload::{AddToCartPayload, DEFAULT_QUANTITY};
pub use summary::CartSummary;
