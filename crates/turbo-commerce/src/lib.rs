//! Storefront domain types for TurboCommerce.
//!
//! These are the shapes the add-to-cart layer exchanges with a storefront
//! backend:
//!
//! - **Catalog**: products, variants and option definitions as returned by the
//!   product lookup endpoint
//! - **Cart**: the cart summary and the add-to-cart payload
//! - **Money**: minor-unit amounts and their display formatting
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let product: StorefrontProduct = serde_json::from_str(r#"{
//!     "id": 7,
//!     "title": "Signet Ring",
//!     "price": 149900,
//!     "tags": ["Rings"],
//!     "variants": [
//!         {"id": 71, "title": "6", "price": 149900, "available": false},
//!         {"id": 72, "title": "7", "price": 149900, "available": true}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(product.first_available_index(), Some(1));
//! assert_eq!(MoneyFormat::default().format(product.price), "Rs. 1499.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;

pub use cart::{AddToCartPayload, CartSummary, DEFAULT_QUANTITY};
pub use catalog::{ProductOption, StorefrontProduct, StorefrontVariant};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, MoneyFormat};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, MoneyFormat};

    // Catalog
    pub use crate::catalog::{ProductOption, StorefrontProduct, StorefrontVariant};

    // Cart
    pub use crate::cart::{AddToCartPayload, CartSummary, DEFAULT_QUANTITY};
}
