//! Product catalog module.
//!
//! Contains the product, variant and option shapes returned by the
//! storefront's product lookup endpoint.

mod product;

pub use product::{ProductOption, StorefrontProduct, StorefrontVariant};
