//! Add-to-cart orchestration and variant picker for TurboCommerce storefronts.
//!
//! This crate provides:
//! - `CartControl` / `ButtonState` - per-control submission state and its rendering
//! - `CartMutationService` - the single add-to-cart mutation path
//! - `CartStateRefresher` - cart summary fetch, count indicators, cart events
//! - `VariantPickerController` - modal variant selection for multi-variant products
//! - `AddToCartRouter` - routes a product-card click to the direct path or the picker
//! - `Storefront` - wires all of the above once per page
//!
//! Collaborating UI shells (drawer, toast, scroll lock, size chart) are
//! traits in [`collaborators`]; every one of them is optional.

mod backend;
mod button;
mod config;
mod error;
mod events;
mod mutation;
mod refresher;
mod router;

pub mod collaborators;
pub mod picker;
pub mod storefront;

#[cfg(test)]
mod testing;

pub use backend::*;
pub use button::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use mutation::*;
pub use refresher::*;
pub use router::*;

pub use picker::{
    CarouselDirection, OpenOutcome, PickerPhase, PickerView, VariantChip,
    VariantPickerController,
};
pub use storefront::Storefront;
