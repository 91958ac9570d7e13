//! Variant picker for products with more than one purchasable option.
//!
//! ```text
//! closed -> opening -> ready -> submitting -> closed
//!              \
//!               `-> closed   (product lookup failed)
//! ```

mod controller;
mod state;
mod view;

pub use controller::{OpenOutcome, VariantPickerController, ADD_TO_CART_LABEL, SELECT_OPTION_LABEL};
pub use state::{CarouselDirection, PickerPhase, PickerState, Selection};
pub use view::{PickerView, VariantChip};
