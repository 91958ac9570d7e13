//! Picker state and its transitions.
//!
//! Everything here is synchronous and side-effect free; the controller
//! wraps it with fetching, locking and collaborator calls.

use serde::Serialize;
use turbo_commerce::{ProductHandle, StorefrontProduct, VariantId};

/// Lifecycle phase of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerPhase {
    #[default]
    Closed,
    /// Shell shown, product fetch outstanding.
    Opening,
    /// Product rendered, waiting for the shopper.
    Ready,
    /// Selection handed to the mutation service.
    Submitting,
}

/// Carousel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselDirection {
    Previous,
    Next,
}

impl CarouselDirection {
    fn offset(self) -> isize {
        match self {
            CarouselDirection::Previous => -1,
            CarouselDirection::Next => 1,
        }
    }
}

/// Result of trying to select a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected,
    /// The variant exists but is unavailable; clicks on it do nothing.
    Unavailable,
    /// No such variant in the loaded product.
    Unknown,
}

/// State of the page's single picker.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    phase: PickerPhase,
    handle: Option<ProductHandle>,
    product: Option<StorefrontProduct>,
    selected: Option<VariantId>,
    active_image: usize,
    images: Vec<String>,
    generation: u64,
}

impl PickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != PickerPhase::Closed
    }

    pub fn handle(&self) -> Option<&ProductHandle> {
        self.handle.as_ref()
    }

    pub fn product(&self) -> Option<&StorefrontProduct> {
        self.product.as_ref()
    }

    pub fn selected(&self) -> Option<&VariantId> {
        self.selected.as_ref()
    }

    pub fn active_image(&self) -> usize {
        self.active_image
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Counter identifying the current open/close cycle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear everything and start a new cycle for `handle`.
    ///
    /// Returns the generation a product response must carry to be applied.
    pub fn begin_open(&mut self, handle: ProductHandle) -> u64 {
        self.clear();
        self.generation += 1;
        self.phase = PickerPhase::Opening;
        self.handle = Some(handle);
        self.generation
    }

    /// Install a fetched product if `generation` is still current.
    ///
    /// Auto-selects the first available variant, or the first variant when
    /// none is available. Returns false for a stale response.
    pub fn apply_product(&mut self, generation: u64, product: StorefrontProduct) -> bool {
        if generation != self.generation || self.phase != PickerPhase::Opening {
            return false;
        }

        self.images = product.images.clone();
        self.active_image = 0;
        self.selected = product
            .first_available_index()
            .or_else(|| (!product.variants.is_empty()).then_some(0))
            .map(|index| product.variants[index].id.clone());
        self.product = Some(product);
        self.phase = PickerPhase::Ready;
        true
    }

    /// Select a variant by id. Unavailable variants are refused.
    pub fn select(&mut self, id: &VariantId) -> Selection {
        if self.phase != PickerPhase::Ready {
            return Selection::Unknown;
        }
        let Some(variant) = self.product.as_ref().and_then(|p| p.variant(id)) else {
            return Selection::Unknown;
        };
        if !variant.available {
            return Selection::Unavailable;
        }
        self.selected = Some(variant.id.clone());
        Selection::Selected
    }

    /// Step the carousel with wrap-around. No-op without images.
    pub fn change_image(&mut self, direction: CarouselDirection) {
        let count = self.images.len() as isize;
        if count == 0 {
            return;
        }
        let next = (self.active_image as isize + direction.offset() + count) % count;
        self.active_image = next as usize;
    }

    /// Mark the selection as handed off; returns the variant to submit.
    pub fn begin_submit(&mut self) -> Option<VariantId> {
        if self.phase != PickerPhase::Ready {
            return None;
        }
        let selected = self.selected.clone()?;
        self.phase = PickerPhase::Submitting;
        Some(selected)
    }

    /// Return to `Ready` after a refused hand-off.
    pub fn abort_submit(&mut self) {
        if self.phase == PickerPhase::Submitting {
            self.phase = PickerPhase::Ready;
        }
    }

    /// Close and end the current cycle. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        if self.phase == PickerPhase::Closed {
            return false;
        }
        self.clear();
        self.generation += 1;
        true
    }

    fn clear(&mut self) {
        self.phase = PickerPhase::Closed;
        self.handle = None;
        self.product = None;
        self.selected = None;
        self.active_image = 0;
        self.images.clear();
    }
}
