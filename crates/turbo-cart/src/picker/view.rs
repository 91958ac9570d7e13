//! Rendering the picker state.

use serde::Serialize;
use turbo_commerce::{MoneyFormat, VariantId};

use super::state::{PickerPhase, PickerState};
use crate::button::ControlView;

/// Tag substring that turns on the size chart trigger.
const SIZE_CHART_TAG: &str = "ring";

/// One selectable variant element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantChip {
    pub id: VariantId,
    pub label: String,
    /// Unavailable chips are drawn dimmed and ignore clicks.
    pub available: bool,
    pub selected: bool,
}

/// Snapshot of everything the picker shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerView {
    pub visible: bool,
    /// Spinner shown while the product fetch is outstanding.
    pub loading: bool,
    pub title: String,
    pub price: String,
    pub option_label: String,
    pub size_chart_visible: bool,
    /// Main image, absent when there are no images.
    pub image: Option<String>,
    /// One entry per image, true for the active one. Empty unless there is
    /// more than one image.
    pub dots: Vec<bool>,
    pub variants: Vec<VariantChip>,
    pub add_control: ControlView,
}

impl PickerView {
    /// Render `state`.
    pub fn render(state: &PickerState, money: &MoneyFormat, add_control: ControlView) -> Self {
        let product = state.product();
        let selected = state.selected();

        let price = match (product, selected) {
            (Some(p), Some(id)) => p
                .variant(id)
                .map(|v| money.format(v.price))
                .unwrap_or_else(|| money.format(p.price)),
            (Some(p), None) => money.format(p.price),
            (None, _) => String::new(),
        };

        let variants = product
            .map(|p| {
                p.variants
                    .iter()
                    .map(|v| VariantChip {
                        id: v.id.clone(),
                        label: v.title.clone(),
                        available: v.available,
                        selected: selected == Some(&v.id),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let images = state.images();
        let dots = if images.len() > 1 {
            (0..images.len()).map(|i| i == state.active_image()).collect()
        } else {
            Vec::new()
        };

        Self {
            visible: state.is_open(),
            loading: state.phase() == PickerPhase::Opening,
            title: product.map(|p| p.title.clone()).unwrap_or_default(),
            price,
            option_label: product
                .map(|p| p.option_label().to_string())
                .unwrap_or_default(),
            size_chart_visible: product
                .map(|p| p.has_tag_containing(SIZE_CHART_TAG))
                .unwrap_or(false),
            image: images.get(state.active_image()).cloned(),
            dots,
            variants,
            add_control,
        }
    }

    /// Number of chips marked selected.
    pub fn selected_count(&self) -> usize {
        self.variants.iter().filter(|c| c.selected).count()
    }
}
