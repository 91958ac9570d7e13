//! Cart summary returned by the cart endpoint.

use serde::{Deserialize, Serialize};

/// Current cart state as seen by count indicators.
///
/// Only `item_count` is interpreted; everything else the backend sends is
/// kept in `rest` so listeners on the cart event bus see the full payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Total units in the cart.
    pub item_count: u32,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl CartSummary {
    pub fn with_count(item_count: u32) -> Self {
        Self {
            item_count,
            rest: serde_json::Map::new(),
        }
    }

    /// Whether the cart holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
