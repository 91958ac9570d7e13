//! Product and variant types.

use crate::ids::{ProductHandle, ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Label used when a product defines no options.
const FALLBACK_OPTION_LABEL: &str = "Option";

/// A product as returned by the product lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL handle, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<ProductHandle>,
    /// Display title.
    pub title: String,
    /// Base price in minor units.
    pub price: Money,
    /// Ordered image references.
    #[serde(default)]
    pub images: Vec<String>,
    /// Ordered option definitions (e.g. "Size").
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Ordered purchasable variants.
    #[serde(default)]
    pub variants: Vec<StorefrontVariant>,
    /// Merchandising tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StorefrontProduct {
    /// Number of purchasable options, i.e. variants.
    pub fn purchasable_option_count(&self) -> usize {
        self.variants.len()
    }

    /// Index of the first variant flagged available, in list order.
    pub fn first_available_index(&self) -> Option<usize> {
        self.variants.iter().position(|v| v.available)
    }

    /// Look a variant up by id.
    pub fn variant(&self, id: &VariantId) -> Option<&StorefrontVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Label for the option selector: the first option's name.
    pub fn option_label(&self) -> &str {
        self.options
            .first()
            .map(|o| o.name.as_str())
            .unwrap_or(FALLBACK_OPTION_LABEL)
    }

    /// Whether any tag contains `needle`, ignoring case.
    ///
    /// This is a substring match, so `"ring"` also matches `"Earrings"`.
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Display label, usually the option value ("M", "Size 7").
    pub title: String,
    /// Price in minor units.
    pub price: Money,
    /// Whether the variant can currently be bought.
    #[serde(default)]
    pub available: bool,
}

impl StorefrontVariant {
    pub fn new(id: impl Into<VariantId>, title: impl Into<String>, price: i64, available: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: Money::from_minor(price),
            available,
        }
    }
}

/// An option definition (e.g. Size).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductOption {
    /// Option name.
    pub name: String,
    /// Values offered, when the backend lists them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}
