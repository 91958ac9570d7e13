//! Add-to-cart mutation payload.

use crate::error::CommerceError;
use crate::ids::VariantId;
use serde::{Deserialize, Serialize};

/// Quantity used when a payload is synthesized rather than read from a form.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Body of an add-to-cart mutation.
///
/// Serialized as form fields: `id`, `quantity`, then any extra fields the
/// originating form carried (line item properties, selling plan, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartPayload {
    /// Variant (or single-option product) identifier.
    pub id: VariantId,
    /// Units to add.
    pub quantity: u32,
    /// Additional form fields, forwarded untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_fields: Vec<(String, String)>,
}

impl AddToCartPayload {
    /// Payload for a single unit of `id`.
    pub fn single(id: impl Into<VariantId>) -> Self {
        Self {
            id: id.into(),
            quantity: DEFAULT_QUANTITY,
            extra_fields: Vec::new(),
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Build a payload from form fields.
    ///
    /// `id` is required. A missing `quantity` defaults to one; an unparseable
    /// or zero quantity is rejected.
    pub fn from_form_fields<I, K, V>(fields: I) -> Result<Self, CommerceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut id = None;
        let mut quantity = None;
        let mut extra_fields = Vec::new();

        for (key, value) in fields {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "id" => id = Some(VariantId::new(value)),
                "quantity" => {
                    let parsed: u32 = value
                        .trim()
                        .parse()
                        .map_err(|_| CommerceError::InvalidQuantity(value.clone()))?;
                    if parsed == 0 {
                        return Err(CommerceError::InvalidQuantity(value));
                    }
                    quantity = Some(parsed);
                }
                _ => extra_fields.push((key, value)),
            }
        }

        Ok(Self {
            id: id.ok_or(CommerceError::MissingField("id"))?,
            quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
            extra_fields,
        })
    }

    /// Flatten into ordered form fields.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(2 + self.extra_fields.len());
        fields.push(("id".to_string(), self.id.to_string()));
        fields.push(("quantity".to_string(), self.quantity.to_string()));
        fields.extend(self.extra_fields.iter().cloned());
        fields
    }
}
