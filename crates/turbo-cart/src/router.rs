//! Routing product-card clicks to the direct path or the picker.

use std::sync::Arc;

use turbo_commerce::{AddToCartPayload, ProductHandle, ProductId, StorefrontProduct, VariantId};

use crate::button::CartControl;
use crate::mutation::{PendingSubmission, SubmitCart};
use crate::picker::{OpenOutcome, VariantPickerController};

/// An add-to-cart button on a product card.
#[derive(Debug, Clone)]
pub struct ProductCardButton {
    pub control: CartControl,
    pub product_id: ProductId,
    pub handle: Option<ProductHandle>,
    /// Number of purchasable options (variants).
    pub variant_count: usize,
    pub available: bool,
    /// Fields of the form the button sits in, if any.
    pub form_fields: Option<Vec<(String, String)>>,
}

impl ProductCardButton {
    /// Describe the card for `product`.
    pub fn for_product(control: CartControl, product: &StorefrontProduct) -> Self {
        Self {
            control,
            product_id: product.id.clone(),
            handle: product.handle.clone(),
            variant_count: product.purchasable_option_count(),
            available: product.first_available_index().is_some(),
            form_fields: None,
        }
    }

    /// Attach the fields of the surrounding form.
    pub fn with_form_fields<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form_fields = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// The payload this button submits on the direct path.
    pub fn payload(&self) -> AddToCartPayload {
        if let Some(fields) = &self.form_fields {
            match AddToCartPayload::from_form_fields(fields.iter().cloned()) {
                Ok(payload) => return payload,
                Err(e) => tracing::warn!(
                    product = %self.product_id,
                    error = %e,
                    "unusable form fields, using product id"
                ),
            }
        }
        AddToCartPayload::single(VariantId::new(self.product_id.as_str()))
    }
}

/// What a click did.
#[derive(Debug)]
pub enum ClickRoute {
    /// The control was disabled or busy; nothing happened.
    Ignored,
    /// Single-option product that cannot be bought; nothing happened.
    Unavailable,
    /// A mutation was started on the card's control.
    Submitted(PendingSubmission),
    /// The picker was opened for the product.
    PickerOpened(OpenOutcome),
}

/// Classifies product-card clicks by purchasable-option count.
#[derive(Clone)]
pub struct AddToCartRouter {
    submitter: Arc<dyn SubmitCart>,
    picker: Option<Arc<VariantPickerController>>,
}

impl AddToCartRouter {
    pub fn new(submitter: Arc<dyn SubmitCart>) -> Self {
        Self {
            submitter,
            picker: None,
        }
    }

    pub fn with_picker(mut self, picker: Arc<VariantPickerController>) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn picker(&self) -> Option<&Arc<VariantPickerController>> {
        self.picker.as_ref()
    }

    /// Handle a click on `button`.
    ///
    /// Exactly one option submits directly. Anything else opens the picker
    /// when there is one and the card has a handle, and otherwise falls back
    /// to the direct path.
    pub async fn click(&self, button: &ProductCardButton) -> ClickRoute {
        if button.control.is_disabled() {
            tracing::debug!(control = button.control.id(), "click on disabled control ignored");
            return ClickRoute::Ignored;
        }

        if button.variant_count != 1 {
            if let (Some(picker), Some(handle)) = (&self.picker, &button.handle) {
                return ClickRoute::PickerOpened(picker.open(handle.clone()).await);
            }
            tracing::debug!(
                product = %button.product_id,
                variants = button.variant_count,
                "no picker available, submitting directly"
            );
        }

        self.submit_direct(button)
    }

    fn submit_direct(&self, button: &ProductCardButton) -> ClickRoute {
        if !button.available {
            return ClickRoute::Unavailable;
        }
        match self.submitter.submit(&button.control, button.payload()) {
            Ok(pending) => ClickRoute::Submitted(pending),
            Err(e) => {
                tracing::debug!(error = %e, "click refused");
                ClickRoute::Ignored
            }
        }
    }
}

impl std::fmt::Debug for AddToCartRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddToCartRouter")
            .field("picker", &self.picker.is_some())
            .finish_non_exhaustive()
    }
}
