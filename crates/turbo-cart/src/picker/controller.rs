//! The variant picker modal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use turbo_commerce::{AddToCartPayload, MoneyFormat, ProductHandle, VariantId};

use super::state::{CarouselDirection, PickerPhase, PickerState, Selection};
use super::view::PickerView;
use crate::backend::CommerceBackend;
use crate::button::CartControl;
use crate::collaborators::Collaborators;
use crate::config::ClosePolicy;
use crate::mutation::{PendingSubmission, SubmitCart};

pub const SELECT_OPTION_LABEL: &str = "Select Option";
pub const ADD_TO_CART_LABEL: &str = "Add to Cart";

/// How an `open` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The product is rendered and a variant may be selected.
    Ready,
    /// The picker was closed or reopened before the product arrived; the
    /// response was dropped.
    Stale,
    /// The lookup failed and the picker closed.
    Failed,
}

/// Owns the page's single variant picker.
///
/// Submissions go through an injected [`SubmitCart`], so the picker depends
/// on the mutation path and never the other way round.
pub struct VariantPickerController {
    backend: Arc<dyn CommerceBackend>,
    submitter: Arc<dyn SubmitCart>,
    collaborators: Collaborators,
    add_control: CartControl,
    state: Mutex<PickerState>,
    money: MoneyFormat,
    close_policy: ClosePolicy,
}

impl VariantPickerController {
    pub fn new(
        backend: Arc<dyn CommerceBackend>,
        submitter: Arc<dyn SubmitCart>,
        collaborators: Collaborators,
    ) -> Self {
        let add_control = CartControl::new("picker-add", SELECT_OPTION_LABEL);
        add_control.set_blocked(true);
        Self {
            backend,
            submitter,
            collaborators,
            add_control,
            state: Mutex::new(PickerState::new()),
            money: MoneyFormat::default(),
            close_policy: ClosePolicy::default(),
        }
    }

    pub fn with_money_format(mut self, money: MoneyFormat) -> Self {
        self.money = money;
        self
    }

    pub fn with_close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }

    /// The picker's own add-to-cart control.
    pub fn add_control(&self) -> &CartControl {
        &self.add_control
    }

    pub fn close_policy(&self) -> ClosePolicy {
        self.close_policy
    }

    pub fn phase(&self) -> PickerPhase {
        self.state().phase()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    pub fn selected_variant(&self) -> Option<VariantId> {
        self.state().selected().cloned()
    }

    /// Snapshot of what the picker currently shows.
    pub fn view(&self) -> PickerView {
        let state = self.state();
        PickerView::render(&state, &self.money, self.add_control.view())
    }

    /// Show the picker for `handle` and load its product.
    ///
    /// Any previous product, selection and images are cleared before the
    /// fetch starts. A response that arrives after the picker was closed or
    /// reopened is dropped.
    pub async fn open(&self, handle: ProductHandle) -> OpenOutcome {
        let generation = self.state().begin_open(handle.clone());
        self.add_control.set_blocked(true);
        self.add_control.set_label(SELECT_OPTION_LABEL);
        self.collaborators.lock_scroll();
        tracing::debug!(handle = %handle, generation, "opening variant picker");

        match self.backend.product(&handle).await {
            Ok(product) => {
                let variants = product.variants.len();
                let applied = self.state().apply_product(generation, product);
                if !applied {
                    tracing::debug!(handle = %handle, generation, "discarding stale product");
                    return OpenOutcome::Stale;
                }
                self.sync_add_control();
                tracing::debug!(handle = %handle, variants, "variant picker ready");
                OpenOutcome::Ready
            }
            Err(e) => {
                tracing::error!(handle = %handle, error = %e, "error fetching product");
                let current = self.state().generation() == generation;
                if !current {
                    return OpenOutcome::Stale;
                }
                self.close();
                OpenOutcome::Failed
            }
        }
    }

    /// Hide the picker and drop the loaded product. No-op when closed.
    pub fn close(&self) {
        if !self.state().close() {
            return;
        }
        self.add_control.set_blocked(true);
        self.collaborators.unlock_scroll();
        tracing::debug!("variant picker closed");
    }

    /// Select a variant. Unavailable or unknown variants leave the
    /// selection unchanged.
    pub fn select_variant(&self, id: &VariantId) -> Selection {
        let selection = self.state().select(id);
        if selection == Selection::Selected {
            self.sync_add_control();
        }
        selection
    }

    pub fn change_image(&self, direction: CarouselDirection) {
        self.state().change_image(direction);
    }

    /// Open the size chart dialog if the loaded product offers one.
    pub fn show_size_chart(&self) -> bool {
        if !self.view().size_chart_visible {
            return false;
        }
        self.collaborators.show_size_chart()
    }

    /// Submit the selected variant with quantity 1 on the picker's control.
    ///
    /// Returns `None` when nothing is selected or the control refused the
    /// submission. With [`ClosePolicy::Immediate`] the picker closes as soon
    /// as the submission starts. With [`ClosePolicy::AfterOutcome`] it waits
    /// for the outcome: success closes the picker, failure leaves it open
    /// with the error shown on its control. In that case the returned
    /// submission's outcome has already been taken.
    pub async fn handle_add_to_cart(&self) -> Option<PendingSubmission> {
        let (variant, generation) = {
            let mut state = self.state();
            let variant = state.begin_submit()?;
            (variant, state.generation())
        };

        let payload = AddToCartPayload::single(variant);
        let mut pending = match self.submitter.submit(&self.add_control, payload) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(error = %e, "picker submission refused");
                self.state().abort_submit();
                return None;
            }
        };

        match self.close_policy {
            ClosePolicy::Immediate => self.close(),
            ClosePolicy::AfterOutcome => {
                let added = pending.outcome().await.is_some_and(|o| o.is_added());
                // The shopper may have closed or reopened the picker meanwhile.
                if self.state().generation() == generation {
                    if added {
                        self.close();
                    } else {
                        self.state().abort_submit();
                    }
                }
            }
        }

        Some(pending)
    }

    fn sync_add_control(&self) {
        let selected = self.state().selected().is_some();
        self.add_control.set_blocked(!selected);
        self.add_control.set_label(if selected {
            ADD_TO_CART_LABEL
        } else {
            SELECT_OPTION_LABEL
        });
    }

    fn state(&self) -> MutexGuard<'_, PickerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for VariantPickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantPickerController")
            .field("phase", &self.phase())
            .field("add_control", &self.add_control.id())
            .field("close_policy", &self.close_policy)
            .finish_non_exhaustive()
    }
}
