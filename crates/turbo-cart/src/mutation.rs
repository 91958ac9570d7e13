//! The add-to-cart mutation path.
//!
//! Every submission, whether from an inline product-card button or from the
//! variant picker, runs the same cycle on its control:
//!
//! ```text
//! idle -> loading -> success | error -> (settle delay) -> idle
//! ```
//!
//! The control is claimed synchronously, before anything is awaited, so a
//! second click on a control that is already loading is refused without
//! sending a request. The cart summary refresh after a success runs on its
//! own task, so a slow summary never delays the drawer, the outcome or the
//! reset. The trailing reset runs on every exit path; if the cycle is
//! dropped part way, the control is released immediately.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use turbo_commerce::AddToCartPayload;

use crate::backend::CommerceBackend;
use crate::button::{ButtonState, CartControl};
use crate::collaborators::Collaborators;
use crate::config::DEFAULT_SETTLE_DELAY_MS;
use crate::error::SubmitError;
use crate::refresher::CartStateRefresher;

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The backend accepted the line; carries its opaque payload.
    Added(Value),
    /// The mutation failed; carries the text shown (or logged) for it.
    Failed(String),
}

impl MutationOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, MutationOutcome::Added(_))
    }
}

/// A submission running in the background.
///
/// `outcome` resolves as soon as the backend has answered; `settled`
/// resolves once the control is idle again.
#[derive(Debug)]
pub struct PendingSubmission {
    outcome: Option<oneshot::Receiver<MutationOutcome>>,
    cycle: JoinHandle<MutationOutcome>,
}

impl PendingSubmission {
    /// Wait for the outcome. Returns `None` if already taken or if the
    /// cycle died before producing one.
    pub async fn outcome(&mut self) -> Option<MutationOutcome> {
        let rx = self.outcome.take()?;
        rx.await.ok()
    }

    /// Wait for the full cycle, including the settle delay.
    pub async fn settled(self) -> Option<MutationOutcome> {
        match self.cycle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "submission task failed");
                None
            }
        }
    }
}

/// The submission capability the picker is handed.
pub trait SubmitCart: Send + Sync {
    /// Start a submission on `control` and return without waiting for it.
    fn submit(
        &self,
        control: &CartControl,
        payload: AddToCartPayload,
    ) -> Result<PendingSubmission, SubmitError>;
}

/// Performs add-to-cart mutations and drives their controls.
#[derive(Clone)]
pub struct CartMutationService {
    backend: Arc<dyn CommerceBackend>,
    refresher: CartStateRefresher,
    collaborators: Collaborators,
    settle_delay: Duration,
    cart_page: String,
}

impl CartMutationService {
    pub fn new(
        backend: Arc<dyn CommerceBackend>,
        refresher: CartStateRefresher,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            backend,
            refresher,
            collaborators,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            cart_page: "/cart".to_string(),
        }
    }

    /// Set the wait between outcome and reset.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the page used when no drawer is registered.
    pub fn with_cart_page(mut self, path: impl Into<String>) -> Self {
        self.cart_page = path.into();
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Claim `control` and return the rest of the cycle as a future.
    ///
    /// The control is moved to `loading` before this returns. The future
    /// resolves after the settle delay, with the control back at `idle`.
    pub fn submit(
        &self,
        control: &CartControl,
        payload: AddToCartPayload,
    ) -> Result<impl Future<Output = MutationOutcome> + Send + 'static, SubmitError> {
        control.try_begin()?;
        let guard = CycleGuard::new(control.clone());
        let service = self.clone();
        Ok(async move { service.run_cycle(guard, payload, None).await })
    }

    /// Claim `control` and run the cycle on the tokio runtime.
    pub fn spawn(
        &self,
        control: &CartControl,
        payload: AddToCartPayload,
    ) -> Result<PendingSubmission, SubmitError> {
        control.try_begin()?;
        let guard = CycleGuard::new(control.clone());
        let (tx, rx) = oneshot::channel();
        let service = self.clone();
        let cycle = tokio::spawn(async move { service.run_cycle(guard, payload, Some(tx)).await });
        Ok(PendingSubmission {
            outcome: Some(rx),
            cycle,
        })
    }

    async fn run_cycle(
        &self,
        guard: CycleGuard,
        payload: AddToCartPayload,
        notify: Option<oneshot::Sender<MutationOutcome>>,
    ) -> MutationOutcome {
        let control = guard.control.clone();

        tracing::debug!(
            control = control.id(),
            variant = %payload.id,
            quantity = payload.quantity,
            "submitting add to cart"
        );

        let outcome = match self.backend.add_to_cart(&payload).await {
            Ok(item) => {
                control.settle(ButtonState::Success);
                tracing::info!(control = control.id(), variant = %payload.id, "added to cart");
                self.refresh_in_background();
                self.collaborators.open_drawer_or_redirect(&self.cart_page);
                MutationOutcome::Added(item)
            }
            Err(e) => {
                control.settle(ButtonState::Error);
                tracing::error!(control = control.id(), variant = %payload.id, error = %e, "error adding to cart");
                let message = e.user_message();
                self.collaborators.notify_error(&message);
                MutationOutcome::Failed(message)
            }
        };

        if let Some(tx) = notify {
            let _ = tx.send(outcome.clone());
        }

        tokio::time::sleep(self.settle_delay).await;
        guard.finish();
        outcome
    }

    /// Refresh the cart summary without holding up the cycle. A failed
    /// refresh is logged by the refresher; the add still stands.
    fn refresh_in_background(&self) {
        let refresher = self.refresher.clone();
        tokio::spawn(async move {
            let _ = refresher.refresh().await;
        });
    }
}

impl SubmitCart for CartMutationService {
    fn submit(
        &self,
        control: &CartControl,
        payload: AddToCartPayload,
    ) -> Result<PendingSubmission, SubmitError> {
        self.spawn(control, payload)
    }
}

impl std::fmt::Debug for CartMutationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartMutationService")
            .field("collaborators", &self.collaborators)
            .field("settle_delay", &self.settle_delay)
            .field("cart_page", &self.cart_page)
            .finish_non_exhaustive()
    }
}

/// Returns the control to idle when the cycle ends, however it ends.
struct CycleGuard {
    control: CartControl,
    finished: bool,
}

impl CycleGuard {
    fn new(control: CartControl) -> Self {
        Self {
            control,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
        self.control.reset();
    }
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(control = self.control.id(), "submission abandoned, releasing control");
            self.control.reset();
        }
    }
}
