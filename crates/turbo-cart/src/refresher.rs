//! Cart summary refresh and count indicators.

use std::sync::{Arc, Mutex, PoisonError};

use turbo_commerce::CartSummary;

use crate::backend::CommerceBackend;
use crate::collaborators::CountIndicator;
use crate::error::BackendError;
use crate::events::{CartEvent, CartEvents};

/// Fetches the cart summary and pushes it to every count indicator.
///
/// Nothing is cached: each `refresh` performs its own fetch, and when two
/// overlap the one that resolves last decides what the badges show.
#[derive(Clone)]
pub struct CartStateRefresher {
    backend: Arc<dyn CommerceBackend>,
    indicators: Arc<Mutex<Vec<Arc<dyn CountIndicator>>>>,
    events: CartEvents,
}

impl CartStateRefresher {
    pub fn new(backend: Arc<dyn CommerceBackend>, events: CartEvents) -> Self {
        Self {
            backend,
            indicators: Arc::new(Mutex::new(Vec::new())),
            events,
        }
    }

    /// Register a badge to keep in sync.
    pub fn register_indicator(&self, indicator: Arc<dyn CountIndicator>) {
        self.indicators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(indicator);
    }

    /// The bus `Updated` events are published on.
    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    /// Fetch the summary, update indicators, publish `CartEvent::Updated`.
    ///
    /// On failure indicators keep their last value and nothing is published.
    pub async fn refresh(&self) -> Result<CartSummary, BackendError> {
        let summary = match self.backend.cart_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "cart refresh failed");
                return Err(e);
            }
        };

        let visible = !summary.is_empty();
        let indicators = self
            .indicators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for indicator in &indicators {
            indicator.render(summary.item_count, visible);
        }

        let listeners = self.events.publish(CartEvent::Updated(summary.clone()));
        tracing::debug!(
            item_count = summary.item_count,
            indicators = indicators.len(),
            listeners,
            "cart refreshed"
        );

        Ok(summary)
    }
}

impl std::fmt::Debug for CartStateRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStateRefresher")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, RecordingIndicator};

    #[tokio::test]
    async fn test_refresh_updates_every_indicator() {
        let backend = Arc::new(FakeBackend::new().with_cart_count(3));
        let refresher = CartStateRefresher::new(backend.clone(), CartEvents::default());
        let header = Arc::new(RecordingIndicator::default());
        let mobile = Arc::new(RecordingIndicator::default());
        refresher.register_indicator(header.clone());
        refresher.register_indicator(mobile.clone());

        let summary = refresher.refresh().await.unwrap();

        assert_eq!(summary.item_count, 3);
        assert_eq!(header.last(), Some((3, true)));
        assert_eq!(mobile.last(), Some((3, true)));
        assert_eq!(backend.cart_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_hides_indicator() {
        let backend = Arc::new(FakeBackend::new().with_cart_count(0));
        let refresher = CartStateRefresher::new(backend, CartEvents::default());
        let badge = Arc::new(RecordingIndicator::default());
        refresher.register_indicator(badge.clone());

        refresher.refresh().await.unwrap();

        assert_eq!(badge.last(), Some((0, false)));
    }

    #[tokio::test]
    async fn test_refresh_publishes_event() {
        let backend = Arc::new(FakeBackend::new().with_cart_count(2));
        let events = CartEvents::default();
        let mut rx = events.subscribe();
        let refresher = CartStateRefresher::new(backend, events);

        refresher.refresh().await.unwrap();

        let CartEvent::Updated(summary) = rx.try_recv().unwrap();
        assert_eq!(summary.item_count, 2);
    }

    #[tokio::test]
    async fn test_every_refresh_fetches() {
        let backend = Arc::new(FakeBackend::new().with_cart_count(1));
        let refresher = CartStateRefresher::new(backend.clone(), CartEvents::default());

        refresher.refresh().await.unwrap();
        refresher.refresh().await.unwrap();

        assert_eq!(backend.cart_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_indicators() {
        let backend = Arc::new(FakeBackend::new().with_cart_count(5));
        let events = CartEvents::default();
        let mut rx = events.subscribe();
        let refresher = CartStateRefresher::new(backend.clone(), events);
        let badge = Arc::new(RecordingIndicator::default());
        refresher.register_indicator(badge.clone());

        refresher.refresh().await.unwrap();
        let _ = rx.try_recv();
        backend.fail_cart(BackendError::Transport("offline".into()));
        assert!(refresher.refresh().await.is_err());

        assert_eq!(badge.renders(), vec![(5, true)]);
        assert!(rx.try_recv().is_err());
    }
}
