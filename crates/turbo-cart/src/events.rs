//! Page-level cart event bus.

use tokio::sync::broadcast;
use turbo_commerce::CartSummary;

/// Buffered events per subscriber before the slowest one starts lagging.
const DEFAULT_CAPACITY: usize = 16;

/// Events other page components can listen for.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// The cart was refreshed; carries the fetched summary.
    Updated(CartSummary),
}

/// Broadcast bus for [`CartEvent`]s.
#[derive(Debug, Clone)]
pub struct CartEvents {
    sender: broadcast::Sender<CartEvent>,
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl CartEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Listen for future events.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns how many listeners received it; having
    /// none is fine.
    pub fn publish(&self, event: CartEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_listeners() {
        let events = CartEvents::default();
        assert_eq!(events.publish(CartEvent::Updated(CartSummary::with_count(1))), 0);
    }

    #[tokio::test]
    async fn test_listeners_receive_summary() {
        let events = CartEvents::default();
        let mut rx = events.subscribe();

        events.publish(CartEvent::Updated(CartSummary::with_count(4)));

        let CartEvent::Updated(summary) = rx.recv().await.unwrap();
        assert_eq!(summary.item_count, 4);
    }
}
