//! Collaborating UI shells.
//!
//! The add-to-cart layer never renders drawers, toasts or dialogs itself.
//! It calls out through these traits, and each one is optional: a missing
//! drawer becomes a navigation to the cart page, a missing notifier becomes
//! a log line.

use std::sync::Arc;

/// Shows current cart contents.
pub trait CartDrawer: Send + Sync {
    fn open(&self);
}

/// Shopper-facing toasts.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Page navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Page scroll affordance, locked while a modal is up.
pub trait PageScroll: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
}

/// A secondary reference dialog, e.g. a ring size chart.
pub trait ReferenceDialog: Send + Sync {
    fn show(&self);
}

/// A cart count badge.
pub trait CountIndicator: Send + Sync {
    /// Display `count`; `visible` is false when the cart is empty.
    fn render(&self, count: u32, visible: bool);
}

/// The collaborators registered on a page.
#[derive(Clone, Default)]
pub struct Collaborators {
    drawer: Option<Arc<dyn CartDrawer>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    scroll: Option<Arc<dyn PageScroll>>,
    size_chart: Option<Arc<dyn ReferenceDialog>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drawer(mut self, drawer: Arc<dyn CartDrawer>) -> Self {
        self.drawer = Some(drawer);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_page_scroll(mut self, scroll: Arc<dyn PageScroll>) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn with_size_chart(mut self, dialog: Arc<dyn ReferenceDialog>) -> Self {
        self.size_chart = Some(dialog);
        self
    }

    /// Open the drawer, or navigate to `cart_page` when there is none.
    pub(crate) fn open_drawer_or_redirect(&self, cart_page: &str) {
        match (&self.drawer, &self.navigator) {
            (Some(drawer), _) => drawer.open(),
            (None, Some(navigator)) => navigator.navigate(cart_page),
            (None, None) => {
                tracing::info!(path = cart_page, "no drawer or navigator registered, redirect skipped")
            }
        }
    }

    /// Toast `message`, or log it when no notifier is registered.
    pub(crate) fn notify_error(&self, message: &str) {
        match &self.notifier {
            Some(notifier) => notifier.error(message),
            None => tracing::error!(error = message, "add to cart failed"),
        }
    }

    pub(crate) fn lock_scroll(&self) {
        if let Some(scroll) = &self.scroll {
            scroll.lock();
        }
    }

    pub(crate) fn unlock_scroll(&self) {
        if let Some(scroll) = &self.scroll {
            scroll.unlock();
        }
    }

    /// Show the size chart. Returns false when none is registered.
    pub(crate) fn show_size_chart(&self) -> bool {
        match &self.size_chart {
            Some(dialog) => {
                dialog.show();
                true
            }
            None => {
                tracing::warn!("size chart dialog not registered");
                false
            }
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("drawer", &self.drawer.is_some())
            .field("notifier", &self.notifier.is_some())
            .field("navigator", &self.navigator.is_some())
            .field("scroll", &self.scroll.is_some())
            .field("size_chart", &self.size_chart.is_some())
            .finish()
    }
}
