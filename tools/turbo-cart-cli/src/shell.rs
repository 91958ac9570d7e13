//! Terminal stand-ins for the page's UI shells.

use turbo_cart::collaborators::{CartDrawer, CountIndicator, Navigator, Notifier};

use crate::output::Output;

pub struct TerminalDrawer {
    output: Output,
}

impl TerminalDrawer {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl CartDrawer for TerminalDrawer {
    fn open(&self) {
        self.output.info("Cart drawer opened");
    }
}

pub struct TerminalNotifier {
    output: Output,
}

impl TerminalNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        self.output.warn(message);
    }
}

pub struct TerminalNavigator {
    output: Output,
}

impl TerminalNavigator {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        self.output.info(&format!("Navigate to {path}"));
    }
}

/// Prints the cart count whenever it is refreshed.
pub struct CountBadge {
    output: Output,
}

impl CountBadge {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl CountIndicator for CountBadge {
    fn render(&self, count: u32, visible: bool) {
        if visible {
            self.output.kv("Cart", &count.to_string());
        } else {
            self.output.debug("Cart is empty, badge hidden");
        }
    }
}
