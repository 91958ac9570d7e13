//! In-memory backend and recording collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use turbo_commerce::{
    AddToCartPayload, CartSummary, Money, ProductHandle, ProductId, ProductOption,
    StorefrontProduct, StorefrontVariant,
};

use crate::backend::CommerceBackend;
use crate::collaborators::{
    CartDrawer, CountIndicator, Navigator, Notifier, PageScroll, ReferenceDialog,
};
use crate::error::BackendError;

/// Build a product with `images` images and the given variants
/// `(id, title, price, available)`.
pub fn product(handle: &str, variants: &[(&str, &str, i64, bool)], images: usize) -> StorefrontProduct {
    StorefrontProduct {
        id: ProductId::new(format!("p-{handle}")),
        handle: Some(ProductHandle::new(handle)),
        title: format!("Product {handle}"),
        price: Money::from_minor(variants.first().map(|v| v.2).unwrap_or(0)),
        images: (0..images).map(|i| format!("//cdn/{handle}-{i}.jpg")).collect(),
        options: vec![ProductOption {
            name: "Size".to_string(),
            values: Vec::new(),
        }],
        variants: variants
            .iter()
            .map(|(id, title, price, available)| StorefrontVariant::new(*id, *title, *price, *available))
            .collect(),
        tags: Vec::new(),
    }
}

#[derive(Default)]
struct FakeState {
    add_results: VecDeque<Result<Value, BackendError>>,
    add_delay: Option<Duration>,
    added: Vec<AddToCartPayload>,
    cart: Option<Result<CartSummary, BackendError>>,
    cart_delay: Option<Duration>,
    cart_calls: usize,
    products: HashMap<String, (Result<StorefrontProduct, BackendError>, Option<Duration>)>,
    product_calls: Vec<String>,
}

/// Scripted backend. Adds succeed unless a failure is queued.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cart_count(self, count: u32) -> Self {
        self.state.lock().unwrap().cart = Some(Ok(CartSummary::with_count(count)));
        self
    }

    pub fn with_add_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().add_delay = Some(delay);
        self
    }

    pub fn with_cart_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().cart_delay = Some(delay);
        self
    }

    pub fn reject_next_add(self, status: u16, message: Option<&str>) -> Self {
        self.fail_next_add(BackendError::Rejected {
            status,
            message: message.map(str::to_string),
        })
    }

    pub fn fail_next_add(self, error: BackendError) -> Self {
        self.state.lock().unwrap().add_results.push_back(Err(error));
        self
    }

    pub fn with_product(self, product: StorefrontProduct) -> Self {
        self.with_product_delay(product, None)
    }

    pub fn with_product_delay(self, product: StorefrontProduct, delay: Option<Duration>) -> Self {
        let handle = product
            .handle
            .as_ref()
            .map(|h| h.to_string())
            .unwrap_or_default();
        self.state
            .lock()
            .unwrap()
            .products
            .insert(handle, (Ok(product), delay));
        self
    }

    pub fn with_failing_product(self, handle: &str, delay: Option<Duration>) -> Self {
        self.state.lock().unwrap().products.insert(
            handle.to_string(),
            (Err(BackendError::Transport("lookup failed".into())), delay),
        );
        self
    }

    pub fn fail_cart(&self, error: BackendError) {
        self.state.lock().unwrap().cart = Some(Err(error));
    }

    pub fn added(&self) -> Vec<AddToCartPayload> {
        self.state.lock().unwrap().added.clone()
    }

    pub fn cart_calls(&self) -> usize {
        self.state.lock().unwrap().cart_calls
    }

    pub fn product_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().product_calls.clone()
    }
}

#[async_trait]
impl CommerceBackend for FakeBackend {
    async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<Value, BackendError> {
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            state.added.push(payload.clone());
            let result = state
                .add_results
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"id": payload.id.as_str(), "quantity": payload.quantity})));
            (result, state.add_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn cart_summary(&self) -> Result<CartSummary, BackendError> {
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            state.cart_calls += 1;
            let result = state
                .cart
                .clone()
                .unwrap_or_else(|| Ok(CartSummary::with_count(1)));
            (result, state.cart_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn product(&self, handle: &ProductHandle) -> Result<StorefrontProduct, BackendError> {
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            state.product_calls.push(handle.to_string());
            state.products.get(handle.as_str()).cloned().unwrap_or_else(|| {
                (
                    Err(BackendError::Rejected {
                        status: 404,
                        message: None,
                    }),
                    None,
                )
            })
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[derive(Default)]
pub struct RecordingDrawer {
    opened: Mutex<usize>,
}

impl RecordingDrawer {
    pub fn opened(&self) -> usize {
        *self.opened.lock().unwrap()
    }
}

impl CartDrawer for RecordingDrawer {
    fn open(&self) {
        *self.opened.lock().unwrap() += 1;
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    renders: Mutex<Vec<(u32, bool)>>,
}

impl RecordingIndicator {
    pub fn renders(&self) -> Vec<(u32, bool)> {
        self.renders.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(u32, bool)> {
        self.renders.lock().unwrap().last().copied()
    }
}

impl CountIndicator for RecordingIndicator {
    fn render(&self, count: u32, visible: bool) {
        self.renders.lock().unwrap().push((count, visible));
    }
}

/// Tracks whether page scroll is currently locked.
#[derive(Default)]
pub struct RecordingScroll {
    locked: Mutex<bool>,
}

impl RecordingScroll {
    pub fn is_locked(&self) -> bool {
        *self.locked.lock().unwrap()
    }
}

impl PageScroll for RecordingScroll {
    fn lock(&self) {
        *self.locked.lock().unwrap() = true;
    }

    fn unlock(&self) {
        *self.locked.lock().unwrap() = false;
    }
}

#[derive(Default)]
pub struct RecordingDialog {
    shown: Mutex<usize>,
}

impl RecordingDialog {
    pub fn shown(&self) -> usize {
        *self.shown.lock().unwrap()
    }
}

impl ReferenceDialog for RecordingDialog {
    fn show(&self) {
        *self.shown.lock().unwrap() += 1;
    }
}
