//! End-to-end add-to-cart flows through a fully wired storefront.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use turbo_cart::collaborators::{CartDrawer, Collaborators, CountIndicator, Notifier, PageScroll};
use turbo_cart::{
    BackendError, ButtonState, CartControl, ClickRoute, ClosePolicy, CommerceBackend,
    OpenOutcome, ProductCardButton, Storefront, StorefrontConfig,
};
use turbo_commerce::{
    AddToCartPayload, CartSummary, ProductHandle, StorefrontProduct, VariantId,
};

#[derive(Default)]
struct Shop {
    products: HashMap<String, StorefrontProduct>,
    cart: Mutex<Vec<AddToCartPayload>>,
    sold_out: Vec<String>,
}

impl Shop {
    fn with_product(mut self, json: Value) -> Self {
        let product: StorefrontProduct = serde_json::from_value(json).unwrap();
        let handle = product.handle.clone().unwrap().into_inner();
        self.products.insert(handle, product);
        self
    }

    fn sold_out(mut self, variant: &str) -> Self {
        self.sold_out.push(variant.to_string());
        self
    }

    fn lines(&self) -> Vec<AddToCartPayload> {
        self.cart.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommerceBackend for Shop {
    async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<Value, BackendError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if self.sold_out.iter().any(|v| v == payload.id.as_str()) {
            return Err(BackendError::Rejected {
                status: 422,
                message: Some("All 1 items are already in your cart".to_string()),
            });
        }
        self.cart.lock().unwrap().push(payload.clone());
        Ok(json!({ "id": payload.id.as_str(), "quantity": payload.quantity }))
    }

    async fn cart_summary(&self) -> Result<CartSummary, BackendError> {
        let count = self.cart.lock().unwrap().iter().map(|l| l.quantity).sum();
        Ok(CartSummary::with_count(count))
    }

    async fn product(&self, handle: &ProductHandle) -> Result<StorefrontProduct, BackendError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.products
            .get(handle.as_str())
            .cloned()
            .ok_or(BackendError::Rejected {
                status: 404,
                message: None,
            })
    }
}

#[derive(Default)]
struct Page {
    drawer_opens: Mutex<usize>,
    toasts: Mutex<Vec<String>>,
    badge: Mutex<Option<(u32, bool)>>,
    scroll_locked: Mutex<bool>,
}

impl CartDrawer for Page {
    fn open(&self) {
        *self.drawer_opens.lock().unwrap() += 1;
    }
}

impl Notifier for Page {
    fn error(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }
}

impl CountIndicator for Page {
    fn render(&self, count: u32, visible: bool) {
        *self.badge.lock().unwrap() = Some((count, visible));
    }
}

impl PageScroll for Page {
    fn lock(&self) {
        *self.scroll_locked.lock().unwrap() = true;
    }

    fn unlock(&self) {
        *self.scroll_locked.lock().unwrap() = false;
    }
}

fn shop() -> Shop {
    Shop::default()
        .with_product(json!({
            "id": 100,
            "handle": "enamel-mug",
            "title": "Enamel Mug",
            "price": 89900,
            "images": ["//cdn/mug.jpg"],
            "variants": [{"id": 1001, "title": "Default Title", "price": 89900, "available": true}]
        }))
        .with_product(json!({
            "id": 200,
            "handle": "stacking-ring",
            "title": "Stacking Ring",
            "price": 249900,
            "tags": ["Rings", "Silver"],
            "images": ["//cdn/ring-1.jpg", "//cdn/ring-2.jpg"],
            "options": [{"name": "Ring Size", "values": ["6", "7", "8"]}],
            "variants": [
                {"id": 2006, "title": "6", "price": 249900, "available": false},
                {"id": 2007, "title": "7", "price": 249900, "available": true},
                {"id": 2008, "title": "8", "price": 259900, "available": true}
            ]
        }))
}

fn storefront(shop: Arc<Shop>, page: &Arc<Page>, policy: ClosePolicy) -> Storefront {
    let config = StorefrontConfig {
        close_policy: policy,
        ..StorefrontConfig::default()
    };
    let collaborators = Collaborators::new()
        .with_drawer(page.clone())
        .with_notifier(page.clone())
        .with_page_scroll(page.clone());
    Storefront::new(config, shop, collaborators).with_indicator(page.clone())
}

fn card(shop: &Shop, handle: &str) -> ProductCardButton {
    let product = &shop.products[handle];
    ProductCardButton::for_product(CartControl::new(format!("card-{handle}"), "Add to Cart"), product)
}

#[tokio::test(start_paused = true)]
async fn test_single_variant_card_adds_directly() {
    let shop = Arc::new(shop());
    let page = Arc::new(Page::default());
    let storefront = storefront(shop.clone(), &page, ClosePolicy::Immediate);
    let button = card(&shop, "enamel-mug");

    let ClickRoute::Submitted(pending) = storefront.router().click(&button).await else {
        panic!("single variant card should submit");
    };
    assert!(matches!(storefront.router().click(&button).await, ClickRoute::Ignored));

    let outcome = pending.settled().await.unwrap();

    assert!(outcome.is_added());
    assert_eq!(shop.lines(), vec![AddToCartPayload::single("100")]);
    assert_eq!(*page.badge.lock().unwrap(), Some((1, true)));
    assert_eq!(*page.drawer_opens.lock().unwrap(), 1);
    assert!(!storefront.picker().is_open());
    assert_eq!(button.control.state(), ButtonState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_multi_variant_card_goes_through_picker() {
    let shop = Arc::new(shop());
    let page = Arc::new(Page::default());
    let storefront = storefront(shop.clone(), &page, ClosePolicy::Immediate);
    let button = card(&shop, "stacking-ring");

    let route = storefront.router().click(&button).await;
    assert!(matches!(route, ClickRoute::PickerOpened(OpenOutcome::Ready)));
    assert!(shop.lines().is_empty());
    assert!(*page.scroll_locked.lock().unwrap());

    let picker = storefront.picker();
    let view = picker.view();
    assert_eq!(view.option_label, "Ring Size");
    assert!(view.size_chart_visible);
    assert_eq!(view.price, "Rs. 2499.00");
    assert_eq!(picker.selected_variant(), Some(VariantId::new("2007")));

    picker.select_variant(&VariantId::new("2008"));
    assert_eq!(picker.view().price, "Rs. 2599.00");

    let pending = picker.handle_add_to_cart().await.unwrap();
    assert!(!picker.is_open());
    assert!(!*page.scroll_locked.lock().unwrap());

    pending.settled().await.unwrap();
    assert_eq!(shop.lines(), vec![AddToCartPayload::single("2008")]);
    assert_eq!(*page.drawer_opens.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_pick_stays_open_with_after_outcome_policy() {
    let shop = Arc::new(shop().sold_out("2007"));
    let page = Arc::new(Page::default());
    let storefront = storefront(shop.clone(), &page, ClosePolicy::AfterOutcome);
    let picker = storefront.picker();

    picker.open(ProductHandle::new("stacking-ring")).await;
    let pending = picker.handle_add_to_cart().await.unwrap();

    assert!(picker.is_open());
    assert_eq!(picker.view().add_control.state, ButtonState::Error);
    assert_eq!(
        *page.toasts.lock().unwrap(),
        vec!["All 1 items are already in your cart".to_string()]
    );

    pending.settled().await;
    picker.select_variant(&VariantId::new("2008"));
    picker.handle_add_to_cart().await.unwrap();

    assert!(!picker.is_open());
    assert_eq!(shop.lines(), vec![AddToCartPayload::single("2008")]);
}

#[tokio::test(start_paused = true)]
async fn test_switching_products_mid_fetch() {
    let shop = Arc::new(shop());
    let page = Arc::new(Page::default());
    let storefront = storefront(shop.clone(), &page, ClosePolicy::Immediate);
    let picker = storefront.picker().clone();

    let first = {
        let picker = picker.clone();
        tokio::spawn(async move { picker.open(ProductHandle::new("stacking-ring")).await })
    };
    tokio::task::yield_now().await;
    picker.close();
    let second = picker.open(ProductHandle::new("enamel-mug")).await;

    assert_eq!(second, OpenOutcome::Ready);
    assert_eq!(first.await.unwrap(), OpenOutcome::Stale);
    let view = picker.view();
    assert_eq!(view.title, "Enamel Mug");
    assert_eq!(view.variants.len(), 1);
    assert!(!view.size_chart_visible);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_product_closes_picker_quietly() {
    let shop = Arc::new(shop());
    let page = Arc::new(Page::default());
    let storefront = storefront(shop, &page, ClosePolicy::Immediate);

    let outcome = storefront.picker().open(ProductHandle::new("missing")).await;

    assert_eq!(outcome, OpenOutcome::Failed);
    assert!(!storefront.picker().is_open());
    assert!(page.toasts.lock().unwrap().is_empty());
    assert!(!*page.scroll_locked.lock().unwrap());
}
