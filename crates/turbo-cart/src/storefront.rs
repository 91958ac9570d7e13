//! Page-level wiring.

use std::sync::Arc;

use crate::backend::{CommerceBackend, HttpCommerceBackend};
use crate::collaborators::{Collaborators, CountIndicator};
use crate::config::StorefrontConfig;
use crate::events::CartEvents;
use crate::mutation::{CartMutationService, SubmitCart};
use crate::picker::VariantPickerController;
use crate::refresher::CartStateRefresher;
use crate::router::AddToCartRouter;

/// Every add-to-cart component on a page, built once.
///
/// There is one refresher, one mutation service, one picker and one router
/// per page. Components receive their dependencies here rather than looking
/// each other up.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    events: CartEvents,
    refresher: CartStateRefresher,
    mutations: CartMutationService,
    picker: Arc<VariantPickerController>,
    router: AddToCartRouter,
}

impl Storefront {
    pub fn new(
        config: StorefrontConfig,
        backend: Arc<dyn CommerceBackend>,
        collaborators: Collaborators,
    ) -> Self {
        let events = CartEvents::default();
        let refresher = CartStateRefresher::new(backend.clone(), events.clone());
        let mutations =
            CartMutationService::new(backend.clone(), refresher.clone(), collaborators.clone())
                .with_settle_delay(config.settle_delay())
                .with_cart_page(config.cart_page.clone());

        let submitter: Arc<dyn SubmitCart> = Arc::new(mutations.clone());
        let picker = Arc::new(
            VariantPickerController::new(backend, submitter.clone(), collaborators)
                .with_money_format(config.money_format())
                .with_close_policy(config.close_policy),
        );
        let router = AddToCartRouter::new(submitter).with_picker(picker.clone());

        tracing::debug!(
            base_url = %config.base_url,
            settle_delay_ms = config.settle_delay_ms,
            close_policy = ?config.close_policy,
            "storefront initialized"
        );

        Self {
            config,
            events,
            refresher,
            mutations,
            picker,
            router,
        }
    }

    /// Build against the HTTP backend described by `config`.
    pub fn connect(config: StorefrontConfig, collaborators: Collaborators) -> Self {
        let backend = Arc::new(HttpCommerceBackend::from_config(&config));
        Self::new(config, backend, collaborators)
    }

    /// Keep `indicator` in sync with the cart count.
    pub fn with_indicator(self, indicator: Arc<dyn CountIndicator>) -> Self {
        self.refresher.register_indicator(indicator);
        self
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    pub fn refresher(&self) -> &CartStateRefresher {
        &self.refresher
    }

    pub fn mutations(&self) -> &CartMutationService {
        &self.mutations
    }

    pub fn picker(&self) -> &Arc<VariantPickerController> {
        &self.picker
    }

    pub fn router(&self) -> &AddToCartRouter {
        &self.router
    }
}
