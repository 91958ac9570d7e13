//! Commerce backend contract and its HTTP implementation.

use async_trait::async_trait;
use serde_json::Value;
use turbo_commerce::{AddToCartPayload, CartSummary, ProductHandle, StorefrontProduct};
use turbo_data::{FetchClient, Response};

use crate::config::{EndpointConfig, StorefrontConfig};
use crate::error::BackendError;

/// The three storefront endpoints the add-to-cart layer talks to.
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// Add a line to the cart. The success payload is opaque to callers.
    async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<Value, BackendError>;

    /// Fetch the current cart summary.
    async fn cart_summary(&self) -> Result<CartSummary, BackendError>;

    /// Look a product up by handle.
    async fn product(&self, handle: &ProductHandle) -> Result<StorefrontProduct, BackendError>;
}

/// Backend speaking the storefront AJAX API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCommerceBackend {
    client: FetchClient,
    endpoints: EndpointConfig,
}

impl HttpCommerceBackend {
    /// Create a backend from a configured client.
    pub fn new(client: FetchClient, endpoints: EndpointConfig) -> Self {
        Self { client, endpoints }
    }

    /// Create a backend from storefront config.
    pub fn from_config(config: &StorefrontConfig) -> Self {
        let mut client = FetchClient::new()
            .with_base_url(config.base_url.clone())
            .with_default_header("Accept", "application/json")
            .with_default_header("X-Requested-With", "XMLHttpRequest");
        if let Some(timeout) = config.request_timeout() {
            client = client.with_timeout(timeout);
        }
        Self::new(client, config.endpoints.clone())
    }
}

#[async_trait]
impl CommerceBackend for HttpCommerceBackend {
    async fn add_to_cart(&self, payload: &AddToCartPayload) -> Result<Value, BackendError> {
        let response = self
            .client
            .post(self.endpoints.cart_add.as_str())
            .form(&payload.to_form_fields())
            .send()
            .await?;

        if !response.is_success() {
            return Err(rejection(&response));
        }
        response.json().map_err(BackendError::from)
    }

    async fn cart_summary(&self) -> Result<CartSummary, BackendError> {
        let response = self.client.get(self.endpoints.cart.as_str()).send().await?;
        let response = response.error_for_status()?;
        response.json().map_err(BackendError::from)
    }

    async fn product(&self, handle: &ProductHandle) -> Result<StorefrontProduct, BackendError> {
        let path = self.endpoints.product_path(handle.as_str());
        let response = self.client.get(path).send().await?;
        let response = response.error_for_status()?;
        response.json().map_err(BackendError::from)
    }
}

/// Build a rejection from a non-success mutation response.
fn rejection(response: &Response) -> BackendError {
    BackendError::Rejected {
        status: response.status,
        message: response.error_message(),
    }
}
