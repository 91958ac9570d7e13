//! Storefront configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_commerce::MoneyFormat;

use crate::error::ConfigError;

/// Wait between a mutation outcome and the control returning to idle.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// What the picker does after handing a selection to the mutation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// Close right after delegating, without waiting for the outcome.
    #[default]
    Immediate,
    /// Keep the picker open until the outcome is known.
    AfterOutcome,
}

/// Configuration for the add-to-cart layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Storefront origin, e.g. `https://shop.example.com`.
    pub base_url: String,

    /// Backend endpoint paths.
    pub endpoints: EndpointConfig,

    /// Settle delay in milliseconds.
    pub settle_delay_ms: u64,

    /// Prefix placed before formatted prices.
    pub money_prefix: String,

    /// Page navigated to when no cart drawer is registered.
    pub cart_page: String,

    /// Picker behaviour after submission.
    pub close_policy: ClosePolicy,

    /// Optional total timeout for backend requests, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9292".to_string(),
            endpoints: EndpointConfig::default(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            money_prefix: "Rs. ".to_string(),
            cart_page: "/cart".to_string(),
            close_policy: ClosePolicy::default(),
            request_timeout_ms: None,
        }
    }
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file, chosen by extension.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

        let parsed = if path.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_string(),
            message,
        })
    }

    /// Settle delay as a duration.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Price format for picker rendering.
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::with_prefix(self.money_prefix.clone())
    }
}

/// Backend endpoint paths, relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Add-to-cart mutation.
    pub cart_add: String,
    /// Cart summary.
    pub cart: String,
    /// Product lookup; `{handle}` is replaced with the product handle.
    pub product: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            cart_add: "/cart/add.js".to_string(),
            cart: "/cart.js".to_string(),
            product: "/products/{handle}.js".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Product lookup path for a handle.
    pub fn product_path(&self, handle: &str) -> String {
        self.product.replace("{handle}", handle)
    }
}
