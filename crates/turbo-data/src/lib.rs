//! Async HTTP client utilities for TurboCommerce storefronts.
//!
//! A small builder API over `reqwest` that keeps a base URL and default
//! headers and always buffers the whole response, which is all storefront
//! AJAX endpoints need.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::FetchClient;
//!
//! let client = FetchClient::new()
//!     .with_base_url("https://shop.example.com")
//!     .with_default_header("Accept", "application/json");
//!
//! let cart: serde_json::Value = client.get("/cart.js").send().await?.json()?;
//!
//! let resp = client
//!     .post("/cart/add.js")
//!     .form(&[("id".into(), "4242".into()), ("quantity".into(), "1".into())])
//!     .send()
//!     .await?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Bound every request by a total timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let full_url = self.resolve(url.into());

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as form fields.
    pub fn form(mut self, fields: &[(String, String)]) -> Self {
        self.builder = self.builder.form(fields);
        self
    }

    /// The request as built so far.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Non-2xx statuses are returned as a `Response`, not an error; callers
    /// decide what a rejection means.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let mut request = match method {
            Method::Get => self.client.http.get(&url),
            Method::Post => self.client.http.post(&url),
        };
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = self.client.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(method = method.as_str(), url = %url, "sending request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(url = %url, status, bytes = body.len(), "response received");

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_prepended_to_paths() {
        let client = FetchClient::new().with_base_url("https://shop.example.com/");
        let req = client.get("/cart.js");
        assert_eq!(req.as_request().url(), "https://shop.example.com/cart.js");
    }

    #[test]
    fn test_absolute_urls_are_untouched() {
        let client = FetchClient::new().with_base_url("https://shop.example.com");
        let req = client.get("https://cdn.example.com/x.js");
        assert_eq!(req.as_request().url(), "https://cdn.example.com/x.js");
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = FetchClient::new().with_default_header("X-Requested-With", "XMLHttpRequest");
        let req = client.post("/cart/add.js");
        assert_eq!(
            req.as_request().headers.get("X-Requested-With").map(String::as_str),
            Some("XMLHttpRequest")
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = FetchClient::new().with_timeout(Duration::from_millis(200));
        let err = client
            .get("http://127.0.0.1:1/cart.js")
            .send()
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
