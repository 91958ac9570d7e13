//! Buffered storefront responses.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::FetchError;

/// Keys an error payload may carry shopper-facing text under, in order of
/// preference.
const ERROR_TEXT_KEYS: [&str; 2] = ["description", "message"];

/// A response whose body has been read in full.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the server labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|ct| ct.contains("json"))
    }

    pub fn text(&self) -> Result<String, FetchError> {
        std::str::from_utf8(&self.body)
            .map(str::to_string)
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Header lookup, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Shopper-facing text from a JSON error payload: `description`, else
    /// `message`. Empty strings and non-JSON bodies yield `None`.
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        ERROR_TEXT_KEYS
            .iter()
            .filter_map(|key| value.get(key).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// Pass 2xx responses through and turn anything else into
    /// [`FetchError::HttpError`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .error_message()
            .unwrap_or_else(|| format!("status {}", self.status));
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
