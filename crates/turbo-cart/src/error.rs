//! Error types for the add-to-cart layer.
//!
//! None of these ever escape a component as a page-level failure: the
//! mutation service turns them into `ButtonState::Error` plus an optional
//! toast, the picker turns them into a silent close.

use turbo_data::FetchError;

/// Shown when a failure carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to add to cart";

/// A failed round trip to the commerce backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The request itself failed (connectivity, timeout).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        /// `description` or `message` from the error payload.
        message: Option<String>,
    },

    /// A success response whose body could not be decoded.
    #[error("Undecodable response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Text suitable for a shopper-facing toast.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Whether the request never got an HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }
}

impl From<FetchError> for BackendError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, .. } => BackendError::Rejected {
                status,
                message: None,
            },
            FetchError::ParseError(msg) => BackendError::Decode(msg),
            other => BackendError::Transport(other.to_string()),
        }
    }
}

/// A submission that was refused before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The control is already mid-cycle.
    #[error("Control {0} is busy")]
    ControlBusy(String),

    /// The control has been disabled by its owner.
    #[error("Control {0} is disabled")]
    ControlDisabled(String),
}

/// Failure loading a storefront config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },
}
