// pesan/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PesanError {
    #[error("Handler missing for step: {step_name}")]
    HandlerMissing { step_name: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend answered {status} for {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Payment for order {order_id} returned no usable redirect URL")]
    MissingRedirect { order_id: i64 },

    #[error("Invalid order reference '{reference}'")]
    InvalidOrderReference { reference: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Error in handler or external operation. Source: {source}")]
    HandlerError {
        #[source]
        source: AnyhowError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PesanError {
    /// Message the backend attached to a non-2xx answer, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            PesanError::Api { message, .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<AnyhowError> for PesanError {
    fn from(err: AnyhowError) -> Self {
        PesanError::HandlerError { source: err }
    }
}

pub type PesanResult<T, E = PesanError> = std::result::Result<T, E>;
