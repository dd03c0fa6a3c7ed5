// pesan/app/src/errors.rs

use pesan::PesanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Usage: {0}")]
  Usage(String),

  #[error("Not logged in. Set PESAN_ACCESS_TOKEN first.")]
  LoginRequired,

  /// The checkout failure notice was already shown.
  #[error("Checkout did not reach the payment gateway.")]
  CheckoutFailed,

  /// The backend refused an action; carries the message meant for the user.
  #[error("{message}")]
  Rejected {
    message: String,
    #[source]
    source: PesanError,
  },

  #[error("{source}")]
  Pesan {
    #[from]
    source: PesanError,
  },

  #[error("Could not write output: {0}")]
  Io(#[from] std::io::Error),

  #[error("Could not render output: {0}")]
  Json(#[from] serde_json::Error),
}

impl AppError {
  /// Process exit code for this error.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Usage(_) => 2,
      AppError::CheckoutFailed | AppError::Rejected { .. } => 3,
      AppError::Config(_) => 78,
      _ => 1,
    }
  }

  /// Whether the user already saw this failure on the terminal.
  pub fn already_shown(&self) -> bool {
    matches!(self, AppError::CheckoutFailed)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
