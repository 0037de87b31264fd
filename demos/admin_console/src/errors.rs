// admin_console/src/errors.rs

use farmlink::ClientError;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("{source}")]
  Client {
    #[from] // Allows conversion from farmlink::ClientError
    source: ClientError,
  },

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Some items of a bulk status change were not updated.
  #[error("{failed} of {total} item(s) were not updated")]
  PartialUpdate { failed: usize, total: usize, retryable: bool },
}

impl AppError {
  /// Connectivity failures may go away on their own; everything else will not.
  pub fn is_retryable(&self) -> bool {
    match self {
      AppError::Client { source } => source.is_retryable(),
      AppError::PartialUpdate { retryable, .. } => *retryable,
      _ => false,
    }
  }

  pub fn exit_code(&self) -> ExitCode {
    match self {
      AppError::Config(_) => ExitCode::from(2),
      AppError::Client { .. } | AppError::NotFound(_) | AppError::PartialUpdate { .. } => ExitCode::from(1),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
