// farmlink/src/error.rs
use anyhow::Error as AnyhowError;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// A failure below HTTP: no response was received at all.
#[derive(Debug, Error)]
pub enum TransportError {
  /// The underlying transport gave up on its own timer.
  #[error("Transport timed out")]
  TimedOut,

  #[error("Transport failure: {source}")]
  Failed {
    #[source]
    source: AnyhowError,
  },
}

impl TransportError {
  pub fn failed(source: impl Into<AnyhowError>) -> Self {
    TransportError::Failed { source: source.into() }
  }
}

impl From<AnyhowError> for TransportError {
  fn from(err: AnyhowError) -> Self {
    TransportError::Failed { source: err }
  }
}

/// Coarse classification of a `ClientError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  Server,
  Timeout,
  Network,
  MalformedResponse,
  Serialization,
  Configuration,
}

impl ErrorKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      ErrorKind::Server => "server_error",
      ErrorKind::Timeout => "timeout_error",
      ErrorKind::Network => "network_error",
      ErrorKind::MalformedResponse => "malformed_response",
      ErrorKind::Serialization => "serialization_error",
      ErrorKind::Configuration => "configuration_error",
    }
  }
}

/// The single failure channel of `RequestClient::execute`.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with a non-2xx status. Never retried.
  #[error("Server responded {status}: {message}")]
  Server { status: u16, message: String, payload: Value },

  /// Every attempt hit the per-attempt timeout.
  #[error("Connection timed out after {attempts} attempt(s) ({timeout:?} each). Please try again later.")]
  Timeout { attempts: u32, timeout: Duration },

  /// Every attempt failed in the transport.
  #[error("Cannot connect to server after {attempts} attempt(s): {source}")]
  Network {
    attempts: u32,
    #[source]
    source: TransportError,
  },

  /// A 2xx body that claimed to be JSON (or had to decode into a typed value) and did not parse.
  #[error("Malformed response (HTTP {status}): {message}")]
  MalformedResponse { status: u16, message: String, body: String },

  #[error("Failed to serialize request body: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Client configuration error: {0}")]
  Configuration(String),
}

impl ClientError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      ClientError::Server { .. } => ErrorKind::Server,
      ClientError::Timeout { .. } => ErrorKind::Timeout,
      ClientError::Network { .. } => ErrorKind::Network,
      ClientError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
      ClientError::Serialization(_) => ErrorKind::Serialization,
      ClientError::Configuration(_) => ErrorKind::Configuration,
    }
  }

  /// Only connectivity failures are worth retrying from the UI; a server decision
  /// or a bad payload will come back the same way.
  pub fn is_retryable(&self) -> bool {
    matches!(self, ClientError::Timeout { .. } | ClientError::Network { .. })
  }

  /// HTTP status, when a response was received.
  pub fn status(&self) -> Option<u16> {
    match self {
      ClientError::Server { status, .. } | ClientError::MalformedResponse { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type ClientResult<T, E = ClientError> = std::result::Result<T, E>;
