// farmlink/src/client/execution.rs

//! `RequestClient` and its retry loop.
//!
//! One `execute` call is one logical exchange: up to `max_retries + 1` attempts,
//! each bounded by the policy's timeout, with backoff between transient failures.
//! A response that arrives, good or bad, ends the loop.

use super::policy::{FailureKind, RetryPolicy};
use super::request::ApiRequest;
use super::response::{decode, interpret};
use super::session::{NoToken, TokenProvider};
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::error::{ClientError, ClientResult, TransportError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// What went wrong with the last attempt that got no response.
enum AttemptFailure {
  TimedOut,
  Transport(TransportError),
}

impl AttemptFailure {
  fn kind(&self) -> FailureKind {
    match self {
      AttemptFailure::TimedOut | AttemptFailure::Transport(TransportError::TimedOut) => FailureKind::Timeout,
      AttemptFailure::Transport(_) => FailureKind::Network,
    }
  }
}

/// Client for the marketplace REST API.
///
/// Cloning is cheap and clones share the transport and token provider. Calls do not
/// share any mutable state, so any number of `execute` futures may run at once.
#[derive(Clone)]
pub struct RequestClient {
  base_url: String,
  transport: Arc<dyn HttpTransport>,
  tokens: Arc<dyn TokenProvider>,
  policy: RetryPolicy,
}

impl std::fmt::Debug for RequestClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RequestClient")
      .field("base_url", &self.base_url)
      .field("policy", &self.policy)
      .finish_non_exhaustive()
  }
}

pub struct RequestClientBuilder {
  base_url: String,
  transport: Option<Arc<dyn HttpTransport>>,
  tokens: Arc<dyn TokenProvider>,
  policy: RetryPolicy,
}

impl RequestClientBuilder {
  pub fn transport<T: HttpTransport + 'static>(mut self, transport: T) -> Self {
    self.transport = Some(Arc::new(transport));
    self
  }

  pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
    self.transport = Some(transport);
    self
  }

  pub fn token_provider<P: TokenProvider + 'static>(mut self, tokens: P) -> Self {
    self.tokens = Arc::new(tokens);
    self
  }

  pub fn policy(mut self, policy: RetryPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Fails when the base URL is blank, or when no transport was given and the
  /// default `reqwest` transport cannot be built.
  pub fn build(self) -> ClientResult<RequestClient> {
    let base_url = self.base_url.trim().trim_end_matches('/').to_string();
    if base_url.is_empty() {
      return Err(ClientError::Configuration("API URL is not configured".to_string()));
    }

    let transport = match self.transport {
      Some(transport) => transport,
      None => Arc::new(ReqwestTransport::new()?),
    };

    event!(Level::DEBUG, base_url = %base_url, "Request client configured.");
    Ok(RequestClient {
      base_url,
      transport,
      tokens: self.tokens,
      policy: self.policy,
    })
  }
}

impl RequestClient {
  pub fn builder(base_url: impl Into<String>) -> RequestClientBuilder {
    RequestClientBuilder {
      base_url: base_url.into(),
      transport: None,
      tokens: Arc::new(NoToken),
      policy: RetryPolicy::default(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn policy(&self) -> &RetryPolicy {
    &self.policy
  }

  /// `base_url` + `endpoint`, with exactly one `/` between them.
  pub fn url_for(&self, endpoint: &str) -> String {
    if endpoint.starts_with('/') {
      format!("{}{}", self.base_url, endpoint)
    } else {
      format!("{}/{}", self.base_url, endpoint)
    }
  }

  /// Header names are unique in the result, compared case-insensitively; the last
  /// value set wins. Order of precedence: `Content-Type`, caller headers, bearer token.
  fn prepare(&self, request: &ApiRequest) -> HttpRequest {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in &request.headers {
      set_header(&mut headers, name, value.clone());
    }

    let token = request.bearer.clone().or_else(|| self.tokens.bearer_token());
    if let Some(token) = token {
      set_header(&mut headers, "Authorization", format!("Bearer {}", token));
    }

    HttpRequest {
      method: request.method,
      url: self.url_for(&request.endpoint),
      headers,
      body: request.body.clone(),
    }
  }

  /// Performs the request and returns the parsed response body.
  ///
  /// - 2xx: the JSON body, `{}` for an empty JSON body, or `{"message": text}` for non-JSON.
  /// - non-2xx: `ClientError::Server` on the first attempt, never retried.
  /// - no response: retried up to `max_retries` times, then `Timeout` or `Network`
  ///   depending on how the last attempt failed.
  pub async fn execute(&self, request: ApiRequest) -> ClientResult<Value> {
    self.execute_with_status(request).await.map(|(_, value)| value)
  }

  /// `execute`, then decode into `T`.
  pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
    let (status, value) = self.execute_with_status(request).await?;
    decode(status, value)
  }

  pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
    self.send_json(ApiRequest::get(endpoint)).await
  }

  #[instrument(
    name = "RequestClient::execute",
    skip_all,
    fields(method = %request.method, endpoint = %request.endpoint),
    err(Display)
  )]
  async fn execute_with_status(&self, request: ApiRequest) -> ClientResult<(u16, Value)> {
    let policy = request.policy.unwrap_or(self.policy);
    let http_request = self.prepare(&request);
    let mut retries_used: u32 = 0;

    loop {
      let attempt = retries_used + 1;
      event!(Level::DEBUG, attempt, url = %http_request.url, "Sending request.");

      let failure = match tokio::time::timeout(policy.timeout, self.transport.send(http_request.clone())).await {
        Ok(Ok(response)) => {
          let status = response.status;
          event!(Level::DEBUG, attempt, status, "Response received.");
          return interpret(response).map(|value| (status, value));
        }
        Ok(Err(transport_err)) => AttemptFailure::Transport(transport_err),
        Err(_elapsed) => AttemptFailure::TimedOut,
      };

      if retries_used >= policy.max_retries {
        return Err(Self::give_up(failure, attempt, &policy));
      }

      retries_used += 1;
      let kind = failure.kind();
      let delay = policy.delay_before_retry(retries_used, kind);
      match &failure {
        AttemptFailure::TimedOut => event!(
          Level::WARN,
          attempt,
          timeout_ms = policy.timeout.as_millis() as u64,
          "Request timed out, retrying ({}/{}) in {:?}.",
          retries_used,
          policy.max_retries,
          delay
        ),
        AttemptFailure::Transport(e) => event!(
          Level::WARN,
          attempt,
          error = %e,
          "Network error, retrying ({}/{}) in {:?}.",
          retries_used,
          policy.max_retries,
          delay
        ),
      }
      tokio::time::sleep(delay).await;
    }
  }

  fn give_up(failure: AttemptFailure, attempts: u32, policy: &RetryPolicy) -> ClientError {
    match failure.kind() {
      FailureKind::Timeout => {
        event!(Level::ERROR, attempts, "Request timed out on every attempt.");
        ClientError::Timeout {
          attempts,
          timeout: policy.timeout,
        }
      }
      FailureKind::Network => {
        let source = match failure {
          AttemptFailure::Transport(e) => e,
          AttemptFailure::TimedOut => TransportError::TimedOut,
        };
        event!(Level::ERROR, attempts, error = %source, "Network error on every attempt.");
        ClientError::Network { attempts, source }
      }
    }
  }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
  headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
  headers.push((name.to_string(), value));
}
