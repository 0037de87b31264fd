// farmlink/src/client/transport.rs

//! The seam between the request client and the actual HTTP stack.
//!
//! `RequestClient` only ever sees `HttpRequest`/`HttpResponse`. Connection pooling,
//! TLS and DNS all live behind `HttpTransport`, which is what tests replace.

use super::request::Method;
use crate::error::{ClientError, ClientResult, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{event, Level};

/// A fully resolved request as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
  pub method: Method,
  pub url: String,
  pub headers: Vec<(String, String)>,
  pub body: Option<String>,
}

impl HttpRequest {
  /// Last value set for `name`, compared case-insensitively.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .rev()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub content_type: Option<String>,
  pub body: String,
}

impl HttpResponse {
  pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
    Self {
      status,
      content_type,
      body: body.into(),
    }
  }

  pub fn json(status: u16, value: &serde_json::Value) -> Self {
    Self::new(status, Some("application/json".to_string()), value.to_string())
  }

  pub fn text(status: u16, body: impl Into<String>) -> Self {
    Self::new(status, Some("text/plain; charset=utf-8".to_string()), body)
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  pub fn is_json(&self) -> bool {
    self
      .content_type
      .as_deref()
      .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
  }
}

/// Performs one HTTP exchange. No retries, no timeout policy: that is the client's job.
#[async_trait]
pub trait HttpTransport: Send + Sync {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
}

impl ReqwestTransport {
  pub fn new() -> ClientResult<Self> {
    let client = reqwest::Client::builder()
      .pool_max_idle_per_host(16)
      .connect_timeout(Duration::from_secs(5))
      .build()
      .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
    Ok(Self { client })
  }

  pub fn from_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

fn classify(err: reqwest::Error) -> TransportError {
  if err.is_timeout() {
    TransportError::TimedOut
  } else {
    TransportError::failed(err)
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let method = match request.method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
      Method::Put => reqwest::Method::PUT,
      Method::Patch => reqwest::Method::PATCH,
      Method::Delete => reqwest::Method::DELETE,
    };

    let mut builder = self.client.request(method, &request.url);
    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
      builder = builder.body(body);
    }

    let response = builder.send().await.map_err(classify)?;
    let status = response.status().as_u16();
    let content_type = response
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .map(str::to_owned);
    let body = response.text().await.map_err(classify)?;

    event!(Level::TRACE, status, body_len = body.len(), "Transport received response.");
    Ok(HttpResponse {
      status,
      content_type,
      body,
    })
  }
}
