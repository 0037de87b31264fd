// farmlink/src/client/request.rs

//! Caller-facing description of one logical API call.

use super::policy::RetryPolicy;
use crate::error::ClientResult;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Post => "POST",
      Method::Put => "PUT",
      Method::Patch => "PATCH",
      Method::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An endpoint, a method and everything optional around them.
///
/// The JSON body is serialized once, when it is attached, so every retry sends
/// the exact same bytes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
  pub(crate) method: Method,
  pub(crate) endpoint: String,
  pub(crate) body: Option<String>,
  pub(crate) headers: Vec<(String, String)>,
  pub(crate) policy: Option<RetryPolicy>,
  pub(crate) bearer: Option<String>,
}

impl ApiRequest {
  pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
    Self {
      method,
      endpoint: endpoint.into(),
      body: None,
      headers: Vec::new(),
      policy: None,
      bearer: None,
    }
  }

  pub fn get(endpoint: impl Into<String>) -> Self {
    Self::new(Method::Get, endpoint)
  }

  pub fn post(endpoint: impl Into<String>) -> Self {
    Self::new(Method::Post, endpoint)
  }

  pub fn put(endpoint: impl Into<String>) -> Self {
    Self::new(Method::Put, endpoint)
  }

  pub fn patch(endpoint: impl Into<String>) -> Self {
    Self::new(Method::Patch, endpoint)
  }

  pub fn delete(endpoint: impl Into<String>) -> Self {
    Self::new(Method::Delete, endpoint)
  }

  /// Attaches a JSON body.
  pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
    self.body = Some(serde_json::to_string(body)?);
    Ok(self)
  }

  /// Adds a header. A later header with the same name (compared case-insensitively)
  /// replaces an earlier one, so this can override the default `Content-Type`. The
  /// bearer token, when there is one, still replaces a caller `Authorization`.
  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  /// Overrides the client's default retry policy for this call only.
  pub fn policy(mut self, policy: RetryPolicy) -> Self {
    self.policy = Some(policy);
    self
  }

  /// Uses this bearer token instead of asking the client's token provider.
  pub fn bearer(mut self, token: impl Into<String>) -> Self {
    self.bearer = Some(token.into());
    self
  }

  pub fn method(&self) -> Method {
    self.method
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  pub fn body(&self) -> Option<&str> {
    self.body.as_deref()
  }
}
