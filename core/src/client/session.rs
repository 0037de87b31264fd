// farmlink/src/client/session.rs

//! Bearer-token providers injected into the request client.
//!
//! The client never reaches into ambient storage for credentials; whoever builds it
//! decides where the token comes from.

use parking_lot::RwLock;
use std::sync::Arc;

/// Supplies the bearer token for outgoing requests, if there is one.
pub trait TokenProvider: Send + Sync {
  fn bearer_token(&self) -> Option<String>;
}

/// Anonymous requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
  fn bearer_token(&self) -> Option<String> {
    None
  }
}

/// A fixed token, e.g. a service credential read from the environment.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
  pub fn new(token: impl Into<String>) -> Self {
    StaticToken(token.into())
  }
}

impl std::fmt::Debug for StaticToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("StaticToken([REDACTED])")
  }
}

impl TokenProvider for StaticToken {
  fn bearer_token(&self) -> Option<String> {
    Some(self.0.clone())
  }
}

/// A token that a login flow can set or clear while clients keep using it.
///
/// Clones share the same slot. The lock is only held to copy the string out and is
/// never held across an `.await`.
#[derive(Clone, Default)]
pub struct SessionToken(Arc<RwLock<Option<String>>>);

impl SessionToken {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn signed_in(token: impl Into<String>) -> Self {
    SessionToken(Arc::new(RwLock::new(Some(token.into()))))
  }

  pub fn set(&self, token: impl Into<String>) {
    *self.0.write() = Some(token.into());
  }

  pub fn clear(&self) {
    self.0.write().take();
  }

  pub fn is_signed_in(&self) -> bool {
    self.0.read().is_some()
  }
}

impl std::fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SessionToken")
      .field("signed_in", &self.is_signed_in())
      .finish()
  }
}

impl TokenProvider for SessionToken {
  fn bearer_token(&self) -> Option<String> {
    // An empty stored token counts as signed out.
    self.0.read().clone().filter(|token| !token.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn session_token_is_shared_between_clones() {
    let session = SessionToken::new();
    let held_by_client = session.clone();
    assert_eq!(held_by_client.bearer_token(), None);

    session.set("jwt-1");
    assert_eq!(held_by_client.bearer_token().as_deref(), Some("jwt-1"));

    session.clear();
    assert!(!held_by_client.is_signed_in());
  }

  #[test]
  fn empty_token_is_treated_as_signed_out() {
    let session = SessionToken::signed_in("");
    assert_eq!(session.bearer_token(), None);
  }

  #[test]
  fn static_token_debug_is_redacted() {
    let token = StaticToken::new("secret");
    assert_eq!(format!("{:?}", token), "StaticToken([REDACTED])");
    assert_eq!(token.bearer_token().as_deref(), Some("secret"));
  }
}
