// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use farmlink::{HttpRequest, HttpResponse, HttpTransport, RequestClient, RetryPolicy, TransportError};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Level;

// --- Scripted transport ---

/// What the fake API does for one attempt.
#[derive(Debug, Clone)]
pub enum Step {
  Respond(HttpResponse),
  /// Transport failure with this message (connection refused, DNS, ...).
  Fail(&'static str),
  /// The transport itself reports a timeout.
  TransportTimeout,
  /// Never answers; only the client's per-attempt timeout ends the attempt.
  Hang,
}

impl Step {
  pub fn json(status: u16, body: Value) -> Self {
    Step::Respond(HttpResponse::json(status, &body))
  }

  pub fn ok() -> Self {
    Step::json(200, json!({"message": "ok"}))
  }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
  pub request: HttpRequest,
  pub at: tokio::time::Instant,
}

type Responder = dyn Fn(&HttpRequest, usize) -> Step + Send + Sync;

/// An `HttpTransport` driven by a closure of (request, call index). Clones share the
/// call log, so a test can keep one handle and give another to the client.
#[derive(Clone)]
pub struct FakeApi {
  responder: Arc<Responder>,
  calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeApi {
  pub fn with<F>(responder: F) -> Self
  where
    F: Fn(&HttpRequest, usize) -> Step + Send + Sync + 'static,
  {
    FakeApi {
      responder: Arc::new(responder),
      calls: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub fn always(step: Step) -> Self {
    FakeApi::with(move |_, _| step.clone())
  }

  /// Plays `steps` in order; the last one repeats.
  pub fn sequence(steps: Vec<Step>) -> Self {
    assert!(!steps.is_empty(), "sequence needs at least one step");
    FakeApi::with(move |_, index| steps[index.min(steps.len() - 1)].clone())
  }

  pub fn calls(&self) -> Vec<RecordedCall> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().len()
  }

  /// Gaps between consecutive attempts, in virtual time.
  pub fn gaps(&self) -> Vec<std::time::Duration> {
    let calls = self.calls.lock();
    calls.windows(2).map(|pair| pair[1].at - pair[0].at).collect()
  }

  pub fn client(&self) -> RequestClient {
    self.client_with(RetryPolicy::default())
  }

  pub fn client_with(&self, policy: RetryPolicy) -> RequestClient {
    RequestClient::builder("http://api.test")
      .transport(self.clone())
      .policy(policy)
      .build()
      .expect("fake client builds")
  }
}

#[async_trait]
impl HttpTransport for FakeApi {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let step = {
      let mut calls = self.calls.lock();
      let index = calls.len();
      calls.push(RecordedCall {
        request: request.clone(),
        at: tokio::time::Instant::now(),
      });
      (self.responder)(&request, index)
    };

    match step {
      Step::Respond(response) => Ok(response),
      Step::Fail(message) => Err(TransportError::failed(anyhow::anyhow!(message))),
      Step::TransportTimeout => Err(TransportError::TimedOut),
      Step::Hang => {
        std::future::pending::<()>().await;
        unreachable!()
      }
    }
  }
}

// --- Fixtures ---

pub fn item_json(id: u64, status: &str) -> Value {
  json!({
    "id": id,
    "product_id": id + 1000,
    "product_name": format!("Produce {}", id),
    "farmer_name": "Ravi",
    "quantity": 2,
    "price_per_unit": "10.00",
    "total_price": "20.00",
    "status": status,
    "created_at": "2024-05-01T10:20:30"
  })
}

pub fn order_json(id: u64, items: &[(u64, &str)]) -> Value {
  let items: Vec<Value> = items.iter().map(|(item_id, status)| item_json(*item_id, status)).collect();
  json!({
    "id": id,
    "order_number": format!("ORD-{:04}", id),
    "status": "pending",
    "total_amount": format!("{}.00", items.len() * 20),
    "delivery_address": "12 Mill Road, Nashik",
    "contact_number": "9800000000",
    "created_at": "2024-05-01T10:20:30.123456",
    "updated_at": "2024-05-01T10:20:30.123456",
    "buyer_name": "Asha",
    "items": items
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
