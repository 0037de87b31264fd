// tests/request_client_tests.rs
mod common;
use common::*;
use farmlink::{ApiRequest, ClientError, Method, RequestClient, RetryPolicy, SessionToken, TransportError};
use futures_util::future::join_all;
use serde_json::json;
use std::time::Duration;

fn assert_gap(actual: Duration, expected_ms: u64) {
  let expected = Duration::from_millis(expected_ms);
  assert!(
    actual >= expected && actual < expected + Duration::from_millis(5),
    "expected a gap of ~{:?}, got {:?}",
    expected,
    actual
  );
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_is_retried_max_retries_times() {
  setup_tracing();
  let api = FakeApi::always(Step::Fail("connection refused"));

  let result = api.client().execute(ApiRequest::get("/api/orders")).await;

  match result {
    Err(ClientError::Network { attempts, source }) => {
      assert_eq!(attempts, 4);
      assert!(source.to_string().contains("connection refused"));
    }
    other => panic!("Expected ClientError::Network, got {:?}", other),
  }
  assert_eq!(api.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_server_error_is_not_retried() {
  setup_tracing();
  let api = FakeApi::always(Step::json(403, json!({"message": "Admin access required!"})));

  let result = api.client().execute(ApiRequest::get("/api/orders")).await;

  match result {
    Err(ClientError::Server { status, message, payload }) => {
      assert_eq!(status, 403);
      assert_eq!(message, "Admin access required!");
      assert_eq!(payload, json!({"message": "Admin access required!"}));
    }
    other => panic!("Expected ClientError::Server, got {:?}", other),
  }
  assert_eq!(api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_network_backoff_doubles_between_attempts() {
  setup_tracing();
  let api = FakeApi::always(Step::Fail("dns lookup failed"));

  let _ = api.client().execute(ApiRequest::get("/api/orders")).await;

  let gaps = api.gaps();
  assert_eq!(gaps.len(), 3);
  assert_gap(gaps[0], 1000);
  assert_gap(gaps[1], 2000);
  assert_gap(gaps[2], 4000);
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_use_flat_delay_and_classify_as_timeout() {
  setup_tracing();
  let api = FakeApi::always(Step::Hang);
  let started = tokio::time::Instant::now();

  let result = api.client().execute(ApiRequest::get("/api/orders")).await;

  match result {
    Err(ClientError::Timeout { attempts, timeout }) => {
      assert_eq!(attempts, 4);
      assert_eq!(timeout, Duration::from_millis(15_000));
    }
    other => panic!("Expected ClientError::Timeout, got {:?}", other),
  }
  // Each gap is one full timeout plus the flat 1s delay.
  for gap in api.gaps() {
    assert_gap(gap, 16_000);
  }
  assert_gap(started.elapsed(), 4 * 15_000 + 3 * 1_000);
}

#[tokio::test(start_paused = true)]
async fn test_transport_reported_timeout_counts_as_timeout() {
  setup_tracing();
  let api = FakeApi::always(Step::TransportTimeout);

  let result = api.client_with(RetryPolicy::default().with_max_retries(1)).execute(ApiRequest::get("/x")).await;

  assert!(matches!(result, Err(ClientError::Timeout { attempts: 2, .. })));
  assert_gap(api.gaps()[0], 1000);
}

#[tokio::test(start_paused = true)]
async fn test_final_error_follows_last_failure() {
  setup_tracing();
  let api = FakeApi::sequence(vec![
    Step::Hang,
    Step::Fail("reset"),
    Step::Fail("reset"),
    Step::Fail("connection reset by peer"),
  ]);

  let result = api.client().execute(ApiRequest::get("/api/orders")).await;

  match result {
    Err(ClientError::Network { attempts, source }) => {
      assert_eq!(attempts, 4);
      assert!(matches!(source, TransportError::Failed { .. }));
    }
    other => panic!("Expected ClientError::Network, got {:?}", other),
  }
  let gaps = api.gaps();
  assert_gap(gaps[0], 15_000 + 1_000);
  assert_gap(gaps[1], 2_000);
  assert_gap(gaps[2], 4_000);
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failures() {
  setup_tracing();
  let api = FakeApi::sequence(vec![
    Step::Fail("connection refused"),
    Step::Hang,
    Step::json(200, json!({"orders": []})),
  ]);

  let value = api.client().execute(ApiRequest::get("/api/orders")).await.unwrap();

  assert_eq!(value, json!({"orders": []}));
  assert_eq!(api.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_json_is_not_retried() {
  setup_tracing();
  let api = FakeApi::always(Step::Respond(farmlink::HttpResponse::new(
    200,
    Some("application/json".into()),
    "{not json",
  )));

  let result = api.client().execute(ApiRequest::get("/api/orders")).await;

  assert!(matches!(result, Err(ClientError::MalformedResponse { status: 200, .. })));
  assert_eq!(api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_per_call_policy_overrides_default() {
  setup_tracing();
  let api = FakeApi::always(Step::Fail("connection refused"));

  let result = api
    .client()
    .execute(ApiRequest::get("/api/orders").policy(RetryPolicy::no_retries()))
    .await;

  assert!(matches!(result, Err(ClientError::Network { attempts: 1, .. })));
  assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_headers_and_body_are_attached() {
  setup_tracing();
  let api = FakeApi::always(Step::ok());
  let session = SessionToken::new();
  let client = RequestClient::builder("http://api.test/")
    .transport(api.clone())
    .token_provider(session.clone())
    .build()
    .unwrap();

  client.execute(ApiRequest::get("/api/orders")).await.unwrap();
  session.set("jwt-abc");
  client
    .execute(
      ApiRequest::put("/api/orders/item/7/status")
        .json(&json!({"status": "completed"}))
        .unwrap(),
    )
    .await
    .unwrap();

  let calls = api.calls();
  let get = &calls[0].request;
  assert_eq!(get.method, Method::Get);
  assert_eq!(get.url, "http://api.test/api/orders");
  assert_eq!(get.header("content-type"), Some("application/json"));
  assert_eq!(get.header("authorization"), None);
  assert!(get.body.is_none());

  let put = &calls[1].request;
  assert_eq!(put.method, Method::Put);
  assert_eq!(put.url, "http://api.test/api/orders/item/7/status");
  assert_eq!(put.header("Authorization"), Some("Bearer jwt-abc"));
  assert_eq!(put.body.as_deref(), Some(r#"{"status":"completed"}"#));
}

#[tokio::test]
async fn test_plain_text_response_is_wrapped() {
  setup_tracing();
  let api = FakeApi::always(Step::Respond(farmlink::HttpResponse::text(200, "Welcome to the API")));

  let value = api.client().execute(ApiRequest::get("/")).await.unwrap();

  assert_eq!(value, json!({"message": "Welcome to the API"}));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_calls_are_independent() {
  setup_tracing();
  // Odd-numbered items fail at the transport, even ones answer straight away.
  let api = FakeApi::with(|request, _| {
    if request.url.ends_with("/1") || request.url.ends_with("/3") {
      Step::Fail("connection reset")
    } else {
      Step::ok()
    }
  });
  let client = api.client_with(RetryPolicy::no_retries());

  let results = join_all((0..4).map(|id| client.execute(ApiRequest::get(format!("/api/items/{}", id))))).await;

  let failed: Vec<usize> = results
    .iter()
    .enumerate()
    .filter(|(_, r)| r.is_err())
    .map(|(i, _)| i)
    .collect();
  assert_eq!(failed, vec![1, 3]);
  assert_eq!(api.call_count(), 4);
}
