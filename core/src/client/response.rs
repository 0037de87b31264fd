// farmlink/src/client/response.rs

//! Turns a raw `HttpResponse` into data or a classified `ClientError`.

use super::transport::HttpResponse;
use crate::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{event, Level};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from server";
pub const NON_JSON_MESSAGE: &str = "Server returned non-JSON response";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Reads the body as JSON when the server says it is JSON; otherwise wraps the text
/// as `{"message": ...}`. An empty JSON body reads as `{}`.
pub fn parse_body(response: &HttpResponse) -> Result<Value, serde_json::Error> {
  if response.is_json() {
    if response.body.trim().is_empty() {
      return Ok(json!({}));
    }
    return serde_json::from_str(&response.body);
  }

  let message = if response.body.is_empty() {
    NON_JSON_MESSAGE
  } else {
    response.body.as_str()
  };
  Ok(json!({ "message": message }))
}

/// 2xx becomes data (or `MalformedResponse` when its JSON is broken). Anything else
/// becomes `Server`, with the best payload that could be recovered.
pub fn interpret(response: HttpResponse) -> ClientResult<Value> {
  let parsed = parse_body(&response);

  if response.is_success() {
    return parsed.map_err(|e| {
      event!(Level::ERROR, status = response.status, error = %e, "Failed to parse JSON response.");
      ClientError::MalformedResponse {
        status: response.status,
        message: format!("{}: {}", INVALID_JSON_MESSAGE, e),
        body: response.body.clone(),
      }
    });
  }

  let payload = parsed.unwrap_or_else(|_| json!({ "message": INVALID_JSON_MESSAGE }));
  let message = payload
    .get("message")
    .and_then(Value::as_str)
    .unwrap_or(FALLBACK_ERROR_MESSAGE)
    .to_string();
  event!(Level::ERROR, status = response.status, message = %message, "API error response.");
  Err(ClientError::Server {
    status: response.status,
    message,
    payload,
  })
}

/// Decodes a successful payload into `T`. A shape mismatch is a malformed response,
/// not something a retry could fix.
pub fn decode<T: DeserializeOwned>(status: u16, value: Value) -> ClientResult<T> {
  serde_json::from_value::<T>(value.clone()).map_err(|e| ClientError::MalformedResponse {
    status,
    message: format!("Unexpected response shape: {}", e),
    body: value.to_string(),
  })
}
