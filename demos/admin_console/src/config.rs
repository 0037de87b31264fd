// admin_console/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use farmlink::RetryPolicy;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_url: String,
  /// Bearer token of an admin account. Without it only public endpoints answer.
  pub admin_token: Option<String>,
  pub retry_policy: RetryPolicy,
  pub log_level: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    };

    // The web apps read NEXT_PUBLIC_API_URL, so an existing .env works unchanged.
    let api_url = get_env("API_URL")
      .or_else(|| get_env("NEXT_PUBLIC_API_URL"))
      .ok_or_else(|| AppError::Config("Missing environment variable 'API_URL' (or 'NEXT_PUBLIC_API_URL')".to_string()))?;

    let admin_token = get_env("ADMIN_TOKEN");

    let parse_u64 = |var_name: &str| -> Result<Option<u64>> {
      get_env(var_name)
        .map(|raw| {
          raw
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e)))
        })
        .transpose()
    };

    let mut retry_policy = RetryPolicy::default();
    if let Some(max_retries) = parse_u64("FARMLINK_MAX_RETRIES")? {
      let max_retries = u32::try_from(max_retries)
        .map_err(|_| AppError::Config(format!("FARMLINK_MAX_RETRIES is too large: {}", max_retries)))?;
      retry_policy = retry_policy.with_max_retries(max_retries);
    }
    if let Some(delay_ms) = parse_u64("FARMLINK_RETRY_DELAY_MS")? {
      retry_policy = retry_policy.with_retry_delay(Duration::from_millis(delay_ms));
    }
    if let Some(timeout_ms) = parse_u64("FARMLINK_TIMEOUT_MS")? {
      if timeout_ms == 0 {
        return Err(AppError::Config("FARMLINK_TIMEOUT_MS must be greater than zero".to_string()));
      }
      retry_policy = retry_policy.with_timeout(Duration::from_millis(timeout_ms));
    }

    let log_level = get_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

    Ok(Self {
      api_url,
      admin_token,
      retry_policy,
      log_level,
    })
  }
}
