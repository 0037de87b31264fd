// admin_console/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use farmlink::{OrderService, RequestClient, StaticToken};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub orders: OrderService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(config: AppConfig) -> Result<Self> {
    let mut builder = RequestClient::builder(config.api_url.clone()).policy(config.retry_policy);
    if let Some(token) = &config.admin_token {
      builder = builder.token_provider(StaticToken::new(token.clone()));
    }
    let client = builder.build()?;

    Ok(Self {
      orders: OrderService::new(client),
      config: Arc::new(config),
    })
  }
}
