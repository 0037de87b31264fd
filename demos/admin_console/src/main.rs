// admin_console/src/main.rs

mod cli;
mod commands;
mod config;
mod errors;
mod render;
mod state;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::state::AppState;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("error: {}", e);
      return e.exit_code();
    }
  };

  // Logs go to stderr so command output can be piped. RUST_LOG overrides LOG_LEVEL.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&app_config.log_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  tracing::debug!(api_url = %app_config.api_url, policy = ?app_config.retry_policy, "Configuration loaded.");

  let result = match AppState::new(app_config) {
    Ok(state) => commands::run(cli.command, &state).await,
    Err(e) => Err(e),
  };

  match result {
    Ok(output) => {
      print!("{}", output);
      ExitCode::SUCCESS
    }
    Err(e) => report(&e),
  }
}

fn report(error: &AppError) -> ExitCode {
  tracing::error!(application_error = %error, "Command failed.");
  eprintln!("error: {}", error);
  if error.is_retryable() {
    eprintln!("hint: the API could not be reached; retrying may help.");
  }
  error.exit_code()
}
