// pesan/app/src/main.rs

mod commands;
mod config;
mod errors;
mod terminal;

use crate::commands::Command;
use crate::config::{AppConfig, LogFormat};
use crate::errors::{AppError, Result as AppResult};

use pesan::HttpBackend;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr);
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

async fn run() -> AppResult<()> {
  let args: Vec<String> = std::env::args().skip(1).collect();
  let command = Command::parse(&args)?;

  let config = AppConfig::from_env()?;
  init_tracing(config.log_format);
  tracing::info!(api_url = %config.api_url, logged_in = config.credential.is_some(), "Configuration loaded.");

  let backend = Arc::new(HttpBackend::new(&config.client_config()).map_err(AppError::from)?);
  commands::run(command, &config, backend).await
}

#[tokio::main]
async fn main() {
  if let Err(e) = run().await {
    tracing::error!(error = %e, "Command failed.");
    if !e.already_shown() {
      eprintln!("{e}");
    }
    std::process::exit(e.exit_code());
  }
}
