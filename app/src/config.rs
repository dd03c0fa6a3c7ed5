// pesan/app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use pesan::account::LOG_PAGE_LIMIT;
use pesan::api::http::{DEFAULT_GEOCODER_URL, DEFAULT_TIMEOUT};
use pesan::api::ClientConfig;
use pesan::tickets::TICKETS_PAGE_LIMIT;
use pesan::Credential;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_url: String,
  /// Nominatim instance for the `location` command.
  pub geocoder_url: String,
  /// `None` when no token is configured, i.e. not logged in.
  pub credential: Option<Credential>,
  pub http_timeout: Duration,
  pub tickets_page_limit: u32,
  pub log_page_limit: u32,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let parse_u32 = |var_name: &str, default: u32| -> Result<u32> {
      match env::var(var_name) {
        Ok(raw) => raw
          .trim()
          .parse::<u32>()
          .ok()
          .filter(|v| *v > 0)
          .ok_or_else(|| AppError::Config(format!("Invalid {}: '{}'", var_name, raw))),
        Err(_) => Ok(default),
      }
    };

    let api_url = get_env("PESAN_API_URL")?;
    let geocoder_url = get_env("PESAN_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());
    let credential = get_env("PESAN_ACCESS_TOKEN").ok().and_then(Credential::new);
    let http_timeout = Duration::from_secs(u64::from(parse_u32(
      "PESAN_HTTP_TIMEOUT_SECS",
      DEFAULT_TIMEOUT.as_secs() as u32,
    )?));
    let tickets_page_limit = parse_u32("PESAN_TICKETS_PAGE_LIMIT", TICKETS_PAGE_LIMIT)?;
    let log_page_limit = parse_u32("PESAN_LOG_PAGE_LIMIT", LOG_PAGE_LIMIT)?;
    let log_format = match get_env("PESAN_LOG_FORMAT").as_deref().map(str::trim) {
      Ok("json") => LogFormat::Json,
      Ok("pretty") | Ok("") | Err(_) => LogFormat::Pretty,
      Ok(other) => return Err(AppError::Config(format!("Invalid PESAN_LOG_FORMAT: '{}'", other))),
    };

    Ok(Self {
      api_url,
      geocoder_url,
      credential,
      http_timeout,
      tickets_page_limit,
      log_page_limit,
      log_format,
    })
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url: self.api_url.clone(),
      timeout: self.http_timeout,
    }
  }

  pub fn geocoder_config(&self) -> ClientConfig {
    ClientConfig {
      base_url: self.geocoder_url.clone(),
      timeout: self.http_timeout,
    }
  }
}
