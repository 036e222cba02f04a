use std::io;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_LEVEL: &str = "info";

/// Dependencies that log far more than we care about at info
const NOISE_DIRECTIVES: [&str; 5] = [
  "hyper=warn",
  "hyper_util=warn",
  "reqwest=warn",
  "sqlx=warn",
  "tower_http=info",
];

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
  #[error("Invalid log directive: {0}")]
  Directive(#[from] ParseError),

  #[error("Failed to install log subscriber: {0}")]
  Init(#[from] TryInitError),
}

/// Build the filter from `RUST_LOG` (default `info`) with dependency noise capped
pub fn env_filter() -> Result<EnvFilter, LoggingError> {
  let base = std::env::var("RUST_LOG")
    .ok()
    .filter(|v| !v.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

  NOISE_DIRECTIVES
    .iter()
    .try_fold(EnvFilter::new(base), |filter, raw| -> Result<EnvFilter, LoggingError> {
      Ok(filter.add_directive(raw.parse()?))
    })
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(format: LogFormat) -> Result<(), LoggingError> {
  let registry = tracing_subscriber::registry().with(env_filter()?);

  match format {
    LogFormat::Json => registry
      .with(fmt::layer().with_target(true).with_writer(io::stdout).json())
      .try_init()?,
    LogFormat::Pretty => registry
      .with(fmt::layer().with_target(true).with_writer(io::stdout))
      .try_init()?,
  }

  Ok(())
}
