use std::env;
use std::net::SocketAddr;

use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://goat-trainer.db?mode=rwc";
const DEFAULT_FROM_EMAIL: &str = "Mountain Goats <onboarding@resend.dev>";
const DEFAULT_ADMIN_EMAIL: &str = "mountaingoatscdmx@gmail.com";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid value for {name}: {reason}")]
  Invalid { name: String, reason: String },
}

/// ---------------------------------------------------------------------------
/// Configuration Structures
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
  /// Project URL, always with a trailing slash so endpoints can be joined
  pub url: Url,
  pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
  pub api_key: String,
  pub from: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub bind_addr: SocketAddr,
  pub database_url: String,
  pub supabase: SupabaseConfig,
  /// `None` when no email API key is set; plans are then only logged
  pub email: Option<EmailConfig>,
  /// Operator inbox that receives every new plan
  pub admin_email: String,
  pub log_format: LogFormat,
}

fn required(name: &str) -> Result<String, ConfigError> {
  env::var(name)
    .ok()
    .filter(|v| !v.trim().is_empty())
    .ok_or_else(|| ConfigError::MissingConfig(name.into()))
}

fn optional(name: &str) -> Option<String> {
  env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn invalid(name: &str, reason: impl ToString) -> ConfigError {
  ConfigError::Invalid {
    name: name.into(),
    reason: reason.to_string(),
  }
}

impl SupabaseConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let raw_url = required("SUPABASE_URL")?;
    let normalized = if raw_url.ends_with('/') {
      raw_url
    } else {
      format!("{}/", raw_url)
    };

    Ok(Self {
      url: Url::parse(&normalized).map_err(|e| invalid("SUPABASE_URL", e))?,
      anon_key: required("SUPABASE_ANON_KEY")?,
    })
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let bind_addr = optional("BIND_ADDR")
      .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
      .parse()
      .map_err(|e| invalid("BIND_ADDR", e))?;

    let email = optional("RESEND_API_KEY").map(|api_key| EmailConfig {
      api_key,
      from: optional("RESEND_FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
    });

    let log_format = match optional("LOG_FORMAT").as_deref() {
      None | Some("pretty") => LogFormat::Pretty,
      Some("json") => LogFormat::Json,
      Some(other) => return Err(invalid("LOG_FORMAT", format!("expected pretty or json, got {}", other))),
    };

    Ok(Self {
      bind_addr,
      database_url: optional("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
      supabase: SupabaseConfig::from_env()?,
      email,
      admin_email: optional("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
      log_format,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
