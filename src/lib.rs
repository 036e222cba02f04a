pub mod assessments;
pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod notify;
pub mod planner;
pub mod validation;

#[cfg(test)]
mod test_utils;

use auth::SupabaseAuthenticator;
use config::AppConfig;
use db::AppState;
use notify::{LogNotifier, Notifier, ResendNotifier};
use std::sync::Arc;
use tracing::{info, warn};

/// Load configuration, open the database and serve the API until shutdown
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = AppConfig::from_env()?;
  logging::init_logging(config.log_format)?;

  let pool = db::initialize_db(&config.database_url).await?;

  let notifier: Arc<dyn Notifier> = match &config.email {
    Some(email) => Arc::new(ResendNotifier::new(email, config.admin_email.clone())),
    None => {
      warn!("RESEND_API_KEY not configured, training plans will be logged instead of emailed");
      Arc::new(LogNotifier::new(config.admin_email.clone()))
    }
  };

  let state = Arc::new(AppState {
    db: pool,
    auth: Arc::new(SupabaseAuthenticator::new(&config.supabase)?),
    notifier,
    admin_email: config.admin_email.clone(),
  });

  let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
  info!(addr = %config.bind_addr, "Listening");

  axum::serve(listener, commands::router(state)).await?;

  Ok(())
}
