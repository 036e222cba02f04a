use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use tracing::info;

use crate::auth::Authenticator;
use crate::notify::Notifier;

pub type DbPool = SqlitePool;

/// Shared state handed to every request handler
pub struct AppState {
  pub db: DbPool,
  pub auth: Arc<dyn Authenticator>,
  pub notifier: Arc<dyn Notifier>,
  /// Recorded on each assessment as the address its plan was sent to
  pub admin_email: String,
}

/// Connect to the database and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
  info!(database_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
