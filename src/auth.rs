//! Identity lookup for incoming requests
//!
//! The managed backend owns sign-up, login and sessions. We only need to turn
//! the caller's bearer token into a user id and email, which Supabase exposes
//! at `/auth/v1/user`.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SupabaseConfig;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("Missing bearer token")]
  MissingToken,

  #[error("Invalid or expired session")]
  InvalidToken,

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Auth provider error: {0}")]
  Provider(String),
}

impl AuthError {
  /// True when the caller simply is not signed in, as opposed to the
  /// provider being unreachable
  pub fn is_unauthenticated(&self) -> bool {
    matches!(self, AuthError::MissingToken | AuthError::InvalidToken)
  }
}

/// ---------------------------------------------------------------------------
/// Authenticated Identity
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
  pub id: String,
  pub email: Option<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
  async fn authenticate(&self, bearer_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| {
      value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
    })
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

/// ---------------------------------------------------------------------------
/// Supabase Auth Client
/// ---------------------------------------------------------------------------

pub struct SupabaseAuthenticator {
  client: Client,
  user_endpoint: Url,
  anon_key: String,
}

impl SupabaseAuthenticator {
  pub fn new(config: &SupabaseConfig) -> Result<Self, AuthError> {
    let user_endpoint = config
      .url
      .join("auth/v1/user")
      .map_err(|e| AuthError::Provider(format!("Invalid Supabase URL: {}", e)))?;

    Ok(Self {
      client: Client::new(),
      user_endpoint,
      anon_key: config.anon_key.clone(),
    })
  }
}

#[async_trait]
impl Authenticator for SupabaseAuthenticator {
  async fn authenticate(&self, bearer_token: &str) -> Result<AuthenticatedUser, AuthError> {
    let response = self
      .client
      .get(self.user_endpoint.clone())
      .header("apikey", &self.anon_key)
      .bearer_auth(bearer_token)
      .send()
      .await?;

    match response.status() {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AuthError::InvalidToken),
      status if !status.is_success() => {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AuthError::Provider(format!("HTTP {}: {}", status, error_text)));
      }
      _ => {}
    }

    let user: AuthenticatedUser = response
      .json()
      .await
      .map_err(|e| AuthError::Provider(format!("Failed to parse user: {}", e)))?;
    Ok(user)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
