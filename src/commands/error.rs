use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("No autorizado. Por favor inicia sesión.")]
  Unauthorized,

  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("Solicitud inválida: {0}")]
  MalformedPayload(String),

  #[error("Error interno del servidor")]
  Internal(String),
}

impl From<AuthError> for ApiError {
  fn from(err: AuthError) -> Self {
    if err.is_unauthenticated() {
      ApiError::Unauthorized
    } else {
      ApiError::Internal(err.to_string())
    }
  }
}

#[derive(Serialize)]
struct ErrorBody {
  error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  required: Option<Vec<&'static str>>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Validation(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
      ApiError::Internal(ref detail) => {
        error!(detail = %detail, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let required = match &self {
      ApiError::Validation(ValidationError::MissingFields(fields)) => Some(fields.clone()),
      _ => None,
    };

    let body = ErrorBody {
      error: self.to_string(),
      required,
    };

    (status, Json(body)).into_response()
  }
}
