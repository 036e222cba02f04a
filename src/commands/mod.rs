pub mod assessment;
pub mod error;

use axum::{
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::db::AppState;

pub use error::ApiError;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route(
      "/api/fitness-assessment",
      get(assessment::assessment_status).post(assessment::submit_assessment),
    )
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}

/// A panicking handler still answers with the generic 500 body
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = if let Some(message) = panic.downcast_ref::<String>() {
    message.clone()
  } else if let Some(message) = panic.downcast_ref::<&str>() {
    message.to_string()
  } else {
    "unknown panic payload".to_string()
  };

  ApiError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
