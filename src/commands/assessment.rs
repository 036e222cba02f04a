use axum::{
  extract::{rejection::JsonRejection, State},
  http::HeaderMap,
  Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::error::ApiError;
use crate::assessments::{load_assessment, upsert_assessment};
use crate::auth::{bearer_token, AuthError, AuthenticatedUser};
use crate::db::AppState;
use crate::models::PlanConfirmation;
use crate::planner::calculate_plan;
use crate::validation::AssessmentSubmission;

const SUBMIT_SUCCESS_MESSAGE: &str = "Evaluación guardada exitosamente";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
  pub success: bool,
  pub message: String,
  pub training_plan: PlanConfirmation,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
  pub completed: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub training_plan: Option<PlanConfirmation>,
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedUser, ApiError> {
  let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
  Ok(state.auth.authenticate(token).await?)
}

/// Accept a questionnaire, compute the plan, store it and notify the operator.
/// Storage and notification failures are logged and never fail the request.
pub async fn submit_assessment(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  payload: Result<Json<AssessmentSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
  let user = authenticate(&state, &headers).await?;

  let Json(submission) = payload.map_err(|rejection| ApiError::MalformedPayload(rejection.body_text()))?;

  let today = Utc::now().date_naive();
  let input = submission.validate(today)?;
  let user_email = user.email.clone().unwrap_or_default();
  let plan = calculate_plan(&input, &user_email, today);

  info!(
    user_id = %user.id,
    fitness_level = %plan.fitness_level,
    recommended_weeks = plan.recommended_training_weeks,
    "Training plan calculated"
  );

  if let Err(e) = upsert_assessment(&state.db, &user.id, &input, &plan, &state.admin_email, Utc::now()).await {
    error!(user_id = %user.id, error = %e, "Failed to save fitness assessment");
  }

  let notifier = Arc::clone(&state.notifier);
  let emailed_plan = plan.clone();
  tokio::spawn(async move {
    if let Err(e) = notifier.send_plan(&emailed_plan).await {
      error!(error = %e, "Failed to send training plan notification");
    }
  });

  Ok(Json(SubmitResponse {
    success: true,
    message: SUBMIT_SUCCESS_MESSAGE.to_string(),
    training_plan: PlanConfirmation::from(&plan),
  }))
}

/// Whether the caller already completed the questionnaire
pub async fn assessment_status(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
  let user = authenticate(&state, &headers).await?;

  let record = load_assessment(&state.db, &user.id)
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

  let training_plan = record
    .map(|r| r.confirmation())
    .transpose()
    .map_err(ApiError::Internal)?;

  Ok(Json(StatusResponse {
    completed: training_plan.is_some(),
    training_plan,
  }))
}
