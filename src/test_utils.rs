//! Test utilities and helpers for unit and router testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Stand-in auth and notification collaborators and stub HTTP servers
//! - Helper assertions

use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::auth::{AuthError, AuthenticatedUser, Authenticator};
use crate::db::AppState;
use crate::models::{
  CalculatedTrainingPlan, FitnessAssessmentInput, HikeDifficultyLevel, SessionDuration,
  StrengthTrainingType, TargetHike, TrainingDay,
};
use crate::notify::{Notifier, NotifyError};
use crate::planner::calculate_plan;

pub const VALID_TOKEN: &str = "valid-token";
pub const TEST_USER_ID: &str = "5b1f0c2e-test-user";
pub const TEST_USER_EMAIL: &str = "lucia@example.com";
pub const TEST_ADMIN_EMAIL: &str = "ops@example.com";

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// An intermediate runner (score 3) aiming at a tier 4 hike
pub fn mock_assessment_input(target_date: NaiveDate) -> FitnessAssessmentInput {
  FitnessAssessmentInput {
    first_name: "Lucía".to_string(),
    age: 32,
    max_running_distance_km: 5.0,
    comfortable_pace: "6:30".to_string(),
    hikes_last_3_months: 1,
    typical_elevation_gain_m: 600,
    strength_training_frequency: 0,
    strength_training_types: vec![StrengthTrainingType::LegsCore],
    available_days_per_week: 4,
    preferred_training_days: vec![TrainingDay::Tuesday, TrainingDay::Thursday, TrainingDay::Saturday],
    session_duration: SessionDuration::Medium,
    target_hike: TargetHike {
      name: "Pico de Orizaba".to_string(),
      level: HikeDifficultyLevel::Level4,
      distance_km: 26.5,
      elevation_m: 1800,
      date: target_date,
    },
  }
}

/// Wire form of `mock_assessment_input`, as the onboarding form posts it
pub fn mock_submission_json(target_date: NaiveDate) -> Value {
  json!({
    "firstName": "Lucía",
    "age": "32",
    "maxRunningDistanceKm": "5",
    "comfortablePace": "6:30",
    "hikesLast3Months": "1",
    "typicalElevationGainM": 600,
    "strengthTrainingFrequency": "0",
    "strengthTrainingTypes": ["legs_core"],
    "availableDaysPerWeek": "4",
    "preferredTrainingDays": ["tuesday", "thursday", "saturday"],
    "sessionDuration": "medium",
    "targetHikeName": "Pico de Orizaba",
    "targetHikeLevel": "4",
    "targetHikeDistanceKm": "26.5",
    "targetHikeElevationM": "1800",
    "targetHikeDate": target_date.format("%Y-%m-%d").to_string(),
  })
}

/// Plan calculated on 2026-10-19 for a hike on 2027-06-05
pub fn mock_training_plan() -> CalculatedTrainingPlan {
  let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
  let target = NaiveDate::from_ymd_opt(2027, 6, 5).expect("valid date");
  calculate_plan(&mock_assessment_input(target), TEST_USER_EMAIL, today)
}

/// ---------------------------------------------------------------------------
/// Collaborator Stand-ins
/// ---------------------------------------------------------------------------

/// Accepts only `VALID_TOKEN`
pub struct StaticAuthenticator;

#[async_trait]
impl Authenticator for StaticAuthenticator {
  async fn authenticate(&self, bearer_token: &str) -> Result<AuthenticatedUser, AuthError> {
    if bearer_token == VALID_TOKEN {
      Ok(AuthenticatedUser {
        id: TEST_USER_ID.to_string(),
        email: Some(TEST_USER_EMAIL.to_string()),
      })
    } else {
      Err(AuthError::InvalidToken)
    }
  }
}

/// Auth provider that cannot be reached
pub struct UnreachableAuthenticator;

#[async_trait]
impl Authenticator for UnreachableAuthenticator {
  async fn authenticate(&self, _bearer_token: &str) -> Result<AuthenticatedUser, AuthError> {
    Err(AuthError::Provider("HTTP 503 Service Unavailable: upstream unavailable".to_string()))
  }
}

/// Blows up mid-request, for checking the router's panic boundary
pub struct PanickingAuthenticator;

#[async_trait]
impl Authenticator for PanickingAuthenticator {
  async fn authenticate(&self, _bearer_token: &str) -> Result<AuthenticatedUser, AuthError> {
    panic!("session cache poisoned");
  }
}

/// Forwards every plan it is asked to send
pub struct RecordingNotifier {
  sender: mpsc::UnboundedSender<CalculatedTrainingPlan>,
}

impl RecordingNotifier {
  pub fn new() -> (Self, mpsc::UnboundedReceiver<CalculatedTrainingPlan>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self { sender }, receiver)
  }
}

#[async_trait]
impl Notifier for RecordingNotifier {
  async fn send_plan(&self, plan: &CalculatedTrainingPlan) -> Result<(), NotifyError> {
    self
      .sender
      .send(plan.clone())
      .map_err(|e| NotifyError::Api(e.to_string()))
  }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
  async fn send_plan(&self, _plan: &CalculatedTrainingPlan) -> Result<(), NotifyError> {
    Err(NotifyError::Api("mail provider unavailable".to_string()))
  }
}

/// Serve `app` on an ephemeral local port and return its base URL.
/// Stands in for third-party HTTP APIs.
pub async fn spawn_stub_server(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("Failed to bind stub server");
  let addr = listener.local_addr().expect("Stub server has no address");

  tokio::spawn(async move {
    axum::serve(listener, app).await.expect("Stub server failed");
  });

  format!("http://{}", addr)
}

pub fn test_state(db: SqlitePool, notifier: Arc<dyn Notifier>) -> Arc<AppState> {
  test_state_with_auth(db, Arc::new(StaticAuthenticator), notifier)
}

pub fn test_state_with_auth(
  db: SqlitePool,
  auth: Arc<dyn Authenticator>,
  notifier: Arc<dyn Notifier>,
) -> Arc<AppState> {
  Arc::new(AppState {
    db,
    auth,
    notifier,
    admin_email: TEST_ADMIN_EMAIL.to_string(),
  })
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validation::AssessmentSubmission;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'fitness_assessments'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    // the UNIQUE user_id constraint is the only index
    let indexes: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name = 'fitness_assessments'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query indexes");

    assert_eq!(indexes.len(), 1);
    assert!(indexes[0].0.starts_with("sqlite_autoindex_fitness_assessments"));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_submission_matches_mock_input() {
    let target = NaiveDate::from_ymd_opt(2027, 6, 5).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let submission: AssessmentSubmission = serde_json::from_value(mock_submission_json(target)).unwrap();
    let input = submission.validate(today).unwrap();

    assert_eq!(input, mock_assessment_input(target));
  }

  #[tokio::test]
  async fn test_static_authenticator() {
    let user = StaticAuthenticator.authenticate(VALID_TOKEN).await.unwrap();
    assert_eq!(user.id, TEST_USER_ID);
    assert!(StaticAuthenticator.authenticate("other").await.is_err());
  }
}
