//! Storage for completed questionnaires
//!
//! One row per user. Re-submitting the questionnaire overwrites the previous
//! answers and plan summary instead of creating a history.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{CalculatedTrainingPlan, FitnessAssessmentInput, FitnessAssessmentRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Failed to encode field: {0}")]
  Encode(#[from] serde_json::Error),
}

/// Insert or replace the assessment for `user_id`
pub async fn upsert_assessment(
  pool: &SqlitePool,
  user_id: &str,
  input: &FitnessAssessmentInput,
  plan: &CalculatedTrainingPlan,
  notification_email: &str,
  sent_at: DateTime<Utc>,
) -> Result<(), StoreError> {
  let strength_types_json = serde_json::to_string(&input.strength_training_types)?;
  let preferred_days_json = serde_json::to_string(&input.preferred_training_days)?;

  sqlx::query(
    r#"
    INSERT INTO fitness_assessments (
      user_id, first_name, age,
      max_running_distance_km, comfortable_pace, hikes_last_3_months,
      typical_elevation_gain_m, strength_training_frequency, strength_training_types_json,
      available_days_per_week, preferred_training_days_json, session_duration,
      target_hike_name, target_hike_level, target_hike_distance_km,
      target_hike_elevation_m, target_hike_date,
      fitness_level, recommended_training_weeks, training_start_date, first_herd_run_date,
      training_plan_email, training_plan_sent_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(user_id) DO UPDATE SET
      first_name = excluded.first_name,
      age = excluded.age,
      max_running_distance_km = excluded.max_running_distance_km,
      comfortable_pace = excluded.comfortable_pace,
      hikes_last_3_months = excluded.hikes_last_3_months,
      typical_elevation_gain_m = excluded.typical_elevation_gain_m,
      strength_training_frequency = excluded.strength_training_frequency,
      strength_training_types_json = excluded.strength_training_types_json,
      available_days_per_week = excluded.available_days_per_week,
      preferred_training_days_json = excluded.preferred_training_days_json,
      session_duration = excluded.session_duration,
      target_hike_name = excluded.target_hike_name,
      target_hike_level = excluded.target_hike_level,
      target_hike_distance_km = excluded.target_hike_distance_km,
      target_hike_elevation_m = excluded.target_hike_elevation_m,
      target_hike_date = excluded.target_hike_date,
      fitness_level = excluded.fitness_level,
      recommended_training_weeks = excluded.recommended_training_weeks,
      training_start_date = excluded.training_start_date,
      first_herd_run_date = excluded.first_herd_run_date,
      training_plan_email = excluded.training_plan_email,
      training_plan_sent_at = excluded.training_plan_sent_at,
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(user_id)
  .bind(&input.first_name)
  .bind(input.age)
  .bind(input.max_running_distance_km)
  .bind(&input.comfortable_pace)
  .bind(input.hikes_last_3_months)
  .bind(input.typical_elevation_gain_m)
  .bind(input.strength_training_frequency)
  .bind(strength_types_json)
  .bind(input.available_days_per_week)
  .bind(preferred_days_json)
  .bind(input.session_duration.to_string())
  .bind(&input.target_hike.name)
  .bind(input.target_hike.level.to_string())
  .bind(input.target_hike.distance_km)
  .bind(input.target_hike.elevation_m)
  .bind(input.target_hike.date)
  .bind(plan.fitness_level.to_string())
  .bind(plan.recommended_training_weeks)
  .bind(plan.training_start_date)
  .bind(plan.first_herd_run_date)
  .bind(notification_email)
  .bind(sent_at)
  .execute(pool)
  .await?;

  Ok(())
}

pub async fn load_assessment(
  pool: &SqlitePool,
  user_id: &str,
) -> Result<Option<FitnessAssessmentRecord>, StoreError> {
  let record = sqlx::query_as::<_, FitnessAssessmentRecord>(
    r#"
    SELECT
      id, user_id, first_name, age,
      max_running_distance_km, comfortable_pace, hikes_last_3_months,
      typical_elevation_gain_m, strength_training_frequency, strength_training_types_json,
      available_days_per_week, preferred_training_days_json, session_duration,
      target_hike_name, target_hike_level, target_hike_distance_km,
      target_hike_elevation_m, target_hike_date,
      fitness_level, recommended_training_weeks, training_start_date, first_herd_run_date,
      training_plan_email, training_plan_sent_at, updated_at
    FROM fitness_assessments
    WHERE user_id = ?
    "#,
  )
  .bind(user_id)
  .fetch_optional(pool)
  .await?;

  Ok(record)
}
