use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::{FitnessLevel, StrengthTrainingType, TrainingDay};
use super::plan::PlanConfirmation;

/// Stored row of `fitness_assessments` (one per user)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FitnessAssessmentRecord {
  pub id: i64,
  pub user_id: String,
  pub first_name: String,
  pub age: i64,
  pub max_running_distance_km: f64,
  pub comfortable_pace: String,
  pub hikes_last_3_months: i64,
  pub typical_elevation_gain_m: i64,
  pub strength_training_frequency: i64,
  pub strength_training_types_json: String,
  pub available_days_per_week: i64,
  pub preferred_training_days_json: String,
  pub session_duration: String,
  pub target_hike_name: String,
  pub target_hike_level: String,
  pub target_hike_distance_km: f64,
  pub target_hike_elevation_m: i64,
  pub target_hike_date: NaiveDate,
  pub fitness_level: String,
  pub recommended_training_weeks: i64,
  pub training_start_date: NaiveDate,
  pub first_herd_run_date: NaiveDate,
  pub training_plan_email: Option<String>,
  pub training_plan_sent_at: Option<DateTime<Utc>>,
  pub updated_at: NaiveDateTime,
}

impl FitnessAssessmentRecord {
  pub fn strength_training_types(&self) -> Result<Vec<StrengthTrainingType>, serde_json::Error> {
    serde_json::from_str(&self.strength_training_types_json)
  }

  pub fn preferred_training_days(&self) -> Result<Vec<TrainingDay>, serde_json::Error> {
    serde_json::from_str(&self.preferred_training_days_json)
  }

  /// Rebuild the confirmation summary from the flattened columns
  pub fn confirmation(&self) -> Result<PlanConfirmation, String> {
    let fitness_level: FitnessLevel = self.fitness_level.parse()?;
    let recommended_weeks = u32::try_from(self.recommended_training_weeks)
      .map_err(|e| format!("Invalid recommended weeks {}: {}", self.recommended_training_weeks, e))?;

    Ok(PlanConfirmation {
      fitness_level,
      recommended_weeks,
      training_start_date: self.training_start_date,
      first_herd_run_date: self.first_herd_run_date,
    })
  }
}
