use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::assessment::{FitnessLevel, HikeDifficultyLevel, SessionDuration, TrainingDay};

/// Inclusive, 1-based week range. An empty phase has `end_week == start_week - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRange {
  pub start_week: u32,
  pub end_week: u32,
}

impl PhaseRange {
  pub fn weeks(&self) -> u32 {
    (self.end_week + 1).saturating_sub(self.start_week)
  }

  pub fn is_empty(&self) -> bool {
    self.weeks() == 0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
  BaseBuilding,
  StrengthBuilding,
  PeakTraining,
  Taper,
}

impl TrainingPhase {
  pub fn label(&self) -> &'static str {
    match self {
      TrainingPhase::BaseBuilding => "🌱 Base Building",
      TrainingPhase::StrengthBuilding => "💪 Strength Building",
      TrainingPhase::PeakTraining => "⚡ Peak Training",
      TrainingPhase::Taper => "🧘 Taper",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPhases {
  pub base_building_phase: PhaseRange,
  pub strength_building_phase: PhaseRange,
  pub peak_training_phase: PhaseRange,
  pub taper_phase: PhaseRange,
}

impl TrainingPhases {
  /// Phases in schedule order
  pub fn ordered(&self) -> [(TrainingPhase, PhaseRange); 4] {
    [
      (TrainingPhase::BaseBuilding, self.base_building_phase),
      (TrainingPhase::StrengthBuilding, self.strength_building_phase),
      (TrainingPhase::PeakTraining, self.peak_training_phase),
      (TrainingPhase::Taper, self.taper_phase),
    ]
  }
}

/// The full derived plan. Serialized camelCase because it is logged and
/// emailed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTrainingPlan {
  pub user_name: String,
  pub user_email: String,
  pub user_age: u32,

  pub fitness_level: FitnessLevel,
  pub max_running_distance_km: f64,
  pub comfortable_pace: String,
  pub hikes_last_3_months: u32,
  pub strength_frequency: u32,

  pub target_hike_name: String,
  pub target_hike_level: HikeDifficultyLevel,
  pub target_hike_distance_km: f64,
  pub target_hike_elevation_m: u32,
  pub target_hike_date: NaiveDate,

  pub training_start_date: NaiveDate,
  /// Negative when the target date already passed
  pub weeks_until_hike: i64,
  pub recommended_training_weeks: u32,
  pub first_herd_run_date: NaiveDate,

  pub phases: TrainingPhases,

  pub available_days: Vec<TrainingDay>,
  pub session_duration: SessionDuration,

  pub recovery_notes: Vec<String>,
  pub recommendations: Vec<String>,
}

/// What the submitting client gets back: a summary, not the full plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConfirmation {
  pub fitness_level: FitnessLevel,
  pub recommended_weeks: u32,
  pub training_start_date: NaiveDate,
  pub first_herd_run_date: NaiveDate,
}

impl From<&CalculatedTrainingPlan> for PlanConfirmation {
  fn from(plan: &CalculatedTrainingPlan) -> Self {
    Self {
      fitness_level: plan.fitness_level,
      recommended_weeks: plan.recommended_training_weeks,
      training_start_date: plan.training_start_date,
      first_herd_run_date: plan.first_herd_run_date,
    }
  }
}
