use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Fitness Level
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl FitnessLevel {
  /// Training-week adjustment applied on top of the hike's base weeks
  pub fn week_modifier(&self) -> i32 {
    match self {
      FitnessLevel::Beginner => 2,
      FitnessLevel::Intermediate => 0,
      FitnessLevel::Advanced => -2,
    }
  }

  pub fn label_es(&self) -> &'static str {
    match self {
      FitnessLevel::Beginner => "Principiante",
      FitnessLevel::Intermediate => "Intermedio",
      FitnessLevel::Advanced => "Avanzado",
    }
  }
}

impl std::fmt::Display for FitnessLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Beginner => write!(f, "beginner"),
      Self::Intermediate => write!(f, "intermediate"),
      Self::Advanced => write!(f, "advanced"),
    }
  }
}

impl std::str::FromStr for FitnessLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      _ => Err(format!("Unknown fitness level: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Hike Difficulty Tier ("1".."4")
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HikeDifficultyLevel {
  #[serde(rename = "1")]
  Level1,
  #[serde(rename = "2")]
  #[default]
  Level2,
  #[serde(rename = "3")]
  Level3,
  #[serde(rename = "4")]
  Level4,
}

impl HikeDifficultyLevel {
  pub const ALL: [HikeDifficultyLevel; 4] = [
    HikeDifficultyLevel::Level1,
    HikeDifficultyLevel::Level2,
    HikeDifficultyLevel::Level3,
    HikeDifficultyLevel::Level4,
  ];

  /// Baseline training weeks before the fitness modifier
  pub fn base_weeks(&self) -> u32 {
    match self {
      HikeDifficultyLevel::Level1 => 4,
      HikeDifficultyLevel::Level2 => 6,
      HikeDifficultyLevel::Level3 => 8,
      HikeDifficultyLevel::Level4 => 12,
    }
  }

  /// Tiers 3 and 4 get the altitude/gear recommendation block
  pub fn is_demanding(&self) -> bool {
    matches!(self, HikeDifficultyLevel::Level3 | HikeDifficultyLevel::Level4)
  }

  pub fn description_es(&self) -> &'static str {
    match self {
      HikeDifficultyLevel::Level1 => "Nivel 1 (8-12km, <500m, 4-5h)",
      HikeDifficultyLevel::Level2 => "Nivel 2 (12-18km, 500-1000m, 5-7h)",
      HikeDifficultyLevel::Level3 => "Nivel 3 (18-25km, 1000-1500m, 7-9h)",
      HikeDifficultyLevel::Level4 => "Nivel 4 (25+km, 1500+m, 9+h)",
    }
  }
}

impl std::fmt::Display for HikeDifficultyLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Level1 => write!(f, "1"),
      Self::Level2 => write!(f, "2"),
      Self::Level3 => write!(f, "3"),
      Self::Level4 => write!(f, "4"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Session Duration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionDuration {
  Short,
  #[default]
  Medium,
  Long,
}

impl SessionDuration {
  pub fn label_es(&self) -> &'static str {
    match self {
      SessionDuration::Short => "30-45 minutos",
      SessionDuration::Medium => "45-75 minutos",
      SessionDuration::Long => "75+ minutos",
    }
  }
}

impl std::fmt::Display for SessionDuration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Short => write!(f, "short"),
      Self::Medium => write!(f, "medium"),
      Self::Long => write!(f, "long"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Training Days & Strength Modalities
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingDay {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl TrainingDay {
  pub fn label_es(&self) -> &'static str {
    match self {
      TrainingDay::Monday => "Lunes",
      TrainingDay::Tuesday => "Martes",
      TrainingDay::Wednesday => "Miércoles",
      TrainingDay::Thursday => "Jueves",
      TrainingDay::Friday => "Viernes",
      TrainingDay::Saturday => "Sábado",
      TrainingDay::Sunday => "Domingo",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTrainingType {
  LegsCore,
  UpperBody,
  FullBody,
  None,
}

/// ---------------------------------------------------------------------------
/// Validated Assessment Input
/// ---------------------------------------------------------------------------

/// The hike the user is preparing for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetHike {
  pub name: String,
  pub level: HikeDifficultyLevel,
  pub distance_km: f64,
  pub elevation_m: u32,
  pub date: NaiveDate,
}

/// Typed questionnaire answers. Only `validation` constructs these from
/// user submissions, so every field is already parsed and range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessAssessmentInput {
  pub first_name: String,
  pub age: u32,

  pub max_running_distance_km: f64,
  /// Minutes per km, kept as the user typed it (e.g. "6:30")
  pub comfortable_pace: String,
  pub hikes_last_3_months: u32,
  pub typical_elevation_gain_m: u32,
  pub strength_training_frequency: u32,
  pub strength_training_types: Vec<StrengthTrainingType>,

  pub available_days_per_week: u32,
  pub preferred_training_days: Vec<TrainingDay>,
  pub session_duration: SessionDuration,

  pub target_hike: TargetHike,
}
