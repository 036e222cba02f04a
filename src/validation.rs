//! Submission validation
//!
//! The onboarding form posts every answer as text. This module turns that
//! wire shape into a typed `FitnessAssessmentInput`, or explains exactly
//! what is wrong. Unparseable numbers are rejected rather than read as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::models::{
  FitnessAssessmentInput, HikeDifficultyLevel, SessionDuration, StrengthTrainingType, TargetHike,
  TrainingDay,
};

/// Youngest age the onboarding flow accepts
pub const MIN_AGE: u32 = 16;

/// Availability assumed when the form leaves it out
pub const DEFAULT_AVAILABLE_DAYS: u32 = 4;

/// Wire names of the fields a submission cannot omit
pub const REQUIRED_FIELDS: [&str; 8] = [
  "firstName",
  "age",
  "maxRunningDistanceKm",
  "comfortablePace",
  "targetHikeName",
  "targetHikeDistanceKm",
  "targetHikeElevationM",
  "targetHikeDate",
];

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
  #[error("Faltan campos requeridos: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("Valor numérico inválido para {field}: '{value}'")]
  InvalidNumber { field: &'static str, value: String },

  #[error("Valor fuera de rango para {field}: {reason}")]
  OutOfRange { field: &'static str, reason: String },

  #[error("Fecha inválida para targetHikeDate: '{0}' (formato esperado AAAA-MM-DD)")]
  InvalidDate(String),

  #[error("La fecha del hike ({0}) ya pasó")]
  TargetDateInPast(NaiveDate),
}

/// ---------------------------------------------------------------------------
/// Wire Format
/// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
  Text(String),
  Number(serde_json::Number),
}

/// Accept `"12"` and `12` alike; the form sends strings, API clients send numbers
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<TextOrNumber>::deserialize(deserializer)?;
  Ok(value.map(|v| match v {
    TextOrNumber::Text(s) => s,
    TextOrNumber::Number(n) => n.to_string(),
  }))
}

/// Raw questionnaire body as posted by the onboarding form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub age: Option<String>,

  #[serde(default, deserialize_with = "text_or_number")]
  pub max_running_distance_km: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub comfortable_pace: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub hikes_last_3_months: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub typical_elevation_gain_m: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub strength_training_frequency: Option<String>,
  #[serde(default)]
  pub strength_training_types: Vec<StrengthTrainingType>,

  #[serde(default, deserialize_with = "text_or_number")]
  pub available_days_per_week: Option<String>,
  #[serde(default)]
  pub preferred_training_days: Vec<TrainingDay>,
  #[serde(default)]
  pub session_duration: Option<SessionDuration>,

  #[serde(default)]
  pub target_hike_name: Option<String>,
  #[serde(default)]
  pub target_hike_level: Option<HikeDifficultyLevel>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub target_hike_distance_km: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub target_hike_elevation_m: Option<String>,
  #[serde(default)]
  pub target_hike_date: Option<String>,
}

/// Blank strings count as absent
fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Whole numbers, including whole-valued decimals such as `"1400.0"`
fn parse_count(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
  if let Ok(v) = raw.parse::<u32>() {
    return Ok(v);
  }

  match raw.parse::<f64>() {
    Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
    _ => Err(ValidationError::InvalidNumber {
      field,
      value: raw.to_string(),
    }),
  }
}

fn parse_measure(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
  match raw.parse::<f64>() {
    Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
    _ => Err(ValidationError::InvalidNumber {
      field,
      value: raw.to_string(),
    }),
  }
}

fn optional_count(
  field: &'static str,
  value: &Option<String>,
  default: u32,
) -> Result<u32, ValidationError> {
  present(value).map_or(Ok(default), |raw| parse_count(field, raw))
}

impl AssessmentSubmission {
  /// Names of required fields that are absent or blank, in form order
  pub fn missing_fields(&self) -> Vec<&'static str> {
    let values = [
      &self.first_name,
      &self.age,
      &self.max_running_distance_km,
      &self.comfortable_pace,
      &self.target_hike_name,
      &self.target_hike_distance_km,
      &self.target_hike_elevation_m,
      &self.target_hike_date,
    ];

    REQUIRED_FIELDS
      .iter()
      .zip(values)
      .filter(|(_, value)| present(value).is_none())
      .map(|(name, _)| *name)
      .collect()
  }

  /// Check and convert the submission. `today` bounds the target date.
  pub fn validate(self, today: NaiveDate) -> Result<FitnessAssessmentInput, ValidationError> {
    let missing = self.missing_fields();
    if !missing.is_empty() {
      return Err(ValidationError::MissingFields(missing));
    }

    // Required fields are known to be present past this point
    let required = |value: &Option<String>| present(value).unwrap_or_default().to_string();

    let age = parse_count("age", &required(&self.age))?;
    if age < MIN_AGE {
      return Err(ValidationError::OutOfRange {
        field: "age",
        reason: format!("la edad mínima es {}", MIN_AGE),
      });
    }

    let available_days_per_week = optional_count(
      "availableDaysPerWeek",
      &self.available_days_per_week,
      DEFAULT_AVAILABLE_DAYS,
    )?;
    if !(1..=7).contains(&available_days_per_week) {
      return Err(ValidationError::OutOfRange {
        field: "availableDaysPerWeek",
        reason: "debe estar entre 1 y 7".to_string(),
      });
    }

    let raw_date = required(&self.target_hike_date);
    let target_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
      .map_err(|_| ValidationError::InvalidDate(raw_date.clone()))?;
    if target_date < today {
      return Err(ValidationError::TargetDateInPast(target_date));
    }

    Ok(FitnessAssessmentInput {
      first_name: required(&self.first_name),
      age,
      max_running_distance_km: parse_measure(
        "maxRunningDistanceKm",
        &required(&self.max_running_distance_km),
      )?,
      comfortable_pace: required(&self.comfortable_pace),
      hikes_last_3_months: optional_count("hikesLast3Months", &self.hikes_last_3_months, 0)?,
      typical_elevation_gain_m: optional_count(
        "typicalElevationGainM",
        &self.typical_elevation_gain_m,
        0,
      )?,
      strength_training_frequency: optional_count(
        "strengthTrainingFrequency",
        &self.strength_training_frequency,
        0,
      )?,
      strength_training_types: self.strength_training_types,
      available_days_per_week,
      preferred_training_days: self.preferred_training_days,
      session_duration: self.session_duration.unwrap_or_default(),
      target_hike: TargetHike {
        name: required(&self.target_hike_name),
        level: self.target_hike_level.unwrap_or_default(),
        distance_km: parse_measure("targetHikeDistanceKm", &required(&self.target_hike_distance_km))?,
        elevation_m: parse_count("targetHikeElevationM", &required(&self.target_hike_elevation_m))?,
        date: target_date,
      },
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
  }

  fn complete_form() -> serde_json::Value {
    json!({
      "firstName": "Lucía",
      "age": "34",
      "maxRunningDistanceKm": "7.5",
      "comfortablePace": "6:15",
      "hikesLast3Months": "2",
      "typicalElevationGainM": "600",
      "strengthTrainingFrequency": "3",
      "strengthTrainingTypes": ["legs_core", "full_body"],
      "availableDaysPerWeek": "5",
      "preferredTrainingDays": ["tuesday", "thursday", "saturday"],
      "sessionDuration": "long",
      "targetHikeName": "Iztaccíhuatl",
      "targetHikeLevel": "4",
      "targetHikeDistanceKm": "21",
      "targetHikeElevationM": "1400",
      "targetHikeDate": "2027-02-13"
    })
  }

  fn submission(value: serde_json::Value) -> AssessmentSubmission {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn test_complete_form_validates() {
    let input = submission(complete_form()).validate(today()).unwrap();

    assert_eq!(input.first_name, "Lucía");
    assert_eq!(input.age, 34);
    assert_eq!(input.max_running_distance_km, 7.5);
    assert_eq!(input.strength_training_types.len(), 2);
    assert_eq!(input.preferred_training_days[2], TrainingDay::Saturday);
    assert_eq!(input.session_duration, SessionDuration::Long);
    assert_eq!(input.target_hike.level, HikeDifficultyLevel::Level4);
    assert_eq!(input.target_hike.elevation_m, 1400);
    assert_eq!(input.target_hike.date, NaiveDate::from_ymd_opt(2027, 2, 13).unwrap());
  }

  #[test]
  fn test_numbers_accepted_as_json_numbers() {
    let mut form = complete_form();
    form["age"] = json!(41);
    form["maxRunningDistanceKm"] = json!(12.5);
    form["targetHikeElevationM"] = json!(900);

    let input = submission(form).validate(today()).unwrap();
    assert_eq!(input.age, 41);
    assert_eq!(input.max_running_distance_km, 12.5);
    assert_eq!(input.target_hike.elevation_m, 900);
  }

  #[test]
  fn test_whole_valued_decimals_are_counts() {
    let mut form = complete_form();
    form["age"] = json!("34.0");
    form["targetHikeElevationM"] = json!(1400.0);
    form["availableDaysPerWeek"] = json!(3.0);

    let input = submission(form).validate(today()).unwrap();
    assert_eq!(input.age, 34);
    assert_eq!(input.target_hike.elevation_m, 1400);
    assert_eq!(input.available_days_per_week, 3);

    let mut form = complete_form();
    form["hikesLast3Months"] = json!("6.5");
    let err = submission(form).validate(today()).unwrap_err();
    assert_eq!(
      err,
      ValidationError::InvalidNumber {
        field: "hikesLast3Months",
        value: "6.5".to_string(),
      }
    );
  }

  #[test]
  fn test_missing_fields_are_all_listed() {
    let form = json!({
      "firstName": "  ",
      "age": "30",
      "comfortablePace": "6:00",
      "targetHikeName": "Nevado de Toluca",
      "targetHikeDistanceKm": "",
      "targetHikeElevationM": "800"
    });

    let err = submission(form).validate(today()).unwrap_err();
    assert_eq!(
      err,
      ValidationError::MissingFields(vec![
        "firstName",
        "maxRunningDistanceKm",
        "targetHikeDistanceKm",
        "targetHikeDate",
      ])
    );
    assert!(err.to_string().starts_with("Faltan campos requeridos"));
  }

  #[test]
  fn test_optional_fields_take_onboarding_defaults() {
    let form = json!({
      "firstName": "Diego",
      "age": "28",
      "maxRunningDistanceKm": "3",
      "comfortablePace": "7:00",
      "targetHikeName": "La Malinche",
      "targetHikeDistanceKm": "14",
      "targetHikeElevationM": "1200",
      "targetHikeDate": "2026-12-05"
    });

    let input = submission(form).validate(today()).unwrap();
    assert_eq!(input.hikes_last_3_months, 0);
    assert_eq!(input.typical_elevation_gain_m, 0);
    assert_eq!(input.strength_training_frequency, 0);
    assert_eq!(input.available_days_per_week, DEFAULT_AVAILABLE_DAYS);
    assert_eq!(input.session_duration, SessionDuration::Medium);
    assert_eq!(input.target_hike.level, HikeDifficultyLevel::Level2);
    assert!(input.preferred_training_days.is_empty());
  }

  #[test]
  fn test_unparseable_number_is_rejected() {
    let mut form = complete_form();
    form["hikesLast3Months"] = json!("a few");

    let err = submission(form).validate(today()).unwrap_err();
    assert_eq!(
      err,
      ValidationError::InvalidNumber {
        field: "hikesLast3Months",
        value: "a few".to_string(),
      }
    );
  }

  #[test]
  fn test_negative_distance_is_rejected() {
    let mut form = complete_form();
    form["maxRunningDistanceKm"] = json!("-3");

    let err = submission(form).validate(today()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidNumber { field: "maxRunningDistanceKm", .. }));
  }

  #[test]
  fn test_underage_is_rejected() {
    let mut form = complete_form();
    form["age"] = json!("15");

    let err = submission(form).validate(today()).unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { field: "age", .. }));
  }

  #[test]
  fn test_available_days_out_of_range() {
    let mut form = complete_form();
    form["availableDaysPerWeek"] = json!("9");

    let err = submission(form).validate(today()).unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { field: "availableDaysPerWeek", .. }));
  }

  #[test]
  fn test_target_date_in_past_is_rejected() {
    let mut form = complete_form();
    form["targetHikeDate"] = json!("2026-10-18");

    let err = submission(form).validate(today()).unwrap_err();
    assert_eq!(
      err,
      ValidationError::TargetDateInPast(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    );
  }

  #[test]
  fn test_target_date_today_is_allowed() {
    let mut form = complete_form();
    form["targetHikeDate"] = json!("2026-10-19");

    assert!(submission(form).validate(today()).is_ok());
  }

  #[test]
  fn test_malformed_date() {
    let mut form = complete_form();
    form["targetHikeDate"] = json!("13/02/2027");

    let err = submission(form).validate(today()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidDate("13/02/2027".to_string()));
  }

  #[test]
  fn test_unknown_enum_value_fails_to_deserialize() {
    let mut form = complete_form();
    form["sessionDuration"] = json!("forever");

    assert!(serde_json::from_value::<AssessmentSubmission>(form).is_err());
  }
}
