//! Training Plan Calculator
//!
//! Maps a validated fitness assessment and a target hike onto a four-phase
//! training schedule plus recovery notes and recommendations.
//!
//! Everything here is pure: `today` is passed in, nothing touches the clock,
//! the database, or the network. The request handler owns those concerns.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{
  CalculatedTrainingPlan, FitnessAssessmentInput, FitnessLevel, HikeDifficultyLevel, PhaseRange,
  SessionDuration, TrainingPhases,
};

/// Shortest plan we ever hand out, regardless of how close the hike is
pub const MIN_TRAINING_WEEKS: u32 = 4;

/// Herd Runs (group sessions) happen on Saturdays
pub const HERD_RUN_WEEKDAY: Weekday = Weekday::Sat;

// ---------------------------------------------------------------------------
/// Fitness Scoring
// ---------------------------------------------------------------------------

fn running_score(max_running_km: f64) -> u8 {
  if max_running_km >= 10.0 {
    3
  } else if max_running_km >= 5.0 {
    2
  } else if max_running_km >= 2.0 {
    1
  } else {
    0
  }
}

fn hiking_score(hikes_last_3_months: u32) -> u8 {
  match hikes_last_3_months {
    h if h >= 6 => 3,
    h if h >= 3 => 2,
    h if h >= 1 => 1,
    _ => 0,
  }
}

fn strength_score(strength_days_per_week: u32) -> u8 {
  match strength_days_per_week {
    d if d >= 4 => 2,
    d if d >= 2 => 1,
    _ => 0,
  }
}

/// Combined score in 0..=8
pub fn fitness_score(max_running_km: f64, hikes_last_3_months: u32, strength_days_per_week: u32) -> u8 {
  running_score(max_running_km)
    + hiking_score(hikes_last_3_months)
    + strength_score(strength_days_per_week)
}

pub fn fitness_level(
  max_running_km: f64,
  hikes_last_3_months: u32,
  strength_days_per_week: u32,
) -> FitnessLevel {
  match fitness_score(max_running_km, hikes_last_3_months, strength_days_per_week) {
    s if s >= 6 => FitnessLevel::Advanced,
    s if s >= 3 => FitnessLevel::Intermediate,
    _ => FitnessLevel::Beginner,
  }
}

// ---------------------------------------------------------------------------
/// Duration & Phases
// ---------------------------------------------------------------------------

/// Weeks the user should train for this hike given their level (never below 4)
pub fn recommended_weeks(level: FitnessLevel, hike_level: HikeDifficultyLevel) -> u32 {
  let weeks = hike_level.base_weeks() as i32 + level.week_modifier();
  weeks.max(MIN_TRAINING_WEEKS as i32) as u32
}

/// Split `total_weeks` into base, strength, peak and taper blocks.
///
/// Base-building absorbs whatever the other three leave over, so the four
/// ranges always cover `1..=total_weeks` back to back. With few weeks the
/// taper can be zero weeks long; it is then the empty range
/// `total_weeks + 1 ..= total_weeks`.
pub fn training_phases(total_weeks: u32) -> TrainingPhases {
  let taper_weeks = (total_weeks * 15 / 100).min(2);
  let peak_weeks = (total_weeks * 20 / 100).max(1);
  let strength_weeks = (total_weeks * 30 / 100).max(2);
  let base_weeks = total_weeks.saturating_sub(taper_weeks + peak_weeks + strength_weeks);

  let base_end = base_weeks;
  let strength_end = base_end + strength_weeks;
  let peak_end = strength_end + peak_weeks;

  TrainingPhases {
    base_building_phase: PhaseRange {
      start_week: 1,
      end_week: base_end,
    },
    strength_building_phase: PhaseRange {
      start_week: base_end + 1,
      end_week: strength_end,
    },
    peak_training_phase: PhaseRange {
      start_week: strength_end + 1,
      end_week: peak_end,
    },
    taper_phase: PhaseRange {
      start_week: peak_end + 1,
      end_week: peak_end + taper_weeks,
    },
  }
}

// ---------------------------------------------------------------------------
/// Calendar
// ---------------------------------------------------------------------------

/// First `weekday` strictly after `from` (1 to 7 days ahead, never `from` itself)
pub fn next_weekday_after(from: NaiveDate, weekday: Weekday) -> NaiveDate {
  let current = from.weekday().num_days_from_monday() as i64;
  let target = weekday.num_days_from_monday() as i64;
  let days_ahead = match (target - current).rem_euclid(7) {
    0 => 7,
    d => d,
  };
  from + chrono::Duration::days(days_ahead)
}

/// Whole weeks from `today` to `target`, floored (negative once the date passed)
pub fn weeks_between(today: NaiveDate, target: NaiveDate) -> i64 {
  (target - today).num_days().div_euclid(7)
}

// ---------------------------------------------------------------------------
/// Recovery Notes & Recommendations
// ---------------------------------------------------------------------------

const RECOVERY_50_PLUS: &[&str] = &[
  "Considera 48+ horas de recuperación entre entrenamientos intensos",
  "Incluye estiramientos dinámicos antes y estáticos después de cada sesión",
  "Hidratación extra importante - mínimo 3L de agua diarios",
];

const RECOVERY_40_PLUS: &[&str] = &[
  "Incluye al menos un día de descanso activo por semana",
  "Estiramientos de 10-15 minutos después de cada entrenamiento",
];

const RECOVERY_30_PLUS: &[&str] = &[
  "Un día de descanso completo por semana es suficiente",
  "Foam rolling después de sesiones largas",
];

const RECOVERY_DEFAULT: &[&str] = &["Recuperación estándar - 1-2 días de descanso por semana"];

const BEGINNER_RECOMMENDATIONS: &[&str] = &[
  "Comienza gradualmente - no aumentes distancia más de 10% por semana",
  "Enfócate en construir resistencia base antes de intensidad",
  "Considera unirte a nuestros Herd Runs para motivación grupal",
];

const DEMANDING_HIKE_RECOMMENDATIONS: &[&str] = &[
  "Incluye al menos 2 entrenamientos de altura (>3000m) antes del hike",
  "Practica con tu mochila cargada con peso similar al día del hike",
  "Invierte en buen equipo: botas de montaña y bastones de trekking",
];

const SHORT_SESSION_RECOMMENDATIONS: &[&str] = &[
  "Maximiza tus sesiones con entrenamientos HIIT 2-3 veces por semana",
  "Complementa con caminatas largas los fines de semana",
];

const CLOSING_RECOMMENDATION: &str = "Mantén un registro de tus entrenamientos para ver tu progreso";

pub fn recovery_notes(age: u32) -> Vec<String> {
  let band = match age {
    a if a >= 50 => RECOVERY_50_PLUS,
    a if a >= 40 => RECOVERY_40_PLUS,
    a if a >= 30 => RECOVERY_30_PLUS,
    _ => RECOVERY_DEFAULT,
  };
  band.iter().map(|s| s.to_string()).collect()
}

pub fn recommendations(
  level: FitnessLevel,
  hike_level: HikeDifficultyLevel,
  session_duration: SessionDuration,
) -> Vec<String> {
  let mut blocks: Vec<&[&str]> = Vec::new();

  if level == FitnessLevel::Beginner {
    blocks.push(BEGINNER_RECOMMENDATIONS);
  }
  if hike_level.is_demanding() {
    blocks.push(DEMANDING_HIKE_RECOMMENDATIONS);
  }
  if session_duration == SessionDuration::Short {
    blocks.push(SHORT_SESSION_RECOMMENDATIONS);
  }

  blocks
    .into_iter()
    .flatten()
    .chain(std::iter::once(&CLOSING_RECOMMENDATION))
    .map(|s| s.to_string())
    .collect()
}

// ---------------------------------------------------------------------------
/// Orchestration
// ---------------------------------------------------------------------------

/// Build the full plan for one submission. Training starts `today`.
pub fn calculate_plan(
  input: &FitnessAssessmentInput,
  user_email: &str,
  today: NaiveDate,
) -> CalculatedTrainingPlan {
  let level = fitness_level(
    input.max_running_distance_km,
    input.hikes_last_3_months,
    input.strength_training_frequency,
  );
  let by_skill = recommended_weeks(level, input.target_hike.level);

  let weeks_until_hike = weeks_between(today, input.target_hike.date);
  let training_weeks = weeks_until_hike
    .min(by_skill as i64)
    .max(MIN_TRAINING_WEEKS as i64) as u32;

  CalculatedTrainingPlan {
    user_name: input.first_name.clone(),
    user_email: user_email.to_string(),
    user_age: input.age,

    fitness_level: level,
    max_running_distance_km: input.max_running_distance_km,
    comfortable_pace: input.comfortable_pace.clone(),
    hikes_last_3_months: input.hikes_last_3_months,
    strength_frequency: input.strength_training_frequency,

    target_hike_name: input.target_hike.name.clone(),
    target_hike_level: input.target_hike.level,
    target_hike_distance_km: input.target_hike.distance_km,
    target_hike_elevation_m: input.target_hike.elevation_m,
    target_hike_date: input.target_hike.date,

    training_start_date: today,
    weeks_until_hike,
    recommended_training_weeks: training_weeks,
    first_herd_run_date: next_weekday_after(today, HERD_RUN_WEEKDAY),

    phases: training_phases(training_weeks),

    available_days: input.preferred_training_days.clone(),
    session_duration: input.session_duration,

    recovery_notes: recovery_notes(input.age),
    recommendations: recommendations(level, input.target_hike.level, input.session_duration),
  }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
