pub mod assessment;
pub mod plan;
pub mod record;

pub use assessment::{
  FitnessAssessmentInput, FitnessLevel, HikeDifficultyLevel, SessionDuration,
  StrengthTrainingType, TargetHike, TrainingDay,
};
pub use plan::{CalculatedTrainingPlan, PhaseRange, PlanConfirmation, TrainingPhase, TrainingPhases};
pub use record::FitnessAssessmentRecord;
