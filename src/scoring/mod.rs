pub mod classify;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod validation;

pub use classify::{classify, ColorClass, HealthLabel};
pub use conditions::{Condition, Delta};
pub use config::*;
pub use engine::{
    calculate_score, clamp_score, compute_health_score, RuleContribution, ScoreBreakdown,
    ScoreResult,
};
pub use validation::validate_scoring;
