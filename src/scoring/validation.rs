use super::conditions::{Condition, Delta};
use super::config::ScoringConfig;
use super::engine::{MAX_SCORE, MIN_SCORE};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(base) = config.base_score {
        if !base.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&base) {
            errors.push(format!(
                "scoring.base_score: must be between {} and {}, got {}",
                MIN_SCORE, MAX_SCORE, base
            ));
        }
    }

    if let Some(ref rules) = config.rules {
        for (i, rule) in rules.iter().enumerate() {
            if let Err(e) = Condition::parse(&rule.when) {
                errors.push(format!(
                    "scoring.rules[{}].when: invalid '{}' - {}",
                    i, rule.when, e
                ));
            }
            if let Err(e) = Delta::parse(&rule.effect) {
                errors.push(format!(
                    "scoring.rules[{}].effect: invalid '{}' - {}",
                    i, rule.effect, e
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
