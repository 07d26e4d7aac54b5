use super::classify::{classify, ColorClass, HealthLabel};
use super::conditions::{Condition, Delta};
use super::config::{AbsentPolicy, ScoringConfig};
use crate::metrics::{Metric, MetricSet};
use serde::Serialize;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleContribution {
    pub metric: Metric,
    pub when: String, // e.g. "> 10"
    pub value: f64,   // Metric value the rule was checked against
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub raw_score: f64, // Before clamping
    pub rules: Vec<RuleContribution>,
}

/// Outcome of scoring one MetricSet. `score` is always finite and within
/// [0, 100]; `color_class` always matches `label`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub label: HealthLabel,
    pub color_class: ColorClass,
    pub breakdown: ScoreBreakdown,
}

/// Score metrics with the built-in rubric.
pub fn compute_health_score(metrics: &MetricSet) -> ScoreResult {
    calculate_score(metrics, &ScoringConfig::default())
}

/// Score metrics with a custom rubric.
///
/// Rules whose `when` or `effect` cannot be parsed are skipped; run
/// `validate_scoring` first to surface them.
pub fn calculate_score(metrics: &MetricSet, config: &ScoringConfig) -> ScoreResult {
    let base_score = config.effective_base_score();
    let mut raw_score = base_score;
    let mut rules = Vec::new();

    for rule in config.effective_rules().iter() {
        let (Ok(condition), Ok(delta)) = (Condition::parse(&rule.when), Delta::parse(&rule.effect))
        else {
            continue;
        };

        let policy = rule.if_absent.unwrap_or(if delta.is_penalty() {
            AbsentPolicy::Skip
        } else {
            AbsentPolicy::Zero
        });

        if metrics.get(rule.metric).is_none() && policy == AbsentPolicy::Skip {
            continue;
        }
        let value = metrics.value_or_zero(rule.metric);

        if condition.matches(value) {
            raw_score = delta.apply(raw_score);
            rules.push(RuleContribution {
                metric: rule.metric,
                when: condition.to_string(),
                value,
                delta: delta.0,
            });
        }
    }

    let score = clamp_score(raw_score);
    let (label, color_class) = classify(score);

    ScoreResult {
        score,
        label,
        color_class,
        breakdown: ScoreBreakdown {
            base_score,
            raw_score,
            rules,
        },
    }
}

/// `max(0, min(100, raw))`. NaN maps to 0.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE)
}
