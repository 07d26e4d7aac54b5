use crate::metrics::Metric;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const DEFAULT_BASE_SCORE: f64 = 50.0;

/// Main scoring configuration.
///
/// Defines the starting score and the rules that adjust it. Rules are
/// independent: each is checked against the input metrics (never against the
/// running score) and the deltas of all matching rules are summed.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   base_score: 50
///   rules:
///     - { metric: profit_margin, when: ">10", effect: "+15" }
///     - { metric: current_ratio, when: "<1", effect: "-15" }
///     - { metric: debt_to_equity, when: "<1", effect: "+10", if_absent: skip }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Score before any rule is applied (default: 50)
    #[serde(default)]
    pub base_score: Option<f64>,

    /// Rule list. When omitted the built-in rubric is used; an empty list
    /// means no rules at all.
    #[serde(default)]
    pub rules: Option<Vec<RuleConfig>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: Some(DEFAULT_BASE_SCORE),
            rules: Some(default_rules()),
        }
    }
}

impl ScoringConfig {
    pub fn effective_base_score(&self) -> f64 {
        self.base_score.unwrap_or(DEFAULT_BASE_SCORE)
    }

    pub fn effective_rules(&self) -> Cow<'_, [RuleConfig]> {
        match &self.rules {
            Some(rules) => Cow::Borrowed(rules.as_slice()),
            None => Cow::Owned(default_rules()),
        }
    }
}

/// One scoring rule.
///
/// `when` is a comparison ("<1", ">=0", "1..2"), `effect` a signed delta
/// ("+15", "-20").
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub metric: Metric,
    pub when: String,
    pub effect: String,

    /// What to do when the metric is missing from the input. Defaults to
    /// `zero` for rewards and `skip` for penalties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_absent: Option<AbsentPolicy>,
}

impl RuleConfig {
    pub fn new(metric: Metric, when: &str, effect: &str) -> Self {
        Self {
            metric,
            when: when.to_string(),
            effect: effect.to_string(),
            if_absent: None,
        }
    }
}

/// How a rule treats a metric that is absent from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentPolicy {
    /// Compare the rule against 0
    Zero,
    /// Rule does not fire
    Skip,
}

impl AbsentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbsentPolicy::Zero => "zero",
            AbsentPolicy::Skip => "skip",
        }
    }
}

pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new(Metric::ProfitMargin, ">10", "+15"),
        RuleConfig::new(Metric::CurrentRatio, ">1.5", "+10"),
        RuleConfig::new(Metric::DebtToEquity, "<1", "+10"),
        RuleConfig::new(Metric::RevenueGrowth, ">0", "+15"),
        RuleConfig::new(Metric::ProfitMargin, "<0", "-20"),
        RuleConfig::new(Metric::CurrentRatio, "<1", "-15"),
        RuleConfig::new(Metric::DebtToEquity, ">2", "-10"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.base_score, Some(50.0));
        assert_eq!(config.rules.as_ref().map(Vec::len), Some(7));
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
base_score: 40
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.effective_base_score(), 40.0);
        assert!(config.rules.is_none());
        assert_eq!(config.effective_rules().len(), 7);
    }

    #[test]
    fn test_full_scoring_config_parse() {
        let yaml = r#"
base_score: 50
rules:
  - metric: profit_margin
    when: ">20"
    effect: "+25"
  - metric: current_ratio
    when: "<1"
    effect: "-15"
    if_absent: zero
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let rules = config.rules.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].metric, Metric::ProfitMargin);
        assert_eq!(rules[0].if_absent, None);
        assert_eq!(rules[1].if_absent, Some(AbsentPolicy::Zero));
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.base_score.is_none());
        assert!(config.rules.is_none());
        assert_eq!(config.effective_base_score(), DEFAULT_BASE_SCORE);
    }

    #[test]
    fn test_empty_rule_list_is_kept() {
        let config: ScoringConfig = serde_saphyr::from_str("rules: []").unwrap();
        assert!(config.effective_rules().is_empty());
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let yaml = r#"
rules:
  - metric: ebitda
    when: ">0"
    effect: "+5"
"#;
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_absent_policy_as_str_matches_config_spelling() {
        for policy in [AbsentPolicy::Zero, AbsentPolicy::Skip] {
            let parsed: AbsentPolicy = serde_saphyr::from_str(policy.as_str()).unwrap();
            assert_eq!(parsed, policy);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_saphyr::from_str::<ScoringConfig>("weights: 3").is_err());
    }
}
