use crate::metrics::{MetricSet, NamedMetrics};
use crate::scoring::{calculate_score, ScoreResult, ScoringConfig};
use std::cmp::Ordering;

/// A named metric set together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntity {
    pub name: String,
    pub metrics: MetricSet,
    pub result: ScoreResult,
}

/// Score every entry and sort by score descending, then name ascending.
pub fn score_entities(entries: Vec<NamedMetrics>, scoring: &ScoringConfig) -> Vec<ScoredEntity> {
    let mut scored: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let result = calculate_score(&entry.metrics, scoring);
            tracing::debug!(
                name = %entry.name,
                score = result.score,
                label = %result.label,
                rules_fired = result.breakdown.rules.len(),
                "scored"
            );
            ScoredEntity {
                name: entry.name,
                metrics: entry.metrics,
                result,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        // Primary: score descending
        let score_cmp = b
            .result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        // Tie-breaker: name ascending
        a.name.cmp(&b.name)
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;

    fn entry(name: &str, metrics: MetricSet) -> NamedMetrics {
        NamedMetrics {
            name: name.to_string(),
            metrics,
        }
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let entries = vec![
            entry(
                "weak",
                MetricSet::new()
                    .with(Metric::ProfitMargin, -5.0)
                    .with(Metric::CurrentRatio, 0.8)
                    .with(Metric::DebtToEquity, 3.0),
            ),
            entry(
                "strong",
                MetricSet::new()
                    .with(Metric::ProfitMargin, 15.0)
                    .with(Metric::CurrentRatio, 2.0)
                    .with(Metric::DebtToEquity, 0.5)
                    .with(Metric::RevenueGrowth, 5.0),
            ),
            entry("empty", MetricSet::new()),
        ];

        let scored = score_entities(entries, &ScoringConfig::default());
        let names: Vec<_> = scored.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["strong", "empty", "weak"]);
        assert_eq!(scored[0].result.score, 100.0);
        assert_eq!(scored[1].result.score, 60.0);
        assert_eq!(scored[2].result.score, 5.0);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let entries = vec![
            entry("zeta", MetricSet::new()),
            entry("alpha", MetricSet::new()),
        ];
        let scored = score_entities(entries, &ScoringConfig::default());
        assert_eq!(scored[0].name, "alpha");
        assert_eq!(scored[1].name, "zeta");
    }

    #[test]
    fn test_empty_input() {
        assert!(score_entities(vec![], &ScoringConfig::default()).is_empty());
    }
}
