use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A financial metric the scoring rubric knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ProfitMargin,
    CurrentRatio,
    DebtToEquity,
    RevenueGrowth,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::ProfitMargin,
        Metric::CurrentRatio,
        Metric::DebtToEquity,
        Metric::RevenueGrowth,
    ];

    /// Key used in metric files and config (`profit_margin`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Metric::ProfitMargin => "profit_margin",
            Metric::CurrentRatio => "current_ratio",
            Metric::DebtToEquity => "debt_to_equity",
            Metric::RevenueGrowth => "revenue_growth",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Named financial inputs to the health score.
///
/// Every metric is optional. An absent metric reads as zero for reward rules
/// and is skipped by penalty rules (see `AbsentPolicy`). Non-finite values are
/// never stored: they are treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct MetricSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<f64>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. Non-finite values leave the metric absent.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        let value = value.is_finite().then_some(value);
        *self.slot_mut(metric) = value;
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ProfitMargin => self.profit_margin,
            Metric::CurrentRatio => self.current_ratio,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::RevenueGrowth => self.revenue_growth,
        }
    }

    pub fn value_or_zero(&self, metric: Metric) -> f64 {
        self.get(metric).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m).is_none())
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::ProfitMargin => &mut self.profit_margin,
            Metric::CurrentRatio => &mut self.current_ratio,
            Metric::DebtToEquity => &mut self.debt_to_equity,
            Metric::RevenueGrowth => &mut self.revenue_growth,
        }
    }

    /// Build a MetricSet from loosely typed values (parsed JSON or YAML).
    ///
    /// Numbers are used as-is and numeric strings are parsed. Anything else
    /// is dropped with a warning, so this never fails. Unknown keys are
    /// ignored.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut set = MetricSet::new();
        for (key, value) in values {
            let Some(metric) = Metric::from_key(&key) else {
                tracing::warn!(key = %key, "ignoring unrecognized metric");
                continue;
            };
            match coerce_number(&value) {
                Some(n) => set.set(metric, n),
                None if value.is_null() => {}
                None => {
                    tracing::warn!(metric = %metric, value = %value, "non-numeric metric value treated as absent");
                }
            }
        }
        set
    }
}

impl From<BTreeMap<String, Value>> for MetricSet {
    fn from(values: BTreeMap<String, Value>) -> Self {
        MetricSet::from_values(values)
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> Vec<(String, Value)> {
        match v {
            Value::Object(map) => map.into_iter().collect(),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_metric_key_roundtrip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_key(metric.key()), Some(metric));
        }
        assert_eq!(Metric::from_key("ebitda"), None);
    }

    #[test]
    fn test_empty_set() {
        let set = MetricSet::new();
        assert!(set.is_empty());
        assert_eq!(set.value_or_zero(Metric::DebtToEquity), 0.0);
    }

    #[test]
    fn test_with_non_finite_is_absent() {
        let set = MetricSet::new()
            .with(Metric::ProfitMargin, f64::NAN)
            .with(Metric::CurrentRatio, f64::INFINITY)
            .with(Metric::RevenueGrowth, 3.0);
        assert_eq!(set.profit_margin, None);
        assert_eq!(set.current_ratio, None);
        assert_eq!(set.revenue_growth, Some(3.0));
    }

    #[test]
    fn test_from_values_numbers_and_strings() {
        let set = MetricSet::from_values(values(json!({
            "profit_margin": 12.5,
            "current_ratio": " 1.8 ",
            "debt_to_equity": 1
        })));
        assert_eq!(set.profit_margin, Some(12.5));
        assert_eq!(set.current_ratio, Some(1.8));
        assert_eq!(set.debt_to_equity, Some(1.0));
        assert_eq!(set.revenue_growth, None);
    }

    #[test]
    fn test_from_values_coerces_garbage_to_absent() {
        let set = MetricSet::from_values(values(json!({
            "profit_margin": "n/a",
            "current_ratio": true,
            "debt_to_equity": null,
            "revenue_growth": [1, 2],
            "ebitda": 40
        })));
        assert!(set.is_empty());
    }

    #[test]
    fn test_deserialize_from_json() {
        let set: MetricSet =
            serde_json::from_str(r#"{"profit_margin": -5, "revenue_growth": "NaN"}"#).unwrap();
        assert_eq!(set.profit_margin, Some(-5.0));
        assert_eq!(set.revenue_growth, None);
    }

    #[test]
    fn test_serialize_skips_absent() {
        let set = MetricSet::new().with(Metric::DebtToEquity, 0.5);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"debt_to_equity":0.5}"#);
    }
}
