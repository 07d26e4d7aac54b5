use super::types::{Metric, MetricSet};
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A MetricSet with the name it was filed under (company, period, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMetrics {
    pub name: String,
    pub metrics: MetricSet,
}

/// Load metric sets from a JSON or YAML file.
///
/// `.json` files are parsed as JSON, anything else as YAML. The top level
/// must be a mapping holding either one metric set, or named metric sets
/// (a portfolio):
///
/// ```yaml
/// acme:
///   profit_margin: 12
///   current_ratio: 1.8
/// globex:
///   profit_margin: -3
/// ```
///
/// A single metric set is named after the file stem. A portfolio entry left
/// empty (null) scores as an empty metric set.
///
/// JSON number literals outside the f64 range (e.g. `1e400`) are rejected by
/// the JSON parser and fail the whole file; they are not coerced to absent.
pub fn load_metrics(path: &Path) -> Result<Vec<NamedMetrics>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value: Value = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse metrics: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse metrics: invalid YAML in {}", path.display()))?
    };

    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "metrics".to_string());

    let entries = parse_metrics_value(value, &default_name)
        .with_context(|| format!("Invalid metrics file {}", path.display()))?;

    tracing::debug!(count = entries.len(), path = %path.display(), "loaded metric sets");
    Ok(entries)
}

/// Interpret an already-parsed document as one or more metric sets.
pub fn parse_metrics_value(value: Value, default_name: &str) -> Result<Vec<NamedMetrics>> {
    let map = match value {
        Value::Object(map) => map,
        // An empty YAML document parses as null: treat it as an empty set.
        Value::Null => Map::new(),
        other => bail!("expected a mapping of metrics, found {}", kind_of(&other)),
    };

    if is_portfolio(&map) {
        let mut entries = Vec::with_capacity(map.len());
        for (name, entry) in map {
            match entry {
                Value::Object(fields) => entries.push(NamedMetrics {
                    name,
                    metrics: MetricSet::from_values(fields),
                }),
                Value::Null => entries.push(NamedMetrics {
                    name,
                    metrics: MetricSet::new(),
                }),
                other => bail!("entry '{}' must be a mapping of metrics, found {}", name, kind_of(&other)),
            }
        }
        Ok(entries)
    } else {
        Ok(vec![NamedMetrics {
            name: default_name.to_string(),
            metrics: MetricSet::from_values(map),
        }])
    }
}

/// A portfolio has no metric keys at the top level and at least one entry
/// that is a mapping.
fn is_portfolio(map: &Map<String, Value>) -> bool {
    map.keys().all(|k| Metric::from_key(k).is_none()) && map.values().any(Value::is_object)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
