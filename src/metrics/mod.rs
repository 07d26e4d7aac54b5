pub mod loader;
pub mod types;

pub use loader::{load_metrics, parse_metrics_value, NamedMetrics};
pub use types::{Metric, MetricSet};
