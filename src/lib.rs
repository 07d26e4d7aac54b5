//! Financial health scoring.
//!
//! Turns a [`metrics::MetricSet`] (profit margin, current ratio, debt to
//! equity, revenue growth) into a 0-100 health score, a category label and a
//! color token:
//!
//! ```
//! use fin_health::metrics::{Metric, MetricSet};
//! use fin_health::scoring::{compute_health_score, HealthLabel};
//!
//! let metrics = MetricSet::new()
//!     .with(Metric::ProfitMargin, 15.0)
//!     .with(Metric::CurrentRatio, 2.0);
//! let result = compute_health_score(&metrics);
//! // 50 base + 15 margin + 10 liquidity + 10 (debt_to_equity absent reads as 0)
//! assert_eq!(result.score, 85.0);
//! assert_eq!(result.label, HealthLabel::Excellent);
//! ```

pub mod config;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod rank;
pub mod scoring;
