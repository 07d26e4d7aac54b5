//! Canonical score-to-category table. Every consumer of a score goes through
//! [`classify`]; there is no second set of thresholds anywhere in the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const EXCELLENT_THRESHOLD: f64 = 80.0;
pub const GOOD_THRESHOLD: f64 = 60.0;
pub const FAIR_THRESHOLD: f64 = 40.0;

/// Health category, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthLabel {
    /// Lower bound is inclusive, upper bound exclusive. NaN falls through to Poor.
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            HealthLabel::Excellent
        } else if score >= GOOD_THRESHOLD {
            HealthLabel::Good
        } else if score >= FAIR_THRESHOLD {
            HealthLabel::Fair
        } else {
            HealthLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Excellent => "Excellent",
            HealthLabel::Good => "Good",
            HealthLabel::Fair => "Fair",
            HealthLabel::Poor => "Poor",
        }
    }

    pub fn color_class(&self) -> ColorClass {
        match self {
            HealthLabel::Excellent => ColorClass::GreenStrong,
            HealthLabel::Good => ColorClass::GreenMuted,
            HealthLabel::Fair => ColorClass::Yellow,
            HealthLabel::Poor => ColorClass::Red,
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation token paired one-to-one with a [`HealthLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    GreenStrong,
    GreenMuted,
    Yellow,
    Red,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::GreenStrong => "green-strong",
            ColorClass::GreenMuted => "green-muted",
            ColorClass::Yellow => "yellow",
            ColorClass::Red => "red",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(score: f64) -> (HealthLabel, ColorClass) {
    let label = HealthLabel::from_score(score);
    (label, label.color_class())
}
