use anyhow::{bail, Result};
use std::fmt;

/// Threshold a metric value is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N..M
}

impl Condition {
    /// Parse "<N", "<=N", ">N", ">=N", "=N", "N" or "N..M".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let condition = if let Some(val) = s.strip_prefix(">=") {
            Condition::GreaterEqual(parse_threshold(val)?)
        } else if let Some(val) = s.strip_prefix("<=") {
            Condition::LessEqual(parse_threshold(val)?)
        } else if let Some(val) = s.strip_prefix('>') {
            Condition::GreaterThan(parse_threshold(val)?)
        } else if let Some(val) = s.strip_prefix('<') {
            Condition::LessThan(parse_threshold(val)?)
        } else if let Some(val) = s.strip_prefix('=') {
            Condition::Equal(parse_threshold(val)?)
        } else if let Some((low, high)) = s.split_once("..") {
            let low = parse_threshold(low)?;
            let high = parse_threshold(high)?;
            if low > high {
                bail!("Range start {} is greater than end {}", low, high);
            }
            Condition::Between(low, high)
        } else {
            Condition::Equal(parse_threshold(s)?)
        };
        Ok(condition)
    }

    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Condition::LessThan(n) => value < n,
            Condition::LessEqual(n) => value <= n,
            Condition::GreaterThan(n) => value > n,
            Condition::GreaterEqual(n) => value >= n,
            Condition::Equal(n) => value == n,
            Condition::Between(low, high) => value >= low && value <= high,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::LessThan(n) => write!(f, "< {}", n),
            Condition::LessEqual(n) => write!(f, "<= {}", n),
            Condition::GreaterThan(n) => write!(f, "> {}", n),
            Condition::GreaterEqual(n) => write!(f, ">= {}", n),
            Condition::Equal(n) => write!(f, "= {}", n),
            Condition::Between(low, high) => write!(f, "{}..{}", low, high),
        }
    }
}

fn parse_threshold(s: &str) -> Result<f64> {
    let s = s.trim();
    let n: f64 = s.parse()?;
    if !n.is_finite() {
        bail!("Threshold must be a finite number: {}", s);
    }
    Ok(n)
}

/// Signed amount a matching rule adds to the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta(pub f64);

impl Delta {
    /// Parse "+N", "-N" or "+-N".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let n: f64 = if let Some(val) = s.strip_prefix('+') {
            val.trim().parse()?
        } else if s.starts_with('-') {
            s.parse()?
        } else {
            bail!("Effect must start with + or -: {}", s)
        };
        if !n.is_finite() {
            bail!("Effect must be a finite number: {}", s);
        }
        Ok(Delta(n))
    }

    pub fn apply(&self, score: f64) -> f64 {
        score + self.0
    }

    pub fn is_penalty(&self) -> bool {
        self.0 < 0.0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
