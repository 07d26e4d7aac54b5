use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Width};

use crate::rank::ScoredEntity;
use crate::scoring::{
    ColorClass, Condition, Delta, HealthLabel, ScoreBreakdown, ScoreResult, ScoringConfig,
};

const DEFAULT_BAR_WIDTH: usize = 20;
const NARROW_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Tsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve a color choice, auto-detecting a TTY on stdout
pub fn should_use_colors(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

/// Arc length of a circular gauge showing `score` out of 100.
pub fn gauge_arc_length(score: f64, full_circle_length: f64) -> f64 {
    crate::scoring::clamp_score(score) * (full_circle_length / 100.0)
}

/// Text gauge, e.g. "██████░░░░" for 60 at width 10
pub fn format_gauge(score: f64, width: usize) -> String {
    let filled = gauge_arc_length(score, width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a score with at most one decimal ("60", "72.5")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}

fn paint(text: &str, color: ColorClass, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match color {
        ColorClass::GreenStrong => text.green().bold().to_string(),
        ColorClass::GreenMuted => text.green().to_string(),
        ColorClass::Yellow => text.yellow().to_string(),
        ColorClass::Red => text.red().to_string(),
    }
}

/// Label padded to the widest label, colored by its token
pub fn format_label(label: HealthLabel, use_colors: bool) -> String {
    let padded = format!("{:<9}", label.as_str());
    paint(&padded, label.color_class(), use_colors)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn bar_width_for(term_width: Option<usize>, fixed_width: usize, longest_name: usize) -> usize {
    match term_width {
        Some(width) if width < fixed_width + DEFAULT_BAR_WIDTH + longest_name => NARROW_BAR_WIDTH,
        _ => DEFAULT_BAR_WIDTH,
    }
}

/// Format scored entities as a table: index, score, label, gauge, name.
/// No headers.
pub fn format_scored_table(entities: &[ScoredEntity], use_colors: bool) -> String {
    if entities.is_empty() {
        return "No metrics to score.".to_string();
    }

    let bar_width = table_bar_width(entities);
    entities
        .iter()
        .enumerate()
        .map(|(idx, entity)| format_entity_line(idx, entity, bar_width, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table rows each followed by the rules that produced the score
pub fn format_scored_detail(entities: &[ScoredEntity], use_colors: bool) -> String {
    if entities.is_empty() {
        return "No metrics to score.".to_string();
    }

    let bar_width = table_bar_width(entities);
    entities
        .iter()
        .enumerate()
        .map(|(idx, entity)| {
            format!(
                "{}\n{}",
                format_entity_line(idx, entity, bar_width, use_colors),
                format_breakdown(&entity.result.breakdown)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn table_bar_width(entities: &[ScoredEntity]) -> usize {
    // index (3) + space + score (5) + 2 + label (9) + 2 + 2 before name
    let fixed_width = 3 + 1 + 5 + 2 + 9 + 2 + 2;
    let longest_name = entities.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    bar_width_for(get_terminal_width(), fixed_width, longest_name)
}

fn format_entity_line(idx: usize, entity: &ScoredEntity, bar_width: usize, use_colors: bool) -> String {
    let result = &entity.result;
    let index_str = format!("{:>2}.", idx + 1);
    let score_str = format!("{:>5}", format_score(result.score));
    let bar = paint(
        &format_gauge(result.score, bar_width),
        result.color_class,
        use_colors,
    );

    if use_colors {
        format!(
            "{} {}  {}  {}  {}",
            index_str.dimmed(),
            score_str.bold(),
            format_label(result.label, true),
            bar,
            entity.name
        )
    } else {
        format!(
            "{} {}  {}  {}  {}",
            index_str,
            score_str,
            format_label(result.label, false),
            bar,
            entity.name
        )
    }
}

/// Multi-line list of the rules that fired (for verbose mode)
pub fn format_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut lines = vec![format!("  base {}", format_score(breakdown.base_score))];
    for rule in &breakdown.rules {
        lines.push(format!(
            "  {:+} {} {} (value {})",
            rule.delta, rule.metric, rule.when, rule.value
        ));
    }
    if breakdown.raw_score != crate::scoring::clamp_score(breakdown.raw_score) {
        lines.push(format!(
            "  raw {} clamped to [0, 100]",
            format_score(breakdown.raw_score)
        ));
    }
    lines.join("\n")
}

/// Single score with label and color token, e.g. "Good\tgreen-muted"
pub fn format_classification(score: f64, label: HealthLabel, color: ColorClass) -> String {
    format!("{}\t{}\t{}", format_score(score), label, color)
}

#[derive(Serialize)]
struct JsonEntity<'a> {
    name: &'a str,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

/// Format scored entities as a pretty JSON array
pub fn format_json(entities: &[ScoredEntity]) -> Result<String> {
    let rows: Vec<JsonEntity> = entities
        .iter()
        .map(|e| JsonEntity {
            name: &e.name,
            result: &e.result,
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("Failed to serialize scores as JSON")
}

/// Format scored entities as tab-separated values for scripting
/// Columns: score, label, name (no headers, no colors)
pub fn format_tsv(entities: &[ScoredEntity]) -> String {
    entities
        .iter()
        .map(|e| {
            format!(
                "{}\t{}\t{}",
                format_score(e.result.score),
                e.result.label,
                e.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the effective rule table
pub fn format_rules(config: &ScoringConfig) -> String {
    let mut lines = vec![format!("base score: {}", format_score(config.effective_base_score()))];
    for rule in config.effective_rules().iter() {
        let when = Condition::parse(&rule.when)
            .map(|c| c.to_string())
            .unwrap_or_else(|_| rule.when.clone());
        let effect = Delta::parse(&rule.effect)
            .map(|d| d.to_string())
            .unwrap_or_else(|_| rule.effect.clone());
        let absent = match rule.if_absent {
            Some(policy) => format!("  (if absent: {})", policy.as_str()),
            None => String::new(),
        };
        lines.push(format!("{:>5}  {} {}{}", effect, rule.metric, when, absent));
    }
    lines.join("\n")
}
