pub mod formatter;

pub use formatter::{
    format_breakdown, format_classification, format_gauge, format_json, format_rules,
    format_score, format_scored_detail, format_scored_table, format_tsv, gauge_arc_length,
    should_use_colors, ColorChoice, OutputFormat,
};
