use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use fin_health::metrics::{Metric, MetricSet, NamedMetrics};
use fin_health::output::{self, ColorChoice, OutputFormat};
use fin_health::scoring::{self, ScoringConfig};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a metrics file (JSON or YAML; one metric set or several named ones)
    Score {
        /// Path to the metrics file
        file: PathBuf,
    },
    /// Score a single metric set given as flags
    Eval {
        #[arg(long, allow_negative_numbers = true)]
        profit_margin: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        current_ratio: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        debt_to_equity: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        revenue_growth: Option<f64>,
    },
    /// Print the label and color token for a score
    Classify {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Print the effective scoring rules
    Rules,
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fin-health/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// When to color output (overrides config)
    #[arg(long, global = true, value_enum)]
    color: Option<ColorChoice>,
}

#[derive(Parser, Debug)]
#[command(name = "fin-health")]
#[command(about = "Financial health score calculator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Settings resolved from flags and the config file
struct Session {
    scoring: ScoringConfig,
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    fin_health::logging::init(cli.global.verbose);

    let opts = &cli.global;
    let code = match cli.command {
        Commands::Init { force } => run_init(opts.config.as_deref(), force),
        Commands::Score { file } => with_session(opts, |s| score_file(s, &file)),
        Commands::Eval {
            profit_margin,
            current_ratio,
            debt_to_equity,
            revenue_growth,
        } => with_session(opts, |s| {
            let metrics = [
                (Metric::ProfitMargin, profit_margin),
                (Metric::CurrentRatio, current_ratio),
                (Metric::DebtToEquity, debt_to_equity),
                (Metric::RevenueGrowth, revenue_growth),
            ]
            .into_iter()
            .fold(MetricSet::new(), |set, (metric, value)| match value {
                Some(v) => set.with(metric, v),
                None => set,
            });
            report(
                s,
                vec![NamedMetrics {
                    name: "eval".to_string(),
                    metrics,
                }],
            )
        }),
        Commands::Classify { score } => with_session(opts, |s| classify_score(s, score)),
        Commands::Rules => with_session(opts, |s| {
            println!("{}", output::format_rules(&s.scoring));
            EXIT_SUCCESS
        }),
    };

    std::process::exit(code);
}

/// Load and validate config, then run `f`. Config problems exit with EXIT_CONFIG.
fn with_session(opts: &GlobalOpts, f: impl FnOnce(&Session) -> i32) -> i32 {
    let config = match fin_health::config::load_config(opts.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_CONFIG;
    }

    let session = Session {
        scoring,
        format: opts.format.or(config.output_format()).unwrap_or_default(),
        use_colors: output::should_use_colors(
            opts.color.or(config.color_choice()).unwrap_or_default(),
        ),
        verbose: opts.verbose,
    };
    f(&session)
}

fn run_init(path: Option<&Path>, force: bool) -> i32 {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match fin_health::config::get_config_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                return EXIT_CONFIG;
            }
        },
    };

    if let Err(e) = fin_health::config::write_default_config(&path, force) {
        eprintln!("Config error: {:#}", e);
        return EXIT_CONFIG;
    }
    println!("Wrote default config to {}", path.display());
    EXIT_SUCCESS
}

fn score_file(session: &Session, file: &Path) -> i32 {
    match fin_health::metrics::load_metrics(file) {
        Ok(entries) => report(session, entries),
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            EXIT_INPUT
        }
    }
}

fn classify_score(session: &Session, score: f64) -> i32 {
    let score = scoring::clamp_score(score);
    let (label, color) = scoring::classify(score);
    match session.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "score": score,
                "label": label,
                "color_class": color,
            })
        ),
        OutputFormat::Table | OutputFormat::Tsv => {
            println!("{}", output::format_classification(score, label, color))
        }
    }
    EXIT_SUCCESS
}

fn report(session: &Session, entries: Vec<NamedMetrics>) -> i32 {
    let scored = fin_health::rank::score_entities(entries, &session.scoring);

    match session.format {
        OutputFormat::Table if session.verbose => {
            println!("{}", output::format_scored_detail(&scored, session.use_colors));
        }
        OutputFormat::Table => {
            println!("{}", output::format_scored_table(&scored, session.use_colors));
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&scored)),
        OutputFormat::Json => match output::format_json(&scored) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                return EXIT_FAILURE;
            }
        },
    }

    EXIT_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_FAILURE, EXIT_INPUT, EXIT_CONFIG];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(EXIT_FAILURE, 1);
    }
}
