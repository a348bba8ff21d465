//! Counsel CLI
//!
//! Command-line interface for checking attorney retainer contracts.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a contract text file
//! counsel analyze --input contract.txt
//!
//! # Pipe from stdin
//! cat contract.txt | counsel analyze
//!
//! # Letter to send to the attorney
//! counsel analyze --input contract.txt --format letter
//!
//! # Custom rubric
//! counsel analyze --input contract.txt --rubric rubric.yaml
//!
//! # Validate a rubric file
//! counsel rubric validate rubric.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Excellent (80 and above)
//! - 1: Fair (60 to 79)
//! - 2: Caution (below 60)
//! - 3: Error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use counsel_core::{format_summary, Grade, Importance, MatchMode, Rubric};
use counsel_runtime::{Orchestrator, RuntimeConfig, SessionId, Submission};

/// Counsel: quality checks for attorney retainer contracts
#[derive(Parser)]
#[command(name = "counsel")]
#[command(version)]
#[command(about = "Score attorney retainer contracts against a clause and risk rubric", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a contract text
    Analyze {
        /// Path to the contract text (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Custom rubric file (YAML or JSON)
        #[arg(short, long)]
        rubric: Option<PathBuf>,

        /// Runtime config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum contract length in characters
        #[arg(long)]
        min_chars: Option<usize>,

        /// Explicit timestamp for reproducible output (ISO 8601 / RFC 3339).
        /// Example: --analyzed-at 2025-12-20T00:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        analyzed_at: Option<DateTime<Utc>>,
    },

    /// Rubric management commands
    Rubric {
        #[command(subcommand)]
        action: RubricAction,
    },
}

#[derive(Subcommand)]
enum RubricAction {
    /// Validate a rubric file
    Validate {
        /// Path to the rubric file
        path: PathBuf,
    },

    /// Show rubric entries (the built-in rubric if no file is given)
    Show {
        /// Path to the rubric file
        #[arg(short, long)]
        rubric: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: ShowFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full analysis report
    Text,
    /// Result, report and letter as JSON
    Json,
    /// Improvement request letter
    Letter,
    /// Score and dashboard figures
    Summary,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Text,
    Yaml,
}

/// Parse ISO 8601 / RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected ISO 8601/RFC 3339 (e.g., 2025-12-20T00:00:00Z)", e))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            rubric,
            config,
            min_chars,
            analyzed_at,
        } => analyze_command(input, format, rubric, config, min_chars, analyzed_at),

        Commands::Rubric { action } => match action {
            RubricAction::Validate { path } => validate_rubric(path),
            RubricAction::Show { rubric, format } => show_rubric(rubric, format),
        },
    }
}

fn analyze_command(
    input_path: Option<PathBuf>,
    format: OutputFormat,
    rubric_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    min_chars: Option<usize>,
    analyzed_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let mut config = match &config_path {
        Some(path) => RuntimeConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => RuntimeConfig::default(),
    };

    // Flags override the config file
    if rubric_path.is_some() {
        config.rubric.path = rubric_path;
    }
    if let Some(min) = min_chars {
        config.intake.min_text_chars = min;
    }
    if analyzed_at.is_some() {
        config.determinism.analyzed_at = analyzed_at;
    }

    let text = match input_path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read contract from {:?}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let now = config.now();
    let mut orchestrator = Orchestrator::new(config).context("Failed to set up analysis")?;
    let outcome = orchestrator
        .analyze(SessionId::new("cli"), &Submission::text(text), now)
        .context("Analysis failed")?;

    match format {
        OutputFormat::Text => println!("{}", outcome.report),
        OutputFormat::Letter => println!("{}", outcome.improvement_request),
        OutputFormat::Summary => println!("{}", format_summary(&outcome.result)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)?;
            println!("{}", json);
        }
    }

    Ok(match outcome.result.grade {
        Grade::Excellent => ExitCode::from(0),
        Grade::Fair => ExitCode::from(1),
        Grade::Caution => ExitCode::from(2),
    })
}

fn validate_rubric(path: PathBuf) -> Result<ExitCode> {
    match Rubric::from_file(&path) {
        Ok(rubric) => {
            println!("Rubric is valid: {}", path.display());
            println!();
            print_counts(&rubric);
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Rubric validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}

fn show_rubric(path: Option<PathBuf>, format: ShowFormat) -> Result<ExitCode> {
    let loaded;
    let rubric = match &path {
        Some(path) => {
            loaded = Rubric::from_file(path)
                .with_context(|| format!("Failed to load rubric from {:?}", path))?;
            &loaded
        }
        None => Rubric::builtin(),
    };

    match format {
        ShowFormat::Yaml => print!("{}", rubric.to_yaml()?),
        ShowFormat::Text => print_rubric(rubric),
    }

    Ok(ExitCode::from(0))
}

fn print_counts(rubric: &Rubric) {
    println!("Clauses: {}", rubric.clauses().len());
    println!("  Required: {}", rubric.count(Importance::Required));
    println!("  Recommended: {}", rubric.count(Importance::Recommended));
    println!("  Required if hourly: {}", rubric.count(Importance::RequiredIfHourly));
    println!("Risk patterns: {}", rubric.risk_patterns().len());
    println!("Hourly markers: {}", rubric.hourly_markers().len());
}

fn print_rubric(rubric: &Rubric) {
    print_counts(rubric);
    println!();

    println!("Clauses:");
    for clause in rubric.clauses() {
        println!("  [{}] {}: {}", clause.importance.label(), clause.name, clause.description);
        let keywords: Vec<&str> = clause.keywords.iter().map(|k| k.as_str()).collect();
        println!("      keywords: {}", keywords.join(", "));
        if clause.requires_specificity() {
            println!("      specificity checked");
        }
    }
    println!();

    println!("Risk patterns:");
    for pattern in rubric.risk_patterns() {
        println!(
            "  {} [{}] {}: {}",
            pattern.risk_level.marker(),
            pattern.risk_level.label(),
            pattern.name,
            pattern.description
        );
        let keywords: Vec<&str> = pattern.keywords.iter().map(|k| k.as_str()).collect();
        println!("      keywords: {}", keywords.join(", "));
        match &pattern.mode {
            MatchMode::Simple { anti_keywords } if !anti_keywords.is_empty() => {
                let anti: Vec<&str> = anti_keywords.iter().map(|k| k.as_str()).collect();
                println!("      unless: {}", anti.join(", "));
            }
            MatchMode::Simple { .. } => {}
            MatchMode::VagueCheck(_) => println!("      fires on vague wording only"),
        }
    }
}
