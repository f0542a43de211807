//! # xldm-cli
//!
//! Command-line tools for the Excel data manager: workbook inspection,
//! environment report, database setup and connection check.

mod env_report;
mod run;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use xldm_config::{ConfigSource, DatabaseConfig, DEFAULT_ENV_FILE};
use xldm_db::{bootstrap, probe, remediation_hints, StepOutcome};
use xldm_inspect::inspect_workbook;

/// xldm - Excel data manager tools
#[derive(Parser)]
#[command(name = "xldm")]
#[command(author, version, about = "Excel data manager tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Defaults file read after the environment
    #[arg(long = "env-file", value_name = "PATH", default_value = DEFAULT_ENV_FILE, global = true)]
    env_file: PathBuf,

    /// Append logs to a file
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the sheets of a workbook
    Inspect {
        /// Workbook to inspect (xlsx, xlsm, xlsb, xls, ods)
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output format
        #[arg(short = 'f', long = "format", default_value = "text")]
        format: OutputFormat,
    },
    /// Report tool version, platform and configuration status
    Env {
        /// Output format
        #[arg(short = 'f', long = "format", default_value = "text")]
        format: OutputFormat,
    },
    /// Create the database and its tables
    SetupDb,
    /// Check that the database is reachable
    TestDb {
        /// Output format
        #[arg(short = 'f', long = "format", default_value = "text")]
        format: OutputFormat,
    },
    /// Check configuration and process workbook files
    Run {
        /// Workbooks to process
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

/// Output format for reports.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Plain-text report (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Command::Inspect { path, format } => run_inspect(&path, format),
        Command::Env { format } => run_env(&cli.env_file, format),
        Command::SetupDb => run_setup_db(&cli.env_file).await,
        Command::TestDb { format } => run_test_db(&cli.env_file, format).await,
        Command::Run { files } => Ok(run_files(&cli.env_file, &files)),
    }
}

/// Install the tracing subscriber.
///
/// Logging stays off unless `--verbose` or `--log-file` is given.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn print_error(e: &dyn std::fmt::Display) {
    eprintln!("{} {e}", "Error:".red().bold());
}

/// Inspect one workbook. Failures are printed, not propagated.
fn run_inspect(path: &Path, format: OutputFormat) -> Result<ExitCode> {
    let summary = match inspect_workbook(path) {
        Ok(summary) => summary,
        Err(e) => {
            print_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Text => println!("{summary}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(ExitCode::SUCCESS)
}

/// Load configuration, printing the error on failure.
fn load_source(env_file: &Path) -> Option<ConfigSource> {
    match ConfigSource::load(env_file) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            print_error(&e);
            None
        }
    }
}

/// Load the `DB_*` settings, printing the error on failure.
fn load_database_config(env_file: &Path) -> Option<DatabaseConfig> {
    let source = load_source(env_file)?;
    match DatabaseConfig::from_source(&source) {
        Ok(config) => Some(config),
        Err(e) => {
            print_error(&e);
            None
        }
    }
}

fn run_env(env_file: &Path, format: OutputFormat) -> Result<ExitCode> {
    let Some(source) = load_source(env_file) else {
        return Ok(ExitCode::FAILURE);
    };
    let report = env_report::EnvironmentReport::collect(&source);

    match format {
        OutputFormat::Text => env_report::print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(ExitCode::SUCCESS)
}

/// Process workbooks, then print skipped files and the tally.
///
/// Any missing or unreadable file makes the exit code nonzero.
fn run_files(env_file: &Path, files: &[PathBuf]) -> ExitCode {
    let Some(source) = load_source(env_file) else {
        return ExitCode::FAILURE;
    };

    match run::run(&source, files) {
        Ok(summary) => report_run(&summary),
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_run(summary: &run::RunSummary) -> ExitCode {
    for (path, reason) in &summary.problems {
        print_error(&format!("{}: {reason}", path.display()));
    }
    println!("{summary}");

    if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Create the database if needed, then the tables.
async fn run_setup_db(env_file: &Path) -> Result<ExitCode> {
    let Some(config) = load_database_config(env_file) else {
        return Ok(ExitCode::FAILURE);
    };
    println!("Setting up database {}...", config.name.cyan());

    match bootstrap(&config).await {
        Ok(outcome) => {
            if outcome.database_created {
                println!("Created database: {}", config.name);
            } else {
                println!("Database '{}' already exists", config.name);
            }
            println!("{}", "Database setup complete".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_error(&e);
            print_hints(&remediation_hints(&e.to_string(), &config.name));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Connect at server level, then database level, and list tables.
async fn run_test_db(env_file: &Path, format: OutputFormat) -> Result<ExitCode> {
    let Some(config) = load_database_config(env_file) else {
        return Ok(ExitCode::FAILURE);
    };

    if let OutputFormat::Json = format {
        let report = probe(&config).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("Database configuration:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  User: {}", config.user);
    println!("  Password: {}", config.masked_password());
    println!("  Database: {}", config.name);

    let report = probe(&config).await;

    println!("\nServer connection ({}): {}", report.server_target, outcome_label(&report.server));
    println!(
        "Database connection ({}): {}",
        report.database_target,
        outcome_label(&report.database)
    );

    if report.database.is_ok() {
        if report.tables.is_empty() {
            println!("\nThe database has no tables");
        } else {
            println!("\nTables:");
            for table in &report.tables {
                println!("  - {table}");
            }
        }
    }

    match report.failure() {
        None => Ok(ExitCode::SUCCESS),
        Some(message) => {
            print_error(&message);
            print_hints(&remediation_hints(message, &config.name));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn outcome_label(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Ok => "ok".green().to_string(),
        StepOutcome::Failed(_) => "failed".red().to_string(),
        StepOutcome::Skipped => "skipped".yellow().to_string(),
    }
}

fn print_hints(hints: &[String]) {
    if hints.is_empty() {
        return;
    }
    println!("\n{}", "Possible fixes:".yellow().bold());
    for (i, hint) in hints.iter().enumerate() {
        println!("{}. {hint}", i + 1);
    }
}
