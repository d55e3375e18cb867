//! flow-diff: human-readable change reports between two flow snapshots.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use flow_diff::{
    cli::{self, ConfigAction},
    config::AppConfig,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flow-diff")]
#[command(version)]
#[command(about = "Human-readable change reports between two versioned flow snapshots", long_about = None)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
#[command(after_help = "EXIT CODES:
    0  Report written (no changes, or changes without --fail-on-change)
    1  Changes detected with --fail-on-change
    2  Some differences could not be rendered
    3  Error occurred

EXAMPLES:
    # Markdown report on stdout
    flow-diff flow-v1.json flow-v2.json

    # Per-kind counts for a CI log
    flow-diff flow-v1.json flow-v2.json -o summary --fail-on-change

    # Keep comparator order and write to a file
    flow-diff flow-v1.json flow-v2.json --preserve-order -O flow-diff.md")]
struct Cli {
    /// Path to the earlier flow snapshot
    #[arg(required = true)]
    before: Option<PathBuf>,

    /// Path to the later flow snapshot
    #[arg(required = true)]
    after: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Render differences in comparator order instead of sorting them
    #[arg(long)]
    preserve_order: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FLOW_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        None => {
            let (Some(before), Some(after)) = (cli.before, cli.after) else {
                anyhow::bail!("both BEFORE and AFTER snapshot paths are required");
            };

            let overrides = AppConfig::builder()
                .output_file(cli.output_file)
                .no_color(cli.no_color)
                .sort_differences(!cli.preserve_order)
                .fail_on_change(cli.fail_on_change)
                .quiet(cli.quiet)
                .build();
            let (config, loaded_from) = AppConfig::from_file_with_overrides(
                cli.config.as_deref(),
                &overrides,
                cli.output,
            )?;
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            cli::run_diff(config.into_diff_config(before, after))
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "flow-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Some(Commands::ConfigSchema { output }) => {
            cli::run_config_schema(output.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }

        Some(Commands::Config { action }) => {
            cli::run_config(action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}
