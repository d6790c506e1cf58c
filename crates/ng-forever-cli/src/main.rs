//! ng-forever CLI tool.
//!
//! Usage:
//! ```bash
//! ng-forever scan [OPTIONS] [PATH]
//! ng-forever list-rules
//! ng-forever init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod framework;
mod report;

/// Template scanner for Angular projects
#[derive(Parser)]
#[command(name = "ng-forever")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan template files for rule violations
    Scan {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Skip commented code instead of flagging it
        #[arg(long)]
        skip_commented: bool,

        /// Do not print fix suggestions
        #[arg(long)]
        no_fix_suggestions: bool,

        /// Write an HTML report into the scanned directory
        #[arg(long)]
        export_report: bool,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Framework version override (skips manifest detection)
        #[arg(long, value_parser = semver::Version::parse)]
        framework_version: Option<semver::Version>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for scan results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-issue compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan {
            path,
            format,
            skip_commented,
            no_fix_suggestions,
            export_report,
            exclude,
            framework_version,
        } => commands::scan::run(&commands::scan::ScanArgs {
            path,
            format,
            skip_commented,
            no_fix_suggestions,
            export_report,
            exclude,
            framework_version,
            config: cli.config,
        }),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
