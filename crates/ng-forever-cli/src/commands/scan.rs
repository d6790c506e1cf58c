//! Scan command implementation.

use anyhow::{Context, Result};
use ng_forever_core::{Config, Rule, Scanner};
use std::path::PathBuf;

use crate::commands::output::{self, ConsoleObserver};
use crate::{config_resolver, framework, report, OutputFormat};

/// Options collected from the command line for one scan run.
pub struct ScanArgs {
    /// Directory to scan.
    pub path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Skip commented code instead of flagging it.
    pub skip_commented: bool,
    /// Suppress fix suggestions.
    pub no_fix_suggestions: bool,
    /// Write an HTML report after the scan.
    pub export_report: bool,
    /// Additional exclude glob patterns.
    pub exclude: Vec<String>,
    /// Version override from the command line.
    pub framework_version: Option<semver::Version>,
    /// Explicit config file path from the command line.
    pub config: Option<PathBuf>,
}

/// Runs the scan command.
pub fn run(args: &ScanArgs) -> Result<()> {
    let source = config_resolver::resolve(&args.path, args.config.as_deref());
    let config = match source.path() {
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
        None => Config::default(),
    };

    // CLI flags win over config file values.
    let skip_commented = args.skip_commented || config.scanner.skip_commented;
    let export_report = args.export_report || config.scanner.export_report;

    // Version priority: --framework-version, then the config override
    // (applied inside the builder), then manifest detection.
    let detected = args.framework_version.clone().or_else(|| {
        if config.scanner.framework_version.is_none() {
            framework::detect(&args.path)
        } else {
            None
        }
    });

    let mut builder = Scanner::builder().root(&args.path);

    for rule in ng_forever_rules::default_rules(skip_commented) {
        if config.is_rule_enabled(rule.name()) {
            builder = builder.rule_box(rule);
        } else {
            tracing::debug!("Skipping disabled rule: {}", rule.name());
        }
    }

    for pattern in &args.exclude {
        builder = builder.exclude(pattern.clone());
    }

    if let Some(version) = detected {
        builder = builder.framework_version(version);
    }
    if args.no_fix_suggestions {
        builder = builder.show_fix_suggestions(false);
    }
    if matches!(args.format, OutputFormat::Text) {
        builder = builder.observer(Box::new(ConsoleObserver::new()));
    }

    let mut scanner = builder
        .config(config)
        .build()
        .context("Failed to build scanner")?;

    tracing::info!(
        "Scanning {:?} with {} rule(s)",
        args.path,
        scanner.rule_count()
    );

    let result = scanner.scan().context("Scan failed")?;

    output::print(&result, args.format)?;

    // Export is best-effort: a rendering or write failure never fails the
    // scan that produced the result.
    if export_report {
        match report::write_html(&result, &args.path) {
            Ok(path) => tracing::info!("Report written to {}", path.display()),
            Err(err) => tracing::error!("Report export failed: {err}"),
        }
    }

    // Findings are not process failures; only a fatal setup error (missing
    // target path, unreadable config) exits non-zero.
    Ok(())
}
