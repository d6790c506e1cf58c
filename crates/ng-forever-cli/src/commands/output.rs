//! Shared output formatting for scan results.

use anyhow::Result;
use ng_forever_core::{FixSuggestion, ScanObserver, ScanResult};
use std::path::Path;

use crate::OutputFormat;

/// Print the scan result in the specified format.
///
/// Text mode only prints the summary: per-issue lines were already
/// emitted live by the [`ConsoleObserver`] during the scan.
pub fn print(result: &ScanResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &ScanResult) {
    let issues = result.total_issues();
    let summary_color = if issues > 0 { "\x1b[31m" } else { "\x1b[32m" };

    println!(
        "\n{}Found {} issue(s) in {} file(s) scanned\x1b[0m",
        summary_color, issues, result.stats.files_scanned
    );
    println!(
        "Directories scanned: {}, errors: {}",
        result.stats.directories_scanned, result.stats.errors
    );
}

fn print_json(result: &ScanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &ScanResult) {
    for report in &result.reports {
        for issue in &report.issues {
            println!(
                "{}:{}: {} [{}]",
                issue.file.display(),
                issue.line,
                issue.code,
                report.rule,
            );
        }
    }
}

/// Observer that prints findings to the console as they are discovered.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Creates a new console observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ScanObserver for ConsoleObserver {
    fn issue(&mut self, seq: usize, file: &Path, line: usize, code: &str, is_commented: bool) {
        println!("\x1b[33m#{seq}\x1b[0m {}:{line}", file.display());
        println!("    {code}");
        if is_commented {
            println!("    \x1b[2mnote: this issue is in commented code\x1b[0m");
        }
    }

    fn rule_skipped(&mut self, description: &str, version: &str) {
        println!("\x1b[2mSkipping \"{description}\": not valid for version {version}\x1b[0m");
    }

    fn rule_clean(&mut self, description: &str) {
        println!("\x1b[32mNo issues found\x1b[0m for \"{description}\"");
    }

    fn fix_suggestion(&mut self, suggestion: &FixSuggestion) {
        println!("\n\x1b[36mFix suggestion\x1b[0m: {}", suggestion.description);
        for step in &suggestion.suggestions {
            println!("  = help: {step}");
        }
    }
}
