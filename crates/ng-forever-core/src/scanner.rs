//! Scan orchestrator binding rules to files.

use crate::config::Config;
use crate::observer::{NullObserver, ScanObserver};
use crate::rule::{Rule, RuleBox};
use crate::types::{FixSuggestion, ReportedIssue, RuleReport, ScanResult, ScanStats};
use crate::walker;

use semver::{Version, VersionReq};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The target path was missing or unreadable at scan start.
    #[error("Target path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// IO error outside the per-file recovery paths.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user-supplied exclude pattern.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    framework_version: Option<Version>,
    show_fix_suggestions: Option<bool>,
    observer: Option<Box<dyn ScanObserver>>,
    config: Option<Config>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule. Registration order is execution order.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the detected framework version. When never set, every rule's
    /// version gate passes.
    #[must_use]
    pub fn framework_version(mut self, version: Version) -> Self {
        self.framework_version = Some(version);
        self
    }

    /// Sets whether fix suggestions are attached to reports (default: true).
    #[must_use]
    pub fn show_fix_suggestions(mut self, show: bool) -> Self {
        self.show_fix_suggestions = Some(show);
        self
    }

    /// Sets the observer notified of scan progress.
    #[must_use]
    pub fn observer(mut self, observer: Box<dyn ScanObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the configuration. Builder calls win over config values.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob or the
    /// current directory cannot be resolved.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.scanner.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.scanner.exclude.clone());
        }
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        // A malformed version override degrades to "unknown", the same
        // absent-version state a failed detection produces.
        let framework_version = self.framework_version.or_else(|| {
            let raw = self.config.as_ref()?.scanner.framework_version.clone()?;
            match Version::parse(&raw) {
                Ok(version) => Some(version),
                Err(err) => {
                    warn!("Ignoring unparsable framework_version {raw:?}: {err}");
                    None
                }
            }
        });

        let show_fix_suggestions = self.show_fix_suggestions.unwrap_or_else(|| {
            self.config
                .as_ref()
                .map_or(true, |c| c.scanner.show_fix_suggestions)
        });

        Ok(Scanner {
            root,
            rules: self.rules,
            excludes,
            framework_version,
            show_fix_suggestions,
            observer: self.observer.unwrap_or_else(|| Box::new(NullObserver)),
        })
    }
}

/// The orchestrator that binds rules to files and aggregates results.
///
/// Use [`Scanner::builder()`] to construct an instance. Each call to
/// [`Scanner::scan`] owns a fresh [`ScanStats`]; calling it repeatedly is
/// supported and yields identical results over an unchanged tree.
pub struct Scanner {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    framework_version: Option<Version>,
    show_fix_suggestions: bool,
    observer: Box<dyn ScanObserver>,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Returns the root directory being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every registered rule over the tree under the root.
    ///
    /// Per-item failures (unreadable directories or files) degrade to the
    /// error counter and log lines; a partial result is always returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root is missing at scan start.
    pub fn scan(&mut self) -> Result<ScanResult, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }

        info!("Starting scan at {:?}", self.root);

        let mut stats = ScanStats::default();

        let mut extensions: Vec<&str> = Vec::new();
        for rule in &self.rules {
            let ext = rule.file_extension();
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }

        let walk = walker::collect(&self.root, &extensions, &self.excludes);
        stats.directories_scanned = walk.directories_scanned;
        stats.errors = walk.errors;

        info!("Found {} candidate file(s)", walk.files.len());

        let mut reports = Vec::new();
        let mut seq = 0usize;

        for rule in &self.rules {
            // Version gate: a rule is skipped only when a version was
            // detected and satisfies none of its ranges. An unknown
            // version proceeds.
            if let Some(version) = &self.framework_version {
                if !version_supported(version, rule.supported_versions()) {
                    warn!(
                        "Skipping rule \"{}\": not valid for version {version}",
                        rule.description()
                    );
                    self.observer
                        .rule_skipped(rule.description(), &version.to_string());
                    continue;
                }
            }

            let mut issues = Vec::new();

            for file in walk
                .files
                .iter()
                .filter(|f| f.to_string_lossy().ends_with(rule.file_extension()))
            {
                let content = match std::fs::read_to_string(file) {
                    Ok(content) => content,
                    Err(err) => {
                        warn!("Failed to read {}: {err}", file.display());
                        stats.errors += 1;
                        continue;
                    }
                };
                stats.files_scanned += 1;
                debug!("Scanning file: {}", file.display());

                for issue in rule.scan_content(&content) {
                    seq += 1;
                    let code = issue.code.trim().to_string();
                    self.observer
                        .issue(seq, file, issue.line, &code, issue.is_commented);
                    issues.push(ReportedIssue {
                        file: file.clone(),
                        line: issue.line,
                        code,
                    });
                }
            }

            let fix_suggestion = if issues.is_empty() {
                self.observer.rule_clean(rule.description());
                None
            } else if self.show_fix_suggestions {
                let suggestion = FixSuggestion {
                    description: rule.description().to_string(),
                    suggestions: rule
                        .fix_suggestions()
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                };
                self.observer.fix_suggestion(&suggestion);
                Some(suggestion)
            } else {
                None
            };

            reports.push(RuleReport {
                rule: rule.name().to_string(),
                issues,
                fix_suggestion,
            });
        }

        self.observer.stats(&stats);

        info!(
            "Scan complete: {} issue(s) across {} work unit(s)",
            seq, stats.files_scanned
        );

        Ok(ScanResult { stats, reports })
    }
}

/// Whether a detected version satisfies at least one supported range.
///
/// An empty range list means the rule applies to every version. A range
/// string that fails to parse never matches.
fn version_supported(version: &Version, ranges: &[&str]) -> bool {
    if ranges.is_empty() {
        return true;
    }

    ranges.iter().any(|range| match VersionReq::parse(range) {
        Ok(req) => req.matches(version),
        Err(err) => {
            warn!("Ignoring unparsable version range {range:?}: {err}");
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_resolves_relative_root() {
        let mut scanner = Scanner::builder()
            .root(".")
            .exclude("**/coverage/**")
            .build()
            .expect("Failed to build scanner");

        assert!(scanner.root().is_absolute());
        assert_eq!(scanner.rule_count(), 0);
        // No rules registered: the scan still completes with empty reports.
        let result = scanner.scan().expect("scan failed");
        assert!(result.reports.is_empty());
    }

    #[test]
    fn invalid_exclude_pattern_is_rejected() {
        let result = Scanner::builder().root(".").exclude("[invalid").build();
        assert!(matches!(result, Err(ScanError::Glob(_))));
    }

    #[test]
    fn missing_root_fails_at_scan_start() {
        let mut scanner = Scanner::builder()
            .root("/nonexistent/ng-forever-test-root")
            .build()
            .expect("Failed to build scanner");
        assert!(matches!(scanner.scan(), Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn empty_ranges_match_any_version() {
        let version = Version::new(3, 9, 0);
        assert!(version_supported(&version, &[]));
    }

    #[test]
    fn range_gate_matches_semver_semantics() {
        assert!(!version_supported(&Version::new(3, 9, 0), &[">=4.0.0"]));
        assert!(version_supported(&Version::new(5, 0, 0), &[">=4.0.0"]));
        assert!(version_supported(
            &Version::new(2, 4, 0),
            &["^1.0.0", ">=2.0.0"]
        ));
    }

    #[test]
    fn unparsable_range_never_matches() {
        assert!(!version_supported(&Version::new(4, 0, 0), &["not-a-range"]));
    }

    #[test]
    fn config_values_feed_the_builder() {
        let config = Config::parse(
            r#"
[scanner]
show_fix_suggestions = false
framework_version = "17.0.1"
exclude = ["**/coverage/**"]
"#,
        )
        .expect("parse failed");

        let scanner = Scanner::builder()
            .root(".")
            .config(config)
            .build()
            .expect("Failed to build scanner");

        assert!(!scanner.show_fix_suggestions);
        assert_eq!(scanner.framework_version, Some(Version::new(17, 0, 1)));
        assert_eq!(scanner.excludes.len(), 1);
    }

    #[test]
    fn unparsable_config_version_degrades_to_unknown() {
        let config = Config::parse(
            r#"
[scanner]
framework_version = "seventeen"
"#,
        )
        .expect("parse failed");

        let scanner = Scanner::builder()
            .root(".")
            .config(config)
            .build()
            .expect("Failed to build scanner");
        assert!(scanner.framework_version.is_none());
    }
}
