//! Core types for scan findings and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single rule violation on one line of one file.
///
/// Produced by [`crate::Rule::classify_line`] and owned by the scan call
/// that created it. `code` holds the raw line text; trimming happens when
/// the issue is promoted into a [`ReportedIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Line number (1-indexed).
    pub line: usize,
    /// Raw text of the offending line.
    pub code: String,
    /// Whether the comment tracker classified this line as commented.
    pub is_commented: bool,
}

impl Issue {
    /// Creates a new issue for a line. The commented flag is stamped later
    /// by [`crate::Rule::scan_content`] from the tracker's classification.
    #[must_use]
    pub fn new(line: usize, code: impl Into<String>) -> Self {
        Self {
            line,
            code: code.into(),
            is_commented: false,
        }
    }
}

/// A file-qualified issue as it appears in a rule's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedIssue {
    /// Path of the file the issue was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Trimmed text of the offending line.
    pub code: String,
}

/// Fix guidance attached to a rule's report when issues were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    /// What the rule detects.
    pub description: String,
    /// Concrete remediation steps, in display order.
    pub suggestions: Vec<String>,
}

/// One rule's aggregated findings for a scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    /// Kebab-case name of the rule that produced this report.
    pub rule: String,
    /// Issues in walker order.
    pub issues: Vec<ReportedIssue>,
    /// Present iff the rule found issues and suggestion display is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<FixSuggestion>,
}

/// Counters accumulated over one scan invocation.
///
/// `files_scanned` counts (rule, file) pairs actually opened: a file
/// matched by two rules is counted twice, a file no rule matches is not
/// counted at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Files opened for scanning, per rule.
    pub files_scanned: usize,
    /// Directories descended into (excluded directories are not counted).
    pub directories_scanned: usize,
    /// Traversal and read failures, all non-fatal.
    pub errors: usize,
}

/// Result of running a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Counters for the whole run.
    pub stats: ScanStats,
    /// Per-rule reports in rule registration order. Rules skipped by the
    /// version gate produce no entry.
    pub reports: Vec<RuleReport>,
}

impl ScanResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of issues across all rules.
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.reports.iter().map(|r| r.issues.len()).sum()
    }

    /// Returns true if any rule found issues.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.reports.iter().any(|r| !r.issues.is_empty())
    }

    /// Returns the report for a rule by name, if the rule ran.
    #[must_use]
    pub fn report_for(&self, rule: &str) -> Option<&RuleReport> {
        self.reports.iter().find(|r| r.rule == rule)
    }
}
