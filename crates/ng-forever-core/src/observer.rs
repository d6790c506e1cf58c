//! Observer contract for scan progress reporting.

use crate::types::{FixSuggestion, ScanStats};
use std::path::Path;

/// Receives scan events as they happen.
///
/// The scanner invokes the observer once per discovered issue, once per
/// rule that was skipped or finished clean, once per fix suggestion, and
/// once at the end with the aggregate stats. All methods default to no-ops
/// so consumers implement only what they display.
pub trait ScanObserver {
    /// Called for every issue, in discovery order. `seq` is the run-wide
    /// 1-based sequence number across all rules.
    fn issue(&mut self, seq: usize, file: &Path, line: usize, code: &str, is_commented: bool) {
        let _ = (seq, file, line, code, is_commented);
    }

    /// Called when a rule is skipped because the detected framework
    /// version satisfies none of its supported ranges.
    fn rule_skipped(&mut self, description: &str, version: &str) {
        let _ = (description, version);
    }

    /// Called when a rule ran over every matching file without findings.
    fn rule_clean(&mut self, description: &str) {
        let _ = description;
    }

    /// Called once per rule that found issues, when suggestion display is
    /// enabled.
    fn fix_suggestion(&mut self, suggestion: &FixSuggestion) {
        let _ = suggestion;
    }

    /// Called once after all rules have executed.
    fn stats(&mut self, stats: &ScanStats) {
        let _ = stats;
    }
}

/// Observer that discards every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl ScanObserver for NullObserver {}
