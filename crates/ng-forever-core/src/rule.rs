//! Rule trait for defining detection rules.

use crate::comment::CommentTracker;
use crate::types::Issue;

/// A line-oriented detection rule.
///
/// Implement this trait to create rules that classify individual template
/// lines. A rule declares the file extension it applies to, the framework
/// version ranges it is valid for, and fix guidance to show when it finds
/// something.
///
/// # Example
///
/// ```ignore
/// use ng_forever_core::{Issue, Rule};
///
/// pub struct NoInlineStyles;
///
/// impl Rule for NoInlineStyles {
///     fn name(&self) -> &'static str { "no-inline-styles" }
///     fn description(&self) -> &'static str { "Find inline style attributes" }
///     fn file_extension(&self) -> &'static str { "html" }
///
///     fn classify_line(&self, line: &str, line_number: usize) -> Option<Issue> {
///         line.contains("style=").then(|| Issue::new(line_number, line))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "ng-for-track-by").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule detects.
    fn description(&self) -> &'static str;

    /// Returns the file extension this rule applies to, without a leading
    /// dot. Matching is by path suffix, not dot-delimited extension.
    fn file_extension(&self) -> &'static str;

    /// Returns the semver range strings this rule is valid for.
    ///
    /// An empty slice means the rule applies to every framework version.
    fn supported_versions(&self) -> &[&str] {
        &[]
    }

    /// Returns remediation steps shown when this rule finds issues.
    fn fix_suggestions(&self) -> &[&str] {
        &[]
    }

    /// Whether lines classified as commented are skipped entirely instead
    /// of being reported with a commented flag.
    fn skip_commented(&self) -> bool {
        false
    }

    /// Classifies a single line.
    ///
    /// Pure function of the line text and its 1-based number: returns an
    /// [`Issue`] if the line violates the rule, `None` otherwise.
    fn classify_line(&self, line: &str, line_number: usize) -> Option<Issue>;

    /// Scans a whole file's content, driving the comment tracker per line.
    ///
    /// Splits on `\n` boundaries only; carriage returns are not normalized,
    /// so a `\r\n` file keeps its `\r` on each line (it disappears from
    /// reported code text only through trimming). Line numbers are 1-based
    /// and match source position.
    fn scan_content(&self, content: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut tracker = CommentTracker::new();

        for (index, line) in content.split('\n').enumerate() {
            let class = tracker.observe(line, self.skip_commented());
            if !class.should_check {
                continue;
            }
            if let Some(mut issue) = self.classify_line(line, index + 1) {
                issue.is_commented = class.is_commented;
                issues.push(issue);
            }
        }

        issues
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct MarkerRule {
        skip_commented: bool,
    }

    impl Rule for MarkerRule {
        fn name(&self) -> &'static str {
            "marker"
        }
        fn description(&self) -> &'static str {
            "Find MARKER tokens"
        }
        fn file_extension(&self) -> &'static str {
            "html"
        }
        fn skip_commented(&self) -> bool {
            self.skip_commented
        }

        fn classify_line(&self, line: &str, line_number: usize) -> Option<Issue> {
            line.contains("MARKER").then(|| Issue::new(line_number, line))
        }
    }

    #[test]
    fn line_numbers_are_one_based_and_increasing() {
        let rule = MarkerRule {
            skip_commented: false,
        };
        let issues = rule.scan_content("MARKER\nclean\nMARKER\n\nMARKER");
        assert_eq!(
            issues.iter().map(|i| i.line).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[test]
    fn skip_commented_drops_comment_block_lines() {
        let rule = MarkerRule {
            skip_commented: true,
        };
        let issues = rule.scan_content("<!--\nMARKER\n-->\nMARKER");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 4);
    }

    #[test]
    fn commented_issues_are_flagged_when_not_skipped() {
        let rule = MarkerRule {
            skip_commented: false,
        };
        let issues = rule.scan_content("<!-- MARKER -->\nMARKER");
        assert_eq!(issues.len(), 2);
        assert!(issues[0].is_commented);
        assert!(!issues[1].is_commented);
    }

    #[test]
    fn crlf_content_keeps_source_line_numbers() {
        let rule = MarkerRule {
            skip_commented: false,
        };
        let issues = rule.scan_content("clean\r\nMARKER\r\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
    }

    #[test]
    fn empty_content_yields_no_issues() {
        let rule = MarkerRule {
            skip_commented: false,
        };
        assert!(rule.scan_content("").is_empty());
    }
}
