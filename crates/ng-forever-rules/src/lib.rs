//! # ng-forever-rules
//!
//! Built-in detection rules for the ng-forever template scanner.
//!
//! ## Available Rules
//!
//! | Name | Extension | Description |
//! |------|-----------|-------------|
//! | `ng-for-track-by` | `html` | Finds `*ngFor` directives without a `trackBy` callback |
//!
//! ## Usage
//!
//! ```ignore
//! use ng_forever_core::Scanner;
//! use ng_forever_rules::NgForWithoutTrackBy;
//!
//! let mut scanner = Scanner::builder()
//!     .root("./src")
//!     .rule(NgForWithoutTrackBy::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ng_for_track_by;

pub use ng_for_track_by::NgForWithoutTrackBy;

/// Re-export core types for convenience.
pub use ng_forever_core::{Issue, Rule, RuleBox};

/// Returns the default rule set, wired with the given comment-skip mode.
///
/// Registration order here is execution order in the scanner.
#[must_use]
pub fn default_rules(skip_commented: bool) -> Vec<RuleBox> {
    vec![Box::new(
        NgForWithoutTrackBy::new().with_skip_commented(skip_commented),
    )]
}

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(NgForWithoutTrackBy::new())]
}
