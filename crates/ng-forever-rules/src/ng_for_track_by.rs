//! Rule to find `*ngFor` directives without a `trackBy` callback.
//!
//! # Rationale
//!
//! Without `trackBy`, Angular tears down and recreates every DOM node in
//! the list whenever the backing collection changes identity, which is a
//! common source of rendering jank and lost element state. A stable
//! identity callback lets the differ reuse nodes.
//!
//! # Configuration
//!
//! - `skip_commented`: skip lines inside HTML comments instead of
//!   reporting them with a commented flag (default: false)

use ng_forever_core::{Issue, Rule};

/// Rule name for ng-for-track-by.
pub const NAME: &str = "ng-for-track-by";

/// Token that marks an iteration directive.
const DIRECTIVE_MARKER: &str = "*ngFor=";

/// Token that marks a stable-identity callback.
const CALLBACK_MARKER: &str = "trackBy";

/// Finds `*ngFor` iteration directives lacking a `trackBy` callback.
#[derive(Debug, Clone)]
pub struct NgForWithoutTrackBy {
    /// Skip commented lines entirely instead of flagging them.
    pub skip_commented: bool,
}

impl Default for NgForWithoutTrackBy {
    fn default() -> Self {
        Self::new()
    }
}

impl NgForWithoutTrackBy {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            skip_commented: false,
        }
    }

    /// Sets whether commented lines are skipped.
    #[must_use]
    pub fn with_skip_commented(mut self, skip: bool) -> Self {
        self.skip_commented = skip;
        self
    }
}

impl Rule for NgForWithoutTrackBy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Find *ngFor directives without a trackBy callback"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn supported_versions(&self) -> &[&str] {
        // trackBy has existed since the directive itself.
        &[">=2.0.0"]
    }

    fn fix_suggestions(&self) -> &[&str] {
        &[
            "Add a trackBy callback to the directive, e.g. *ngFor=\"let item of items; trackBy: trackById\"",
            "Implement the callback in the component: trackById(index: number, item: Item) { return item.id; }",
            "Return a stable identity (an id field), not the array index, so reordering is tracked correctly",
        ]
    }

    fn skip_commented(&self) -> bool {
        self.skip_commented
    }

    fn classify_line(&self, line: &str, line_number: usize) -> Option<Issue> {
        (line.contains(DIRECTIVE_MARKER) && !line.contains(CALLBACK_MARKER))
            .then(|| Issue::new(line_number, line))
    }
}
