//! Two-state tracker for HTML comment blocks.

/// Open-comment token for HTML templates.
const COMMENT_OPEN: &str = "<!--";
/// Close-comment token for HTML templates.
const COMMENT_CLOSE: &str = "-->";

/// Classification of a single line by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    /// Whether the line should be handed to the rule's classifier.
    pub should_check: bool,
    /// Whether the line itself reads as commented (starts with the open
    /// token or ends with the close token, after trimming).
    pub is_commented: bool,
}

/// Tracks whether the traversal is currently inside a `<!-- ... -->` block.
///
/// Scoped to one file's line-by-line traversal; create a fresh tracker per
/// file. The state transitions are ordered so that a line opening a comment
/// is already "inside" when the should-check decision is made, while a line
/// closing one only reverts the state for subsequent lines.
#[derive(Debug, Default)]
pub struct CommentTracker {
    inside_comment: bool,
}

impl CommentTracker {
    /// Creates a tracker in the outside-comment state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line through the state machine.
    ///
    /// With `skip_commented` off every line is checked; the `is_commented`
    /// classification is still reported so callers can flag findings in
    /// commented code instead of suppressing them.
    pub fn observe(&mut self, line: &str, skip_commented: bool) -> LineClass {
        let trimmed = line.trim();
        let is_commented =
            trimmed.starts_with(COMMENT_OPEN) || trimmed.ends_with(COMMENT_CLOSE);

        if line.contains(COMMENT_OPEN) {
            self.inside_comment = true;
        }

        let should_check = if skip_commented {
            !self.inside_comment && !is_commented
        } else {
            true
        };

        if line.contains(COMMENT_CLOSE) {
            self.inside_comment = false;
        }

        LineClass {
            should_check,
            is_commented,
        }
    }
}
