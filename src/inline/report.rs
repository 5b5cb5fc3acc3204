//! Outcome of one inlining pass.

use std::path::PathBuf;

/// An image that could not be inlined. Its `src` was left as it was.
#[derive(Debug, Clone)]
pub struct InlineFailure {
    /// The attribute value as written in the document.
    pub src: String,
    /// Where the file was looked for.
    pub path: PathBuf,
    pub error: String,
}

/// Counts of what happened to every `img` `src` seen during a walk.
#[derive(Debug, Clone, Default)]
pub struct InlineReport {
    pub inlined: usize,
    pub skipped_remote: usize,
    pub failures: Vec<InlineFailure>,
}

impl InlineReport {
    /// Total number of `src` attributes processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.inlined + self.skipped_remote + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl std::fmt::Display for InlineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} inlined, {} remote, {} failed",
            self.inlined,
            self.skipped_remote,
            self.failures.len()
        )
    }
}
