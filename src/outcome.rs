//! Match outcomes and failure kinds.

use crate::capture::CaptureMap;

/// The reason a match attempt failed.
///
/// Failures are signaled values, never panics: every combinator inspects a
/// child's failure kind and decides locally whether to retry, keep scanning,
/// or propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// Content at the cursor does not satisfy the pattern.
    NoMatch,
    /// The buffer ran out before a required token was found.
    AtEnd,
}

impl std::fmt::Display for Miss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch => write!(f, "no match"),
            Self::AtEnd => write!(f, "end of source"),
        }
    }
}

/// Advance-or-fail result used throughout the matcher: `Ok` carries the
/// position just past the matched text.
pub type Step = Result<usize, Miss>;

/// A successful top-level match.
#[derive(Debug, Clone)]
pub struct Match {
    /// Position the match started at.
    pub start: usize,
    /// Position just past the matched text.
    pub end: usize,
    /// Captures recorded during this attempt, keyed by capture name.
    pub captures: CaptureMap,
}

impl Match {
    /// Number of characters consumed.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-width match.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
