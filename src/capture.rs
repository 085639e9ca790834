//! Capture storage: named spans recorded during a single match attempt.
//!
//! Captures are returned out-of-band on the [`Match`](crate::Match) rather
//! than held in slots inside the pattern tree, so finalized trees can be
//! shared between threads freely.

use std::collections::HashMap;

use itertools::Itertools;

use crate::source::Source;

/// The text recorded by one capture site.
///
/// A capture normally stays a region into the source it was matched against;
/// [`CaptureMap::detach`] converts it to an owned copy that outlives the
/// source. Both views resolve to the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captured {
    /// A half-open character region into the matched source.
    Region { start: usize, len: usize },
    /// A detached copy of the captured text.
    Owned(String),
}

impl Captured {
    /// Width of the capture in characters.
    pub fn char_len(&self) -> usize {
        match self {
            Self::Region { len, .. } => *len,
            Self::Owned(text) => text.chars().count(),
        }
    }

    /// Resolve the captured text against the source it was matched in.
    ///
    /// For an owned capture the source is ignored.
    pub fn text(&self, src: &Source) -> String {
        match self {
            Self::Region { start, len } => src.text(*start, start + len),
            Self::Owned(text) => text.clone(),
        }
    }
}

/// Captures recorded during one match attempt, keyed by capture name.
///
/// A capture site overwrites its previous value each time its wrapped
/// pattern matches; re-entrant use of the same name keeps the last write.
#[derive(Debug, Clone, Default)]
pub struct CaptureMap {
    slots: HashMap<String, Captured>,
}

impl CaptureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Look up a capture by name.
    pub fn get(&self, name: &str) -> Option<&Captured> {
        self.slots.get(name)
    }

    /// Resolve a capture's text by name.
    pub fn text(&self, name: &str, src: &Source) -> Option<String> {
        self.get(name).map(|c| c.text(src))
    }

    /// Capture names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.slots.keys().map(|s| s.as_str()).sorted().collect()
    }

    /// Convert every region capture into an owned copy, detaching the map
    /// from the lifetime of `src`.
    pub fn detach(&self, src: &Source) -> CaptureMap {
        let slots = self
            .slots
            .iter()
            .map(|(name, cap)| (name.clone(), Captured::Owned(cap.text(src))))
            .collect();
        CaptureMap { slots }
    }

    /// Record a region capture, replacing any previous value for `name`.
    pub(crate) fn record(&mut self, name: &str, start: usize, len: usize) {
        self.slots
            .insert(name.to_string(), Captured::Region { start, len });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_and_detached_views_agree() {
        let src = Source::new("hello world");
        let mut caps = CaptureMap::new();
        caps.record("word", 6, 5);

        let detached = caps.detach(&src);
        assert_eq!(caps.text("word", &src).as_deref(), Some("world"));
        assert_eq!(detached.text("word", &src).as_deref(), Some("world"));
        assert_eq!(
            caps.get("word").unwrap().char_len(),
            detached.get("word").unwrap().char_len()
        );
    }

    #[test]
    fn record_overwrites_previous_value() {
        let src = Source::new("ab");
        let mut caps = CaptureMap::new();
        caps.record("c", 0, 1);
        caps.record("c", 1, 1);
        assert_eq!(caps.text("c", &src).as_deref(), Some("b"));
        assert_eq!(caps.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut caps = CaptureMap::new();
        caps.record("z", 0, 0);
        caps.record("a", 0, 0);
        caps.record("m", 0, 0);
        assert_eq!(caps.names(), vec!["a", "m", "z"]);
    }
}
