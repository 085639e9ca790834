//! Source text buffer for pattern matching.
//!
//! All positions are **character** (not byte) indices. A [`Source`] can own
//! its characters (built from a `&str`) or borrow a caller-supplied slice;
//! matching behaves identically over both representations.

use std::borrow::Cow;

/// An immutable character buffer that patterns are matched against.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    chars: Cow<'a, [char]>,
}

impl Source<'static> {
    /// Build an owned source from text.
    pub fn new(text: &str) -> Self {
        Self {
            chars: Cow::Owned(text.chars().collect()),
        }
    }

    /// Build an owned source from an already-materialized character vector.
    pub fn from_vec(chars: Vec<char>) -> Self {
        Self {
            chars: Cow::Owned(chars),
        }
    }
}

impl<'a> Source<'a> {
    /// Borrow a caller-owned character slice without copying.
    pub fn from_chars(chars: &'a [char]) -> Self {
        Self {
            chars: Cow::Borrowed(chars),
        }
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The character at `pos`, or `None` past the end.
    pub fn get(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// True when the characters of `text` appear at `pos`.
    pub fn starts_with(&self, pos: usize, text: &str) -> bool {
        let mut cur = pos;
        for ch in text.chars() {
            if self.get(cur) != Some(ch) {
                return false;
            }
            cur += 1;
        }
        true
    }

    /// The text of the half-open character range `start..end`, clamped to
    /// the buffer.
    pub fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl From<&str> for Source<'static> {
    fn from(text: &str) -> Self {
        Source::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_and_borrowed_agree() {
        let chars: Vec<char> = "héllo".chars().collect();
        let owned = Source::new("héllo");
        let from_vec = Source::from_vec(chars.clone());
        let borrowed = Source::from_chars(&chars);
        assert_eq!(owned.len(), borrowed.len());
        assert_eq!(owned.len(), from_vec.len());
        for pos in 0..=owned.len() {
            assert_eq!(owned.get(pos), borrowed.get(pos));
            assert_eq!(owned.get(pos), from_vec.get(pos));
        }
        assert_eq!(owned.text(1, 4), borrowed.text(1, 4));
        assert_eq!(owned.text(1, 4), from_vec.text(1, 4));
    }

    #[test]
    fn positions_are_characters_not_bytes() {
        let src = Source::new("aé𝄞b");
        assert_eq!(src.len(), 4);
        assert_eq!(src.get(2), Some('𝄞'));
        assert_eq!(src.get(4), None);
    }

    #[test]
    fn starts_with_checks_run() {
        let src = Source::new("hello");
        assert!(src.starts_with(1, "ell"));
        assert!(!src.starts_with(1, "elx"));
        assert!(!src.starts_with(4, "op"));
    }

    #[test]
    fn text_clamps_end() {
        let src = Source::new("abc");
        assert_eq!(src.text(1, 10), "bc");
    }
}
