//! Pattern tree node types.
//!
//! A [`Pattern`] is a tagged variant tree built bottom-up by the builder
//! methods in [`build`](super::build) and walked by the matcher in
//! [`matcher`](super::matcher). Trees are immutable after construction;
//! the only late-bound piece is a [`Rec`] cell, which is set exactly once
//! to close a recursive grammar.

use std::sync::{Arc, OnceLock};

use itertools::Itertools;

use crate::category::Category;

/// A composable matching primitive.
///
/// Identity is structural: trees are cheap to clone and may be shared and
/// reused across any number of match attempts. Finalized trees (every `Rec`
/// bound) are `Send + Sync`; captures live in per-call state, not in the
/// tree.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A character run under a case policy.
    Literal(Literal),
    /// A single-element test.
    Checker(Checker),
    /// Sequence: left then right.
    Concat(Box<Pattern>, Box<Pattern>),
    /// Ordered choice, flattened at construction; first success wins.
    Alt(Vec<Pattern>),
    /// A delimited span: `from` ... `to`, optionally escaped or nested.
    Range(Box<Ranger>),
    /// Exactly `n` consecutive matches of the child, all-or-nothing.
    Repeat(Box<Pattern>, usize),
    /// One or more matches of the child.
    Span(Box<Pattern>),
    /// Zero or more matches of the child.
    Closure(Box<Pattern>),
    /// Optional: zero-width success when the child fails.
    Opt(Box<Pattern>),
    /// Same-width complement of the child.
    Not(Box<Pattern>),
    /// Record the child's matched span under `name`.
    Capture { name: Arc<str>, node: Box<Pattern> },
    /// Backreference: match the named capture's current value as a literal.
    CaptureRef(Arc<str>),
    /// Late-bound indirection cell for recursive grammars.
    Rec(Rec),
}

// ─── Leaf payloads ──────────────────────────────────────────────────────────

/// A literal character run, case-sensitive or case-folded.
#[derive(Debug, Clone)]
pub struct Literal {
    chars: Arc<[char]>,
    fold: bool,
}

impl Literal {
    pub(crate) fn new(text: &str, fold: bool) -> Self {
        Self {
            chars: text.chars().collect(),
            fold,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub(crate) fn fold(&self) -> bool {
        self.fold
    }

    /// Compare one source character against position `idx` of the run under
    /// the configured case policy.
    pub(crate) fn matches_at(&self, idx: usize, ch: char) -> bool {
        let want = self.chars[idx];
        want == ch || (self.fold && want.to_lowercase().eq(ch.to_lowercase()))
    }

    pub(crate) fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// A single-element test.
#[derive(Clone)]
pub enum Checker {
    /// Arbitrary predicate over one character.
    Pred(Arc<dyn Fn(char) -> bool + Send + Sync>),
    /// Unicode category membership.
    Category(Category),
    /// One recognized line-terminator sequence (so `\r\n` has width 2).
    LineEnd,
    /// Zero-width end-of-buffer test.
    SourceEnd,
}

impl std::fmt::Debug for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pred(_) => write!(f, "Pred(..)"),
            Self::Category(cat) => write!(f, "Category({cat})"),
            Self::LineEnd => write!(f, "LineEnd"),
            Self::SourceEnd => write!(f, "SourceEnd"),
        }
    }
}

/// A delimited range: match `from`, scan forward to a balancing or plain
/// `to`, optionally passing over escapes.
#[derive(Debug, Clone)]
pub struct Ranger {
    pub(crate) from: Pattern,
    pub(crate) to: Pattern,
    pub(crate) escape: Option<Pattern>,
    pub(crate) nested: bool,
}

// ─── Recursive grammars ─────────────────────────────────────────────────────

/// Handle for a self-referential pattern.
///
/// Create the handle first, use [`Rec::pattern`] wherever the recursive edge
/// belongs, then [`Rec::bind`] the completed body once. Until bound, the
/// cell behaves as an always-failing placeholder; do not share the tree
/// between threads inside that construction window.
#[derive(Debug, Clone, Default)]
pub struct Rec {
    cell: Arc<OnceLock<Pattern>>,
}

impl Rec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pattern node referring to this cell.
    pub fn pattern(&self) -> Pattern {
        Pattern::Rec(self.clone())
    }

    /// Bind the recursive body. Panics on a second bind.
    pub fn bind(&self, body: Pattern) {
        if self.cell.set(body).is_err() {
            panic!("recursive pattern bound twice");
        }
    }

    pub fn is_bound(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn get(&self) -> Option<&Pattern> {
        self.cell.get()
    }
}

// ─── Tree queries ───────────────────────────────────────────────────────────

impl Pattern {
    /// True when the tree contains a delimited range. Used to reject
    /// negation of ranges at construction time; a range hidden behind an
    /// unbound [`Rec`] is caught at the neglect site instead.
    pub(crate) fn contains_range(&self) -> bool {
        match self {
            Self::Range(_) => true,
            Self::Literal(_) | Self::Checker(_) | Self::CaptureRef(_) | Self::Rec(_) => false,
            Self::Concat(a, b) => a.contains_range() || b.contains_range(),
            Self::Alt(alts) => alts.iter().any(Pattern::contains_range),
            Self::Repeat(node, _)
            | Self::Span(node)
            | Self::Closure(node)
            | Self::Opt(node)
            | Self::Not(node)
            | Self::Capture { node, .. } => node.contains_range(),
        }
    }
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(lit) => {
                // Double quotes for exact case, single for folded, matching
                // the usual pattern-language convention.
                if lit.fold() {
                    write!(f, "'{}'", lit.text())
                } else {
                    write!(f, "\"{}\"", lit.text())
                }
            }
            Self::Checker(Checker::Pred(_)) => write!(f, "<pred>"),
            Self::Checker(Checker::Category(cat)) => write!(f, "<{cat}>"),
            Self::Checker(Checker::LineEnd) => write!(f, "<line-end>"),
            Self::Checker(Checker::SourceEnd) => write!(f, "<end>"),
            Self::Concat(a, b) => write!(f, "({a} {b})"),
            Self::Alt(alts) => write!(f, "({})", alts.iter().join(" | ")),
            Self::Range(r) => {
                write!(f, "{}..{}", r.from, r.to)?;
                if let Some(esc) = &r.escape {
                    write!(f, " (escape {esc})")?;
                }
                if r.nested {
                    write!(f, " (nested)")?;
                }
                Ok(())
            }
            Self::Repeat(node, n) => write!(f, "{node}{{{n}}}"),
            Self::Span(node) => write!(f, "{node}+"),
            Self::Closure(node) => write!(f, "{node}*"),
            Self::Opt(node) => write!(f, "{node}?"),
            Self::Not(node) => write!(f, "!{node}"),
            Self::Capture { name, node } => write!(f, "(<{name}>: {node})"),
            Self::CaptureRef(name) => write!(f, "<{name}>"),
            Self::Rec(rec) => {
                if rec.is_bound() {
                    write!(f, "<rec>")
                } else {
                    write!(f, "<unbound>")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern as P;

    #[test]
    fn display_shows_case_policy() {
        assert_eq!(P::literal("if").to_string(), "\"if\"");
        assert_eq!(P::literal_fold("if").to_string(), "'if'");
    }

    #[test]
    fn display_joins_alternatives() {
        let p = P::literal("a").or(P::literal("b")).or(P::literal("c"));
        assert_eq!(p.to_string(), "(\"a\" | \"b\" | \"c\")");
    }

    #[test]
    fn contains_range_sees_through_wrappers() {
        let range = P::literal("(").to(P::literal(")"));
        assert!(range.clone().many().contains_range());
        assert!(P::literal("x").then(range).contains_range());
        assert!(!P::literal("x").many().contains_range());
    }

    #[test]
    fn rec_binds_once() {
        let rec = Rec::new();
        assert!(!rec.is_bound());
        rec.bind(P::literal("x"));
        assert!(rec.is_bound());
    }

    #[test]
    #[should_panic(expected = "bound twice")]
    fn rec_rejects_second_bind() {
        let rec = Rec::new();
        rec.bind(P::literal("x"));
        rec.bind(P::literal("y"));
    }
}
