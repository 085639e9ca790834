//! Fluent pattern construction.
//!
//! Every builder call returns a new immutable composite node; trees are
//! composed bottom-up, never mutated in place. Misuse that could never
//! match sensibly (negating a delimited range, repeating an optional) is
//! rejected loudly here, at construction time, not during matching.

use crate::category::Category;
use crate::pattern::node::{Checker, Literal, Pattern, Ranger};

// ─── Leaf constructors ──────────────────────────────────────────────────────

impl Pattern {
    /// A case-sensitive literal run.
    pub fn literal(text: impl AsRef<str>) -> Pattern {
        Pattern::Literal(Literal::new(text.as_ref(), false))
    }

    /// A case-insensitive literal run.
    pub fn literal_fold(text: impl AsRef<str>) -> Pattern {
        Pattern::Literal(Literal::new(text.as_ref(), true))
    }

    /// A single-character predicate checker.
    pub fn check(pred: impl Fn(char) -> bool + Send + Sync + 'static) -> Pattern {
        Pattern::Checker(Checker::Pred(std::sync::Arc::new(pred)))
    }

    /// A single-character category checker.
    pub fn category(cat: Category) -> Pattern {
        Pattern::Checker(Checker::Category(cat))
    }

    pub fn letter() -> Pattern {
        Pattern::category(Category::Letter)
    }

    pub fn uppercase() -> Pattern {
        Pattern::category(Category::Uppercase)
    }

    pub fn lowercase() -> Pattern {
        Pattern::category(Category::Lowercase)
    }

    pub fn digit() -> Pattern {
        Pattern::category(Category::Digit)
    }

    pub fn punctuation() -> Pattern {
        Pattern::category(Category::Punctuation)
    }

    pub fn symbol() -> Pattern {
        Pattern::category(Category::Symbol)
    }

    pub fn separator() -> Pattern {
        Pattern::category(Category::Separator)
    }

    pub fn whitespace() -> Pattern {
        Pattern::category(Category::Whitespace)
    }

    /// Matches one recognized line-terminator sequence (`\r\n` counts as a
    /// single two-character terminator).
    pub fn line_end() -> Pattern {
        Pattern::Checker(Checker::LineEnd)
    }

    /// Zero-width match at the end of the source.
    pub fn source_end() -> Pattern {
        Pattern::Checker(Checker::SourceEnd)
    }
}

impl From<char> for Pattern {
    fn from(ch: char) -> Self {
        Pattern::literal(ch.to_string())
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::literal(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::literal(text)
    }
}

// ─── Combining builders ─────────────────────────────────────────────────────

impl Pattern {
    /// Sequence: this pattern followed by `next`.
    ///
    /// Two adjacent literals under the same case policy are fused into a
    /// single literal node.
    pub fn then(self, next: impl Into<Pattern>) -> Pattern {
        match (self, next.into()) {
            (Pattern::Literal(a), Pattern::Literal(b)) if a.fold() == b.fold() => {
                let fold = a.fold();
                Pattern::Literal(Literal::new(&format!("{}{}", a.text(), b.text()), fold))
            }
            (a, b) => Pattern::Concat(Box::new(a), Box::new(b)),
        }
    }

    /// Ordered choice: this pattern, else `other`. Nested alternations are
    /// flattened into one ordered list so deep chains stay shallow and
    /// diagnostics stay readable.
    pub fn or(self, other: impl Into<Pattern>) -> Pattern {
        let mut alts = match self {
            Pattern::Alt(alts) => alts,
            first => vec![first],
        };
        match other.into() {
            Pattern::Alt(rest) => alts.extend(rest),
            next => alts.push(next),
        }
        Pattern::Alt(alts)
    }

    /// One or more repetitions.
    ///
    /// Idempotent on an already-repeating pattern. Panics when applied to an
    /// optional pattern: an optional always succeeds at zero width, so
    /// repeating it can never terminate.
    pub fn many(self) -> Pattern {
        match self {
            Pattern::Opt(_) => panic!("cannot repeat an optional pattern: zero-width loop"),
            repeating @ (Pattern::Span(_) | Pattern::Closure(_)) => repeating,
            node => Pattern::Span(Box::new(node)),
        }
    }

    /// Optional: attempt once, succeed at zero width on failure.
    ///
    /// An optional one-or-more becomes zero-or-more; already-optional
    /// patterns are returned unchanged.
    pub fn maybe(self) -> Pattern {
        match self {
            Pattern::Span(node) => Pattern::Closure(node),
            zero_width @ (Pattern::Opt(_) | Pattern::Closure(_)) => zero_width,
            node => Pattern::Opt(Box::new(node)),
        }
    }

    /// Same-width complement: succeeds where this pattern fails, consuming
    /// as much as the positive pattern would have.
    ///
    /// Panics when the tree contains a delimited range; "not a delimited
    /// span" has no meaningful width.
    pub fn not(self) -> Pattern {
        if self.contains_range() {
            panic!("cannot negate a delimited range");
        }
        Pattern::Not(Box::new(self))
    }

    /// Exactly `count` consecutive repetitions, all-or-nothing.
    pub fn repeat(self, count: usize) -> Pattern {
        Pattern::Repeat(Box::new(self), count)
    }

    /// Delimited range: this pattern as the opening delimiter, scanning
    /// forward until `to` matches.
    pub fn to(self, to: impl Into<Pattern>) -> Pattern {
        Pattern::Range(Box::new(Ranger {
            from: self,
            to: to.into(),
            escape: None,
            nested: false,
        }))
    }

    /// Delimited range with an escape: an escape match passes over the
    /// escaped character instead of terminating the range.
    pub fn to_escaped(self, to: impl Into<Pattern>, escape: impl Into<Pattern>) -> Pattern {
        Pattern::Range(Box::new(Ranger {
            from: self,
            to: to.into(),
            escape: Some(escape.into()),
            nested: false,
        }))
    }

    /// Balanced range: re-occurrences of the opening delimiter nest, and the
    /// range ends at the matching closing delimiter.
    pub fn to_nested(self, to: impl Into<Pattern>) -> Pattern {
        Pattern::Range(Box::new(Ranger {
            from: self,
            to: to.into(),
            escape: None,
            nested: true,
        }))
    }

    /// Record whatever the pattern matches under `name`, readable from the
    /// returned [`Match`](crate::Match) and from a [`Pattern::capture_ref`]
    /// backreference later in the same attempt.
    pub fn capture(self, name: impl AsRef<str>) -> Pattern {
        Pattern::Capture {
            name: name.as_ref().into(),
            node: Box::new(self),
        }
    }

    /// Backreference: match the current value of the named capture,
    /// re-evaluated at use time.
    pub fn capture_ref(name: impl AsRef<str>) -> Pattern {
        Pattern::CaptureRef(name.as_ref().into())
    }
}

// ─── Factory helpers ────────────────────────────────────────────────────────

/// Provider of human-readable names for a closed set of symbolic values,
/// consumed by [`Pattern::one_of_names`].
pub trait EnumNames {
    fn names() -> &'static [&'static str];
}

impl Pattern {
    /// Ordered choice over a list of patterns (or anything convertible to
    /// one, such as string literals).
    pub fn one_of<P: Into<Pattern>>(items: impl IntoIterator<Item = P>) -> Pattern {
        Pattern::Alt(items.into_iter().map(Into::into).collect())
    }

    /// Ordered choice over an enumeration's member names.
    pub fn one_of_names<E: EnumNames>() -> Pattern {
        Pattern::one_of(E::names().iter().copied())
    }

    /// A nestable block comment: `open` through the balancing `close`.
    pub fn block_comment(open: impl AsRef<str>, close: impl AsRef<str>) -> Pattern {
        Pattern::literal(open).to_nested(Pattern::literal(close))
    }

    /// A line comment: the delimiter, then a run of anything up to (not
    /// including) the line terminator.
    pub fn line_comment(delim: impl AsRef<str>) -> Pattern {
        Pattern::literal(delim).then(Pattern::line_end().not().many())
    }

    /// A delimited string literal with no escape convention.
    pub fn string_literal(delim: impl AsRef<str>) -> Pattern {
        let delim = delim.as_ref();
        Pattern::literal(delim).to(Pattern::literal(delim))
    }

    /// A delimited string literal whose escape passes over the following
    /// character.
    pub fn string_literal_escaped(delim: impl AsRef<str>, escape: impl AsRef<str>) -> Pattern {
        let delim = delim.as_ref();
        Pattern::literal(delim).to_escaped(Pattern::literal(delim), Pattern::literal(escape))
    }
}

// ─── Operator sugar ─────────────────────────────────────────────────────────

/// `a & b` is sequence.
impl<P: Into<Pattern>> std::ops::BitAnd<P> for Pattern {
    type Output = Pattern;
    fn bitand(self, rhs: P) -> Pattern {
        self.then(rhs)
    }
}

/// `a | b` is ordered choice.
impl<P: Into<Pattern>> std::ops::BitOr<P> for Pattern {
    type Output = Pattern;
    fn bitor(self, rhs: P) -> Pattern {
        self.or(rhs)
    }
}

/// `!a` is same-width negation.
impl std::ops::Not for Pattern {
    type Output = Pattern;
    fn not(self) -> Pattern {
        Pattern::not(self)
    }
}

/// `-a` is optional.
impl std::ops::Neg for Pattern {
    type Output = Pattern;
    fn neg(self) -> Pattern {
        self.maybe()
    }
}

/// `a * n` is exact repetition.
impl std::ops::Mul<usize> for Pattern {
    type Output = Pattern;
    fn mul(self, count: usize) -> Pattern {
        self.repeat(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction algebra ---

    #[test]
    fn adjacent_literals_fuse() {
        let p = Pattern::literal("ab").then(Pattern::literal("cd"));
        match p {
            Pattern::Literal(lit) => assert_eq!(lit.text(), "abcd"),
            other => panic!("expected fused literal, got {other}"),
        }
    }

    #[test]
    fn mixed_case_policies_do_not_fuse() {
        let p = Pattern::literal("ab").then(Pattern::literal_fold("cd"));
        assert!(matches!(p, Pattern::Concat(_, _)));
    }

    #[test]
    fn or_flattens_chains() {
        let p = Pattern::literal("a")
            .or(Pattern::literal("b"))
            .or(Pattern::literal("c").or(Pattern::literal("d")));
        match p {
            Pattern::Alt(alts) => assert_eq!(alts.len(), 4),
            other => panic!("expected flat alternation, got {other}"),
        }
    }

    #[test]
    fn many_is_idempotent_on_span() {
        let p = Pattern::letter().many().many();
        assert!(matches!(p, Pattern::Span(_)));
    }

    #[test]
    fn maybe_of_span_is_closure() {
        let p = Pattern::letter().many().maybe();
        assert!(matches!(p, Pattern::Closure(_)));
        // And stays a closure from there on.
        assert!(matches!(p.maybe(), Pattern::Closure(_)));
    }

    #[test]
    #[should_panic(expected = "optional")]
    fn many_of_maybe_is_rejected() {
        let _ = Pattern::letter().maybe().many();
    }

    #[test]
    #[should_panic(expected = "delimited range")]
    fn negating_a_range_is_rejected() {
        let _ = Pattern::literal("(").to(Pattern::literal(")")).not();
    }

    #[test]
    #[should_panic(expected = "delimited range")]
    fn negating_a_tree_containing_a_range_is_rejected() {
        let range = Pattern::literal("/*").to(Pattern::literal("*/"));
        let _ = Pattern::literal("x").then(range).not();
    }

    // --- Operator sugar ---

    #[test]
    fn operators_mirror_builders() {
        let p = (Pattern::literal("a") & "b") | "c";
        match p {
            Pattern::Alt(alts) => {
                assert_eq!(alts.len(), 2);
                assert_eq!(alts[0].to_string(), "\"ab\"");
            }
            other => panic!("expected alternation, got {other}"),
        }

        assert!(matches!(!Pattern::letter(), Pattern::Not(_)));
        assert!(matches!(-Pattern::letter(), Pattern::Opt(_)));
        assert!(matches!(Pattern::letter() * 3, Pattern::Repeat(_, 3)));
    }

    // --- Factories ---

    #[test]
    fn one_of_builds_ordered_choice() {
        let p = Pattern::one_of(["if", "else", "while"]);
        match p {
            Pattern::Alt(alts) => assert_eq!(alts.len(), 3),
            other => panic!("expected alternation, got {other}"),
        }
    }

    #[test]
    fn one_of_names_uses_the_provider() {
        struct Keyword;
        impl EnumNames for Keyword {
            fn names() -> &'static [&'static str] {
                &["let", "fn", "mod"]
            }
        }
        let p = Pattern::one_of_names::<Keyword>();
        assert_eq!(p.to_string(), "(\"let\" | \"fn\" | \"mod\")");
    }

    #[test]
    fn block_comment_is_a_nested_range() {
        match Pattern::block_comment("/*", "*/") {
            Pattern::Range(r) => assert!(r.nested),
            other => panic!("expected range, got {other}"),
        }
    }

    #[test]
    fn string_literal_escaped_carries_the_escape() {
        match Pattern::string_literal_escaped("\"", "\\") {
            Pattern::Range(r) => {
                assert!(r.escape.is_some());
                assert!(!r.nested);
            }
            other => panic!("expected range, got {other}"),
        }
    }
}
