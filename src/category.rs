//! Character-category oracle and line-terminator recognition.
//!
//! Categories follow the Unicode general-category groupings the engine
//! exposes as pre-built checkers. Alphabetic, numeric, case and whitespace
//! groupings come from the `char` classification methods; punctuation and
//! symbol use explicit ASCII sets split along general-category lines, and
//! separator is the explicit Zs/Zl/Zp set.

use phf::{Map, phf_map};

/// Character-category groupings usable as single-character checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Letter,
    Uppercase,
    Lowercase,
    Digit,
    Punctuation,
    Symbol,
    Separator,
    Whitespace,
}

/// Class-name lookup table, lower-case keys.
static CATEGORY_NAMES: Map<&'static str, Category> = phf_map! {
    "letter" => Category::Letter,
    "uppercase" => Category::Uppercase,
    "lowercase" => Category::Lowercase,
    "digit" => Category::Digit,
    "punctuation" => Category::Punctuation,
    "symbol" => Category::Symbol,
    "separator" => Category::Separator,
    "whitespace" => Category::Whitespace,
};

/// ASCII characters in the Unicode punctuation categories (P*).
const ASCII_PUNCTUATION: &str = "!\"#%&'()*,-./:;?@[\\]_{}";

/// ASCII characters in the Unicode symbol categories (S*).
const ASCII_SYMBOL: &str = "$+<=>^`|~";

impl Category {
    /// Look up a category by its lower-case class name.
    pub fn from_name(name: &str) -> Option<Category> {
        CATEGORY_NAMES.get(name).copied()
    }

    /// All recognized class names, in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        CATEGORY_NAMES.keys().copied()
    }

    /// Test whether `ch` belongs to this category.
    pub fn contains(self, ch: char) -> bool {
        match self {
            Self::Letter => ch.is_alphabetic(),
            Self::Uppercase => ch.is_uppercase(),
            Self::Lowercase => ch.is_lowercase(),
            Self::Digit => ch.is_numeric(),
            Self::Punctuation => ASCII_PUNCTUATION.contains(ch),
            Self::Symbol => ASCII_SYMBOL.contains(ch),
            Self::Separator => is_separator(ch),
            Self::Whitespace => ch.is_whitespace(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Letter => "letter",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Digit => "digit",
            Self::Punctuation => "punctuation",
            Self::Symbol => "symbol",
            Self::Separator => "separator",
            Self::Whitespace => "whitespace",
        };
        write!(f, "{name}")
    }
}

/// Unicode separators: Zs space characters plus the Zl/Zp line and paragraph
/// separators.
fn is_separator(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Recognized line-terminator sequences, longest first so that `\r\n` is
/// preferred over a bare `\r`.
pub const LINE_TERMINATORS: &[&str] = &[
    "\r\n", "\n", "\r", "\u{000B}", "\u{000C}", "\u{0085}", "\u{2028}", "\u{2029}",
];

/// True when `ch` begins one of the recognized line terminators.
pub fn starts_line_terminator(ch: char) -> bool {
    LINE_TERMINATORS
        .iter()
        .any(|term| term.chars().next() == Some(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_matches_unicode_letters() {
        assert!(Category::Letter.contains('a'));
        assert!(Category::Letter.contains('É'));
        assert!(!Category::Letter.contains('5'));
    }

    #[test]
    fn punctuation_and_symbol_split() {
        // '$' and '+' are symbols, not punctuation, in the general categories.
        assert!(Category::Punctuation.contains('.'));
        assert!(Category::Punctuation.contains(','));
        assert!(!Category::Punctuation.contains('$'));
        assert!(Category::Symbol.contains('$'));
        assert!(Category::Symbol.contains('+'));
        assert!(!Category::Symbol.contains('.'));
    }

    #[test]
    fn separator_includes_nbsp_and_line_separator() {
        assert!(Category::Separator.contains(' '));
        assert!(Category::Separator.contains('\u{00A0}'));
        assert!(Category::Separator.contains('\u{2028}'));
        assert!(!Category::Separator.contains('\t'));
    }

    #[test]
    fn name_lookup_round_trip() {
        for name in Category::names() {
            let cat = Category::from_name(name).expect("listed name should resolve");
            assert_eq!(cat.to_string(), name);
        }
        assert_eq!(Category::from_name("nonsense"), None);
    }

    #[test]
    fn crlf_is_listed_before_bare_cr() {
        let crlf = LINE_TERMINATORS.iter().position(|t| *t == "\r\n").unwrap();
        let cr = LINE_TERMINATORS.iter().position(|t| *t == "\r").unwrap();
        assert!(crlf < cr);
    }

    #[test]
    fn terminator_starts() {
        assert!(starts_line_terminator('\n'));
        assert!(starts_line_terminator('\r'));
        assert!(starts_line_terminator('\u{2029}'));
        assert!(!starts_line_terminator('x'));
    }
}
