//! A composable text pattern-matching engine.
//!
//! Small matching primitives (literals, character checkers, delimited
//! ranges, repetition, alternation, negation, captures) are composed with a
//! fluent builder into an immutable tree, then executed against an in-memory
//! character buffer by a single recursive backtracking walk.
//!
//! # Example
//!
//! ```rust
//! use lexpat::{Pattern, Source};
//!
//! // A line comment: '#' then anything up to the line terminator.
//! let comment = Pattern::line_comment("#");
//! let src = Source::new("# hello\nworld");
//! let m = comment.consume(&src, 0).unwrap();
//! assert_eq!(src.text(m.start, m.end), "# hello");
//!
//! // Captures come back with the match.
//! let assign = Pattern::letter().many().capture("name")
//!     .then(Pattern::whitespace().many().maybe())
//!     .then("=");
//! let src = Source::new("answer = 42");
//! let m = assign.consume(&src, 0).unwrap();
//! assert_eq!(m.captures.text("name", &src).as_deref(), Some("answer"));
//! ```

pub mod capture;
pub mod category;
pub mod outcome;
pub mod pattern;
pub mod source;
pub mod trace;

pub use capture::{CaptureMap, Captured};
pub use category::Category;
pub use outcome::{Match, Miss};
pub use pattern::{EnumNames, Pattern, Rec};
pub use source::Source;
pub use trace::{TraceEvent, TraceSink};
