//! Composable pattern trees: construction, matching, diagnostics.
//!
//! A pattern is built bottom-up from leaves with the fluent builder, then
//! run any number of times against any number of sources.
//!
//! # Builder surface
//!
//! | Builder            | Operator | Meaning                                  |
//! |--------------------|----------|------------------------------------------|
//! | `a.then(b)`        | `a & b`  | Sequence                                 |
//! | `a.or(b)`          | `a \| b` | Ordered choice, first success wins       |
//! | `a.many()`         |          | One or more repetitions                  |
//! | `a.maybe()`        | `-a`     | Optional                                 |
//! | `a.not()`          | `!a`     | Same-width complement                    |
//! | `a.repeat(n)`      | `a * n`  | Exactly n repetitions, all-or-nothing    |
//! | `a.to(b)`          |          | Delimited range from `a` to `b`          |
//! | `a.to_escaped(b,e)`|          | Range with an escape that skips `b`      |
//! | `a.to_nested(b)`   |          | Balanced range, `a`/`b` pairs nest       |
//! | `a.capture(name)`  |          | Record the matched span under `name`     |
//!
//! Construction-time misuse panics immediately: negating a delimited range
//! and repeating an optional pattern are both rejected when the tree is
//! built, never during matching.

pub mod build;
pub mod matcher;
pub mod node;

pub use build::EnumNames;
pub use node::{Pattern, Rec};
