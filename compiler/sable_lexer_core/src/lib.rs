//! Low-level lexing for sable.
//!
//! Nothing here allocates. A matcher is a pure function from a byte buffer
//! and a start offset to the offset just past the matched fragment, or
//! `None`. Matchers compose with the combinators in [`combinators`] and the
//! Sass lexicon is spelled out in [`fragments`].
//!
//! The [`Scanner`] sits on top: it owns the current position, line and
//! column, and offers two ways to apply a matcher:
//!
//! - [`Scanner::lex`] skips whitespace and comments first
//! - [`Scanner::eat`] matches exactly at the current position
//!
//! The caller picks per grammar position; inside quoted strings nothing may
//! ever be skipped.

pub mod combinators;
pub mod fragments;
mod scanner;

pub use combinators::Matcher;
pub use scanner::{Checkpoint, Scanner};
