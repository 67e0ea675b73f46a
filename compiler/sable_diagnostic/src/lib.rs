//! Diagnostic system for sable.
//!
//! Every fatal condition is eventually turned into a [`Diagnostic`] carrying
//! an [`ErrorCode`], a message and a primary span. Non-fatal conditions
//! (deprecations, `@warn`, `@debug`) travel through a [`DiagnosticQueue`]
//! that is returned alongside the compiled result and never affects
//! control flow.
//!
//! The core does not format final user-facing text beyond the short
//! context snippets built by [`snippet`]; [`Diagnostic::render`] is a plain
//! fallback for hosts without their own reporter.

mod diagnostic;
mod error_code;
pub mod queue;
pub mod snippet;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
pub use span_utils::{LineOffsetTable, SourceMap};
