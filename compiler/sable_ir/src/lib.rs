//! Sable IR - syntax tree types shared by every phase.
//!
//! This crate contains the core data structures for the sable front end:
//! - Spans and source identifiers for diagnostics
//! - Expression and statement AST produced by the parser
//! - The selector model consumed by the superselector engine
//! - Operator enums shared by the parser and the evaluator
//!
//! # Design Philosophy
//!
//! - **Immutable by default**: nodes are built once by the parser; evaluation
//!   produces new values instead of rewriting the tree.
//! - **Shared definitions**: mixin, function and content bodies sit behind
//!   `Arc` so scopes can hold them without copying statement lists.
//! - **Separate selector tree**: selectors are not expressions; they have
//!   their own variant types and structural equality.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod ops;
pub mod selector;
mod span;

pub use ast::{
    Argument, ArgumentList, CallableDef, ContentBlock, Expr, ExprKind, IfClause, ImportTarget,
    InterpPart, Interpolation, ListSeparator, Parameter, ParameterList, QuoteKind,
    SelectorSource, Stmt, StmtKind, Stylesheet,
};
pub use ops::{BinaryOp, UnaryOp};
pub use selector::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoSelector,
    SelectorComponent, SelectorList, SimpleSelector,
};
pub use span::{SourceId, SourceSpan, Span, SpanError};
