//! AST node types.
//!
//! - `expr.rs`: expression nodes, interpolation, list separators
//! - `args.rs`: parameter and argument lists
//! - `stmt.rs`: statements and callable definitions

mod args;
mod expr;
mod stmt;

pub use args::{Argument, ArgumentList, Parameter, ParameterList};
pub use expr::{Expr, ExprKind, InterpPart, Interpolation, ListSeparator, QuoteKind};
pub use stmt::{
    CallableDef, ContentBlock, IfClause, ImportTarget, SelectorSource, Stmt, StmtKind, Stylesheet,
};
