//! Sable Eval - expression evaluator and stylesheet expansion.
//!
//! This crate turns a parsed [`Stylesheet`] into a flat [`CssStylesheet`]:
//! every Sass construct (variables, control flow, mixins, functions,
//! `@extend`, nesting) is executed or resolved, and only CSS remains.
//!
//! # Architecture
//!
//! - [`Environment`]: lexical scopes for variables, mixins and functions
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator dispatch on value pairs
//! - `builtins`: the native function table, declared by signature strings
//! - [`Interpreter`]: expression evaluation and statement expansion
//! - [`ImportResolver`]: the hook through which `@import` loads other files
//!
//! Warnings (`@warn`, `@debug`, deprecations) are collected in a
//! [`DiagnosticQueue`] and returned next to the output; errors unwind to
//! the caller as [`EvalError`].

mod builtins;
mod css;
mod environment;
mod import;
mod interpreter;
mod operators;

pub use css::{CssDeclaration, CssNode, CssStylesheet};
pub use environment::{Environment, LocalScope, Scope, UserCallable};
pub use import::{ImportResolver, NoImports, ResolvedImport};
pub use interpreter::Interpreter;
pub use operators::{evaluate_binary, evaluate_unary};

pub use sable_value::{EvalError, EvalErrorKind, EvalResult, Value};

use sable_diagnostic::{Diagnostic, DiagnosticQueue};
use sable_ir::Stylesheet;
use sable_stack::DEFAULT_MAX_NESTING;
use sable_value::DEFAULT_PRECISION;

/// Evaluator settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Fractional digits kept when numbers and colour channels are printed.
    pub precision: u8,
    /// Maximum depth of mixin/function calls, nested rules and imports.
    pub max_nesting: usize,
    /// Drop `@warn` and `@debug` output.
    pub quiet: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            precision: DEFAULT_PRECISION,
            max_nesting: DEFAULT_MAX_NESTING,
            quiet: false,
        }
    }
}

/// Output of a successful evaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub css: CssStylesheet,
    pub warnings: Vec<Diagnostic>,
}

/// Expand `stylesheet` into CSS.
pub fn evaluate(
    stylesheet: &Stylesheet,
    config: &EvalConfig,
    resolver: &mut dyn ImportResolver,
) -> EvalResult<Evaluation> {
    let mut interpreter = Interpreter::new(config, resolver);
    let css = interpreter.expand_stylesheet(stylesheet)?;
    Ok(Evaluation {
        css,
        warnings: interpreter.take_warnings(),
    })
}

/// Queue configured from `config`.
fn warning_queue(config: &EvalConfig) -> DiagnosticQueue {
    DiagnosticQueue::with_config(sable_diagnostic::queue::QueueConfig {
        quiet: config.quiet,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests;
