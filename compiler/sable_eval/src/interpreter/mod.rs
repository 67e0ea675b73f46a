//! Tree-walking interpreter for stylesheets.
//!
//! Helper modules split the work:
//!
//! - `expr` - expressions, interpolation and operator evaluation
//! - `call` - argument binding, function calls and `@include`
//! - `stmt` - statement expansion into the CSS tree
//!
//! # Output model
//!
//! Statements expand into a [`Sink`]. Inside a function body only
//! variables, control flow and `@return` are allowed; everywhere else the
//! sink is a list of [`CssNode`]s. Declarations go to the innermost style
//! frame, which becomes a rule (or at-rule content) once its block ends, so
//! a rule prints before the rules nested in it.
//!
//! `@extend` is collected while expanding and applied to every rule once
//! the whole stylesheet has been seen.

mod call;
mod expr;
mod stmt;

pub(crate) use call::EvaluatedArgs;
pub(crate) use expr::selector_value;

use std::sync::Arc;

use sable_diagnostic::{Diagnostic, DiagnosticQueue};
use sable_ir::{ContentBlock, Expr, SelectorList, Span, Stylesheet};
use sable_parse::ParseError;
use sable_selector::{without_placeholders, Extender, SelectorError};
use sable_stack::NestingGuard;
use sable_value::{
    extend_not_found, syntax_error, BacktraceFrame, EvalBacktrace, EvalError, EvalResult,
};

use crate::css::{CssDeclaration, CssNode, CssStylesheet};
use crate::environment::{Environment, LocalScope, Scope};
use crate::import::ImportResolver;
use crate::EvalConfig;

/// Where expanded statements go.
pub(crate) enum Sink<'o> {
    /// A function body: no CSS may be produced.
    Function,
    Css(&'o mut Vec<CssNode>),
}

/// A style rule or at-rule block being expanded.
struct StyleFrame {
    /// `None` for at-rules at the top level, whose declarations belong to
    /// the at-rule itself.
    selector: Option<SelectorList>,
    declarations: Vec<CssDeclaration>,
}

/// The `{ ... }` passed to the running mixin, with the scope it was
/// written in.
#[derive(Clone)]
struct ContentFrame {
    block: Arc<ContentBlock>,
    scope: LocalScope<Scope>,
}

/// Stylesheet interpreter.
pub struct Interpreter<'r> {
    config: EvalConfig,
    pub(crate) env: Environment,
    warnings: DiagnosticQueue,
    resolver: &'r mut dyn ImportResolver,
    guard: NestingGuard,
    call_stack: Vec<BacktraceFrame>,
    extender: Extender,
    styles: Vec<StyleFrame>,
    /// Enclosing nested-property names (`font` in `font: { family: x }`).
    property_prefix: Vec<String>,
    /// One entry per running mixin.
    content: Vec<Option<ContentFrame>>,
    /// Paths of the imports being expanded, innermost last.
    imports: Vec<String>,
}

impl<'r> Interpreter<'r> {
    pub fn new(config: &EvalConfig, resolver: &'r mut dyn ImportResolver) -> Self {
        Interpreter {
            config: *config,
            env: Environment::new(),
            warnings: crate::warning_queue(config),
            resolver,
            guard: NestingGuard::new(config.max_nesting),
            call_stack: Vec::new(),
            extender: Extender::new(),
            styles: Vec::new(),
            property_prefix: Vec::new(),
            content: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn precision(&self) -> u8 {
        self.config.precision
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        self.warnings.flush()
    }

    pub(crate) fn deprecation(&mut self, span: Span, message: impl Into<String>) {
        self.warnings.deprecation(span, message);
    }

    /// Evaluate a standalone expression in the global scope.
    pub fn eval_expression(&mut self, expr: &Expr) -> EvalResult {
        self.eval_expr(expr)
    }

    /// Expand a whole stylesheet and apply its extensions.
    pub fn expand_stylesheet(&mut self, stylesheet: &Stylesheet) -> EvalResult<CssStylesheet> {
        tracing::debug!(
            source = stylesheet.source.0,
            statements = stylesheet.body.len(),
            "expand_stylesheet"
        );
        let mut nodes = Vec::new();
        self.exec_block(&stylesheet.body, &mut Sink::Css(&mut nodes))?;
        let mut css = CssStylesheet { nodes };
        self.apply_extensions(&mut css)?;
        Ok(css)
    }

    fn apply_extensions(&mut self, css: &mut CssStylesheet) -> EvalResult<()> {
        let extender = &mut self.extender;
        css.for_each_rule_mut(|selector| {
            let extended = extender.extend(selector);
            *selector = without_placeholders(&extended);
        });
        css.prune();
        if let Some(unmatched) = self.extender.unmatched().next() {
            return Err(extend_not_found(
                &unmatched.extender.to_string(),
                &unmatched.target.to_string(),
            ));
        }
        Ok(())
    }

    // Recursion and call frames

    fn guard_mut<'i>(interpreter: &'i mut Interpreter<'r>) -> &'i mut NestingGuard {
        &mut interpreter.guard
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        NestingGuard::scope(self, Self::guard_mut, f)
    }

    /// Run `f` as the body of a mixin or function call, recording the call
    /// for error backtraces.
    fn in_frame<T>(
        &mut self,
        frame: BacktraceFrame,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        self.call_stack.push(frame);
        let result = self
            .nested(f)
            .map_err(|e| e.with_backtrace(self.backtrace()));
        self.call_stack.pop();
        result
    }

    fn backtrace(&self) -> EvalBacktrace {
        EvalBacktrace::new(self.call_stack.iter().rev().cloned().collect())
    }

    /// Run `f` with `scope` as the current scope.
    fn with_scope<T>(
        &mut self,
        scope: LocalScope<Scope>,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        let saved = self.env.replace_current(scope);
        let result = f(self);
        self.env.replace_current(saved);
        result
    }

    /// Run `f` in a fresh child of the current scope.
    fn in_child_scope<T>(
        &mut self,
        semi_global: bool,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        self.env.push_scope(semi_global);
        let result = f(self);
        self.env.pop_scope();
        result
    }

    // Selectors

    /// Selector of the innermost style frame.
    fn current_selector(&self) -> Option<&SelectorList> {
        self.styles.last().and_then(|frame| frame.selector.as_ref())
    }

    /// Parse selector text produced at runtime.
    pub(crate) fn parse_selector_text(
        &self,
        text: &str,
        allow_parent: bool,
    ) -> EvalResult<SelectorList> {
        let config = sable_parse::ParserConfig {
            max_nesting: self.config.max_nesting,
            ..Default::default()
        };
        sable_parse::parse_selector_with(text, allow_parent, &config).map_err(parse_error)
    }
}

/// A parse error raised while evaluating (runtime selectors).
pub(crate) fn parse_error(err: ParseError) -> EvalError {
    syntax_error(err.message)
}

pub(crate) fn selector_error(err: SelectorError) -> EvalError {
    EvalError::new(err.to_string())
}
