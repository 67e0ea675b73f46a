//! Evaluation errors.
//!
//! Every failure during evaluation is an [`EvalError`]: a structured
//! [`EvalErrorKind`] plus the span of the offending expression and the
//! mixin/function call stack at that point. Errors are always fatal and
//! unwind to the compile entry point.
//!
//! Construct errors through the factory functions in this module so that
//! messages stay uniform.

use std::fmt;

use sable_diagnostic::{Diagnostic, ErrorCode};
use sable_ir::Span;
use sable_stack::NestingExceeded;

/// Structured error category.
///
/// Argument errors carry the signature of the callable (`mix($color1,
/// $color2, $weight: 50%)`) and the parameter name without its `$`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Text produced at runtime failed to parse (interpolated selectors).
    #[error("{message}")]
    Syntax { message: String },

    #[error("argument `${argument}` of `{signature}` must be a {expected}")]
    Type {
        signature: String,
        argument: String,
        expected: &'static str,
    },

    #[error("argument `${argument}` of `{signature}` must be between {lo} and {hi}")]
    Range {
        signature: String,
        argument: String,
        lo: String,
        hi: String,
    },

    #[error("argument `${argument}` of `{signature}` must be unitless")]
    Unitless { signature: String, argument: String },

    #[error("Incompatible units: '{lhs}' and '{rhs}'.")]
    IncompatibleUnits { lhs: String, rhs: String },

    #[error("Undefined operation: \"{lhs} {verb} {rhs}\".")]
    UndefinedOperation {
        lhs: String,
        verb: &'static str,
        rhs: String,
    },

    #[error("divided by 0")]
    ZeroDivision,

    #[error("Stack depth exceeded max of {limit}")]
    NestingLimitExceeded { limit: usize },

    #[error("Undefined variable: \"${name}\".")]
    UndefinedVariable { name: String },

    #[error("no mixin named {name}")]
    UndefinedMixin { name: String },

    #[error("no function named {name}")]
    UndefinedFunction { name: String },

    /// Too many or too few arguments, or an unknown keyword.
    #[error("{message}")]
    ArgumentCount { message: String },

    /// Raised by `@error`.
    #[error("{message}")]
    UserError { message: String },

    #[error("{value} isn't a valid CSS value.")]
    InvalidCssValue { value: String },

    #[error(
        "\"{extender}\" failed to @extend \"{target}\".\nThe selector \"{target}\" was not found.\nUse \"@extend {target} !optional\" if the extend should be able to fail."
    )]
    ExtendNotFound { extender: String, target: String },

    #[error("{message}")]
    Custom { message: String },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::Syntax { .. } => ErrorCode::E1001,
            EvalErrorKind::Type { .. } => ErrorCode::E2001,
            EvalErrorKind::Range { .. } => ErrorCode::E2002,
            EvalErrorKind::Unitless { .. } => ErrorCode::E2003,
            EvalErrorKind::IncompatibleUnits { .. } => ErrorCode::E2004,
            EvalErrorKind::ArgumentCount { .. } => ErrorCode::E2005,
            EvalErrorKind::UndefinedOperation { .. } => ErrorCode::E3001,
            EvalErrorKind::ZeroDivision => ErrorCode::E3002,
            EvalErrorKind::UserError { .. } => ErrorCode::E3003,
            EvalErrorKind::InvalidCssValue { .. } => ErrorCode::E3004,
            EvalErrorKind::ExtendNotFound { .. } => ErrorCode::E3005,
            EvalErrorKind::Custom { .. } => ErrorCode::E3006,
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E4001,
            EvalErrorKind::UndefinedMixin { .. } => ErrorCode::E4002,
            EvalErrorKind::UndefinedFunction { .. } => ErrorCode::E4003,
            EvalErrorKind::NestingLimitExceeded { .. } => ErrorCode::E9001,
        }
    }
}

/// One mixin or function call on the stack when an error was raised.
#[derive(Clone, Debug, PartialEq)]
pub struct BacktraceFrame {
    /// `mixin foo` or `function bar`.
    pub name: String,
    /// The `@include` or call expression.
    pub span: Span,
}

/// Snapshot of the call stack at an error site, innermost frame first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at {}", frame.name, frame.span)?;
        }
        Ok(())
    }
}

/// A fatal evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Where the error was raised. Filled in by the innermost expression or
    /// statement that knows its location.
    pub span: Option<Span>,
    pub backtrace: Option<EvalBacktrace>,
}

/// Result of evaluation; defaults to producing a value.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

impl EvalError {
    /// An uncategorized error with a message.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: None,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set the span unless an inner expression already did.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach the call stack unless one is already recorded.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    /// Diagnostic with the error span as primary label and one secondary
    /// label per call frame.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.message());
        if let Some(span) = self.span {
            diag = diag.with_label(span, "");
        }
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames() {
                diag = diag.with_secondary_label(frame.span, format!("from {}", frame.name));
            }
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {}

impl From<NestingExceeded> for EvalError {
    fn from(err: NestingExceeded) -> Self {
        nesting_limit(err.limit)
    }
}

impl From<EvalError> for Diagnostic {
    fn from(err: EvalError) -> Self {
        err.to_diagnostic()
    }
}

// Argument errors

#[cold]
pub fn type_error(signature: &str, argument: &str, expected: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Type {
        signature: signature.to_owned(),
        argument: argument.to_owned(),
        expected,
    })
}

#[cold]
pub fn range_error(
    signature: &str,
    argument: &str,
    lo: impl Into<String>,
    hi: impl Into<String>,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Range {
        signature: signature.to_owned(),
        argument: argument.to_owned(),
        lo: lo.into(),
        hi: hi.into(),
    })
}

#[cold]
pub fn unitless_error(signature: &str, argument: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unitless {
        signature: signature.to_owned(),
        argument: argument.to_owned(),
    })
}

/// `wrong number of arguments (3 for 2) for `rgb'`
#[cold]
pub fn too_many_arguments(callable: &str, max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount {
        message: format!("wrong number of arguments ({got} for {max}) for `{callable}'"),
    })
}

/// `Mixin foo is missing argument $bar.`
#[cold]
pub fn missing_argument(callable: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount {
        message: format!("{callable} is missing argument ${name}."),
    })
}

/// `Function foo has no argument named $bar.`
#[cold]
pub fn unknown_argument(callable: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount {
        message: format!("{callable} has no argument named ${name}."),
    })
}

// Operation errors

#[cold]
pub fn incompatible_units(lhs: &str, rhs: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IncompatibleUnits {
        lhs: lhs.to_owned(),
        rhs: rhs.to_owned(),
    })
}

#[cold]
pub fn undefined_operation(lhs: String, verb: &'static str, rhs: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedOperation { lhs, verb, rhs })
}

#[cold]
pub fn zero_division() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroDivision)
}

#[cold]
pub fn user_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UserError {
        message: message.into(),
    })
}

#[cold]
pub fn invalid_css_value(value: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCssValue {
        value: value.into(),
    })
}

#[cold]
pub fn extend_not_found(extender: &str, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExtendNotFound {
        extender: extender.to_owned(),
        target: target.to_owned(),
    })
}

#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
    })
}

// Resolution errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn undefined_mixin(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMixin {
        name: name.to_owned(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_owned(),
    })
}

// Limits

#[cold]
pub fn nesting_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NestingLimitExceeded { limit })
}

#[cfg(test)]
mod tests;
