//! Parse error types.
//!
//! Syntax errors are always fatal: the parser stops at the first one and
//! returns it. Most messages follow the `Invalid CSS after "...": expected
//! X, was "..."` shape, built by [`sable_diagnostic::snippet::css_error`].

use sable_diagnostic::{Diagnostic, ErrorCode};
use sable_ir::Span;
use sable_stack::NestingExceeded;

/// What went wrong, at the granularity of an [`ErrorCode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated interpolation")]
    UnterminatedInterpolation,
    #[error("invalid hex colour")]
    InvalidHexColor,
    #[error("invalid CSS")]
    InvalidCss,
    #[error("expected expression")]
    ExpectedExpression,
    #[error("unclosed delimiter")]
    UnclosedDelimiter,
    #[error("invalid selector")]
    InvalidSelector,
    #[error("parent selector not allowed")]
    ParentNotAllowed,
    #[error("directive not allowed here")]
    DirectiveNotAllowed,
    #[error("invalid declaration")]
    InvalidDeclaration,
    #[error("nesting limit exceeded")]
    NestingLimit,
}

impl ParseErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ParseErrorKind::UnterminatedString => ErrorCode::E0001,
            ParseErrorKind::UnterminatedComment => ErrorCode::E0002,
            ParseErrorKind::UnterminatedInterpolation => ErrorCode::E0003,
            ParseErrorKind::InvalidHexColor => ErrorCode::E0004,
            ParseErrorKind::InvalidCss => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter => ErrorCode::E1003,
            ParseErrorKind::InvalidSelector => ErrorCode::E1004,
            ParseErrorKind::ParentNotAllowed => ErrorCode::E1005,
            ParseErrorKind::DirectiveNotAllowed => ErrorCode::E1006,
            ParseErrorKind::InvalidDeclaration => ErrorCode::E1007,
            ParseErrorKind::NestingLimit => ErrorCode::E9001,
        }
    }
}

/// A fatal syntax error.
///
/// `snippet` holds the text quoted before and after the failure point when
/// the message was built from source context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    pub snippet: Option<(String, String)>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            kind,
            span,
            message: message.into(),
            snippet: None,
        }
    }

    #[must_use]
    pub fn with_snippet(mut self, before: String, after: String) -> Self {
        self.snippet = Some((before, after));
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Replace a placeholder span; spans that are already set are kept.
    #[must_use]
    pub(crate) fn or_span(mut self, span: Span) -> Self {
        if self.span == Span::DUMMY {
            self.span = span;
        }
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message.clone())
            .with_label(self.span, self.kind.to_string())
    }
}

impl From<NestingExceeded> for ParseError {
    fn from(err: NestingExceeded) -> Self {
        ParseError::new(ParseErrorKind::NestingLimit, err.to_string(), Span::DUMMY)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        err.to_diagnostic()
    }
}
