//! Expression nodes.

use std::fmt;

use crate::{ArgumentList, BinaryOp, Span, UnaryOp};

/// How list items are joined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ListSeparator {
    #[default]
    Space,
    Comma,
}

impl ListSeparator {
    /// Name returned by `list-separator()`.
    pub fn name(self) -> &'static str {
        match self {
            ListSeparator::Space => "space",
            ListSeparator::Comma => "comma",
        }
    }

    /// Text placed between serialized items.
    pub fn joiner(self, compressed: bool) -> &'static str {
        match (self, compressed) {
            (ListSeparator::Space, _) => " ",
            (ListSeparator::Comma, false) => ", ",
            (ListSeparator::Comma, true) => ",",
        }
    }
}

/// Whether a string literal carried quotes in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum QuoteKind {
    Quoted,
    #[default]
    Unquoted,
}

impl QuoteKind {
    pub fn is_quoted(self) -> bool {
        matches!(self, QuoteKind::Quoted)
    }
}

/// One piece of an interpolated string.
#[derive(Clone, Debug, PartialEq)]
pub enum InterpPart {
    Literal(String),
    Expr(Expr),
}

/// Text with embedded `#{...}` expressions (a "string schema").
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Interpolation {
    pub parts: Vec<InterpPart>,
    pub span: Span,
}

impl Interpolation {
    pub fn new(span: Span) -> Self {
        Interpolation {
            parts: Vec::new(),
            span,
        }
    }

    /// An interpolation made of a single literal chunk.
    pub fn literal(text: impl Into<String>, span: Span) -> Self {
        Interpolation {
            parts: vec![InterpPart::Literal(text.into())],
            span,
        }
    }

    /// Append literal text, merging with a trailing literal chunk.
    pub fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(InterpPart::Literal(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(InterpPart::Literal(text.to_owned()));
        }
    }

    pub fn push_expr(&mut self, expr: Expr) {
        self.parts.push(InterpPart::Expr(expr));
    }

    /// The text if no `#{}` occurs.
    pub fn as_plain(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [InterpPart::Literal(text)] => Some(text),
            _ => None,
        }
    }

    pub fn has_interpolants(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, InterpPart::Expr(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| match p {
            InterpPart::Literal(text) => text.is_empty(),
            InterpPart::Expr(_) => false,
        })
    }

    /// Strip trailing whitespace from the final literal chunk.
    pub fn trim_end(&mut self) {
        if let Some(InterpPart::Literal(last)) = self.parts.last_mut() {
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            if last.is_empty() {
                self.parts.pop();
            }
        }
    }
}

/// An expression node.
///
/// `delayed` marks nodes whose surface syntax may be CSS-significant: a
/// delayed division is rendered as `lhs/rhs` instead of being reduced.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub delayed: bool,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            delayed: false,
        }
    }

    #[must_use]
    pub fn with_delayed(mut self, delayed: bool) -> Self {
        self.delayed = delayed;
        self
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.kind, ExprKind::Binary { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Numeric literal; `unit` is empty for unitless numbers and `%` for percentages.
    Number { value: f64, unit: String },
    /// Hex or named colour; `original` keeps the spelling for output.
    Color {
        r: f64,
        g: f64,
        b: f64,
        a: f64,
        original: String,
    },
    /// Quoted string, possibly interpolated.
    String(Interpolation),
    /// Plain unquoted identifier.
    Ident(String),
    /// Unquoted text containing interpolation, such as `foo-#{$x}`.
    Interpolated(Interpolation),
    Boolean(bool),
    Null,
    Variable(String),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        ws_before: bool,
        ws_after: bool,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        name: String,
        args: ArgumentList,
    },
    Paren(Box<Expr>),
    List {
        items: Vec<Expr>,
        separator: ListSeparator,
        bracketed: bool,
    },
    Map(Vec<(Expr, Expr)>),
    /// `&` used as a value.
    ParentRef,
    /// Raw CSS passed through with interpolation resolved: `url(...)`,
    /// `calc(...)`, `!important`, custom property values.
    Special(Interpolation),
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                InterpPart::Literal(text) => f.write_str(text)?,
                InterpPart::Expr(_) => f.write_str("#{...}")?,
            }
        }
        Ok(())
    }
}
