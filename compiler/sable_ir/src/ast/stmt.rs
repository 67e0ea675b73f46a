//! Statement nodes.

use std::sync::Arc;

use crate::{ArgumentList, Expr, Interpolation, ParameterList, SelectorList, SourceId, Span};

/// A parsed stylesheet or imported file.
#[derive(Clone, Debug, PartialEq)]
pub struct Stylesheet {
    pub source: SourceId,
    pub body: Vec<Stmt>,
}

/// A selector as written in a rule or `@extend`.
///
/// Selectors containing `#{}` can only be parsed once the interpolation has
/// been evaluated, so they are kept as text until expansion.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorSource {
    Parsed(SelectorList),
    Interpolated(Interpolation),
}

/// A `@mixin` or `@function` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct CallableDef {
    pub name: String,
    pub params: ParameterList,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// The block passed to `@include name { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBlock {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// One `@import` URL.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportTarget {
    /// A quoted URL offered to the import resolver.
    Dynamic { url: String, span: Span },
    /// Plain CSS import kept verbatim (`url(...)`, `.css`, media suffix).
    Static(Interpolation),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfClause {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    StyleRule {
        selector: SelectorSource,
        body: Vec<Stmt>,
    },
    /// `name: value;` with optional nested properties (`font: { ... }`).
    Declaration {
        name: Interpolation,
        value: Option<Expr>,
        body: Vec<Stmt>,
        is_custom_property: bool,
    },
    Variable {
        name: String,
        value: Expr,
        is_default: bool,
        is_global: bool,
    },
    Import(Vec<ImportTarget>),
    Mixin(Arc<CallableDef>),
    Function(Arc<CallableDef>),
    Include {
        name: String,
        args: ArgumentList,
        content: Option<Arc<ContentBlock>>,
    },
    Content,
    Return(Expr),
    If {
        clauses: Vec<IfClause>,
        else_body: Option<Vec<Stmt>>,
    },
    Each {
        variables: Vec<String>,
        list: Expr,
        body: Vec<Stmt>,
    },
    For {
        variable: String,
        from: Expr,
        to: Expr,
        inclusive: bool,
        body: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Extend {
        selector: SelectorSource,
        is_optional: bool,
    },
    Warn(Expr),
    Debug(Expr),
    Error(Expr),
    Media {
        query: Interpolation,
        body: Vec<Stmt>,
    },
    AtRule {
        name: String,
        prelude: Interpolation,
        body: Option<Vec<Stmt>>,
    },
    /// Loud `/* */` comment, text kept verbatim.
    Comment(String),
}
