//! Parameter and argument lists.

use crate::{Expr, Span};

/// A declared parameter: `$name`, `$name: default`, or `$name...`.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Expr>,
    pub is_rest: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ParameterList {
    pub params: Vec<Parameter>,
    pub span: Span,
}

impl ParameterList {
    pub fn rest(&self) -> Option<&Parameter> {
        self.params.iter().find(|p| p.is_rest)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A call-site argument.
///
/// `name` is set for keyword arguments (`$x: 1`). `is_rest` marks a
/// trailing `list...`; `is_keyword_rest` marks a `map...` splat.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
    pub is_rest: bool,
    pub is_keyword_rest: bool,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Argument {
            name: None,
            value,
            is_rest: false,
            is_keyword_rest: false,
        }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Argument {
            name: Some(name.into()),
            value,
            is_rest: false,
            is_keyword_rest: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ArgumentList {
    pub args: Vec<Argument>,
    pub span: Span,
}

impl ArgumentList {
    pub fn new(span: Span) -> Self {
        ArgumentList {
            args: Vec::new(),
            span,
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn has_named(&self) -> bool {
        self.args.iter().any(|a| a.name.is_some())
    }
}
