//! Parse context for context-sensitive rules.
//!
//! The stylesheet grammar decides what is legal from the enclosing blocks:
//! `@return` only inside a function, `@content` only inside a mixin,
//! `@extend` only under a style rule, declarations never at the root. The
//! parser keeps an explicit stack of [`Scope`]s instead of global state, so
//! parsing stays re-entrant.

/// Kind of block the parser is currently inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Root,
    /// Style rule body.
    Rule,
    Mixin,
    Function,
    /// `@if`, `@each`, `@for` or `@while` body.
    Control,
    /// `@media` body.
    Media,
    /// Nested property block (`font: { ... }`).
    Properties,
    /// Content block passed to `@include`.
    Include,
    /// Body of any other at-rule.
    AtRule,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserContext {
    scopes: Vec<Scope>,
    allow_parent: bool,
}

impl Default for ParserContext {
    fn default() -> Self {
        ParserContext::new()
    }
}

impl ParserContext {
    pub fn new() -> Self {
        ParserContext {
            scopes: vec![Scope::Root],
            allow_parent: true,
        }
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Leave the innermost scope. The root scope is never popped.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current(&self) -> Scope {
        self.scopes.last().copied().unwrap_or(Scope::Root)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn is_root(&self) -> bool {
        self.current() == Scope::Root
    }

    fn encloses(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    pub fn in_function(&self) -> bool {
        self.encloses(Scope::Function)
    }

    pub fn in_mixin(&self) -> bool {
        self.encloses(Scope::Mixin)
    }

    /// Under a style rule or inside a mixin or content block, where the
    /// eventual parent is not known yet.
    pub fn in_rule(&self) -> bool {
        self.encloses(Scope::Rule) || self.encloses(Scope::Mixin) || self.encloses(Scope::Include)
    }

    pub fn in_control(&self) -> bool {
        self.encloses(Scope::Control)
    }

    /// Declarations need an enclosing block that produces CSS.
    pub fn allows_declarations(&self) -> bool {
        !matches!(self.current(), Scope::Root | Scope::Function)
            && !(self.in_function() && !self.in_rule())
    }

    /// Mixin and function definitions may not nest in other definitions or
    /// in control directives.
    pub fn allows_definitions(&self) -> bool {
        !(self.in_mixin() || self.in_function() || self.in_control())
    }

    #[inline]
    pub fn allows_parent(&self) -> bool {
        self.allow_parent
    }

    /// Set whether `&` is accepted; returns the previous setting.
    pub fn set_allow_parent(&mut self, allow: bool) -> bool {
        std::mem::replace(&mut self.allow_parent, allow)
    }
}
