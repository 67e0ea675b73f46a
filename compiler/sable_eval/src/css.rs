//! The evaluated output tree.
//!
//! Nesting is gone: every style rule carries its fully resolved selector.
//! At-rules keep their children, and rules inside an at-rule repeat the
//! enclosing selector. Values are evaluated and known to have a CSS form.

use sable_ir::{SelectorList, Span};
use sable_value::Value;

/// `name: value` inside a rule or at-rule.
#[derive(Clone, Debug, PartialEq)]
pub struct CssDeclaration {
    pub name: String,
    pub value: Value,
    pub span: Span,
}

impl CssDeclaration {
    /// The value as written to the stylesheet.
    ///
    /// Values are validated when the declaration is built, so the error
    /// case only arises for declarations constructed by hand.
    pub fn value_css(&self, precision: u8) -> String {
        self.value
            .to_css(precision)
            .unwrap_or_else(|_| self.value.inspect(precision))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CssNode {
    Rule {
        selector: SelectorList,
        declarations: Vec<CssDeclaration>,
    },
    AtRule {
        name: String,
        prelude: String,
        /// `None` for statements such as `@charset "x";`.
        children: Option<Vec<CssNode>>,
    },
    /// Declaration directly inside an at-rule (`@font-face`, `@page`).
    Declaration(CssDeclaration),
    Import {
        url: String,
    },
    Comment(String),
}

impl CssNode {
    pub fn as_rule(&self) -> Option<(&SelectorList, &[CssDeclaration])> {
        match self {
            CssNode::Rule {
                selector,
                declarations,
            } => Some((selector, declarations)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssStylesheet {
    pub nodes: Vec<CssNode>,
}

impl CssStylesheet {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every style rule, including those nested in at-rules, in document
    /// order.
    pub fn rules(&self) -> Vec<(&SelectorList, &[CssDeclaration])> {
        fn walk<'a>(nodes: &'a [CssNode], out: &mut Vec<(&'a SelectorList, &'a [CssDeclaration])>) {
            for node in nodes {
                match node {
                    CssNode::Rule {
                        selector,
                        declarations,
                    } => out.push((selector, declarations)),
                    CssNode::AtRule {
                        children: Some(children),
                        ..
                    } => walk(children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    /// Mutable access to every rule selector, for `@extend` rewriting.
    pub(crate) fn for_each_rule_mut(&mut self, mut f: impl FnMut(&mut SelectorList)) {
        fn walk(nodes: &mut [CssNode], f: &mut impl FnMut(&mut SelectorList)) {
            for node in nodes {
                match node {
                    CssNode::Rule { selector, .. } => f(selector),
                    CssNode::AtRule {
                        children: Some(children),
                        ..
                    } => walk(children, f),
                    _ => {}
                }
            }
        }
        walk(&mut self.nodes, &mut f);
    }

    /// Drop rules whose selector became empty, and at-rule blocks left
    /// without children by that.
    pub(crate) fn prune(&mut self) {
        fn prune(nodes: &mut Vec<CssNode>) {
            nodes.retain_mut(|node| match node {
                CssNode::Rule { selector, .. } => !selector.is_empty(),
                CssNode::AtRule {
                    children: Some(children),
                    ..
                } => {
                    let before = children.len();
                    prune(children);
                    before == 0 || !children.is_empty()
                }
                _ => true,
            });
        }
        prune(&mut self.nodes);
    }
}
