//! Shared helpers for the end-to-end tests.

use sablec::{compile_str, compile_with, Compilation, CssNode, ImportResolver, Options};

/// Compile with default options, panicking with the message on failure.
pub fn compile(src: &str) -> Compilation {
    compile_str(src, &Options::default()).unwrap_or_else(|e| panic!("{src}: {e}"))
}

/// Compile and return the error message.
pub fn compile_err(src: &str) -> String {
    match compile_str(src, &Options::default()) {
        Ok(compilation) => panic!("{src}: expected an error, got {:?}", lines(&compilation)),
        Err(e) => e.to_string(),
    }
}

/// Compile against `resolver` and dump the result.
pub fn compile_lines_with(src: &str, resolver: &mut dyn ImportResolver) -> Vec<String> {
    let compilation =
        compile_with(src, &Options::default(), resolver).unwrap_or_else(|e| panic!("{src}: {e}"));
    lines(&compilation)
}

/// One line per top-level node.
pub fn compile_lines(src: &str) -> Vec<String> {
    lines(&compile(src))
}

/// Value of the only declaration in `a { x: <expr>; }`.
pub fn value_of(expr: &str) -> String {
    let compilation = compile(&format!("a {{ x: {expr}; }}"));
    let decls = compilation.declarations();
    assert_eq!(decls.len(), 1, "{expr}: {decls:?}");
    decls[0].2.clone()
}

pub fn lines(compilation: &Compilation) -> Vec<String> {
    compilation
        .css
        .nodes
        .iter()
        .map(|node| line(node, compilation.precision))
        .collect()
}

fn line(node: &CssNode, precision: u8) -> String {
    match node {
        CssNode::Rule {
            selector,
            declarations,
        } => {
            let body: Vec<String> = declarations
                .iter()
                .map(|d| format!("{}: {};", d.name, d.value_css(precision)))
                .collect();
            format!("{selector} {{ {} }}", body.join(" "))
        }
        CssNode::AtRule {
            name,
            prelude,
            children,
        } => {
            let head = if prelude.is_empty() {
                format!("@{name}")
            } else {
                format!("@{name} {prelude}")
            };
            match children {
                None => format!("{head};"),
                Some(children) => {
                    let inner: Vec<String> =
                        children.iter().map(|n| line(n, precision)).collect();
                    format!("{head} {{ {} }}", inner.join(" "))
                }
            }
        }
        CssNode::Declaration(d) => format!("{}: {};", d.name, d.value_css(precision)),
        CssNode::Import { url } => format!("@import {url};"),
        CssNode::Comment(text) => text.clone(),
    }
}
