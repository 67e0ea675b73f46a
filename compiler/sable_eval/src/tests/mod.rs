//! End-to-end evaluator tests.
//!
//! - `expr_tests`: expressions evaluated on their own
//! - `builtins_tests`: native functions through real call sites
//! - `stmt_tests`: stylesheet expansion, mixins, control flow, `@extend`
//!   and `@import`

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod expr_tests;
mod stmt_tests;

use rustc_hash::FxHashMap;
use sable_ir::SourceId;
use sable_parse::{parse_expression, parse_stylesheet, ParserConfig};

use crate::{
    evaluate, CssNode, CssStylesheet, EvalConfig, EvalError, EvalResult, Evaluation,
    ImportResolver, Interpreter, NoImports, ResolvedImport, Value,
};

const P: u8 = 10;

fn try_eval(src: &str) -> EvalResult {
    let expr = parse_expression(src).unwrap();
    let mut resolver = NoImports;
    let mut interpreter = Interpreter::new(&EvalConfig::default(), &mut resolver);
    interpreter.eval_expression(&expr)
}

fn eval(src: &str) -> Value {
    try_eval(src).unwrap_or_else(|e| panic!("{src}: {}", e.message()))
}

fn eval_err(src: &str) -> EvalError {
    match try_eval(src) {
        Ok(value) => panic!("{src}: expected an error, got {value:?}"),
        Err(e) => e,
    }
}

/// CSS text of an expression.
fn css(src: &str) -> String {
    eval(src).to_css(P).unwrap()
}

fn try_expand_with(src: &str, resolver: &mut dyn ImportResolver) -> EvalResult<Evaluation> {
    let stylesheet = parse_stylesheet(src, &ParserConfig::default()).unwrap();
    evaluate(&stylesheet, &EvalConfig::default(), resolver)
}

fn try_expand(src: &str) -> EvalResult<Evaluation> {
    try_expand_with(src, &mut NoImports)
}

/// Expanded output, one line per node.
fn expand(src: &str) -> Vec<String> {
    let evaluation = try_expand(src).unwrap_or_else(|e| panic!("{}", e.message()));
    render(&evaluation.css)
}

fn expand_err(src: &str) -> String {
    match try_expand(src) {
        Ok(evaluation) => panic!("expected an error, got {:?}", render(&evaluation.css)),
        Err(e) => e.message(),
    }
}

fn render(css: &CssStylesheet) -> Vec<String> {
    css.nodes.iter().map(render_node).collect()
}

fn render_node(node: &CssNode) -> String {
    match node {
        CssNode::Rule {
            selector,
            declarations,
        } => {
            let body: Vec<String> = declarations
                .iter()
                .map(|d| format!("{}: {};", d.name, d.value_css(P)))
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
                    let inner: Vec<String> = children.iter().map(render_node).collect();
                    format!("{head} {{ {} }}", inner.join(" "))
                }
            }
        }
        CssNode::Declaration(d) => format!("{}: {};", d.name, d.value_css(P)),
        CssNode::Import { url } => format!("@import {url};"),
        CssNode::Comment(text) => text.clone(),
    }
}

/// Resolves imports from an in-memory file table.
#[derive(Default)]
struct MemoryImports {
    files: FxHashMap<String, String>,
    requests: Vec<(String, String)>,
}

impl MemoryImports {
    fn with(files: &[(&str, &str)]) -> Self {
        MemoryImports {
            files: files
                .iter()
                .map(|(path, src)| ((*path).to_owned(), (*src).to_owned()))
                .collect(),
            requests: Vec::new(),
        }
    }
}

impl ImportResolver for MemoryImports {
    fn resolve(&mut self, url: &str, base: &str) -> EvalResult<Option<ResolvedImport>> {
        self.requests.push((url.to_owned(), base.to_owned()));
        let Some(src) = self.files.get(url) else {
            return Ok(None);
        };
        let config = ParserConfig {
            source: SourceId(1),
            ..Default::default()
        };
        let stylesheet = parse_stylesheet(src, &config).map_err(|e| EvalError::new(e.message))?;
        Ok(Some(ResolvedImport {
            path: url.to_owned(),
            stylesheet,
        }))
    }
}
