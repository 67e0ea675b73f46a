//! Sablec - the in-process compiler facade.
//!
//! Ties the front end together:
//!
//! ```text
//! source text
//!     │  sable_parse::parse_stylesheet
//!     ▼
//! Stylesheet (AST)
//!     │  sable_eval::evaluate  ◄── ImportResolver
//!     ▼
//! CssStylesheet + warnings
//! ```
//!
//! Writing CSS text is left to the host: a [`Compilation`] hands over the
//! evaluated tree, with every selector resolved and every value in its
//! final form. Errors come back as [`CompileError`]; both variants convert
//! into a [`Diagnostic`] that can be rendered against a [`SourceMap`].

mod importer;

pub use importer::MapImporter;

pub use sable_diagnostic::{Diagnostic, ErrorCode, Severity, SourceMap};
pub use sable_eval::{
    CssDeclaration, CssNode, CssStylesheet, ImportResolver, NoImports, ResolvedImport,
};
pub use sable_parse::ParseError;
pub use sable_value::{EvalError, Value};

use std::sync::Once;

use sable_eval::{evaluate, EvalConfig};
use sable_ir::SourceId;
use sable_parse::{parse_stylesheet, ParserConfig};
use sable_stack::DEFAULT_MAX_NESTING;
use sable_value::DEFAULT_PRECISION;
use tracing::debug;

/// Compiler settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Fractional digits kept when numbers are printed.
    pub precision: u8,
    /// Limit for nested blocks, parentheses, calls and imports.
    pub max_nesting: usize,
    /// Name of the entry file in diagnostics.
    pub source_name: String,
    /// Drop `@warn` and `@debug` output from the returned warnings.
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            precision: DEFAULT_PRECISION,
            max_nesting: DEFAULT_MAX_NESTING,
            source_name: "stdin".to_owned(),
            quiet: false,
        }
    }
}

impl Options {
    fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_nesting: self.max_nesting,
            source: SourceId::ROOT,
        }
    }

    fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            precision: self.precision,
            max_nesting: self.max_nesting,
            quiet: self.quiet,
        }
    }
}

/// Result of a successful compilation.
#[derive(Clone, Debug)]
pub struct Compilation {
    pub css: CssStylesheet,
    /// Deprecations, `@warn` and `@debug` output, in the order raised.
    pub warnings: Vec<Diagnostic>,
    /// Precision the values should be printed with.
    pub precision: u8,
}

impl Compilation {
    /// Every declaration of every style rule as `(selector, name, value)`
    /// text, in document order.
    pub fn declarations(&self) -> Vec<(String, String, String)> {
        self.css
            .rules()
            .into_iter()
            .flat_map(|(selector, decls)| {
                let selector = selector.to_string();
                decls.iter().map(move |d| {
                    (
                        selector.clone(),
                        d.name.clone(),
                        d.value_css(self.precision),
                    )
                })
            })
            .collect()
    }
}

/// A fatal compilation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CompileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Parse(err) => err.code(),
            CompileError::Eval(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse(err) => err.to_diagnostic(),
            CompileError::Eval(err) => err.to_diagnostic(),
        }
    }

    /// Plain-text report with file names and line/column positions.
    pub fn render(&self, sources: &SourceMap) -> String {
        self.to_diagnostic().render(sources)
    }
}

/// Compile a stylesheet that imports nothing.
///
/// Every quoted `@import` is kept as a plain CSS import.
pub fn compile_str(src: &str, options: &Options) -> Result<Compilation, CompileError> {
    compile_with(src, options, &mut NoImports)
}

/// Compile a stylesheet, loading imports through `resolver`.
pub fn compile_with(
    src: &str,
    options: &Options,
    resolver: &mut dyn ImportResolver,
) -> Result<Compilation, CompileError> {
    debug!(source = %options.source_name, len = src.len(), "compiling");
    let stylesheet = parse_stylesheet(src, &options.parser_config())?;
    let evaluation = evaluate(&stylesheet, &options.eval_config(), resolver)?;
    debug!(
        nodes = evaluation.css.nodes.len(),
        warnings = evaluation.warnings.len(),
        "compiled"
    );
    Ok(Compilation {
        css: evaluation.css,
        warnings: evaluation.warnings,
        precision: options.precision,
    })
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=sable_eval=debug` or
/// `RUST_LOG=sable_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
