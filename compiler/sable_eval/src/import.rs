//! The `@import` hook.
//!
//! Finding and reading files is the host's business. The evaluator offers
//! each quoted import URL to an [`ImportResolver`]; a declined URL is kept
//! as a plain CSS `@import`.

use sable_ir::Stylesheet;
use sable_value::EvalResult;

/// A stylesheet loaded for an `@import`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedImport {
    /// Canonical path, used as the base for imports inside it and to
    /// detect import loops.
    pub path: String,
    pub stylesheet: Stylesheet,
}

/// Loads imported stylesheets.
pub trait ImportResolver {
    /// Resolve `url` as imported from the file at `base`.
    ///
    /// `Ok(None)` declines the import. An error (for example a parse error
    /// in the imported file) aborts the compilation.
    fn resolve(&mut self, url: &str, base: &str) -> EvalResult<Option<ResolvedImport>>;
}

/// A resolver that declines every import.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoImports;

impl ImportResolver for NoImports {
    fn resolve(&mut self, _url: &str, _base: &str) -> EvalResult<Option<ResolvedImport>> {
        Ok(None)
    }
}
