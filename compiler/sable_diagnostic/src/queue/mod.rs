//! Warning side channel.
//!
//! Deprecations and `@warn`/`@debug` output are collected here while a
//! stylesheet compiles. The queue deduplicates identical warnings raised at
//! the same location (a deprecated operation inside a loop warns once).

use std::collections::HashSet;

use sable_ir::Span;

use crate::{Diagnostic, ErrorCode};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QueueConfig {
    /// Drop `@warn` and `@debug` output (deprecations are still kept).
    pub quiet: bool,
    /// Collapse identical warnings at the same span.
    pub deduplicate: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            quiet: false,
            deduplicate: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: HashSet<(ErrorCode, Span, String)>,
    config: QueueConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QueueConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic. Returns `false` if it was filtered out.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if self.config.quiet && matches!(diag.code, ErrorCode::W1002 | ErrorCode::W1003) {
            return false;
        }
        if self.config.deduplicate {
            let key = (
                diag.code,
                diag.primary_span().unwrap_or_default(),
                diag.message.clone(),
            );
            if !self.seen.insert(key) {
                return false;
            }
        }
        self.diagnostics.push(diag);
        true
    }

    /// Record a deprecation warning.
    pub fn deprecation(&mut self, span: Span, message: impl Into<String>) -> bool {
        self.push(
            Diagnostic::warning(ErrorCode::W1001)
                .with_message(message)
                .with_label(span, "deprecated"),
        )
    }

    /// Record `@warn` output.
    pub fn user_warning(&mut self, span: Span, message: impl Into<String>) -> bool {
        self.push(
            Diagnostic::warning(ErrorCode::W1002)
                .with_message(message)
                .with_label(span, ""),
        )
    }

    /// Record `@debug` output.
    pub fn debug(&mut self, span: Span, message: impl Into<String>) -> bool {
        self.push(
            Diagnostic::note(ErrorCode::W1003)
                .with_message(message)
                .with_label(span, ""),
        )
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take all collected diagnostics in the order they were raised.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.seen.clear();
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests;
