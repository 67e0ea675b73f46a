//! Recursive descent parser for SCSS.
//!
//! Works directly on the source text through a [`Scanner`]; there is no
//! separate token stream. Grammar productions live in `grammar/`:
//!
//! - `stmt.rs`: blocks, style rules, declarations and at-rules
//! - `expr.rs`: the operator precedence chain and list structure
//! - `value.rs`: atoms (numbers, colours, strings, calls, maps)
//! - `args.rs`: parameter and argument lists
//! - `selector.rs`: selector lists, complex and compound selectors
//! - `interpolation.rs`: `#{}` and raw text with embedded interpolation
//!
//! Every recursive production goes through [`Parser::nested`], which bounds
//! depth with a [`NestingGuard`] and grows the stack when needed.

mod context;
mod error;
mod grammar;

pub use context::{ParserContext, Scope};
pub use error::{ParseError, ParseErrorKind};

use sable_diagnostic::snippet;
use sable_ir::{Expr, SelectorList, SourceId, Span, Stylesheet};
use sable_lexer_core::{Matcher, Scanner};
use sable_stack::{NestingGuard, DEFAULT_MAX_NESTING};

/// Parser settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of blocks, parentheses and selector arguments.
    pub max_nesting: usize,
    /// Source id stamped on every span.
    pub source: SourceId,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting: DEFAULT_MAX_NESTING,
            source: SourceId::ROOT,
        }
    }
}

/// Parser state.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    source: SourceId,
    guard: NestingGuard,
    context: ParserContext,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, config: &ParserConfig) -> Self {
        Parser {
            scanner: Scanner::new(src),
            source: config.source,
            guard: NestingGuard::new(config.max_nesting),
            context: ParserContext::new(),
        }
    }

    /// Parse a whole stylesheet.
    pub fn parse_stylesheet(mut self) -> Result<Stylesheet, ParseError> {
        tracing::debug!(source = self.source.0, len = self.src().len(), "parse_stylesheet");
        let body = self.parse_block_body()?;
        if !self.scanner.is_eof() {
            return Err(self.css_error(
                ParseErrorKind::InvalidCss,
                ": expected 1 selector or at-rule, was ",
            ));
        }
        Ok(Stylesheet {
            source: self.source,
            body,
        })
    }

    /// Parse a selector list that must span the whole input.
    pub fn parse_selector(mut self, allow_parent: bool) -> Result<SelectorList, ParseError> {
        self.context.set_allow_parent(allow_parent);
        let list = self.parse_selector_list()?;
        self.expect_end()?;
        Ok(list)
    }

    /// Parse an expression list that must span the whole input.
    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_list(false)?;
        self.expect_end()?;
        Ok(expr)
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.scanner.skip_ws();
        if self.scanner.is_eof() {
            Ok(())
        } else {
            Err(self.css_error(ParseErrorKind::InvalidCss, ": expected end of input, was "))
        }
    }

    // Position helpers

    #[inline]
    fn src(&self) -> &'a str {
        self.scanner.source()
    }

    #[inline]
    fn pos(&self) -> usize {
        self.scanner.pos()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::from_range(self.source, start..end)
    }

    /// Span from `start` to the current position.
    fn span_from(&self, start: usize) -> Span {
        self.span(start, self.pos().max(start))
    }

    fn point(&self) -> Span {
        self.span(self.pos(), self.pos())
    }

    /// Offset of the next significant byte.
    fn pos_after_ws(&self) -> usize {
        sable_lexer_core::fragments::optional_css_whitespace(self.scanner.bytes(), self.pos())
            .unwrap_or(self.pos())
    }

    /// Lex `m` after whitespace, returning the matched text.
    #[inline]
    fn lex<M: Matcher>(&mut self, m: M) -> Option<&'a str> {
        self.scanner.lex(m)
    }

    #[inline]
    fn peek<M: Matcher>(&self, m: M) -> bool {
        self.scanner.peek(m).is_some()
    }

    #[inline]
    fn peek_char(&self, c: u8) -> bool {
        self.scanner.peek_byte_after_ws() == Some(c)
    }

    // Errors

    /// `Invalid CSS after "<before>"<middle>"<after>"` at the current position.
    #[cold]
    fn css_error(&self, kind: ParseErrorKind, middle: &str) -> ParseError {
        let pos = self.pos();
        let message = snippet::css_error(self.src(), pos, "Invalid CSS", " after ", middle, true);
        let (before, after) = snippet::context(self.src(), pos, true);
        ParseError::new(kind, message, self.point()).with_snippet(before, after)
    }

    #[cold]
    fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, message, self.point())
    }

    #[cold]
    fn error_at(&self, kind: ParseErrorKind, message: impl Into<String>, start: usize) -> ParseError {
        ParseError::new(kind, message, self.span_from(start))
    }

    /// Expect `c` after whitespace or fail with `expected "c"`.
    fn expect_char(&mut self, c: u8, kind: ParseErrorKind) -> Result<(), ParseError> {
        if self.scanner.lex_char(c) {
            Ok(())
        } else {
            let middle = format!(": expected \"{}\", was ", char::from(c));
            Err(self.css_error(kind, &middle))
        }
    }

    // Recursion

    fn guard_mut<'p>(parser: &'p mut Parser<'a>) -> &'p mut NestingGuard {
        &mut parser.guard
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let here = self.point();
        NestingGuard::scope(self, Self::guard_mut, f).map_err(|e| e.or_span(here))
    }

    /// Run `f` inside `scope`, popping it again whatever the outcome.
    fn in_scope<T>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.context.push(scope);
        let result = self.nested(f);
        self.context.pop();
        result
    }
}

/// Parse a stylesheet.
pub fn parse_stylesheet(src: &str, config: &ParserConfig) -> Result<Stylesheet, ParseError> {
    Parser::new(src, config).parse_stylesheet()
}

/// Parse a selector list. With `allow_parent` false, `&` is an error.
pub fn parse_selector(src: &str, allow_parent: bool) -> Result<SelectorList, ParseError> {
    Parser::new(src, &ParserConfig::default()).parse_selector(allow_parent)
}

/// Parse a selector list with explicit settings.
pub fn parse_selector_with(
    src: &str,
    allow_parent: bool,
    config: &ParserConfig,
) -> Result<SelectorList, ParseError> {
    Parser::new(src, config).parse_selector(allow_parent)
}

/// Parse a standalone expression such as `1px + 2px` or `a, b c`.
pub fn parse_expression(src: &str) -> Result<Expr, ParseError> {
    Parser::new(src, &ParserConfig::default()).parse_expression()
}

#[cfg(test)]
mod tests;
