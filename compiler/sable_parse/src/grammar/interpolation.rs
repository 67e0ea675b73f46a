//! `#{}` interpolation and raw text that may contain it.
//!
//! Raw text is used wherever the surrounding grammar is plain CSS rather
//! than SassScript: selectors with interpolation, at-rule preludes, media
//! queries, custom property values and the bodies of `url()` or `calc()`.

use sable_ir::{Expr, ExprKind, InterpPart, Interpolation};
use sable_lexer_core::fragments;

use super::normalize_name;
use crate::{ParseError, ParseErrorKind, Parser};

/// Move every part of `source` onto the end of `target`.
pub(crate) fn append(target: &mut Interpolation, source: Interpolation) {
    for part in source.parts {
        match part {
            InterpPart::Literal(text) => target.push_literal(&text),
            InterpPart::Expr(expr) => target.push_expr(expr),
        }
    }
}

/// Strip leading whitespace from the first literal chunk.
pub(crate) fn trim_start(interp: &mut Interpolation) {
    if let Some(InterpPart::Literal(first)) = interp.parts.first_mut() {
        let trimmed = first.trim_start().to_owned();
        if trimmed.is_empty() {
            interp.parts.remove(0);
        } else {
            *first = trimmed;
        }
    }
}

impl Parser<'_> {
    /// `#{ expr }` at the current position.
    pub(crate) fn parse_interpolant(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos();
        if self.scanner.peek_raw(fragments::interpolant).is_none() {
            return Err(self.error(
                ParseErrorKind::UnterminatedInterpolation,
                "unterminated interpolation",
            ));
        }
        self.scanner.advance_to(start + 2);
        if self.peek_char(b'}') {
            return Err(self.css_error(
                ParseErrorKind::ExpectedExpression,
                ": expected expression (e.g. 1px, bold), was ",
            ));
        }
        let expr = self.parse_list(false)?;
        self.expect_char(b'}', ParseErrorKind::UnclosedDelimiter)?;
        Ok(expr)
    }

    /// Collect text up to a byte accepted by `stop` at bracket depth zero,
    /// or up to an unmatched `)` or `]`.
    ///
    /// Quoted strings are copied with their quotes; `#{}` inside them is
    /// still parsed. With `variables`, a bare `$name` becomes an
    /// interpolated variable reference (used by media queries).
    pub(crate) fn parse_raw_interpolation(
        &mut self,
        stop: fn(u8) -> bool,
        variables: bool,
    ) -> Result<Interpolation, ParseError> {
        let start = self.pos();
        let bytes = self.scanner.bytes();
        let src = self.src();
        let mut interp = Interpolation::new(self.point());
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let mut chunk = start;
        let mut i = start;

        while i < bytes.len() {
            let b = bytes[i];
            if b == b'#' && bytes.get(i + 1) == Some(&b'{') {
                interp.push_literal(src.get(chunk..i).unwrap_or_default());
                self.scanner.advance_to(i);
                let expr = self.parse_interpolant()?;
                interp.push_expr(expr);
                i = self.pos();
                chunk = i;
                continue;
            }
            if b == b'\\' {
                i = (i + 2).min(bytes.len());
                continue;
            }
            if let Some(q) = quote {
                if b == q {
                    quote = None;
                } else if b == b'\n' {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        "unterminated string",
                        self.span(i, i),
                    ));
                }
                i += 1;
                continue;
            }
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = fragments::block_comment(bytes, i).ok_or_else(|| {
                        ParseError::new(
                            ParseErrorKind::UnterminatedComment,
                            "unterminated comment",
                            self.span(i, i),
                        )
                    })?;
                    continue;
                }
                b'$' if variables => {
                    if let Some(end) = fragments::variable(bytes, i) {
                        interp.push_literal(src.get(chunk..i).unwrap_or_default());
                        let name = normalize_name(src.get(i + 1..end).unwrap_or_default());
                        interp.push_expr(Expr::new(ExprKind::Variable(name), self.span(i, end)));
                        i = end;
                        chunk = i;
                        continue;
                    }
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ if depth == 0 && stop(b) => break,
                _ => {}
            }
            i += 1;
        }

        if quote.is_some() {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedString,
                "unterminated string",
                self.span(i, i),
            ));
        }
        interp.push_literal(src.get(chunk..i).unwrap_or_default());
        self.scanner.advance_to(i);
        interp.span = self.span_from(start);
        Ok(interp)
    }

    /// A quoted string at the current position, with simple escapes
    /// resolved. Hex escapes are kept as written.
    pub(crate) fn parse_quoted_string(&mut self) -> Result<Interpolation, ParseError> {
        let start = self.pos();
        let bytes = self.scanner.bytes();
        let src = self.src();
        let Some(end) = fragments::quoted_string(bytes, start) else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedString,
                "unterminated string",
                self.span(start, start + 1),
            ));
        };

        let close = end - 1;
        let mut interp = Interpolation::new(self.span(start, end));
        let mut text = String::new();
        let mut i = start + 1;
        while i < close {
            match bytes[i] {
                b'\\' => {
                    match fragments::escape(bytes, i) {
                        Some(esc_end) => {
                            let body = src.get(i + 1..esc_end).unwrap_or_default();
                            if body.as_bytes().first().is_some_and(u8::is_ascii_hexdigit) {
                                text.push_str(src.get(i..esc_end).unwrap_or_default());
                            } else {
                                text.push_str(body);
                            }
                            i = esc_end;
                        }
                        // Escaped newline: a line continuation.
                        None => i += 2,
                    }
                }
                b'#' if bytes.get(i + 1) == Some(&b'{') => {
                    interp.push_literal(&text);
                    text.clear();
                    self.scanner.advance_to(i);
                    let expr = self.parse_interpolant()?;
                    interp.push_expr(expr);
                    i = self.pos();
                }
                _ => {
                    let mut j = i + 1;
                    while j < close && !matches!(bytes[j], b'\\' | b'#') {
                        j += 1;
                    }
                    text.push_str(src.get(i..j).unwrap_or_default());
                    i = j;
                }
            }
        }
        interp.push_literal(&text);
        self.scanner.advance_to(end);
        Ok(interp)
    }
}
