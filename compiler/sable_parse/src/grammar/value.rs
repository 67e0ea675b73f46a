//! Atoms: literals, variables, calls, parentheses, maps and bracketed lists.

use sable_ir::selector::unvendor;
use sable_ir::{Expr, ExprKind, Interpolation, ListSeparator, UnaryOp};
use sable_lexer_core::combinators::exactly_char;
use sable_lexer_core::fragments;
use sable_lexer_core::sequence;

use super::expr::undelay;
use super::interpolation::append;
use crate::{ParseError, ParseErrorKind, Parser};

/// Name characters and at least one `#{}`: `foo-#{$x}`, `#{$a}b`.
pub(crate) fn interpolated_ident(src: &[u8], pos: usize) -> Option<usize> {
    let mut end = pos;
    let mut seen = false;
    loop {
        if let Some(e) = fragments::interpolant(src, end) {
            seen = true;
            end = e;
        } else if let Some(e) = fragments::name_chars(src, end) {
            end = e;
        } else {
            break;
        }
    }
    seen.then_some(end)
}

/// Functions whose arguments are passed through as raw CSS.
fn is_special_function(name: &str) -> bool {
    matches!(
        unvendor(&name.to_ascii_lowercase()),
        "calc" | "element" | "expression"
    )
}

fn hex_channel(digits: &str) -> f64 {
    let value = u8::from_str_radix(digits, 16).unwrap_or(0);
    if digits.len() == 1 {
        f64::from(value * 17)
    } else {
        f64::from(value)
    }
}

impl Parser<'_> {
    pub(crate) fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_factor_inner)
    }

    fn parse_factor_inner(&mut self) -> Result<Expr, ParseError> {
        self.scanner.skip_ws();
        let start = self.pos();
        tracing::trace!(pos = start, "parse_factor");

        match self.scanner.peek_byte() {
            Some(b'(') => return self.parse_paren(),
            Some(b'[') => return self.parse_bracket_list(),
            _ => {}
        }
        if let Some(special) = self.parse_special_function()? {
            return Ok(special);
        }
        if let Some(call) = self.parse_function_call()? {
            return Ok(call);
        }
        if self.scanner.eat(fragments::keyword(b"not")).is_some() {
            return self.finish_unary(UnaryOp::Not, start);
        }
        let names_follow = self.scanner.peek_raw(fragments::identifier).is_some()
            || self.scanner.peek_raw(interpolated_ident).is_some();
        if !names_follow {
            let op = match self.scanner.peek_byte() {
                Some(b'+') => Some(UnaryOp::Plus),
                Some(b'-') => Some(UnaryOp::Minus),
                Some(b'/') => Some(UnaryOp::Slash),
                _ => None,
            };
            if let Some(op) = op {
                // `-2`, `+.5`: a signed literal, not an operator.
                let signed_number = op != UnaryOp::Slash
                    && self.scanner.peek_raw(fragments::number).is_some();
                if !signed_number {
                    self.scanner.advance_to(start + 1);
                    return self.finish_unary(op, start);
                }
            }
        }
        self.parse_value()
    }

    fn finish_unary(&mut self, op: UnaryOp, start: usize) -> Result<Expr, ParseError> {
        let operand = self.parse_factor()?;
        let delayed = operand.delayed;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        )
        .with_delayed(delayed))
    }

    /// `(` expression or map `)`.
    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos();
        self.scanner.eat_char(b'(');
        let inner = self.parse_map_or_list()?;
        if !self.scanner.lex_char(b')') {
            return Err(self.error(ParseErrorKind::UnclosedDelimiter, "unclosed parenthesis"));
        }
        let span = self.span_from(start);
        Ok(match inner.kind {
            ExprKind::Map(_) => Expr { span, ..inner },
            _ => Expr::new(ExprKind::Paren(Box::new(inner)), span),
        })
    }

    fn parse_map_or_list(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos_after_ws();
        let key = self.parse_list(false)?;
        if !self.scanner.lex_char(b':') {
            return Ok(key);
        }
        if matches!(
            key.kind,
            ExprKind::List {
                separator: ListSeparator::Comma,
                ..
            }
        ) {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \")\", was "));
        }

        let value = undelay(self.parse_space_list()?);
        let mut pairs = vec![(key, value)];
        while self.scanner.lex_char(b',') {
            if self.peek_char(b')') {
                break;
            }
            let key = undelay(self.parse_space_list()?);
            if !self.scanner.lex_char(b':') {
                return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \":\", was "));
            }
            let value = undelay(self.parse_space_list()?);
            pairs.push((key, value));
        }
        Ok(Expr::new(ExprKind::Map(pairs), self.span_from(start)))
    }

    /// `[a b]`, `[a, b]` or `[]`.
    fn parse_bracket_list(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos();
        self.scanner.eat_char(b'[');
        let mut items = Vec::new();
        let mut separator = ListSeparator::Space;

        if !self.peek_char(b']') {
            let first = undelay(self.parse_space_list()?);
            if self.peek_char(b',') {
                separator = ListSeparator::Comma;
                items.push(first);
                while self.scanner.lex_char(b',') {
                    if self.peek_char(b']') {
                        break;
                    }
                    items.push(undelay(self.parse_space_list()?));
                }
            } else {
                match first.kind {
                    ExprKind::List {
                        items: inner,
                        separator: ListSeparator::Space,
                        bracketed: false,
                    } => items = inner,
                    kind => items.push(Expr {
                        kind,
                        ..first
                    }),
                }
            }
        }

        if !self.scanner.lex_char(b']') {
            return Err(self.css_error(ParseErrorKind::UnclosedDelimiter, ": expected \"]\", was "));
        }
        Ok(Expr::new(
            ExprKind::List {
                items,
                separator,
                bracketed: true,
            },
            self.span_from(start),
        ))
    }

    /// `url(raw)`, `calc(...)` and friends, kept as raw CSS with
    /// interpolation resolved.
    fn parse_special_function(&mut self) -> Result<Option<Expr>, ParseError> {
        let start = self.pos();
        let bytes = self.scanner.bytes();
        let Some(name_end) = self.scanner.peek_raw(fragments::identifier) else {
            return Ok(None);
        };
        if bytes.get(name_end) != Some(&b'(') {
            return Ok(None);
        }
        let name = self.scanner.slice(start, name_end);
        if name.eq_ignore_ascii_case("url") {
            let body_start = fragments::optional_spaces(bytes, name_end + 1).unwrap_or(name_end + 1);
            if matches!(bytes.get(body_start), Some(b'"' | b'\'')) {
                return Ok(None);
            }
        } else if !is_special_function(name) {
            return Ok(None);
        }

        self.scanner.advance_to(name_end + 1);
        let body = self.parse_raw_interpolation(|_| false, false)?;
        if !self.scanner.eat_char(b')') {
            return Err(self.css_error(ParseErrorKind::UnclosedDelimiter, ": expected \")\", was "));
        }
        let span = self.span_from(start);
        let mut interp = Interpolation::new(span);
        interp.push_literal(name);
        interp.push_literal("(");
        append(&mut interp, body);
        interp.push_literal(")");
        Ok(Some(Expr::new(ExprKind::Special(interp), span)))
    }

    /// `name(args)`, with no space before the parenthesis.
    fn parse_function_call(&mut self) -> Result<Option<Expr>, ParseError> {
        let start = self.pos();
        let Some(name_end) = self.scanner.peek_raw(fragments::identifier) else {
            return Ok(None);
        };
        if self.scanner.bytes().get(name_end) != Some(&b'(') {
            return Ok(None);
        }
        let name = self.scanner.slice(start, name_end).to_owned();
        if name.eq_ignore_ascii_case("not") {
            return Ok(None);
        }
        self.scanner.advance_to(name_end);
        let args = self.parse_arguments()?;
        Ok(Some(Expr::new(
            ExprKind::Call { name, args },
            self.span_from(start),
        )))
    }

    fn parse_value(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos();
        let first = self.scanner.peek_byte();

        if first == Some(b'&') {
            self.scanner.eat_char(b'&');
            return Ok(Expr::new(ExprKind::ParentRef, self.span_from(start)));
        }
        if self.scanner.eat(fragments::kwd_important).is_some() {
            let span = self.span_from(start);
            return Ok(Expr::new(
                ExprKind::Special(Interpolation::literal("!important", span)),
                span,
            ));
        }
        if matches!(first, Some(b'"' | b'\'')) {
            let string = self.parse_quoted_string()?;
            return Ok(Expr::new(ExprKind::String(string), self.span_from(start)));
        }
        if self.scanner.peek_raw(interpolated_ident).is_some() {
            return self.parse_interpolated_ident();
        }
        if self.scanner.eat(fragments::keyword(b"true")).is_some() {
            return Ok(Expr::new(ExprKind::Boolean(true), self.span_from(start)));
        }
        if self.scanner.eat(fragments::keyword(b"false")).is_some() {
            return Ok(Expr::new(ExprKind::Boolean(false), self.span_from(start)));
        }
        if self.scanner.eat(fragments::keyword(b"null")).is_some() {
            return Ok(Expr::new(ExprKind::Null, self.span_from(start)));
        }
        if let Some(text) = self.scanner.eat(fragments::percentage) {
            let number = &text[..text.len() - 1];
            return self.number_literal(number, "%", start);
        }
        if first == Some(b'#') {
            if let Some(color) = self.parse_hex_color()? {
                return Ok(color);
            }
            if let Some(text) = self.scanner.eat(sequence!(exactly_char(b'#'), fragments::name_chars)) {
                return Ok(Expr::new(ExprKind::Ident(text.to_owned()), self.span_from(start))
                    .with_delayed(true));
            }
        }
        if let Some(text) = self.scanner.eat(fragments::dimension) {
            let split = fragments::number(text.as_bytes(), 0).unwrap_or(0);
            return self.number_literal(&text[..split], &text[split..], start);
        }
        if let Some(text) = self.scanner.eat(fragments::number) {
            return self.number_literal(text, "", start);
        }
        if let Some(text) = self.scanner.eat(fragments::identifier) {
            return Ok(Expr::new(ExprKind::Ident(text.to_owned()), self.span_from(start))
                .with_delayed(true));
        }
        if let Some(text) = self.scanner.eat(fragments::variable) {
            let name = super::normalize_name(&text[1..]);
            return Ok(Expr::new(ExprKind::Variable(name), self.span_from(start)));
        }
        Err(self.css_error(
            ParseErrorKind::ExpectedExpression,
            ": expected expression (e.g. 1px, bold), was ",
        ))
    }

    fn number_literal(&self, number: &str, unit: &str, start: usize) -> Result<Expr, ParseError> {
        let value: f64 = number.parse().map_err(|_| {
            self.error_at(
                ParseErrorKind::ExpectedExpression,
                format!("invalid number \"{number}\""),
                start,
            )
        })?;
        Ok(Expr::new(
            ExprKind::Number {
                value,
                unit: unit.to_owned(),
            },
            self.span_from(start),
        )
        .with_delayed(true))
    }

    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Other lengths are an
    /// identifier when the text after `#` is one, an error otherwise.
    fn parse_hex_color(&mut self) -> Result<Option<Expr>, ParseError> {
        let start = self.pos();
        let Some(end) = self.scanner.peek_raw(fragments::hex_color) else {
            return Ok(None);
        };
        let text = self.scanner.slice(start, end);
        let digits = &text[1..];
        let (r, g, b, a) = match digits.len() {
            3 | 4 => {
                let alpha = digits.get(3..4).map_or(1.0, |d| hex_channel(d) / 255.0);
                (
                    hex_channel(&digits[0..1]),
                    hex_channel(&digits[1..2]),
                    hex_channel(&digits[2..3]),
                    alpha,
                )
            }
            6 | 8 => {
                let alpha = digits.get(6..8).map_or(1.0, |d| hex_channel(d) / 255.0);
                (
                    hex_channel(&digits[0..2]),
                    hex_channel(&digits[2..4]),
                    hex_channel(&digits[4..6]),
                    alpha,
                )
            }
            _ => {
                if fragments::identifier(self.scanner.bytes(), start + 1).is_some() {
                    return Ok(None);
                }
                return Err(self.error(
                    ParseErrorKind::InvalidHexColor,
                    format!("Invalid hex color \"{text}\""),
                ));
            }
        };
        self.scanner.advance_to(end);
        Ok(Some(Expr::new(
            ExprKind::Color {
                r,
                g,
                b,
                a,
                original: text.to_owned(),
            },
            self.span_from(start),
        )))
    }

    /// Unquoted text with `#{}` in it.
    fn parse_interpolated_ident(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos();
        let end = self
            .scanner
            .peek_raw(interpolated_ident)
            .unwrap_or(start);
        let mut interp = Interpolation::new(self.point());
        while self.pos() < end {
            if self.scanner.peek_raw(fragments::interpolant).is_some() {
                let expr = self.parse_interpolant()?;
                interp.push_expr(expr);
            } else if let Some(text) = self.scanner.eat(fragments::name_chars) {
                interp.push_literal(text);
            } else {
                break;
            }
        }
        let span = self.span_from(start);
        interp.span = span;
        Ok(Expr::new(ExprKind::Interpolated(interp), span))
    }
}

