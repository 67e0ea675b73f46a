//! Parameter lists of `@mixin`/`@function` and argument lists of calls.

use sable_ir::{Argument, ArgumentList, ExprKind, Parameter, ParameterList};
use sable_lexer_core::combinators::{exactly, exactly_char};
use sable_lexer_core::fragments;
use sable_lexer_core::sequence;

use super::expr::undelay;
use super::normalize_name;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `($a, $b: 1px, $rest...)`; the parentheses are optional.
    pub(crate) fn parse_parameters(&mut self) -> Result<ParameterList, ParseError> {
        let start = self.pos_after_ws();
        let mut params = Vec::new();
        if !self.scanner.lex_char(b'(') {
            return Ok(ParameterList {
                params,
                span: self.span(start, start),
            });
        }
        while !self.peek_char(b')') {
            params.push(self.parse_parameter()?);
            if !self.scanner.lex_char(b',') {
                break;
            }
        }
        if !self.scanner.lex_char(b')') {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \")\", was "));
        }
        Ok(ParameterList {
            params,
            span: self.span_from(start),
        })
    }

    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let start = self.pos_after_ws();
        let Some(text) = self.lex(fragments::variable) else {
            return Err(self.css_error(
                ParseErrorKind::InvalidCss,
                ": expected variable (e.g. $foo), was ",
            ));
        };
        let name = normalize_name(&text[1..]);
        let mut default = None;
        let mut is_rest = false;
        if self.scanner.lex_char(b':') {
            default = Some(undelay(self.parse_space_list()?));
        } else if self.lex(exactly(b"...")).is_some() {
            is_rest = true;
        }
        Ok(Parameter {
            name,
            default,
            is_rest,
            span: self.span_from(start),
        })
    }

    /// `(1px, $b: 2, $list...)`; the opening parenthesis is required.
    pub(crate) fn parse_arguments(&mut self) -> Result<ArgumentList, ParseError> {
        let start = self.pos_after_ws();
        self.expect_char(b'(', ParseErrorKind::InvalidCss)?;
        let mut list = ArgumentList::new(self.point());
        while !self.peek_char(b')') {
            list.args.push(self.parse_argument()?);
            if !self.scanner.lex_char(b',') {
                break;
            }
        }
        if !self.scanner.lex_char(b')') {
            return Err(self.css_error(
                ParseErrorKind::ExpectedExpression,
                ": expected \")\", was ",
            ));
        }
        list.span = self.span_from(start);
        Ok(list)
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        if matches!(self.scanner.peek_byte_after_ws(), Some(b',' | b'{' | b';')) {
            return Err(self.css_error(
                ParseErrorKind::ExpectedExpression,
                ": expected expression (e.g. 1px, bold), was ",
            ));
        }

        let keyword = sequence!(
            fragments::variable,
            fragments::optional_css_whitespace,
            exactly_char(b':'),
        );
        if self.peek(keyword) {
            let text = self.lex(fragments::variable).unwrap_or("$");
            self.scanner.lex_char(b':');
            let name = normalize_name(&text[1..]);
            let value = self.parse_space_list()?;
            return Ok(Argument::named(name, value));
        }

        let value = self.parse_space_list()?;
        let mut arg = Argument::positional(value);
        if self.lex(exactly(b"...")).is_some() {
            arg.is_rest = true;
            arg.is_keyword_rest = matches!(arg.value.kind, ExprKind::Map(_));
        }
        Ok(arg)
    }
}
