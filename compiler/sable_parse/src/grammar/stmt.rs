//! Blocks, style rules, declarations and at-rules.
//!
//! The statement kind is decided by scanning ahead to the first `{`, `;` or
//! `}` outside brackets: a `{` means a style rule unless the text reads as a
//! nested property (`font: {`, `margin: 0 {`); anything else is a
//! declaration.

use std::sync::Arc;

use sable_ir::{
    ArgumentList, CallableDef, ContentBlock, Expr, ExprKind, IfClause, ImportTarget,
    Interpolation, SelectorSource, Stmt, StmtKind,
};
use sable_lexer_core::combinators::{
    byte_if, exactly, exactly_char, negate, one_plus, optional,
};
use sable_lexer_core::fragments::{self, is_name_char, is_space};
use sable_lexer_core::{alternatives, sequence, Matcher};

use super::interpolation::{append, trim_start};
use super::normalize_name;
use crate::{ParseError, ParseErrorKind, Parser, Scope};

/// What the scan ahead of a statement found.
#[derive(Copy, Clone, Debug)]
struct Lookahead {
    /// `{`, `;` or `}`, or `None` at end of input.
    terminator: Option<u8>,
    has_interpolants: bool,
}

fn property_name(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(alternatives!(fragments::interpolant, fragments::name_chars)).run(src, pos)
}

/// `name:` followed by whitespace or `{`: a property with nested children.
fn nested_property(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        optional(exactly_char(b'*')),
        property_name,
        fragments::optional_css_whitespace,
        exactly_char(b':'),
        alternatives!(byte_if(is_space), exactly_char(b'{')),
    )
    .run(src, pos)
}

fn else_keyword(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b"@else"), negate(byte_if(is_name_char))).run(src, pos)
}

fn is_plain_css_url(url: &str) -> bool {
    url.ends_with(".css")
        || url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
}

/// Raw bodies that regular parsing would misread.
fn stop_at_block(b: u8) -> bool {
    matches!(b, b'{' | b';' | b'}')
}

fn stop_at_semicolon(b: u8) -> bool {
    matches!(b, b';' | b'}')
}

fn stop_at_brace(b: u8) -> bool {
    b == b'{'
}

fn stop_at_extend_end(b: u8) -> bool {
    matches!(b, b'!' | b';' | b'}')
}

enum ImportPath {
    Quoted { url: String, raw: String, start: usize },
    Url(Interpolation),
}

impl Parser<'_> {
    /// Statements up to a closing `}` or the end of input.
    pub(crate) fn parse_block_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        loop {
            self.skip_silent(&mut body)?;
            if self.scanner.eat_char(b';') {
                continue;
            }
            if matches!(self.scanner.peek_byte(), None | Some(b'}')) {
                break;
            }

            let (stmt, has_block) = self.parse_statement()?;
            body.extend(stmt);
            if has_block {
                continue;
            }

            self.skip_silent(&mut body)?;
            if self.scanner.eat_char(b';') {
                continue;
            }
            if !matches!(self.scanner.peek_byte(), None | Some(b'}')) {
                let middle = if self.context.is_root() {
                    ": expected \";\", was "
                } else {
                    ": expected \"}\", was "
                };
                return Err(self.css_error(ParseErrorKind::InvalidCss, middle));
            }
        }
        Ok(body)
    }

    /// Skip whitespace and `//` comments, keeping `/* */` comments as
    /// statements.
    fn skip_silent(&mut self, out: &mut Vec<Stmt>) -> Result<(), ParseError> {
        loop {
            self.scanner.eat(fragments::spaces);
            if self.scanner.eat(fragments::line_comment).is_some() {
                continue;
            }
            if self.scanner.peek_raw(exactly(b"/*")).is_none() {
                return Ok(());
            }
            let start = self.pos();
            let Some(text) = self.scanner.eat(fragments::block_comment) else {
                return Err(self.error(ParseErrorKind::UnterminatedComment, "unterminated comment"));
            };
            out.push(Stmt::new(
                StmtKind::Comment(text.to_owned()),
                self.span_from(start),
            ));
        }
    }

    /// One statement, and whether it ended with a block.
    fn parse_statement(&mut self) -> Result<(Option<Stmt>, bool), ParseError> {
        tracing::trace!(pos = self.pos(), scope = ?self.context.current(), "parse_statement");
        match self.scanner.peek_byte() {
            Some(b'$') => return Ok((Some(self.parse_variable_declaration()?), false)),
            Some(b'@') => return self.parse_at_rule(),
            _ => {}
        }

        if self.context.in_function() && !self.context.in_rule() {
            return Err(self.error(
                ParseErrorKind::DirectiveNotAllowed,
                "Functions can only contain variable declarations and control directives.",
            ));
        }

        let custom = self.scanner.peek_raw(exactly(b"--")).is_some();
        let la = self.lookahead();
        let nested = self.scanner.peek_raw(nested_property).is_some();
        if !custom && la.terminator == Some(b'{') && !nested {
            let rule = self.parse_style_rule(la)?;
            return Ok((Some(rule), true));
        }

        if !self.context.allows_declarations() {
            if la.terminator == Some(b'{') {
                return Err(self.error(
                    ParseErrorKind::DirectiveNotAllowed,
                    "Properties are only allowed within rules, directives, mixin includes, or other properties.",
                ));
            }
            return Err(self.css_error(
                ParseErrorKind::InvalidCss,
                ": expected 1 selector or at-rule, was ",
            ));
        }
        let (decl, has_block) = self.parse_declaration()?;
        Ok((Some(decl), has_block))
    }

    /// Scan to the first `{`, `;` or `}` at bracket depth zero.
    fn lookahead(&self) -> Lookahead {
        let bytes = self.scanner.bytes();
        let mut has_interpolants = false;
        let mut depth = 0usize;
        let mut i = self.pos();
        while i < bytes.len() {
            match bytes[i] {
                b'"' | b'\'' => {
                    let end = fragments::quoted_string(bytes, i).unwrap_or(bytes.len());
                    has_interpolants |= memchr::memmem::find(&bytes[i..end], b"#{").is_some();
                    i = end;
                    continue;
                }
                b'\\' => i += 1,
                b'#' if bytes.get(i + 1) == Some(&b'{') => {
                    has_interpolants = true;
                    i = fragments::interpolant(bytes, i).unwrap_or(bytes.len());
                    continue;
                }
                b'/' if matches!(bytes.get(i + 1), Some(b'*' | b'/')) => {
                    i = fragments::comment(bytes, i).unwrap_or(bytes.len());
                    continue;
                }
                b'u' | b'U' if fragments::url_prefix(bytes, i).is_some() => {
                    i = memchr::memchr(b')', &bytes[i..]).map_or(bytes.len(), |off| i + off + 1);
                    continue;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b @ (b'{' | b';' | b'}') if depth == 0 => {
                    return Lookahead {
                        terminator: Some(b),
                        has_interpolants,
                    };
                }
                _ => {}
            }
            i += 1;
        }
        Lookahead {
            terminator: None,
            has_interpolants,
        }
    }

    /// `{`, a block of statements under `scope`, then `}`.
    fn parse_braced(&mut self, scope: Scope) -> Result<Vec<Stmt>, ParseError> {
        self.expect_char(b'{', ParseErrorKind::InvalidCss)?;
        let body = self.in_scope(scope, Self::parse_block_body)?;
        self.expect_char(b'}', ParseErrorKind::UnclosedDelimiter)?;
        Ok(body)
    }

    fn parse_style_rule(&mut self, la: Lookahead) -> Result<Stmt, ParseError> {
        let start = self.pos();
        let selector = if la.has_interpolants {
            let mut interp = self.parse_raw_interpolation(stop_at_brace, false)?;
            interp.trim_end();
            SelectorSource::Interpolated(interp)
        } else {
            let allow = !self.context.is_root();
            let previous = self.context.set_allow_parent(allow);
            let list = self.parse_selector_list();
            self.context.set_allow_parent(previous);
            SelectorSource::Parsed(list?)
        };
        let body = self.parse_braced(Scope::Rule)?;
        Ok(Stmt::new(
            StmtKind::StyleRule { selector, body },
            self.span_from(start),
        ))
    }

    /// Property name made of name characters and interpolation, with an
    /// optional `*` hack prefix.
    fn parse_property_name(&mut self) -> Result<Interpolation, ParseError> {
        let start = self.pos();
        let mut name = Interpolation::new(self.point());
        if self.scanner.eat_char(b'*') {
            name.push_literal("*");
        }
        loop {
            if self.scanner.peek_raw(fragments::interpolant).is_some() {
                let expr = self.parse_interpolant()?;
                name.push_expr(expr);
            } else if let Some(text) = self.scanner.eat(fragments::name_chars) {
                name.push_literal(text);
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \"}\", was "));
        }
        name.span = self.span_from(start);
        Ok(name)
    }

    fn parse_declaration(&mut self) -> Result<(Stmt, bool), ParseError> {
        let start = self.pos();
        let is_custom_property = self.scanner.rest().starts_with("--");
        let name = self.parse_property_name()?;
        if !self.scanner.lex_char(b':') {
            return Err(self.error(
                ParseErrorKind::InvalidDeclaration,
                format!("property \"{name}\" must be followed by a ':'"),
            ));
        }

        if is_custom_property {
            let mut value = self.parse_raw_interpolation(stop_at_semicolon, false)?;
            trim_start(&mut value);
            value.trim_end();
            if value.is_empty() {
                return Err(self.error(
                    ParseErrorKind::InvalidDeclaration,
                    "Custom property values may not be empty.",
                ));
            }
            let span = value.span;
            let decl = StmtKind::Declaration {
                name,
                value: Some(Expr::new(ExprKind::Special(value), span)),
                body: Vec::new(),
                is_custom_property: true,
            };
            return Ok((Stmt::new(decl, self.span_from(start)), false));
        }

        let value = if self.peek_char(b'{') {
            None
        } else {
            if matches!(self.scanner.peek_byte_after_ws(), Some(b';' | b'}') | None) {
                return Err(self.css_error(
                    ParseErrorKind::ExpectedExpression,
                    ": expected expression (e.g. 1px, bold), was ",
                ));
            }
            Some(self.parse_list(true)?)
        };

        let mut body = Vec::new();
        let has_block = self.peek_char(b'{');
        if has_block {
            body = self.parse_braced(Scope::Properties)?;
        }
        let decl = StmtKind::Declaration {
            name,
            value,
            body,
            is_custom_property: false,
        };
        Ok((Stmt::new(decl, self.span_from(start)), has_block))
    }

    /// `$name: value [!default] [!global]`
    fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start = self.pos();
        let Some(text) = self.scanner.eat(fragments::variable) else {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \":\", was "));
        };
        let name = normalize_name(&text[1..]);
        if !self.scanner.lex_char(b':') {
            return Err(self.error(
                ParseErrorKind::InvalidDeclaration,
                format!("expected ':' after ${name} in assignment statement"),
            ));
        }
        if matches!(self.scanner.peek_byte_after_ws(), Some(b';' | b'}') | None) {
            return Err(self.css_error(
                ParseErrorKind::ExpectedExpression,
                ": expected expression (e.g. 1px, bold), was ",
            ));
        }
        let value = self.parse_list(false)?;

        let mut is_default = false;
        let mut is_global = false;
        loop {
            if self.lex(fragments::default_flag).is_some() {
                is_default = true;
            } else if self.lex(fragments::global_flag).is_some() {
                is_global = true;
            } else {
                break;
            }
        }
        Ok(Stmt::new(
            StmtKind::Variable {
                name,
                value,
                is_default,
                is_global,
            },
            self.span_from(start),
        ))
    }

    fn parse_at_rule(&mut self) -> Result<(Option<Stmt>, bool), ParseError> {
        let start = self.pos();
        let Some(keyword) = self.scanner.eat(fragments::at_keyword) else {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected identifier, was "));
        };
        let name = &keyword[1..];
        tracing::trace!(pos = start, name, "parse_at_rule");

        if self.context.in_function()
            && !self.context.in_rule()
            && !matches!(
                name,
                "if" | "else" | "each" | "for" | "while" | "return" | "warn" | "debug" | "error"
            )
        {
            return Err(self.error_at(
                ParseErrorKind::DirectiveNotAllowed,
                "Functions can only contain variable declarations and control directives.",
                start,
            ));
        }

        let stmt = match name {
            "import" => return self.parse_import(start).map(|s| (Some(s), false)),
            "mixin" | "function" => self.parse_definition(name, start)?,
            "include" => return self.parse_include(start).map(|(s, b)| (Some(s), b)),
            "content" => {
                if !self.context.in_mixin() {
                    return Err(self.error_at(
                        ParseErrorKind::DirectiveNotAllowed,
                        "@content may only be used within a mixin.",
                        start,
                    ));
                }
                return Ok((Some(Stmt::new(StmtKind::Content, self.span_from(start))), false));
            }
            "return" => {
                if !self.context.in_function() {
                    return Err(self.error_at(
                        ParseErrorKind::DirectiveNotAllowed,
                        "@return may only be used within a function.",
                        start,
                    ));
                }
                let value = self.parse_list(false)?;
                return Ok((Some(Stmt::new(StmtKind::Return(value), self.span_from(start))), false));
            }
            "if" => self.parse_if(start)?,
            "else" => {
                return Err(self.error_at(
                    ParseErrorKind::InvalidCss,
                    "Invalid CSS: @else must come after @if",
                    start,
                ));
            }
            "each" => self.parse_each(start)?,
            "for" => self.parse_for(start)?,
            "while" => {
                let condition = self.parse_list(false)?;
                let body = self.parse_braced(Scope::Control)?;
                Stmt::new(StmtKind::While { condition, body }, self.span_from(start))
            }
            "extend" => return self.parse_extend(start).map(|s| (Some(s), false)),
            "warn" | "debug" | "error" => {
                let value = self.parse_list(false)?;
                let kind = match name {
                    "warn" => StmtKind::Warn(value),
                    "debug" => StmtKind::Debug(value),
                    _ => StmtKind::Error(value),
                };
                return Ok((Some(Stmt::new(kind, self.span_from(start))), false));
            }
            "media" => {
                self.scanner.skip_ws();
                let mut query = self.parse_raw_interpolation(stop_at_block, true)?;
                query.trim_end();
                if query.is_empty() {
                    return Err(self.css_error(
                        ParseErrorKind::InvalidCss,
                        ": expected media query list, was ",
                    ));
                }
                let body = self.parse_braced(Scope::Media)?;
                Stmt::new(StmtKind::Media { query, body }, self.span_from(start))
            }
            "charset" => {
                self.scanner.skip_ws();
                self.parse_raw_interpolation(stop_at_block, false)?;
                return Ok((None, false));
            }
            _ => return self.parse_generic_at_rule(name, start),
        };
        Ok((Some(stmt), true))
    }

    fn parse_definition(&mut self, kind: &str, start: usize) -> Result<Stmt, ParseError> {
        let is_function = kind == "function";
        if !self.context.allows_definitions() {
            let what = if is_function { "Functions" } else { "Mixins" };
            return Err(self.error_at(
                ParseErrorKind::DirectiveNotAllowed,
                format!("{what} may not be defined within control directives or other mixins."),
                start,
            ));
        }
        let Some(raw_name) = self.lex(fragments::identifier) else {
            return Err(self.error(
                ParseErrorKind::InvalidCss,
                format!("invalid name in @{kind} definition"),
            ));
        };
        let name = normalize_name(raw_name);
        if is_function && matches!(name.as_str(), "and" | "or" | "not") {
            return Err(self.error_at(
                ParseErrorKind::InvalidCss,
                format!("Invalid function name \"{name}\"."),
                start,
            ));
        }

        let params = self.parse_parameters()?;
        let scope = if is_function {
            Scope::Function
        } else {
            Scope::Mixin
        };
        let body = self.parse_braced(scope)?;
        let span = self.span_from(start);
        let def = Arc::new(CallableDef {
            name,
            params,
            body,
            span,
        });
        let kind = if is_function {
            StmtKind::Function(def)
        } else {
            StmtKind::Mixin(def)
        };
        Ok(Stmt::new(kind, span))
    }

    fn parse_include(&mut self, start: usize) -> Result<(Stmt, bool), ParseError> {
        let Some(raw_name) = self.lex(fragments::identifier) else {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected identifier, was "));
        };
        let name = normalize_name(raw_name);
        let args = if self.peek_char(b'(') {
            self.parse_arguments()?
        } else {
            ArgumentList::new(self.point())
        };

        let mut content = None;
        if self.peek_char(b'{') {
            let content_start = self.pos_after_ws();
            let body = self.parse_braced(Scope::Include)?;
            content = Some(Arc::new(ContentBlock {
                body,
                span: self.span_from(content_start),
            }));
        }
        let has_block = content.is_some();
        Ok((
            Stmt::new(
                StmtKind::Include {
                    name,
                    args,
                    content,
                },
                self.span_from(start),
            ),
            has_block,
        ))
    }

    fn parse_if(&mut self, start: usize) -> Result<Stmt, ParseError> {
        let condition = self.parse_list(false)?;
        let body = self.parse_braced(Scope::Control)?;
        let mut clauses = vec![IfClause { condition, body }];
        let mut else_body = None;

        loop {
            let saved = self.scanner.checkpoint();
            self.scanner.skip_ws();
            if self.scanner.eat(else_keyword).is_none() {
                self.scanner.restore(saved);
                break;
            }
            if self.lex(fragments::keyword(b"if")).is_some() {
                let condition = self.parse_list(false)?;
                let body = self.parse_braced(Scope::Control)?;
                clauses.push(IfClause { condition, body });
            } else {
                else_body = Some(self.parse_braced(Scope::Control)?);
                break;
            }
        }
        Ok(Stmt::new(
            StmtKind::If { clauses, else_body },
            self.span_from(start),
        ))
    }

    /// `@each $a, $b in <list> { ... }`
    fn parse_each(&mut self, start: usize) -> Result<Stmt, ParseError> {
        let mut variables = Vec::new();
        loop {
            let Some(text) = self.lex(fragments::variable) else {
                return Err(self.css_error(
                    ParseErrorKind::InvalidCss,
                    ": expected variable (e.g. $foo), was ",
                ));
            };
            variables.push(normalize_name(&text[1..]));
            if !self.scanner.lex_char(b',') {
                break;
            }
        }
        if self.lex(fragments::keyword(b"in")).is_none() {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \"in\", was "));
        }
        let list = self.parse_list(false)?;
        let body = self.parse_braced(Scope::Control)?;
        Ok(Stmt::new(
            StmtKind::Each {
                variables,
                list,
                body,
            },
            self.span_from(start),
        ))
    }

    /// `@for $i from <a> through|to <b> { ... }`
    fn parse_for(&mut self, start: usize) -> Result<Stmt, ParseError> {
        let Some(text) = self.lex(fragments::variable) else {
            return Err(self.css_error(
                ParseErrorKind::InvalidCss,
                ": expected variable (e.g. $foo), was ",
            ));
        };
        let variable = normalize_name(&text[1..]);
        if self.lex(fragments::keyword(b"from")).is_none() {
            return Err(self.css_error(ParseErrorKind::InvalidCss, ": expected \"from\", was "));
        }
        let from = super::expr::undelay(self.parse_additive()?);
        let inclusive = if self.lex(fragments::keyword(b"through")).is_some() {
            true
        } else if self.lex(fragments::keyword(b"to")).is_some() {
            false
        } else {
            return Err(self.css_error(
                ParseErrorKind::InvalidCss,
                ": expected \"through\" or \"to\", was ",
            ));
        };
        let to = super::expr::undelay(self.parse_additive()?);
        let body = self.parse_braced(Scope::Control)?;
        Ok(Stmt::new(
            StmtKind::For {
                variable,
                from,
                to,
                inclusive,
                body,
            },
            self.span_from(start),
        ))
    }

    fn parse_extend(&mut self, start: usize) -> Result<Stmt, ParseError> {
        if !self.context.in_rule() {
            return Err(self.error_at(
                ParseErrorKind::DirectiveNotAllowed,
                "Extend directives may only be used within rules.",
                start,
            ));
        }
        self.scanner.skip_ws();
        let selector = if self.lookahead().has_interpolants {
            let mut interp = self.parse_raw_interpolation(stop_at_extend_end, false)?;
            interp.trim_end();
            SelectorSource::Interpolated(interp)
        } else {
            let previous = self.context.set_allow_parent(false);
            let list = self.parse_selector_list();
            self.context.set_allow_parent(previous);
            SelectorSource::Parsed(list?)
        };
        let is_optional = self.lex(fragments::optional_flag).is_some();
        Ok(Stmt::new(
            StmtKind::Extend {
                selector,
                is_optional,
            },
            self.span_from(start),
        ))
    }

    /// `@import "a", "b.css", url(c) screen;`
    fn parse_import(&mut self, start: usize) -> Result<Stmt, ParseError> {
        if self.context.in_mixin() || self.context.in_control() {
            return Err(self.error_at(
                ParseErrorKind::DirectiveNotAllowed,
                "Import directives may not be used within control directives or mixins.",
                start,
            ));
        }

        let mut paths = Vec::new();
        loop {
            self.scanner.skip_ws();
            let path_start = self.pos();
            if let Some(text) = self.scanner.eat(fragments::quoted_string) {
                paths.push(ImportPath::Quoted {
                    url: text[1..text.len() - 1].to_owned(),
                    raw: text.to_owned(),
                    start: path_start,
                });
            } else if self.scanner.peek_raw(fragments::url_prefix).is_some() {
                self.scanner.advance_to(path_start + 4);
                let body = self.parse_raw_interpolation(|_| false, false)?;
                if !self.scanner.eat_char(b')') {
                    return Err(self.css_error(
                        ParseErrorKind::UnclosedDelimiter,
                        ": expected \")\", was ",
                    ));
                }
                let mut url = Interpolation::new(self.span_from(path_start));
                url.push_literal(self.scanner.slice(path_start, path_start + 4));
                append(&mut url, body);
                url.push_literal(")");
                paths.push(ImportPath::Url(url));
            } else {
                let message = if paths.is_empty() {
                    "@import directive requires a url or quoted path"
                } else {
                    "expecting another url or quoted path in @import list"
                };
                return Err(self.error(ParseErrorKind::InvalidCss, message));
            }
            if !self.scanner.lex_char(b',') {
                break;
            }
        }

        self.scanner.skip_ws();
        let media = if matches!(self.scanner.peek_byte(), None | Some(b';' | b'}')) {
            None
        } else {
            let mut query = self.parse_raw_interpolation(stop_at_semicolon, true)?;
            query.trim_end();
            Some(query)
        };

        let targets = paths
            .into_iter()
            .map(|path| {
                let mut target = match path {
                    ImportPath::Quoted { url, raw, start } => {
                        let span = self.span(start, start + raw.len());
                        if media.is_none() && !is_plain_css_url(&url) {
                            return ImportTarget::Dynamic { url, span };
                        }
                        Interpolation::literal(raw, span)
                    }
                    ImportPath::Url(url) => url,
                };
                if let Some(query) = &media {
                    target.push_literal(" ");
                    append(&mut target, query.clone());
                }
                ImportTarget::Static(target)
            })
            .collect();
        Ok(Stmt::new(StmtKind::Import(targets), self.span_from(start)))
    }

    /// Any other at-rule: raw prelude, optional block.
    fn parse_generic_at_rule(
        &mut self,
        name: &str,
        start: usize,
    ) -> Result<(Option<Stmt>, bool), ParseError> {
        self.scanner.skip_ws();
        let mut prelude = self.parse_raw_interpolation(stop_at_block, false)?;
        prelude.trim_end();
        let body = if self.peek_char(b'{') {
            Some(self.parse_braced(Scope::AtRule)?)
        } else {
            None
        };
        let has_block = body.is_some();
        let stmt = Stmt::new(
            StmtKind::AtRule {
                name: name.to_owned(),
                prelude,
                body,
            },
            self.span_from(start),
        );
        Ok((Some(stmt), has_block))
    }
}
