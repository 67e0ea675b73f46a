//! Selector grammar.
//!
//! ```text
//! list     = complex ("," complex)*
//! complex  = (compound | ">" | "+" | "~")+      adjacency is descendant
//! compound = ["&" suffix?] simple*
//! simple   = type | "*" | "." ident | "#" name | "%" ident
//!          | "[" attribute "]" | ":" ":"? ident ["(" argument ")"]
//! ```

use sable_ir::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoSelector,
    SelectorComponent, SelectorList, SimpleSelector,
};
use sable_lexer_core::combinators::{exactly, exactly_char, optional};
use sable_lexer_core::fragments::{self, is_name_start, is_space};
use sable_lexer_core::{alternatives, sequence, Matcher};

use crate::{ParseError, ParseErrorKind, Parser};

/// Pseudo-classes whose argument is itself a selector list.
const SELECTOR_PSEUDOS: &[&str] = &[
    "not",
    "matches",
    "is",
    "where",
    "current",
    "any",
    "has",
    "host",
    "host-context",
    "slotted",
];

/// `50%` or `100` inside `@keyframes`.
fn keyframe_selector(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(fragments::number, optional(exactly_char(b'%'))).run(src, pos)
}

fn type_name(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(exactly_char(b'*'), fragments::identifier).run(src, pos)
}

/// `|` that is a namespace separator rather than the start of `|=`.
fn namespace_bar(src: &[u8], pos: usize) -> Option<usize> {
    (src.get(pos) == Some(&b'|') && src.get(pos + 1) != Some(&b'=')).then_some(pos + 1)
}

fn attribute_op(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(
        exactly_char(b'='),
        exactly(b"~="),
        exactly(b"|="),
        exactly(b"^="),
        exactly(b"$="),
        exactly(b"*="),
    )
    .run(src, pos)
}

fn starts_simple(b: u8) -> bool {
    matches!(b, b'.' | b'#' | b'%' | b'[' | b':' | b'*' | b'|' | b'\\' | b'-')
        || b.is_ascii_digit()
        || is_name_start(b)
}

/// Collapse an `An+B` argument to its compact form: `2n + 1` to `2n+1`.
fn compact_binomial(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// End of a raw pseudo argument: the offset of the `)` that closes it.
fn balanced_argument(src: &[u8], pos: usize) -> usize {
    let mut depth = 0usize;
    let mut i = pos;
    while i < src.len() {
        match src[i] {
            b'"' | b'\'' => {
                i = fragments::quoted_string(src, i).unwrap_or(src.len());
                continue;
            }
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    src.len()
}

impl Parser<'_> {
    pub(crate) fn parse_selector_list(&mut self) -> Result<SelectorList, ParseError> {
        tracing::trace!(pos = self.pos(), "parse_selector_list");
        self.nested(|p| {
            let mut complexes = vec![p.parse_complex_selector()?];
            while p.scanner.lex_char(b',') {
                complexes.push(p.parse_complex_selector()?);
            }
            Ok(SelectorList::new(complexes))
        })
    }

    fn parse_complex_selector(&mut self) -> Result<ComplexSelector, ParseError> {
        let mut components = Vec::new();
        loop {
            self.scanner.skip_ws();
            let combinator = match self.scanner.peek_byte() {
                Some(b'>') => Some(Combinator::Child),
                Some(b'+') => Some(Combinator::Adjacent),
                Some(b'~') => Some(Combinator::General),
                _ => None,
            };
            if let Some(combinator) = combinator {
                self.scanner.advance_to(self.pos() + 1);
                components.push(SelectorComponent::Combinator(combinator));
                continue;
            }
            match self.scanner.peek_byte() {
                Some(b) if b == b'&' || starts_simple(b) => {
                    components.push(SelectorComponent::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }
        if components.iter().all(SelectorComponent::is_combinator) {
            return Err(self.css_error(ParseErrorKind::InvalidSelector, ": expected selector, was "));
        }
        Ok(ComplexSelector::new(components))
    }

    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut compound = CompoundSelector::default();
        if self.scanner.peek_byte() == Some(b'&') {
            if !self.context.allows_parent() {
                return Err(self.error(
                    ParseErrorKind::ParentNotAllowed,
                    "Parent selectors aren't allowed here.",
                ));
            }
            self.scanner.eat_char(b'&');
            compound.has_parent = true;
            if let Some(suffix) = self.scanner.eat(fragments::name_chars) {
                compound.parent_suffix = Some(suffix.to_owned());
            }
        }

        loop {
            match self.scanner.peek_byte() {
                Some(b'&') => {
                    return Err(self.error(
                        ParseErrorKind::InvalidSelector,
                        "\"&\" may only used at the beginning of a compound selector.",
                    ));
                }
                Some(b) if starts_simple(b) => {
                    let simple = self.parse_simple_selector()?;
                    compound.simples.push(simple);
                }
                _ => break,
            }
        }
        Ok(compound)
    }

    fn parse_simple_selector(&mut self) -> Result<SimpleSelector, ParseError> {
        let simple = match self.scanner.peek_byte() {
            Some(b'.') => self
                .scanner
                .eat(fragments::class_name)
                .map(|t| SimpleSelector::Class(t[1..].to_owned())),
            Some(b'#') => self
                .scanner
                .eat(fragments::id_name)
                .map(|t| SimpleSelector::Id(t[1..].to_owned())),
            Some(b'%') => self
                .scanner
                .eat(fragments::placeholder)
                .map(|t| SimpleSelector::Placeholder(t[1..].to_owned())),
            Some(b'[') => return self.parse_attribute_selector(),
            Some(b':') => return self.parse_pseudo_selector(),
            _ => self.parse_type_selector(),
        };
        simple.ok_or_else(|| {
            self.css_error(ParseErrorKind::InvalidSelector, ": expected selector, was ")
        })
    }

    fn parse_type_selector(&mut self) -> Option<SimpleSelector> {
        if let Some(text) = self.scanner.eat(keyframe_selector) {
            return Some(SimpleSelector::type_selector(text));
        }
        let first = self.scanner.eat(type_name);
        if self.scanner.eat(namespace_bar).is_some() {
            let name = self.scanner.eat(type_name)?;
            return Some(SimpleSelector::Type {
                name: name.to_owned(),
                namespace: Some(first.unwrap_or_default().to_owned()),
            });
        }
        first.map(SimpleSelector::type_selector)
    }

    /// `[ns|name op value modifier]`
    fn parse_attribute_selector(&mut self) -> Result<SimpleSelector, ParseError> {
        self.scanner.eat_char(b'[');
        self.scanner.skip_ws();

        let first = self.scanner.eat(type_name);
        let (namespace, name) = if self.scanner.eat(namespace_bar).is_some() {
            let name = self.scanner.eat(fragments::identifier);
            (Some(first.unwrap_or_default().to_owned()), name)
        } else {
            (None, first.filter(|n| *n != "*"))
        };
        let Some(name) = name.map(str::to_owned) else {
            return Err(self.error(
                ParseErrorKind::InvalidSelector,
                "invalid attribute name in attribute selector",
            ));
        };

        let mut attr = AttributeSelector {
            name,
            namespace,
            op: None,
            value: None,
            modifier: None,
        };
        if self.scanner.lex_char(b']') {
            return Ok(SimpleSelector::Attribute(attr));
        }

        let op = match self.lex(attribute_op) {
            Some("=") => AttrOp::Equal,
            Some("~=") => AttrOp::Includes,
            Some("|=") => AttrOp::DashMatch,
            Some("^=") => AttrOp::Prefix,
            Some("$=") => AttrOp::Suffix,
            Some("*=") => AttrOp::Substring,
            _ => {
                return Err(self.error(
                    ParseErrorKind::InvalidSelector,
                    format!("invalid operator in attribute selector for {}", attr.name),
                ));
            }
        };
        attr.op = Some(op);

        let Some(value) = self
            .lex(fragments::identifier)
            .or_else(|| self.lex(fragments::quoted_string))
        else {
            return Err(self.error(
                ParseErrorKind::InvalidSelector,
                format!(
                    "expected a string constant or identifier in attribute selector for {}",
                    attr.name
                ),
            ));
        };
        attr.value = Some(value.to_owned());

        self.scanner.skip_ws();
        let bytes = self.scanner.bytes();
        let pos = self.pos();
        if let Some(&m) = bytes.get(pos) {
            let ends = bytes
                .get(pos + 1)
                .map_or(true, |&b| b == b']' || is_space(b));
            if m.is_ascii_alphabetic() && ends {
                self.scanner.advance_to(pos + 1);
                attr.modifier = Some(char::from(m));
            }
        }

        if !self.scanner.lex_char(b']') {
            return Err(self.error(
                ParseErrorKind::InvalidSelector,
                format!("unterminated attribute selector for {}", attr.name),
            ));
        }
        Ok(SimpleSelector::Attribute(attr))
    }

    /// `:name`, `::name`, `:nth-child(2n+1 of .a)`, `:not(.a, .b)`, `:lang(en)`.
    fn parse_pseudo_selector(&mut self) -> Result<SimpleSelector, ParseError> {
        self.scanner.eat_char(b':');
        let is_element = self.scanner.eat_char(b':');
        let Some(name) = self.scanner.eat(fragments::identifier) else {
            return Err(self.css_error(
                ParseErrorKind::InvalidSelector,
                ": expected pseudoclass or pseudoelement, was ",
            ));
        };
        let mut pseudo = PseudoSelector::new(name, is_element);
        if !self.scanner.eat_char(b'(') {
            return Ok(SimpleSelector::Pseudo(pseudo));
        }

        self.scanner.skip_ws();
        if pseudo.normalized.starts_with("nth-") {
            let Some(binomial) = self.scanner.eat(fragments::binomial) else {
                return Err(self.css_error(
                    ParseErrorKind::InvalidSelector,
                    ": expected An+B expression, was ",
                ));
            };
            pseudo = pseudo.with_argument(compact_binomial(binomial));
            if self.lex(fragments::keyword(b"of")).is_some() {
                let selector = self.parse_selector_list()?;
                pseudo = pseudo.with_selector(selector);
            }
        } else if SELECTOR_PSEUDOS.contains(&pseudo.normalized.as_str()) {
            let selector = self.parse_selector_list()?;
            pseudo = pseudo.with_selector(selector);
        } else {
            let start = self.pos();
            let end = balanced_argument(self.scanner.bytes(), start);
            let text = self.scanner.slice(start, end).trim_end();
            pseudo = pseudo.with_argument(text);
            self.scanner.advance_to(end);
        }

        if !self.scanner.lex_char(b')') {
            return Err(self.css_error(ParseErrorKind::InvalidSelector, ": expected \")\", was "));
        }
        Ok(SimpleSelector::Pseudo(pseudo))
    }
}
