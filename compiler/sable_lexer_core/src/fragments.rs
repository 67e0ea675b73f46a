//! The Sass lexicon as matchers.
//!
//! Every public `fn(&[u8], usize) -> Option<usize>` here is a complete
//! [`Matcher`](crate::Matcher). Nothing skips whitespace on its own except
//! the fragments that say so.

use crate::combinators::{
    byte_if, class_char, exactly, exactly_char, insensitive, negate, one_plus, optional,
    zero_plus, Matcher,
};
use crate::{alternatives, sequence};

// Character classes

#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

#[inline]
pub fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
pub fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || b == b'-'
}

#[inline]
fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
fn is_unit_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit()
}

// Whitespace and comments

pub fn spaces(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(byte_if(is_space)).run(src, pos)
}

/// `// ...` up to, not including, the newline.
pub fn line_comment(src: &[u8], pos: usize) -> Option<usize> {
    let body = exactly(b"//").run(src, pos)?;
    let rest = src.get(body..)?;
    Some(memchr::memchr2(b'\n', b'\r', rest).map_or(src.len(), |i| body + i))
}

/// `/* ... */`; unterminated comments do not match.
pub fn block_comment(src: &[u8], pos: usize) -> Option<usize> {
    let body = exactly(b"/*").run(src, pos)?;
    let rest = src.get(body..)?;
    memchr::memmem::find(rest, b"*/").map(|i| body + i + 2)
}

pub fn comment(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(line_comment, block_comment).run(src, pos)
}

/// Any run of whitespace and comments, possibly empty.
pub fn optional_css_whitespace(src: &[u8], pos: usize) -> Option<usize> {
    zero_plus(alternatives!(spaces, comment)).run(src, pos)
}

/// Whitespace without comments, possibly empty.
pub fn optional_spaces(src: &[u8], pos: usize) -> Option<usize> {
    zero_plus(byte_if(is_space)).run(src, pos)
}

// Names

/// `\` followed by one to six hex digits (and an optional space) or by any
/// other single byte.
pub fn escape(src: &[u8], pos: usize) -> Option<usize> {
    let after = exactly_char(b'\\').run(src, pos)?;
    let hex_end = (after..src.len().min(after + 6))
        .find(|&i| !is_hex(src[i]))
        .unwrap_or_else(|| src.len().min(after + 6));
    if hex_end > after {
        return Some(optional(exactly_char(b' ')).run(src, hex_end).unwrap_or(hex_end));
    }
    match src.get(after) {
        Some(b'\n' | b'\r') | None => None,
        Some(_) => Some(after + 1),
    }
}

/// CSS identifier, with any number of leading dashes (`-moz-foo`, `--var`).
pub fn identifier(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        zero_plus(exactly_char(b'-')),
        alternatives!(byte_if(is_name_start), escape),
        zero_plus(alternatives!(byte_if(is_name_char), escape)),
    )
    .run(src, pos)
}

/// Name characters only, allowing a leading digit (`#1a`, nested property suffixes).
pub fn name_chars(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(alternatives!(byte_if(is_name_char), escape)).run(src, pos)
}

pub fn variable(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'$'), identifier).run(src, pos)
}

pub fn at_keyword(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'@'), identifier).run(src, pos)
}

pub fn class_name(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'.'), identifier).run(src, pos)
}

pub fn id_name(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'#'), name_chars).run(src, pos)
}

pub fn placeholder(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'%'), identifier).run(src, pos)
}

/// A case-insensitive word that is not the prefix of a longer identifier.
pub fn keyword(word: &'static [u8]) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        sequence!(insensitive(word), negate(byte_if(is_name_char))).run(src, pos)
    }
}

// Numbers

pub fn digits(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(byte_if(is_digit)).run(src, pos)
}

fn exponent(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(class_char(b"eE"), optional(class_char(b"+-")), digits).run(src, pos)
}

/// `12`, `1.5`, `.5`, `1e3`, without a sign.
pub fn unsigned_number(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        alternatives!(
            sequence!(digits, optional(sequence!(exactly_char(b'.'), digits))),
            sequence!(exactly_char(b'.'), digits),
        ),
        optional(exponent),
    )
    .run(src, pos)
}

pub fn number(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(optional(class_char(b"+-")), unsigned_number).run(src, pos)
}

/// A unit name. Dashes are allowed only when followed by a letter, so
/// `1px-2px` lexes as `1px` then `-2px`.
pub fn unit(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        byte_if(is_name_start),
        zero_plus(alternatives!(
            byte_if(is_unit_char),
            sequence!(one_plus(exactly_char(b'-')), byte_if(is_name_start)),
        )),
    )
    .run(src, pos)
}

pub fn percentage(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(number, exactly_char(b'%')).run(src, pos)
}

pub fn dimension(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(number, unit).run(src, pos)
}

/// `#` followed by hex digits and not by any other name character.
///
/// Digit count is not checked here; 3, 4, 6 and 8 are valid colours.
pub fn hex_color(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        exactly_char(b'#'),
        one_plus(byte_if(is_hex)),
        negate(byte_if(is_name_char)),
    )
    .run(src, pos)
}

/// The `An+B` micro-grammar of `:nth-child()` and friends.
pub fn binomial(src: &[u8], pos: usize) -> Option<usize> {
    let sign = class_char(b"+-");
    alternatives!(
        keyword(b"odd"),
        keyword(b"even"),
        sequence!(
            optional(sign),
            optional(digits),
            class_char(b"nN"),
            optional(sequence!(
                optional_spaces,
                sign,
                optional_spaces,
                digits,
            )),
        ),
        sequence!(optional(sign), digits),
    )
    .run(src, pos)
}

// Strings and interpolation

/// `#{ ... }` with balanced braces; braces inside quotes do not count.
pub fn interpolant(src: &[u8], pos: usize) -> Option<usize> {
    let mut i = exactly(b"#{").run(src, pos)?;
    let mut depth = 1usize;
    while i < src.len() {
        match src[i] {
            b'"' | b'\'' => {
                i = quoted_string(src, i)?;
                continue;
            }
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// A single- or double-quoted string. Escapes and `#{}` are kept in the
/// match; an unescaped newline ends the match unsuccessfully.
pub fn quoted_string(src: &[u8], pos: usize) -> Option<usize> {
    let quote = *src.get(pos)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let mut i = pos + 1;
    while i < src.len() {
        match src[i] {
            b if b == quote => return Some(i + 1),
            b'\\' => i += 2,
            b'#' if src.get(i + 1) == Some(&b'{') => i = interpolant(src, i)?,
            b'\n' | b'\r' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Body of an unquoted `url(...)` up to, not including, the closing paren.
pub fn url_body(src: &[u8], pos: usize) -> Option<usize> {
    zero_plus(alternatives!(
        escape,
        interpolant,
        byte_if(|b| b != b')' && b != b'\\' && b != b'"' && b != b'\'' && !is_space(b)),
    ))
    .run(src, pos)
}

pub fn url_prefix(src: &[u8], pos: usize) -> Option<usize> {
    insensitive(b"url(").run(src, pos)
}

// Operators and flags

pub fn kwd_eq(src: &[u8], pos: usize) -> Option<usize> {
    exactly(b"==").run(src, pos)
}

pub fn kwd_neq(src: &[u8], pos: usize) -> Option<usize> {
    exactly(b"!=").run(src, pos)
}

pub fn kwd_gte(src: &[u8], pos: usize) -> Option<usize> {
    exactly(b">=").run(src, pos)
}

pub fn kwd_lte(src: &[u8], pos: usize) -> Option<usize> {
    exactly(b"<=").run(src, pos)
}

pub fn kwd_gt(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'>'), negate(exactly_char(b'='))).run(src, pos)
}

pub fn kwd_lt(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'<'), negate(exactly_char(b'='))).run(src, pos)
}

fn bang_flag(word: &'static [u8]) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        sequence!(exactly_char(b'!'), optional_css_whitespace, keyword(word)).run(src, pos)
    }
}

pub fn kwd_important(src: &[u8], pos: usize) -> Option<usize> {
    bang_flag(b"important").run(src, pos)
}

pub fn default_flag(src: &[u8], pos: usize) -> Option<usize> {
    bang_flag(b"default").run(src, pos)
}

pub fn global_flag(src: &[u8], pos: usize) -> Option<usize> {
    bang_flag(b"global").run(src, pos)
}

pub fn optional_flag(src: &[u8], pos: usize) -> Option<usize> {
    bang_flag(b"optional").run(src, pos)
}
