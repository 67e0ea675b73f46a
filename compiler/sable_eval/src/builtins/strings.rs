//! String functions.
//!
//! Indices count characters from 1; negative indices count from the end.

use sable_value::{EvalResult, SassString, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::Interpreter;

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("unquote($string)", unquote),
    ("quote($string)", quote),
    ("str-length($string)", str_length),
    ("str-insert($string, $insert, $index)", str_insert),
    ("str-index($string, $substring)", str_index),
    ("str-slice($string, $start-at, $end-at: -1)", str_slice),
    ("to-upper-case($string)", to_upper_case),
    ("to-lower-case($string)", to_lower_case),
];

/// Character offset for a 1-based `index` into a string of `len`
/// characters. Zero and indices past the start clamp to 0 unless
/// `allow_negative` is set.
fn char_offset(index: i64, len: usize, allow_negative: bool) -> i64 {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    if index == 0 {
        0
    } else if index > 0 {
        (index - 1).min(len)
    } else {
        let offset = len + index;
        if offset < 0 && !allow_negative {
            0
        } else {
            offset
        }
    }
}

/// Byte position of the `offset`-th character.
fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(i, _)| i)
}

fn with_text(original: &SassString, text: String) -> Value {
    Value::String(SassString::new(text, original.quoted))
}

fn unquote(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    match args.get(0) {
        Value::String(s) => Ok(Value::unquoted(s.text.clone())),
        other => {
            interp.deprecation(
                args.span,
                format!(
                    "Passing {}, a non-string value, to unquote() will be an error in future versions of Sass.",
                    other.inspect(interp.precision())
                ),
            );
            Ok(other.clone())
        }
    }
}

fn quote(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::quoted(args.get(0).to_text(interp.precision())))
}

fn str_length(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    #[allow(clippy::cast_precision_loss)]
    let length = s.text.chars().count() as f64;
    Ok(Value::unitless(length))
}

fn str_insert(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    let insert = args.string(1)?;
    let mut index = args.int(2)?;
    let len = s.text.chars().count();
    // A negative index places the insertion after that character.
    if index < 0 {
        index += i64::try_from(len).unwrap_or(i64::MAX) + 2;
    }
    let offset = usize::try_from(char_offset(index, len, false)).unwrap_or(0);
    let at = byte_index(&s.text, offset);
    let mut text = String::with_capacity(s.text.len() + insert.text.len());
    text.push_str(&s.text[..at]);
    text.push_str(&insert.text);
    text.push_str(&s.text[at..]);
    Ok(with_text(s, text))
}

fn str_index(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    let needle = args.string(1)?;
    Ok(match s.text.find(needle.text.as_str()) {
        #[allow(clippy::cast_precision_loss)]
        Some(at) => Value::unitless((s.text[..at].chars().count() + 1) as f64),
        None => Value::Null,
    })
}

fn str_slice(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    let len = s.text.chars().count();
    let start = char_offset(args.int(1)?, len, false);
    let mut end = char_offset(args.int(2)?, len, true);
    if end == i64::try_from(len).unwrap_or(i64::MAX) {
        end -= 1;
    }
    if end < start {
        return Ok(with_text(s, String::new()));
    }
    let (Ok(start), Ok(end)) = (usize::try_from(start), usize::try_from(end)) else {
        return Ok(with_text(s, String::new()));
    };
    let text: String = s.text.chars().skip(start).take(end - start + 1).collect();
    Ok(with_text(s, text))
}

fn to_upper_case(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    Ok(with_text(s, s.text.to_ascii_uppercase()))
}

fn to_lower_case(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let s = args.string(0)?;
    Ok(with_text(s, s.text.to_ascii_lowercase()))
}
