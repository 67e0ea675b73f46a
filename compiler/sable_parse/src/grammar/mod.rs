//! Grammar productions, one file per area.

mod args;
mod expr;
mod interpolation;
mod selector;
mod stmt;
mod value;

use sable_lexer_core::combinators::{exactly, exactly_char};
use sable_lexer_core::fragments;
use sable_lexer_core::{alternatives, Matcher};

/// `_` and `-` are interchangeable in variable, mixin and function names.
pub(crate) fn normalize_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Bytes that end a list.
fn list_terminator(src: &[u8], pos: usize) -> Option<usize> {
    if pos >= src.len() {
        return Some(pos);
    }
    alternatives!(
        exactly_char(b';'),
        exactly_char(b'}'),
        exactly_char(b'{'),
        exactly_char(b')'),
        exactly_char(b']'),
        exactly_char(b':'),
        exactly(b"..."),
        fragments::default_flag,
        fragments::global_flag,
        fragments::optional_flag,
    )
    .run(src, pos)
}

/// Bytes that end one item of a space list.
fn space_list_terminator(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(exactly_char(b','), list_terminator).run(src, pos)
}
