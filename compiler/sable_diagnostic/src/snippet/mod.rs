//! Context snippets for syntax errors.
//!
//! A syntax error quotes a little of the text on either side of the failure
//! point, cut at line breaks:
//!
//! ```text
//! Invalid CSS after "a { b: c": expected "}", was "{ d"
//! ```
//!
//! Each side holds at most [`MAX_CONTEXT`] characters; a side that had to be
//! shortened keeps [`KEPT_CONTEXT`] characters and gains an ellipsis.

/// Characters of context collected on each side.
pub const MAX_CONTEXT: usize = 18;

/// Characters kept when a side is shortened.
pub const KEPT_CONTEXT: usize = 15;

const ELLIPSIS: &str = "...";

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Text before and after `pos`.
///
/// The right side starts after any whitespace at `pos`. With `trim`, the
/// left side ends at the last non-whitespace character before that point.
pub fn context(source: &str, pos: usize, trim: bool) -> (String, String) {
    let pos = floor_char_boundary(source, pos.min(source.len()));
    let right_start = source[pos..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(source.len(), |(i, _)| pos + i);

    let before = &source[..right_start];
    let left_end = if trim {
        before.trim_end().len()
    } else {
        before.len()
    };

    let mut left: Vec<char> = Vec::new();
    let mut left_cut = false;
    for c in source[..left_end].chars().rev() {
        if is_line_break(c) {
            break;
        }
        if left.len() >= MAX_CONTEXT {
            left_cut = true;
            break;
        }
        left.push(c);
    }
    left.reverse();

    let mut right: Vec<char> = Vec::new();
    let mut right_cut = false;
    for c in source[right_start..].chars() {
        if is_line_break(c) {
            break;
        }
        if right.len() >= MAX_CONTEXT {
            right_cut = true;
            break;
        }
        right.push(c);
    }

    let left = if left_cut && left.len() > KEPT_CONTEXT {
        let kept: String = left[left.len() - KEPT_CONTEXT..].iter().collect();
        format!("{ELLIPSIS}{kept}")
    } else {
        left.into_iter().collect()
    };
    let right = if right_cut && right.len() > KEPT_CONTEXT {
        let kept: String = right[..KEPT_CONTEXT].iter().collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        right.into_iter().collect()
    };
    (left, right)
}

/// `"text"` with embedded double quotes escaped.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Build the full message: `msg + prefix + "left" + middle + "right"`.
///
/// Typical use: `css_error("Invalid CSS", " after ", ": expected \"{\", was ")`.
pub fn css_error(
    source: &str,
    pos: usize,
    msg: &str,
    prefix: &str,
    middle: &str,
    trim: bool,
) -> String {
    let (left, right) = context(source, pos, trim);
    format!("{msg}{prefix}{}{middle}{}", quote(&left), quote(&right))
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests;
