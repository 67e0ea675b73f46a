use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_short_context() {
    let src = "a { b: c";
    let (left, right) = context(src, src.len(), true);
    assert_eq!(left, "a { b: c");
    assert_eq!(right, "");
}

#[test]
fn test_context_around_position() {
    let src = "a { b: c d }";
    let (left, right) = context(src, 8, true);
    assert_eq!(left, "a { b: c");
    assert_eq!(right, "d }");
}

#[test]
fn test_trim_skips_whitespace_on_left() {
    let src = "foo     bar";
    assert_eq!(context(src, 5, true).0, "foo");
    assert_eq!(context(src, 5, false).0, "foo     ");
}

#[test]
fn test_context_stops_at_newlines() {
    let src = "first line\nsecond = here\nthird";
    let (left, right) = context(src, 19, true);
    assert_eq!(left, "second =");
    assert_eq!(right, "here");
}

#[test]
fn test_long_left_is_truncated_with_ellipsis() {
    let src = "abcdefghijklmnopqrstuvwxyz;";
    let (left, _) = context(src, 26, true);
    assert_eq!(left, "...lmnopqrstuvwxyz");
    assert_eq!(left.chars().count(), KEPT_CONTEXT + 3);
}

#[test]
fn test_long_right_is_truncated_with_ellipsis() {
    let src = "x 0123456789abcdefghijklmnop";
    let (_, right) = context(src, 1, true);
    assert_eq!(right, "0123456789abcde...");
}

#[test]
fn test_exactly_max_is_not_truncated() {
    let src = "123456789012345678";
    let (left, _) = context(src, 18, true);
    assert_eq!(left, src);
}

#[test]
fn test_multibyte_characters() {
    let src = "é { ü";
    let (left, right) = context(src, 4, true);
    assert_eq!(left, "é {");
    assert_eq!(right, "ü");
}

#[test]
fn test_css_error_message() {
    let src = "a {\n  b: }";
    let msg = css_error(
        src,
        9,
        "Invalid CSS",
        " after ",
        ": expected expression (e.g. 1px, bold), was ",
        true,
    );
    assert_eq!(
        msg,
        "Invalid CSS after \"  b:\": expected expression (e.g. 1px, bold), was \"}\""
    );
}

#[test]
fn test_quote_escapes() {
    assert_eq!(quote("a\"b"), "\"a\\\"b\"");
}
