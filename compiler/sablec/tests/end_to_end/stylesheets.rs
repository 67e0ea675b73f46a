//! Whole stylesheets.

use pretty_assertions::assert_eq;

use crate::common::{compile, compile_err, compile_lines};

#[test]
fn button_theme() {
    let src = r"
        $primary: #336699;
        $dark: #000;
        $radius: 4px;

        @mixin rounded($r: $radius) {
          border-radius: $r;
        }

        .btn {
          color: $primary;
          @include rounded;
          &:hover { color: lighten($dark, 20%); }
          &-large { @include rounded($radius * 2); }
        }
    ";
    assert_eq!(
        compile_lines(src),
        vec![
            ".btn { color: #336699; border-radius: 4px; }",
            ".btn:hover { color: #333333; }",
            ".btn-large { border-radius: 8px; }",
        ]
    );
}

#[test]
fn generated_utilities() {
    let src = r"
        @function space($n) { @return $n * 4px; }
        @for $i from 1 through 3 {
          .m-#{$i} { margin: space($i); }
        }
    ";
    assert_eq!(
        compile_lines(src),
        vec![
            ".m-1 { margin: 4px; }",
            ".m-2 { margin: 8px; }",
            ".m-3 { margin: 12px; }",
        ]
    );
}

#[test]
fn map_driven_rules() {
    let src = r"
        $sizes: (small: 10px, large: 20px);
        @each $name, $size in $sizes {
          .text-#{$name} { font-size: $size; }
        }
        .count { n: length(map-keys($sizes)); }
    ";
    assert_eq!(
        compile_lines(src),
        vec![
            ".text-small { font-size: 10px; }",
            ".text-large { font-size: 20px; }",
            ".count { n: 2; }",
        ]
    );
}

#[test]
fn extend_through_placeholder() {
    let src = r"
        %message { border: 1px solid; }
        .success { @extend %message; color: green; }
        .error { @extend %message; color: red; }
    ";
    assert_eq!(
        compile_lines(src),
        vec![
            ".success, .error { border: 1px solid; }",
            ".success { color: green; }",
            ".error { color: red; }",
        ]
    );
}

#[test]
fn media_query_bubbles_out_of_rule() {
    assert_eq!(
        compile_lines(".nav { display: flex; @media print { display: none; } }"),
        vec![
            ".nav { display: flex; }",
            "@media print { .nav { display: none; } }",
        ]
    );
}

#[test]
fn comments_are_kept_and_silent_comments_dropped() {
    assert_eq!(
        compile_lines("/* keep */\n// drop\na { b: c; }"),
        vec!["/* keep */", "a { b: c; }"]
    );
}

#[test]
fn warnings_travel_beside_the_output() {
    let compilation = compile("@warn \"legacy\"; a { b: c; }");
    assert_eq!(compilation.warnings.len(), 1);
    assert_eq!(compilation.warnings[0].message, "legacy");
    assert!(!compilation.warnings[0].is_error());
    assert_eq!(compilation.css.rules().len(), 1);
}

#[test]
fn user_error_aborts() {
    assert_eq!(
        compile_err("@mixin need($x) { @if $x == null { @error \"x is required\"; } } a { @include need(null); }"),
        "x is required"
    );
}

#[test]
fn unknown_mixin() {
    assert_eq!(compile_err("a { @include nope; }"), "no mixin named nope");
}

#[test]
fn syntax_error_is_reported_as_parse_error() {
    let err = sablec::compile_str("a { b: c", &sablec::Options::default()).unwrap_err();
    assert!(matches!(err, sablec::CompileError::Parse(_)));
    assert!(err.code().is_syntax_error());
}

#[test]
fn empty_stylesheet() {
    assert!(compile("").css.is_empty());
    assert!(compile("$x: 1; @mixin m { }").css.is_empty());
}
