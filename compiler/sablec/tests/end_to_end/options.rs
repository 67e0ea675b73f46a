//! Compiler settings.

use pretty_assertions::assert_eq;
use sablec::{compile_str, CompileError, ErrorCode, Options};

use crate::common::lines;

#[test]
fn precision_controls_rounding() {
    let options = Options {
        precision: 3,
        ..Default::default()
    };
    let compilation = compile_str("a { b: (1/3); c: (2px/3); }", &options).unwrap();
    assert_eq!(lines(&compilation), vec!["a { b: 0.333; c: 0.667px; }"]);
}

#[test]
fn quiet_drops_warn_and_debug() {
    let src = "@warn \"w\"; @debug \"d\"; a { b: c; }";
    let loud = compile_str(src, &Options::default()).unwrap();
    assert_eq!(loud.warnings.len(), 2);

    let options = Options {
        quiet: true,
        ..Default::default()
    };
    let quiet = compile_str(src, &options).unwrap();
    assert!(quiet.warnings.is_empty());
    assert_eq!(lines(&quiet), vec!["a { b: c; }"]);
}

#[test]
fn call_depth_is_limited() {
    let options = Options {
        max_nesting: 16,
        ..Default::default()
    };
    let err = compile_str("@mixin loop { @include loop; } a { @include loop; }", &options)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
    assert!(matches!(err, CompileError::Eval(_)));
}

#[test]
fn block_depth_is_limited_while_parsing() {
    let options = Options {
        max_nesting: 8,
        ..Default::default()
    };
    let src = format!("{}{}", "a { ".repeat(20), "}".repeat(20));
    let err = compile_str(&src, &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
    assert!(matches!(err, CompileError::Parse(_)));
}
