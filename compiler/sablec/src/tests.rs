#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_default_options() {
    let options = Options::default();
    assert_eq!(options.precision, 10);
    assert_eq!(options.max_nesting, 512);
    assert_eq!(options.source_name, "stdin");
    assert!(!options.quiet);
}

#[test]
fn test_options_feed_both_phases() {
    let options = Options {
        precision: 3,
        max_nesting: 7,
        quiet: true,
        ..Default::default()
    };
    assert_eq!(options.parser_config().max_nesting, 7);
    assert_eq!(options.parser_config().source, SourceId::ROOT);
    let eval = options.eval_config();
    assert_eq!((eval.precision, eval.max_nesting, eval.quiet), (3, 7, true));
}

#[test]
fn test_parse_error_variant() {
    let err = compile_str("a { b: c", &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    assert!(err.code().is_syntax_error());
    assert!(err.to_diagnostic().is_error());
}

#[test]
fn test_eval_error_variant() {
    let err = compile_str("a { b: $missing; }", &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Eval(_)));
    assert_eq!(err.to_string(), "Undefined variable: \"$missing\".");
    assert_eq!(err.code(), ErrorCode::E4001);
}

#[test]
fn test_render_names_the_entry_file() {
    let src = "a {\n  b: $missing;\n}";
    let err = compile_str(src, &Options::default()).unwrap_err();
    let mut sources = SourceMap::new();
    sources.add("main.scss", src);
    let report = err.render(&sources);
    assert!(report.starts_with("error[E4001]: Undefined variable"), "{report}");
    assert!(report.contains("main.scss:2:"), "{report}");
}

#[test]
fn test_compilation_declarations() {
    let compilation = compile_str("a { b: 1px + 1px; c { d: e; } }", &Options::default()).unwrap();
    assert_eq!(
        compilation.declarations(),
        vec![
            ("a".to_owned(), "b".to_owned(), "2px".to_owned()),
            ("a c".to_owned(), "d".to_owned(), "e".to_owned()),
        ]
    );
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
