//! Statement and at-rule parsing tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_ir::{ExprKind, ImportTarget, InterpPart, SelectorSource, Stmt, StmtKind};

use crate::{parse_stylesheet, ParseError, ParseErrorKind, ParserConfig};

fn parse(src: &str) -> Vec<Stmt> {
    parse_stylesheet(src, &ParserConfig::default()).unwrap().body
}

fn parse_err(src: &str) -> ParseError {
    parse_stylesheet(src, &ParserConfig::default()).unwrap_err()
}

fn rule_body(stmt: &Stmt) -> &[Stmt] {
    match &stmt.kind {
        StmtKind::StyleRule { body, .. } => body,
        other => panic!("expected style rule, got {other:?}"),
    }
}

#[test]
fn test_empty_stylesheet() {
    assert!(parse("").is_empty());
    assert!(parse("  // only a comment\n").is_empty());
}

#[test]
fn test_nested_rules_and_declarations() {
    let body = parse("a { color: red; b { x: y } }");
    assert_eq!(body.len(), 1);
    let inner = rule_body(&body[0]);
    assert_eq!(inner.len(), 2);
    let StmtKind::Declaration { name, value, .. } = &inner[0].kind else {
        panic!("expected declaration");
    };
    assert_eq!(name.as_plain(), Some("color"));
    assert_eq!(value.as_ref().unwrap().kind, ExprKind::Ident("red".into()));
    assert!(matches!(inner[1].kind, StmtKind::StyleRule { .. }));
}

#[test]
fn test_pseudo_class_rule_is_not_a_property() {
    let body = parse("a { &:hover { x: y } }");
    assert!(matches!(rule_body(&body[0])[0].kind, StmtKind::StyleRule { .. }));
}

#[test]
fn test_nested_properties() {
    let body = parse("a { font: { family: x; size: 1px; } margin: 0 { left: 1px } }");
    let inner = rule_body(&body[0]);
    let StmtKind::Declaration { value, body, .. } = &inner[0].kind else {
        panic!("expected declaration");
    };
    assert!(value.is_none());
    assert_eq!(body.len(), 2);
    let StmtKind::Declaration { value, body, .. } = &inner[1].kind else {
        panic!("expected declaration");
    };
    assert!(value.is_some());
    assert_eq!(body.len(), 1);
}

#[test]
fn test_custom_property_is_raw() {
    let body = parse("a { --gap: 1px #{$y} ; }");
    let StmtKind::Declaration {
        value,
        is_custom_property,
        ..
    } = &rule_body(&body[0])[0].kind
    else {
        panic!("expected declaration");
    };
    assert!(*is_custom_property);
    let ExprKind::Special(interp) = &value.as_ref().unwrap().kind else {
        panic!("expected raw value");
    };
    assert_eq!(interp.to_string(), "1px #{...}");
}

#[test]
fn test_interpolated_property_name() {
    let body = parse("a { #{$side}-top: 1px; }");
    let StmtKind::Declaration { name, .. } = &rule_body(&body[0])[0].kind else {
        panic!("expected declaration");
    };
    assert!(name.has_interpolants());
    assert_eq!(name.to_string(), "#{...}-top");
}

#[test]
fn test_variable_flags() {
    let body = parse("$my_x: 1 !default !global;");
    let StmtKind::Variable {
        name,
        is_default,
        is_global,
        ..
    } = &body[0].kind
    else {
        panic!("expected variable");
    };
    assert_eq!(name, "my-x");
    assert!(*is_default && *is_global);
}

#[test]
fn test_mixin_and_include_with_content() {
    let body = parse("@mixin m($a, $b: 2, $rest...) { x: $a; @content; } a { @include m(1) { y: z; } }");
    let StmtKind::Mixin(def) = &body[0].kind else {
        panic!("expected mixin");
    };
    assert_eq!(def.name, "m");
    assert_eq!(def.params.params.len(), 3);
    assert!(def.params.params[1].default.is_some());
    assert!(def.params.rest().is_some());
    assert!(matches!(def.body[1].kind, StmtKind::Content));

    let StmtKind::Include { name, args, content } = &rule_body(&body[1])[0].kind else {
        panic!("expected include");
    };
    assert_eq!(name, "m");
    assert_eq!(args.len(), 1);
    assert_eq!(content.as_ref().unwrap().body.len(), 1);
}

#[test]
fn test_function_with_return() {
    let body = parse("@function double($n) { @if $n > 0 { @return $n * 2; } @return 0; }");
    let StmtKind::Function(def) = &body[0].kind else {
        panic!("expected function");
    };
    assert_eq!(def.body.len(), 2);
    assert!(matches!(def.body[1].kind, StmtKind::Return(_)));
}

#[test]
fn test_if_else_chain() {
    let body = parse("@if $a { a { x: 1 } } @else if $b { b { x: 2 } } @else { c { x: 3 } }");
    assert_eq!(body.len(), 1);
    let StmtKind::If { clauses, else_body } = &body[0].kind else {
        panic!("expected @if");
    };
    assert_eq!(clauses.len(), 2);
    assert!(else_body.is_some());
}

#[test]
fn test_loops() {
    let body = parse("@each $k, $v in (a: 1) { } @for $i from 1 through 3 { } @while $i > 0 { }");
    let StmtKind::Each { variables, .. } = &body[0].kind else {
        panic!("expected @each");
    };
    assert_eq!(variables, &["k".to_owned(), "v".to_owned()]);
    let StmtKind::For { inclusive, .. } = &body[1].kind else {
        panic!("expected @for");
    };
    assert!(*inclusive);
    assert!(matches!(body[2].kind, StmtKind::While { .. }));
}

#[test]
fn test_extend() {
    let body = parse("a { @extend .b !optional; }");
    let StmtKind::Extend {
        selector,
        is_optional,
    } = &rule_body(&body[0])[0].kind
    else {
        panic!("expected @extend");
    };
    assert!(*is_optional);
    let SelectorSource::Parsed(list) = selector else {
        panic!("expected parsed selector");
    };
    assert_eq!(list.to_string(), ".b");
}

#[test]
fn test_interpolated_selector_is_kept_raw() {
    let body = parse("a { #{$sel} b { c: d } }");
    let StmtKind::StyleRule { selector, .. } = &rule_body(&body[0])[0].kind else {
        panic!("expected style rule");
    };
    let SelectorSource::Interpolated(interp) = selector else {
        panic!("expected interpolated selector");
    };
    assert_eq!(interp.to_string(), "#{...} b");
}

#[test]
fn test_imports() {
    let body = parse(r#"@import "a", "b.css", "http://x/y", url(c);"#);
    let StmtKind::Import(targets) = &body[0].kind else {
        panic!("expected @import");
    };
    assert_eq!(targets.len(), 4);
    assert!(matches!(&targets[0], ImportTarget::Dynamic { url, .. } if url == "a"));
    let ImportTarget::Static(css) = &targets[1] else {
        panic!("expected plain CSS import");
    };
    assert_eq!(css.as_plain(), Some("\"b.css\""));
    assert!(matches!(targets[2], ImportTarget::Static(_)));
    let ImportTarget::Static(url) = &targets[3] else {
        panic!("expected url import");
    };
    assert_eq!(url.as_plain(), Some("url(c)"));
}

#[test]
fn test_import_with_media_query_is_static() {
    let body = parse(r#"@import "a" screen;"#);
    let StmtKind::Import(targets) = &body[0].kind else {
        panic!("expected @import");
    };
    let ImportTarget::Static(css) = &targets[0] else {
        panic!("expected plain CSS import");
    };
    assert_eq!(css.as_plain(), Some("\"a\" screen"));
}

#[test]
fn test_media_query_with_variable() {
    let body = parse("@media screen and (min-width: $md) { a { b: c } }");
    let StmtKind::Media { query, body } = &body[0].kind else {
        panic!("expected @media");
    };
    assert_eq!(query.parts.len(), 3);
    assert_eq!(query.parts[0], InterpPart::Literal("screen and (min-width: ".into()));
    assert!(matches!(&query.parts[1], InterpPart::Expr(e) if e.kind == ExprKind::Variable("md".into())));
    assert_eq!(query.parts[2], InterpPart::Literal(")".into()));
    assert_eq!(body.len(), 1);
}

#[test]
fn test_generic_at_rules() {
    let body = parse("@font-face { font-family: x; } @supports (display: grid) { a { b: c } } @foo bar;");
    let StmtKind::AtRule { name, prelude, body: block } = &body[0].kind else {
        panic!("expected at-rule");
    };
    assert_eq!(name, "font-face");
    assert!(prelude.is_empty());
    assert_eq!(block.as_ref().unwrap().len(), 1);

    let StmtKind::AtRule { prelude, .. } = &body[1].kind else {
        panic!("expected at-rule");
    };
    assert_eq!(prelude.as_plain(), Some("(display: grid)"));

    let StmtKind::AtRule { body: block, .. } = &body[2].kind else {
        panic!("expected at-rule");
    };
    assert!(block.is_none());
}

#[test]
fn test_keyframes() {
    let body = parse("@keyframes spin { from { a: b } 50% { a: c } }");
    let StmtKind::AtRule { body: Some(frames), .. } = &body[0].kind else {
        panic!("expected at-rule with a block");
    };
    assert_eq!(frames.len(), 2);
    let StmtKind::StyleRule {
        selector: SelectorSource::Parsed(list),
        ..
    } = &frames[1].kind
    else {
        panic!("expected keyframe block");
    };
    assert_eq!(list.to_string(), "50%");
}

#[test]
fn test_charset_is_dropped() {
    let body = parse("@charset \"UTF-8\"; a { b: c }");
    assert_eq!(body.len(), 1);
}

#[test]
fn test_loud_comments_are_kept() {
    let body = parse("/* top */ a { /* inner */ b: c; } // silent");
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].kind, StmtKind::Comment("/* top */".into()));
    assert_eq!(rule_body(&body[1]).len(), 2);
}

#[test]
fn test_declaration_at_root_is_rejected() {
    let err = parse_err("color: red;");
    assert_eq!(err.kind, ParseErrorKind::InvalidCss);
    assert!(err.message.contains("expected 1 selector or at-rule"));
}

#[test]
fn test_parent_reference_at_root_is_rejected() {
    let err = parse_err("& { a: b }");
    assert_eq!(err.kind, ParseErrorKind::ParentNotAllowed);
}

#[test]
fn test_context_errors() {
    let cases = [
        ("@return 1;", "@return may only be used within a function."),
        ("@mixin m { } a { @content; }", "@content may only be used within a mixin."),
        ("@extend .a;", "Extend directives may only be used within rules."),
        (
            "@mixin a { @mixin b { } }",
            "Mixins may not be defined within control directives or other mixins.",
        ),
        (
            "@if true { @function f() { @return 1; } }",
            "Functions may not be defined within control directives or other mixins.",
        ),
        (
            "@function f() { color: red; }",
            "Functions can only contain variable declarations and control directives.",
        ),
        ("@function and() { @return 1; }", "Invalid function name \"and\"."),
        ("a { } @else { }", "Invalid CSS: @else must come after @if"),
    ];
    for (src, message) in cases {
        let err = parse_err(src);
        assert_eq!(err.message, message, "for {src:?}");
    }
}

#[test]
fn test_missing_value() {
    let err = parse_err("a { b: ; }");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
}

#[test]
fn test_unclosed_block() {
    let err = parse_err("a { b: c");
    assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter);
}

#[test]
fn test_unterminated_comment() {
    let err = parse_err("a { } /* open");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
}

#[test]
fn test_missing_semicolon_between_declarations() {
    let err = parse_err("a { b: c d: e }");
    assert!(err.message.contains("expected \"}\""));
}

#[test]
fn test_error_converts_to_diagnostic() {
    let err = parse_err("a { b: ; }");
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ParseErrorKind::ExpectedExpression.code());
}
