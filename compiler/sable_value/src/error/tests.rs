use super::*;
use pretty_assertions::assert_eq;
use sable_ir::SourceId;

#[test]
fn test_argument_messages() {
    let err = type_error("red($color)", "color", "color");
    assert_eq!(err.to_string(), "argument `$color` of `red($color)` must be a color");
    assert_eq!(err.code(), ErrorCode::E2001);

    let err = range_error("mix($color1, $color2, $weight: 50%)", "weight", "0%", "100%");
    assert_eq!(
        err.to_string(),
        "argument `$weight` of `mix($color1, $color2, $weight: 50%)` must be between 0% and 100%"
    );
    assert_eq!(err.code(), ErrorCode::E2002);

    let err = unitless_error("percentage($number)", "number");
    assert_eq!(err.code(), ErrorCode::E2003);
}

#[test]
fn test_call_shape_messages() {
    assert_eq!(
        too_many_arguments("rgb", 3, 4).to_string(),
        "wrong number of arguments (4 for 3) for `rgb'"
    );
    assert_eq!(
        missing_argument("Mixin foo", "bar").to_string(),
        "Mixin foo is missing argument $bar."
    );
    assert_eq!(
        unknown_argument("Function f", "x").to_string(),
        "Function f has no argument named $x."
    );
}

#[test]
fn test_operation_messages() {
    let err = undefined_operation("null".into(), "plus", "null".into());
    assert_eq!(err.to_string(), "Undefined operation: \"null plus null\".");
    assert_eq!(err.code(), ErrorCode::E3001);
    assert_eq!(zero_division().code(), ErrorCode::E3002);
    assert_eq!(undefined_variable("x").to_string(), "Undefined variable: \"$x\".");
    assert_eq!(undefined_mixin("m").code(), ErrorCode::E4002);
}

#[test]
fn test_nesting_conversion() {
    let err = EvalError::from(NestingExceeded { limit: 16 });
    assert_eq!(err.kind, EvalErrorKind::NestingLimitExceeded { limit: 16 });
    assert_eq!(err.code(), ErrorCode::E9001);
}

#[test]
fn test_first_span_wins() {
    let inner = Span::new(SourceId::ROOT, 4, 8);
    let outer = Span::new(SourceId::ROOT, 0, 12);
    let err = zero_division().or_span(inner).or_span(outer);
    assert_eq!(err.span, Some(inner));
}

#[test]
fn test_diagnostic_carries_backtrace() {
    let call = Span::new(SourceId::ROOT, 20, 30);
    let err = user_error("boom")
        .with_span(Span::new(SourceId::ROOT, 2, 6))
        .with_backtrace(EvalBacktrace::new(vec![BacktraceFrame {
            name: "mixin explode".into(),
            span: call,
        }]));
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E3003);
    assert_eq!(diag.message, "boom");
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.labels[1].span, call);
    assert_eq!(diag.labels[1].message, "from mixin explode");
}

#[test]
fn test_empty_backtrace_is_not_recorded() {
    let err = EvalError::new("x").with_backtrace(EvalBacktrace::default());
    assert!(err.backtrace.is_none());
    assert_eq!(err.code(), ErrorCode::E3006);
}
