#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_value::EvalErrorKind;

use super::*;

const P: u8 = 10;

fn bin(l: &Value, op: BinaryOp, r: &Value) -> Value {
    evaluate_binary(l, r, op, P).unwrap()
}

fn css(v: &Value) -> String {
    v.to_css(P).unwrap()
}

#[test]
fn test_number_arithmetic() {
    let one = Value::unitless(1.0);
    assert_eq!(bin(&one, BinaryOp::Add, &one), Value::unitless(2.0));
    assert_eq!(
        bin(&Value::unitless(7.0), BinaryOp::Mod, &Value::unitless(3.0)),
        Value::unitless(1.0)
    );
    assert_eq!(
        bin(&Value::unitless(-7.0), BinaryOp::Mod, &Value::unitless(3.0)),
        Value::unitless(2.0)
    );
    assert_eq!(
        css(&bin(&Value::number(2.0, "px"), BinaryOp::Mul, &Value::unitless(3.0))),
        "6px"
    );
}

#[test]
fn test_units_convert() {
    let sum = bin(&Value::number(1.0, "px"), BinaryOp::Add, &Value::number(2.0, "px"));
    assert_eq!(css(&sum), "3px");

    let mixed = bin(&Value::number(1.0, "px"), BinaryOp::Add, &Value::number(1.0, "in"));
    assert_eq!(css(&mixed), "97px");

    let unitless = bin(&Value::number(1.0, "px"), BinaryOp::Add, &Value::unitless(2.0));
    assert_eq!(css(&unitless), "3px");

    let ratio = bin(&Value::number(1.0, "in"), BinaryOp::Div, &Value::number(1.0, "px"));
    assert_eq!(ratio, Value::unitless(96.0));
}

#[test]
fn test_incompatible_units() {
    let err = evaluate_binary(
        &Value::number(1.0, "px"),
        &Value::number(1.0, "s"),
        BinaryOp::Add,
        P,
    )
    .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::IncompatibleUnits { .. }));
}

#[test]
fn test_division_by_zero_is_not_an_error() {
    let one = Value::unitless(1.0);
    let zero = Value::unitless(0.0);
    assert_eq!(bin(&one, BinaryOp::Div, &zero), Value::unquoted("Infinity"));
    assert_eq!(bin(&zero, BinaryOp::Div, &zero), Value::unquoted("NaN"));
    assert_eq!(bin(&one, BinaryOp::Mod, &zero), Value::unquoted("NaN"));
}

#[test]
fn test_comparisons() {
    let a = Value::number(1.0, "in");
    let b = Value::number(95.0, "px");
    assert_eq!(bin(&a, BinaryOp::Gt, &b), Value::TRUE);
    assert_eq!(bin(&a, BinaryOp::LtEq, &b), Value::FALSE);
    assert_eq!(bin(&a, BinaryOp::Eq, &Value::number(96.0, "px")), Value::TRUE);
    assert_eq!(
        bin(&Value::quoted("a"), BinaryOp::Eq, &Value::unquoted("a")),
        Value::TRUE
    );
    assert!(evaluate_binary(&Value::quoted("a"), &Value::unitless(1.0), BinaryOp::Lt, P).is_err());
}

#[test]
fn test_string_concatenation() {
    let s = bin(&Value::quoted("1"), BinaryOp::Add, &Value::unitless(1.0));
    assert_eq!(s.as_string().unwrap().text, "11");
    assert!(s.as_string().unwrap().quoted);

    let s = bin(&Value::unitless(1.0), BinaryOp::Add, &Value::quoted("a"));
    assert_eq!(css(&s), "\"1a\"");

    let s = bin(&Value::unquoted("a"), BinaryOp::Add, &Value::quoted("b"));
    assert_eq!(css(&s), "ab");

    let s = bin(&Value::unquoted("a"), BinaryOp::Sub, &Value::unquoted("b"));
    assert_eq!(css(&s), "a-b");
    let s = bin(&Value::unquoted("a"), BinaryOp::Div, &Value::unquoted("b"));
    assert_eq!(css(&s), "a/b");

    assert!(evaluate_binary(&Value::quoted("a"), &Value::unitless(2.0), BinaryOp::Mul, P).is_err());
}

#[test]
fn test_color_arithmetic() {
    let a = Value::Color(Color::rgb(16.0, 32.0, 48.0));
    let b = Value::Color(Color::rgb(1.0, 2.0, 3.0));
    assert_eq!(css(&bin(&a, BinaryOp::Add, &b)), "#112233");
    assert_eq!(css(&bin(&a, BinaryOp::Add, &Value::unitless(300.0))), "white");
    assert_eq!(css(&bin(&Value::unitless(1.0), BinaryOp::Add, &b)), "#020304");
    assert!(is_color_arithmetic(&a, &b, BinaryOp::Add));
    assert!(!is_color_arithmetic(&a, &b, BinaryOp::Eq));
}

#[test]
fn test_color_division_by_zero() {
    let a = Value::Color(Color::rgb(16.0, 32.0, 48.0));
    let zero = Value::Color(Color::rgb(0.0, 1.0, 1.0));
    let err = evaluate_binary(&a, &zero, BinaryOp::Div, P).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ZeroDivision);
    let err = evaluate_binary(&a, &Value::unitless(0.0), BinaryOp::Mod, P).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ZeroDivision);
}

#[test]
fn test_color_alpha_must_match() {
    let a = Value::Color(Color::rgba(0.0, 0.0, 0.0, 0.5));
    let b = Value::Color(Color::rgb(0.0, 0.0, 0.0));
    assert!(evaluate_binary(&a, &b, BinaryOp::Add, P).is_err());
}

#[test]
fn test_color_with_units_is_rejected() {
    let a = Value::Color(Color::rgb(0.0, 0.0, 0.0));
    let err = evaluate_binary(&a, &Value::number(1.0, "px"), BinaryOp::Add, P).unwrap_err();
    assert_eq!(
        err.message(),
        "Cannot add a number with units (1px) to a color (#000000)."
    );
}

#[test]
fn test_undefined_operations() {
    let err = evaluate_binary(&Value::Null, &Value::Null, BinaryOp::Add, P).unwrap_err();
    assert_eq!(err.message(), "Undefined operation: \"null plus null\".");

    let list = Value::space_list(vec![Value::unquoted("a"), Value::unquoted("b")]);
    assert_eq!(css(&bin(&list, BinaryOp::Add, &Value::TRUE)), "a btrue");
    assert!(evaluate_binary(&list, &Value::TRUE, BinaryOp::Mul, P).is_err());
}

#[test]
fn test_logic() {
    let one = Value::unitless(1.0);
    assert_eq!(bin(&Value::Null, BinaryOp::Or, &one), one);
    assert_eq!(bin(&Value::FALSE, BinaryOp::And, &one), Value::FALSE);
    assert_eq!(bin(&one, BinaryOp::And, &Value::Null), Value::Null);
}

#[test]
fn test_unary() {
    let n = Value::number(2.0, "px");
    assert_eq!(css(&evaluate_unary(&n, UnaryOp::Minus, P).unwrap()), "-2px");
    assert_eq!(evaluate_unary(&Value::Null, UnaryOp::Not, P).unwrap(), Value::TRUE);
    assert_eq!(
        css(&evaluate_unary(&Value::unquoted("a"), UnaryOp::Minus, P).unwrap()),
        "-a"
    );
    assert_eq!(
        css(&evaluate_unary(&Value::unquoted("b"), UnaryOp::Slash, P).unwrap()),
        "/b"
    );
}
