//! Expressions evaluated on their own, in an empty global scope.

use pretty_assertions::assert_eq;
use sable_value::EvalErrorKind;

use super::{css, eval, eval_err, P};
use crate::Value;

#[test]
fn test_integer_addition() {
    assert_eq!(eval("1+1"), Value::unitless(2.0));
    assert_eq!(css("1 + 1"), "2");
}

#[test]
fn test_string_plus_number_concatenates() {
    let value = eval("\"1\" + 1");
    assert_eq!(value, Value::quoted("11"));
    assert_eq!(value.to_css(P).unwrap(), "\"11\"");
}

#[test]
fn test_unit_arithmetic() {
    assert_eq!(css("1px + 2px"), "3px");
    assert_eq!(css("1px + 1in"), "97px");
    assert_eq!(css("2px * 3"), "6px");
    assert_eq!(css("10px / 4"), "2.5px");
}

#[test]
fn test_incompatible_units() {
    let err = eval_err("1px + 1s");
    assert!(matches!(err.kind, EvalErrorKind::IncompatibleUnits { .. }));
}

#[test]
fn test_standalone_division_is_evaluated() {
    assert_eq!(css("1/2"), "0.5");
}

#[test]
fn test_precision_rounding() {
    assert_eq!(css("1/3"), "0.3333333333");
}

#[test]
fn test_comparison_and_equality() {
    assert_eq!(eval("1px < 2px"), Value::TRUE);
    assert_eq!(eval("1in == 96px"), Value::TRUE);
    assert_eq!(eval("a == \"a\""), Value::TRUE);
    assert_eq!(eval("1 == 1px"), Value::TRUE);
    assert_eq!(eval("1px != 1s"), Value::TRUE);
}

#[test]
fn test_boolean_operators_short_circuit() {
    // The right operand would raise if evaluated.
    assert_eq!(eval("false and $missing"), Value::FALSE);
    assert_eq!(eval("1px or $missing"), Value::number(1.0, "px"));
    assert_eq!(eval("null or 2"), Value::unitless(2.0));
    assert_eq!(eval("not null"), Value::TRUE);
}

#[test]
fn test_undefined_variable() {
    let err = eval_err("$nope + 1");
    assert_eq!(err.message(), "Undefined variable: \"$nope\".");
    assert!(err.span.is_some());
}

#[test]
fn test_named_colour_keeps_spelling() {
    assert_eq!(css("red"), "red");
    assert_eq!(css("#F00"), "#F00");
}

#[test]
fn test_colour_arithmetic() {
    assert_eq!(css("#010203 + #040506"), "#050709");
}

#[test]
fn test_lists() {
    assert_eq!(css("1px 2px, 3px"), "1px 2px, 3px");
    assert_eq!(css("[a b]"), "[a b]");
    assert_eq!(css("(a, b, null, c)"), "a, b, c");
}

#[test]
fn test_map_has_no_css_form() {
    let value = eval("(a: 1, b: 2)");
    assert_eq!(value.inspect(P), "(a: 1, b: 2)");
    let err = value.to_css(P).unwrap_err();
    assert_eq!(err.message(), "(a: 1, b: 2) isn't a valid CSS value.");
}

#[test]
fn test_duplicate_map_key() {
    let err = eval_err("(a: 1, a: 2)");
    assert_eq!(err.message(), "Duplicate key a in map.");
}

#[test]
fn test_interpolation() {
    assert_eq!(css("#{1 + 1}px"), "2px");
    assert_eq!(css("\"a#{\"b\"}c\""), "\"abc\"");
    assert_eq!(css("#{null}x"), "x");
}

#[test]
fn test_interpolated_operand_keeps_operator_text() {
    assert_eq!(css("#{1} + 2"), "1 + 2");
    assert_eq!(css("#{a}/#{b}"), "a/b");
}

#[test]
fn test_unary_minus() {
    assert_eq!(css("-(1px + 2px)"), "-3px");
    assert_eq!(css("-foo"), "-foo");
}

#[test]
fn test_modulo_by_zero_is_nan() {
    assert_eq!(css("1 % 0"), "NaN");
}

#[test]
fn test_parent_reference_outside_rule_is_null() {
    assert_eq!(eval("&"), Value::Null);
}
