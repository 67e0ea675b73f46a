//! Reference expressions, evaluated inside a declaration.

use pretty_assertions::assert_eq;

use crate::common::value_of;

#[test]
fn compound_superselects_its_extension() {
    assert_eq!(value_of("is-superselector(\".foo\", \".foo.bar\")"), "true");
    assert_eq!(value_of("is-superselector(\".foo.bar\", \".foo\")"), "false");
}

#[test]
fn superselector_is_reflexive() {
    for selector in [".a", "a.b:hover", ".x > .y", "ul li, ol li"] {
        let call = format!("is-superselector(\"{selector}\", \"{selector}\")");
        assert_eq!(value_of(&call), "true", "{selector}");
    }
}

#[test]
fn addition_of_numbers_and_strings() {
    assert_eq!(value_of("1+1"), "2");
    assert_eq!(value_of("\"1\" + 1"), "\"11\"");
}

#[test]
fn mixing_black_and_white() {
    assert_eq!(value_of("mix(#000, #fff)"), "gray");
    assert_eq!(value_of("mix(#000, #fff, 50%)"), "gray");
}

#[test]
fn converting_units() {
    assert_eq!(value_of("1px + 1in"), "97px");
    assert_eq!(value_of("1in + 1px"), "1.0104166667in");
}

#[test]
fn numbers_reproduce_their_unit() {
    assert_eq!(value_of("1.5em"), "1.5em");
    assert_eq!(value_of("-0.25rem"), "-0.25rem");
}

#[test]
fn slash_in_declaration_is_kept() {
    assert_eq!(value_of("1/2"), "1/2");
    assert_eq!(value_of("(1/2)"), "0.5");
}

#[test]
fn division_inside_arithmetic_is_reduced() {
    assert_eq!(value_of("1 + 1/2"), "1.5");
    assert_eq!(value_of("1px/2px + 1"), "1.5");
    assert_eq!(value_of("max(1 + 1/2, 0)"), "1.5");
    assert_eq!(value_of("12px/1.5 serif"), "12px/1.5 serif");
}

#[test]
fn division_in_assignment_is_reduced() {
    let compilation = crate::common::compile("$x: 1 + 1/2; $y: 16px/24px + 0; a { x: $x; y: $y; }");
    let values: Vec<String> = compilation
        .declarations()
        .into_iter()
        .map(|(_, _, value)| value)
        .collect();
    assert_eq!(values, vec!["1.5", "0.6666666667"]);
}

#[test]
fn spaced_negative_number_after_an_operation_is_a_list_item() {
    assert_eq!(value_of("5 - 1 -1"), "4 -1");
    assert_eq!(value_of("5 + 1 -1"), "6 -1");
    assert_eq!(value_of("1-2 -3"), "-1 -3");
    assert_eq!(value_of("5 - 1 - 1"), "3");
}
