//! Selector parsing tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_ir::{AttrOp, Combinator, SelectorComponent, SimpleSelector};

use crate::{parse_selector, ParseErrorKind};

fn round_trip(src: &str) -> String {
    parse_selector(src, true).unwrap().to_string()
}

#[test]
fn test_combinators() {
    let list = parse_selector("a > b + c ~ d e", false).unwrap();
    let components = &list.complexes[0].components;
    assert_eq!(components.len(), 8);
    assert_eq!(components[1], SelectorComponent::Combinator(Combinator::Child));
    assert_eq!(components[3], SelectorComponent::Combinator(Combinator::Adjacent));
    assert_eq!(components[5], SelectorComponent::Combinator(Combinator::General));
    assert_eq!(list.to_string(), "a > b + c ~ d e");
}

#[test]
fn test_round_trips() {
    assert_eq!(round_trip("a.b#c:hover > [x=y]"), "a.b#c:hover > [x=y]");
    assert_eq!(round_trip("a,b ,  c"), "a, b, c");
    assert_eq!(round_trip("svg|rect, *|*"), "svg|rect, *|*");
    assert_eq!(round_trip("%placeholder"), "%placeholder");
    assert_eq!(round_trip("p::first-line"), "p::first-line");
}

#[test]
fn test_parent_reference_with_suffix() {
    let list = parse_selector("&-item .x", true).unwrap();
    let SelectorComponent::Compound(first) = &list.complexes[0].components[0] else {
        panic!("expected compound");
    };
    assert!(first.has_parent);
    assert_eq!(first.parent_suffix.as_deref(), Some("-item"));
    assert_eq!(list.to_string(), "&-item .x");
}

#[test]
fn test_parent_reference_rejected_when_not_allowed() {
    let err = parse_selector("a &", false).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ParentNotAllowed);
    assert_eq!(err.message, "Parent selectors aren't allowed here.");
}

#[test]
fn test_parent_reference_only_at_compound_start() {
    let err = parse_selector("a&", true).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidSelector);
}

#[test]
fn test_combinators_alone_are_rejected() {
    let err = parse_selector("> +", true).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidSelector);
    assert!(err.message.contains("expected selector"));

    let err = parse_selector("a,", true).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidSelector);
}

#[test]
fn test_leading_combinator_is_kept() {
    let list = parse_selector("> a", true).unwrap();
    assert!(list.complexes[0].has_leading_combinator());
}

#[test]
fn test_nth_child_binomial_is_compacted() {
    let list = parse_selector(":nth-child(2n + 1 of .a, .b)", true).unwrap();
    let SelectorComponent::Compound(compound) = &list.complexes[0].components[0] else {
        panic!("expected compound");
    };
    let pseudo = compound.simples[0].as_pseudo().unwrap();
    assert_eq!(pseudo.argument.as_deref(), Some("2n+1"));
    assert_eq!(pseudo.selector.as_ref().unwrap().len(), 2);
    assert_eq!(list.to_string(), ":nth-child(2n+1 of .a, .b)");

    assert_eq!(round_trip("li:nth-of-type(odd)"), "li:nth-of-type(odd)");
}

#[test]
fn test_nth_child_requires_binomial() {
    let err = parse_selector(":nth-child(foo)", true).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidSelector);
    assert!(err.message.contains("expected An+B expression"));
}

#[test]
fn test_selector_pseudo_arguments() {
    let list = parse_selector(":not(.a, .b)", true).unwrap();
    let SelectorComponent::Compound(compound) = &list.complexes[0].components[0] else {
        panic!("expected compound");
    };
    let pseudo = compound.simples[0].as_pseudo().unwrap();
    assert!(pseudo.argument.is_none());
    assert_eq!(pseudo.selector.as_ref().unwrap().len(), 2);

    assert_eq!(round_trip("::slotted(span)"), "::slotted(span)");
    assert_eq!(round_trip(":-moz-any(a, b)"), ":-moz-any(a, b)");
}

#[test]
fn test_raw_pseudo_argument() {
    let list = parse_selector(":lang(en)", true).unwrap();
    let SelectorComponent::Compound(compound) = &list.complexes[0].components[0] else {
        panic!("expected compound");
    };
    assert_eq!(
        compound.simples[0].as_pseudo().unwrap().argument.as_deref(),
        Some("en")
    );
}

#[test]
fn test_attribute_selector() {
    let list = parse_selector("[data-x='y' i]", true).unwrap();
    let SelectorComponent::Compound(compound) = &list.complexes[0].components[0] else {
        panic!("expected compound");
    };
    let SimpleSelector::Attribute(attr) = &compound.simples[0] else {
        panic!("expected attribute");
    };
    assert_eq!(attr.name, "data-x");
    assert_eq!(attr.op, Some(AttrOp::Equal));
    assert_eq!(attr.value.as_deref(), Some("'y'"));
    assert_eq!(attr.modifier, Some('i'));

    assert_eq!(round_trip("[href^=\"http\"]"), "[href^=\"http\"]");
    assert_eq!(round_trip("[disabled]"), "[disabled]");
}

#[test]
fn test_attribute_errors() {
    let err = parse_selector("[x!y]", true).unwrap_err();
    assert!(err.message.starts_with("invalid operator in attribute selector"));

    let err = parse_selector("[x=y", true).unwrap_err();
    assert_eq!(err.message, "unterminated attribute selector for x");
}

#[test]
fn test_keyframe_selectors() {
    assert_eq!(round_trip("50%"), "50%");
    assert_eq!(round_trip("from, to"), "from, to");
}
