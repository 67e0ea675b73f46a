use super::*;
use pretty_assertions::assert_eq;

fn compound(simples: Vec<SimpleSelector>) -> SelectorComponent {
    SelectorComponent::Compound(CompoundSelector::new(simples))
}

#[test]
fn test_unvendor() {
    assert_eq!(unvendor("-moz-any"), "any");
    assert_eq!(unvendor("-webkit-scrollbar-thumb"), "scrollbar-thumb");
    assert_eq!(unvendor("hover"), "hover");
    assert_eq!(unvendor("--custom"), "--custom");
    assert_eq!(unvendor("-x"), "-x");
}

#[test]
fn test_fake_pseudo_elements() {
    assert!(PseudoSelector::new("before", false).is_element());
    assert!(PseudoSelector::new("first-line", false).is_element());
    assert!(PseudoSelector::new("selection", true).is_element());
    assert!(!PseudoSelector::new("hover", false).is_element());
    assert!(PseudoSelector::new("hover", false).is_class());
}

#[test]
fn test_vendor_pseudo_normalized() {
    let p = PseudoSelector::new("-moz-any", false);
    assert_eq!(p.normalized, "any");
    assert!(p.is_subselector_pseudo());
}

#[test]
fn test_display_compound_and_complex() {
    let complex = ComplexSelector::new(vec![
        compound(vec![
            SimpleSelector::type_selector("a"),
            SimpleSelector::Class("b".into()),
        ]),
        SelectorComponent::Combinator(Combinator::Child),
        compound(vec![SimpleSelector::Id("c".into())]),
        compound(vec![SimpleSelector::pseudo("hover")]),
    ]);
    assert_eq!(complex.to_string(), "a.b > #c :hover");
    assert!(!complex.has_leading_combinator());
    assert!(!complex.has_trailing_combinator());
}

#[test]
fn test_display_attribute() {
    let attr = SimpleSelector::Attribute(AttributeSelector {
        name: "href".into(),
        namespace: None,
        op: Some(AttrOp::Prefix),
        value: Some("\"http\"".into()),
        modifier: Some('i'),
    });
    assert_eq!(attr.to_string(), "[href^=\"http\" i]");

    let bare = SimpleSelector::Attribute(AttributeSelector {
        name: "disabled".into(),
        namespace: Some("svg".into()),
        op: None,
        value: None,
        modifier: None,
    });
    assert_eq!(bare.to_string(), "[svg|disabled]");
}

#[test]
fn test_display_pseudo_with_selector() {
    let inner = SelectorList::new(vec![ComplexSelector::from_compound(CompoundSelector::new(
        vec![SimpleSelector::Class("a".into())],
    ))]);
    let not = PseudoSelector::new("not", false).with_selector(inner.clone());
    assert_eq!(not.to_string(), ":not(.a)");

    let nth = PseudoSelector::new("nth-child", false)
        .with_argument("2n+1")
        .with_selector(inner);
    assert_eq!(nth.to_string(), ":nth-child(2n+1 of .a)");
}

#[test]
fn test_display_parent_suffix() {
    let mut c = CompoundSelector::new(vec![SimpleSelector::Class("x".into())]);
    c.has_parent = true;
    c.parent_suffix = Some("-item".into());
    assert_eq!(c.to_string(), "&-item.x");
}

#[test]
fn test_trailing_combinator() {
    let complex = ComplexSelector::new(vec![
        compound(vec![SimpleSelector::Class("a".into())]),
        SelectorComponent::Combinator(Combinator::Adjacent),
    ]);
    assert!(complex.has_trailing_combinator());
    assert_eq!(complex.last_compound(), None);
}

#[test]
fn test_structural_equality() {
    let a = SimpleSelector::Class("foo".into());
    let b = SimpleSelector::Class("foo".into());
    assert_eq!(a, b);
    assert_ne!(a, SimpleSelector::Id("foo".into()));
    assert_ne!(
        SimpleSelector::Pseudo(PseudoSelector::new("before", false)),
        SimpleSelector::Pseudo(PseudoSelector::new("before", true))
    );
}
