//! Compound selector unification.
//!
//! The unification of two compounds matches exactly the elements both
//! match. It fails when no element can match both, such as two different
//! element names or ids.

use sable_ir::{CompoundSelector, SimpleSelector};

/// Intersect two compounds, or `None` when they exclude each other.
///
/// The result keeps `compound1`'s order. Simples only `compound2` has are
/// added with the element name first, pseudo-classes after the other
/// simples and pseudo-elements last.
pub fn unify_compound(
    compound1: &CompoundSelector,
    compound2: &CompoundSelector,
) -> Option<CompoundSelector> {
    let mut simples = compound1.simples.clone();
    for simple in &compound2.simples {
        simples = unify_simple(simple, simples)?;
    }
    Some(CompoundSelector::new(simples))
}

fn unify_simple(
    simple: &SimpleSelector,
    mut simples: Vec<SimpleSelector>,
) -> Option<Vec<SimpleSelector>> {
    if simples.contains(simple) {
        return Some(simples);
    }
    match simple {
        SimpleSelector::Type { .. } => {
            let existing = simples.iter().position(SimpleSelector::is_type_or_universal);
            match existing {
                Some(_) if simple.is_universal() => {}
                Some(i) if simples[i].is_universal() => simples[i] = simple.clone(),
                Some(_) => return None,
                None if simple.is_universal() && !simples.is_empty() => {}
                None => simples.insert(0, simple.clone()),
            }
        }
        SimpleSelector::Id(_) => {
            if simples.iter().any(|s| matches!(s, SimpleSelector::Id(_))) {
                return None;
            }
            insert_before(&mut simples, simple, |s| s.as_pseudo().is_some());
        }
        SimpleSelector::Pseudo(pseudo) if pseudo.is_element() => {
            if simples.iter().any(SimpleSelector::is_pseudo_element) {
                return None;
            }
            simples.push(simple.clone());
        }
        SimpleSelector::Pseudo(_) => {
            insert_before(&mut simples, simple, SimpleSelector::is_pseudo_element);
        }
        _ => insert_before(&mut simples, simple, |s| s.as_pseudo().is_some()),
    }
    Some(simples)
}

/// Insert `simple` before the first simple matching `stop`, or at the end.
fn insert_before(
    simples: &mut Vec<SimpleSelector>,
    simple: &SimpleSelector,
    stop: impl Fn(&SimpleSelector) -> bool,
) {
    let at = simples.iter().position(stop).unwrap_or(simples.len());
    simples.insert(at, simple.clone());
}
