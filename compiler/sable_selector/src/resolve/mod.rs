//! Parent-reference resolution.
//!
//! A nested rule's selector is combined with every complex selector of the
//! enclosing rule. Complexes that mention `&` get the parent spliced in at
//! each `&`; the rest are prefixed with the parent as a descendant.

use sable_ir::{ComplexSelector, CompoundSelector, SelectorComponent, SelectorList, SimpleSelector};

use crate::SelectorError;

/// Resolve `child` against `parent`.
///
/// With no parent (a top-level rule) `&` is an error. `implicit_parent`
/// controls whether complexes without `&` get the parent prepended; it is
/// false for selectors inside `@at-root`-like contexts and for
/// `selector-parse()`.
pub fn resolve_parent(
    child: &SelectorList,
    parent: Option<&SelectorList>,
    implicit_parent: bool,
) -> Result<SelectorList, SelectorError> {
    let Some(parent) = parent else {
        if child.has_parent_ref() {
            return Err(SelectorError::TopLevelParent);
        }
        return Ok(child.clone());
    };

    let mut complexes = Vec::new();
    for complex in &child.complexes {
        if complex.has_parent_ref() {
            complexes.extend(splice_parent(complex, parent)?);
        } else if implicit_parent {
            complexes.extend(parent.complexes.iter().map(|p| {
                let mut components = p.components.clone();
                components.extend(complex.components.iter().cloned());
                ComplexSelector::new(components)
            }));
        } else {
            complexes.push(complex.clone());
        }
    }
    Ok(SelectorList::new(complexes))
}

/// Replace every `&` in `complex`, once per parent complex.
fn splice_parent(
    complex: &ComplexSelector,
    parent: &SelectorList,
) -> Result<Vec<ComplexSelector>, SelectorError> {
    let mut partials: Vec<Vec<SelectorComponent>> = vec![Vec::new()];
    for component in &complex.components {
        match component {
            SelectorComponent::Compound(compound) if compound.has_parent => {
                let mut next = Vec::with_capacity(partials.len() * parent.len());
                for partial in &partials {
                    for p in &parent.complexes {
                        let mut components = partial.clone();
                        components.extend(substitute(p, compound)?);
                        next.push(components);
                    }
                }
                partials = next;
            }
            _ => {
                for partial in &mut partials {
                    partial.push(component.clone());
                }
            }
        }
    }
    Ok(partials.into_iter().map(ComplexSelector::new).collect())
}

/// The components of `parent` with `compound`'s suffix and extra simples
/// merged into its last compound.
fn substitute(
    parent: &ComplexSelector,
    compound: &CompoundSelector,
) -> Result<Vec<SelectorComponent>, SelectorError> {
    let mut components = parent.components.clone();
    if compound.parent_suffix.is_none() && compound.simples.is_empty() {
        return Ok(components);
    }

    let invalid = || SelectorError::InvalidParent {
        selector: compound.to_string(),
        parent: parent.to_string(),
    };
    let Some(SelectorComponent::Compound(last)) = components.last_mut() else {
        return Err(invalid());
    };
    if let Some(suffix) = &compound.parent_suffix {
        match last.simples.last_mut() {
            Some(
                SimpleSelector::Type { name, .. }
                | SimpleSelector::Class(name)
                | SimpleSelector::Id(name)
                | SimpleSelector::Placeholder(name),
            ) if *name != "*" => name.push_str(suffix),
            _ => return Err(invalid()),
        }
    }
    last.simples.extend(compound.simples.iter().cloned());
    Ok(components)
}
