//! `@extend`.
//!
//! Every `@extend target` inside a rule records an [`Extension`]: "wherever
//! `target` appears, the rule's own selector applies too". Once every rule
//! has been seen, [`Extender::extend`] rewrites each rule's selector list,
//! adding one complex selector per place an extension applies.
//!
//! Generated selectors are deduplicated with the superselector check: a
//! generated complex that another complex in the same list already covers
//! adds nothing and is dropped.

use sable_ir::{ComplexSelector, CompoundSelector, SelectorComponent, SelectorList};

use crate::superselector::{complex_is_superselector, compound_is_superselector};
use crate::unify::unify_compound;
use crate::SelectorError;

/// One `extender { @extend target; }` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Extension {
    /// A complex selector of the rule holding the `@extend`.
    pub extender: ComplexSelector,
    /// The compound being extended.
    pub target: CompoundSelector,
    pub is_optional: bool,
}

/// Collected extensions of one stylesheet.
#[derive(Clone, Debug, Default)]
pub struct Extender {
    extensions: Vec<Extension>,
    matched: Vec<bool>,
}

impl Extender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Record `extender { @extend target; }`.
    ///
    /// Each complex of `target` must be a single compound.
    pub fn add(
        &mut self,
        extender: &SelectorList,
        target: &SelectorList,
        is_optional: bool,
    ) -> Result<(), SelectorError> {
        for complex in &target.complexes {
            let [SelectorComponent::Compound(compound)] = complex.components.as_slice() else {
                return Err(SelectorError::ComplexTarget {
                    target: complex.to_string(),
                });
            };
            for extender in &extender.complexes {
                self.extensions.push(Extension {
                    extender: extender.clone(),
                    target: compound.clone(),
                    is_optional,
                });
                self.matched.push(false);
            }
        }
        Ok(())
    }

    /// Apply every extension to `list`.
    ///
    /// The original complexes are kept in order; generated ones follow the
    /// complex they came from. Extensions apply to generated selectors too,
    /// but never twice along the same chain.
    pub fn extend(&mut self, list: &SelectorList) -> SelectorList {
        if self.extensions.is_empty() {
            return list.clone();
        }
        let mut out: Vec<ComplexSelector> = Vec::new();
        let mut generated: Vec<bool> = Vec::new();
        for complex in &list.complexes {
            out.push(complex.clone());
            generated.push(false);
            let mut queue = vec![(complex.clone(), Vec::<usize>::new())];
            while let Some((current, used)) = queue.pop() {
                for id in 0..self.extensions.len() {
                    if used.contains(&id) {
                        continue;
                    }
                    for woven in self.apply(id, &current) {
                        if out.contains(&woven) {
                            continue;
                        }
                        let mut chain = used.clone();
                        chain.push(id);
                        out.push(woven.clone());
                        generated.push(true);
                        queue.push((woven, chain));
                    }
                }
            }
        }
        let before = out.len();
        let trimmed = trim(out, &generated);
        tracing::debug!(
            selector = %list,
            generated = before - list.len(),
            kept = trimmed.len(),
            "applied extensions"
        );
        SelectorList::new(trimmed)
    }

    /// Extensions that are not `!optional` and never found their target.
    pub fn unmatched(&self) -> impl Iterator<Item = &Extension> {
        self.extensions
            .iter()
            .zip(&self.matched)
            .filter(|(ext, matched)| !ext.is_optional && !**matched)
            .map(|(ext, _)| ext)
    }

    /// New complexes from applying extension `id` at every compound of
    /// `complex` that contains its target.
    fn apply(&mut self, id: usize, complex: &ComplexSelector) -> Vec<ComplexSelector> {
        let mut results = Vec::new();
        for (index, component) in complex.components.iter().enumerate() {
            let SelectorComponent::Compound(compound) = component else {
                continue;
            };
            let ext = &self.extensions[id];
            let ancestors = &complex.components[..index];
            if !compound_is_superselector(&ext.target, compound, ancestors) {
                continue;
            }
            self.matched[id] = true;
            let ext = &self.extensions[id];

            let Some((extender_last, extender_prefix)) = ext.extender.components.split_last()
            else {
                continue;
            };
            let Some(extender_last) = extender_last.as_compound() else {
                continue;
            };
            let rest = CompoundSelector::new(
                compound
                    .simples
                    .iter()
                    .filter(|s| !ext.target.contains(s))
                    .cloned()
                    .collect(),
            );
            let Some(unified) = unify_compound(&rest, extender_last) else {
                continue;
            };

            let suffix = &complex.components[index + 1..];
            for mut prefix in weave(ancestors, extender_prefix) {
                prefix.push(SelectorComponent::Compound(unified.clone()));
                prefix.extend(suffix.iter().cloned());
                results.push(ComplexSelector::new(prefix));
            }
        }
        results
    }
}

/// Interleavings of two selector prefixes that each keep their own order.
///
/// When both end in a compound they are joined as descendants in either
/// order. A prefix ending in a combinator binds to what follows it, so it
/// has to come last.
fn weave(
    rule: &[SelectorComponent],
    extender: &[SelectorComponent],
) -> Vec<Vec<SelectorComponent>> {
    let ends_open = |p: &[SelectorComponent]| p.last().is_some_and(SelectorComponent::is_combinator);
    if rule.is_empty() || rule == extender {
        return vec![extender.to_vec()];
    }
    if extender.is_empty() {
        return vec![rule.to_vec()];
    }
    let joined = |first: &[SelectorComponent], second: &[SelectorComponent]| {
        let mut out = first.to_vec();
        out.extend(second.iter().cloned());
        out
    };
    match (ends_open(rule), ends_open(extender)) {
        (false, false) => vec![joined(rule, extender), joined(extender, rule)],
        (true, false) => vec![joined(extender, rule)],
        (false, true) => vec![joined(rule, extender)],
        (true, true) => Vec::new(),
    }
}

/// Drop generated complexes another complex of the list already covers.
///
/// Originals always stay. Among mutual superselectors the earlier one wins.
fn trim(complexes: Vec<ComplexSelector>, generated: &[bool]) -> Vec<ComplexSelector> {
    let mut keep = vec![true; complexes.len()];
    for i in 0..complexes.len() {
        if !generated[i] {
            continue;
        }
        let covered = (0..complexes.len()).any(|j| {
            if i == j || !keep[j] || !complex_is_superselector(&complexes[j], &complexes[i]) {
                return false;
            }
            j < i || !complex_is_superselector(&complexes[i], &complexes[j])
        });
        if covered {
            keep[i] = false;
        }
    }
    complexes
        .into_iter()
        .zip(keep)
        .filter_map(|(complex, kept)| kept.then_some(complex))
        .collect()
}

/// Remove complexes that mention a `%placeholder`; they never reach CSS.
pub fn without_placeholders(list: &SelectorList) -> SelectorList {
    SelectorList::new(
        list.complexes
            .iter()
            .filter(|c| !c.has_placeholder())
            .cloned()
            .collect(),
    )
}
