//! Selector containment.
//!
//! `A` is a superselector of `B` when every element `B` matches is also
//! matched by `A`, and possibly more. The check is purely structural and
//! conservative: anything it cannot prove is reported as `false`.
//!
//! Pseudo-classes with selector arguments need to know what encloses the
//! compound they sit in. That context is passed as `ancestors`: the
//! components of the complex selector before the compound, in document
//! order.

use sable_ir::{
    Combinator, ComplexSelector, CompoundSelector, PseudoSelector, SelectorComponent,
    SelectorList, SimpleSelector,
};
use sable_stack::{NestingExceeded, NestingGuard};

/// Whether `list1` matches every element `list2` matches.
///
/// Selector arguments nested deeper than the default limit make the answer
/// `false`; use [`Superselector::list`] to observe the limit instead.
pub fn is_superselector(list1: &SelectorList, list2: &SelectorList) -> bool {
    Superselector::default().list(list1, list2).unwrap_or(false)
}

/// [`is_superselector`] with an explicit bound on selector-argument nesting.
pub fn try_is_superselector(
    list1: &SelectorList,
    list2: &SelectorList,
    max_nesting: usize,
) -> Result<bool, NestingExceeded> {
    Superselector::new(max_nesting).list(list1, list2)
}

/// Whether `complex1` matches every element `complex2` matches.
pub fn complex_is_superselector(complex1: &ComplexSelector, complex2: &ComplexSelector) -> bool {
    Superselector::default()
        .complex(&complex1.components, &complex2.components)
        .unwrap_or(false)
}

/// Whether `compound1` matches every element `compound2` matches, given
/// the components that precede `compound2` in its complex selector.
///
/// `ancestors` is in document order: outermost first, ending with the
/// component directly before `compound2`. This is a prefix of the slice
/// [`complex_is_superselector`] walks, not an innermost-first list.
pub fn compound_is_superselector(
    compound1: &CompoundSelector,
    compound2: &CompoundSelector,
    ancestors: &[SelectorComponent],
) -> bool {
    Superselector::default()
        .compound(compound1, compound2, ancestors)
        .unwrap_or(false)
}

/// Containment checker.
///
/// Every recursion into a selector argument passes through one nesting
/// level of the guard.
#[derive(Clone, Debug, Default)]
pub struct Superselector {
    guard: NestingGuard,
}

impl Superselector {
    pub fn new(max_nesting: usize) -> Self {
        Superselector {
            guard: NestingGuard::new(max_nesting),
        }
    }

    fn guard_mut(check: &mut Superselector) -> &mut NestingGuard {
        &mut check.guard
    }

    /// Every complex selector of `list2` has a superselector in `list1`.
    pub fn list(
        &mut self,
        list1: &SelectorList,
        list2: &SelectorList,
    ) -> Result<bool, NestingExceeded> {
        for complex2 in &list2.complexes {
            if !self.list_covers_complex(list1, &complex2.components)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn list_covers_complex(
        &mut self,
        list1: &SelectorList,
        complex2: &[SelectorComponent],
    ) -> Result<bool, NestingExceeded> {
        for complex1 in &list1.complexes {
            if self.complex(&complex1.components, complex2)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Walk both component sequences left to right.
    ///
    /// Each compound of `complex1` is matched against the earliest
    /// compound of `complex2` it covers; the combinators that follow must
    /// then agree. The last compound of `complex1` must cover the last
    /// compound of `complex2`.
    pub fn complex(
        &mut self,
        complex1: &[SelectorComponent],
        complex2: &[SelectorComponent],
    ) -> Result<bool, NestingExceeded> {
        // Trailing combinators make a selector incomparable, even to itself.
        if ends_with_combinator(complex1) || ends_with_combinator(complex2) {
            return Ok(false);
        }

        let (mut i1, mut i2) = (0, 0);
        loop {
            let remaining1 = complex1.len() - i1;
            let remaining2 = complex2.len() - i2;
            if remaining1 == 0 || remaining2 == 0 || remaining1 > remaining2 {
                return Ok(false);
            }

            // Leading combinators are incomparable too.
            let (SelectorComponent::Compound(compound1), SelectorComponent::Compound(_)) =
                (&complex1[i1], &complex2[i2])
            else {
                return Ok(false);
            };

            if remaining1 == 1 {
                let Some(last2) = complex2.last().and_then(SelectorComponent::as_compound) else {
                    return Ok(false);
                };
                return self.compound(compound1, last2, &complex2[i2..complex2.len() - 1]);
            }

            // `complex1` still has components after this one, so the match
            // must leave at least one component of `complex2` over.
            let mut after = i2 + 1;
            while after < complex2.len() {
                if let SelectorComponent::Compound(compound2) = &complex2[after - 1] {
                    if self.compound(compound1, compound2, &complex2[i2..after - 1])? {
                        break;
                    }
                }
                after += 1;
            }
            if after == complex2.len() {
                return Ok(false);
            }

            match (complex1[i1 + 1].as_combinator(), complex2[after].as_combinator()) {
                (Some(combinator1), Some(combinator2)) => {
                    if !combinator_covers(combinator1, combinator2) {
                        return Ok(false);
                    }
                    // `.foo > .baz` covers neither `.foo > .bar > .baz` nor
                    // `.foo > .bar .baz`, although `.baz` covers both tails.
                    if remaining1 == 3 && remaining2 > 3 {
                        return Ok(false);
                    }
                    i1 += 2;
                    i2 = after + 1;
                }
                (Some(_), None) => return Ok(false),
                (None, Some(combinator2)) => {
                    // A descendant step covers a child step, nothing else.
                    if combinator2 != Combinator::Child {
                        return Ok(false);
                    }
                    i1 += 1;
                    i2 = after + 1;
                }
                (None, None) => {
                    i1 += 1;
                    i2 = after;
                }
            }
        }
    }

    /// Every simple selector of `compound1` covers something in
    /// `compound2`, and `compound2` has no pseudo-element `compound1` lacks.
    pub fn compound(
        &mut self,
        compound1: &CompoundSelector,
        compound2: &CompoundSelector,
        ancestors: &[SelectorComponent],
    ) -> Result<bool, NestingExceeded> {
        for simple1 in &compound1.simples {
            let covered = match simple1 {
                SimpleSelector::Pseudo(pseudo1) if pseudo1.selector.is_some() => {
                    self.selector_pseudo(pseudo1, compound2, ancestors)?
                }
                _ => simple_covers_compound(simple1, compound2),
            };
            if !covered {
                return Ok(false);
            }
        }
        let stray_element = compound2
            .simples
            .iter()
            .any(|simple2| simple2.is_pseudo_element() && !simple_covers_compound(simple2, compound1));
        Ok(!stray_element)
    }

    /// Whether a pseudo-class with a selector argument covers `compound2`.
    fn selector_pseudo(
        &mut self,
        pseudo1: &PseudoSelector,
        compound2: &CompoundSelector,
        ancestors: &[SelectorComponent],
    ) -> Result<bool, NestingExceeded> {
        NestingGuard::scope(self, Self::guard_mut, |check| {
            check.selector_pseudo_inner(pseudo1, compound2, ancestors)
        })
    }

    fn selector_pseudo_inner(
        &mut self,
        pseudo1: &PseudoSelector,
        compound2: &CompoundSelector,
        ancestors: &[SelectorComponent],
    ) -> Result<bool, NestingExceeded> {
        let Some(selector1) = pseudo1.selector.as_deref() else {
            return Ok(false);
        };
        match pseudo1.normalized.as_str() {
            "is" | "matches" | "where" | "any" => {
                if self.same_pseudo_covered(selector1, compound2, &pseudo1.name)? {
                    return Ok(true);
                }
                let mut context = ancestors.to_vec();
                context.push(SelectorComponent::Compound(compound2.clone()));
                for complex1 in &selector1.complexes {
                    if self.complex(&complex1.components, &context)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            "has" | "host" | "host-context" | "slotted" => {
                self.same_pseudo_covered(selector1, compound2, &pseudo1.name)
            }
            // `:not(X)` covers a compound that can never match any part of X.
            "not" => {
                for complex in &selector1.complexes {
                    if !self.not_covers_compound(pseudo1, compound2, complex)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            "current" => Ok(selector_pseudos_named(compound2, "current").any(|p2| p2 == pseudo1)),
            "nth-child" | "nth-last-child" => {
                for pseudo2 in compound2.simples.iter().filter_map(SimpleSelector::as_pseudo) {
                    if pseudo2.name != pseudo1.name || pseudo2.argument != pseudo1.argument {
                        continue;
                    }
                    if let Some(selector2) = pseudo2.selector.as_deref() {
                        if self.list(selector1, selector2)? {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// `compound2` has a pseudo-class named `name` whose argument
    /// `selector1` covers.
    fn same_pseudo_covered(
        &mut self,
        selector1: &SelectorList,
        compound2: &CompoundSelector,
        name: &str,
    ) -> Result<bool, NestingExceeded> {
        for pseudo2 in selector_pseudos_named(compound2, name) {
            if let Some(selector2) = pseudo2.selector.as_deref() {
                if self.list(selector1, selector2)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Whether `compound2` is provably excluded from `complex`, the
    /// argument of `:not` in `pseudo1`.
    fn not_covers_compound(
        &mut self,
        pseudo1: &PseudoSelector,
        compound2: &CompoundSelector,
        complex: &ComplexSelector,
    ) -> Result<bool, NestingExceeded> {
        let last1 = complex.last_compound();
        for simple2 in &compound2.simples {
            let excluded = match simple2 {
                // `*` excludes nothing and is excluded by nothing.
                SimpleSelector::Type { .. } if !simple2.is_universal() => last1.is_some_and(|c| {
                    c.simples.iter().any(|s| {
                        matches!(s, SimpleSelector::Type { .. }) && !s.is_universal() && s != simple2
                    })
                }),
                SimpleSelector::Id(_) => last1.is_some_and(|c| {
                    c.simples
                        .iter()
                        .any(|s| matches!(s, SimpleSelector::Id(_)) && s != simple2)
                }),
                SimpleSelector::Pseudo(pseudo2) => match pseudo2.selector.as_deref() {
                    Some(selector2) if pseudo2.name == pseudo1.name => {
                        self.list_covers_complex(selector2, &complex.components)?
                    }
                    _ => false,
                },
                _ => false,
            };
            if excluded {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn ends_with_combinator(components: &[SelectorComponent]) -> bool {
    components.last().is_some_and(SelectorComponent::is_combinator)
}

/// `~` covers `+` and `~`; every other combinator only covers itself.
fn combinator_covers(combinator1: Combinator, combinator2: Combinator) -> bool {
    match combinator1 {
        Combinator::General => combinator2 != Combinator::Child,
        _ => combinator1 == combinator2,
    }
}

/// Pseudo-classes named `name` in `compound` that carry a selector.
fn selector_pseudos_named<'c>(
    compound: &'c CompoundSelector,
    name: &'c str,
) -> impl Iterator<Item = &'c PseudoSelector> + 'c {
    compound
        .simples
        .iter()
        .filter_map(SimpleSelector::as_pseudo)
        .filter(move |p| p.is_class() && p.selector.is_some() && p.name == name)
}

fn simple_covers(simple1: &SimpleSelector, simple2: &SimpleSelector) -> bool {
    if simple1 == simple2 {
        return true;
    }
    // `:is(.a.b, .a)` only matches elements that `.a` matches.
    if let SimpleSelector::Pseudo(pseudo2) = simple2 {
        if let Some(selector2) = pseudo2.selector.as_deref() {
            if pseudo2.is_subselector_pseudo() {
                return selector2
                    .complexes
                    .iter()
                    .all(|complex| match complex.components.as_slice() {
                        [SelectorComponent::Compound(compound)] => compound.contains(simple1),
                        _ => false,
                    });
            }
        }
    }
    false
}

fn simple_covers_compound(simple1: &SimpleSelector, compound2: &CompoundSelector) -> bool {
    compound2
        .simples
        .iter()
        .any(|simple2| simple_covers(simple1, simple2))
}
