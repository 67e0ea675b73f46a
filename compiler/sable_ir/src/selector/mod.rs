//! Selector model.
//!
//! A [`SelectorList`] is a comma list of [`ComplexSelector`]s. Each complex
//! selector is a sequence of compounds and explicit combinators; a descendant
//! combinator is implied where two compounds are adjacent.
//!
//! All types compare structurally, which is what the superselector engine
//! uses for "same simple selector".

mod display;

/// Pseudo-elements that may be written with a single colon.
const FAKE_PSEUDO_ELEMENTS: &[&str] = &["after", "before", "first-line", "first-letter"];

/// Pseudo-classes whose selector argument restricts the element itself.
const SUBSELECTOR_PSEUDOS: &[&str] = &["is", "matches", "where", "any", "nth-child", "nth-last-child"];

/// Strip a `-vendor-` prefix from a name. `-moz-any` becomes `any`.
pub fn unvendor(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'-' || bytes[1] == b'-' {
        return name;
    }
    match name[1..].find('-') {
        Some(i) if i + 2 < name.len() => &name[i + 2..],
        _ => name,
    }
}

/// `[name op value modifier]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    pub name: String,
    pub namespace: Option<String>,
    pub op: Option<AttrOp>,
    /// Value as written, quotes included.
    pub value: Option<String>,
    pub modifier: Option<char>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrOp {
    /// `=`
    Equal,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttrOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            AttrOp::Equal => "=",
            AttrOp::Includes => "~=",
            AttrOp::DashMatch => "|=",
            AttrOp::Prefix => "^=",
            AttrOp::Suffix => "$=",
            AttrOp::Substring => "*=",
        }
    }
}

/// `:name`, `::name`, `:name(argument)` or `:name(selector)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PseudoSelector {
    pub name: String,
    /// `name` without a vendor prefix.
    pub normalized: String,
    /// Written with `::`.
    pub is_syntactic_element: bool,
    /// Non-selector argument text: `2n+1` for `:nth-child(2n+1 of .a)`.
    pub argument: Option<String>,
    pub selector: Option<Box<SelectorList>>,
}

impl PseudoSelector {
    pub fn new(name: impl Into<String>, is_syntactic_element: bool) -> Self {
        let name = name.into();
        let normalized = unvendor(&name).to_ascii_lowercase();
        PseudoSelector {
            name,
            normalized,
            is_syntactic_element,
            argument: None,
            selector: None,
        }
    }

    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: SelectorList) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// True for `::x` and for the legacy single-colon elements.
    pub fn is_element(&self) -> bool {
        self.is_syntactic_element || FAKE_PSEUDO_ELEMENTS.contains(&self.normalized.as_str())
    }

    pub fn is_class(&self) -> bool {
        !self.is_element()
    }

    /// `:is`, `:matches`, `:any`, `:where`, `:nth-child`, `:nth-last-child`.
    pub fn is_subselector_pseudo(&self) -> bool {
        SUBSELECTOR_PSEUDOS.contains(&self.normalized.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Element name, or `*` for the universal selector.
    Type {
        name: String,
        namespace: Option<String>,
    },
    Class(String),
    Id(String),
    /// `%name`, only usable as an `@extend` target.
    Placeholder(String),
    Attribute(AttributeSelector),
    Pseudo(PseudoSelector),
}

impl SimpleSelector {
    pub fn type_selector(name: impl Into<String>) -> Self {
        SimpleSelector::Type {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn universal() -> Self {
        SimpleSelector::type_selector("*")
    }

    pub fn pseudo(name: impl Into<String>) -> Self {
        SimpleSelector::Pseudo(PseudoSelector::new(name, false))
    }

    pub fn as_pseudo(&self) -> Option<&PseudoSelector> {
        match self {
            SimpleSelector::Pseudo(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, SimpleSelector::Type { name, .. } if name == "*")
    }

    pub fn is_type_or_universal(&self) -> bool {
        matches!(self, SimpleSelector::Type { .. })
    }

    pub fn is_pseudo_element(&self) -> bool {
        self.as_pseudo().is_some_and(PseudoSelector::is_element)
    }
}

/// Simples written without whitespace: `a.b#c:hover`.
///
/// `has_parent` records a leading `&`, optionally followed by a suffix
/// (`&-item`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
    pub has_parent: bool,
    pub parent_suffix: Option<String>,
}

impl CompoundSelector {
    pub fn new(simples: Vec<SimpleSelector>) -> Self {
        CompoundSelector {
            simples,
            has_parent: false,
            parent_suffix: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.simples.is_empty() && !self.has_parent
    }

    pub fn len(&self) -> usize {
        self.simples.len()
    }

    pub fn contains(&self, simple: &SimpleSelector) -> bool {
        self.simples.contains(simple)
    }

    pub fn has_placeholder(&self) -> bool {
        self.simples
            .iter()
            .any(|s| matches!(s, SimpleSelector::Placeholder(_)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `>`
    Child,
    /// `+`
    Adjacent,
    /// `~`
    General,
}

impl Combinator {
    pub fn as_symbol(self) -> &'static str {
        match self {
            Combinator::Child => ">",
            Combinator::Adjacent => "+",
            Combinator::General => "~",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectorComponent {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

impl SelectorComponent {
    pub fn as_compound(&self) -> Option<&CompoundSelector> {
        match self {
            SelectorComponent::Compound(c) => Some(c),
            SelectorComponent::Combinator(_) => None,
        }
    }

    pub fn as_combinator(&self) -> Option<Combinator> {
        match self {
            SelectorComponent::Combinator(c) => Some(*c),
            SelectorComponent::Compound(_) => None,
        }
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, SelectorComponent::Combinator(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ComplexSelector {
    pub components: Vec<SelectorComponent>,
}

impl ComplexSelector {
    pub fn new(components: Vec<SelectorComponent>) -> Self {
        ComplexSelector { components }
    }

    /// A complex selector with a single compound.
    pub fn from_compound(compound: CompoundSelector) -> Self {
        ComplexSelector {
            components: vec![SelectorComponent::Compound(compound)],
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn last_compound(&self) -> Option<&CompoundSelector> {
        self.components.last().and_then(SelectorComponent::as_compound)
    }

    pub fn has_leading_combinator(&self) -> bool {
        self.components
            .first()
            .is_some_and(SelectorComponent::is_combinator)
    }

    pub fn has_trailing_combinator(&self) -> bool {
        self.components
            .last()
            .is_some_and(SelectorComponent::is_combinator)
    }

    pub fn compounds(&self) -> impl Iterator<Item = &CompoundSelector> {
        self.components.iter().filter_map(SelectorComponent::as_compound)
    }

    pub fn has_parent_ref(&self) -> bool {
        self.compounds().any(|c| c.has_parent)
    }

    pub fn has_placeholder(&self) -> bool {
        self.compounds().any(CompoundSelector::has_placeholder)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SelectorList {
    pub complexes: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(complexes: Vec<ComplexSelector>) -> Self {
        SelectorList { complexes }
    }

    pub fn len(&self) -> usize {
        self.complexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }

    pub fn has_parent_ref(&self) -> bool {
        self.complexes.iter().any(ComplexSelector::has_parent_ref)
    }
}

#[cfg(test)]
mod tests;
