//! CSS serialization of selectors.

use std::fmt::{self, Write};

use super::{
    AttributeSelector, ComplexSelector, CompoundSelector, PseudoSelector, SelectorComponent,
    SelectorList, SimpleSelector,
};

fn write_namespaced(f: &mut fmt::Formatter<'_>, namespace: Option<&str>, name: &str) -> fmt::Result {
    if let Some(ns) = namespace {
        f.write_str(ns)?;
        f.write_char('|')?;
    }
    f.write_str(name)
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_namespaced(f, self.namespace.as_deref(), &self.name)?;
        if let (Some(op), Some(value)) = (self.op, &self.value) {
            f.write_str(op.as_symbol())?;
            f.write_str(value)?;
            if let Some(m) = self.modifier {
                write!(f, " {m}")?;
            }
        }
        f.write_char(']')
    }
}

impl fmt::Display for PseudoSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_syntactic_element { "::" } else { ":" })?;
        f.write_str(&self.name)?;
        match (&self.argument, &self.selector) {
            (None, None) => Ok(()),
            (Some(arg), None) => write!(f, "({arg})"),
            (None, Some(sel)) => write!(f, "({sel})"),
            (Some(arg), Some(sel)) => write!(f, "({arg} of {sel})"),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Type { name, namespace } => {
                write_namespaced(f, namespace.as_deref(), name)
            }
            SimpleSelector::Class(name) => write!(f, ".{name}"),
            SimpleSelector::Id(name) => write!(f, "#{name}"),
            SimpleSelector::Placeholder(name) => write!(f, "%{name}"),
            SimpleSelector::Attribute(attr) => fmt::Display::fmt(attr, f),
            SimpleSelector::Pseudo(pseudo) => fmt::Display::fmt(pseudo, f),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_parent {
            f.write_char('&')?;
            if let Some(suffix) = &self.parent_suffix {
                f.write_str(suffix)?;
            }
        }
        for simple in &self.simples {
            fmt::Display::fmt(simple, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            match component {
                SelectorComponent::Compound(c) => fmt::Display::fmt(c, f)?,
                SelectorComponent::Combinator(c) => f.write_str(c.as_symbol())?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, complex) in self.complexes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(complex, f)?;
        }
        Ok(())
    }
}
