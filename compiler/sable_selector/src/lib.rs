//! Selector algebra for sable.
//!
//! Everything here works on the selector model from `sable_ir`:
//!
//! - [`superselector`]: containment between selectors, the primitive the
//!   rest is built on
//! - [`resolve`]: substituting parent selectors for `&` in nested rules
//! - [`unify`]: intersecting compound selectors
//! - [`extend`]: applying `@extend` to the selectors of finished rules

pub mod extend;
pub mod resolve;
pub mod superselector;
pub mod unify;

pub use extend::{without_placeholders, Extender, Extension};
pub use resolve::resolve_parent;
pub use superselector::{
    complex_is_superselector, compound_is_superselector, is_superselector, try_is_superselector,
    Superselector,
};
pub use unify::unify_compound;

/// Failure to build a selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Top-level selectors may not contain the parent selector \"&\".")]
    TopLevelParent,

    /// `&-suffix` or `&.x` applied to a parent it cannot extend.
    #[error("Invalid parent selector for \"{selector}\": \"{parent}\"")]
    InvalidParent { selector: String, parent: String },

    #[error("Can't extend {target}: can't extend nested selectors")]
    ComplexTarget { target: String },
}
