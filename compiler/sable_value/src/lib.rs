//! Sable runtime values.
//!
//! This crate provides:
//! - The [`Value`] model: numbers with units, colours, strings, lists, maps,
//!   booleans and `null`
//! - Sass equality (unit-aware, with a small tolerance) and map key
//!   uniqueness built on it
//! - CSS and debug serialization with configurable precision
//! - The evaluation error taxonomy ([`EvalError`], [`EvalErrorKind`])
//!
//! Values are immutable once built. Containers are shared through `Arc`
//! and every transformation returns a new value.

mod error;
mod value;

pub use error::{
    extend_not_found, incompatible_units, invalid_css_value, missing_argument, nesting_limit,
    range_error, syntax_error, too_many_arguments, type_error, undefined_function,
    undefined_mixin, undefined_operation, undefined_variable, unitless_error, unknown_argument,
    user_error, zero_division, BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult,
};
pub use value::{
    conversion_factor, format_number, fuzzy_cmp, fuzzy_equals, fuzzy_round, quote, Color,
    Number, SassList, SassMap, SassString, UnitList, Value, DEFAULT_PRECISION, EPSILON,
};
