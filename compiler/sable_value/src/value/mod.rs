//! Runtime values.
//!
//! Lists and maps sit behind `Arc` so that variable lookups and argument
//! passing clone a pointer, not a tree. Builders such as `set-nth()` and
//! `map-merge()` produce fresh containers; a shared container is never
//! mutated in place.
//!
//! Equality is Sass equality: numbers compare after unit conversion with a
//! small tolerance, quoted and unquoted strings with the same text are
//! equal, and maps compare regardless of entry order.

mod color;
mod composite;
mod names;
mod number;
mod serialize;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use sable_ir::ListSeparator;

pub use color::Color;
pub use composite::{SassList, SassMap, SassString};
pub use number::{
    conversion_factor, format_number, fuzzy_cmp, fuzzy_equals, fuzzy_round, Number, UnitList,
    EPSILON,
};
pub use serialize::quote;

/// Digits after the decimal point when no precision is configured.
pub const DEFAULT_PRECISION: u8 = 10;

#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Color(Color),
    String(SassString),
    List(Arc<SassList>),
    Map(Arc<SassMap>),
    Boolean(bool),
    Null,
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    // Factories

    pub fn number(value: f64, unit: &str) -> Self {
        Value::Number(Number::new(value, unit))
    }

    pub fn unitless(value: f64) -> Self {
        Value::Number(Number::unitless(value))
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Value::String(SassString::new(text, true))
    }

    pub fn unquoted(text: impl Into<String>) -> Self {
        Value::String(SassString::new(text, false))
    }

    pub fn list(items: Vec<Value>, separator: ListSeparator, bracketed: bool) -> Self {
        Value::List(Arc::new(SassList::new(items, separator, bracketed)))
    }

    pub fn space_list(items: Vec<Value>) -> Self {
        Value::list(items, ListSeparator::Space, false)
    }

    pub fn comma_list(items: Vec<Value>) -> Self {
        Value::list(items, ListSeparator::Comma, false)
    }

    /// `()`.
    pub fn empty_list() -> Self {
        Value::space_list(Vec::new())
    }

    pub fn map(map: SassMap) -> Self {
        Value::Map(Arc::new(map))
    }

    pub fn bool(b: bool) -> Self {
        Value::Boolean(b)
    }

    // Classification

    /// Name returned by `type-of()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Color(_) => "color",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Boolean(_) => "bool",
            Value::Null => "null",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Values that produce no CSS: `null`, and unbracketed lists made only
    /// of such values. Declarations with a blank value are dropped.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::List(list) => !list.bracketed && list.items.iter().all(Value::is_blank),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&SassString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// A map, treating the empty list `()` as the empty map.
    pub fn as_map(&self) -> Option<Cow<'_, SassMap>> {
        match self {
            Value::Map(map) => Some(Cow::Borrowed(map)),
            Value::List(list) if list.is_empty() => Some(Cow::Owned(SassMap::new())),
            _ => None,
        }
    }

    /// The value viewed as a list: list items, map entries as `key value`
    /// pairs, or a single-item list of anything else.
    pub fn list_items(&self) -> Cow<'_, [Value]> {
        match self {
            Value::List(list) => Cow::Borrowed(&list.items),
            Value::Map(map) => Cow::Owned(
                map.iter()
                    .map(|(k, v)| Value::space_list(vec![k.clone(), v.clone()]))
                    .collect(),
            ),
            other => Cow::Owned(vec![other.clone()]),
        }
    }

    pub fn separator(&self) -> ListSeparator {
        match self {
            Value::List(list) => list.separator,
            Value::Map(map) if !map.is_empty() => ListSeparator::Comma,
            _ => ListSeparator::Space,
        }
    }

    pub fn is_bracketed(&self) -> bool {
        matches!(self, Value::List(list) if list.bracketed)
    }

    /// Text of a string; the serialized form of anything else.
    pub fn to_text(&self, precision: u8) -> String {
        match self {
            Value::String(s) => s.text.clone(),
            other => other.inspect(precision),
        }
    }

    /// Drop the quotes of a string value.
    #[must_use]
    pub fn unquote(self) -> Self {
        match self {
            Value::String(s) if s.quoted => Value::unquoted(s.text),
            other => other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // `()` is both the empty list and the empty map.
            (Value::Map(m), Value::List(l)) | (Value::List(l), Value::Map(m)) => {
                m.is_empty() && l.is_empty()
            }
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect(DEFAULT_PRECISION))
    }
}
