//! Strings, lists and maps.

use sable_ir::ListSeparator;

use super::Value;

#[derive(Clone, Debug)]
pub struct SassString {
    pub text: String,
    pub quoted: bool,
}

impl SassString {
    pub fn new(text: impl Into<String>, quoted: bool) -> Self {
        SassString {
            text: text.into(),
            quoted,
        }
    }

    /// Length in characters, as `str-length()` counts.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Quoted and unquoted strings with the same text are equal.
impl PartialEq for SassString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SassList {
    pub items: Vec<Value>,
    pub separator: ListSeparator,
    pub bracketed: bool,
}

impl SassList {
    pub fn new(items: Vec<Value>, separator: ListSeparator, bracketed: bool) -> Self {
        SassList {
            items,
            separator,
            bracketed,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered map whose keys are unique under value equality.
///
/// Lookups are linear: maps in stylesheets are small, and keys such as
/// `96px` and `1in` must collide even though they differ
/// structurally, which rules out hashing.
#[derive(Clone, Debug, Default)]
pub struct SassMap {
    entries: Vec<(Value, Value)>,
}

impl SassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs; a later pair overwrites an earlier equal key but
    /// keeps the earlier position.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map = SassMap::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        map
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Insert or overwrite. Returns the previous value for an equal key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Entries of `self` overwritten or extended by those of `other`.
    #[must_use]
    pub fn merged(&self, other: &SassMap) -> SassMap {
        let mut out = self.clone();
        for (k, v) in &other.entries {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Same keys mapping to equal values, in any order.
impl PartialEq for SassMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}
