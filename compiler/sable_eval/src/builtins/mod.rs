//! Native functions.
//!
//! Each category module exports a `FUNCTIONS` table pairing a signature
//! with its implementation:
//!
//! ```text
//! ("mix($color1, $color2, $weight: 50%)", mix)
//! ```
//!
//! Signatures are parsed once with the stylesheet parser, as the head of a
//! `@function`, so defaults and rest parameters bind exactly like user
//! functions. A name may appear more than once; the first overload whose
//! arity fits the call wins (`rgba($color, $alpha)` next to the four
//! channel form).

mod colors;
mod introspection;
mod lists;
mod maps;
mod numbers;
mod selectors;
mod strings;

use std::borrow::Cow;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use sable_ir::{ParameterList, Span, StmtKind};
use sable_parse::ParserConfig;
use sable_value::{
    range_error, type_error, Color, EvalError, EvalResult, Number, SassMap, SassString, Value,
};

use crate::interpreter::Interpreter;

pub(crate) type BuiltinFn = fn(&mut Interpreter<'_>, &Args<'_>) -> EvalResult;

type FunctionTable = &'static [(&'static str, BuiltinFn)];

const CATEGORIES: [FunctionTable; 7] = [
    colors::FUNCTIONS,
    numbers::FUNCTIONS,
    strings::FUNCTIONS,
    lists::FUNCTIONS,
    maps::FUNCTIONS,
    introspection::FUNCTIONS,
    selectors::FUNCTIONS,
];

/// A native function with its parsed signature.
pub(crate) struct Builtin {
    pub name: String,
    /// Signature as written, used in argument errors.
    pub signature: &'static str,
    pub params: ParameterList,
    pub func: BuiltinFn,
}

impl Builtin {
    fn parse(signature: &'static str, func: BuiltinFn) -> Option<Self> {
        let source = format!("@function {signature} {{}}");
        let stylesheet = sable_parse::parse_stylesheet(&source, &ParserConfig::default()).ok()?;
        stylesheet.body.into_iter().find_map(|stmt| match stmt.kind {
            StmtKind::Function(def) => Some(Builtin {
                name: def.name.clone(),
                signature,
                params: def.params.clone(),
                func,
            }),
            _ => None,
        })
    }

    /// Whether a call with `count` arguments fits this overload.
    pub(crate) fn accepts(&self, count: usize) -> bool {
        let params = &self.params.params;
        let required = params
            .iter()
            .filter(|p| !p.is_rest && p.default.is_none())
            .count();
        let max = params.iter().filter(|p| !p.is_rest).count();
        count >= required && (count <= max || self.params.rest().is_some())
    }
}

struct BuiltinTable {
    functions: FxHashMap<String, Vec<Builtin>>,
}

impl BuiltinTable {
    fn build() -> Self {
        let mut functions: FxHashMap<String, Vec<Builtin>> = FxHashMap::default();
        for &(signature, func) in CATEGORIES.iter().flat_map(|table| table.iter()) {
            match Builtin::parse(signature, func) {
                Some(builtin) => functions
                    .entry(builtin.name.clone())
                    .or_default()
                    .push(builtin),
                None => tracing::error!(signature, "unparsable builtin signature"),
            }
        }
        tracing::debug!(count = functions.len(), "builtin table");
        BuiltinTable { functions }
    }
}

fn table() -> &'static BuiltinTable {
    static TABLE: OnceLock<BuiltinTable> = OnceLock::new();
    TABLE.get_or_init(BuiltinTable::build)
}

/// Overloads registered under `name`.
pub(crate) fn lookup(name: &str) -> Option<&'static [Builtin]> {
    table().functions.get(name).map(Vec::as_slice)
}

/// Bound arguments of a native call, in parameter order.
pub(crate) struct Args<'a> {
    pub builtin: &'a Builtin,
    pub values: Vec<Value>,
    pub span: Span,
}

static NULL: Value = Value::Null;

impl Args<'_> {
    pub(crate) fn signature(&self) -> &'static str {
        self.builtin.signature
    }

    /// Parameter name without `$`.
    pub(crate) fn param(&self, index: usize) -> &str {
        self.builtin
            .params
            .params
            .get(index)
            .map_or("", |p| p.name.as_str())
    }

    pub(crate) fn get(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&NULL)
    }

    pub(crate) fn is_null(&self, index: usize) -> bool {
        self.get(index).is_null()
    }

    #[cold]
    pub(crate) fn type_error(&self, index: usize, expected: &'static str) -> EvalError {
        type_error(self.signature(), self.param(index), expected)
    }

    pub(crate) fn number(&self, index: usize) -> EvalResult<&Number> {
        self.get(index)
            .as_number()
            .ok_or_else(|| self.type_error(index, "number"))
    }

    pub(crate) fn color(&self, index: usize) -> EvalResult<&Color> {
        self.get(index)
            .as_color()
            .ok_or_else(|| self.type_error(index, "color"))
    }

    pub(crate) fn string(&self, index: usize) -> EvalResult<&SassString> {
        self.get(index)
            .as_string()
            .ok_or_else(|| self.type_error(index, "string"))
    }

    pub(crate) fn map(&self, index: usize) -> EvalResult<Cow<'_, SassMap>> {
        self.get(index)
            .as_map()
            .ok_or_else(|| self.type_error(index, "map"))
    }

    /// An integer argument.
    pub(crate) fn int(&self, index: usize) -> EvalResult<i64> {
        let number = self.number(index)?;
        if !number.is_int() {
            return Err(EvalError::new(format!(
                "${}: {} is not an int.",
                self.param(index),
                number.format(sable_value::DEFAULT_PRECISION)
            )));
        }
        #[allow(clippy::cast_possible_truncation)]
        let value = number.value.round() as i64;
        Ok(value)
    }

    /// A number in `lo..=hi`. Units are not checked, so `50%` and `50`
    /// are the same amount.
    pub(crate) fn ranged(&self, index: usize, lo: f64, hi: f64, unit: &str) -> EvalResult<f64> {
        let value = self.number(index)?.value;
        if (lo..=hi).contains(&value)
            || sable_value::fuzzy_equals(value, lo)
            || sable_value::fuzzy_equals(value, hi)
        {
            Ok(value.clamp(lo, hi))
        } else {
            Err(range_error(
                self.signature(),
                self.param(index),
                format!("{}{unit}", sable_value::format_number(lo, 10)),
                format!("{}{unit}", sable_value::format_number(hi, 10)),
            ))
        }
    }

    /// Like [`Args::ranged`], but `null` means "not given".
    pub(crate) fn optional_ranged(
        &self,
        index: usize,
        lo: f64,
        hi: f64,
        unit: &str,
    ) -> EvalResult<Option<f64>> {
        if self.is_null(index) {
            Ok(None)
        } else {
            self.ranged(index, lo, hi, unit).map(Some)
        }
    }
}
