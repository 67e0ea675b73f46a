//! List functions.
//!
//! Every value is a list: a map is a comma list of `key value` pairs and
//! anything else a one-item space list. Indices are 1-based and negative
//! indices count from the end.

use sable_ir::ListSeparator;
use sable_value::{EvalError, EvalResult, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::Interpreter;

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("length($list)", length),
    ("nth($list, $n)", nth),
    ("set-nth($list, $n, $value)", set_nth),
    ("join($list1, $list2, $separator: auto, $bracketed: auto)", join),
    ("append($list, $val, $separator: auto)", append),
    ("zip($lists...)", zip),
    ("index($list, $value)", index),
    ("list-separator($list)", list_separator),
    ("is-bracketed($list)", is_bracketed),
];

#[allow(clippy::cast_precision_loss)]
fn count(n: usize) -> Value {
    Value::unitless(n as f64)
}

/// Resolve `$n` against a list of `len` items.
fn item_index(args: &Args<'_>, arg: usize, len: usize) -> EvalResult<usize> {
    let n = args.int(arg)?;
    let magnitude = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
    if n == 0 || magnitude > len {
        return Err(EvalError::new(format!(
            "${}: Invalid index {n} for a list with {len} elements.",
            args.param(arg)
        )));
    }
    Ok(if n > 0 { magnitude - 1 } else { len - magnitude })
}

/// An explicit `$separator`, or `None` for `auto`.
fn separator_arg(args: &Args<'_>, arg: usize) -> EvalResult<Option<ListSeparator>> {
    let name = args.string(arg)?;
    match name.text.as_str() {
        "auto" => Ok(None),
        "space" => Ok(Some(ListSeparator::Space)),
        "comma" => Ok(Some(ListSeparator::Comma)),
        _ => Err(EvalError::new(format!(
            "${}: Must be \"space\", \"comma\", or \"auto\".",
            args.param(arg)
        ))),
    }
}

/// The separator a list has on its own: one-item and empty lists have
/// none unless written with a comma.
fn own_separator(value: &Value) -> Option<ListSeparator> {
    match value {
        Value::List(list) if list.len() > 1 || list.separator == ListSeparator::Comma => {
            Some(list.separator)
        }
        Value::Map(map) if !map.is_empty() => Some(ListSeparator::Comma),
        _ => None,
    }
}

fn length(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(count(args.get(0).list_items().len()))
}

fn nth(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let items = args.get(0).list_items();
    let at = item_index(args, 1, items.len())?;
    Ok(items.get(at).cloned().unwrap_or(Value::Null))
}

fn set_nth(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let list = args.get(0);
    let mut items = list.list_items().into_owned();
    let at = item_index(args, 1, items.len())?;
    if let Some(slot) = items.get_mut(at) {
        *slot = args.get(2).clone();
    }
    Ok(Value::list(items, list.separator(), list.is_bracketed()))
}

fn join(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let list1 = args.get(0);
    let list2 = args.get(1);
    let separator = separator_arg(args, 2)?
        .or_else(|| own_separator(list1))
        .or_else(|| own_separator(list2))
        .unwrap_or_default();
    let bracketed = match args.get(3) {
        Value::String(s) if s.text == "auto" => list1.is_bracketed(),
        other => other.is_truthy(),
    };
    let mut items = list1.list_items().into_owned();
    items.extend(list2.list_items().iter().cloned());
    Ok(Value::list(items, separator, bracketed))
}

fn append(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let list = args.get(0);
    let separator = separator_arg(args, 2)?
        .or_else(|| own_separator(list))
        .unwrap_or_default();
    let mut items = list.list_items().into_owned();
    items.push(args.get(1).clone());
    Ok(Value::list(items, separator, list.is_bracketed()))
}

fn zip(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let lists: Vec<Vec<Value>> = args
        .get(0)
        .list_items()
        .iter()
        .map(|list| list.list_items().into_owned())
        .collect();
    let shortest = lists.iter().map(Vec::len).min().unwrap_or(0);
    let rows = (0..shortest)
        .map(|i| {
            Value::space_list(
                lists
                    .iter()
                    .filter_map(|list| list.get(i).cloned())
                    .collect(),
            )
        })
        .collect();
    Ok(Value::comma_list(rows))
}

fn index(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let needle = args.get(1);
    Ok(args
        .get(0)
        .list_items()
        .iter()
        .position(|item| item == needle)
        .map_or(Value::Null, |i| count(i + 1)))
}

fn list_separator(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::unquoted(args.get(0).separator().name()))
}

fn is_bracketed(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::bool(args.get(0).is_bracketed()))
}
