//! Map functions. The empty list `()` is accepted as the empty map.

use sable_value::{EvalResult, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::Interpreter;

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("map-get($map, $key)", map_get),
    ("map-merge($map1, $map2)", map_merge),
    ("map-remove($map, $keys...)", map_remove),
    ("map-keys($map)", map_keys),
    ("map-values($map)", map_values),
    ("map-has-key($map, $key)", map_has_key),
];

fn map_get(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let map = args.map(0)?;
    Ok(map.get(args.get(1)).cloned().unwrap_or(Value::Null))
}

fn map_merge(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let map1 = args.map(0)?;
    let map2 = args.map(1)?;
    Ok(Value::map(map1.merged(&map2)))
}

fn map_remove(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let mut map = args.map(0)?.into_owned();
    for key in args.get(1).list_items().iter() {
        map.remove(key);
    }
    Ok(Value::map(map))
}

fn map_keys(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::comma_list(args.map(0)?.keys().cloned().collect()))
}

fn map_values(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::comma_list(args.map(0)?.values().cloned().collect()))
}

fn map_has_key(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::bool(args.map(0)?.contains_key(args.get(1))))
}
