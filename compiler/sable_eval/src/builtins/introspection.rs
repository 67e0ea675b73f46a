//! Introspection and meta functions.

use sable_value::{EvalResult, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::{EvaluatedArgs, Interpreter};

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("type-of($value)", type_of),
    ("inspect($value)", inspect),
    ("variable-exists($name)", variable_exists),
    ("global-variable-exists($name)", global_variable_exists),
    ("function-exists($name)", function_exists),
    ("mixin-exists($name)", mixin_exists),
    ("feature-exists($feature)", feature_exists),
    ("call($name, $args...)", call),
    // Reached through `call()`; direct calls are evaluated lazily.
    ("if($condition, $if-true, $if-false)", if_function),
];

/// Language features reported by `feature-exists()`.
const FEATURES: &[&str] = &[
    "global-variable-shadowing",
    "extend-selector-pseudoclass",
    "units-level-3",
    "at-error",
];

/// A name as given to the `*-exists` functions: `$` optional, `_` and `-`
/// interchangeable.
fn name_arg(args: &Args<'_>, index: usize) -> EvalResult<String> {
    let name = args.string(index)?;
    Ok(name.text.trim_start_matches('$').replace('_', "-"))
}

fn type_of(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::unquoted(args.get(0).type_name()))
}

fn inspect(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::unquoted(args.get(0).inspect(interp.precision())))
}

fn variable_exists(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let name = name_arg(args, 0)?;
    Ok(Value::bool(interp.env.lookup(&name).is_some()))
}

fn global_variable_exists(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let name = name_arg(args, 0)?;
    Ok(Value::bool(interp.env.lookup_global(&name).is_some()))
}

fn function_exists(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let name = name_arg(args, 0)?;
    let exists = interp.env.lookup_function(&name).is_some() || super::lookup(&name).is_some();
    Ok(Value::bool(exists))
}

fn mixin_exists(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let name = name_arg(args, 0)?;
    Ok(Value::bool(interp.env.lookup_mixin(&name).is_some()))
}

fn feature_exists(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let feature = args.string(0)?;
    Ok(Value::bool(FEATURES.contains(&feature.text.as_str())))
}

fn call(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let name = args.string(0)?.text.clone();
    let rest = args.get(1).list_items().into_owned();
    interp.call_function_by_name(&name, EvaluatedArgs::positional(rest), args.span)
}

fn if_function(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let chosen = if args.get(0).is_truthy() { 1 } else { 2 };
    Ok(args.get(chosen).clone())
}
