//! Number functions.

use std::cmp::Ordering;

use sable_value::{fuzzy_round, unitless_error, EvalError, EvalResult, Number, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::Interpreter;

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("percentage($number)", percentage),
    ("round($number)", round),
    ("ceil($number)", ceil),
    ("floor($number)", floor),
    ("abs($number)", abs),
    ("min($numbers...)", min),
    ("max($numbers...)", max),
    ("unit($number)", unit),
    ("unitless($number)", unitless),
    ("comparable($number1, $number2)", comparable),
];

fn percentage(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let n = args.number(0)?;
    if !n.is_unitless() {
        return Err(unitless_error(args.signature(), args.param(0)));
    }
    Ok(Value::number(n.value * 100.0, "%"))
}

fn round(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let n = args.number(0)?;
    Ok(Value::Number(n.with_value(fuzzy_round(n.value, interp.precision()))))
}

fn ceil(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let n = args.number(0)?;
    Ok(Value::Number(n.with_value(n.value.ceil())))
}

fn floor(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let n = args.number(0)?;
    Ok(Value::Number(n.with_value(n.value.floor())))
}

fn abs(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let n = args.number(0)?;
    Ok(Value::Number(n.with_value(n.value.abs())))
}

/// The number in `$numbers...` that `keep` prefers over every other.
fn extremum(args: &Args<'_>, keep: Ordering) -> EvalResult {
    let items = args.get(0).list_items();
    let mut best: Option<&Number> = None;
    for item in items.iter() {
        let Value::Number(n) = item else {
            return Err(args.type_error(0, "number"));
        };
        best = match best {
            Some(current) if n.compare(current)? != keep => Some(current),
            _ => Some(n),
        };
    }
    best.map(|n| Value::Number(n.clone()))
        .ok_or_else(|| EvalError::new("At least one argument must be passed."))
}

fn min(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    extremum(args, Ordering::Less)
}

fn max(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    extremum(args, Ordering::Greater)
}

fn unit(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::quoted(args.number(0)?.unit()))
}

fn unitless(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    Ok(Value::bool(args.number(0)?.is_unitless()))
}

fn comparable(_: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let a = args.number(0)?;
    let b = args.number(1)?;
    Ok(Value::bool(a.comparable(b)))
}
