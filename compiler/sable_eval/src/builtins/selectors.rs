//! Selector functions.

use sable_ir::SelectorList;
use sable_selector::try_is_superselector;
use sable_value::{EvalError, EvalResult, Value};

use super::{Args, BuiltinFn};
use crate::interpreter::{selector_value, Interpreter};

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("is-superselector($super, $sub)", is_superselector),
    ("selector-parse($selector)", selector_parse),
];

/// A selector argument: a string, or a list in the form `&` returns.
fn selector_arg(interp: &Interpreter<'_>, args: &Args<'_>, index: usize) -> EvalResult<SelectorList> {
    let text = match args.get(index) {
        Value::String(s) => s.text.clone(),
        Value::List(_) => args.get(index).to_css(interp.precision())?,
        _ => return Err(args.type_error(index, "string")),
    };
    interp
        .parse_selector_text(&text, false)
        .map_err(|e| EvalError::new(format!("${}: {}", args.param(index), e.message())))
}

fn is_superselector(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let sup = selector_arg(interp, args, 0)?;
    let sub = selector_arg(interp, args, 1)?;
    let result = try_is_superselector(&sup, &sub, interp.config().max_nesting)?;
    Ok(Value::bool(result))
}

fn selector_parse(interp: &mut Interpreter<'_>, args: &Args<'_>) -> EvalResult {
    let list = selector_arg(interp, args, 0)?;
    Ok(selector_value(&list))
}
