//! Binary and unary operators.
//!
//! Dispatch is on the pair of operand types. Numbers do unit-aware
//! arithmetic, colours work channel by channel, and strings concatenate.
//! Operands with no arithmetic meaning fall back to joining their CSS text
//! around the operator, except where Sass leaves the operation undefined.
//!
//! Division and modulo of numbers never fail: `1/0` is `Infinity` and
//! `1 % 0` is `NaN`, both represented as unquoted strings because a number
//! value is always finite. Colour channels divided by zero are an error.

use std::cmp::Ordering;

use sable_ir::{BinaryOp, UnaryOp};
use sable_value::{
    undefined_operation, zero_division, Color, EvalError, EvalResult, Number, SassString, Value,
};

/// Evaluate `left op right`.
///
/// `and`/`or` are resolved here on already evaluated operands; the
/// interpreter short-circuits them before getting this far.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp, precision: u8) -> EvalResult {
    match op {
        BinaryOp::Or => return Ok((if left.is_truthy() { left } else { right }).clone()),
        BinaryOp::And => return Ok((if left.is_truthy() { right } else { left }).clone()),
        BinaryOp::Eq => return Ok(Value::bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::bool(left != right)),
        _ => {}
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(a, b, op),
        (Value::Color(a), Value::Color(b)) => eval_color_binary(a, b, op, precision),
        (Value::Color(a), Value::Number(b)) => eval_color_number_binary(a, b, op, precision),
        (Value::Number(a), Value::Color(b)) => eval_number_color_binary(a, b, op, precision),
        (Value::String(_), _) | (_, Value::String(_)) => {
            eval_string_binary(left, right, op, precision)
        }
        _ => eval_fallback_binary(left, right, op, precision),
    }
}

/// Evaluate a prefix operator.
pub fn evaluate_unary(operand: &Value, op: UnaryOp, precision: u8) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::bool(!value.is_truthy())),
        (UnaryOp::Minus, Value::Number(n)) => Ok(finite(n.with_value(-n.value))),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(n.clone())),
        (_, Value::Map(_)) => Err(undefined_operation(
            String::new(),
            op.as_symbol(),
            operand.inspect(precision),
        )),
        (op, value) => Ok(Value::unquoted(format!(
            "{}{}",
            op.as_symbol(),
            css_text(value, precision)?
        ))),
    }
}

/// True when colour arithmetic is involved; such operations are deprecated.
pub fn is_color_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> bool {
    op.is_arithmetic()
        && matches!(
            (left, right),
            (Value::Color(_), Value::Color(_) | Value::Number(_))
                | (Value::Number(_), Value::Color(_))
        )
}

/// Wrap a numeric result, turning non-finite values into their sentinel text.
fn finite(number: Number) -> Value {
    let value = number.value;
    if value.is_finite() {
        Value::Number(number)
    } else if value.is_nan() {
        Value::unquoted("NaN")
    } else if value > 0.0 {
        Value::unquoted("Infinity")
    } else {
        Value::unquoted("-Infinity")
    }
}

/// Modulo whose result takes the sign of the divisor.
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn undefined(left: &Value, op: BinaryOp, right: &Value, precision: u8) -> EvalError {
    undefined_operation(left.inspect(precision), op.verb(), right.inspect(precision))
}

/// CSS text of an operand being concatenated. Maps have none.
fn css_text(value: &Value, precision: u8) -> EvalResult<String> {
    match value {
        Value::String(s) => Ok(s.text.clone()),
        other => other.to_css(precision),
    }
}

fn compare_result(ordering: Ordering, op: BinaryOp) -> Value {
    Value::bool(match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    })
}

// Type-specific evaluation

fn eval_number_binary(a: &Number, b: &Number, op: BinaryOp) -> EvalResult {
    let number = match op {
        BinaryOp::Add => a.combine(b, |x, y| x + y)?,
        BinaryOp::Sub => a.combine(b, |x, y| x - y)?,
        BinaryOp::Mod => a.combine(b, floored_mod)?,
        BinaryOp::Mul => a.multiply(b),
        BinaryOp::Div => a.divide(b),
        op if op.is_comparison() => return Ok(compare_result(a.compare(b)?, op)),
        _ => unreachable_op(op)?,
    };
    Ok(finite(number))
}

/// Operators handled before type dispatch never reach the typed helpers.
fn unreachable_op(op: BinaryOp) -> EvalResult<Number> {
    Err(EvalError::new(format!("unexpected operator {op}")))
}

fn channel_op(x: f64, y: f64, op: BinaryOp) -> EvalResult<f64> {
    Ok(match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div if y == 0.0 => return Err(zero_division()),
        BinaryOp::Div => x / y,
        BinaryOp::Mod if y == 0.0 => return Err(zero_division()),
        BinaryOp::Mod => floored_mod(x, y),
        _ => return Err(EvalError::new(format!("unexpected operator {op}"))),
    })
}

fn clamped(r: f64, g: f64, b: f64, a: f64) -> Color {
    Color::rgba(r.clamp(0.0, 255.0), g.clamp(0.0, 255.0), b.clamp(0.0, 255.0), a)
}

fn eval_color_binary(a: &Color, b: &Color, op: BinaryOp, precision: u8) -> EvalResult {
    if op.is_comparison() {
        return Err(undefined(&a.clone().into(), op, &b.clone().into(), precision));
    }
    if !sable_value::fuzzy_equals(a.a, b.a) {
        return Err(EvalError::new(format!(
            "Alpha channels must be equal: {} {} {}",
            a.inspect(precision),
            op.as_symbol(),
            b.inspect(precision)
        )));
    }
    Ok(Value::Color(clamped(
        channel_op(a.r, b.r, op)?,
        channel_op(a.g, b.g, op)?,
        channel_op(a.b, b.b, op)?,
        a.a,
    )))
}

fn eval_color_number_binary(a: &Color, b: &Number, op: BinaryOp, precision: u8) -> EvalResult {
    if op.is_comparison() {
        return Err(undefined(&a.clone().into(), op, &b.clone().into(), precision));
    }
    if !b.is_unitless() {
        let (verb, preposition) = match op {
            BinaryOp::Add => ("add", "to"),
            BinaryOp::Sub => ("subtract", "from"),
            BinaryOp::Mul => ("multiply", "with"),
            _ => ("divide", "into"),
        };
        return Err(EvalError::new(format!(
            "Cannot {verb} a number with units ({}) {preposition} a color ({}).",
            b.format(precision),
            a.inspect(precision)
        )));
    }
    let n = b.value;
    Ok(Value::Color(clamped(
        channel_op(a.r, n, op)?,
        channel_op(a.g, n, op)?,
        channel_op(a.b, n, op)?,
        a.a,
    )))
}

fn eval_number_color_binary(a: &Number, b: &Color, op: BinaryOp, precision: u8) -> EvalResult {
    let lhs = Value::Number(a.clone());
    let rhs = Value::Color(b.clone());
    match op {
        BinaryOp::Add | BinaryOp::Mul if a.is_unitless() => Ok(Value::Color(clamped(
            channel_op(a.value, b.r, op)?,
            channel_op(a.value, b.g, op)?,
            channel_op(a.value, b.b, op)?,
            b.a,
        ))),
        BinaryOp::Sub | BinaryOp::Div => joined(&lhs, op, &rhs, precision),
        _ => Err(undefined(&lhs, op, &rhs, precision)),
    }
}

/// `left` and `right` as unquoted text around the operator symbol.
fn joined(left: &Value, op: BinaryOp, right: &Value, precision: u8) -> EvalResult {
    Ok(Value::unquoted(format!(
        "{}{}{}",
        css_text(left, precision)?,
        op.as_symbol(),
        css_text(right, precision)?
    )))
}

/// At least one operand is a string.
///
/// `+` concatenates and is quoted when the left operand is quoted (or the
/// left is not a string and the right is). `-` and `/` join with the
/// operator.
fn eval_string_binary(left: &Value, right: &Value, op: BinaryOp, precision: u8) -> EvalResult {
    if matches!(left, Value::Map(_)) || matches!(right, Value::Map(_)) {
        return Err(undefined(left, op, right, precision));
    }
    match op {
        BinaryOp::Add => {
            let quoted = match (left, right) {
                (Value::String(s), _) => s.quoted,
                (_, Value::String(s)) => s.quoted,
                _ => false,
            };
            let text = css_text(left, precision)? + &css_text(right, precision)?;
            Ok(Value::String(SassString::new(text, quoted)))
        }
        BinaryOp::Sub | BinaryOp::Div => joined(left, op, right, precision),
        _ => Err(undefined(left, op, right, precision)),
    }
}

/// Operands without arithmetic: booleans, lists, `null`, maps.
fn eval_fallback_binary(left: &Value, right: &Value, op: BinaryOp, precision: u8) -> EvalResult {
    let both_null = left.is_null() && right.is_null();
    let has_map = matches!(left, Value::Map(_)) || matches!(right, Value::Map(_));
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Div if !both_null && !has_map => {
            if op == BinaryOp::Add {
                let text = css_text(left, precision)? + &css_text(right, precision)?;
                Ok(Value::unquoted(text))
            } else {
                joined(left, op, right, precision)
            }
        }
        _ => Err(undefined(left, op, right, precision)),
    }
}

#[cfg(test)]
mod tests;
