//! Expression evaluation.

use sable_ir::{BinaryOp, Expr, ExprKind, InterpPart, Interpolation, SelectorComponent, SelectorList};
use sable_value::{undefined_variable, Color, EvalError, EvalResult, SassMap, Value};

use super::Interpreter;
use crate::operators::{evaluate_binary, evaluate_unary, is_color_arithmetic};

impl Interpreter<'_> {
    /// Evaluate `expr`, attaching its span to errors raised without one.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        self.eval_expr_kind(expr).map_err(|e| e.or_span(expr.span))
    }

    fn eval_expr_kind(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Number { value, unit } => Ok(Value::number(*value, unit)),
            ExprKind::Color {
                r,
                g,
                b,
                a,
                original,
            } => Ok(Value::Color(
                Color::rgba(*r, *g, *b, *a).with_original(original.clone()),
            )),
            ExprKind::String(interp) => Ok(Value::quoted(self.interpolate(interp)?)),
            ExprKind::Ident(name) => Ok(match Color::from_name(name) {
                Some(color) => Value::Color(color.with_original(name.clone())),
                None => Value::unquoted(name.clone()),
            }),
            ExprKind::Interpolated(interp) | ExprKind::Special(interp) => {
                Ok(Value::unquoted(self.interpolate(interp)?))
            }
            ExprKind::Boolean(b) => Ok(Value::bool(*b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Variable(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| undefined_variable(name)),
            ExprKind::Binary {
                op,
                lhs,
                rhs,
                ws_before,
                ws_after,
            } => self.eval_binary(expr, *op, lhs, rhs, *ws_before, *ws_after),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(&value, *op, self.precision())
            }
            ExprKind::Call { name, args } => self.eval_call(name, args, expr.span),
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::List {
                items,
                separator,
                bracketed,
            } => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::list(values, *separator, *bracketed))
            }
            ExprKind::Map(pairs) => self.eval_map(pairs),
            ExprKind::ParentRef => Ok(self
                .current_selector()
                .map_or(Value::Null, selector_value)),
        }
    }

    fn eval_map(&mut self, pairs: &[(Expr, Expr)]) -> EvalResult {
        let mut map = SassMap::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr)?;
            let value = self.eval_expr(value_expr)?;
            if map.contains_key(&key) {
                return Err(EvalError::new(format!(
                    "Duplicate key {} in map.",
                    key.inspect(self.precision())
                ))
                .with_span(key_expr.span));
            }
            map.insert(key, value);
        }
        Ok(Value::map(map))
    }

    fn eval_binary(
        &mut self,
        expr: &Expr,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        ws_before: bool,
        ws_after: bool,
    ) -> EvalResult {
        // Short-circuit before evaluating the right operand.
        match op {
            BinaryOp::Or => {
                let left = self.eval_expr(lhs)?;
                return if left.is_truthy() { Ok(left) } else { self.eval_expr(rhs) };
            }
            BinaryOp::And => {
                let left = self.eval_expr(lhs)?;
                return if left.is_truthy() { self.eval_expr(rhs) } else { Ok(left) };
            }
            _ => {}
        }

        let left = self.eval_expr(lhs)?;
        let right = self.eval_expr(rhs)?;
        let precision = self.precision();

        if op == BinaryOp::Div && expr.delayed {
            if let (Value::Number(l), Value::Number(r)) = (&left, &right) {
                return Ok(Value::unquoted(format!(
                    "{}/{}",
                    l.format(precision),
                    r.format(precision)
                )));
            }
        }

        let interpolated = |e: &Expr| matches!(e.kind, ExprKind::Interpolated(_));
        if op.is_arithmetic() && (interpolated(lhs) || interpolated(rhs)) {
            return Ok(Value::unquoted(format!(
                "{}{}{}{}{}",
                self.interpolated_text(&left)?,
                if ws_before { " " } else { "" },
                op.as_symbol(),
                if ws_after { " " } else { "" },
                self.interpolated_text(&right)?,
            )));
        }

        if is_color_arithmetic(&left, &right, op) {
            self.warnings.deprecation(
                expr.span,
                format!(
                    "The operation `{} {} {}` is deprecated and will be an error in future versions.",
                    left.inspect(precision),
                    op.as_symbol(),
                    right.inspect(precision)
                ),
            );
        }
        evaluate_binary(&left, &right, op, precision)
    }

    /// Resolve every `#{}` and concatenate.
    pub(crate) fn interpolate(&mut self, interp: &Interpolation) -> EvalResult<String> {
        if let Some(plain) = interp.as_plain() {
            return Ok(plain.to_owned());
        }
        let mut out = String::new();
        for part in &interp.parts {
            match part {
                InterpPart::Literal(text) => out.push_str(text),
                InterpPart::Expr(expr) => {
                    let value = self.eval_expr(expr)?;
                    let text = self
                        .interpolated_text(&value)
                        .map_err(|e| e.or_span(expr.span))?;
                    out.push_str(&text);
                }
            }
        }
        Ok(out)
    }

    /// Text a value contributes to interpolation: strings lose their quotes
    /// and `null` is empty.
    pub(crate) fn interpolated_text(&self, value: &Value) -> EvalResult<String> {
        match value {
            Value::String(s) => Ok(s.text.clone()),
            Value::Null => Ok(String::new()),
            other => other.to_css(self.precision()),
        }
    }
}

/// `&` as a value: a comma list of space lists of selector components.
pub(crate) fn selector_value(list: &SelectorList) -> Value {
    Value::comma_list(
        list.complexes
            .iter()
            .map(|complex| {
                Value::space_list(
                    complex
                        .components
                        .iter()
                        .map(|component| match component {
                            SelectorComponent::Compound(c) => Value::unquoted(c.to_string()),
                            SelectorComponent::Combinator(c) => Value::unquoted(c.as_symbol()),
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}
