//! Calls: argument binding, functions, mixins and content blocks.
//!
//! Arguments are evaluated in the caller's scope, then bound in a fresh
//! scope whose parent is the callable's closure. Defaults are evaluated
//! after the earlier parameters are bound, so `$b: $a * 2` works.

use std::sync::Arc;

use sable_ir::{ArgumentList, ContentBlock, ParameterList, Span};
use sable_value::{
    missing_argument, too_many_arguments, undefined_mixin, unknown_argument, BacktraceFrame,
    EvalError, EvalResult, Value,
};

use super::{ContentFrame, Interpreter, Sink};
use crate::builtins::{self, Args, Builtin};
use crate::environment::{LocalScope, Scope, UserCallable};

/// Evaluated call-site arguments.
#[derive(Debug, Default)]
pub(crate) struct EvaluatedArgs {
    pub positional: Vec<Value>,
    /// Keyword arguments in call order, names without `$`.
    pub named: Vec<(String, Value)>,
}

impl EvaluatedArgs {
    pub(crate) fn positional(values: Vec<Value>) -> Self {
        EvaluatedArgs {
            positional: values,
            named: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }
}

fn keyword_name(name: &str) -> String {
    name.trim_start_matches('$').replace('_', "-")
}

impl Interpreter<'_> {
    /// Evaluate call-site arguments, spreading `list...` and `map...`.
    pub(crate) fn eval_arguments(&mut self, args: &ArgumentList) -> EvalResult<EvaluatedArgs> {
        let mut out = EvaluatedArgs::default();
        for arg in &args.args {
            let value = self.eval_expr(&arg.value)?;
            if arg.is_rest || arg.is_keyword_rest {
                match &value {
                    Value::Map(map) => {
                        for (key, value) in map.iter() {
                            let Value::String(name) = key else {
                                return Err(EvalError::new(format!(
                                    "Variable keyword argument map must have string keys.\n{} is not a string in {}.",
                                    key.inspect(self.precision()),
                                    value.inspect(self.precision())
                                ))
                                .with_span(arg.value.span));
                            };
                            out.named.push((keyword_name(&name.text), value.clone()));
                        }
                    }
                    Value::List(_) => out.positional.extend(value.list_items().iter().cloned()),
                    _ => out.positional.push(value),
                }
            } else if let Some(name) = &arg.name {
                out.named.push((keyword_name(name), value));
            } else {
                out.positional.push(value);
            }
        }
        Ok(out)
    }

    /// Bind `args` to `params` in the current scope.
    ///
    /// `callable` names the callee in messages (`Mixin foo`); `name` is its
    /// bare name. Returns the bound values in parameter order.
    pub(crate) fn bind_arguments(
        &mut self,
        callable: &str,
        name: &str,
        params: &ParameterList,
        args: EvaluatedArgs,
    ) -> EvalResult<Vec<Value>> {
        let fixed = params.params.iter().filter(|p| !p.is_rest).count();
        if params.rest().is_none() && args.positional.len() > fixed {
            return Err(too_many_arguments(name, fixed, args.positional.len()));
        }

        let EvaluatedArgs { positional, mut named } = args;
        let mut positional = positional.into_iter();
        let mut values = Vec::with_capacity(params.params.len());
        for param in &params.params {
            let value = if param.is_rest {
                Value::comma_list(positional.by_ref().collect())
            } else if let Some(value) = positional.next() {
                if named.iter().any(|(n, _)| *n == param.name) {
                    return Err(EvalError::new(format!(
                        "{callable} was passed argument ${} both by position and by name.",
                        param.name
                    )));
                }
                value
            } else if let Some(index) = named.iter().position(|(n, _)| *n == param.name) {
                named.remove(index).1
            } else if let Some(default) = &param.default {
                self.eval_expr(default)?
            } else {
                return Err(missing_argument(callable, &param.name));
            };
            self.env.define(&param.name, value.clone());
            values.push(value);
        }

        if let Some((unknown, _)) = named.first() {
            return Err(unknown_argument(callable, unknown));
        }
        Ok(values)
    }

    /// `name(args)` in an expression.
    pub(crate) fn eval_call(&mut self, name: &str, args: &ArgumentList, span: Span) -> EvalResult {
        let normalized = name.replace('_', "-");
        if let Some(function) = self.env.lookup_function(&normalized) {
            let evaluated = self.eval_arguments(args)?;
            return self.call_user_function(&function, evaluated, span);
        }
        if normalized == "if" {
            return self.eval_if_function(args);
        }
        if let Some(overloads) = builtins::lookup(&normalized) {
            let evaluated = self.eval_arguments(args)?;
            return self.call_builtin(overloads, evaluated, span);
        }
        self.plain_css_function(name, args)
    }

    /// Call a function by name with already evaluated arguments, as
    /// `call()` does. Unknown names produce plain CSS.
    pub(crate) fn call_function_by_name(
        &mut self,
        name: &str,
        args: EvaluatedArgs,
        span: Span,
    ) -> EvalResult {
        let normalized = name.replace('_', "-");
        if let Some(function) = self.env.lookup_function(&normalized) {
            return self.call_user_function(&function, args, span);
        }
        if let Some(overloads) = builtins::lookup(&normalized) {
            return self.call_builtin(overloads, args, span);
        }
        if !args.named.is_empty() {
            return Err(plain_css_keywords(name));
        }
        let mut parts = Vec::with_capacity(args.positional.len());
        for value in &args.positional {
            parts.push(value.to_css(self.precision())?);
        }
        Ok(Value::unquoted(format!("{name}({})", parts.join(", "))))
    }

    fn call_user_function(
        &mut self,
        function: &UserCallable,
        args: EvaluatedArgs,
        span: Span,
    ) -> EvalResult {
        let def = Arc::clone(&function.def);
        tracing::debug!(name = %def.name, args = args.len(), "call function");
        let closure = function
            .closure()
            .unwrap_or_else(|| self.env.global().clone());
        let scope = LocalScope::new(Scope::with_parent(closure, false));
        let frame = BacktraceFrame {
            name: format!("function {}", def.name),
            span,
        };
        let callable = format!("Function {}", def.name);
        let returned = self.with_scope(scope, |this| {
            this.in_frame(frame, |this| {
                this.bind_arguments(&callable, &def.name, &def.params, args)?;
                this.exec_block(&def.body, &mut Sink::Function)
            })
        })?;
        returned.ok_or_else(|| {
            EvalError::new(format!("Function {} finished without @return.", def.name))
                .with_span(span)
        })
    }

    /// `if($condition, $if-true, $if-false)` evaluates only the chosen branch.
    fn eval_if_function(&mut self, args: &ArgumentList) -> EvalResult {
        const PARAMS: [&str; 3] = ["condition", "if-true", "if-false"];
        let mut slots = [None, None, None];
        let mut position = 0;
        for arg in &args.args {
            let index = match &arg.name {
                Some(name) => {
                    let name = keyword_name(name);
                    PARAMS
                        .iter()
                        .position(|p| *p == name)
                        .ok_or_else(|| unknown_argument("Function if", &name))?
                }
                None => {
                    position += 1;
                    position - 1
                }
            };
            let slot = slots
                .get_mut(index)
                .ok_or_else(|| too_many_arguments("if", PARAMS.len(), args.len()))?;
            *slot = Some(&arg.value);
        }
        let [condition, if_true, if_false] = slots;
        let condition = condition.ok_or_else(|| missing_argument("Function if", PARAMS[0]))?;
        let if_true = if_true.ok_or_else(|| missing_argument("Function if", PARAMS[1]))?;
        let if_false = if_false.ok_or_else(|| missing_argument("Function if", PARAMS[2]))?;
        if self.eval_expr(condition)?.is_truthy() {
            self.eval_expr(if_true)
        } else {
            self.eval_expr(if_false)
        }
    }

    fn call_builtin(
        &mut self,
        overloads: &'static [Builtin],
        args: EvaluatedArgs,
        span: Span,
    ) -> EvalResult {
        let count = args.len();
        let Some(builtin) = overloads
            .iter()
            .find(|b| b.accepts(count))
            .or_else(|| overloads.first())
        else {
            return Err(EvalError::new("builtin has no signature").with_span(span));
        };
        let callable = format!("Function {}", builtin.name);
        let scope = LocalScope::new(Scope::with_parent(self.env.global().clone(), false));
        let values = self.with_scope(scope, |this| {
            this.bind_arguments(&callable, &builtin.name, &builtin.params, args)
        })?;
        let args = Args {
            builtin,
            values,
            span,
        };
        (builtin.func)(self, &args).map_err(|e| e.or_span(span))
    }

    /// A function nobody defined is emitted as CSS: `foo(1px, bar)`.
    fn plain_css_function(&mut self, name: &str, args: &ArgumentList) -> EvalResult {
        if args.has_named() {
            return Err(plain_css_keywords(name));
        }
        let mut parts = Vec::with_capacity(args.len());
        for arg in &args.args {
            let value = self.eval_expr(&arg.value)?;
            if arg.is_rest {
                for item in value.list_items().iter() {
                    parts.push(item.to_css(self.precision())?);
                }
            } else {
                parts.push(
                    value
                        .to_css(self.precision())
                        .map_err(|e| e.or_span(arg.value.span))?,
                );
            }
        }
        Ok(Value::unquoted(format!("{name}({})", parts.join(", "))))
    }

    /// `@include name(args) { content }`.
    pub(crate) fn include_mixin(
        &mut self,
        name: &str,
        args: &ArgumentList,
        content: Option<&Arc<ContentBlock>>,
        span: Span,
        sink: &mut Sink<'_>,
    ) -> EvalResult<()> {
        let mixin = self
            .env
            .lookup_mixin(name)
            .ok_or_else(|| undefined_mixin(name))?;
        let def = Arc::clone(&mixin.def);
        tracing::debug!(name = %def.name, "include mixin");

        let evaluated = self.eval_arguments(args)?;
        let content = content.map(|block| ContentFrame {
            block: Arc::clone(block),
            scope: self.env.current().clone(),
        });
        let closure = mixin
            .closure()
            .unwrap_or_else(|| self.env.global().clone());
        let scope = LocalScope::new(Scope::with_parent(closure, false));
        let frame = BacktraceFrame {
            name: format!("mixin {}", def.name),
            span,
        };
        let callable = format!("Mixin {}", def.name);

        self.content.push(content);
        let result = self.with_scope(scope, |this| {
            this.in_frame(frame, |this| {
                this.bind_arguments(&callable, &def.name, &def.params, evaluated)?;
                this.exec_block(&def.body, sink).map(|_| ())
            })
        });
        self.content.pop();
        result
    }

    /// `@content`: expand the running mixin's block in the scope it was
    /// written in. A mixin without a block makes this a no-op.
    pub(crate) fn expand_content(&mut self, sink: &mut Sink<'_>) -> EvalResult<()> {
        let Some(Some(frame)) = self.content.last().cloned() else {
            return Ok(());
        };
        // The block itself sees the content of the mixin that included it.
        let own = self.content.pop();
        let scope = LocalScope::new(Scope::with_parent(frame.scope.clone(), false));
        let result = self.with_scope(scope, |this| {
            this.nested(|this| this.exec_block(&frame.block.body, sink).map(|_| ()))
        });
        if let Some(own) = own {
            self.content.push(own);
        }
        result
    }
}

fn plain_css_keywords(name: &str) -> EvalError {
    EvalError::new(format!(
        "Plain CSS function {name}() doesn't support keyword arguments."
    ))
}
