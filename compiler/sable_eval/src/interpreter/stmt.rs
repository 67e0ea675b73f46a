//! Statement expansion.

use sable_ir::{
    Expr, IfClause, ImportTarget, Interpolation, SelectorList, SelectorSource, Span, Stmt,
    StmtKind,
};
use sable_selector::resolve_parent;
use sable_value::{quote, user_error, EvalError, EvalResult, Number, Value};

use super::{selector_error, Interpreter, Sink, StyleFrame};
use crate::css::{CssDeclaration, CssNode};

fn not_in_function() -> EvalError {
    EvalError::new("Functions can only contain variable declarations and control directives.")
}

impl Interpreter<'_> {
    /// Expand `body` in order. `Some` is the value of a `@return`.
    pub(crate) fn exec_block(
        &mut self,
        body: &[Stmt],
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        for stmt in body {
            let returned = self
                .exec_stmt(stmt, sink)
                .map_err(|e| e.or_span(stmt.span))?;
            if returned.is_some() {
                return Ok(returned);
            }
        }
        Ok(None)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, sink: &mut Sink<'_>) -> EvalResult<Option<Value>> {
        match &stmt.kind {
            StmtKind::Variable {
                name,
                value,
                is_default,
                is_global,
            } => {
                let value = self.eval_expr(value)?;
                match (*is_default, *is_global) {
                    (true, global) => self.env.assign_default(name, value, global),
                    (false, true) => self.env.define_global(name, value),
                    (false, false) => self.env.assign(name, value),
                }
            }
            StmtKind::Mixin(def) => self.env.define_mixin(def.clone()),
            StmtKind::Function(def) => self.env.define_function(def.clone()),
            StmtKind::Return(expr) => {
                return match sink {
                    Sink::Function => Ok(Some(self.eval_expr(expr)?)),
                    Sink::Css(_) => Err(EvalError::new(
                        "@return may only be used within a function.",
                    )),
                };
            }
            StmtKind::If {
                clauses,
                else_body,
            } => return self.exec_if(clauses, else_body.as_deref(), sink),
            StmtKind::Each {
                variables,
                list,
                body,
            } => return self.exec_each(variables, list, body, sink),
            StmtKind::For {
                variable,
                from,
                to,
                inclusive,
                body,
            } => return self.exec_for(variable, from, to, *inclusive, body, sink),
            StmtKind::While { condition, body } => return self.exec_while(condition, body, sink),
            StmtKind::Warn(expr) => {
                let value = self.eval_expr(expr)?;
                let text = self.message_text(&value);
                self.warnings.user_warning(stmt.span, text);
            }
            StmtKind::Debug(expr) => {
                let value = self.eval_expr(expr)?;
                let text = self.message_text(&value);
                self.warnings.debug(stmt.span, text);
            }
            StmtKind::Error(expr) => {
                let value = self.eval_expr(expr)?;
                return Err(user_error(self.message_text(&value)).with_span(stmt.span));
            }
            StmtKind::Comment(_) if matches!(sink, Sink::Function) => {}
            _ => {
                let Sink::Css(out) = sink else {
                    return Err(not_in_function());
                };
                self.expand_css_stmt(stmt, out)?;
            }
        }
        Ok(None)
    }

    /// Text of a `@warn`, `@debug` or `@error` message.
    fn message_text(&self, value: &Value) -> String {
        value.to_text(self.precision())
    }

    /// Statements that produce CSS.
    fn expand_css_stmt(&mut self, stmt: &Stmt, out: &mut Vec<CssNode>) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::StyleRule { selector, body } => self.expand_style_rule(selector, body, out),
            StmtKind::Declaration {
                name,
                value,
                body,
                is_custom_property,
            } => self.expand_declaration(
                name,
                value.as_ref(),
                body,
                *is_custom_property,
                stmt.span,
                out,
            ),
            StmtKind::Import(targets) => self.expand_import(targets, out),
            StmtKind::Include {
                name,
                args,
                content,
            } => self.include_mixin(name, args, content.as_ref(), stmt.span, &mut Sink::Css(out)),
            StmtKind::Content => self.expand_content(&mut Sink::Css(out)),
            StmtKind::Extend {
                selector,
                is_optional,
            } => self.expand_extend(selector, *is_optional),
            StmtKind::Media { query, body } => {
                let prelude = self.interpolate(query)?;
                self.expand_at_rule("media", prelude, Some(body), out)
            }
            StmtKind::AtRule {
                name,
                prelude,
                body,
            } => {
                let prelude = self.interpolate(prelude)?;
                self.expand_at_rule(name, prelude, body.as_deref(), out)
            }
            StmtKind::Comment(text) => {
                out.push(CssNode::Comment(text.clone()));
                Ok(())
            }
            // Handled by `exec_stmt`.
            _ => Ok(()),
        }
    }

    // Control flow

    fn exec_if(
        &mut self,
        clauses: &[IfClause],
        else_body: Option<&[Stmt]>,
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        let mut chosen = else_body;
        for clause in clauses {
            if self.eval_expr(&clause.condition)?.is_truthy() {
                chosen = Some(clause.body.as_slice());
                break;
            }
        }
        match chosen {
            Some(body) => self.exec_control_body(body, sink),
            None => Ok(None),
        }
    }

    /// Control directive bodies run in a semi-global scope: assignments to
    /// existing globals reach them, new names stay local.
    fn exec_control_body(
        &mut self,
        body: &[Stmt],
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        self.in_child_scope(true, |this| this.nested(|this| this.exec_block(body, sink)))
    }

    fn exec_each(
        &mut self,
        variables: &[String],
        list: &Expr,
        body: &[Stmt],
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        let list = self.eval_expr(list)?;
        // Maps iterate as `key value` pairs.
        let items = list.list_items().into_owned();
        self.in_child_scope(true, |this| {
            this.nested(|this| {
                for item in items {
                    if let [variable] = variables {
                        this.env.define(variable, item);
                    } else {
                        let parts = item.list_items();
                        for (i, variable) in variables.iter().enumerate() {
                            this.env
                                .define(variable, parts.get(i).cloned().unwrap_or(Value::Null));
                        }
                    }
                    let returned = this.exec_block(body, sink)?;
                    if returned.is_some() {
                        return Ok(returned);
                    }
                }
                Ok(None)
            })
        })
    }

    fn exec_for(
        &mut self,
        variable: &str,
        from: &Expr,
        to: &Expr,
        inclusive: bool,
        body: &[Stmt],
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        let start = self.loop_bound(from)?;
        let end = self.loop_bound(to)?;
        let end = if start.is_unitless() || end.is_unitless() {
            end.value
        } else {
            end.value_in(&start).map_err(|e| e.or_span(to.span))?
        };
        #[allow(clippy::cast_possible_truncation)]
        let (first, end) = (start.value.round() as i64, end.round() as i64);
        let step = if end >= first { 1 } else { -1 };
        let limit = if inclusive { end + step } else { end };
        tracing::trace!(variable, first, limit, "for");

        self.in_child_scope(true, |this| {
            this.nested(|this| {
                let mut i = first;
                while i != limit {
                    #[allow(clippy::cast_precision_loss)]
                    let value = Value::Number(start.with_value(i as f64));
                    this.env.define(variable, value);
                    let returned = this.exec_block(body, sink)?;
                    if returned.is_some() {
                        return Ok(returned);
                    }
                    i += step;
                }
                Ok(None)
            })
        })
    }

    /// A `@for` bound: an integer, possibly with units.
    fn loop_bound(&mut self, expr: &Expr) -> EvalResult<Number> {
        match self.eval_expr(expr)? {
            Value::Number(n) if n.is_int() => Ok(n),
            Value::Number(n) => Err(EvalError::new(format!(
                "{} is not an integer.",
                n.format(self.precision())
            ))
            .with_span(expr.span)),
            other => Err(EvalError::new(format!(
                "{} is not an integer.",
                other.inspect(self.precision())
            ))
            .with_span(expr.span)),
        }
    }

    fn exec_while(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
        sink: &mut Sink<'_>,
    ) -> EvalResult<Option<Value>> {
        while self.eval_expr(condition)?.is_truthy() {
            let returned = self.exec_control_body(body, sink)?;
            if returned.is_some() {
                return Ok(returned);
            }
        }
        Ok(None)
    }

    // CSS output

    fn expand_style_rule(
        &mut self,
        source: &SelectorSource,
        body: &[Stmt],
        out: &mut Vec<CssNode>,
    ) -> EvalResult<()> {
        let parsed = self.selector_from_source(source, true)?;
        let resolved =
            resolve_parent(&parsed, self.current_selector(), true).map_err(selector_error)?;
        tracing::trace!(selector = %resolved, "style rule");
        let (declarations, children) = self.expand_in_frame(Some(resolved.clone()), body)?;
        if !declarations.is_empty() {
            out.push(CssNode::Rule {
                selector: resolved,
                declarations,
            });
        }
        out.extend(children);
        Ok(())
    }

    fn selector_from_source(
        &mut self,
        source: &SelectorSource,
        allow_parent: bool,
    ) -> EvalResult<SelectorList> {
        match source {
            SelectorSource::Parsed(list) => Ok(list.clone()),
            SelectorSource::Interpolated(interp) => {
                let text = self.interpolate(interp)?;
                self.parse_selector_text(text.trim(), allow_parent)
                    .map_err(|e| e.or_span(interp.span))
            }
        }
    }

    /// Expand `body` in a new style frame and scope, returning the frame's
    /// declarations and the nodes nested in it.
    fn expand_in_frame(
        &mut self,
        selector: Option<SelectorList>,
        body: &[Stmt],
    ) -> EvalResult<(Vec<CssDeclaration>, Vec<CssNode>)> {
        self.styles.push(StyleFrame {
            selector,
            declarations: Vec::new(),
        });
        let mut children = Vec::new();
        let result = self.in_child_scope(false, |this| {
            this.nested(|this| this.exec_block(body, &mut Sink::Css(&mut children)))
        });
        let declarations = self
            .styles
            .pop()
            .map(|frame| frame.declarations)
            .unwrap_or_default();
        result?;
        Ok((declarations, children))
    }

    fn expand_declaration(
        &mut self,
        name: &Interpolation,
        value: Option<&Expr>,
        body: &[Stmt],
        is_custom_property: bool,
        span: Span,
        out: &mut Vec<CssNode>,
    ) -> EvalResult<()> {
        if self.styles.is_empty() {
            return Err(EvalError::new(
                "Properties are only allowed within rules, directives, mixin includes, or other properties.",
            ));
        }
        let name = self.interpolate(name)?;
        let name = match self.property_prefix.last() {
            Some(prefix) => format!("{prefix}-{name}"),
            None => name,
        };

        if let Some(expr) = value {
            let value = self.eval_expr(expr)?;
            if is_custom_property || !is_blank_value(&value) {
                value
                    .to_css(self.precision())
                    .map_err(|e| e.or_span(expr.span))?;
                if let Some(frame) = self.styles.last_mut() {
                    frame.declarations.push(CssDeclaration {
                        name: name.clone(),
                        value,
                        span,
                    });
                }
            }
        }

        if !body.is_empty() {
            self.property_prefix.push(name);
            let result = self.nested(|this| this.exec_block(body, &mut Sink::Css(out)));
            self.property_prefix.pop();
            result?;
        }
        Ok(())
    }

    fn expand_at_rule(
        &mut self,
        name: &str,
        prelude: String,
        body: Option<&[Stmt]>,
        out: &mut Vec<CssNode>,
    ) -> EvalResult<()> {
        let Some(body) = body else {
            out.push(CssNode::AtRule {
                name: name.to_owned(),
                prelude,
                children: None,
            });
            return Ok(());
        };

        // Keyframe selectors (`from`, `50%`) never nest under a style rule.
        let selector = if name.ends_with("keyframes") {
            None
        } else {
            self.current_selector().cloned()
        };
        let (declarations, children) = self.expand_in_frame(selector.clone(), body)?;
        let mut nodes = Vec::with_capacity(children.len() + 1);
        if !declarations.is_empty() {
            match selector {
                Some(selector) => nodes.push(CssNode::Rule {
                    selector,
                    declarations,
                }),
                None => nodes.extend(declarations.into_iter().map(CssNode::Declaration)),
            }
        }
        nodes.extend(children);
        out.push(CssNode::AtRule {
            name: name.to_owned(),
            prelude,
            children: Some(nodes),
        });
        Ok(())
    }

    fn expand_extend(&mut self, source: &SelectorSource, is_optional: bool) -> EvalResult<()> {
        let Some(extender) = self.current_selector().cloned() else {
            return Err(EvalError::new(
                "Extend directives may only be used within rules.",
            ));
        };
        let target = self.selector_from_source(source, false)?;
        tracing::trace!(extender = %extender, target = %target, "extend");
        self.extender
            .add(&extender, &target, is_optional)
            .map_err(selector_error)
    }

    // Imports

    fn expand_import(&mut self, targets: &[ImportTarget], out: &mut Vec<CssNode>) -> EvalResult<()> {
        for target in targets {
            match target {
                ImportTarget::Static(interp) => {
                    let url = self.interpolate(interp)?;
                    out.push(CssNode::Import { url });
                }
                ImportTarget::Dynamic { url, span } => {
                    self.import_stylesheet(url, out).map_err(|e| e.or_span(*span))?;
                }
            }
        }
        Ok(())
    }

    /// Load `url` through the resolver and expand it in place. A declined
    /// URL stays a plain CSS import.
    fn import_stylesheet(&mut self, url: &str, out: &mut Vec<CssNode>) -> EvalResult<()> {
        let base = self.imports.last().cloned().unwrap_or_default();
        let Some(resolved) = self.resolver.resolve(url, &base)? else {
            out.push(CssNode::Import { url: quote(url) });
            return Ok(());
        };

        if let Some(start) = self.imports.iter().position(|p| *p == resolved.path) {
            let mut chain: Vec<&str> = self.imports[start..].iter().map(String::as_str).collect();
            chain.push(&resolved.path);
            let steps: Vec<String> = chain
                .windows(2)
                .filter_map(|pair| match pair {
                    [from, to] => Some(format!("    {from} imports {to}")),
                    _ => None,
                })
                .collect();
            return Err(EvalError::new(format!(
                "An @import loop has been found:\n{}",
                steps.join("\n")
            )));
        }

        tracing::debug!(url, path = %resolved.path, "import");
        self.imports.push(resolved.path.clone());
        let result = self.nested(|this| {
            this.exec_block(&resolved.stylesheet.body, &mut Sink::Css(out))
                .map(|_| ())
        });
        self.imports.pop();
        result
    }
}

/// Declarations whose value prints as nothing are dropped.
fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.quoted && s.text.is_empty(),
        other => other.is_blank(),
    }
}
