//! Expression lists and the binary operator precedence chain.
//!
//! Lowest to highest: comma list, space list, `or`, `and`, comparison,
//! `+`/`-`, `*`/`/`/`%`, then unary operators and atoms in `value.rs`.
//!
//! # Delayed division
//!
//! Number literals are parsed as delayed. A division whose operands are
//! both delayed stays delayed; a binary node with a binary operand never
//! is. Any other operator clears the flag on both operands, all the way
//! down, so `1 + 16px/24px` divides. Contexts that want arithmetic
//! (`parse_list(false)`: variables, parentheses, control directives) clear
//! it again, so only a bare `16px/24px` in a declaration value survives as
//! a slash.

use sable_ir::{BinaryOp, Expr, ExprKind, ListSeparator};
use sable_lexer_core::combinators::{byte_if, class_char, exactly_char, negate};
use sable_lexer_core::fragments::{self, is_space};
use sable_lexer_core::{alternatives, sequence, Matcher};
use sable_stack::ensure_sufficient_stack;

use super::{list_terminator, space_list_terminator};
use crate::{ParseError, Parser};

struct Operand {
    op: BinaryOp,
    ws_before: bool,
    ws_after: bool,
    rhs: Expr,
}

/// `-` directly followed by something other than whitespace.
fn minus_not_space(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'-'), negate(byte_if(is_space))).run(src, pos)
}

/// `-` that does not start a number (`- 2`, `-$x`, `-a`).
fn minus_not_number(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly_char(b'-'), negate(fragments::unsigned_number)).run(src, pos)
}

fn comparison(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(
        fragments::kwd_eq,
        fragments::kwd_neq,
        fragments::kwd_gte,
        fragments::kwd_gt,
        fragments::kwd_lte,
        fragments::kwd_lt,
    )
    .run(src, pos)
}

/// Clear the delayed flag on `expr`, its operands and, for a space list,
/// its items.
pub(crate) fn undelay(mut expr: Expr) -> Expr {
    clear_delayed(&mut expr);
    expr
}

fn clear_delayed(expr: &mut Expr) {
    expr.delayed = false;
    ensure_sufficient_stack(|| match &mut expr.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            clear_delayed(lhs);
            clear_delayed(rhs);
        }
        ExprKind::Unary { operand, .. } => clear_delayed(operand),
        ExprKind::List {
            items,
            separator: ListSeparator::Space,
            ..
        } => items.iter_mut().for_each(clear_delayed),
        _ => {}
    });
}

fn fold_operands(mut base: Expr, operands: Vec<Operand>) -> Expr {
    if operands.is_empty() {
        return base;
    }
    for Operand {
        op,
        ws_before,
        ws_after,
        mut rhs,
    } in operands
    {
        let delayed = op == BinaryOp::Div && base.delayed && rhs.delayed;
        if !delayed {
            clear_delayed(&mut base);
            clear_delayed(&mut rhs);
        }
        let span = base.span.merge(rhs.span);
        base = Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(base),
                rhs: Box::new(rhs),
                ws_before,
                ws_after,
            },
            span,
        )
        .with_delayed(delayed);
    }
    let chained = matches!(
        &base.kind,
        ExprKind::Binary { lhs, rhs, .. } if lhs.is_binary() || rhs.is_binary()
    );
    if chained {
        clear_delayed(&mut base);
    }
    base
}

impl Parser<'_> {
    /// Parse a comma list; singletons are returned unwrapped.
    ///
    /// With `delayed` false the result and its direct items are undelayed.
    pub(crate) fn parse_list(&mut self, delayed: bool) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_comma_list(delayed))
    }

    fn at_list_terminator(&self) -> bool {
        self.peek(list_terminator)
    }

    fn at_space_list_terminator(&self) -> bool {
        self.peek(space_list_terminator)
    }

    fn parse_comma_list(&mut self, delayed: bool) -> Result<Expr, ParseError> {
        tracing::trace!(pos = self.pos(), delayed, "parse_comma_list");
        let start = self.pos_after_ws();
        if self.at_list_terminator() {
            return Ok(Expr::new(
                ExprKind::List {
                    items: Vec::new(),
                    separator: ListSeparator::Space,
                    bracketed: false,
                },
                self.span(start, start),
            ));
        }

        let first = self.parse_space_list()?;
        if !self.peek_char(b',') {
            return Ok(if delayed { first } else { undelay(first) });
        }

        let mut items = vec![first];
        while self.scanner.lex_char(b',') {
            if self.at_list_terminator() {
                break;
            }
            items.push(self.parse_space_list()?);
        }
        if !delayed {
            items = items.into_iter().map(undelay).collect();
        }
        Ok(Expr::new(
            ExprKind::List {
                items,
                separator: ListSeparator::Comma,
                bracketed: false,
            },
            self.span_from(start),
        ))
    }

    /// Parse a space list; singletons are returned unwrapped.
    pub(crate) fn parse_space_list(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos_after_ws();
        let first = self.parse_disjunction()?;
        if self.at_space_list_terminator() {
            return Ok(first);
        }
        let mut items = vec![first];
        while !self.at_space_list_terminator() {
            items.push(self.parse_disjunction()?);
        }
        Ok(Expr::new(
            ExprKind::List {
                items,
                separator: ListSeparator::Space,
                bracketed: false,
            },
            self.span_from(start),
        ))
    }

    /// `a or b`
    fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_conjunction()?;
        let mut operands = Vec::new();
        while self.lex(fragments::keyword(b"or")).is_some() {
            operands.push(Operand {
                op: BinaryOp::Or,
                ws_before: true,
                ws_after: true,
                rhs: self.parse_conjunction()?,
            });
        }
        Ok(fold_operands(lhs, operands))
    }

    /// `a and b`
    fn parse_conjunction(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_relation()?;
        let mut operands = Vec::new();
        while self.lex(fragments::keyword(b"and")).is_some() {
            operands.push(Operand {
                op: BinaryOp::And,
                ws_before: true,
                ws_after: true,
                rhs: self.parse_relation()?,
            });
        }
        Ok(fold_operands(lhs, operands))
    }

    /// `==`, `!=`, `<`, `<=`, `>`, `>=`
    fn parse_relation(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_additive()?;
        let mut operands = Vec::new();
        while self.peek(comparison) {
            let ws_before = self.scanner.at_whitespace();
            let op = if self.lex(fragments::kwd_eq).is_some() {
                BinaryOp::Eq
            } else if self.lex(fragments::kwd_neq).is_some() {
                BinaryOp::NotEq
            } else if self.lex(fragments::kwd_gte).is_some() {
                BinaryOp::GtEq
            } else if self.lex(fragments::kwd_lte).is_some() {
                BinaryOp::LtEq
            } else if self.lex(fragments::kwd_gt).is_some() {
                BinaryOp::Gt
            } else if self.lex(fragments::kwd_lt).is_some() {
                BinaryOp::Lt
            } else {
                break;
            };
            let ws_after = self.scanner.at_whitespace();
            operands.push(Operand {
                op,
                ws_before,
                ws_after,
                rhs: self.parse_additive()?,
            });
        }
        Ok(fold_operands(lhs, operands))
    }

    /// Whether the `-` ahead is a subtraction rather than the start of the
    /// next list item.
    ///
    /// `-moz-foo` and other dashed identifiers are never subtractions; `1-2`
    /// and `$a - $b` are; `1 -2` is a two-item list.
    fn at_additive_operator(&self) -> bool {
        if self.peek(fragments::identifier) {
            return false;
        }
        self.peek_char(b'+')
            || (!self.scanner.at_whitespace() && self.peek(minus_not_space))
            || self.peek(minus_not_number)
    }

    /// `+` and `-`
    ///
    /// The operator test runs before every operand, so `$a - $b -1` stops
    /// after `$b` and leaves `-1` as the next list item.
    pub(crate) fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_multiplicative()?;
        let mut operands = Vec::new();
        while self.at_additive_operator() {
            let ws_before = self.scanner.at_whitespace();
            let op = if self.scanner.lex_char(b'+') {
                BinaryOp::Add
            } else if self.scanner.lex_char(b'-') {
                BinaryOp::Sub
            } else {
                break;
            };
            let ws_after = self.scanner.at_whitespace();
            operands.push(Operand {
                op,
                ws_before,
                ws_after,
                rhs: self.parse_multiplicative()?,
            });
        }
        Ok(fold_operands(lhs, operands))
    }

    /// `*`, `/` and `%`
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_factor()?;
        let mut operands = Vec::new();
        let mut ws_before = self.scanner.at_whitespace();
        while let Some(sym) = self.lex(class_char(b"*/%")) {
            let op = match sym {
                "*" => BinaryOp::Mul,
                "/" => BinaryOp::Div,
                _ => BinaryOp::Mod,
            };
            let ws_after = self.scanner.at_whitespace();
            operands.push(Operand {
                op,
                ws_before,
                ws_after,
                rhs: self.parse_factor()?,
            });
            ws_before = self.scanner.at_whitespace();
        }
        Ok(fold_operands(lhs, operands))
    }
}
