//! Expression parsing.
//!
//! Precedence, lowest first: comparison, additive, multiplicative, unary,
//! postfix (call and index), primary. All binary levels are left-associative.

use nikl_ir::{BinaryOp, Expr, ExprKind, Literal, Span, TokenKind, UnaryOp};
use nikl_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot overflow
    /// the host stack.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_comparison())
    }

    /// `== != < <= > >=`
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// `+ -`
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// `* / %`
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    /// `- expr`, `! expr`
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Calls and indexing, chained: `f(x)[0](y)`.
    ///
    /// A `(` or `[` at the start of a line begins a new statement instead.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.at_line_start() {
                break;
            }
            if self.check(&TokenKind::LParen) {
                expr = self.in_error_context(ErrorContext::FunctionCall, |p| p.parse_call(expr))?;
            } else if self.check(&TokenKind::LBracket) {
                expr =
                    self.in_error_context(ErrorContext::IndexExpression, |p| p.parse_index(expr))?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        let (args, close) = self.comma_separated(open, &TokenKind::RParen, Self::parse_expr)?;
        let span = callee.span.merge(close);
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    fn parse_index(&mut self, target: Expr) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        let index = self.parse_expr()?;
        let close = self.cursor.expect_closing(&TokenKind::RBracket, open)?;
        let span = target.span.merge(close);
        Ok(Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => ExprKind::Literal(Literal::Int(n)),
            TokenKind::Float(bits) => ExprKind::Literal(Literal::Float(f64::from_bits(bits))),
            TokenKind::String(name) => ExprKind::Literal(Literal::String(name)),
            TokenKind::True => ExprKind::Literal(Literal::Bool(true)),
            TokenKind::False => ExprKind::Literal(Literal::Bool(false)),
            TokenKind::None => ExprKind::Literal(Literal::None),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::LParen => return self.parse_paren_or_tuple(),
            TokenKind::LBracket => {
                return self.in_error_context(ErrorContext::ArrayLiteral, Self::parse_array)
            }
            TokenKind::LBrace => {
                return self.in_error_context(ErrorContext::MapLiteral, Self::parse_map)
            }
            found => return Err(ParseError::expected_expression(&found, span)),
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    /// `(expr)` groups; `()`, `(a,)` and `(a, b)` build tuples.
    fn parse_paren_or_tuple(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;

        if self.check(&TokenKind::RParen) {
            let close = self.advance().span;
            return Ok(Expr::new(ExprKind::Tuple(Vec::new()), open.merge(close)));
        }

        let mut first = self.parse_expr()?;
        if !self.eat(&TokenKind::Comma) {
            let close = self.cursor.expect_closing(&TokenKind::RParen, open)?;
            first.span = open.merge(close);
            return Ok(first);
        }

        self.in_error_context(ErrorContext::TupleLiteral, |p| {
            let (rest, close) = p.comma_separated(open, &TokenKind::RParen, Self::parse_expr)?;
            let mut elems = Vec::with_capacity(rest.len() + 1);
            elems.push(first);
            elems.extend(rest);
            Ok(Expr::new(ExprKind::Tuple(elems), open.merge(close)))
        })
    }

    /// `[a, b, ...]`
    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        let (elems, close) = self.comma_separated(open, &TokenKind::RBracket, Self::parse_expr)?;
        Ok(Expr::new(ExprKind::Array(elems), open.merge(close)))
    }

    /// `{key: value, ...}`
    fn parse_map(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        let (entries, close) = self.comma_separated(open, &TokenKind::RBrace, |p| {
            let key = p.parse_expr()?;
            p.expect(&TokenKind::Colon)?;
            let value = p.parse_expr()?;
            Ok((key, value))
        })?;
        Ok(Expr::new(ExprKind::HashMap(entries), open.merge(close)))
    }

    /// Items separated by `,` up to `close`, trailing comma allowed.
    ///
    /// The opening delimiter has already been consumed. Returns the items and
    /// the span of the closing delimiter.
    pub(crate) fn comma_separated<T>(
        &mut self,
        open: Span,
        close: &TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<(Vec<T>, Span), ParseError> {
        let mut items = Vec::new();

        loop {
            if self.check(close) || self.is_at_end() {
                break;
            }
            items.push(item(self)?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            if !self.check(close) && !self.is_at_end() {
                return Err(ParseError::expected_separator_or_terminator(
                    close,
                    &self.current_kind(),
                    self.current_span(),
                ));
            }
        }

        let close_span = self.cursor.expect_closing(close, open)?;
        Ok((items, close_span))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
