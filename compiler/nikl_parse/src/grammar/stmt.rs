//! Statement and block parsing.

use std::rc::Rc;

use nikl_ir::{
    AssignTarget, Block, ExprKind, ForBindings, FunctionDef, Param, Stmt, StmtKind, TokenKind,
    TypeTag,
};
use nikl_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse one statement plus an optional trailing `;`.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let stmt = ensure_sufficient_stack(|| self.parse_stmt_inner())?;
        self.eat(&TokenKind::Semicolon);
        Ok(stmt)
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Let => self.in_error_context(ErrorContext::LetBinding, Self::parse_let),
            TokenKind::Fn => {
                self.in_error_context(ErrorContext::FunctionDef, Self::parse_function_def)
            }
            TokenKind::If => self.in_error_context(ErrorContext::IfStatement, Self::parse_if),
            TokenKind::For => self.in_error_context(ErrorContext::ForLoop, Self::parse_for),
            TokenKind::Return => {
                self.in_error_context(ErrorContext::ReturnStatement, Self::parse_return)
            }
            TokenKind::Del => self.in_error_context(ErrorContext::DelStatement, Self::parse_del),
            _ => self.parse_expr_or_assign(),
        }
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.in_error_context(ErrorContext::Block, |p| {
            let open = p.expect(&TokenKind::LBrace)?.span;
            let mut stmts = Vec::new();

            loop {
                if p.eat(&TokenKind::Semicolon) {
                    continue;
                }
                if p.check(&TokenKind::RBrace) || p.is_at_end() {
                    break;
                }
                stmts.push(p.parse_stmt()?);
            }

            let close = p.cursor.expect_closing(&TokenKind::RBrace, open)?;
            Ok(Block::new(stmts, open.merge(close)))
        })
    }

    /// `let NAME (: TYPE)? = expr`
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Stmt::new(StmtKind::Let { name, ty, value }, span))
    }

    /// A type name, or `None` (valid only as a return type but accepted anywhere).
    pub(crate) fn parse_type(&mut self) -> Result<TypeTag, ParseError> {
        let tag = match self.current_kind() {
            TokenKind::IntType => TypeTag::Int,
            TokenKind::FloatType => TypeTag::Float,
            TokenKind::StringType => TypeTag::String,
            TokenKind::BoolType => TypeTag::Bool,
            TokenKind::ArrayType => TypeTag::Array,
            TokenKind::HashMapType => TypeTag::HashMap,
            TokenKind::TupleType => TypeTag::Tuple,
            TokenKind::None => TypeTag::None,
            found => {
                return Err(ParseError::expected_type(&found, self.current_span())
                    .with_context(ErrorContext::TypeAnnotation))
            }
        };
        self.advance();
        Ok(tag)
    }

    /// `fn NAME(params) (-> TYPE)? { block }`
    fn parse_function_def(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let params = self.in_error_context(ErrorContext::FunctionParams, Self::parse_params)?;
        let return_type = if self.eat(&TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        let span = start.merge(body.span);

        let def = FunctionDef {
            name,
            params,
            return_type,
            body,
            span,
        };
        Ok(Stmt::new(StmtKind::FunctionDef(Rc::new(def)), span))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let open = self.expect(&TokenKind::LParen)?.span;
        let (params, _) = self.comma_separated(open, &TokenKind::RParen, |p| {
            let (name, span) = p.cursor.expect_ident()?;
            let ty = if p.eat(&TokenKind::Colon) {
                Some(p.parse_type()?)
            } else {
                None
            };
            Ok(Param { name, ty, span })
        })?;

        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|earlier| earlier.name == param.name) {
                let text = self.cursor.interner().lookup(param.name);
                return Err(ParseError::new(
                    nikl_diagnostic::ErrorCode::E1001,
                    format!("duplicate parameter `{text}`"),
                    param.span,
                ));
            }
        }

        Ok(params)
    }

    /// `if expr { block } (else (if ... | { block }))?`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                let nested = self.parse_if()?;
                let span = nested.span;
                Some(Block::new(vec![nested], span))
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        let end = else_branch.as_ref().map_or(then_branch.span, |b| b.span);
        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            start.merge(end),
        ))
    }

    /// `for NAME (, NAME)? in expr { block }`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let (first, _) = self.cursor.expect_ident()?;
        let second = if self.eat(&TokenKind::Comma) {
            Some(self.cursor.expect_ident()?.0)
        } else {
            None
        };
        self.expect(&TokenKind::In)?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Ok(Stmt::new(
            StmtKind::For {
                bindings: ForBindings { first, second },
                iterable,
                body,
            },
            span,
        ))
    }

    /// `return expr?`
    ///
    /// The value is absent when the next token closes the block, ends the
    /// statement, or starts a new line.
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let ends_here = self.is_at_end()
            || self.at_line_start()
            || self.check(&TokenKind::RBrace)
            || self.check(&TokenKind::Semicolon);

        if ends_here {
            return Ok(Stmt::new(StmtKind::Return(None), start));
        }
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Stmt::new(StmtKind::Return(Some(value)), span))
    }

    /// `del NAME`
    fn parse_del(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance().span;
        let (name, span) = self.cursor.expect_ident()?;
        Ok(Stmt::new(StmtKind::Del(name), start.merge(span)))
    }

    /// Expression statement, or `target = value` when followed by `=`.
    fn parse_expr_or_assign(&mut self) -> Result<Stmt, ParseError> {
        let mut expr = self.parse_expr()?;
        if !self.check(&TokenKind::Eq) {
            let span = expr.span;
            return Ok(Stmt::new(StmtKind::Expr(expr), span));
        }

        self.in_error_context(ErrorContext::Assignment, |p| {
            let target_span = expr.span;
            let target = match expr.take_kind() {
                ExprKind::Ident(name) => AssignTarget::Name(name),
                ExprKind::Index { target, index } => AssignTarget::Index {
                    target: *target,
                    index: *index,
                },
                _ => return Err(ParseError::invalid_assignment_target(target_span)),
            };
            p.advance();
            let value = p.parse_expr()?;
            let span = target_span.merge(value.span);
            Ok(Stmt::new(StmtKind::Assign { target, value }, span))
        })
    }
}
