//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use std::mem;

use nikl_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Cursor over a `TokenList`.
///
/// Invariant: the list is non-empty and ends with `Eof`, so the position is
/// always valid and `advance` never moves past the final token.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// True when a line break separates the current token from the previous one.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.current().newline_before
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check if the current token has the same kind as `kind`, ignoring payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current().kind) == mem::discriminant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Peek at the token kind `n` positions ahead (`Eof` past the end).
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = %token.kind.display_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with "expected X, found Y".
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        ParseError::expected_token(kind, &self.current_kind(), self.current_span())
    }

    /// Consume an identifier, returning its interned name and span.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(ParseError::expected_ident(
                &self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Consume the closing delimiter of a bracketed form opened at `open`.
    ///
    /// Hitting end of input reports an unclosed delimiter pointing at the
    /// opener instead of a bare "expected".
    pub fn expect_closing(&mut self, close: &TokenKind, open: Span) -> Result<Span, ParseError> {
        if self.check(close) {
            return Ok(self.advance().span);
        }
        if self.is_at_end() {
            return Err(ParseError::unclosed(close, open, self.current_span()));
        }
        Err(self.make_expect_error(close))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn tokens(kinds: &[TokenKind]) -> TokenList {
        let mut list = TokenList::new();
        for (i, kind) in kinds.iter().enumerate() {
            let start = u32::try_from(i).unwrap_or(0);
            list.push(Token::new(*kind, Span::new(start, start + 1)));
        }
        list
    }

    #[test]
    fn advance_stops_at_eof() {
        let interner = StringInterner::new();
        let list = tokens(&[TokenKind::Let, TokenKind::Eof]);
        let mut cursor = Cursor::new(&list, &interner);

        assert_eq!(cursor.advance().kind, TokenKind::Let);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek_kind_at(5), TokenKind::Eof);
    }

    #[test]
    fn check_ignores_payload() {
        let interner = StringInterner::new();
        let list = tokens(&[TokenKind::Int(7), TokenKind::Eof]);
        let cursor = Cursor::new(&list, &interner);

        assert!(cursor.check(&TokenKind::Int(0)));
        assert!(!cursor.check(&TokenKind::Float(0)));
    }

    #[test]
    fn expect_reports_found_token() {
        let interner = StringInterner::new();
        let list = tokens(&[TokenKind::Comma, TokenKind::Eof]);
        let mut cursor = Cursor::new(&list, &interner);

        let err = cursor.expect(&TokenKind::RParen).unwrap_err();
        assert_eq!(err.message, "expected `)`, found `,`");
        assert_eq!(err.span, Span::new(0, 1));
    }

    #[test]
    fn expect_closing_at_eof_is_unclosed() {
        let interner = StringInterner::new();
        let list = tokens(&[TokenKind::Eof]);
        let mut cursor = Cursor::new(&list, &interner);

        let err = cursor
            .expect_closing(&TokenKind::RBracket, Span::new(4, 5))
            .unwrap_err();
        assert_eq!(err.code, nikl_diagnostic::ErrorCode::E1003);
        assert_eq!(err.opener, Some(Span::new(4, 5)));
    }
}
