//! Recursive descent parser for Nikl.
//!
//! Produces a `Block` for the whole program. Parsing stops at the first
//! error; there is no recovery.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError};

use nikl_ir::{Block, Span, StringInterner, Token, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
        }
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn at_line_start(&self) -> bool {
        self.cursor.at_line_start()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        self.cursor.expect(kind)
    }

    /// Run `f`, tagging any error it returns with `context` if it has none.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.or_context(context))
    }

    /// Parse the whole token stream as the program's root block.
    pub fn parse_program(mut self) -> Result<Block, ParseError> {
        let start = self.current_span();
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }

        let span = start.merge(self.current_span());
        Ok(Block::new(stmts, span))
    }
}

/// Parse tokens into the program's root block.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<Block, ParseError> {
    Parser::new(tokens, interner).parse_program()
}

#[cfg(test)]
mod tests;
