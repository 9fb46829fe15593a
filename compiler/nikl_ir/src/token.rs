//! Lexer output: tokens and token lists.

use std::fmt;
use std::ops::{Deref, Index};

use crate::{Name, Span};

/// Kind of a token, with its literal payload where it has one.
///
/// Float literals are stored as raw bits so `TokenKind` stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(u64),
    String(Name),
    Ident(Name),

    // Keywords
    Let,
    Fn,
    If,
    Else,
    For,
    In,
    Return,
    Del,
    True,
    False,
    None,

    // Type names
    IntType,
    FloatType,
    StringType,
    BoolType,
    ArrayType,
    HashMapType,
    TupleType,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Arrow,

    // Operators
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected X, found Y" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::String(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Let => "`let`",
            TokenKind::Fn => "`fn`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::In => "`in`",
            TokenKind::Return => "`return`",
            TokenKind::Del => "`del`",
            TokenKind::True => "`True`",
            TokenKind::False => "`False`",
            TokenKind::None => "`None`",
            TokenKind::IntType => "`Int`",
            TokenKind::FloatType => "`Float`",
            TokenKind::StringType => "`String`",
            TokenKind::BoolType => "`Bool`",
            TokenKind::ArrayType => "`Array`",
            TokenKind::HashMapType => "`HashMap`",
            TokenKind::TupleType => "`Tuple`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Arrow => "`->`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::Eof => "end of input",
        }
    }

    /// True for the type-name keywords usable in annotations.
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::BoolType
                | TokenKind::ArrayType
                | TokenKind::HashMapType
                | TokenKind::TupleType
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A newline separated this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            newline_before: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_newline_before(mut self, newline_before: bool) -> Self {
        self.newline_before = newline_before;
        self
    }
}

/// Ordered token stream. The lexer always terminates it with an `Eof` token.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Deref for TokenList {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_quoted_for_symbols() {
        assert_eq!(TokenKind::Arrow.to_string(), "`->`");
        assert_eq!(TokenKind::Ident(Name::EMPTY).to_string(), "identifier");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn type_names() {
        assert!(TokenKind::HashMapType.is_type_name());
        assert!(!TokenKind::None.is_type_name());
    }

    #[test]
    fn token_list_indexing() {
        let mut list = TokenList::new();
        list.push(Token::new(TokenKind::Let, Span::new(0, 3)));
        list.push(Token::new(TokenKind::Eof, Span::point(3)).with_newline_before(true));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, TokenKind::Let);
        assert!(list[1].newline_before);
    }
}
