//! Lexer for Nikl using logos with string interning.
//!
//! Produces a `TokenList` terminated by `Eof`. Newlines are not tokens; the
//! token that follows one carries `newline_before`, which the parser uses to
//! keep `(` and `[` on a new line from continuing the previous expression.

mod lex_error;

use logos::Logos;
use nikl_ir::{Span, StringInterner, Token, TokenKind, TokenList};

pub use lex_error::LexError;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    // Keywords
    #[token("let")]
    Let,
    #[token("fn")]
    Fn,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("del")]
    Del,
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    None,

    // Type names
    #[token("Int")]
    IntType,
    #[token("Float")]
    FloatType,
    #[token("String")]
    StringType,
    #[token("Bool")]
    BoolType,
    #[token("Array")]
    ArrayType,
    #[token("HashMap")]
    HashMapType,
    #[token("Tuple")]
    TupleType,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    // Range is checked in `convert_token`, so overflow becomes a LexError
    // instead of an opaque logos error.
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    // String literal (no raw newlines)
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    // Opening quote with no closing quote before the end of the line.
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`.
///
/// Stops at the first malformed token.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);
    let mut newline_before = false;

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Newline) => newline_before = true,
            Ok(raw) => {
                if let Some(kind) = convert_token(raw, slice, span, interner)? {
                    result.push(Token::new(kind, span).with_newline_before(newline_before));
                    newline_before = false;
                }
            }
            Err(()) => {
                let ch = slice.chars().next().unwrap_or('\0');
                return Err(LexError::UnexpectedChar { ch, span });
            }
        }
    }

    let eof_span = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof_span).with_newline_before(newline_before));

    Ok(result)
}

/// Convert a raw token to a `TokenKind`, interning strings. Trivia
/// converts to `None`.
fn convert_token(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &StringInterner,
) -> Result<Option<TokenKind>, LexError> {
    let kind = match raw {
        RawToken::LineComment | RawToken::Newline => return Ok(None),
        RawToken::UnterminatedString => return Err(LexError::UnterminatedString { span }),

        // Literals
        RawToken::Int => match slice.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                return Err(LexError::InvalidNumber {
                    text: slice.to_owned(),
                    span,
                })
            }
        },
        RawToken::Float => match slice.parse::<f64>() {
            Ok(f) => TokenKind::Float(f.to_bits()),
            Err(_) => {
                return Err(LexError::InvalidNumber {
                    text: slice.to_owned(),
                    span,
                })
            }
        },
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            let unescaped = unescape_string(content, span.start + 1)?;
            TokenKind::String(interner.intern(&unescaped))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        // Keywords
        RawToken::Let => TokenKind::Let,
        RawToken::Fn => TokenKind::Fn,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Return => TokenKind::Return,
        RawToken::Del => TokenKind::Del,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::None => TokenKind::None,

        // Type names
        RawToken::IntType => TokenKind::IntType,
        RawToken::FloatType => TokenKind::FloatType,
        RawToken::StringType => TokenKind::StringType,
        RawToken::BoolType => TokenKind::BoolType,
        RawToken::ArrayType => TokenKind::ArrayType,
        RawToken::HashMapType => TokenKind::HashMapType,
        RawToken::TupleType => TokenKind::TupleType,

        // Symbols
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Arrow => TokenKind::Arrow,

        // Operators
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
    };
    Ok(Some(kind))
}

/// Process string escape sequences.
///
/// `base` is the byte offset of `s` in the source, used to point errors at
/// the offending escape.
fn unescape_string(s: &str, base: u32) -> Result<String, LexError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => result.push('\n'),
            Some((_, 't')) => result.push('\t'),
            Some((_, 'r')) => result.push('\r'),
            Some((_, '\\')) => result.push('\\'),
            Some((_, '"')) => result.push('"'),
            Some((_, '0')) => result.push('\0'),
            Some((_, other)) => {
                let start = base as usize + offset;
                return Err(LexError::InvalidEscape {
                    escape: other,
                    span: Span::from_range(start..start + 1 + other.len_utf8()),
                });
            }
            // The string regex never ends content on a lone backslash.
            None => result.push('\\'),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
        lex(source, interner)
            .unwrap()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_let() {
        let interner = StringInterner::new();
        let tokens = lex("let x: Int = 42;", &interner).unwrap();

        assert_eq!(tokens.len(), 8); // let x : Int = 42 ; EOF
        assert!(matches!(tokens[0].kind, TokenKind::Let));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(_)));
        assert!(matches!(tokens[2].kind, TokenKind::Colon));
        assert!(matches!(tokens[3].kind, TokenKind::IntType));
        assert!(matches!(tokens[4].kind, TokenKind::Eq));
        assert!(matches!(tokens[5].kind, TokenKind::Int(42)));
        assert!(matches!(tokens[6].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[7].kind, TokenKind::Eof));
    }

    #[test]
    fn test_lex_function_header() {
        let interner = StringInterner::new();
        let add = interner.intern("add");
        let a = interner.intern("a");
        assert_eq!(
            kinds("fn add(a: Int) -> None {", &interner),
            vec![
                TokenKind::Fn,
                TokenKind::Ident(add),
                TokenKind::LParen,
                TokenKind::Ident(a),
                TokenKind::Colon,
                TokenKind::IntType,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::None,
                TokenKind::LBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_operators() {
        let interner = StringInterner::new();
        assert_eq!(
            kinds("== != <= >= < > = ! + - * / %", &interner),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let interner = StringInterner::new();
        let tokens = lex("letter iffy Integer", &interner).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident(interner.intern("letter")));
        assert_eq!(tokens[1].kind, TokenKind::Ident(interner.intern("iffy")));
        assert_eq!(tokens[2].kind, TokenKind::Ident(interner.intern("Integer")));
    }

    #[test]
    fn test_lex_numbers() {
        let interner = StringInterner::new();
        let tokens = lex("7 2.5 0.0", &interner).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int(7));
        assert_eq!(tokens[1].kind, TokenKind::Float(2.5f64.to_bits()));
        assert_eq!(tokens[2].kind, TokenKind::Float(0.0f64.to_bits()));
    }

    #[test]
    fn test_int_overflow_is_invalid_number() {
        let interner = StringInterner::new();
        let err = lex("let big = 99999999999999999999", &interner).unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumber {
                text: "99999999999999999999".to_owned(),
                span: Span::new(10, 30),
            }
        );
    }

    #[test]
    fn test_lex_string_escapes() {
        let interner = StringInterner::new();
        let tokens = lex(r#""tab\there \"q\" back\\slash\n""#, &interner).unwrap();

        if let TokenKind::String(name) = tokens[0].kind {
            assert_eq!(interner.lookup(name), "tab\there \"q\" back\\slash\n");
        } else {
            panic!("Expected string token");
        }
    }

    #[test]
    fn test_invalid_escape() {
        let interner = StringInterner::new();
        let err = lex(r#"print("a\qb")"#, &interner).unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidEscape {
                escape: 'q',
                span: Span::new(8, 10),
            }
        );
    }

    #[test]
    fn test_unterminated_string() {
        let interner = StringInterner::new();
        let err = lex("let s = \"abc", &interner).unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                span: Span::new(8, 12)
            }
        );

        let err = lex("\"line one\nline two\"", &interner).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_unexpected_char() {
        let interner = StringInterner::new();
        let err = lex("let a = 1 $ 2", &interner).unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                ch: '$',
                span: Span::new(10, 11),
            }
        );
    }

    #[test]
    fn test_comments_and_newlines() {
        let interner = StringInterner::new();
        let tokens = lex("a // trailing comment\n(b)\n", &interner).unwrap();

        assert_eq!(tokens.len(), 5); // a ( b ) EOF
        assert!(!tokens[0].newline_before);
        assert!(matches!(tokens[1].kind, TokenKind::LParen));
        assert!(tokens[1].newline_before);
        assert!(!tokens[2].newline_before);
        assert!(tokens[4].newline_before);
    }

    #[test]
    fn test_trivia_only_source() {
        let interner = StringInterner::new();
        let tokens = lex("// nothing here\n\n// or here", &interner).unwrap();

        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
        assert!(tokens[0].newline_before);
    }

    #[test]
    fn test_eof_span() {
        let interner = StringInterner::new();
        let tokens = lex("x", &interner).unwrap();
        assert_eq!(tokens[1].span, Span::new(1, 1));
        assert!(lex("", &interner).unwrap()[0].kind == TokenKind::Eof);
    }
}
