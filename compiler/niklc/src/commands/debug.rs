//! `nikl lex` and `nikl parse`: dump pipeline stages for inspection.

use std::path::Path;
use std::process::ExitCode;

use nikl_diagnostic::emitter::ColorMode;
use nikl_ir::{StringInterner, TokenKind};

use super::{read_file, report};
use crate::NiklError;

/// Print every token with its span.
pub fn lex_file(path: &str) -> ExitCode {
    let Some(source) = read_or_report(path) else {
        return ExitCode::FAILURE;
    };
    let interner = StringInterner::new();
    match nikl_lexer::lex(&source, &interner) {
        Ok(tokens) => {
            println!("Tokens for '{path}' ({} tokens):", tokens.len());
            for token in tokens.iter() {
                println!("  {} @ {}", describe(&token.kind, &interner), token.span);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&NiklError::from(err), &source, path, ColorMode::Auto);
            ExitCode::FAILURE
        }
    }
}

/// Pretty-print the parsed program.
pub fn parse_file(path: &str) -> ExitCode {
    let Some(source) = read_or_report(path) else {
        return ExitCode::FAILURE;
    };
    let interner = StringInterner::new();
    match crate::parse_source(&source, &interner) {
        Ok(program) => {
            println!("{program:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err, &source, path, ColorMode::Auto);
            ExitCode::FAILURE
        }
    }
}

fn read_or_report(path: &str) -> Option<String> {
    match read_file(Path::new(path)) {
        Ok(source) => Some(source),
        Err(msg) => {
            eprintln!("error: {msg}");
            None
        }
    }
}

/// Token debug form with interned text resolved.
fn describe(kind: &TokenKind, interner: &StringInterner) -> String {
    match kind {
        TokenKind::Ident(name) => format!("Ident({:?})", interner.lookup(*name)),
        TokenKind::String(name) => format!("String({:?})", interner.lookup(*name)),
        TokenKind::Float(bits) => format!("Float({:?})", f64::from_bits(*bits)),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn describe_resolves_interned_text() {
        let interner = StringInterner::new();
        let tokens = nikl_lexer::lex("let x = \"hi\" 2.5", &interner).unwrap();
        let shown: Vec<String> = tokens
            .iter()
            .map(|token| describe(&token.kind, &interner))
            .collect();
        assert_eq!(
            shown,
            vec!["Let", "Ident(\"x\")", "Eq", "String(\"hi\")", "Float(2.5)", "Eof"]
        );
    }
}
