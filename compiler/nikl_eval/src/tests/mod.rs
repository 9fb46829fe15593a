//! Whole-program tests: source text is lexed, parsed and run with a
//! buffered print handler.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod error_tests;
mod function_tests;
mod scope_tests;

use nikl_ir::{Block, StringInterner};

use crate::{buffer_handler, EvalError, Interpreter, DEFAULT_MAX_CALL_DEPTH};

fn parse(source: &str, interner: &StringInterner) -> Block {
    let tokens = nikl_lexer::lex(source, interner).expect("source should lex");
    nikl_parse::parse(&tokens, interner).expect("source should parse")
}

/// Run `source`, returning everything printed and the run's result.
pub(crate) fn run_with_depth(source: &str, max_depth: usize) -> (String, Result<(), EvalError>) {
    let interner = StringInterner::new();
    let program = parse(source, &interner);
    let out = buffer_handler();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(out.clone())
        .max_call_depth(max_depth)
        .build();
    let result = interpreter.run(&program);
    (out.get_output(), result)
}

pub(crate) fn run(source: &str) -> (String, Result<(), EvalError>) {
    run_with_depth(source, DEFAULT_MAX_CALL_DEPTH)
}

/// Output of a program that must succeed.
pub(crate) fn output(source: &str) -> String {
    let (out, result) = run(source);
    if let Err(err) = result {
        panic!("unexpected error: {err}\noutput so far:\n{out}");
    }
    out
}

/// Error of a program that must fail.
pub(crate) fn error(source: &str) -> EvalError {
    run(source).1.expect_err("program should fail")
}

/// Run several programs against one interpreter, as the REPL does.
pub(crate) fn run_session(chunks: &[&str]) -> (String, Vec<Result<(), EvalError>>) {
    let interner = StringInterner::new();
    let out = buffer_handler();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(out.clone())
        .build();
    let results = chunks
        .iter()
        .map(|chunk| {
            let program = parse(chunk, &interner);
            let result = interpreter.run(&program);
            assert_eq!(interpreter.env().depth(), 1, "scopes leaked after {chunk:?}");
            assert!(interpreter.call_stack.is_empty(), "frames leaked after {chunk:?}");
            result
        })
        .collect();
    (out.get_output(), results)
}
