//! Interactive session.
//!
//! Each entered chunk runs against the same global scope. A chunk with
//! unclosed `(`, `[` or `{` keeps reading under a continuation prompt; a
//! blank continuation line submits it as is.

use std::io::{self, Write};
use std::process::ExitCode;

use nikl_diagnostic::emitter::ColorMode;
use nikl_eval::Interpreter;
use nikl_ir::StringInterner;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use tracing::debug;

use super::{report, RunOptions};
use crate::{run_source, NiklError};

pub const PROMPT: &str = ">>> ";
pub const CONTINUATION_PROMPT: &str = "... ";

/// Path shown in diagnostics for REPL input.
const REPL_PATH: &str = "<repl>";

/// Where the line editor keeps history between sessions.
pub const HISTORY_FILE: &str = "/tmp/.nikl_history";

/// What happened to one line of input.
#[derive(Debug)]
pub enum ReplStep {
    /// `exit` was entered.
    Exit,
    /// Blank line outside a chunk.
    Empty,
    /// The chunk has unclosed delimiters.
    Incomplete,
    /// A complete chunk was evaluated.
    Ran {
        source: String,
        result: Result<(), NiklError>,
    },
}

pub struct Repl<'a> {
    interpreter: Interpreter<'a>,
    pending: String,
}

impl<'a> Repl<'a> {
    pub fn new(interpreter: Interpreter<'a>) -> Self {
        Repl {
            interpreter,
            pending: String::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter<'a> {
        &self.interpreter
    }

    pub fn prompt(&self) -> &'static str {
        if self.pending.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        }
    }

    /// Drop a half-entered chunk.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Feed one line of input (with or without its trailing newline).
    pub fn feed_line(&mut self, line: &str) -> ReplStep {
        let line = line.trim_end_matches(['\n', '\r']);
        let blank = line.trim().is_empty();

        if self.pending.is_empty() {
            if line.trim() == "exit" {
                return ReplStep::Exit;
            }
            if blank {
                return ReplStep::Empty;
            }
        }

        if !blank {
            self.pending.push_str(line);
            self.pending.push('\n');
            if open_delimiters(&self.pending) > 0 {
                return ReplStep::Incomplete;
            }
        }

        let source = std::mem::take(&mut self.pending);
        debug!(bytes = source.len(), "evaluating chunk");
        let result = run_source(&source, &mut self.interpreter);
        ReplStep::Ran { source, result }
    }
}

/// Net count of unclosed brackets, ignoring string literals and comments.
fn open_delimiters(source: &str) -> i64 {
    let mut depth = 0i64;
    for line in source.lines() {
        let mut in_string = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if in_string {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '/' if chars.peek() == Some(&'/') => break,
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ => {}
            }
        }
    }
    depth
}

/// One read from a line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D or end of piped input.
    Eof,
}

/// Source of REPL lines. The editor draws its own prompt.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input>;

    fn add_history(&mut self, line: &str);
}

impl LineReader for Editor<(), FileHistory> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        match self.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.add_history_entry(line) {
            debug!(error = %e, "history entry dropped");
        }
    }
}

/// Drive a session over a line reader, writing the banner and status
/// messages to `out`.
///
/// Program output goes through the interpreter's print handler; errors are
/// rendered to stderr.
pub fn repl_loop<L: LineReader, W: Write>(
    repl: &mut Repl<'_>,
    reader: &mut L,
    out: &mut W,
    color: ColorMode,
) -> io::Result<()> {
    writeln!(out, "Welcome to Nikl REPL!")?;
    writeln!(out, "To exit, type 'exit' or press Ctrl+D")?;

    loop {
        out.flush()?;
        let line = match reader.read_line(repl.prompt())? {
            Input::Line(line) => line,
            Input::Interrupted => {
                repl.discard_pending();
                writeln!(out, "Keyboard Interrupt")?;
                continue;
            }
            Input::Eof => {
                writeln!(out, "Exiting REPL.")?;
                return Ok(());
            }
        };

        if !line.trim().is_empty() {
            reader.add_history(line.trim_end());
        }
        match repl.feed_line(&line) {
            ReplStep::Exit => return Ok(()),
            ReplStep::Ran {
                source,
                result: Err(err),
            } => report(&err, &source, REPL_PATH, color),
            ReplStep::Empty | ReplStep::Incomplete | ReplStep::Ran { .. } => {}
        }
    }
}

/// `nikl repl` on a rustyline editor with history in [`HISTORY_FILE`].
pub fn run_repl(options: &RunOptions) -> ExitCode {
    let mut editor = match Editor::<(), FileHistory>::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("error: cannot start line editor: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = editor.load_history(HISTORY_FILE) {
        debug!(error = %e, "no previous history");
    }

    let interner = StringInterner::new();
    let interpreter = Interpreter::builder(&interner)
        .max_call_depth(options.max_call_depth)
        .build();
    let mut repl = Repl::new(interpreter);

    let result = repl_loop(&mut repl, &mut editor, &mut io::stdout(), options.color);
    if let Err(e) = editor.save_history(HISTORY_FILE) {
        debug!(error = %e, "history not saved");
    }
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
