//! `nikl <path>` / `nikl run <path>`.

use std::path::Path;
use std::process::ExitCode;

use nikl_eval::Interpreter;
use nikl_ir::StringInterner;
use tracing::info;

use super::{read_file, report, resolve_script, RunOptions};
use crate::run_source;

/// Run a script file (or a directory's `main.nk`) to completion.
pub fn run_file(path: &str, options: &RunOptions) -> ExitCode {
    let script = match resolve_script(Path::new(path)) {
        Ok(script) => script,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };
    let source = match read_file(&script) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };
    let shown = script.display().to_string();

    let interner = StringInterner::new();
    let mut interpreter = Interpreter::builder(&interner)
        .max_call_depth(options.max_call_depth)
        .build();

    info!(path = %shown, "running script");
    match run_source(&source, &mut interpreter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &source, &shown, options.color);
            ExitCode::FAILURE
        }
    }
}
