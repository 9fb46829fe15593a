//! Nikl CLI
//!
//! Runs `.nk` scripts, hosts the REPL, and dumps tokens or syntax trees.

use std::process::ExitCode;

use niklc::commands::{lex_file, parse_args, parse_file, run_file, run_repl};

fn main() -> ExitCode {
    niklc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Run 'nikl help' for usage.");
            return ExitCode::FAILURE;
        }
    };
    let options = parsed.options;
    let positional = parsed.positional;

    let Some(command) = positional.first() else {
        return run_repl(&options);
    };
    let target = positional.get(1).map(String::as_str);

    match command.as_str() {
        "run" => match target {
            Some(path) => run_file(path, &options),
            None => missing_path("run"),
        },
        "lex" => match target {
            Some(path) => lex_file(path),
            None => missing_path("lex"),
        },
        "parse" => match target {
            Some(path) => parse_file(path),
            None => missing_path("parse"),
        },
        "repl" => run_repl(&options),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("nikl {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        path => run_file(path, &options),
    }
}

fn missing_path(command: &str) -> ExitCode {
    eprintln!("error: missing file path");
    eprintln!("Usage: nikl {command} <file.nk>");
    ExitCode::FAILURE
}

fn print_usage() {
    println!("Nikl interpreter");
    println!();
    println!("Usage: nikl [options] [command] [file.nk]");
    println!();
    println!("Commands:");
    println!("  <file.nk | dir>      Run a script (a directory runs its main.nk)");
    println!("  run <file.nk>        Same as above");
    println!("  repl                 Start an interactive session (default with no arguments)");
    println!("  lex <file.nk>        Tokenize and display tokens");
    println!("  parse <file.nk>      Parse and display the syntax tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Maximum call depth (default: 10000)");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=nikl_eval=debug) for trace output on stderr.");
}
