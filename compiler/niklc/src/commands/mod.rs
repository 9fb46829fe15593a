//! `nikl` subcommands and the pieces they share.

mod debug;
mod options;
mod repl;
mod run;

pub use debug::{lex_file, parse_file};
pub use options::{parse_args, CliArgs, RunOptions};
pub use repl::{repl_loop, run_repl, Input, LineReader, Repl, ReplStep};
pub use run::run_file;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use nikl_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use tracing::warn;

use crate::NiklError;

/// Entry file looked up when a directory is given.
pub const ENTRY_FILE: &str = "main.nk";

/// Read a file, mapping I/O failures to a user-facing message.
pub fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| {
        let shown = path.display();
        match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{shown}'"),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied reading '{shown}'")
            }
            std::io::ErrorKind::InvalidData => format!("'{shown}' is not valid UTF-8"),
            _ => format!("error reading '{shown}': {e}"),
        }
    })
}

/// Turn a command-line path into the script to run.
///
/// A directory resolves to its `main.nk`. A file without the `.nk` extension
/// still runs, with a warning.
pub fn resolve_script(path: &Path) -> Result<PathBuf, String> {
    if path.is_dir() {
        let entry = path.join(ENTRY_FILE);
        if entry.is_file() {
            return Ok(entry);
        }
        return Err(format!(
            "directory '{}' has no {ENTRY_FILE}",
            path.display()
        ));
    }
    if !path.exists() {
        return Err(format!("cannot find file '{}'", path.display()));
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("nk") {
        warn!(path = %path.display(), "script does not have a .nk extension");
    }
    Ok(path.to_path_buf())
}

/// Render `err` to stderr with a source snippet.
pub(crate) fn report(err: &NiklError, source: &str, path: &str, color: ColorMode) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(color, is_tty)
        .with_source(source)
        .with_file_path(path);
    emitter.emit(&err.to_diagnostic());
    emitter.flush();
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directory_resolves_to_entry_file() {
        let dir = tempfile::tempdir().unwrap();
        let entry = dir.path().join(ENTRY_FILE);
        std::fs::write(&entry, "print(1)").unwrap();
        assert_eq!(resolve_script(dir.path()).unwrap(), entry);
    }

    #[test]
    fn directory_without_entry_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_script(dir.path()).unwrap_err();
        assert!(err.contains("has no main.nk"), "{err}");
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_script(&dir.path().join("gone.nk")).unwrap_err();
        assert!(err.starts_with("cannot find file"), "{err}");
    }

    #[test]
    fn other_extensions_still_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.txt");
        std::fs::write(&script, "print(1)").unwrap();
        assert_eq!(resolve_script(&script).unwrap(), script);
    }

    #[test]
    fn read_file_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("nope.nk")).unwrap_err();
        assert!(err.starts_with("cannot find file"), "{err}");
    }
}
