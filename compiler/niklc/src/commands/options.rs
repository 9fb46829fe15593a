//! Hand-rolled argument parsing for the `nikl` binary.

use nikl_diagnostic::emitter::ColorMode;
use nikl_eval::DEFAULT_MAX_CALL_DEPTH;

/// Settings shared by every command that evaluates code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub max_call_depth: usize,
    pub color: ColorMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            color: ColorMode::Auto,
        }
    }
}

/// Options plus the remaining positional arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub options: RunOptions,
    pub positional: Vec<String>,
}

/// Split `--key=value` options from positional arguments.
///
/// `-h`/`--help` and `-V`/`--version` pass through as positionals so the
/// command dispatch handles them.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    for arg in args {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix("--max-depth=") {
            parsed.options.max_call_depth = match value.parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => return Err(format!("invalid --max-depth value '{value}'")),
            };
        } else if let Some(value) = arg.strip_prefix("--color=") {
            parsed.options.color = ColorMode::parse(value).ok_or_else(|| {
                format!("invalid --color value '{value}' (expected auto, always or never)")
            })?;
        } else if matches!(arg, "-h" | "--help" | "-V" | "--version") || !arg.starts_with('-') {
            parsed.positional.push(arg.to_string());
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    check_arity(&parsed.positional)?;
    Ok(parsed)
}

/// Reject positionals beyond what the command takes: `run`, `lex` and
/// `parse` take one path, everything else takes none after itself.
fn check_arity(positional: &[String]) -> Result<(), String> {
    let allowed = match positional.first().map(String::as_str) {
        Some("run" | "lex" | "parse") => 2,
        _ => 1,
    };
    match positional.get(allowed) {
        Some(extra) => Err(format!("unexpected argument '{extra}'")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_with_no_options() {
        let parsed = parse_args(&["script.nk"]).unwrap();
        assert_eq!(parsed.options, RunOptions::default());
        assert_eq!(parsed.positional, vec!["script.nk".to_string()]);
    }

    #[test]
    fn options_mix_with_positionals() {
        let parsed = parse_args(&["--max-depth=50", "run", "--color=never", "a.nk"]).unwrap();
        assert_eq!(parsed.options.max_call_depth, 50);
        assert_eq!(parsed.options.color, ColorMode::Never);
        assert_eq!(parsed.positional, vec!["run".to_string(), "a.nk".to_string()]);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse_args(&["--max-depth=0"]).is_err());
        assert!(parse_args(&["--max-depth=lots"]).is_err());
        assert!(parse_args(&["--color=sometimes"]).is_err());
        assert!(parse_args(&["--verbose"]).is_err());
    }

    #[test]
    fn help_and_version_flags_pass_through() {
        let parsed = parse_args(&["--help"]).unwrap();
        assert_eq!(parsed.positional, vec!["--help".to_string()]);
    }

    #[test]
    fn extra_positionals_are_rejected() {
        assert_eq!(
            parse_args(&["run", "a.nk", "b.nk"]).unwrap_err(),
            "unexpected argument 'b.nk'"
        );
        assert_eq!(
            parse_args(&["a.nk", "junk"]).unwrap_err(),
            "unexpected argument 'junk'"
        );
        assert!(parse_args(&["repl", "x"]).is_err());
        assert!(parse_args(&["lex", "a.nk"]).is_ok());
        assert!(parse_args::<&str>(&[]).is_ok());
    }
}
