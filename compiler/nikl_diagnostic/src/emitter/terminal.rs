//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI colors and a source
//! snippet under the primary label.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=<mode>` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

struct SourceContext {
    text: String,
    table: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceContext>,
    file_path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` only matters for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Attach the source text so labels render as `line:col` plus a snippet.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(SourceContext {
            text: source.to_owned(),
            table: LineOffsetTable::build(source),
        });
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: &str) -> Self {
        self.file_path = Some(path.to_owned());
        self
    }

    /// Replace the attached source (the REPL does this per input).
    pub fn set_source(&mut self, source: &str) {
        self.source = Some(SourceContext {
            text: source.to_owned(),
            table: LineOffsetTable::build(source),
        });
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let location = self.location(label);
        let _ = write!(self.writer, "  {marker} ");
        self.write_colored(&location, colors::BOLD);
        let _ = writeln!(self.writer);

        let Some((line_no, col, line_text)) = self.snippet(label) else {
            if !label.message.is_empty() {
                let _ = writeln!(self.writer, "      {}", label.message);
            }
            return;
        };

        let gutter = line_no.to_string();
        let pad = " ".repeat(gutter.len());
        let _ = writeln!(self.writer, " {pad} |");
        let _ = writeln!(self.writer, " {gutter} | {line_text}");

        let width = label_width(label, &line_text, col);
        let underline_char = if label.is_primary { "^" } else { "-" };
        let underline = underline_char.repeat(width);
        let indent = " ".repeat(col.saturating_sub(1) as usize);
        let _ = write!(self.writer, " {pad} | {indent}");
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        if label.message.is_empty() {
            self.write_colored(&underline, color);
        } else {
            self.write_colored(&format!("{underline} {}", label.message), color);
        }
        let _ = writeln!(self.writer);
    }

    /// `path:line:col` when the source is known, the raw span otherwise.
    fn location(&self, label: &Label) -> String {
        let path = self.file_path.as_deref().unwrap_or("<input>");
        match &self.source {
            Some(src) => {
                let (line, col) = src.table.offset_to_line_col(&src.text, label.span.start);
                format!("{path}:{line}:{col}")
            }
            None => format!("{path}:{:?}", label.span),
        }
    }

    fn snippet(&self, label: &Label) -> Option<(u32, u32, String)> {
        let src = self.source.as_ref()?;
        if label.span.start as usize > src.text.len() {
            return None;
        }
        let (line, col) = src.table.offset_to_line_col(&src.text, label.span.start);
        let text = src.table.line_text(&src.text, line).to_owned();
        Some((line, col, text))
    }
}

/// Underline width in characters, clipped to the end of the line.
fn label_width(label: &Label, line_text: &str, col: u32) -> usize {
    let available = line_text
        .chars()
        .count()
        .saturating_sub(col.saturating_sub(1) as usize);
    (label.span.len() as usize).min(available).max(1)
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
