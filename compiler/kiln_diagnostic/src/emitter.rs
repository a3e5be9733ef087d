//! Human-readable diagnostic output.
//!
//! Emitters render flushed diagnostics. The driver owns the writer and the
//! color decision; emitters never decide whether something is fatal.
//!
//! Plain output for one diagnostic:
//!
//! ```text
//! error[E3004]: local class cannot extend a sealed class
//!   --> 52..57: sealed supertype
//!   = note: declared inside a function body
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{Diagnostic, Label, Severity};

/// Output sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        diagnostics.iter().for_each(|d| self.emit(d));
    }

    fn flush(&mut self);

    /// Closing line such as `error: aborting due to 2 previous errors`.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Color output mode for [`TerminalEmitter`].
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
        matches!((self, is_tty), (ColorMode::Always, _) | (ColorMode::Auto, true))
    }
}

#[derive(Clone, Copy)]
enum Style {
    Severity(Severity),
    Code,
    Secondary,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Severity(Severity::Error) => "\x1b[1;31m",
            Style::Severity(Severity::Warning) => "\x1b[1;33m",
            Style::Severity(Severity::Note) => "\x1b[1;36m",
            Style::Code => "\x1b[1m",
            Style::Secondary => "\x1b[1;34m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Terminal emitter with optional ANSI colors.
///
/// Write errors are ignored: diagnostics output is best effort.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, out: &mut String, text: &str, style: Style) {
        if self.colors {
            let _ = write!(out, "{}{text}{RESET}", style.ansi());
        } else {
            out.push_str(text);
        }
    }

    fn render_label(&self, out: &mut String, label: &Label, severity: Severity) {
        let (marker, style) = if label.is_primary {
            ("-->", Style::Severity(severity))
        } else {
            ("   ", Style::Secondary)
        };
        let _ = write!(out, "  {marker} {:?}: ", label.span);
        self.paint(out, &label.message, style);
        out.push('\n');
    }

    fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.paint(&mut out, &diagnostic.severity.to_string(), Style::Severity(diagnostic.severity));
        self.paint(&mut out, &format!("[{}]", diagnostic.code), Style::Code);
        let _ = writeln!(out, ": {}", diagnostic.message);
        for label in &diagnostic.labels {
            self.render_label(&mut out, label, diagnostic.severity);
        }
        for note in &diagnostic.notes {
            out.push_str("  = ");
            self.paint(&mut out, "note", Style::Code);
            let _ = writeln!(out, ": {note}");
        }
        out.push('\n');
        out
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let rendered = self.render(diagnostic);
        let _ = self.writer.write_all(rendered.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let warnings = match warning_count {
            0 => None,
            1 => Some("1 warning emitted".to_owned()),
            n => Some(format!("{n} warnings emitted")),
        };
        let mut out = String::new();
        match (error_count, warnings) {
            (0, None) => return,
            (0, Some(warnings)) => {
                self.paint(&mut out, "warning", Style::Severity(Severity::Warning));
                let _ = writeln!(out, ": {warnings}");
            }
            (errors, warnings) => {
                self.paint(&mut out, "error", Style::Severity(Severity::Error));
                out.push_str(": aborting due to ");
                if errors == 1 {
                    out.push_str("previous error");
                } else {
                    let _ = write!(out, "{errors} previous errors");
                }
                if let Some(warnings) = warnings {
                    let _ = write!(out, "; {warnings}");
                }
                out.push('\n');
            }
        }
        let _ = self.writer.write_all(out.as_bytes());
    }
}
