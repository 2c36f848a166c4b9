//! Rendering targets for reports.

use std::fmt;

/// One line of report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Heading(&'a str),
    Field(&'a str, &'a str),
    Item(&'a str),
    Warning(&'a str),
    Error(&'a str),
    Text(&'a str),
    Blank,
}

impl Line<'_> {
    /// Warnings and errors; terminals send these to stderr.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Line::Warning(_) | Line::Error(_))
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Heading(name) => write!(f, "{name}:"),
            Line::Field(key, value) => write!(f, "  {key}: {value}"),
            Line::Item(text) => write!(f, "  - {text}"),
            Line::Warning(msg) => write!(f, "warning: {msg}"),
            Line::Error(msg) => write!(f, "error: {msg}"),
            Line::Text(text) => f.write_str(text),
            Line::Blank => Ok(()),
        }
    }
}

/// Sink for report lines. Reports decide what to say, sinks decide where
/// it goes.
pub trait Output {
    fn line(&mut self, line: Line<'_>);

    fn heading(&mut self, name: &str) {
        self.line(Line::Heading(name));
    }

    fn field(&mut self, key: &str, value: &str) {
        self.line(Line::Field(key, value));
    }

    fn item(&mut self, text: &str) {
        self.line(Line::Item(text));
    }

    fn warning(&mut self, msg: &str) {
        self.line(Line::Warning(msg));
    }

    fn error(&mut self, msg: &str) {
        self.line(Line::Error(msg));
    }

    fn text(&mut self, text: &str) {
        self.line(Line::Text(text));
    }

    fn blank(&mut self) {
        self.line(Line::Blank);
    }
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes to the process streams, keeping stdout free of diagnostics so
/// emitted code can be piped.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, line: Line<'_>) {
        if line.is_diagnostic() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}
