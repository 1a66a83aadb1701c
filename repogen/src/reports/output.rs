//! Rendering targets for reports.

use std::fmt;

/// What happened to a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Created,
    Overwritten,
    Kept,
    Bullet,
}

impl Marker {
    fn symbol(self) -> char {
        match self {
            Marker::Created => '+',
            Marker::Overwritten => '~',
            Marker::Kept => '=',
            Marker::Bullet => '-',
        }
    }
}

/// One line of a report.
#[derive(Debug, Clone, Copy)]
pub enum Line<'a> {
    Heading(&'a str),
    Field(&'a str, &'a str),
    Item(Marker, &'a str),
    Warning(&'a str),
    Text(&'a str),
    Blank,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Heading(text) => write!(f, "{text}:"),
            Line::Field(key, value) => write!(f, "{key}: {value}"),
            Line::Item(marker, text) => write!(f, "  {} {text}", marker.symbol()),
            Line::Warning(msg) => write!(f, "warning: {msg}"),
            Line::Text(text) => f.write_str(text),
            Line::Blank => Ok(()),
        }
    }
}

/// Sink for report lines.
///
/// Reports only say which lines to emit; every target formats them through
/// [`Line`]'s `Display`, so tests see exactly what the terminal prints.
pub trait Output {
    fn emit(&mut self, line: Line<'_>);

    fn heading(&mut self, text: &str) {
        self.emit(Line::Heading(text));
    }

    fn field(&mut self, key: &str, value: &str) {
        self.emit(Line::Field(key, value));
    }

    fn item(&mut self, marker: Marker, text: &str) {
        self.emit(Line::Item(marker, text));
    }

    fn warning(&mut self, msg: &str) {
        self.emit(Line::Warning(msg));
    }

    fn text(&mut self, text: &str) {
        self.emit(Line::Text(text));
    }

    fn blank(&mut self) {
        self.emit(Line::Blank);
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to stdout; warnings go to stderr next to the log output.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn emit(&mut self, line: Line<'_>) {
        match line {
            Line::Warning(_) => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}
