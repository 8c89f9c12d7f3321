//! Line rendering: label prefix, optional timestamp and tag colors.
//!
//! Colors are cosmetic. Nothing in the crate reads them back, and turning them
//! off yields the same text without escape sequences.

use std::fmt;

use chrono::Local;
use nu_ansi_term::Color;

/// Label prefix of an instance, built from ordered components.
///
/// Components are joined with a single space and wrapped in brackets followed
/// by a space: `["juicebox", "A"]` renders as `"[juicebox A] "`. No components
/// render as the empty string, without brackets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    prefix: String,
}

impl Label {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = components
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        if parts.is_empty() {
            return Self::default();
        }
        Self {
            prefix: format!("[{}] ", parts.join(" ")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Which color a bracketed tag gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Label,
    Debug,
    Panic,
    Measure,
    Stat,
}

impl Highlight {
    fn color(self) -> Color {
        match self {
            Self::Label => Color::Green,
            Self::Debug => Color::Cyan,
            Self::Panic => Color::Red,
            Self::Measure => Color::Yellow,
            Self::Stat => Color::Magenta,
        }
    }
}

/// How lines are decorated before they reach a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Wrap the label and tags in ANSI color codes.
    pub color: bool,
    /// Start every line with a local `HH:MM:SS.ffffff` timestamp.
    pub timestamps: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: true,
            timestamps: true,
        }
    }
}

impl LineStyle {
    /// No color, no timestamp. Output is stable, which tests rely on.
    pub fn plain() -> Self {
        Self {
            color: false,
            timestamps: false,
        }
    }

    /// Paint `text` in the color of `highlight`, if colors are on.
    pub fn paint(&self, highlight: Highlight, text: &str) -> String {
        if self.color && !text.is_empty() {
            highlight.color().paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// `[<tag> <kind>]` painted as `highlight`.
    pub fn tag(&self, highlight: Highlight, tag: &str, kind: &str) -> String {
        self.paint(highlight, &format!("[{tag} {kind}]"))
    }

    /// Assemble a full line: timestamp, label, body.
    pub fn render(&self, label: &Label, body: &str) -> String {
        let mut line = String::with_capacity(body.len() + label.as_str().len() + 16);
        if self.timestamps {
            line.push_str(&Local::now().format("%H:%M:%S%.6f ").to_string());
        }
        line.push_str(&self.paint(Highlight::Label, label.as_str()));
        line.push_str(body);
        line
    }
}
