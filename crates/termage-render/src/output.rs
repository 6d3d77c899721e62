//! Output mode control.
//!
//! The [`OutputMode`] decides whether rendered escape sequences reach the
//! output or are stripped to plain text.

use std::fmt;
use std::str::FromStr;

use console::Term;

use crate::ansi;

/// Controls whether escape sequences are kept.
///
/// # Example
///
/// ```rust
/// use termage_render::OutputMode;
///
/// let styled = "\x1b[1mRAD\x1b[22m";
/// assert_eq!(OutputMode::Term.apply(styled), styled);
/// assert_eq!(OutputMode::Text.apply(styled), "RAD");
/// assert_eq!("text".parse::<OutputMode>().unwrap(), OutputMode::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Keep escapes when stdout supports colors
    #[default]
    Auto,
    /// Always keep escapes
    Term,
    /// Never keep escapes
    Text,
}

impl OutputMode {
    /// Resolves the mode to a concrete decision.
    ///
    /// - `Auto` asks the terminal
    /// - `Term` always returns `true`
    /// - `Text` always returns `false`
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
        }
    }

    /// Returns `rendered` as it should be written in this mode.
    pub fn apply(&self, rendered: &str) -> String {
        if self.should_use_color() {
            rendered.to_string()
        } else {
            ansi::strip(rendered)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Auto => "auto",
            OutputMode::Term => "term",
            OutputMode::Text => "text",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output mode '{0}' (expected auto, term or text)")]
pub struct ParseOutputModeError(String);

impl FromStr for OutputMode {
    type Err = ParseOutputModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            _ => Err(ParseOutputModeError(s.to_string())),
        }
    }
}
