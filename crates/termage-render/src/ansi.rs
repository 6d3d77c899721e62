//! ANSI escape sequence generation and stripping.
//!
//! Styles are switched on and off with their specific SGR codes, never with
//! the blanket reset `ESC[0m`, so a nested style can be closed without
//! clearing the style that encloses it.
//!
//! On order is foreground, background, then decorations in [`Decoration`]
//! order. Off order is the exact reverse.
//!
//! ```rust
//! use termage_render::ansi::{style_off, style_on};
//! use termage_render::style::{Decoration, StyleAttributes};
//!
//! let mut attrs = StyleAttributes::new();
//! attrs.color = Some("black".into());
//! attrs.bg = Some("blue".into());
//! attrs.decorations.insert(Decoration::Bold);
//!
//! assert_eq!(style_on(&attrs), "\x1b[30m\x1b[44m\x1b[1m");
//! assert_eq!(style_off(&attrs), "\x1b[22m\x1b[49m\x1b[39m");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::style::{ColorDef, Decoration, StyleAttributes};

/// Resets the foreground color only.
pub const FG_OFF: &str = "\x1b[39m";
/// Resets the background color only.
pub const BG_OFF: &str = "\x1b[49m";

// CSI sequences, OSC sequences (BEL or ST terminated), and two-byte escapes.
static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\x1b\[[0-?]*[ -/]*[@-~]",
        r"|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)",
        r"|\x1b[0-?@-Z\\-_]",
    ))
    .expect("ANSI pattern is valid")
});

pub(crate) fn ansi_regex() -> &'static Regex {
    &ANSI_PATTERN
}

/// Builds one SGR sequence: `ESC [ params m`.
pub fn sgr(params: &str) -> String {
    format!("\x1b[{}m", params)
}

/// Escape sequences switching `attrs` on.
///
/// Colors that do not parse are skipped.
pub fn style_on(attrs: &StyleAttributes) -> String {
    let mut out = String::new();
    if let Some(color) = parse_color(attrs.color.as_deref()) {
        out.push_str(&sgr(&color.fg_params()));
    }
    if let Some(bg) = parse_color(attrs.bg.as_deref()) {
        out.push_str(&sgr(&bg.bg_params()));
    }
    for decoration in &attrs.decorations {
        out.push_str(&sgr(&decoration.on_code().to_string()));
    }
    out
}

/// Escape sequences switching `attrs` off, in reverse of [`style_on`].
pub fn style_off(attrs: &StyleAttributes) -> String {
    let mut out = String::new();
    for decoration in attrs.decorations.iter().rev() {
        out.push_str(&sgr(&decoration.off_code().to_string()));
    }
    if parse_color(attrs.bg.as_deref()).is_some() {
        out.push_str(BG_OFF);
    }
    if parse_color(attrs.color.as_deref()).is_some() {
        out.push_str(FG_OFF);
    }
    out
}

/// Wraps `content` in the on/off sequences of `attrs`.
pub fn paint(attrs: &StyleAttributes, content: &str) -> String {
    format!("{}{}{}", style_on(attrs), content, style_off(attrs))
}

/// Wraps `content` in a single decoration's on/off pair.
pub fn decorate(decoration: Decoration, content: &str) -> String {
    format!(
        "\x1b[{}m{}\x1b[{}m",
        decoration.on_code(),
        content,
        decoration.off_code()
    )
}

/// Wraps `text` in an OSC-8 hyperlink to `url`.
///
/// ```rust
/// use termage_render::ansi::hyperlink;
///
/// assert_eq!(
///     hyperlink("https://example.com", "site"),
///     "\x1b]8;;https://example.com\x1b\\site\x1b]8;;\x1b\\"
/// );
/// ```
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Removes escape sequences from `text`.
///
/// Removes everything this module produces plus other common CSI, OSC and
/// two-byte escapes.
///
/// ```rust
/// use termage_render::ansi::strip;
///
/// assert_eq!(strip("\x1b[1;31mred\x1b[0m"), "red");
/// assert_eq!(strip("\x1b]8;;http://x\x07link\x1b]8;;\x07"), "link");
/// ```
pub fn strip(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

fn parse_color(value: Option<&str>) -> Option<ColorDef> {
    let value = value?;
    match ColorDef::parse_string(value) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::trace!(target: "termage.render", color = value, error = %err, "unparseable_color");
            None
        }
    }
}
