use crate::ansi;
use crate::context::RenderContext;
use crate::style::{Decoration, StyleAttributes};
use crate::width::{truncate_to_width, visible_width};

use super::Element;

/// Box-drawing characters: corners, horizontal and vertical edges.
struct Frame {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const DOUBLE: Frame = Frame {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

const SINGLE: Frame = Frame {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

/// A heading, sized 1 (largest) to 5.
///
/// - 1: bold, in a double-line box as wide as the terminal
/// - 2: bold, in a single-line box as wide as the terminal
/// - 3 and 4: bold
/// - 5: dim
///
/// Sizes outside 1–5 are clamped. Settings left unset are read from the
/// theme:
///
/// | setting | theme key | default |
/// |---------|-----------|---------|
/// | size | `heading.size` | 1 |
/// | blank lines after | `heading.spacing` | 1 |
/// | foreground | `heading.color` | none |
///
/// ```rust
/// use termage_render::element::{Element, Heading};
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(8);
/// let out = Heading::new("Hi").size(2).render(&ctx);
/// assert_eq!(out, "\x1b[1m┌──────┐\n│Hi    │\n└──────┘\x1b[22m\n\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    value: String,
    size: Option<u8>,
}

impl Heading {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            size: None,
        }
    }

    pub fn size(mut self, size: u8) -> Self {
        self.size = Some(size.clamp(1, 5));
        self
    }

    /// The size set on this heading, if any.
    pub fn get_size(&self) -> Option<u8> {
        self.size
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self::new("")
    }
}

impl Element for Heading {
    fn render(&self, ctx: &RenderContext) -> String {
        let theme = ctx.theme();
        let size = self
            .size
            .unwrap_or_else(|| theme.get_or("heading.size", 1u8))
            .clamp(1, 5);
        let spacing = theme.get_or("heading.spacing", 1usize);

        let value = ctx.shortcodes.parse(&self.value);
        let mut heading = match size {
            1 => ansi::decorate(Decoration::Bold, &framed(&value, ctx.width(), &DOUBLE)),
            2 => ansi::decorate(Decoration::Bold, &framed(&value, ctx.width(), &SINGLE)),
            3 | 4 => ansi::decorate(Decoration::Bold, &value),
            _ => ansi::decorate(Decoration::Dim, &value),
        };
        if let Some(color) = theme.get_str("heading.color") {
            let attrs = StyleAttributes {
                color: Some(theme.resolve_color(&color)),
                ..Default::default()
            };
            heading = ansi::paint(&attrs, &heading);
        }
        format!("{}\n{}", heading, "\n".repeat(spacing))
    }
}

fn framed(value: &str, terminal_width: usize, frame: &Frame) -> String {
    let inner = terminal_width.saturating_sub(2);
    let value = truncate_to_width(value, inner);
    let fill = inner.saturating_sub(visible_width(&value));
    let edge = |left: char, right: char| {
        let mut line = String::with_capacity((inner + 2) * 3);
        line.push(left);
        line.extend(std::iter::repeat(frame.horizontal).take(inner));
        line.push(right);
        line
    };

    format!(
        "{}\n{}{}{}{}\n{}",
        edge(frame.top_left, frame.top_right),
        frame.vertical,
        value,
        " ".repeat(fill),
        frame.vertical,
        edge(frame.bottom_left, frame.bottom_right),
    )
}
