//! # Termage Render - Styled Terminal Elements
//!
//! `termage-render` turns CSS-like style attributes and inline shortcodes into
//! strings with embedded ANSI escape sequences, laid out against the terminal
//! width.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: dotted-path styling variables (`colors.*`, `alert.*`,
//!   `padding.*`) with a process-wide default
//! - [`Shortcodes`]: the built-in `[bold]`, `[color=red]`, `[pl=2]` handlers
//!   bound to a theme
//! - [`StyleAttributes`](style::StyleAttributes): color, background,
//!   decorations, padding, margin, width and alignment
//! - [`Element`]: [`El`], [`Alert`], [`Heading`], [`Rule`] and [`Link`]
//! - [`OutputMode`]: keep or strip escape sequences
//!
//! ## Quick Start
//!
//! ```rust
//! use termage_render::{Alert, Element, RenderContext, Theme};
//!
//! let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
//!
//! let out = Alert::new("Stay RAD!").w(20).render(&ctx);
//! assert_eq!(out.lines().count(), 3);
//!
//! let shortcodes = ctx.shortcodes.clone();
//! assert_eq!(shortcodes.parse("[u]RAD[/u]"), "\x1b[4mRAD\x1b[24m");
//! ```
//!
//! ## Escape Sequences
//!
//! Styles are switched off with their own codes (`22` for bold, `39` for
//! the foreground), never with `ESC[0m`, so nesting works:
//!
//! ```rust
//! use std::sync::Arc;
//! use termage_render::{Shortcodes, Theme};
//!
//! let shortcodes = Shortcodes::new(Arc::new(Theme::default()));
//! assert_eq!(
//!     shortcodes.parse("[color=red]a[b]b[/b]c[/color]"),
//!     "\x1b[31ma\x1b[1mb\x1b[22mc\x1b[39m"
//! );
//! ```

pub mod ansi;
mod context;
pub mod element;
mod output;
pub mod shortcodes;
pub mod style;
pub mod terminal;
pub mod theme;
pub mod width;

pub use context::RenderContext;
pub use element::{
    blink, bold, dim, div, invisible, italic, reverse, span, strikethrough, underline, Alert,
    AlertKind, El, Element, Heading, Link, Rule,
};
pub use output::{OutputMode, ParseOutputModeError};
pub use shortcodes::{expand, ShortcodeRegistry, Shortcodes};
pub use terminal::terminal_width;
pub use theme::{current_theme, reset_theme, set_theme, Theme, ThemeError};
pub use width::{truncate_to_width, visible_width};

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::style::TextAlign;
    use crate::width::compute_padding;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn shortcodes() -> Shortcodes {
        Shortcodes::new(Arc::new(Theme::default()))
    }

    proptest! {
        #[test]
        fn decorated_width_matches_text(text in "[a-zA-Z0-9 !?.]{0,30}") {
            let out = shortcodes().parse(&format!("[bold][i]{}[/i][/bold]", text));
            prop_assert_eq!(visible_width(&out), text.chars().count());
        }

        #[test]
        fn plain_text_renders_unchanged(text in "[^\\[\\]\\x1b]{0,40}") {
            let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
            prop_assert_eq!(El::new(text.as_str()).render(&ctx), text);
        }

        #[test]
        fn right_alignment_mirrors_left(content in 0usize..50, box_w in 0usize..80, px in 0usize..8) {
            let (l, r) = compute_padding(content, box_w, TextAlign::Left, px);
            prop_assert_eq!(compute_padding(content, box_w, TextAlign::Right, px), (r, l));
        }

        #[test]
        fn alert_rows_fill_box(value in "[a-z ]{0,20}", w in 1usize..60) {
            let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
            let out = Alert::new(value.as_str()).w(w).render(&ctx);
            let widths: Vec<usize> = out.lines().map(visible_width).collect();
            prop_assert_eq!(widths.len(), 3);
            prop_assert_eq!(widths[0], w);
            prop_assert_eq!(widths[2], w);
            prop_assert!(widths[1] >= w);
        }
    }

    #[test]
    fn test_bold_width() {
        assert_eq!(visible_width(&ansi::strip(&shortcodes().parse("[bold]abc[/bold]"))), 3);
    }

    #[test]
    fn test_padding_arithmetic() {
        assert_eq!(compute_padding(4, 10, TextAlign::Left, 2), (2, 4));
        assert_eq!(compute_padding(4, 10, TextAlign::Right, 2), (4, 2));
    }
}
