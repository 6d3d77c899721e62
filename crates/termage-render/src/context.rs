//! Render-time context shared by elements.

use std::sync::Arc;

use crate::shortcodes::Shortcodes;
use crate::terminal::terminal_width;
use crate::theme::{current_theme, Theme};

/// Information available when an element renders.
///
/// # Fields
///
/// - `shortcodes`: expands shortcodes in element values; also carries the theme
/// - `terminal_width`: fixed width in columns, or `None` to query the terminal
///
/// # Example
///
/// ```rust
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(40);
/// assert_eq!(ctx.width(), 40);
/// assert_eq!(ctx.theme().resolve_color("danger"), "red");
/// ```
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub shortcodes: Arc<Shortcodes>,

    /// Terminal width in columns, if fixed.
    pub terminal_width: Option<usize>,
}

impl RenderContext {
    pub fn new(shortcodes: Shortcodes) -> Self {
        Self {
            shortcodes: Arc::new(shortcodes),
            terminal_width: None,
        }
    }

    /// Built-in handlers bound to `theme`.
    pub fn from_theme(theme: Theme) -> Self {
        Self::new(Shortcodes::new(Arc::new(theme)))
    }

    /// Fixes the width instead of querying the terminal.
    pub fn with_terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = Some(width);
        self
    }

    pub fn theme(&self) -> &Theme {
        self.shortcodes.theme()
    }

    /// The width elements lay themselves out in.
    pub fn width(&self) -> usize {
        self.terminal_width
            .filter(|w| *w > 0)
            .unwrap_or_else(terminal_width)
    }
}

impl Default for RenderContext {
    /// Built-in handlers, the process-wide theme and the detected width.
    fn default() -> Self {
        Self::new(Shortcodes::new(current_theme()))
    }
}
