//! # Termage - Terminal Styling with Shortcodes
//!
//! Termage renders styled terminal output from two sources:
//!
//! - Inline shortcodes in any text: `[b]bold[/b]`, `[color=red]red[/color]`,
//!   `[pl=2]indented[/pl]`, `[a href=https://example.com]link[/a]`
//! - Elements built with setters: [`El`], [`Alert`], [`Heading`], [`Rule`]
//!   and [`Link`]
//!
//! Both read colors and sizes from a [`Theme`] and lay themselves out
//! against the terminal width.
//!
//! ## Core Concepts
//!
//! - [`Termage`]: output sink, theme and output mode in one place
//! - [`Theme`]: styling variables by dotted path, loadable from YAML
//! - [`Element`]: anything that renders to an escaped string
//! - [`OutputMode`]: keep escape sequences or strip them to plain text
//!
//! ## Quick Start
//!
//! ```rust
//! use termage::{OutputMode, Termage};
//!
//! let mut term = Termage::new()
//!     .with_writer(Vec::new())
//!     .output_mode(OutputMode::Text)
//!     .terminal_width(40);
//!
//! let alert = term.alert("Stay RAD!").danger().w(20);
//! term.write(&alert).unwrap();
//! term.writeln("[b]done[/b]").unwrap();
//!
//! assert_eq!(term.render(&term.el("[u]RAD[/u]")), "RAD");
//! ```
//!
//! ## Shortcodes Only
//!
//! ```rust
//! use termage::{strip_shortcodes, Shortcodes, Theme};
//! use std::sync::Arc;
//!
//! let shortcodes = Shortcodes::new(Arc::new(Theme::default()));
//! assert_eq!(shortcodes.parse("[i]RAD[/i]"), "\x1b[3mRAD\x1b[23m");
//! assert_eq!(strip_shortcodes("[i]RAD[/i]"), "RAD");
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

pub use termage_render::{
    ansi, current_theme, element, reset_theme, set_theme, shortcodes, style, terminal, width,
};
pub use termage_render::{
    blink, bold, dim, div, invisible, italic, reverse, span, strikethrough, underline,
};
pub use termage_render::{
    expand, terminal_width, truncate_to_width, visible_width, Alert, AlertKind, El, Element,
    Heading, Link, OutputMode, RenderContext, Rule, ShortcodeRegistry, Shortcodes, Theme,
    ThemeError,
};
pub use termage_shortcodes::{
    escape, parse_number, strip_shortcodes, HandlerRegistry, Invocation, Parameters, Processor,
    RegistryError,
};

/// Renders elements and writes them to an output sink.
///
/// Defaults: standard output, the process-wide theme, the detected terminal
/// width and [`OutputMode::Auto`].
pub struct Termage {
    out: Box<dyn Write>,
    ctx: RenderContext,
    mode: OutputMode,
}

impl Termage {
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            ctx: RenderContext::default(),
            mode: OutputMode::Auto,
        }
    }

    /// Writes to a file, created or truncated.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory does not exist or the file cannot be
    /// created.
    pub fn to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent directory does not exist: {}", parent.display()),
                ));
            }
        }
        let file = std::fs::File::create(path)?;
        Ok(Self::new().with_writer(io::BufWriter::new(file)))
    }

    pub fn with_writer(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Renders against `theme` instead of the process-wide one.
    pub fn theme(mut self, theme: Theme) -> Self {
        let shortcodes = self.ctx.shortcodes.with_theme(Arc::new(theme));
        self.ctx.shortcodes = Arc::new(shortcodes);
        self
    }

    /// Replaces the shortcode handlers and theme together.
    pub fn shortcodes(mut self, shortcodes: Shortcodes) -> Self {
        self.ctx.shortcodes = Arc::new(shortcodes);
        self
    }

    /// Fixes the layout width instead of querying the terminal.
    pub fn terminal_width(mut self, width: usize) -> Self {
        self.ctx = self.ctx.with_terminal_width(width);
        self
    }

    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn el(&self, value: impl Into<String>) -> El {
        El::new(value)
    }

    pub fn alert(&self, value: impl Into<String>) -> Alert {
        Alert::new(value)
    }

    pub fn heading(&self, value: impl Into<String>) -> Heading {
        Heading::new(value)
    }

    pub fn rule(&self) -> Rule {
        Rule::new()
    }

    pub fn link(&self, text: impl Into<String>, href: impl Into<String>) -> Link {
        Link::new(text, href)
    }

    /// Renders `element` as it would be written.
    pub fn render(&self, element: &impl Element) -> String {
        self.mode.apply(&element.render(&self.ctx))
    }

    /// Renders `element` and writes it.
    ///
    /// # Errors
    ///
    /// Returns any error from the output sink.
    pub fn write(&mut self, element: &impl Element) -> io::Result<()> {
        let rendered = self.render(element);
        self.out.write_all(rendered.as_bytes())
    }

    /// Expands shortcodes in `text` and writes it with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns any error from the output sink.
    pub fn writeln(&mut self, text: &str) -> io::Result<()> {
        let rendered = self.mode.apply(&self.ctx.shortcodes.parse(text));
        writeln!(self.out, "{}", rendered)
    }

    /// Writes `text` without expanding shortcodes.
    ///
    /// # Errors
    ///
    /// Returns any error from the output sink.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        let rendered = self.mode.apply(text);
        self.out.write_all(rendered.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Default for Termage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Termage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Termage")
            .field("ctx", &self.ctx)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
