//! Renderable elements.
//!
//! Every element is a plain builder: setters consume and return `self`, and
//! [`Element::render`] produces a string with embedded escape sequences. The
//! element never writes anywhere itself; see `termage::Termage` for output.
//!
//! ```rust
//! use termage_render::element::{bold, div, Element};
//! use termage_render::{RenderContext, Theme};
//!
//! let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
//! assert_eq!(bold("RAD").render(&ctx), "\x1b[1mRAD\x1b[22m");
//! assert_eq!(div("line").render(&ctx), "line\n");
//! ```

mod alert;
mod el;
mod heading;
mod link;
mod rule;

pub use alert::{Alert, AlertKind, ParseAlertKindError, ALERT_PADDING_X};
pub use el::El;
pub use heading::Heading;
pub use link::Link;
pub use rule::Rule;

use crate::context::RenderContext;

/// Something that renders to an escaped string.
pub trait Element {
    fn render(&self, ctx: &RenderContext) -> String;

    /// Renders with the process-wide theme and the detected terminal width.
    fn render_default(&self) -> String {
        self.render(&RenderContext::default())
    }
}

impl<E: Element + ?Sized> Element for &E {
    fn render(&self, ctx: &RenderContext) -> String {
        (**self).render(ctx)
    }
}

impl<E: Element + ?Sized> Element for Box<E> {
    fn render(&self, ctx: &RenderContext) -> String {
        (**self).render(ctx)
    }
}

pub fn bold(value: impl Into<String>) -> El {
    El::new(value).bold()
}

pub fn italic(value: impl Into<String>) -> El {
    El::new(value).italic()
}

pub fn underline(value: impl Into<String>) -> El {
    El::new(value).underline()
}

pub fn strikethrough(value: impl Into<String>) -> El {
    El::new(value).strikethrough()
}

pub fn dim(value: impl Into<String>) -> El {
    El::new(value).dim()
}

pub fn blink(value: impl Into<String>) -> El {
    El::new(value).blink()
}

pub fn reverse(value: impl Into<String>) -> El {
    El::new(value).reverse()
}

pub fn invisible(value: impl Into<String>) -> El {
    El::new(value).invisible()
}

/// An inline element.
pub fn span(value: impl Into<String>) -> El {
    El::new(value).inline()
}

/// A block element, ending with a newline.
pub fn div(value: impl Into<String>) -> El {
    El::new(value).block()
}
