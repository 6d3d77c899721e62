use crate::context::RenderContext;
use termage_shortcodes::escape;

use crate::style::StyleAttributes;

use super::{El, Element};

/// A terminal hyperlink (OSC-8). Shows the URL when the text is empty.
///
/// The text may contain shortcodes. A URL shown in its place is printed as
/// written.
///
/// ```rust
/// use termage_render::element::{Element, Link};
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default());
/// assert_eq!(
///     Link::new("docs", "https://example.com").render(&ctx),
///     "\x1b]8;;https://example.com\x1b\\docs\x1b]8;;\x1b\\"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    text: String,
    href: String,
    styles: StyleAttributes,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            styles: StyleAttributes::new(),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Styles applied around the link.
    pub fn styles(mut self, styles: &StyleAttributes) -> Self {
        self.styles = self.styles.merge(styles);
        self
    }
}

impl Element for Link {
    fn render(&self, ctx: &RenderContext) -> String {
        let text = if self.text.is_empty() {
            escape(&self.href)
        } else {
            self.text.clone()
        };
        El::new(text)
            .styles(&self.styles)
            .href(self.href.as_str())
            .render(ctx)
    }
}
