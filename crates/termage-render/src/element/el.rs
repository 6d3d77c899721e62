use crate::ansi;
use crate::context::RenderContext;
use crate::style::{Decoration, Display, StyleAttributes, TextAlign, Width};
use crate::width::{box_width, compute_padding, pad, visible_width};

use super::Element;

/// A styled run of text.
///
/// The value may contain shortcodes; they are expanded at render time. The
/// rendered layout is, from the outside in:
///
/// ```text
/// margin-left  [on] padding-left  value  padding-right [off]  margin-right  (newline if block)
/// ```
///
/// With a width set, the padding is computed to fill the box instead: the
/// aligned side keeps its padding and the other side takes the rest.
///
/// Spacing, alignment and display left unset come from the theme's `el`
/// table: `el.padding-left`, `el.padding-right`, `el.margin-left`,
/// `el.margin-right` (all 0), `el.text-align` (left) and `el.display`
/// (inline).
///
/// ```rust
/// use termage_render::element::{El, Element};
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
///
/// let out = El::new("[b]hi[/b]").color("danger").pl(1).render(&ctx);
/// assert_eq!(out, "\x1b[31m \x1b[1mhi\x1b[22m\x1b[39m");
///
/// let out = El::new("ok").w(6).px(1).render(&ctx);
/// assert_eq!(out, " ok   ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct El {
    value: String,
    styles: StyleAttributes,
    href: Option<String>,
}

impl El {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Replaces the value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &StyleAttributes {
        &self.styles
    }

    /// Overlays a whole set of attributes.
    pub fn styles(mut self, styles: &StyleAttributes) -> Self {
        self.styles = self.styles.merge(styles);
        self
    }

    /// Foreground color: a theme color name or a raw color value.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.styles.color = Some(color.into());
        self
    }

    /// Background color: a theme color name or a raw color value.
    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.styles.bg = Some(color.into());
        self
    }

    pub fn decoration(mut self, decoration: Decoration) -> Self {
        self.styles.decorations.insert(decoration);
        self
    }

    pub fn bold(self) -> Self {
        self.decoration(Decoration::Bold)
    }

    pub fn italic(self) -> Self {
        self.decoration(Decoration::Italic)
    }

    pub fn underline(self) -> Self {
        self.decoration(Decoration::Underline)
    }

    pub fn strikethrough(self) -> Self {
        self.decoration(Decoration::Strikethrough)
    }

    pub fn dim(self) -> Self {
        self.decoration(Decoration::Dim)
    }

    pub fn blink(self) -> Self {
        self.decoration(Decoration::Blink)
    }

    pub fn reverse(self) -> Self {
        self.decoration(Decoration::Reverse)
    }

    pub fn invisible(self) -> Self {
        self.decoration(Decoration::Invisible)
    }

    /// Padding before the value, inside the colors.
    pub fn pl(mut self, columns: usize) -> Self {
        self.styles.padding_left = Some(columns);
        self
    }

    /// Padding after the value, inside the colors.
    pub fn pr(mut self, columns: usize) -> Self {
        self.styles.padding_right = Some(columns);
        self
    }

    /// Padding on each side.
    pub fn px(self, columns: usize) -> Self {
        self.pl(columns).pr(columns)
    }

    /// Margin before the element, outside the colors.
    pub fn ml(mut self, columns: usize) -> Self {
        self.styles.margin_left = Some(columns);
        self
    }

    /// Margin after the element, outside the colors.
    pub fn mr(mut self, columns: usize) -> Self {
        self.styles.margin_right = Some(columns);
        self
    }

    /// Margin on each side.
    pub fn mx(self, columns: usize) -> Self {
        self.ml(columns).mr(columns)
    }

    /// Box width in columns, capped at the terminal width.
    pub fn w(mut self, columns: usize) -> Self {
        self.styles.width = Some(Width::Columns(columns));
        self
    }

    /// Box as wide as the terminal.
    pub fn w_full(mut self) -> Self {
        self.styles.width = Some(Width::Full);
        self
    }

    pub fn text_align_left(mut self) -> Self {
        self.styles.text_align = Some(TextAlign::Left);
        self
    }

    pub fn text_align_right(mut self) -> Self {
        self.styles.text_align = Some(TextAlign::Right);
        self
    }

    /// Ends the element with a newline.
    pub fn block(mut self) -> Self {
        self.styles.display = Some(Display::Block);
        self
    }

    pub fn inline(mut self) -> Self {
        self.styles.display = Some(Display::Inline);
        self
    }

    /// Makes the value an OSC-8 hyperlink.
    pub fn href(mut self, url: impl Into<String>) -> Self {
        self.href = Some(url.into());
        self
    }
}

impl Element for El {
    fn render(&self, ctx: &RenderContext) -> String {
        let styles = &self.styles;
        let theme = ctx.theme();
        let spacing = |value: Option<usize>, key: &str| {
            value.unwrap_or_else(|| theme.get_or(&format!("el.{}", key), 0usize))
        };
        let padding_left = spacing(styles.padding_left, "padding-left");
        let padding_right = spacing(styles.padding_right, "padding-right");

        let mut content = ctx.shortcodes.parse(&self.value);
        if let Some(url) = &self.href {
            content = ansi::hyperlink(url, &content);
        }

        let (left, right) = match styles.width {
            Some(width) => {
                let terminal = ctx.width();
                let columns = match width {
                    Width::Columns(n) => box_width(n, false, terminal),
                    Width::Full => box_width(terminal, true, terminal),
                };
                let align = styles
                    .text_align
                    .unwrap_or_else(|| theme.get_or("el.text-align", TextAlign::Left));
                let padding_x = match align {
                    TextAlign::Left => padding_left,
                    TextAlign::Right => padding_right,
                };
                compute_padding(visible_width(&content), columns, align, padding_x)
            }
            None => (padding_left, padding_right),
        };

        let body = pad(&content, left, right);
        let painted = ansi::paint(&styles.resolve_colors(theme), &body);
        let mut out = pad(
            &painted,
            spacing(styles.margin_left, "margin-left"),
            spacing(styles.margin_right, "margin-right"),
        );
        let display = styles
            .display
            .unwrap_or_else(|| theme.get_or("el.display", Display::Inline));
        if display == Display::Block {
            out.push('\n');
        }
        out
    }
}
