use crate::context::RenderContext;
use crate::style::TextAlign;
use crate::width::{box_width, compute_padding, truncate_to_width, visible_width};

use super::Element;

/// Rule characters kept between a label and the box edge on its aligned side.
const LABEL_INSET: usize = 2;

/// A horizontal line, optionally with a label.
///
/// Theme keys: `rule.character` ("─"), `rule.width` (50), `rule.width-full`
/// (true) and `rule.text-align` (left). The label sits [`LABEL_INSET`]
/// characters in from its aligned side with a space on either side.
///
/// ```rust
/// use termage_render::element::{Element, Rule};
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(12);
/// assert_eq!(Rule::new().render(&ctx), "────────────\n");
/// assert_eq!(Rule::new().label("Hi").render(&ctx), "── Hi ──────\n");
/// assert_eq!(Rule::new().label("Hi").character('=').w(8).text_align_right().render(&ctx), "== Hi ==\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    label: String,
    character: Option<char>,
    width: Option<usize>,
    width_full: Option<bool>,
    text_align: Option<TextAlign>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn character(mut self, character: char) -> Self {
        self.character = Some(character);
        self
    }

    /// Fixed width in columns, capped at the terminal width.
    pub fn w(mut self, columns: usize) -> Self {
        self.width = Some(columns);
        self.width_full = Some(false);
        self
    }

    pub fn w_full(mut self) -> Self {
        self.width_full = Some(true);
        self
    }

    pub fn text_align_left(mut self) -> Self {
        self.text_align = Some(TextAlign::Left);
        self
    }

    pub fn text_align_right(mut self) -> Self {
        self.text_align = Some(TextAlign::Right);
        self
    }
}

impl Element for Rule {
    fn render(&self, ctx: &RenderContext) -> String {
        let theme = ctx.theme();
        let character = self.character.unwrap_or_else(|| {
            theme
                .get_str("rule.character")
                .and_then(|s| s.chars().next())
                .unwrap_or('─')
        });
        let full = self
            .width_full
            .unwrap_or_else(|| theme.get_or("rule.width-full", true));
        let requested = self
            .width
            .unwrap_or_else(|| theme.get_or("rule.width", 50usize));
        let align = self
            .text_align
            .unwrap_or_else(|| theme.get_or("rule.text-align", TextAlign::Left));

        let columns = box_width(requested, full, ctx.width());
        let line = |n: usize| std::iter::repeat(character).take(n).collect::<String>();

        let label = ctx.shortcodes.parse(&self.label);
        // room for the inset and the two spaces around the label
        let room = columns.saturating_sub(LABEL_INSET + 2);
        if label.is_empty() || room == 0 {
            return format!("{}\n", line(columns));
        }

        let label = truncate_to_width(&label, room);
        let (left, right) = compute_padding(visible_width(&label) + 2, columns, align, LABEL_INSET);
        format!("{} {} {}\n", line(left), label, line(right))
    }
}
