use std::fmt;
use std::str::FromStr;

use crate::context::RenderContext;
use crate::style::TextAlign;
use crate::width::box_width;

use super::{El, Element};

/// Horizontal padding inside an alert.
pub const ALERT_PADDING_X: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Info,
    Warning,
    Danger,
    Success,
    Primary,
    Secondary,
}

impl AlertKind {
    pub const ALL: [AlertKind; 6] = [
        AlertKind::Info,
        AlertKind::Warning,
        AlertKind::Danger,
        AlertKind::Success,
        AlertKind::Primary,
        AlertKind::Secondary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Danger => "danger",
            AlertKind::Success => "success",
            AlertKind::Primary => "primary",
            AlertKind::Secondary => "secondary",
        }
    }

    /// Foreground used when the theme has no `alert.type.<kind>.color`.
    fn default_color(self) -> &'static str {
        match self {
            AlertKind::Danger | AlertKind::Primary | AlertKind::Secondary => "white",
            AlertKind::Info | AlertKind::Warning | AlertKind::Success => "black",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alert kind '{0}' (expected info, warning, danger, success, primary or secondary)")]
pub struct ParseAlertKindError(String);

impl FromStr for AlertKind {
    type Err = ParseAlertKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlertKindError(s.to_string()))
    }
}

/// A message in a colored box three rows high.
///
/// Settings left unset are read from the theme:
///
/// | setting | theme key | default |
/// |---------|-----------|---------|
/// | width | `alert.width` | 50 |
/// | full width | `alert.width-full` | false |
/// | alignment | `alert.text-align` | left |
/// | background | `alert.type.<kind>.bg` | the kind name |
/// | foreground | `alert.type.<kind>.color` | black or white |
///
/// Colors then go through the `colors` table.
///
/// ```rust
/// use termage_render::element::{Alert, Element};
/// use termage_render::{RenderContext, Theme};
///
/// let ctx = RenderContext::from_theme(Theme::default()).with_terminal_width(80);
/// let out = Alert::new("Stay RAD!").danger().w(14).render(&ctx);
/// let rows: Vec<&str> = out.lines().collect();
/// assert_eq!(rows[0], format!("\x1b[41m{}\x1b[49m", " ".repeat(14)));
/// assert_eq!(rows[1], "\x1b[37m\x1b[41m  Stay RAD!   \x1b[49m\x1b[39m");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alert {
    value: String,
    kind: AlertKind,
    width: Option<usize>,
    width_full: Option<bool>,
    text_align: Option<TextAlign>,
}

impl Alert {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: AlertKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn info(self) -> Self {
        self.kind(AlertKind::Info)
    }

    pub fn warning(self) -> Self {
        self.kind(AlertKind::Warning)
    }

    pub fn danger(self) -> Self {
        self.kind(AlertKind::Danger)
    }

    pub fn success(self) -> Self {
        self.kind(AlertKind::Success)
    }

    pub fn primary(self) -> Self {
        self.kind(AlertKind::Primary)
    }

    pub fn secondary(self) -> Self {
        self.kind(AlertKind::Secondary)
    }

    /// Box width in columns, capped at the terminal width.
    pub fn w(mut self, columns: usize) -> Self {
        self.width = Some(columns);
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

impl Element for Alert {
    fn render(&self, ctx: &RenderContext) -> String {
        let theme = ctx.theme();
        let kind = self.kind.name();

        let align = self
            .text_align
            .unwrap_or_else(|| theme.get_or("alert.text-align", TextAlign::Left));
        let full = self
            .width_full
            .unwrap_or_else(|| theme.get_or("alert.width-full", false));
        let requested = self
            .width
            .unwrap_or_else(|| theme.get_or("alert.width", 50usize));
        let bg = theme
            .get_str(&format!("alert.type.{}.bg", kind))
            .unwrap_or_else(|| kind.to_string());
        let color = theme
            .get_str(&format!("alert.type.{}.color", kind))
            .unwrap_or_else(|| self.kind.default_color().to_string());

        let columns = box_width(requested, full, ctx.width());
        tracing::trace!(target: "termage.render", kind, columns, "render_alert");

        let filler = El::new("").pl(columns).bg(bg.as_str()).block();
        let mut body = El::new(self.value.as_str())
            .w(columns)
            .px(ALERT_PADDING_X)
            .bg(bg.as_str())
            .color(color)
            .block();
        body = match align {
            TextAlign::Left => body.text_align_left(),
            TextAlign::Right => body.text_align_right(),
        };

        let filler = filler.render(ctx);
        format!("{}{}{}", filler, body.render(ctx), filler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn compact(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn ctx() -> RenderContext {
        RenderContext::from_theme(Theme::default()).with_terminal_width(80)
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("danger".parse::<AlertKind>().unwrap(), AlertKind::Danger);
        assert_eq!(" Info ".parse::<AlertKind>().unwrap(), AlertKind::Info);
        assert!("fatal".parse::<AlertKind>().is_err());
        assert_eq!(AlertKind::Secondary.to_string(), "secondary");
    }

    #[test]
    fn test_three_rows_of_box_width() {
        let out = Alert::new("Stay RAD!").render(&ctx());
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(crate::width::visible_width(row), 50);
        }
    }

    #[test]
    fn test_right_alignment() {
        let out = Alert::new("abc").w(10).text_align_right().render(&ctx());
        let body = out.lines().nth(1).unwrap();
        assert_eq!(body, "\x1b[30m\x1b[44m     abc  \x1b[49m\x1b[39m");
    }

    #[test]
    fn test_width_full_and_cap() {
        let narrow = RenderContext::from_theme(Theme::default()).with_terminal_width(30);
        let out = Alert::new("x").w(200).render(&narrow);
        assert_eq!(crate::width::visible_width(out.lines().next().unwrap()), 30);
        let out = Alert::new("x").w_full().render(&ctx());
        assert_eq!(crate::width::visible_width(out.lines().next().unwrap()), 80);
    }

    #[test]
    fn test_theme_overrides() {
        let theme = Theme::default()
            .with("alert.width", 12)
            .with("alert.type.success.bg", "magenta")
            .with("alert.type.success.color", "yellow");
        let ctx = RenderContext::from_theme(theme).with_terminal_width(80);
        let out = Alert::new("ok").success().render(&ctx);
        assert_eq!(
            compact(&out),
            "\x1b[45m\x1b[49m\x1b[33m\x1b[45mok\x1b[49m\x1b[39m\x1b[45m\x1b[49m"
        );
        assert_eq!(crate::width::visible_width(out.lines().next().unwrap()), 12);
    }

    #[test]
    fn test_value_shortcodes_expand_once() {
        let out = Alert::new("[b][[x]][/b]").w(20).render(&ctx());
        assert!(out.contains("\x1b[1m[x]\x1b[22m"));
    }
}
