//! Style attributes applied to elements and shortcodes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// A text decoration with its own SGR on/off pair.
///
/// Declaration order is the order decorations are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Invisible,
    Strikethrough,
}

impl Decoration {
    pub const ALL: [Decoration; 8] = [
        Decoration::Bold,
        Decoration::Dim,
        Decoration::Italic,
        Decoration::Underline,
        Decoration::Blink,
        Decoration::Reverse,
        Decoration::Invisible,
        Decoration::Strikethrough,
    ];

    /// SGR code switching the decoration on.
    pub fn on_code(self) -> u8 {
        match self {
            Decoration::Bold => 1,
            Decoration::Dim => 2,
            Decoration::Italic => 3,
            Decoration::Underline => 4,
            Decoration::Blink => 5,
            Decoration::Reverse => 7,
            Decoration::Invisible => 8,
            Decoration::Strikethrough => 9,
        }
    }

    /// SGR code switching the decoration off. Bold and dim share 22.
    pub fn off_code(self) -> u8 {
        match self {
            Decoration::Bold | Decoration::Dim => 22,
            Decoration::Italic => 23,
            Decoration::Underline => 24,
            Decoration::Blink => 25,
            Decoration::Reverse => 27,
            Decoration::Invisible => 28,
            Decoration::Strikethrough => 29,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Decoration::Bold => "bold",
            Decoration::Dim => "dim",
            Decoration::Italic => "italic",
            Decoration::Underline => "underline",
            Decoration::Blink => "blink",
            Decoration::Reverse => "reverse",
            Decoration::Invisible => "invisible",
            Decoration::Strikethrough => "strikethrough",
        }
    }
}

/// Box width request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// A fixed number of columns, capped at the terminal width.
    Columns(usize),
    /// Exactly the terminal width.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// Whether an element ends its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    #[default]
    Inline,
    Block,
}

/// CSS-like style attributes. Every field is optional.
///
/// Colors are stored as written (semantic names such as `primary` or raw
/// color values) and resolved against a [`Theme`] with
/// [`resolve_colors`](Self::resolve_colors) before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    pub color: Option<String>,
    pub bg: Option<String>,
    pub decorations: BTreeSet<Decoration>,
    pub padding_left: Option<usize>,
    pub padding_right: Option<usize>,
    pub margin_left: Option<usize>,
    pub margin_right: Option<usize>,
    pub width: Option<Width>,
    pub text_align: Option<TextAlign>,
    pub display: Option<Display>,
}

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays `other` on top of `self`.
    ///
    /// `Some` fields in `other` replace those in `self`; decorations are
    /// combined.
    ///
    /// ```rust
    /// use termage_render::style::{Decoration, StyleAttributes};
    ///
    /// let mut base = StyleAttributes::new();
    /// base.color = Some("red".into());
    /// base.decorations.insert(Decoration::Bold);
    ///
    /// let mut over = StyleAttributes::new();
    /// over.color = Some("blue".into());
    /// over.decorations.insert(Decoration::Italic);
    ///
    /// let merged = base.merge(&over);
    /// assert_eq!(merged.color.as_deref(), Some("blue"));
    /// assert_eq!(merged.decorations.len(), 2);
    /// ```
    pub fn merge(&self, other: &StyleAttributes) -> StyleAttributes {
        StyleAttributes {
            color: other.color.clone().or_else(|| self.color.clone()),
            bg: other.bg.clone().or_else(|| self.bg.clone()),
            decorations: self.decorations.union(&other.decorations).copied().collect(),
            padding_left: other.padding_left.or(self.padding_left),
            padding_right: other.padding_right.or(self.padding_right),
            margin_left: other.margin_left.or(self.margin_left),
            margin_right: other.margin_right.or(self.margin_right),
            width: other.width.or(self.width),
            text_align: other.text_align.or(self.text_align),
            display: other.display.or(self.display),
        }
    }

    /// Replaces color names with their `colors.<name>` theme entries.
    pub fn resolve_colors(&self, theme: &Theme) -> StyleAttributes {
        StyleAttributes {
            color: self.color.as_deref().map(|c| theme.resolve_color(c)),
            bg: self.bg.as_deref().map(|c| theme.resolve_color(c)),
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StyleAttributes::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_codes() {
        let pairs: Vec<(u8, u8)> = Decoration::ALL
            .iter()
            .map(|d| (d.on_code(), d.off_code()))
            .collect();
        assert_eq!(
            pairs,
            vec![(1, 22), (2, 22), (3, 23), (4, 24), (5, 25), (7, 27), (8, 28), (9, 29)]
        );
    }

    #[test]
    fn test_decorations_order_by_declaration() {
        let set: BTreeSet<Decoration> = [Decoration::Underline, Decoration::Bold, Decoration::Italic]
            .into_iter()
            .collect();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![Decoration::Bold, Decoration::Italic, Decoration::Underline]
        );
    }

    #[test]
    fn test_merge_overlays_some_fields() {
        let base = StyleAttributes {
            color: Some("red".into()),
            padding_left: Some(2),
            text_align: Some(TextAlign::Left),
            ..Default::default()
        };
        let over = StyleAttributes {
            padding_left: Some(5),
            width: Some(Width::Full),
            ..Default::default()
        };
        let merged = base.merge(&over);
        assert_eq!(merged.color.as_deref(), Some("red"));
        assert_eq!(merged.padding_left, Some(5));
        assert_eq!(merged.width, Some(Width::Full));
        assert_eq!(merged.text_align, Some(TextAlign::Left));
    }

    #[test]
    fn test_resolve_colors_through_theme() {
        let theme = Theme::new().with("colors.primary", "blue");
        let attrs = StyleAttributes {
            color: Some("primary".into()),
            bg: Some("magenta".into()),
            ..Default::default()
        };
        let resolved = attrs.resolve_colors(&theme);
        assert_eq!(resolved.color.as_deref(), Some("blue"));
        assert_eq!(resolved.bg.as_deref(), Some("magenta"));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let attrs: StyleAttributes = serde_yaml::from_str(
            "color: white\nbg: danger\ndecorations: [bold, underline]\nwidth: full\ntext_align: right\n",
        )
        .unwrap();
        assert_eq!(attrs.bg.as_deref(), Some("danger"));
        assert!(attrs.decorations.contains(&Decoration::Underline));
        assert_eq!(attrs.width, Some(Width::Full));
        assert_eq!(attrs.text_align, Some(TextAlign::Right));
    }

    #[test]
    fn test_empty() {
        assert!(StyleAttributes::new().is_empty());
    }
}
