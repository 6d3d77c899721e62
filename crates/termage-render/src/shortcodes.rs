//! Built-in shortcode handlers.
//!
//! | tags | effect |
//! |------|--------|
//! | `bold`/`b`, `italic`/`i`, `underline`/`u`, `strikethrough`/`s`, `dim`/`d`, `blink`, `reverse`, `invisible` | decoration on/off pair |
//! | `anchor`/`a` | OSC-8 hyperlink to `href` (or the `=value`) |
//! | `color`, `bg` | foreground / background, resolved through `colors.<name>` |
//! | `p`, `px`, `pl`, `pr` | padding spaces |
//! | `m`, `mx`, `ml`, `mr` | margin spaces |
//!
//! Spacing tags scale their `=value` by the theme multipliers
//! `padding.global|left|right` (or `margin.*`), each defaulting to 1:
//!
//! - `[pl=N]` puts `N × left × global` spaces before the content, `[pr=N]`
//!   `N × right × global` after it.
//! - `[px=N]` splits `N` in half and scales each side.
//! - `[p l=A r=B]` puts exactly `A` and `B` spaces. A plain `[p=N]` acts like
//!   `[px=N]`; a named `l` or `r` wins over it for that side.
//!
//! Non-numeric and negative values count as zero.
//!
//! ```rust
//! use std::sync::Arc;
//! use termage_render::{Shortcodes, Theme};
//!
//! let shortcodes = Shortcodes::new(Arc::new(Theme::default()));
//! assert_eq!(shortcodes.parse("[b]RAD[/b]"), "\x1b[1mRAD\x1b[22m");
//! assert_eq!(shortcodes.parse("[pl=2]x[/pl]"), "  x");
//! assert_eq!(shortcodes.strip("[b]RAD[/b]"), "RAD");
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use termage_shortcodes::{strip_shortcodes, Handler, HandlerRegistry, Invocation, Processor};

use crate::ansi;
use crate::style::{Decoration, StyleAttributes};
use crate::theme::{current_theme, Theme};
use crate::width::pad;

/// Registry of handlers receiving the active theme.
pub type ShortcodeRegistry = HandlerRegistry<Theme>;

/// Upper bound on spaces a single spacing tag produces.
pub const MAX_SPACING: usize = 10_000;

static DEFAULT_PROCESSOR: Lazy<Processor<Theme>> = Lazy::new(|| Processor::new(default_registry()));

/// A registry holding every built-in handler.
///
/// Start from this to add or override tags:
///
/// ```rust
/// use std::sync::Arc;
/// use termage_render::shortcodes::default_registry;
/// use termage_render::{Shortcodes, Theme};
///
/// let mut registry = default_registry();
/// registry.register("shout", |inv, _| inv.content().to_uppercase()).unwrap();
///
/// let shortcodes = Shortcodes::with_registry(registry, Arc::new(Theme::default()));
/// assert_eq!(shortcodes.parse("[shout]hey[/shout]"), "HEY");
/// ```
pub fn default_registry() -> ShortcodeRegistry {
    let mut registry = ShortcodeRegistry::new();

    for (names, decoration) in [
        (&["bold", "b"][..], Decoration::Bold),
        (&["italic", "i"][..], Decoration::Italic),
        (&["underline", "u"][..], Decoration::Underline),
        (&["strikethrough", "s"][..], Decoration::Strikethrough),
        (&["dim", "d"][..], Decoration::Dim),
        (&["blink"][..], Decoration::Blink),
        (&["reverse"][..], Decoration::Reverse),
        (&["invisible"][..], Decoration::Invisible),
    ] {
        add(&mut registry, names, move |inv, _| {
            ansi::decorate(decoration, inv.content())
        });
    }

    add(&mut registry, &["anchor", "a"], anchor);
    add(&mut registry, &["color"], |inv, theme| color(inv, theme, false));
    add(&mut registry, &["bg"], |inv, theme| color(inv, theme, true));

    for (group, prefix) in [("padding", "p"), ("margin", "m")] {
        for (suffix, mode) in [
            ("", Spacing::Sides),
            ("x", Spacing::Split),
            ("l", Spacing::Left),
            ("r", Spacing::Right),
        ] {
            let name = format!("{}{}", prefix, suffix);
            add(&mut registry, &[name.as_str()], move |inv, theme| {
                spacing(inv, theme, group, mode)
            });
        }
    }

    registry
}

fn add<F>(registry: &mut ShortcodeRegistry, names: &[&str], handler: F)
where
    F: Fn(&Invocation<'_>, &Theme) -> String + Send + Sync + 'static,
{
    let handler: Handler<Theme> = Arc::new(handler);
    for name in names {
        if let Err(err) = registry.register_arc(name, Arc::clone(&handler)) {
            tracing::error!(target: "termage.render", error = %err, "builtin_shortcode_rejected");
        }
    }
}

fn anchor(inv: &Invocation<'_>, _: &Theme) -> String {
    match inv.param("href").or_else(|| inv.bbcode()) {
        Some(href) => ansi::hyperlink(href, inv.content()),
        None => inv.content().to_string(),
    }
}

fn color(inv: &Invocation<'_>, theme: &Theme, background: bool) -> String {
    let Some(value) = inv.bbcode().filter(|v| !v.is_empty()) else {
        return inv.content().to_string();
    };
    let resolved = theme.resolve_color(value);
    let mut attrs = StyleAttributes::new();
    if background {
        attrs.bg = Some(resolved);
    } else {
        attrs.color = Some(resolved);
    }
    ansi::paint(&attrs, inv.content())
}

#[derive(Debug, Clone, Copy)]
enum Spacing {
    /// `p` / `m`: explicit `l`/`r`, else the value split in half.
    Sides,
    /// `px` / `mx`
    Split,
    Left,
    Right,
}

fn spacing(inv: &Invocation<'_>, theme: &Theme, group: &str, mode: Spacing) -> String {
    let multiplier = |side: &str| {
        theme
            .get_number(&format!("{}.{}", group, side))
            .unwrap_or(1.0)
    };
    let global = multiplier("global");
    let value = inv.parameters().bbcode_number().unwrap_or(0.0);
    let scaled = |n: f64, side: &str| columns(n * multiplier(side) * global);

    let (left, right) = match mode {
        Spacing::Left => (scaled(value, "left"), 0),
        Spacing::Right => (0, scaled(value, "right")),
        Spacing::Split => (scaled(value / 2.0, "left"), scaled(value / 2.0, "right")),
        Spacing::Sides => {
            let explicit = |key: &str| inv.parameters().number(key).map(columns);
            (
                explicit("l").unwrap_or_else(|| scaled(value / 2.0, "left")),
                explicit("r").unwrap_or_else(|| scaled(value / 2.0, "right")),
            )
        }
    };
    pad(inv.content(), left, right)
}

fn columns(n: f64) -> usize {
    if n.is_finite() && n > 0.0 {
        (n.floor() as usize).min(MAX_SPACING)
    } else {
        0
    }
}

/// Shortcode expansion bound to a theme.
#[derive(Clone)]
pub struct Shortcodes {
    processor: Processor<Theme>,
    theme: Arc<Theme>,
}

impl Shortcodes {
    /// Built-in handlers with the given theme.
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            processor: DEFAULT_PROCESSOR.clone(),
            theme,
        }
    }

    /// Custom handlers with the given theme.
    pub fn with_registry(registry: ShortcodeRegistry, theme: Arc<Theme>) -> Self {
        Self {
            processor: Processor::new(registry),
            theme,
        }
    }

    /// Same handlers, different theme.
    pub fn with_theme(&self, theme: Arc<Theme>) -> Self {
        Self {
            processor: self.processor.clone(),
            theme,
        }
    }

    /// Expands every shortcode in `text`.
    pub fn parse(&self, text: &str) -> String {
        self.processor.expand(text, &self.theme)
    }

    /// Removes shortcode markup from `text` without expanding it.
    pub fn strip(&self, text: &str) -> String {
        strip_shortcodes(text)
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    pub fn registry(&self) -> &ShortcodeRegistry {
        self.processor.registry()
    }
}

impl Default for Shortcodes {
    /// Built-in handlers with the process-wide theme.
    fn default() -> Self {
        Self::new(current_theme())
    }
}

impl fmt::Debug for Shortcodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcodes")
            .field("registry", self.processor.registry())
            .field("theme", &self.theme.name())
            .finish()
    }
}

/// Expands shortcodes with the built-in handlers and the process-wide theme.
pub fn expand(text: &str) -> String {
    DEFAULT_PROCESSOR.expand(text, &current_theme())
}

/// Removes shortcode markup. See [`strip_shortcodes`].
pub fn strip(text: &str) -> String {
    strip_shortcodes(text)
}
