//! Themes: styling variables addressed by dotted path.
//!
//! A [`Theme`] is a nested table of variables (`colors.primary`,
//! `alert.width`, `padding.global`). Elements and shortcode handlers read it
//! with a default for every lookup, so a partial theme is always usable.
//!
//! ## Construction
//!
//! Programmatic:
//! ```rust
//! use termage_render::Theme;
//!
//! let theme = Theme::default()
//!     .with("colors.primary", "magenta")
//!     .with("alert.width", 60);
//! ```
//!
//! From YAML, merged over the built-in variables:
//! ```rust
//! use termage_render::Theme;
//!
//! let user = Theme::from_yaml(r#"
//! colors:
//!   danger: bright_red
//! padding:
//!   global: 2
//! "#).unwrap();
//! let theme = Theme::default().merge(user);
//! assert_eq!(theme.resolve_color("danger"), "bright_red");
//! assert_eq!(theme.resolve_color("success"), "green");
//! ```
//!
//! ## Process-wide Theme
//!
//! Top-level helpers such as [`crate::expand`] read the process-wide theme.
//! Configure it once with [`set_theme`] before rendering; [`current_theme`]
//! hands out a shared snapshot.

#[allow(clippy::module_inception)]
mod theme;

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

pub use theme::{Theme, ThemeError};

static CURRENT_THEME: Lazy<RwLock<Arc<Theme>>> =
    Lazy::new(|| RwLock::new(Arc::new(Theme::default())));

/// Returns the process-wide theme.
pub fn current_theme() -> Arc<Theme> {
    let guard = CURRENT_THEME.read().unwrap_or_else(|e| e.into_inner());
    Arc::clone(&guard)
}

/// Replaces the process-wide theme.
pub fn set_theme(theme: Theme) {
    tracing::debug!(target: "termage.theme", name = theme.name().unwrap_or("<unnamed>"), "set_theme");
    let mut guard = CURRENT_THEME.write().unwrap_or_else(|e| e.into_inner());
    *guard = Arc::new(theme);
}

/// Restores the built-in theme as the process-wide theme.
pub fn reset_theme() {
    set_theme(Theme::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_and_reset_theme() {
        set_theme(Theme::named("custom").with("colors.primary", "cyan"));
        assert_eq!(current_theme().name(), Some("custom"));
        assert_eq!(current_theme().resolve_color("primary"), "cyan");

        reset_theme();
        assert_eq!(current_theme().name(), Some("default"));
        assert_eq!(current_theme().resolve_color("primary"), "blue");
    }

    #[test]
    #[serial]
    fn test_snapshot_survives_replacement() {
        reset_theme();
        let snapshot = current_theme();
        set_theme(Theme::new());
        assert_eq!(snapshot.resolve_color("danger"), "red");
        assert_eq!(current_theme().resolve_color("danger"), "danger");
        reset_theme();
    }
}
