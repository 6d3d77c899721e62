//! Terminal width detection.
//!
//! Element widths are capped at the terminal width. Detection order:
//!
//! 1. The size of the attached terminal (`terminal_size`)
//! 2. The `COLUMNS` environment variable
//! 3. [`DEFAULT_WIDTH`]
//!
//! Override detection with [`set_width_detector`], typically in tests:
//!
//! ```rust
//! use termage_render::terminal::{set_width_detector, terminal_width};
//!
//! set_width_detector(|| Some(40));
//! assert_eq!(terminal_width(), 40);
//! # termage_render::terminal::reset_width_detector();
//! ```

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Width used when nothing else is known.
pub const DEFAULT_WIDTH: usize = 80;

type WidthDetector = fn() -> Option<usize>;

static WIDTH_DETECTOR: Lazy<Mutex<WidthDetector>> =
    Lazy::new(|| Mutex::new(default_width_detector));

/// Overrides the detector used to determine the terminal width.
///
/// The detector returns `None` when it cannot tell; [`DEFAULT_WIDTH`] is
/// used then.
pub fn set_width_detector(detector: WidthDetector) {
    let mut guard = WIDTH_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    *guard = detector;
}

/// Restores the default detector.
pub fn reset_width_detector() {
    set_width_detector(default_width_detector);
}

/// Returns the terminal width in columns. Never zero.
pub fn terminal_width() -> usize {
    let detector = *WIDTH_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    detector().filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH)
}

fn default_width_detector() -> Option<usize> {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .filter(|w| *w > 0)
        .or_else(columns_from_env)
}

fn columns_from_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|w| *w > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_override_detector() {
        set_width_detector(|| Some(123));
        assert_eq!(terminal_width(), 123);
        reset_width_detector();
    }

    #[test]
    #[serial]
    fn test_unknown_width_falls_back_to_default() {
        set_width_detector(|| None);
        assert_eq!(terminal_width(), DEFAULT_WIDTH);
        set_width_detector(|| Some(0));
        assert_eq!(terminal_width(), DEFAULT_WIDTH);
        reset_width_detector();
    }

    #[test]
    #[serial]
    fn test_columns_env() {
        std::env::set_var("COLUMNS", "97");
        assert_eq!(columns_from_env(), Some(97));
        std::env::set_var("COLUMNS", "wide");
        assert_eq!(columns_from_env(), None);
        std::env::remove_var("COLUMNS");
        assert_eq!(columns_from_env(), None);
    }

    #[test]
    #[serial]
    fn test_default_detector_is_positive() {
        reset_width_detector();
        assert!(terminal_width() > 0);
    }
}
