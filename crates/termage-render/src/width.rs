//! Visible width measurement and box layout arithmetic.
//!
//! Widths count characters after escape sequences are removed. Wide
//! characters count as one column.

use crate::ansi;
use crate::style::TextAlign;

/// Number of visible characters in `text`, ignoring escape sequences.
///
/// ```rust
/// use termage_render::width::visible_width;
///
/// assert_eq!(visible_width("\x1b[1mabc\x1b[22m"), 3);
/// assert_eq!(visible_width("héllo"), 5);
/// ```
pub fn visible_width(text: &str) -> usize {
    ansi::strip(text).chars().count()
}

/// Left and right padding placing `content_width` columns inside a box of
/// `box_width` columns.
///
/// The aligned side gets exactly `padding_x`; the other side takes the
/// remainder, never negative.
///
/// ```rust
/// use termage_render::style::TextAlign;
/// use termage_render::width::compute_padding;
///
/// assert_eq!(compute_padding(4, 10, TextAlign::Left, 2), (2, 4));
/// assert_eq!(compute_padding(4, 10, TextAlign::Right, 2), (4, 2));
/// assert_eq!(compute_padding(20, 10, TextAlign::Left, 2), (2, 0));
/// ```
pub fn compute_padding(
    content_width: usize,
    box_width: usize,
    align: TextAlign,
    padding_x: usize,
) -> (usize, usize) {
    let rest = box_width
        .saturating_sub(padding_x)
        .saturating_sub(content_width);
    match align {
        TextAlign::Left => (padding_x, rest),
        TextAlign::Right => (rest, padding_x),
    }
}

/// Effective box width: the terminal width when `full`, otherwise
/// `requested` capped at the terminal width.
pub fn box_width(requested: usize, full: bool, terminal_width: usize) -> usize {
    if full {
        terminal_width
    } else {
        requested.min(terminal_width)
    }
}

/// Surrounds `content` with literal spaces.
pub fn pad(content: &str, left: usize, right: usize) -> String {
    let mut out = String::with_capacity(content.len() + left + right);
    out.extend(std::iter::repeat(' ').take(left));
    out.push_str(content);
    out.extend(std::iter::repeat(' ').take(right));
    out
}

/// Truncates `text` to at most `max_width` visible characters, ending with
/// `…` when anything was cut.
///
/// Escape sequences are never split and are all kept, including those after
/// the cut, so styles opened before the cut are still closed.
///
/// ```rust
/// use termage_render::width::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Hello", 10), "Hello");
/// assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
/// assert_eq!(
///     truncate_to_width("\x1b[1mHello World\x1b[22m", 6),
///     "\x1b[1mHello…\x1b[22m"
/// );
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }

    let mut truncator = Truncator {
        out: String::with_capacity(text.len()),
        visible: 0,
        limit: max_width.saturating_sub(1),
        cut: false,
        room_for_ellipsis: max_width > 0,
    };

    let mut last = 0;
    for m in ansi::ansi_regex().find_iter(text) {
        truncator.push_text(&text[last..m.start()]);
        truncator.out.push_str(m.as_str());
        last = m.end();
    }
    truncator.push_text(&text[last..]);
    truncator.out
}

struct Truncator {
    out: String,
    visible: usize,
    limit: usize,
    cut: bool,
    room_for_ellipsis: bool,
}

impl Truncator {
    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if self.visible < self.limit {
                self.out.push(c);
                self.visible += 1;
            } else if !self.cut {
                self.cut = true;
                if self.room_for_ellipsis {
                    self.out.push('…');
                }
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn truncate_never_exceeds_width(text in "[a-zé ]{0,40}", max in 0usize..50) {
            let styled = format!("\x1b[1m{}\x1b[22m", text);
            let out = truncate_to_width(&styled, max);
            prop_assert!(visible_width(&out) <= max);
            prop_assert!(out.starts_with("\x1b[1m") && out.ends_with("\x1b[22m"));
        }

        #[test]
        fn padding_fills_box(content in 0usize..100, box_w in 0usize..100, px in 0usize..10) {
            let (l, r) = compute_padding(content, box_w, TextAlign::Left, px);
            prop_assert_eq!(l, px);
            if content + px <= box_w {
                prop_assert_eq!(l + r + content, box_w);
            } else {
                prop_assert_eq!(r, 0);
            }
        }
    }
}
