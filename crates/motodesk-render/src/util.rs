//! Unicode-aware width helpers.
//!
//! All widths here are terminal display columns, not bytes or chars: CJK
//! characters count as two, combining marks as zero.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Returns the display width of `s`.
///
/// ```rust
/// use motodesk_render::display_width;
///
/// assert_eq!(display_width("Ducati"), 6);
/// assert_eq!(display_width("東京"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Replaces control characters (newlines, tabs, escapes) with spaces so a
/// cell always occupies exactly one terminal line.
///
/// ```rust
/// use motodesk_render::single_line;
///
/// assert_eq!(single_line("Ana\nSmith"), "Ana Smith");
/// assert_eq!(single_line("plain"), "plain");
/// ```
pub fn single_line(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Truncates `s` to at most `max_width` columns, ending in `…` when cut.
///
/// ```rust
/// use motodesk_render::truncate_end;
///
/// assert_eq!(truncate_end("Harley Davidson", 8), "Harley …");
/// assert_eq!(truncate_end("BMW", 8), "BMW");
/// ```
pub fn truncate_end(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let limit = max_width - 1;
    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    result
}

/// Pads `s` with spaces on the right to `width` columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Pads `s` with spaces on the left to `width` columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

/// Flattens, truncates then pads, so the result is one line exactly
/// `width` columns wide.
pub fn fit(s: &str, width: usize) -> String {
    pad_right(&truncate_end(&single_line(s), width), width)
}
