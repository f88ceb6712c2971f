//! Named styles for the table chrome.

use console::Style;

/// The set of styles a [`TableRenderer`](crate::TableRenderer) paints with.
///
/// Styles are only applied when the renderer is styled; in plain text mode
/// the theme is ignored entirely.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Header cells.
    pub header: Style,
    /// Border lines.
    pub border: Style,
    /// Placeholder text in the search line and the empty-state row.
    pub muted: Style,
    /// The query when one is typed.
    pub accent: Style,
    /// The pager line.
    pub pager: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header: Style::new().bold(),
            border: Style::new().dim(),
            muted: Style::new().dim().italic(),
            accent: Style::new().cyan(),
            pager: Style::new().dim(),
        }
    }
}

impl Theme {
    /// A theme with no styling at all.
    pub fn plain() -> Self {
        Theme {
            header: Style::new(),
            border: Style::new(),
            muted: Style::new(),
            accent: Style::new(),
            pager: Style::new(),
        }
    }
}

/// Applies `style` to `text`, forcing ANSI output regardless of the tty.
pub(crate) fn paint(style: &Style, text: &str) -> String {
    style
        .clone()
        .force_styling(true)
        .apply_to(text)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_emits_escape_codes() {
        let out = paint(&Style::new().bold(), "Name");
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("Name"));
    }

    #[test]
    fn plain_theme_adds_nothing() {
        let theme = Theme::plain();
        assert_eq!(paint(&theme.header, "Name"), "Name");
    }
}
