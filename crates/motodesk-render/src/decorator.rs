//! Table decorator: borders, headers, the search line and the pager.
//!
//! [`TableRenderer`] draws a computed [`PageView`] as text. It never looks
//! at rows or state, only at the cells and counts the grid already
//! produced, so the same view can be drawn at any width.
//!
//! # Example
//!
//! ```rust
//! use motodesk_grid::{Column, DataTable, ViewState};
//! use motodesk_render::{BorderStyle, TableRenderer};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"name": "Ducati Monster", "pricePerDay": 95}),
//!     json!({"name": "BMW R 1250 GS", "pricePerDay": 150}),
//! ];
//! let table = DataTable::new(
//!     vec![
//!         Column::new("name", "Name").sortable(),
//!         Column::new("pricePerDay", "Price/Day"),
//!     ],
//!     ["name"],
//! )
//! .unwrap();
//!
//! let view = table.view(&rows, &ViewState::new());
//! let text = TableRenderer::new(60).border(BorderStyle::Ascii).render(&view);
//! assert!(text.contains("| Name ↕"));
//! assert!(text.ends_with("Page 1 of 1 · 2 of 2 rows"));
//! ```

use motodesk_grid::{Body, Dir, Header, PageView};

use crate::theme::{paint, Theme};
use crate::util::{display_width, fit, single_line};

/// Narrowest a column is ever shrunk to.
pub const MIN_COLUMN_WIDTH: usize = 3;

/// Border style for table decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// No borders; columns separated by two spaces.
    None,
    /// ASCII borders: +, -, |
    Ascii,
    /// Light Unicode box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    #[default]
    Light,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯, ├, ┼, ┤, ┬, ┴
    Rounded,
}

impl BorderStyle {
    fn chars(&self) -> Option<BorderChars> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Ascii => Some(BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            }),
            BorderStyle::Light => Some(BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            }),
            BorderStyle::Rounded => Some(BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            }),
        }
    }
}

/// Box-drawing characters for a border style.
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

/// Type of horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Top,
    /// Between header and rows.
    Middle,
    /// Between header and a spanning row: the column joints close here.
    Closing,
    Bottom,
    /// Under a spanning row: no joints at all.
    Flat,
}

/// Draws [`PageView`]s as text tables.
#[derive(Clone, Debug)]
pub struct TableRenderer {
    width: usize,
    border: BorderStyle,
    styled: bool,
    theme: Theme,
}

impl TableRenderer {
    /// Creates a renderer for a terminal `width` columns wide.
    pub fn new(width: usize) -> Self {
        TableRenderer {
            width,
            border: BorderStyle::default(),
            styled: false,
            theme: Theme::default(),
        }
    }

    /// Sets the border style.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Enables or disables ANSI styling.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Replaces the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the target width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the border style.
    pub fn get_border(&self) -> BorderStyle {
        self.border
    }

    /// Returns whether output is styled.
    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Renders the search line, the table and the pager line.
    pub fn render(&self, view: &PageView) -> String {
        [
            self.search_line(view),
            self.render_table(view),
            self.pager_line(view),
        ]
        .join("\n")
    }

    /// Renders `Search: <query>`, or the placeholder when the query is empty.
    pub fn search_line(&self, view: &PageView) -> String {
        if view.query.is_empty() {
            format!("Search: {}", self.paint(&self.theme.muted, &view.placeholder))
        } else {
            format!("Search: {}", self.paint(&self.theme.accent, &view.query))
        }
    }

    /// Renders `Page X of Y · N of M rows` with a one-based page number.
    pub fn pager_line(&self, view: &PageView) -> String {
        let text = format!(
            "Page {} of {} · {} of {} rows",
            view.page + 1,
            view.page_count,
            view.filtered_count,
            view.total_count
        );
        self.paint(&self.theme.pager, &text)
    }

    /// Renders only the table: borders, header and body.
    pub fn render_table(&self, view: &PageView) -> String {
        let labels = header_labels(&view.headers);
        let widths = self.column_widths(view);
        let spanning = matches!(view.body, Body::Empty { .. });

        let mut output = Vec::new();
        self.push_line(&mut output, &widths, LineType::Top);

        let header: Vec<String> = labels
            .iter()
            .zip(&widths)
            .map(|(label, &w)| self.paint(&self.theme.header, &fit(label, w)))
            .collect();
        output.push(self.wrap_cells(&header));

        let below_header = if spanning {
            LineType::Closing
        } else {
            LineType::Middle
        };
        self.push_line(&mut output, &widths, below_header);

        match &view.body {
            Body::Rows { cells } => {
                for row in cells {
                    let fitted: Vec<String> = widths
                        .iter()
                        .enumerate()
                        .map(|(i, &w)| fit(row.get(i).map(String::as_str).unwrap_or(""), w))
                        .collect();
                    output.push(self.wrap_cells(&fitted));
                }
                self.push_line(&mut output, &widths, LineType::Bottom);
            }
            Body::Empty { message, .. } => {
                let inner = self.spanning_width(&widths);
                let text = self.paint(&self.theme.muted, &fit(message, inner));
                output.push(self.wrap_cells(&[text]));
                self.push_line(&mut output, &widths, LineType::Flat);
            }
        }

        output.join("\n")
    }

    /// Computes the display width of every column.
    ///
    /// Each column starts at its widest cell. While the table is wider
    /// than the renderer, the widest column loses one column at a time,
    /// never going below [`MIN_COLUMN_WIDTH`] (or its natural width, if
    /// that is smaller).
    pub fn column_widths(&self, view: &PageView) -> Vec<usize> {
        let labels = header_labels(&view.headers);
        let mut widths: Vec<usize> = labels
            .iter()
            .map(|l| display_width(&single_line(l)))
            .collect();
        for row in view.rows() {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(display_width(&single_line(cell)));
            }
        }
        if widths.is_empty() {
            return widths;
        }

        if let Body::Empty { message, .. } = &view.body {
            let needed = display_width(&single_line(message));
            let inner = self.spanning_width(&widths);
            if needed > inner {
                if let Some(last) = widths.last_mut() {
                    *last += needed - inner;
                }
            }
        }

        let floors: Vec<usize> = widths.iter().map(|&w| w.min(MIN_COLUMN_WIDTH)).collect();
        let available = self.width.saturating_sub(self.overhead(widths.len()));
        let mut total: usize = widths.iter().sum();
        while total > available {
            let widest = (0..widths.len())
                .filter(|&i| widths[i] > floors[i])
                .max_by(|&a, &b| widths[a].cmp(&widths[b]).then(b.cmp(&a)));
            match widest {
                Some(i) => {
                    widths[i] -= 1;
                    total -= 1;
                }
                None => break,
            }
        }
        widths
    }

    /// Columns taken by borders and padding for `n` columns.
    fn overhead(&self, n: usize) -> usize {
        match self.border {
            BorderStyle::None => 2 * n.saturating_sub(1),
            _ => 3 * n + 1,
        }
    }

    /// Inner width of a row spanning every column.
    fn spanning_width(&self, widths: &[usize]) -> usize {
        let sum: usize = widths.iter().sum();
        let n = widths.len();
        match self.border {
            BorderStyle::None => sum + 2 * n.saturating_sub(1),
            _ => sum + 3 * n.saturating_sub(1),
        }
    }

    fn wrap_cells(&self, cells: &[String]) -> String {
        match self.border.chars() {
            None => cells.join("  ").trim_end().to_string(),
            Some(chars) => {
                let bar = self.paint(&self.theme.border, &chars.vertical.to_string());
                let inner = cells.join(&format!(" {} ", bar));
                format!("{} {} {}", bar, inner, bar)
            }
        }
    }

    fn push_line(&self, output: &mut Vec<String>, widths: &[usize], line_type: LineType) {
        let Some(chars) = self.border.chars() else {
            return;
        };

        let (left, joint, right) = match line_type {
            LineType::Top => (chars.top_left, Some(chars.top_t), chars.top_right),
            LineType::Middle => (chars.left_t, Some(chars.cross), chars.right_t),
            LineType::Closing => (chars.left_t, Some(chars.bottom_t), chars.right_t),
            LineType::Bottom => (chars.bottom_left, Some(chars.bottom_t), chars.bottom_right),
            LineType::Flat => (chars.bottom_left, None, chars.bottom_right),
        };

        let mut line = String::new();
        line.push(left);
        for (i, &width) in widths.iter().enumerate() {
            if i > 0 {
                line.push(joint.unwrap_or(chars.horizontal));
            }
            line.extend(std::iter::repeat_n(chars.horizontal, width + 2));
        }
        line.push(right);
        output.push(self.paint(&self.theme.border, &line));
    }

    fn paint(&self, style: &console::Style, text: &str) -> String {
        if self.styled {
            paint(style, text)
        } else {
            text.to_string()
        }
    }
}

/// Header text with its sort marker: ` ▲`/` ▼` on the sorted column,
/// ` ↕` on other sortable columns.
pub fn header_labels(headers: &[Header]) -> Vec<String> {
    headers
        .iter()
        .map(|h| match (h.indicator, h.sortable) {
            (Some(Dir::Asc), _) => format!("{} ▲", h.label),
            (Some(Dir::Desc), _) => format!("{} ▼", h.label),
            (None, true) => format!("{} ↕", h.label),
            (None, false) => h.label.clone(),
        })
        .collect()
}
