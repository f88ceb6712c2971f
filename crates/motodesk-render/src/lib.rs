//! Terminal rendering for motodesk table pages.
//!
//! The grid crate computes a [`PageView`](motodesk_grid::PageView); this
//! crate draws it:
//!
//! - [`TableRenderer`]: borders, sort markers on headers, width fitting
//!   with `…` truncation, the search line and the pager line
//! - [`OutputMode`]: styled terminal output, plain text, or JSON
//! - [`Theme`]: the `console` styles used for the chrome
//!
//! Widths are measured in terminal columns via `unicode-width`, so wide
//! characters line up.
//!
//! ```rust
//! use motodesk_grid::{Column, DataTable, ViewState};
//! use motodesk_render::{render_page, OutputMode, TableRenderer};
//! use serde_json::json;
//!
//! let rows = vec![json!({"name": "Royal Enfield Classic 350"})];
//! let table = DataTable::new(vec![Column::new("name", "Name")], ["name"]).unwrap();
//! let view = table.view(&rows, &ViewState::new());
//!
//! let out = render_page(&view, &TableRenderer::new(40), OutputMode::Text).unwrap();
//! assert!(out.contains("Royal Enfield Classic 350"));
//! ```

mod decorator;
mod error;
mod output;
mod theme;
mod util;

pub use decorator::{header_labels, BorderStyle, TableRenderer, MIN_COLUMN_WIDTH};
pub use error::RenderError;
pub use output::{render_page, render_with, OutputMode};
pub use theme::Theme;
pub use util::{display_width, fit, pad_left, pad_right, single_line, truncate_end};
