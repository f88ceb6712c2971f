//! The data table: search, sort and pagination over a row slice.
//!
//! [`DataTable`] holds the static configuration of one table (columns,
//! search keys, page size). It owns no rows and no interaction state; both
//! are passed in on every call, and [`DataTable::view`] recomputes the
//! whole visible page from scratch.

use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::column::Column;
use crate::error::{GridError, Result};
use crate::ordering::{keys_for, Dir, SortState};
use crate::search::{normalize_query, row_matches};
use crate::state::{Action, ViewState};
use crate::traits::Gridable;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Placeholder shown in the body when no row survives the search.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No results found.";

/// A configured table over rows of type `T`.
///
/// # Example
///
/// ```
/// use motodesk_grid::{Action, Column, DataTable, ViewState};
/// use serde_json::json;
///
/// let rows: Vec<_> = (1..=25)
///     .map(|i| json!({"name": format!("Bike {i}"), "pricePerDay": 50 + i}))
///     .collect();
///
/// let table = DataTable::new(
///     vec![
///         Column::new("name", "Name").sortable(),
///         Column::new("pricePerDay", "Price/Day").sortable(),
///     ],
///     ["name"],
/// )
/// .unwrap();
///
/// let state = ViewState::new();
/// let page = table.view(&rows, &state);
/// assert_eq!(page.page_count, 3);
/// assert_eq!(page.rows().len(), 10);
///
/// let state = table.dispatch(state, &Action::SetQuery("bike 2".into()), &rows);
/// let page = table.view(&rows, &state);
/// assert_eq!(page.filtered_count, 7); // Bike 2, Bike 20..=25
/// ```
#[derive(Debug, Clone)]
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    search_keys: Vec<String>,
    page_size: usize,
    placeholder: String,
    empty_message: String,
}

impl<T: Gridable> DataTable<T> {
    /// Creates a table, validating its configuration.
    ///
    /// Fails on an empty column set, an empty or duplicated column key, or
    /// a duplicated search key.
    pub fn new<I, S>(columns: Vec<Column<T>>, search_keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let search_keys: Vec<String> = search_keys.into_iter().map(Into::into).collect();
        if let Err(err) = validate(&columns, &search_keys) {
            debug!("rejected table configuration: {}", err);
            return Err(err);
        }

        Ok(DataTable {
            columns,
            search_keys,
            page_size: DEFAULT_PAGE_SIZE,
            placeholder: "Search...".to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        })
    }

    /// Sets the number of rows per page.
    pub fn page_size(mut self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(GridError::ZeroPageSize);
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Sets the hint shown in an empty search box.
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the text of the empty-state row.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Returns the columns.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Returns the search keys.
    pub fn search_keys(&self) -> &[String] {
        &self.search_keys
    }

    /// Returns the page size.
    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the search placeholder.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Finds a column by key.
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Filters `rows` by the query, keeping input order.
    pub fn filter<'a>(&self, rows: &'a [T], query: &str) -> Vec<&'a T> {
        let needle = normalize_query(query);
        rows.iter()
            .filter(|row| row_matches(*row, &self.search_keys, &needle))
            .collect()
    }

    /// Sorts rows in place by `sort`.
    ///
    /// Does nothing when `sort` is `None` or names a column that is missing
    /// or not sortable. The sort is stable: rows with equal keys keep
    /// their relative order.
    pub fn sort(&self, rows: &mut Vec<&T>, sort: Option<&SortState>) {
        let Some(sort) = sort.filter(|s| self.is_sortable(&s.key)) else {
            return;
        };

        let values: Vec<_> = rows.iter().map(|row| row.field_value(&sort.key)).collect();
        let keys = keys_for(&values);
        drop(values);

        let mut keyed: Vec<_> = keys.into_iter().zip(rows.drain(..)).collect();
        keyed.sort_by(|(a, _), (b, _)| sort.compare(a, b));
        rows.extend(keyed.into_iter().map(|(_, row)| row));
    }

    /// Filters then sorts: the full ordered result set for `state`.
    pub fn arrange<'a>(&self, rows: &'a [T], state: &ViewState) -> Vec<&'a T> {
        let mut result = self.filter(rows, &state.query);
        self.sort(&mut result, state.sort.as_ref());
        result
    }

    /// Number of pages needed for `count` rows. Never less than one.
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Applies a user action against the current rows.
    ///
    /// Header clicks on unknown or unsortable columns leave the state
    /// unchanged.
    pub fn dispatch(&self, state: ViewState, action: &Action, rows: &[T]) -> ViewState {
        if let Action::ToggleSort(key) = action {
            if !self.is_sortable(key) {
                return state;
            }
        }
        let count = self.filter(rows, &state.query).len();
        state.reduce(action, self.page_count(count))
    }

    /// Computes the visible page for `state`.
    pub fn view(&self, rows: &[T], state: &ViewState) -> PageView {
        let arranged = self.arrange(rows, state);
        let page_count = self.page_count(arranged.len());
        let page = state.clamped_page(page_count);

        let headers = self
            .columns
            .iter()
            .map(|col| Header {
                key: col.key().to_string(),
                label: col.label().to_string(),
                sortable: col.is_sortable(),
                indicator: if col.is_sortable() {
                    state.direction_of(col.key())
                } else {
                    None
                },
            })
            .collect();

        let body = if arranged.is_empty() {
            Body::Empty {
                message: self.empty_message.clone(),
                span: self.columns.len(),
            }
        } else {
            Body::Rows {
                cells: arranged
                    .iter()
                    .skip(page * self.page_size)
                    .take(self.page_size)
                    .map(|row| self.columns.iter().map(|c| c.cell_text(row)).collect())
                    .collect(),
            }
        };

        PageView {
            query: state.query.clone(),
            placeholder: self.placeholder.clone(),
            headers,
            body,
            page,
            page_count,
            page_size: self.page_size,
            filtered_count: arranged.len(),
            total_count: rows.len(),
            has_prev: page > 0,
            has_next: page + 1 < page_count,
        }
    }

    /// Returns the rows on the visible page, as references into `rows`.
    ///
    /// Useful when a caller needs the records behind the cells, for
    /// example to act on "the third row on this page".
    pub fn page_rows<'a>(&self, rows: &'a [T], state: &ViewState) -> Vec<&'a T> {
        let arranged = self.arrange(rows, state);
        let page = state.clamped_page(self.page_count(arranged.len()));
        arranged
            .into_iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    fn is_sortable(&self, key: &str) -> bool {
        self.column(key).is_some_and(|c| c.is_sortable())
    }
}

fn validate<T>(columns: &[Column<T>], search_keys: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Err(GridError::NoColumns);
    }

    let mut seen = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        if column.key().is_empty() {
            return Err(GridError::EmptyColumnKey(index));
        }
        if !seen.insert(column.key()) {
            return Err(GridError::DuplicateColumn(column.key().to_string()));
        }
    }

    let mut seen = HashSet::new();
    for key in search_keys {
        if !seen.insert(key.as_str()) {
            return Err(GridError::DuplicateSearchKey(key.clone()));
        }
    }

    Ok(())
}

/// One header cell of a computed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Column key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header can be clicked to sort.
    pub sortable: bool,
    /// Direction of the active sort, when this is the sorted column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Dir>,
}

/// Body of a computed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Body {
    /// Cell text, one inner vector per row, in column order.
    Rows {
        /// The visible rows.
        cells: Vec<Vec<String>>,
    },
    /// No row survived the search. Rendered as one row spanning `span`
    /// columns.
    Empty {
        /// Placeholder text.
        message: String,
        /// Number of columns the placeholder spans.
        span: usize,
    },
}

/// Everything needed to draw one page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Search box text.
    pub query: String,
    /// Search box hint.
    pub placeholder: String,
    /// Header cells, in column order.
    pub headers: Vec<Header>,
    /// Row cells or the empty-state placeholder.
    pub body: Body,
    /// Zero-based index of the visible page, already clamped.
    pub page: usize,
    /// Total number of pages, at least one.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Rows left after searching.
    pub filtered_count: usize,
    /// Rows before searching.
    pub total_count: usize,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl PageView {
    /// Returns the visible rows' cells; empty for the empty state.
    pub fn rows(&self) -> &[Vec<String>] {
        match &self.body {
            Body::Rows { cells } => cells,
            Body::Empty { .. } => &[],
        }
    }

    /// Returns `true` when the body is the empty-state placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, Body::Empty { .. })
    }

    /// Returns one column's cells on the visible page.
    pub fn column_cells(&self, key: &str) -> Vec<&str> {
        let Some(index) = self.headers.iter().position(|h| h.key == key) else {
            return Vec::new();
        };
        self.rows()
            .iter()
            .filter_map(|row| row.get(index).map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bikes() -> Vec<serde_json::Value> {
        vec![
            json!({"name": "Harley Davidson Iron 883", "model": "Iron 883", "category": "Cruiser", "pricePerDay": 120}),
            json!({"name": "Ducati Monster", "model": "Monster 821", "category": "Naked", "pricePerDay": 95}),
            json!({"name": "BMW R 1250 GS", "model": "R 1250 GS", "category": "Adventure", "pricePerDay": 150}),
        ]
    }

    fn table() -> DataTable<serde_json::Value> {
        DataTable::new(
            vec![
                Column::new("name", "Name").sortable(),
                Column::new("category", "Category").sortable(),
                Column::new("pricePerDay", "Price/Day")
                    .sortable()
                    .render(|b: &serde_json::Value| format!("${}", b["pricePerDay"])),
                Column::new("actions", "Actions").render(|_: &serde_json::Value| "view edit".into()),
            ],
            ["name", "model", "category"],
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_configuration() {
        let no_cols: Result<DataTable<serde_json::Value>> = DataTable::new(vec![], ["name"]);
        assert_eq!(no_cols.unwrap_err(), GridError::NoColumns);

        let dup = DataTable::<serde_json::Value>::new(
            vec![Column::new("name", "A"), Column::new("name", "B")],
            ["name"],
        );
        assert_eq!(dup.unwrap_err(), GridError::DuplicateColumn("name".into()));

        let empty = DataTable::<serde_json::Value>::new(
            vec![Column::new("name", "A"), Column::new("", "B")],
            Vec::<String>::new(),
        );
        assert_eq!(empty.unwrap_err(), GridError::EmptyColumnKey(1));

        let dup_search =
            DataTable::<serde_json::Value>::new(vec![Column::new("name", "A")], ["name", "name"]);
        assert_eq!(
            dup_search.unwrap_err(),
            GridError::DuplicateSearchKey("name".into())
        );

        assert_eq!(table().page_size(0).unwrap_err(), GridError::ZeroPageSize);
    }

    #[test]
    fn synthetic_columns_render_through_custom_cells() {
        let rows = bikes();
        let view = table().view(&rows, &ViewState::new());
        assert_eq!(view.column_cells("actions"), vec!["view edit"; 3]);
        assert_eq!(view.column_cells("pricePerDay"), vec!["$120", "$95", "$150"]);
    }

    #[test]
    fn price_header_cycle() {
        let rows = bikes();
        let t = table();

        let s = t.dispatch(ViewState::new(), &Action::ToggleSort("pricePerDay".into()), &rows);
        assert_eq!(
            t.view(&rows, &s).column_cells("pricePerDay"),
            vec!["$95", "$120", "$150"]
        );

        let s = t.dispatch(s, &Action::ToggleSort("pricePerDay".into()), &rows);
        assert_eq!(
            t.view(&rows, &s).column_cells("pricePerDay"),
            vec!["$150", "$120", "$95"]
        );

        let s = t.dispatch(s, &Action::ToggleSort("pricePerDay".into()), &rows);
        assert_eq!(
            t.view(&rows, &s).column_cells("pricePerDay"),
            vec!["$120", "$95", "$150"]
        );
    }

    #[test]
    fn headers_carry_indicator_for_sorted_column_only() {
        let rows = bikes();
        let t = table();
        let s = ViewState::new().toggle_sort("name");
        let view = t.view(&rows, &s);
        assert_eq!(view.headers[0].indicator, Some(Dir::Asc));
        assert_eq!(view.headers[1].indicator, None);
        assert!(!view.headers[3].sortable);
    }

    #[test]
    fn unsortable_or_unknown_header_is_ignored() {
        let rows = bikes();
        let t = table();
        let s = t.dispatch(ViewState::new(), &Action::ToggleSort("actions".into()), &rows);
        assert_eq!(s.sort, None);
        let s = t.dispatch(s, &Action::ToggleSort("nope".into()), &rows);
        assert_eq!(s.sort, None);
    }

    #[test]
    fn sort_state_on_unsortable_column_keeps_input_order() {
        let rows = bikes();
        let t = table();
        let s = ViewState {
            sort: Some(SortState::asc("actions")),
            ..ViewState::new()
        };
        let view = t.view(&rows, &s);
        assert_eq!(view.column_cells("category"), vec!["Cruiser", "Naked", "Adventure"]);
    }

    #[test]
    fn empty_result_gives_placeholder_spanning_all_columns() {
        let rows = bikes();
        let view = table().view(&rows, &ViewState::new().with_query("vespa"));
        assert!(view.is_empty());
        assert_eq!(
            view.body,
            Body::Empty {
                message: DEFAULT_EMPTY_MESSAGE.into(),
                span: 4
            }
        );
        assert_eq!(view.page_count, 1);
        assert_eq!(view.headers.len(), 4);
        assert!(!view.has_prev && !view.has_next);
    }

    #[test]
    fn empty_input_also_uses_placeholder() {
        let rows: Vec<serde_json::Value> = Vec::new();
        let view = table().empty_message("No motorcycles yet.").view(&rows, &ViewState::new());
        assert!(matches!(view.body, Body::Empty { ref message, .. } if message == "No motorcycles yet."));
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let rows: Vec<_> = (0..12).map(|i| json!({"name": format!("b{i}")})).collect();
        let t = DataTable::new(vec![Column::new("name", "Name")], ["name"]).unwrap();
        let view = t.view(
            &rows,
            &ViewState {
                page: 40,
                ..ViewState::new()
            },
        );
        assert_eq!(view.page, 1);
        assert_eq!(view.rows().len(), 2);
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn page_rows_match_view() {
        let rows: Vec<_> = (0..15).map(|i| json!({"name": format!("b{i:02}")})).collect();
        let t = DataTable::new(vec![Column::new("name", "Name")], ["name"])
            .unwrap()
            .page_size(4)
            .unwrap();
        let state = ViewState {
            page: 3,
            ..ViewState::new()
        };
        let recs = t.page_rows(&rows, &state);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0]["name"], "b12");
        assert_eq!(t.view(&rows, &state).column_cells("name"), vec!["b12", "b13", "b14"]);
    }

    #[test]
    fn page_view_serializes() {
        let rows = bikes();
        let view = table().view(&rows, &ViewState::new().with_query("zzz"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["body"]["kind"], "empty");
        assert_eq!(json["body"]["span"], 4);
        assert_eq!(json["page_count"], 1);
    }
}
