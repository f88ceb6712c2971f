//! Table view state and the reducer that drives it.
//!
//! A table has three independent facets of interaction state: the search
//! query, the sort, and the page. [`ViewState`] holds all three as plain
//! data and [`ViewState::reduce`] applies one [`Action`] to produce the
//! next state. Nothing here touches rows, so every transition rule can be
//! exercised without a table or a terminal.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::ordering::{Dir, SortState};

/// A user interaction with the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// The search box text changed.
    SetQuery(String),
    /// The search box was cleared.
    ClearQuery,
    /// A column header was clicked.
    ToggleSort(String),
    /// Go forward one page.
    NextPage,
    /// Go back one page.
    PrevPage,
    /// Jump to the first page.
    FirstPage,
    /// Jump to the last page.
    LastPage,
    /// Jump to a page by zero-based index.
    GoToPage(usize),
}

/// Search, sort and page state of one table.
///
/// `page` is zero-based. It may point past the end of the current result
/// set (for example after rows were deleted); views clamp it when they
/// are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Raw search box text, as typed.
    pub query: String,
    /// Active sort, or `None` for input order.
    pub sort: Option<SortState>,
    /// Current page index.
    pub page: usize,
}

impl ViewState {
    /// Creates the initial state: no query, no sort, first page.
    pub fn new() -> Self {
        ViewState::default()
    }

    /// Sets the query, resetting to the first page when it changed.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 0;
        }
        self
    }

    /// Cycles the sort for `key`: none, ascending, descending, none.
    ///
    /// A different key always starts over at ascending. Any sort change
    /// resets to the first page.
    pub fn toggle_sort(mut self, key: &str) -> Self {
        self.sort = match self.sort.take() {
            Some(SortState { key: current, dir }) if current == key => match dir {
                Dir::Asc => Some(SortState::desc(current)),
                Dir::Desc => None,
            },
            _ => Some(SortState::asc(key)),
        };
        self.page = 0;
        self
    }

    /// Returns the sort direction for `key`, if it is the active column.
    pub fn direction_of(&self, key: &str) -> Option<Dir> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.dir)
    }

    /// Clamps `page` into `0..page_count`, treating a zero count as one.
    pub fn clamped_page(&self, page_count: usize) -> usize {
        self.page.min(page_count.max(1) - 1)
    }

    /// Applies an action and returns the next state.
    ///
    /// `page_count` is the number of pages in the current result set; it
    /// bounds the paging actions.
    pub fn reduce(self, action: &Action, page_count: usize) -> ViewState {
        let last = page_count.max(1) - 1;
        let current = self.clamped_page(page_count);

        let next = match action {
            Action::SetQuery(query) => self.with_query(query.clone()),
            Action::ClearQuery => self.with_query(String::new()),
            Action::ToggleSort(key) => self.toggle_sort(key),
            Action::NextPage => ViewState {
                page: (current + 1).min(last),
                ..self
            },
            Action::PrevPage => ViewState {
                page: current.saturating_sub(1),
                ..self
            },
            Action::FirstPage => ViewState { page: 0, ..self },
            Action::LastPage => ViewState { page: last, ..self },
            Action::GoToPage(page) => ViewState {
                page: (*page).min(last),
                ..self
            },
        };

        trace!(
            "table view: {:?} -> query={:?} sort={:?} page={}",
            action,
            next.query,
            next.sort,
            next.page
        );
        next
    }
}
