//! The four table pages of the dashboard.
//!
//! Each page owns its records and a [`DataTable`] configured the way the
//! page presents them. Interaction state stays with the caller, as for
//! any grid table, so a page can be rendered from the command line in one
//! shot or browsed interactively with the same code.

pub mod bookings;
pub mod customers;
pub mod motorcycles;
pub mod payments;

use std::str::FromStr;

use motodesk_grid::{Action, Column, DataTable, Gridable, PageView, ViewState};

use crate::error::{AppError, Result};

pub use bookings::{BookingDraft, BookingUpdate, BookingsPage};
pub use customers::{CustomerDraft, CustomersPage};
pub use motorcycles::{MotorcycleDraft, MotorcyclesPage};
pub use payments::{Invoice, PaymentsPage};

/// A page built around one searchable table.
pub trait Page {
    /// The record type listed by the page.
    type Row: Gridable;

    /// Page heading.
    fn title(&self) -> &'static str;

    /// One-line description under the heading.
    fn description(&self) -> &'static str;

    /// Heading line shown above the page.
    fn heading(&self) -> String {
        format!("{}: {}", self.title(), self.description())
    }

    /// The page's records, in stored order.
    fn rows(&self) -> &[Self::Row];

    /// The page's table configuration.
    fn table(&self) -> &DataTable<Self::Row>;

    /// Columns in display order.
    fn columns(&self) -> &[Column<Self::Row>] {
        self.table().columns()
    }

    /// Fields the search box matches against.
    fn search_keys(&self) -> &[String] {
        self.table().search_keys()
    }

    /// Keys of the columns that can be sorted.
    fn sortable_keys(&self) -> Vec<&str> {
        self.columns()
            .iter()
            .filter(|c| c.is_sortable())
            .map(|c| c.key())
            .collect()
    }

    /// Fails unless `key` names a sortable column.
    fn check_sort_key(&self, key: &str) -> Result<()> {
        match self.table().column(key) {
            Some(column) if column.is_sortable() => Ok(()),
            _ => Err(AppError::UnknownSortKey {
                key: key.to_string(),
                expected: self.sortable_keys().join(", "),
            }),
        }
    }

    /// Computes the visible page for `state`.
    fn view(&self, state: &ViewState) -> PageView {
        self.table().view(self.rows(), state)
    }

    /// Applies a table action against the page's current records.
    fn dispatch(&self, state: ViewState, action: &Action) -> ViewState {
        self.table().dispatch(state, action, self.rows())
    }
}

/// Formats whole dollars the way every page shows money.
pub fn money(amount: impl Into<u64>) -> String {
    format!("${}", amount.into())
}

/// Splits `key=value` arguments, keeping their order.
///
/// Only the first `=` separates, so values may contain more of them.
pub fn parse_assignments<S: AsRef<str>>(args: &[S]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            match arg.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(AppError::InvalidAssignment(arg.to_string())),
            }
        })
        .collect()
}

/// Parses one field value.
pub(crate) fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| AppError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn unknown_field(field: &str, expected: &[&str]) -> AppError {
    AppError::UnknownField {
        field: field.to_string(),
        expected: expected.join(", "),
    }
}

/// Next free numeric id: one past the largest numeric id in use.
pub(crate) fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

/// Next free id of the form `PREFIX-NNN`.
pub(crate) fn next_prefixed_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{:03}", prefix, max + 1)
}
