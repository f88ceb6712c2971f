//! Error types for the dashboard.

use std::path::PathBuf;

use motodesk_grid::GridError;
use motodesk_render::RenderError;
use thiserror::Error;

/// Errors raised by page operations and settings handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// No motorcycle has this id.
    #[error("no motorcycle with id '{0}'")]
    UnknownMotorcycle(String),

    /// No customer has this id.
    #[error("no customer with id '{0}'")]
    UnknownCustomer(String),

    /// No booking has this id.
    #[error("no booking with id '{0}'")]
    UnknownBooking(String),

    /// No payment has this id.
    #[error("no payment with id '{0}'")]
    UnknownPayment(String),

    /// A booking was submitted without a customer or a motorcycle.
    #[error("a booking needs both a customer and a motorcycle")]
    MissingSelection,

    /// A booking ends before it starts.
    #[error("booking ends on {end}, before it starts on {start}")]
    InvalidDateRange {
        /// First rental day.
        start: chrono::NaiveDate,
        /// Last rental day.
        end: chrono::NaiveDate,
    },

    /// A status name did not parse.
    #[error("unknown {kind} status '{value}'")]
    UnknownStatus {
        /// Which status family was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A settings section name did not parse.
    #[error("unknown settings section '{0}' (expected business, pricing or notifications)")]
    UnknownSection(String),

    /// A browse command was not understood.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A record command the current page does not offer.
    #[error("'{command}' is not available on the {page} page")]
    UnsupportedCommand {
        /// The command word.
        command: &'static str,
        /// The page being browsed.
        page: &'static str,
    },

    /// A column that does not exist or cannot be sorted.
    #[error("cannot sort by '{key}' (sortable: {expected})")]
    UnknownSortKey {
        /// The rejected key.
        key: String,
        /// The page's sortable column keys.
        expected: String,
    },

    /// An argument that is not of the form `key=value`.
    #[error("expected key=value, got '{0}'")]
    InvalidAssignment(String),

    /// A record or settings field that does not exist.
    #[error("unknown field '{field}' (expected one of: {expected})")]
    UnknownField {
        /// The rejected field.
        field: String,
        /// The accepted fields.
        expected: String,
    },

    /// A field value that does not parse as the field's type.
    #[error("invalid value '{value}' for {field}")]
    InvalidValue {
        /// The field being set.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A settings key from another section than the one being saved.
    #[error("'{key}' is not a {section} setting")]
    SettingOutsideSection {
        /// The rejected key.
        key: String,
        /// The section being saved.
        section: &'static str,
    },

    /// A page table was configured incorrectly.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A page could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A report could not be exported.
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    /// Reading commands or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The settings file could not be read or written.
    #[error("settings file {}: {source}", path.display())]
    SettingsIo {
        /// The settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for the settings schema.
    #[error("settings file {}: {source}", path.display())]
    SettingsFormat {
        /// The settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, AppError>;
