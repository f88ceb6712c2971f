//! Toast notifications.
//!
//! Pages report the outcome of every mutation as a [`Toast`]. Where the
//! toast goes is up to the injected [`Notifier`]: the binary prints it,
//! tests record it.

use std::cell::RefCell;
use std::fmt;

use console::Style;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    /// Confirmation of a completed action
    #[default]
    Default,
    /// Something went wrong
    Destructive,
}

impl fmt::Display for ToastVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastVariant::Default => write!(f, "default"),
            ToastVariant::Destructive => write!(f, "destructive"),
        }
    }
}

/// A short, transient message about the result of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: ToastVariant,
}

impl Toast {
    /// Create a default toast.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// Create a destructive toast.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Returns true for destructive toasts.
    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Receives toasts raised by page actions.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

/// Prints toasts to stderr, styled by variant, and logs them.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    styled: bool,
}

impl ConsoleNotifier {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    /// Formats a toast as one line.
    pub fn format(&self, toast: &Toast) -> String {
        let (marker, style) = match toast.variant {
            ToastVariant::Default => ("✓", Style::new().green().bold()),
            ToastVariant::Destructive => ("✗", Style::new().red().bold()),
        };
        let head = format!("{} {}", marker, toast.title);
        if self.styled {
            format!(
                "{}: {}",
                style.force_styling(true).apply_to(head),
                Style::new().dim().force_styling(true).apply_to(&toast.description)
            )
        } else {
            format!("{}: {}", head, toast.description)
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!("toast: {} ({})", toast.title, toast.description),
            ToastVariant::Destructive => warn!("toast: {} ({})", toast.title, toast.description),
        }
        eprintln!("{}", self.format(&toast));
    }
}

/// Keeps every toast in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    /// Returns the most recent toast.
    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }

    /// Removes and returns every toast received so far.
    pub fn take(&self) -> Vec<Toast> {
        self.toasts.take()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order() {
        let n = RecordingNotifier::new();
        n.notify(Toast::new("Motorcycle added", "BMW R 1250 GS has been added to inventory."));
        n.notify(Toast::destructive("Error", "Please select a customer and motorcycle."));

        let toasts = n.toasts();
        assert_eq!(toasts.len(), 2);
        assert!(!toasts[0].is_destructive());
        assert!(n.last().unwrap().is_destructive());
        assert_eq!(n.take().len(), 2);
        assert!(n.toasts().is_empty());
    }

    #[test]
    fn notifier_through_reference() {
        let n = RecordingNotifier::new();
        let by_ref: &dyn Notifier = &n;
        (&by_ref).notify(Toast::new("Settings saved", "Business settings have been updated successfully."));
        assert_eq!(n.toasts()[0].title, "Settings saved");
    }

    #[test]
    fn console_format_plain() {
        let n = ConsoleNotifier::new(false);
        let line = n.format(&Toast::new("Invoice downloaded", "Invoice for PAY-001 has been downloaded."));
        assert_eq!(line, "✓ Invoice downloaded: Invoice for PAY-001 has been downloaded.");
        let line = n.format(&Toast::destructive("Error", "Nope."));
        assert!(line.starts_with("✗ Error:"));
    }

    #[test]
    fn toast_serializes_variant() {
        let json = serde_json::to_value(Toast::destructive("Error", "x")).unwrap();
        assert_eq!(json["variant"], "destructive");
    }
}
