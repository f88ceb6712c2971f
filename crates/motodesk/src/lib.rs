//! # Motodesk - Motorcycle Rental Admin Dashboard
//!
//! Motodesk is the back office of a motorcycle rental business, in the
//! terminal. It provides:
//!
//! - Four table pages (motorcycles, bookings, customers, payments), each a
//!   searchable, sortable, paginated [`motodesk_grid::DataTable`]
//! - The page mutations of the dashboard (add, edit, delete, create
//!   bookings, verify customers, invoices), each confirmed with a toast
//! - Dashboard figures and yearly reports
//! - Business settings stored in a YAML file
//! - A `motodesk` binary that renders any page once or browses it
//!   interactively
//!
//! ## Core Concepts
//!
//! - [`Page`]: a titled page that owns its records and table
//! - [`Notifier`]: where toasts go; injected into every mutation
//! - [`Settings`]: business, pricing and notification configuration
//! - [`Dashboard`]: every page's records, with the record commands that
//!   change them
//! - [`session`]: line commands mapped onto grid actions and record commands
//!
//! ## Quick Start
//!
//! ```rust
//! use motodesk::data;
//! use motodesk::notify::RecordingNotifier;
//! use motodesk::pages::{MotorcycleDraft, MotorcyclesPage, Page};
//! use motodesk_grid::{Action, ViewState};
//!
//! let mut fleet = MotorcyclesPage::new(data::motorcycles()).unwrap();
//! let toasts = RecordingNotifier::new();
//!
//! fleet.add(
//!     MotorcycleDraft {
//!         name: Some("KTM 390 Duke".into()),
//!         category: Some("Naked".into()),
//!         price_per_day: Some(60),
//!         ..Default::default()
//!     },
//!     &toasts,
//! );
//! assert_eq!(toasts.last().unwrap().title, "Motorcycle added");
//!
//! let state = fleet.dispatch(ViewState::new(), &Action::SetQuery("naked".into()));
//! let view = fleet.view(&state);
//! assert_eq!(view.filtered_count, 3);
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod notify;
pub mod pages;
pub mod session;
pub mod settings;

pub use app::{Dashboard, PageName};
pub use domain::{BikeStatus, Booking, BookingStatus, Customer, Motorcycle, Payment, PaymentStatus};
pub use error::{AppError, Result};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier, Toast, ToastVariant};
pub use pages::Page;
pub use settings::{Section, Settings};
