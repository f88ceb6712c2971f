//! The dashboard's records and the commands that change them.
//!
//! [`Dashboard`] owns one container per page. Table actions go through
//! [`Dashboard::dispatch`]; record commands (add, edit, delete, status
//! changes, verification, invoices and detail views) go through
//! [`Dashboard::apply`], which hands every mutation the injected notifier.

use chrono::NaiveDate;
use clap::ValueEnum;
use log::debug;
use motodesk_grid::{Action, PageView, ViewState};
use serde::Serialize;

use crate::data;
use crate::domain::{Booking, BookingStatus, Customer, Motorcycle, Payment};
use crate::error::{AppError, Result};
use crate::notify::Notifier;
use crate::pages::{
    money, parse_assignments, BookingDraft, BookingUpdate, BookingsPage, CustomerDraft,
    CustomersPage, Invoice, MotorcycleDraft, MotorcyclesPage, Page, PaymentsPage,
};
use crate::settings::Settings;

/// The four table pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageName {
    Motorcycles,
    Bookings,
    Customers,
    Payments,
}

impl PageName {
    pub fn as_str(self) -> &'static str {
        match self {
            PageName::Motorcycles => "motorcycles",
            PageName::Bookings => "bookings",
            PageName::Customers => "customers",
            PageName::Payments => "payments",
        }
    }

    /// Usage of the record commands the page offers.
    pub fn record_help(self) -> &'static str {
        match self {
            PageName::Motorcycles => {
                "view ID · add FIELD=VALUE... · edit ID FIELD=VALUE... · delete ID"
            }
            PageName::Bookings => {
                "view ID · add FIELD=VALUE... · edit ID FIELD=VALUE... · status ID STATUS"
            }
            PageName::Customers => {
                "view ID · add FIELD=VALUE... · edit ID FIELD=VALUE... · verify ID"
            }
            PageName::Payments => "view ID · invoice ID",
        }
    }
}

/// A command that reads or changes one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCommand {
    View(String),
    Add(Vec<(String, String)>),
    Edit(String, Vec<(String, String)>),
    Delete(String),
    Status(String, String),
    Verify(String),
    Invoice(String),
}

impl RecordCommand {
    /// Builds a command from its words, or `None` when the first word is
    /// not a record command.
    pub fn from_words(words: &[String]) -> Option<Result<Self>> {
        let (verb, args) = words.split_first()?;
        let one_id = |make: fn(String) -> RecordCommand| match args {
            [id] => Ok(make(id.clone())),
            _ => Err(AppError::UnknownCommand(words.join(" "))),
        };
        let command = match verb.as_str() {
            "view" => one_id(RecordCommand::View),
            "delete" => one_id(RecordCommand::Delete),
            "verify" => one_id(RecordCommand::Verify),
            "invoice" => one_id(RecordCommand::Invoice),
            "add" => parse_assignments(args).map(RecordCommand::Add),
            "edit" => match args.split_first() {
                Some((id, fields)) if !fields.is_empty() => {
                    parse_assignments(fields).map(|f| RecordCommand::Edit(id.clone(), f))
                }
                _ => Err(AppError::UnknownCommand(words.join(" "))),
            },
            "status" => match args {
                [id, status] => Ok(RecordCommand::Status(id.clone(), status.clone())),
                _ => Err(AppError::UnknownCommand(words.join(" "))),
            },
            _ => return None,
        };
        Some(command)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            RecordCommand::View(_) => "view",
            RecordCommand::Add(_) => "add",
            RecordCommand::Edit(..) => "edit",
            RecordCommand::Delete(_) => "delete",
            RecordCommand::Status(..) => "status",
            RecordCommand::Verify(_) => "verify",
            RecordCommand::Invoice(_) => "invoice",
        }
    }
}

/// One record shown on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Motorcycle(Motorcycle),
    Booking(Booking),
    Customer {
        #[serde(flatten)]
        customer: Customer,
        bookings: Vec<Booking>,
    },
    Payment(Payment),
    Invoice(Invoice),
}

impl Detail {
    pub fn heading(&self) -> String {
        match self {
            Detail::Motorcycle(m) => m.name.clone(),
            Detail::Booking(b) => format!("Booking {}", b.id),
            Detail::Customer { customer, .. } => customer.name.clone(),
            Detail::Payment(p) => format!("Payment {}", p.id),
            Detail::Invoice(i) => i.business.clone(),
        }
    }

    /// Label/value lines in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Detail::Motorcycle(m) => vec![
                ("ID", m.id.clone()),
                ("Model", m.model.clone()),
                ("Category", m.category.clone()),
                ("Year", m.year.to_string()),
                ("Engine", format!("{}cc", m.engine_cc)),
                ("Fuel", m.fuel_type.clone()),
                ("Mileage", m.mileage.to_string()),
                ("Price/Day", money(m.price_per_day)),
                ("Status", m.status.label().to_string()),
            ],
            Detail::Booking(b) => vec![
                ("Customer", b.customer_name.clone()),
                ("Motorcycle", b.motorcycle_name.clone()),
                ("Start Date", b.start_date.to_string()),
                ("End Date", b.end_date.to_string()),
                ("Days", b.days().to_string()),
                ("Amount", money(b.total_amount)),
                ("Status", b.status.label().to_string()),
                ("Payment", b.payment_status.label().to_string()),
                ("Created", b.created_at.to_string()),
            ],
            Detail::Customer { customer: c, .. } => vec![
                ("ID", c.id.clone()),
                ("Email", c.email.clone()),
                ("Phone", c.phone.clone()),
                ("License", c.license_number.clone()),
                ("Verified", if c.verified { "Yes" } else { "No" }.to_string()),
                ("Joined", c.joined_date.to_string()),
                ("Rentals", c.total_rentals.to_string()),
            ],
            Detail::Payment(p) => vec![
                ("Booking ID", p.booking_id.clone()),
                ("Customer", p.customer_name.clone()),
                ("Amount", money(p.amount)),
                ("Method", p.method.clone()),
                ("Status", p.status.label().to_string()),
                ("Date", p.date.to_string()),
            ],
            Detail::Invoice(i) => i.fields(),
        }
    }
}

/// Calls `$body` with `$p` bound to the container of `$page`.
macro_rules! on_page {
    ($app:expr, $page:expr, |$p:ident| $body:expr) => {
        match $page {
            PageName::Motorcycles => {
                let $p = &$app.motorcycles;
                $body
            }
            PageName::Bookings => {
                let $p = &$app.bookings;
                $body
            }
            PageName::Customers => {
                let $p = &$app.customers;
                $body
            }
            PageName::Payments => {
                let $p = &$app.payments;
                $body
            }
        }
    };
}

/// The dashboard's records and configuration.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub motorcycles: MotorcyclesPage,
    pub bookings: BookingsPage,
    pub customers: CustomersPage,
    pub payments: PaymentsPage,
    pub settings: Settings,
    pub today: NaiveDate,
}

impl Dashboard {
    /// A dashboard over the seed records.
    pub fn seeded(settings: Settings, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            motorcycles: MotorcyclesPage::new(data::motorcycles())?,
            bookings: BookingsPage::new(data::bookings())?,
            customers: CustomersPage::new(data::customers())?,
            payments: PaymentsPage::new(data::payments())?,
            settings,
            today,
        })
    }

    pub fn heading(&self, page: PageName) -> String {
        on_page!(self, page, |p| p.heading())
    }

    pub fn view(&self, page: PageName, state: &ViewState) -> PageView {
        on_page!(self, page, |p| p.view(state))
    }

    /// Applies a table action, refusing sorts on unknown or unsortable
    /// columns.
    pub fn dispatch(&self, page: PageName, state: ViewState, action: &Action) -> Result<ViewState> {
        on_page!(self, page, |p| {
            if let Action::ToggleSort(key) = action {
                p.check_sort_key(key)?;
            }
            Ok(p.dispatch(state, action))
        })
    }

    /// Runs a record command on `page`.
    ///
    /// Mutations raise their toasts through `notifier` and return `None`;
    /// `view` and `invoice` return the record to show.
    pub fn apply(
        &mut self,
        page: PageName,
        command: &RecordCommand,
        notifier: &dyn Notifier,
    ) -> Result<Option<Detail>> {
        debug!("{} on {}", command.verb(), page.as_str());
        use PageName as P;
        use RecordCommand as C;

        match (page, command) {
            (_, C::View(id)) => self.detail(page, id).map(Some),

            (P::Motorcycles, C::Add(fields)) => {
                self.motorcycles
                    .add(MotorcycleDraft::from_assignments(fields)?, notifier);
                Ok(None)
            }
            (P::Motorcycles, C::Edit(id, fields)) => {
                let draft = MotorcycleDraft::from_assignments(fields)?;
                self.motorcycles.update(id, draft, notifier)?;
                Ok(None)
            }
            (P::Motorcycles, C::Delete(id)) => {
                self.motorcycles.delete(id, notifier)?;
                Ok(None)
            }

            (P::Bookings, C::Add(fields)) => {
                let draft = BookingDraft::from_assignments(fields)?;
                self.bookings.create(
                    draft,
                    self.customers.rows(),
                    self.motorcycles.rows(),
                    self.today,
                    notifier,
                )?;
                Ok(None)
            }
            (P::Bookings, C::Edit(id, fields)) => {
                let update = BookingUpdate::from_assignments(fields)?;
                self.bookings.update(id, update, notifier)?;
                Ok(None)
            }
            (P::Bookings, C::Status(id, status)) => {
                let status: BookingStatus = status.parse()?;
                self.bookings.set_status(id, status, notifier)?;
                Ok(None)
            }

            (P::Customers, C::Add(fields)) => {
                let draft = CustomerDraft::from_assignments(fields)?;
                self.customers.add(draft, self.today, notifier);
                Ok(None)
            }
            (P::Customers, C::Edit(id, fields)) => {
                let draft = CustomerDraft::from_assignments(fields)?;
                self.customers.update(id, draft, notifier)?;
                Ok(None)
            }
            (P::Customers, C::Verify(id)) => {
                self.customers.toggle_verification(id, notifier)?;
                Ok(None)
            }

            (P::Payments, C::Invoice(id)) => {
                let invoice = self.payments.invoice(id, &self.settings.business.name)?;
                self.payments.download_invoice(id, notifier)?;
                Ok(Some(Detail::Invoice(invoice)))
            }

            (page, command) => Err(AppError::UnsupportedCommand {
                command: command.verb(),
                page: page.as_str(),
            }),
        }
    }

    fn detail(&self, page: PageName, id: &str) -> Result<Detail> {
        match page {
            PageName::Motorcycles => self
                .motorcycles
                .get(id)
                .cloned()
                .map(Detail::Motorcycle)
                .ok_or_else(|| AppError::UnknownMotorcycle(id.to_string())),
            PageName::Bookings => self
                .bookings
                .get(id)
                .cloned()
                .map(Detail::Booking)
                .ok_or_else(|| AppError::UnknownBooking(id.to_string())),
            PageName::Customers => {
                let customer = self
                    .customers
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::UnknownCustomer(id.to_string()))?;
                let bookings = self
                    .customers
                    .bookings_for(id, self.bookings.rows())
                    .into_iter()
                    .cloned()
                    .collect();
                Ok(Detail::Customer { customer, bookings })
            }
            PageName::Payments => self
                .payments
                .get(id)
                .cloned()
                .map(Detail::Payment)
                .ok_or_else(|| AppError::UnknownPayment(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BikeStatus;
    use crate::notify::RecordingNotifier;

    fn app() -> Dashboard {
        Dashboard::seeded(Settings::default(), "2024-03-10".parse().unwrap()).unwrap()
    }

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn command(line: &str) -> RecordCommand {
        RecordCommand::from_words(&words(line)).unwrap().unwrap()
    }

    #[test]
    fn record_commands_from_words() {
        assert_eq!(command("view 3"), RecordCommand::View("3".into()));
        assert_eq!(
            command("status BK-003 confirmed"),
            RecordCommand::Status("BK-003".into(), "confirmed".into())
        );
        assert_eq!(
            command("edit 2 pricePerDay=99"),
            RecordCommand::Edit("2".into(), vec![("pricePerDay".into(), "99".into())])
        );
        assert!(RecordCommand::from_words(&words("s name")).is_none());
        for bad in ["view", "delete 1 2", "edit 2", "status BK-003", "add name"] {
            assert!(
                matches!(RecordCommand::from_words(&words(bad)), Some(Err(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn bookings_status_and_create() {
        let mut app = app();
        let n = RecordingNotifier::new();
        app.apply(PageName::Bookings, &command("status BK-003 confirmed"), &n)
            .unwrap();
        assert_eq!(app.bookings.get("BK-003").unwrap().status, BookingStatus::Confirmed);
        assert_eq!(n.last().unwrap().title, "Status updated");

        let add = command("add customerId=2 motorcycleId=4 startDate=2024-03-20 endDate=2024-03-21");
        app.apply(PageName::Bookings, &add, &n).unwrap();
        let created = &app.bookings.rows()[0];
        assert_eq!(created.id, "BK-009");
        assert_eq!(created.total_amount, 170);
        assert_eq!(created.created_at, app.today);

        let err = app
            .apply(PageName::Bookings, &command("status BK-003 lost"), &n)
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownStatus { kind: "booking", .. }));
    }

    #[test]
    fn motorcycles_add_edit_delete() {
        let mut app = app();
        let n = RecordingNotifier::new();
        app.apply(PageName::Motorcycles, &command("add name=Vespa category=Scooter"), &n)
            .unwrap();
        assert_eq!(app.motorcycles.get("9").unwrap().name, "Vespa");

        app.apply(PageName::Motorcycles, &command("edit 9 status=maintenance"), &n)
            .unwrap();
        assert_eq!(app.motorcycles.get("9").unwrap().status, BikeStatus::Maintenance);

        app.apply(PageName::Motorcycles, &command("delete 9"), &n).unwrap();
        assert!(app.motorcycles.get("9").is_none());

        let titles: Vec<_> = n.toasts().into_iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec!["Motorcycle added", "Motorcycle updated", "Motorcycle deleted"]
        );
    }

    #[test]
    fn customer_detail_lists_their_bookings() {
        let mut app = app();
        let n = RecordingNotifier::new();
        let detail = app
            .apply(PageName::Customers, &command("view 2"), &n)
            .unwrap()
            .unwrap();
        assert_eq!(detail.heading(), "Sarah Johnson");
        match &detail {
            Detail::Customer { bookings, .. } => {
                let ids: Vec<_> = bookings.iter().map(|b| b.id.as_str()).collect();
                assert_eq!(ids, vec!["BK-002", "BK-008"]);
            }
            other => panic!("unexpected detail {other:?}"),
        }
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Sarah Johnson");
        assert_eq!(json["bookings"][1]["id"], "BK-008");
        assert!(n.toasts().is_empty());
    }

    #[test]
    fn verify_toggles_and_toasts() {
        let mut app = app();
        let n = RecordingNotifier::new();
        app.apply(PageName::Customers, &command("verify 3"), &n).unwrap();
        assert!(app.customers.get("3").unwrap().verified);
        assert_eq!(n.last().unwrap().title, "Customer verified");
    }

    #[test]
    fn invoice_only_on_payments() {
        let mut app = app();
        let n = RecordingNotifier::new();
        let detail = app
            .apply(PageName::Payments, &command("invoice PAY-002"), &n)
            .unwrap()
            .unwrap();
        assert_eq!(detail.fields()[0], ("Invoice", "PAY-002".to_string()));
        assert_eq!(n.last().unwrap().title, "Invoice downloaded");

        let err = app
            .apply(PageName::Payments, &command("delete PAY-002"), &n)
            .unwrap_err();
        assert_eq!(err.to_string(), "'delete' is not available on the payments page");
        let err = app
            .apply(PageName::Customers, &command("status 1 active"), &n)
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedCommand { command: "status", .. }));
    }

    #[test]
    fn unknown_ids_are_reported_per_page() {
        let mut app = app();
        let n = RecordingNotifier::new();
        assert!(matches!(
            app.apply(PageName::Motorcycles, &command("view 404"), &n),
            Err(AppError::UnknownMotorcycle(_))
        ));
        assert!(matches!(
            app.apply(PageName::Bookings, &command("edit BK-404 status=active"), &n),
            Err(AppError::UnknownBooking(_))
        ));
    }

    #[test]
    fn dispatch_checks_sort_keys() {
        let app = app();
        let state = app
            .dispatch(PageName::Bookings, ViewState::new(), &Action::ToggleSort("totalAmount".into()))
            .unwrap();
        assert!(state.sort.is_some());

        let err = app
            .dispatch(PageName::Bookings, ViewState::new(), &Action::ToggleSort("status".into()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot sort by 'status' (sortable: id, customerName, motorcycleName, startDate, endDate, totalAmount)"
        );
    }
}
