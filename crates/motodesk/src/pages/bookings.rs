//! Rental bookings.

use chrono::NaiveDate;
use log::debug;
use motodesk_grid::{Column, DataTable};

use super::{money, next_prefixed_id, parse_field, unknown_field, Page};
use crate::domain::{rental_days, Booking, BookingStatus, Customer, Motorcycle, PaymentStatus};
use crate::error::{AppError, Result};
use crate::notify::{Notifier, Toast};

/// Form input for a new booking.
///
/// Dates default to the day the booking is made.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub customer_id: Option<String>,
    pub motorcycle_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

impl BookingDraft {
    /// Field names accepted by [`BookingDraft::from_assignments`].
    pub const FIELDS: &'static [&'static str] =
        &["customerId", "motorcycleId", "startDate", "endDate", "status"];

    /// Builds a draft from `field=value` pairs; dates are `YYYY-MM-DD`.
    pub fn from_assignments(pairs: &[(String, String)]) -> Result<Self> {
        let mut draft = Self::default();
        for (field, value) in pairs {
            match field.as_str() {
                "customerId" => draft.customer_id = Some(value.trim().to_string()),
                "motorcycleId" => draft.motorcycle_id = Some(value.trim().to_string()),
                "startDate" => draft.start_date = Some(parse_field(field, value)?),
                "endDate" => draft.end_date = Some(parse_field(field, value)?),
                "status" => draft.status = Some(parse_field(field, value)?),
                _ => return Err(unknown_field(field, Self::FIELDS)),
            }
        }
        Ok(draft)
    }
}

/// Edits to an existing booking. Unset fields are left alone; the amount
/// is not recomputed.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub total_amount: Option<u32>,
}

impl BookingUpdate {
    pub const FIELDS: &'static [&'static str] =
        &["startDate", "endDate", "status", "paymentStatus", "totalAmount"];

    pub fn from_assignments(pairs: &[(String, String)]) -> Result<Self> {
        let mut update = Self::default();
        for (field, value) in pairs {
            match field.as_str() {
                "startDate" => update.start_date = Some(parse_field(field, value)?),
                "endDate" => update.end_date = Some(parse_field(field, value)?),
                "status" => update.status = Some(parse_field(field, value)?),
                "paymentStatus" => update.payment_status = Some(parse_field(field, value)?),
                "totalAmount" => update.total_amount = Some(parse_field(field, value)?),
                _ => return Err(unknown_field(field, Self::FIELDS)),
            }
        }
        Ok(update)
    }
}

/// Bookings page, newest first.
#[derive(Debug, Clone)]
pub struct BookingsPage {
    bookings: Vec<Booking>,
    table: DataTable<Booking>,
}

impl BookingsPage {
    pub fn new(bookings: Vec<Booking>) -> Result<Self> {
        let table = DataTable::new(
            vec![
                Column::new("id", "Booking ID").sortable(),
                Column::new("customerName", "Customer").sortable(),
                Column::new("motorcycleName", "Motorcycle").sortable(),
                Column::new("startDate", "Start Date").sortable(),
                Column::new("endDate", "End Date").sortable(),
                Column::new("totalAmount", "Amount")
                    .sortable()
                    .render(|b: &Booking| money(b.total_amount)),
                Column::new("status", "Status").render(|b: &Booking| b.status.label().to_string()),
                Column::new("paymentStatus", "Payment")
                    .render(|b: &Booking| b.payment_status.label().to_string()),
                Column::new("actions", "Actions").render(|_: &Booking| "view · edit".to_string()),
            ],
            ["id", "customerName", "motorcycleName"],
        )?
        .search_placeholder("Search bookings...");
        Ok(Self { bookings, table })
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn count_by_status(&self, status: BookingStatus) -> usize {
        self.bookings.iter().filter(|b| b.status == status).count()
    }

    /// Creates a booking and puts it at the top of the list.
    ///
    /// The amount is the daily rate times the number of rental days, both
    /// ends included. A missing or unknown customer or motorcycle, or an
    /// end date before the start date, is refused with a destructive toast.
    pub fn create(
        &mut self,
        draft: BookingDraft,
        customers: &[Customer],
        bikes: &[Motorcycle],
        today: NaiveDate,
        notifier: &dyn Notifier,
    ) -> Result<&Booking> {
        let customer = draft
            .customer_id
            .as_deref()
            .and_then(|id| customers.iter().find(|c| c.id == id));
        let bike = draft
            .motorcycle_id
            .as_deref()
            .and_then(|id| bikes.iter().find(|m| m.id == id));

        let (customer, bike) = match (customer, bike) {
            (Some(c), Some(b)) => (c, b),
            (customer, _) => {
                notifier.notify(Toast::destructive(
                    "Error",
                    "Please select a customer and motorcycle.",
                ));
                return Err(match (&draft.customer_id, &draft.motorcycle_id) {
                    (Some(id), _) if customer.is_none() => AppError::UnknownCustomer(id.clone()),
                    (_, Some(id)) if customer.is_some() => AppError::UnknownMotorcycle(id.clone()),
                    _ => AppError::MissingSelection,
                });
            }
        };

        let start = draft.start_date.unwrap_or(today);
        let end = draft.end_date.unwrap_or(today);
        if end < start {
            notifier.notify(Toast::destructive(
                "Error",
                "The end date must not be before the start date.",
            ));
            return Err(AppError::InvalidDateRange { start, end });
        }

        let days = u32::try_from(rental_days(start, end)).unwrap_or(u32::MAX);
        let booking = Booking {
            id: next_prefixed_id("BK", self.bookings.iter().map(|b| b.id.as_str())),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            motorcycle_id: bike.id.clone(),
            motorcycle_name: bike.name.clone(),
            start_date: start,
            end_date: end,
            status: draft.status.unwrap_or(BookingStatus::Pending),
            total_amount: days.saturating_mul(bike.price_per_day),
            payment_status: PaymentStatus::Pending,
            created_at: today,
        };
        debug!(
            "created booking {}: {} days of {} at {}",
            booking.id, days, bike.name, bike.price_per_day
        );

        notifier.notify(Toast::new(
            "Booking created",
            format!("Booking {} has been created.", booking.id),
        ));
        self.bookings.insert(0, booking);
        Ok(&self.bookings[0])
    }

    /// Applies edits to a booking.
    pub fn update(
        &mut self,
        id: &str,
        update: BookingUpdate,
        notifier: &dyn Notifier,
    ) -> Result<&Booking> {
        let booking = self.find_mut(id)?;
        if let Some(v) = update.start_date {
            booking.start_date = v;
        }
        if let Some(v) = update.end_date {
            booking.end_date = v;
        }
        if let Some(v) = update.status {
            booking.status = v;
        }
        if let Some(v) = update.payment_status {
            booking.payment_status = v;
        }
        if let Some(v) = update.total_amount {
            booking.total_amount = v;
        }
        debug!("updated booking {}", id);

        notifier.notify(Toast::new(
            "Booking updated",
            format!("Booking {} has been updated.", id),
        ));
        Ok(&*booking)
    }

    /// Moves a booking to another status.
    pub fn set_status(
        &mut self,
        id: &str,
        status: BookingStatus,
        notifier: &dyn Notifier,
    ) -> Result<&Booking> {
        let booking = self.find_mut(id)?;
        debug!("booking {}: {} -> {}", id, booking.status, status);
        booking.status = status;

        notifier.notify(Toast::new(
            "Status updated",
            format!("Booking {} status changed to {}.", id, status),
        ));
        Ok(&*booking)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Booking> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::UnknownBooking(id.to_string()))
    }
}

impl Page for BookingsPage {
    type Row = Booking;

    fn title(&self) -> &'static str {
        "Bookings"
    }

    fn description(&self) -> &'static str {
        "Manage rental bookings and reservations"
    }

    fn rows(&self) -> &[Booking] {
        &self.bookings
    }

    fn table(&self) -> &DataTable<Booking> {
        &self.table
    }
}
