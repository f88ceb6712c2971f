//! Dashboard figures and business reports.
//!
//! Everything here is derived from the page records and the monthly chart
//! data; nothing is stored. Each figure set can be listed as a small grid
//! table so the terminal shows it with the same renderer as the pages.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use chrono::{Datelike, Days, NaiveDate};
use clap::ValueEnum;
use log::debug;
use motodesk_grid::{Column, DataTable, Gridable, Value};
use serde::Serialize;

use crate::data::{MonthlyRevenue, Occupancy};
use crate::domain::{BikeStatus, Booking, BookingStatus, Motorcycle, Payment, PaymentStatus};
use crate::error::Result;
use crate::notify::{Notifier, Toast};
use crate::pages::{money, BookingsPage, MotorcyclesPage, Page, PaymentsPage};

/// One labelled figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

impl Stat {
    pub(crate) fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

impl Gridable for Stat {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "label" => Value::from(self.label),
            "value" => Value::from(&self.value),
            _ => Value::None,
        }
    }
}

/// Two-column table for a list of [`Stat`]s.
pub fn stat_table() -> Result<DataTable<Stat>> {
    Ok(DataTable::new(
        vec![Column::new("label", "Metric"), Column::new("value", "Value")],
        ["label"],
    )?)
}

/// The four cards at the top of the dashboard, plus fleet availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_motorcycles: usize,
    pub active_rentals: usize,
    pub available: usize,
    pub todays_revenue: u64,
    pub pending_bookings: usize,
}

impl DashboardMetrics {
    pub fn compute(
        fleet: &MotorcyclesPage,
        bookings: &BookingsPage,
        payments: &PaymentsPage,
        today: NaiveDate,
    ) -> Self {
        let metrics = Self {
            total_motorcycles: fleet.rows().len(),
            active_rentals: fleet.count_by_status(BikeStatus::Rented),
            available: fleet.count_by_status(BikeStatus::Available),
            todays_revenue: payments.revenue_on(today),
            pending_bookings: bookings.count_by_status(BookingStatus::Pending),
        };
        debug!("dashboard metrics for {}: {:?}", today, metrics);
        metrics
    }

    pub fn stats(&self) -> Vec<Stat> {
        vec![
            Stat::new("Total Motorcycles", self.total_motorcycles),
            Stat::new("Active Rentals", self.active_rentals),
            Stat::new("Available", self.available),
            Stat::new("Today's Revenue", money(self.todays_revenue)),
            Stat::new("Pending Bookings", self.pending_bookings),
        ]
    }
}

/// The first `n` bookings in stored order.
pub fn recent_bookings(bookings: &[Booking], n: usize) -> &[Booking] {
    &bookings[..n.min(bookings.len())]
}

/// What a line of recent activity is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Booking,
    Payment,
    Return,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Booking => "Booking",
            ActivityKind::Payment => "Payment",
            ActivityKind::Return => "Return",
        }
    }
}

/// One dated event in the dashboard's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub message: String,
    pub date: NaiveDate,
}

impl Gridable for Activity {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "kind" => Value::from(self.kind.label()),
            "message" => Value::from(&self.message),
            "date" => Value::from(self.date.to_string()),
            _ => Value::None,
        }
    }
}

/// The `n` latest events up to `today`, newest first.
///
/// Events are derived from the records: a booking being made, a payment
/// being received, and a completed rental's motorcycle coming back on its
/// end date. Events on the same day keep that order.
pub fn recent_activity(
    bookings: &[Booking],
    payments: &[Payment],
    today: NaiveDate,
    n: usize,
) -> Vec<Activity> {
    let made = bookings.iter().map(|b| Activity {
        kind: ActivityKind::Booking,
        message: format!("New booking {} from {}", b.id, b.customer_name),
        date: b.created_at,
    });
    let paid = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| Activity {
            kind: ActivityKind::Payment,
            message: format!("Payment of {} received from {}", money(p.amount), p.customer_name),
            date: p.date,
        });
    let returned = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed)
        .map(|b| Activity {
            kind: ActivityKind::Return,
            message: format!("{} returned by {}", b.motorcycle_name, b.customer_name),
            date: b.end_date,
        });

    let mut events: Vec<Activity> = made
        .chain(paid)
        .chain(returned)
        .filter(|a| a.date <= today)
        .collect();
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events.truncate(n);
    events
}

/// "today", "1 day ago", "N days ago".
pub fn days_ago(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        n if n > 1 => format!("{} days ago", n),
        _ => date.to_string(),
    }
}

/// Activity feed table; the When column counts back from `today`.
pub fn activity_table(today: NaiveDate) -> Result<DataTable<Activity>> {
    Ok(DataTable::new(
        vec![
            Column::new("kind", "Type"),
            Column::new("message", "Activity"),
            Column::new("date", "When").render(move |a: &Activity| days_ago(a.date, today)),
        ],
        ["message"],
    )?)
}

/// Bookings per motorcycle category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub bookings: usize,
}

impl Gridable for CategoryCount {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "category" => Value::from(&self.category),
            "bookings" => Value::from(self.bookings),
            _ => Value::None,
        }
    }
}

/// How one motorcycle performed across its bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BikePerformance {
    pub name: String,
    pub bookings: usize,
    pub revenue: u64,
}

impl Gridable for BikePerformance {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "name" => Value::from(&self.name),
            "bookings" => Value::from(self.bookings),
            "revenue" => Value::from(self.revenue),
            _ => Value::None,
        }
    }
}

impl Gridable for Occupancy {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "month" => Value::from(self.month),
            "rate" => Value::from(self.rate),
            _ => Value::None,
        }
    }
}

impl Gridable for MonthlyRevenue {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "month" => Value::from(self.month),
            "revenue" => Value::from(self.revenue),
            "bookings" => Value::from(self.bookings),
            _ => Value::None,
        }
    }
}

/// Business analytics over the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reports {
    pub total_revenue: u64,
    pub avg_occupancy: u32,
    pub total_bookings: usize,
    pub by_category: Vec<CategoryCount>,
    pub performance: Vec<BikePerformance>,
}

impl Reports {
    pub fn compute(
        revenue: &[MonthlyRevenue],
        occupancy: &[Occupancy],
        bikes: &[Motorcycle],
        bookings: &[Booking],
    ) -> Self {
        Self {
            total_revenue: revenue.iter().map(|m| u64::from(m.revenue)).sum(),
            avg_occupancy: average_rate(occupancy),
            total_bookings: bookings.len(),
            by_category: bookings_by_category(bikes, bookings),
            performance: bike_performance(bikes, bookings),
        }
    }

    pub fn stats(&self) -> Vec<Stat> {
        vec![
            Stat::new("Total Revenue", money(self.total_revenue)),
            Stat::new("Avg. Occupancy", format!("{}%", self.avg_occupancy)),
            Stat::new("Total Bookings", self.total_bookings),
        ]
    }

    pub fn category_table() -> Result<DataTable<CategoryCount>> {
        Ok(DataTable::new(
            vec![
                Column::new("category", "Category").sortable(),
                Column::new("bookings", "Bookings").sortable(),
            ],
            ["category"],
        )?)
    }

    pub fn performance_table() -> Result<DataTable<BikePerformance>> {
        Ok(DataTable::new(
            vec![
                Column::new("name", "Motorcycle").sortable(),
                Column::new("bookings", "Bookings").sortable(),
                Column::new("revenue", "Revenue")
                    .sortable()
                    .render(|p: &BikePerformance| money(p.revenue)),
            ],
            ["name"],
        )?)
    }

    /// Month-by-month revenue, one year per page.
    pub fn revenue_table() -> Result<DataTable<MonthlyRevenue>> {
        Ok(DataTable::new(
            vec![
                Column::new("month", "Month"),
                Column::new("revenue", "Revenue")
                    .sortable()
                    .render(|m: &MonthlyRevenue| money(m.revenue)),
                Column::new("bookings", "Bookings").sortable(),
            ],
            ["month"],
        )?
        .page_size(12)?)
    }

    pub fn occupancy_table() -> Result<DataTable<Occupancy>> {
        Ok(DataTable::new(
            vec![
                Column::new("month", "Month"),
                Column::new("rate", "Occupancy")
                    .sortable()
                    .render(|o: &Occupancy| format!("{}%", o.rate)),
            ],
            ["month"],
        )?
        .page_size(12)?)
    }
}

/// Period a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last quarter
    Quarter,
    /// This year
    #[default]
    Year,
}

impl DateRange {
    pub fn label(self) -> &'static str {
        match self {
            DateRange::Week => "Last 7 days",
            DateRange::Month => "Last 30 days",
            DateRange::Quarter => "Last quarter",
            DateRange::Year => "This year",
        }
    }

    /// First day of the range, `today` included.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        let back = |days| today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        match self {
            DateRange::Week => back(6),
            DateRange::Month => back(29),
            DateRange::Quarter => back(89),
            DateRange::Year => today.with_ordinal(1).unwrap_or(today),
        }
    }

    /// The part of a January-to-December series the range covers: the
    /// current month for week and month, the current month and the two
    /// before it for quarter, every month for year.
    pub fn months<T>(self, series: &[T], today: NaiveDate) -> &[T] {
        let current = today.month0() as usize;
        let (from, to) = match self {
            DateRange::Week | DateRange::Month => (current, current + 1),
            DateRange::Quarter => (current.saturating_sub(2), current + 1),
            DateRange::Year => (0, series.len()),
        };
        let to = to.min(series.len());
        &series[from.min(to)..to]
    }

    /// Bookings made on or after the start of the range.
    pub fn bookings(self, bookings: &[Booking], today: NaiveDate) -> Vec<Booking> {
        let start = self.start(today);
        bookings
            .iter()
            .filter(|b| b.created_at >= start)
            .cloned()
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mean occupancy rounded to a whole percent; zero without data.
fn average_rate(occupancy: &[Occupancy]) -> u32 {
    if occupancy.is_empty() {
        return 0;
    }
    let sum: u32 = occupancy.iter().map(|o| o.rate).sum();
    (f64::from(sum) / occupancy.len() as f64).round() as u32
}

/// Counts every booking under its motorcycle's category, most booked first.
pub fn bookings_by_category(bikes: &[Motorcycle], bookings: &[Booking]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for booking in bookings {
        if let Some(bike) = bikes.iter().find(|b| b.id == booking.motorcycle_id) {
            *counts.entry(bike.category.as_str()).or_default() += 1;
        }
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, bookings)| CategoryCount {
            category: category.to_string(),
            bookings,
        })
        .collect();
    // BTreeMap order is by name, so the stable sort breaks ties alphabetically
    out.sort_by(|a, b| b.bookings.cmp(&a.bookings));
    out
}

/// Bookings and revenue per motorcycle, highest revenue first.
///
/// Cancelled bookings earn nothing and are left out. Every motorcycle in
/// the fleet is listed, even without bookings.
fn bike_performance(bikes: &[Motorcycle], bookings: &[Booking]) -> Vec<BikePerformance> {
    let mut out: Vec<BikePerformance> = bikes
        .iter()
        .map(|bike| {
            let earning = bookings.iter().filter(|b| {
                b.motorcycle_id == bike.id && b.status != BookingStatus::Cancelled
            });
            let (count, revenue) = earning.fold((0, 0u64), |(n, sum), b| {
                (n + 1, sum + u64::from(b.total_amount))
            });
            BikePerformance {
                name: bike.name.clone(),
                bookings: count,
                revenue,
            }
        })
        .collect();
    out.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    out
}

/// Report file formats offered for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// Monthly revenue as CSV, with a header row.
pub fn revenue_csv(revenue: &[MonthlyRevenue]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for month in revenue {
        writer.serialize(month)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Announces a report export.
pub fn export(format: ExportFormat, notifier: &dyn Notifier) {
    debug!("export requested: {}", format);
    notifier.notify(Toast::new(
        "Export started",
        format!("Your {} report is being generated.", format),
    ));
}
