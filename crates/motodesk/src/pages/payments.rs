//! Payments and invoices.

use chrono::NaiveDate;
use log::debug;
use motodesk_grid::{Column, DataTable};
use serde::Serialize;

use super::{money, Page};
use crate::domain::{Payment, PaymentStatus};
use crate::error::{AppError, Result};
use crate::notify::{Notifier, Toast};

/// An invoice for one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub business: String,
    pub tagline: String,
    pub payment_id: String,
    pub date: NaiveDate,
    pub customer: String,
    pub booking_id: String,
    pub method: String,
    pub status: PaymentStatus,
    pub amount: u32,
}

impl Invoice {
    /// Label/value pairs in the order an invoice lists them.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Invoice", self.payment_id.clone()),
            ("Date", self.date.to_string()),
            ("Customer", self.customer.clone()),
            ("Booking ID", self.booking_id.clone()),
            ("Payment Method", self.method.clone()),
            ("Status", self.status.label().to_string()),
            ("Total Amount", money(self.amount)),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsPage {
    payments: Vec<Payment>,
    table: DataTable<Payment>,
}

impl PaymentsPage {
    pub fn new(payments: Vec<Payment>) -> Result<Self> {
        let table = DataTable::new(
            vec![
                Column::new("id", "Payment ID").sortable(),
                Column::new("bookingId", "Booking ID").sortable(),
                Column::new("customerName", "Customer").sortable(),
                Column::new("amount", "Amount")
                    .sortable()
                    .render(|p: &Payment| money(p.amount)),
                Column::new("method", "Method"),
                Column::new("date", "Date").sortable(),
                Column::new("status", "Status").render(|p: &Payment| p.status.label().to_string()),
                Column::new("actions", "Actions").render(|_: &Payment| "invoice · download".to_string()),
            ],
            ["id", "bookingId", "customerName"],
        )?
        .search_placeholder("Search payments...");
        Ok(Self { payments, table })
    }

    pub fn get(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    /// Sum of settled payments.
    pub fn total_revenue(&self) -> u64 {
        self.sum_where(PaymentStatus::Paid)
    }

    /// Sum of payments still outstanding.
    pub fn pending_amount(&self) -> u64 {
        self.sum_where(PaymentStatus::Pending)
    }

    /// Number of transactions of any status.
    pub fn transaction_count(&self) -> usize {
        self.payments.len()
    }

    /// Sum of settled payments dated `day`.
    pub fn revenue_on(&self, day: NaiveDate) -> u64 {
        self.payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid && p.date == day)
            .map(|p| u64::from(p.amount))
            .sum()
    }

    /// Builds the invoice for a payment.
    pub fn invoice(&self, id: &str, business: &str) -> Result<Invoice> {
        let payment = self
            .get(id)
            .ok_or_else(|| AppError::UnknownPayment(id.to_string()))?;
        Ok(Invoice {
            business: business.to_string(),
            tagline: "Premium Motorcycle Rentals".to_string(),
            payment_id: payment.id.clone(),
            date: payment.date,
            customer: payment.customer_name.clone(),
            booking_id: payment.booking_id.clone(),
            method: payment.method.clone(),
            status: payment.status,
            amount: payment.amount,
        })
    }

    /// Announces an invoice download.
    pub fn download_invoice(&self, id: &str, notifier: &dyn Notifier) -> Result<()> {
        let payment = self
            .get(id)
            .ok_or_else(|| AppError::UnknownPayment(id.to_string()))?;
        debug!("invoice download for {}", payment.id);
        notifier.notify(Toast::new(
            "Invoice downloaded",
            format!("Invoice for {} has been downloaded.", payment.id),
        ));
        Ok(())
    }

    fn sum_where(&self, status: PaymentStatus) -> u64 {
        self.payments
            .iter()
            .filter(|p| p.status == status)
            .map(|p| u64::from(p.amount))
            .sum()
    }
}

impl Page for PaymentsPage {
    type Row = Payment;

    fn title(&self) -> &'static str {
        "Payments"
    }

    fn description(&self) -> &'static str {
        "Track transactions and manage invoices"
    }

    fn rows(&self) -> &[Payment] {
        &self.payments
    }

    fn table(&self) -> &DataTable<Payment> {
        &self.table
    }
}
