//! Rental records and their statuses.
//!
//! Every record serializes with camelCase keys and exposes the same keys
//! to the grid through [`Gridable`], so a column key, a search key and a
//! JSON field name are always the same string.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use motodesk_grid::{Gridable, Value};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $raw:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every status, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $raw,)+
                }
            }

            /// Returns the badge label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|status| status.as_str() == wanted)
                    .ok_or_else(|| AppError::UnknownStatus {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

status_enum! {
    /// Whether a motorcycle can be rented.
    BikeStatus, "motorcycle" {
        Available => "available", "Available";
        Rented => "rented", "Rented";
        Maintenance => "maintenance", "Maintenance";
    }
}

status_enum! {
    /// Lifecycle of a booking.
    BookingStatus, "booking" {
        Pending => "pending", "Pending";
        Confirmed => "confirmed", "Confirmed";
        Active => "active", "Active";
        Completed => "completed", "Completed";
        Cancelled => "cancelled", "Cancelled";
    }
}

status_enum! {
    /// Settlement of a payment.
    PaymentStatus, "payment" {
        Pending => "pending", "Pending";
        Paid => "paid", "Paid";
        Refunded => "refunded", "Refunded";
        Failed => "failed", "Failed";
    }
}

/// A motorcycle in the rental fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motorcycle {
    pub id: String,
    pub name: String,
    pub model: String,
    pub category: String,
    /// Daily rate in whole dollars.
    pub price_per_day: u32,
    pub status: BikeStatus,
    pub image: String,
    pub year: i32,
    #[serde(rename = "engineCC")]
    pub engine_cc: u32,
    pub fuel_type: String,
    pub mileage: u32,
}

impl Gridable for Motorcycle {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "id" => Value::from(&self.id),
            "name" => Value::from(&self.name),
            "model" => Value::from(&self.model),
            "category" => Value::from(&self.category),
            "pricePerDay" => Value::from(self.price_per_day),
            "status" => Value::from(self.status.as_str()),
            "image" => Value::from(&self.image),
            "year" => Value::from(self.year),
            "engineCC" => Value::from(self.engine_cc),
            "fuelType" => Value::from(&self.fuel_type),
            "mileage" => Value::from(self.mileage),
            _ => Value::None,
        }
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub verified: bool,
    pub joined_date: NaiveDate,
    pub total_rentals: u32,
    pub avatar: String,
}

impl Gridable for Customer {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "id" => Value::from(&self.id),
            "name" => Value::from(&self.name),
            "email" => Value::from(&self.email),
            "phone" => Value::from(&self.phone),
            "licenseNumber" => Value::from(&self.license_number),
            "verified" => Value::from(self.verified),
            "joinedDate" => Value::from(self.joined_date.to_string()),
            "totalRentals" => Value::from(self.total_rentals),
            "avatar" => Value::from(&self.avatar),
            _ => Value::None,
        }
    }
}

/// A rental of one motorcycle by one customer over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub motorcycle_id: String,
    pub motorcycle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub total_amount: u32,
    pub payment_status: PaymentStatus,
    pub created_at: NaiveDate,
}

impl Booking {
    /// Number of rental days, counting both the first and the last day.
    pub fn days(&self) -> i64 {
        rental_days(self.start_date, self.end_date)
    }
}

impl Gridable for Booking {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "id" => Value::from(&self.id),
            "customerId" => Value::from(&self.customer_id),
            "customerName" => Value::from(&self.customer_name),
            "motorcycleId" => Value::from(&self.motorcycle_id),
            "motorcycleName" => Value::from(&self.motorcycle_name),
            "startDate" => Value::from(self.start_date.to_string()),
            "endDate" => Value::from(self.end_date.to_string()),
            "status" => Value::from(self.status.as_str()),
            "totalAmount" => Value::from(self.total_amount),
            "paymentStatus" => Value::from(self.payment_status.as_str()),
            "createdAt" => Value::from(self.created_at.to_string()),
            _ => Value::None,
        }
    }
}

/// A payment against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub booking_id: String,
    pub customer_name: String,
    pub amount: u32,
    pub status: PaymentStatus,
    pub method: String,
    pub date: NaiveDate,
}

impl Gridable for Payment {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "id" => Value::from(&self.id),
            "bookingId" => Value::from(&self.booking_id),
            "customerName" => Value::from(&self.customer_name),
            "amount" => Value::from(self.amount),
            "status" => Value::from(self.status.as_str()),
            "method" => Value::from(&self.method),
            "date" => Value::from(self.date.to_string()),
            _ => Value::None,
        }
    }
}

/// Rental days between two dates, inclusive of both ends.
///
/// A same-day rental is one day.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_labels_and_wire_names() {
        assert_eq!(BikeStatus::Maintenance.label(), "Maintenance");
        assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");
        assert_eq!(PaymentStatus::Refunded.to_string(), "refunded");
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("Active".parse::<BookingStatus>().unwrap(), BookingStatus::Active);
        assert_eq!(" paid ".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        let err = "lost".parse::<BikeStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown motorcycle status 'lost'");
    }

    #[test]
    fn rental_days_are_inclusive() {
        assert_eq!(rental_days(date("2024-03-01"), date("2024-03-01")), 1);
        assert_eq!(rental_days(date("2024-03-01"), date("2024-03-04")), 4);
        assert_eq!(rental_days(date("2024-02-28"), date("2024-03-01")), 3);
    }

    #[test]
    fn motorcycle_serializes_with_camel_case_keys() {
        let bike = Motorcycle {
            id: "1".into(),
            name: "Ducati Monster".into(),
            model: "Monster 821".into(),
            category: "Naked".into(),
            price_per_day: 95,
            status: BikeStatus::Available,
            image: String::new(),
            year: 2023,
            engine_cc: 821,
            fuel_type: "Petrol".into(),
            mileage: 5400,
        };
        let json = serde_json::to_value(&bike).unwrap();
        assert_eq!(json["pricePerDay"], 95);
        assert_eq!(json["engineCC"], 821);
        assert_eq!(json["status"], "available");
        assert_eq!(bike.field_value("pricePerDay").numeric(), Some(95.0));
        assert!(bike.field_value("nope").is_none());
    }
}
