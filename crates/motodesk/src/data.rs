//! Seed records the dashboard starts with.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    BikeStatus, Booking, BookingStatus, Customer, Motorcycle, Payment, PaymentStatus,
};

/// Photo used for motorcycles added without one.
pub const DEFAULT_BIKE_IMAGE: &str =
    "https://images.unsplash.com/photo-1558981403-c5f9899a28bc?w=400";

/// Revenue and booking count for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    pub revenue: u32,
    pub bookings: u32,
}

/// Fleet occupancy for one month, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub month: &'static str,
    pub rate: u32,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn bike(
    id: &str,
    name: &str,
    model: &str,
    category: &str,
    price_per_day: u32,
    status: BikeStatus,
    (year, engine_cc, mileage): (i32, u32, u32),
) -> Motorcycle {
    Motorcycle {
        id: id.to_string(),
        name: name.to_string(),
        model: model.to_string(),
        category: category.to_string(),
        price_per_day,
        status,
        image: DEFAULT_BIKE_IMAGE.to_string(),
        year,
        engine_cc,
        fuel_type: "Petrol".to_string(),
        mileage,
    }
}

#[rustfmt::skip]
pub fn motorcycles() -> Vec<Motorcycle> {
    use BikeStatus::*;
    vec![
        bike("1", "Harley Davidson Iron 883", "Iron 883", "Cruiser", 120, Available, (2023, 883, 5200)),
        bike("2", "Ducati Monster", "Monster 821", "Naked", 95, Rented, (2022, 821, 8400)),
        bike("3", "BMW R 1250 GS", "R 1250 GS", "Adventure", 150, Available, (2023, 1254, 3100)),
        bike("4", "Kawasaki Ninja 650", "Ninja 650", "Sport", 85, Available, (2022, 649, 9700)),
        bike("5", "Triumph Bonneville T120", "Bonneville T120", "Classic", 110, Maintenance, (2021, 1200, 15300)),
        bike("6", "Royal Enfield Classic 350", "Classic 350", "Classic", 45, Rented, (2023, 349, 2100)),
        bike("7", "Honda CB500X", "CB500X", "Adventure", 70, Available, (2022, 471, 11200)),
        bike("8", "Yamaha MT-07", "MT-07", "Naked", 80, Rented, (2023, 689, 4300)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    license_number: &str,
    verified: bool,
    joined_date: NaiveDate,
    total_rentals: u32,
) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        license_number: license_number.to_string(),
        verified,
        joined_date,
        total_rentals,
        avatar: crate::pages::customers::avatar_url(name),
    }
}

#[rustfmt::skip]
pub fn customers() -> Vec<Customer> {
    vec![
        customer("1", "John Smith", "john.smith@email.com", "+1 (555) 123-4567", "DL-123456789", true, date(2023, 6, 15), 12),
        customer("2", "Sarah Johnson", "sarah.j@email.com", "+1 (555) 234-5678", "DL-234567890", true, date(2023, 8, 22), 8),
        customer("3", "Michael Chen", "m.chen@email.com", "+1 (555) 345-6789", "DL-345678901", false, date(2024, 1, 10), 3),
        customer("4", "Emily Davis", "emily.d@email.com", "+1 (555) 456-7890", "DL-456789012", true, date(2023, 11, 5), 5),
        customer("5", "David Wilson", "d.wilson@email.com", "+1 (555) 567-8901", "DL-567890123", false, date(2024, 2, 18), 1),
        customer("6", "Lisa Anderson", "lisa.a@email.com", "+1 (555) 678-9012", "DL-678901234", true, date(2023, 4, 30), 15),
    ]
}

#[allow(clippy::too_many_arguments)]
fn booking(
    id: &str,
    (customer_id, customer_name): (&str, &str),
    (motorcycle_id, motorcycle_name): (&str, &str),
    (start_date, end_date): (NaiveDate, NaiveDate),
    status: BookingStatus,
    total_amount: u32,
    payment_status: PaymentStatus,
    created_at: NaiveDate,
) -> Booking {
    Booking {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        customer_name: customer_name.to_string(),
        motorcycle_id: motorcycle_id.to_string(),
        motorcycle_name: motorcycle_name.to_string(),
        start_date,
        end_date,
        status,
        total_amount,
        payment_status,
        created_at,
    }
}

#[rustfmt::skip]
pub fn bookings() -> Vec<Booking> {
    use BookingStatus as B;
    use PaymentStatus as P;
    vec![
        booking("BK-001", ("1", "John Smith"), ("2", "Ducati Monster"), (date(2024, 3, 10), date(2024, 3, 14)), B::Active, 475, P::Paid, date(2024, 3, 8)),
        booking("BK-002", ("2", "Sarah Johnson"), ("6", "Royal Enfield Classic 350"), (date(2024, 3, 12), date(2024, 3, 15)), B::Confirmed, 180, P::Paid, date(2024, 3, 10)),
        booking("BK-003", ("3", "Michael Chen"), ("3", "BMW R 1250 GS"), (date(2024, 3, 15), date(2024, 3, 20)), B::Pending, 900, P::Pending, date(2024, 3, 11)),
        booking("BK-004", ("4", "Emily Davis"), ("1", "Harley Davidson Iron 883"), (date(2024, 3, 1), date(2024, 3, 5)), B::Completed, 600, P::Paid, date(2024, 2, 25)),
        booking("BK-005", ("6", "Lisa Anderson"), ("8", "Yamaha MT-07"), (date(2024, 3, 11), date(2024, 3, 18)), B::Active, 640, P::Paid, date(2024, 3, 9)),
        booking("BK-006", ("5", "David Wilson"), ("4", "Kawasaki Ninja 650"), (date(2024, 3, 18), date(2024, 3, 19)), B::Pending, 170, P::Pending, date(2024, 3, 12)),
        booking("BK-007", ("1", "John Smith"), ("7", "Honda CB500X"), (date(2024, 2, 10), date(2024, 2, 12)), B::Cancelled, 210, P::Refunded, date(2024, 2, 5)),
        booking("BK-008", ("2", "Sarah Johnson"), ("5", "Triumph Bonneville T120"), (date(2024, 2, 20), date(2024, 2, 23)), B::Completed, 440, P::Paid, date(2024, 2, 15)),
    ]
}

fn payment(
    id: &str,
    booking_id: &str,
    customer_name: &str,
    amount: u32,
    status: PaymentStatus,
    method: &str,
    date: NaiveDate,
) -> Payment {
    Payment {
        id: id.to_string(),
        booking_id: booking_id.to_string(),
        customer_name: customer_name.to_string(),
        amount,
        status,
        method: method.to_string(),
        date,
    }
}

#[rustfmt::skip]
pub fn payments() -> Vec<Payment> {
    use PaymentStatus::*;
    vec![
        payment("PAY-001", "BK-001", "John Smith", 475, Paid, "Credit Card", date(2024, 3, 8)),
        payment("PAY-002", "BK-002", "Sarah Johnson", 180, Paid, "PayPal", date(2024, 3, 10)),
        payment("PAY-003", "BK-003", "Michael Chen", 900, Pending, "Bank Transfer", date(2024, 3, 11)),
        payment("PAY-004", "BK-004", "Emily Davis", 600, Paid, "Credit Card", date(2024, 2, 25)),
        payment("PAY-005", "BK-005", "Lisa Anderson", 640, Paid, "Debit Card", date(2024, 3, 9)),
        payment("PAY-006", "BK-006", "David Wilson", 170, Pending, "Credit Card", date(2024, 3, 12)),
        payment("PAY-007", "BK-007", "John Smith", 210, Refunded, "Credit Card", date(2024, 2, 5)),
        payment("PAY-008", "BK-008", "Sarah Johnson", 440, Paid, "PayPal", date(2024, 2, 15)),
        payment("PAY-009", "BK-006", "David Wilson", 170, Failed, "Debit Card", date(2024, 3, 12)),
    ]
}

pub fn revenue_data() -> Vec<MonthlyRevenue> {
    [
        ("Jan", 12400, 42),
        ("Feb", 15800, 51),
        ("Mar", 18200, 58),
        ("Apr", 21500, 67),
        ("May", 26800, 81),
        ("Jun", 31200, 94),
        ("Jul", 35600, 106),
        ("Aug", 33100, 99),
        ("Sep", 27400, 85),
        ("Oct", 22900, 72),
        ("Nov", 16300, 55),
        ("Dec", 19700, 63),
    ]
    .into_iter()
    .map(|(month, revenue, bookings)| MonthlyRevenue {
        month,
        revenue,
        bookings,
    })
    .collect()
}

pub fn occupancy_data() -> Vec<Occupancy> {
    [
        ("Jan", 72),
        ("Feb", 78),
        ("Mar", 65),
        ("Apr", 82),
        ("May", 88),
        ("Jun", 91),
        ("Jul", 95),
        ("Aug", 89),
        ("Sep", 76),
        ("Oct", 80),
        ("Nov", 74),
        ("Dec", 85),
    ]
    .into_iter()
    .map(|(month, rate)| Occupancy { month, rate })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookings_reference_known_records() {
        let bikes = motorcycles();
        let people = customers();
        for b in bookings() {
            let bike = bikes.iter().find(|m| m.id == b.motorcycle_id).unwrap();
            let person = people.iter().find(|c| c.id == b.customer_id).unwrap();
            assert_eq!(bike.name, b.motorcycle_name);
            assert_eq!(person.name, b.customer_name);
            assert_eq!(b.total_amount as i64, b.days() * bike.price_per_day as i64, "{}", b.id);
        }
    }

    #[test]
    fn payments_reference_known_bookings() {
        let bookings = bookings();
        for p in payments() {
            assert!(bookings.iter().any(|b| b.id == p.booking_id), "{}", p.id);
        }
    }

    #[test]
    fn a_year_of_chart_data() {
        assert_eq!(revenue_data().len(), 12);
        assert_eq!(occupancy_data().len(), 12);
    }
}
