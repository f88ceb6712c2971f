//! Customer accounts and license verification.

use chrono::NaiveDate;
use log::debug;
use motodesk_grid::{Column, DataTable};

use super::{next_numeric_id, parse_field, unknown_field, Page};
use crate::domain::{Booking, Customer};
use crate::error::{AppError, Result};
use crate::notify::{Notifier, Toast};

/// Form input for adding or editing a customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub verified: Option<bool>,
}

impl CustomerDraft {
    pub const FIELDS: &'static [&'static str] =
        &["name", "email", "phone", "licenseNumber", "verified"];

    /// Builds a draft from `field=value` pairs; `verified` takes true or false.
    pub fn from_assignments(pairs: &[(String, String)]) -> Result<Self> {
        let mut draft = Self::default();
        for (field, value) in pairs {
            match field.as_str() {
                "name" => draft.name = Some(value.clone()),
                "email" => draft.email = Some(value.clone()),
                "phone" => draft.phone = Some(value.clone()),
                "licenseNumber" => draft.license_number = Some(value.clone()),
                "verified" => draft.verified = Some(parse_field(field, value)?),
                _ => return Err(unknown_field(field, Self::FIELDS)),
            }
        }
        Ok(draft)
    }
}

/// Customers page, newest first.
#[derive(Debug, Clone)]
pub struct CustomersPage {
    customers: Vec<Customer>,
    table: DataTable<Customer>,
}

impl CustomersPage {
    pub fn new(customers: Vec<Customer>) -> Result<Self> {
        let table = DataTable::new(
            vec![
                Column::new("name", "Name").sortable(),
                Column::new("email", "Email").sortable(),
                Column::new("phone", "Phone"),
                Column::new("totalRentals", "Rentals").sortable(),
                Column::new("verified", "Verified").render(|c: &Customer| {
                    if c.verified {
                        "✓ Verified".to_string()
                    } else {
                        "✗ Unverified".to_string()
                    }
                }),
                Column::new("actions", "Actions").render(|_: &Customer| "view · edit".to_string()),
            ],
            ["name", "email", "phone"],
        )?
        .search_placeholder("Search customers...");
        Ok(Self { customers, table })
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Adds a customer at the top of the list with no rentals yet.
    pub fn add(
        &mut self,
        draft: CustomerDraft,
        today: NaiveDate,
        notifier: &dyn Notifier,
    ) -> &Customer {
        let name = draft.name.unwrap_or_default();
        let customer = Customer {
            id: next_numeric_id(self.customers.iter().map(|c| c.id.as_str())),
            avatar: avatar_url(&name),
            name,
            email: draft.email.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            license_number: draft.license_number.unwrap_or_default(),
            verified: draft.verified.unwrap_or(false),
            joined_date: today,
            total_rentals: 0,
        };
        debug!("adding customer {} ({})", customer.id, customer.name);

        notifier.notify(Toast::new(
            "Customer added",
            format!("{} has been added.", customer.name),
        ));
        self.customers.insert(0, customer);
        &self.customers[0]
    }

    /// Merges `draft` into an existing customer.
    pub fn update(
        &mut self,
        id: &str,
        draft: CustomerDraft,
        notifier: &dyn Notifier,
    ) -> Result<&Customer> {
        let customer = self.find_mut(id)?;
        if let Some(v) = draft.name {
            customer.name = v;
        }
        if let Some(v) = draft.email {
            customer.email = v;
        }
        if let Some(v) = draft.phone {
            customer.phone = v;
        }
        if let Some(v) = draft.license_number {
            customer.license_number = v;
        }
        if let Some(v) = draft.verified {
            customer.verified = v;
        }
        debug!("updated customer {}", id);

        notifier.notify(Toast::new(
            "Customer updated",
            format!("{} has been updated.", customer.name),
        ));
        Ok(&*customer)
    }

    /// Flips a customer's verification and returns the new state.
    pub fn toggle_verification(&mut self, id: &str, notifier: &dyn Notifier) -> Result<bool> {
        let customer = self.find_mut(id)?;
        let was_verified = customer.verified;
        customer.verified = !was_verified;
        debug!("customer {} verified: {}", id, customer.verified);

        let title = if was_verified {
            "Verification removed"
        } else {
            "Customer verified"
        };
        notifier.notify(Toast::new(
            title,
            format!("{} verification status updated.", customer.name),
        ));
        Ok(customer.verified)
    }

    /// A customer's bookings, in the order given.
    pub fn bookings_for<'a>(&self, customer_id: &str, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .collect()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::UnknownCustomer(id.to_string()))
    }
}

impl Page for CustomersPage {
    type Row = Customer;

    fn title(&self) -> &'static str {
        "Customers"
    }

    fn description(&self) -> &'static str {
        "Manage customer accounts and verification"
    }

    fn rows(&self) -> &[Customer] {
        &self.customers
    }

    fn table(&self) -> &DataTable<Customer> {
        &self.table
    }
}

/// Generated avatar for a customer without a photo.
pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        encode_component(name)
    )
}

/// Percent-encodes everything except the URI-component unreserved set.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::notify::RecordingNotifier;
    use motodesk_grid::ViewState;

    fn page() -> CustomersPage {
        CustomersPage::new(data::customers()).unwrap()
    }

    #[test]
    fn avatar_names_are_encoded() {
        assert_eq!(
            avatar_url("Zoë O'Brien"),
            "https://ui-avatars.com/api/?name=Zo%C3%AB%20O'Brien&background=random"
        );
    }

    #[test]
    fn add_prepends_with_zero_rentals() {
        let mut page = page();
        let n = RecordingNotifier::new();
        let today: NaiveDate = "2024-03-21".parse().unwrap();
        let draft = CustomerDraft {
            name: Some("Ana Lopez".into()),
            email: Some("ana@mail.com".into()),
            ..Default::default()
        };
        let added = page.add(draft, today, &n).clone();

        assert_eq!(added.id, "7");
        assert_eq!(added.total_rentals, 0);
        assert!(!added.verified);
        assert_eq!(added.joined_date, today);
        assert!(added.avatar.ends_with("name=Ana%20Lopez&background=random"));
        assert_eq!(page.rows()[0], added);
        assert_eq!(n.last().unwrap().description, "Ana Lopez has been added.");
    }

    #[test]
    fn toggle_verification_titles_follow_previous_state() {
        let mut page = page();
        let n = RecordingNotifier::new();

        assert!(!page.toggle_verification("1", &n).unwrap());
        assert_eq!(n.last().unwrap().title, "Verification removed");

        assert!(page.toggle_verification("1", &n).unwrap());
        assert_eq!(n.last().unwrap().title, "Customer verified");
        assert_eq!(
            n.last().unwrap().description,
            "John Smith verification status updated."
        );

        assert!(matches!(
            page.toggle_verification("x", &n),
            Err(AppError::UnknownCustomer(_))
        ));
    }

    #[test]
    fn update_keeps_other_fields() {
        let mut page = page();
        let n = RecordingNotifier::new();
        let draft = CustomerDraft {
            phone: Some("+1 (555) 999-0000".into()),
            ..Default::default()
        };
        let c = page.update("3", draft, &n).unwrap();
        assert_eq!(c.name, "Michael Chen");
        assert_eq!(c.phone, "+1 (555) 999-0000");
        assert_eq!(n.last().unwrap().title, "Customer updated");
    }

    #[test]
    fn bookings_for_filters_by_customer() {
        let page = page();
        let bookings = data::bookings();
        let ids: Vec<_> = page
            .bookings_for("2", &bookings)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["BK-002", "BK-008"]);
        assert!(page.bookings_for("404", &bookings).is_empty());
    }

    #[test]
    fn draft_from_assignments() {
        let pairs = vec![
            ("name".to_string(), "Ana Lopez".to_string()),
            ("verified".to_string(), "true".to_string()),
        ];
        let draft = CustomerDraft::from_assignments(&pairs).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Ana Lopez"));
        assert_eq!(draft.verified, Some(true));

        let bad = vec![("verified".to_string(), "maybe".to_string())];
        assert!(CustomerDraft::from_assignments(&bad).is_err());
    }

    #[test]
    fn search_by_phone_and_verified_labels() {
        let page = page();
        let view = page.view(&ViewState::new().with_query("345-6789"));
        assert_eq!(view.column_cells("name"), vec!["Michael Chen"]);
        assert_eq!(view.column_cells("verified"), vec!["✗ Unverified"]);
    }
}
