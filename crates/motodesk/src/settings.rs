//! Business configuration.
//!
//! Settings live in a YAML file. A missing file means the defaults, and a
//! file may set only some keys; everything else keeps its default value.
//!
//! ```yaml
//! business:
//!   name: MotoRent
//!   email: contact@motorent.com
//! pricing:
//!   depositPercentage: 25
//! notifications:
//!   smsBookings: true
//! ```
//!
//! Single fields are addressed as `section.fieldName`, for example
//! `pricing.depositPercentage`, using the same names as the file.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use motodesk_grid::{Column, DataTable, Gridable, Value};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::metrics::Stat;
use crate::notify::{Notifier, Toast};
use crate::pages::{money, parse_field};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessSettings {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tax_id: String,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            name: "MotoRent".to_string(),
            email: "contact@motorent.com".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
            address: "123 Main Street, City, State 12345".to_string(),
            tax_id: "TAX-123456789".to_string(),
        }
    }
}

/// Rental fees. Money amounts are whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSettings {
    pub deposit_percentage: u32,
    pub late_fee_per_hour: u32,
    pub cancellation_fee: u32,
    pub insurance_daily: u32,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            deposit_percentage: 20,
            late_fee_per_hour: 15,
            cancellation_fee: 50,
            insurance_daily: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_bookings: bool,
    pub email_payments: bool,
    pub email_returns: bool,
    pub sms_bookings: bool,
    pub sms_payments: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_bookings: true,
            email_payments: true,
            email_returns: true,
            sms_bookings: false,
            sms_payments: false,
        }
    }
}

/// A staff account with dashboard access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl StaffUser {
    fn new(name: &str, email: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

impl Gridable for StaffUser {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "name" => Value::from(&self.name),
            "email" => Value::from(&self.email),
            "role" => Value::from(&self.role),
            _ => Value::None,
        }
    }
}

/// Table of staff accounts.
pub fn users_table() -> Result<DataTable<StaffUser>> {
    Ok(DataTable::new(
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email"),
            Column::new("role", "Role").sortable(),
        ],
        ["name", "email", "role"],
    )?)
}

fn default_users() -> Vec<StaffUser> {
    vec![
        StaffUser::new("Admin User", "admin@motorent.com", "Super Admin"),
        StaffUser::new("John Manager", "john@motorent.com", "Manager"),
        StaffUser::new("Sarah Staff", "sarah@motorent.com", "Staff"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub business: BusinessSettings,
    pub pricing: PricingSettings,
    pub notifications: NotificationSettings,
    pub users: Vec<StaffUser>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business: BusinessSettings::default(),
            pricing: PricingSettings::default(),
            notifications: NotificationSettings::default(),
            users: default_users(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or the defaults when there is no file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(AppError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|source| AppError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes every section to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        let text = serde_yaml::to_string(self).map_err(|source| AppError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)?;
        debug!("settings written to {}", path.display());
        Ok(())
    }

    /// Every `section.field` key accepted by [`Settings::set`].
    pub const KEYS: &'static [&'static str] = &[
        "business.name",
        "business.email",
        "business.phone",
        "business.address",
        "business.taxId",
        "pricing.depositPercentage",
        "pricing.lateFeePerHour",
        "pricing.cancellationFee",
        "pricing.insuranceDaily",
        "notifications.emailBookings",
        "notifications.emailPayments",
        "notifications.emailReturns",
        "notifications.smsBookings",
        "notifications.smsPayments",
    ];

    /// Sets one field from its text form and returns the section it
    /// belongs to.
    pub fn set(&mut self, key: &str, value: &str) -> Result<Section> {
        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| Self::unknown_key(key))?;
        let section: Section = section.parse().map_err(|_| Self::unknown_key(key))?;

        match (section, field) {
            (Section::Business, "name") => self.business.name = value.to_string(),
            (Section::Business, "email") => self.business.email = value.to_string(),
            (Section::Business, "phone") => self.business.phone = value.to_string(),
            (Section::Business, "address") => self.business.address = value.to_string(),
            (Section::Business, "taxId") => self.business.tax_id = value.to_string(),
            (Section::Pricing, "depositPercentage") => {
                self.pricing.deposit_percentage = parse_field(key, value)?
            }
            (Section::Pricing, "lateFeePerHour") => {
                self.pricing.late_fee_per_hour = parse_field(key, value)?
            }
            (Section::Pricing, "cancellationFee") => {
                self.pricing.cancellation_fee = parse_field(key, value)?
            }
            (Section::Pricing, "insuranceDaily") => {
                self.pricing.insurance_daily = parse_field(key, value)?
            }
            (Section::Notifications, "emailBookings") => {
                self.notifications.email_bookings = parse_switch(key, value)?
            }
            (Section::Notifications, "emailPayments") => {
                self.notifications.email_payments = parse_switch(key, value)?
            }
            (Section::Notifications, "emailReturns") => {
                self.notifications.email_returns = parse_switch(key, value)?
            }
            (Section::Notifications, "smsBookings") => {
                self.notifications.sms_bookings = parse_switch(key, value)?
            }
            (Section::Notifications, "smsPayments") => {
                self.notifications.sms_payments = parse_switch(key, value)?
            }
            _ => return Err(Self::unknown_key(key)),
        }
        debug!("set {} = {}", key, value);
        Ok(section)
    }

    /// Applies `key=value` edits to `section` only, then saves it.
    pub fn update_section(
        &mut self,
        section: Section,
        edits: &[(String, String)],
        path: &Path,
        notifier: &dyn Notifier,
    ) -> Result<()> {
        for (key, value) in edits {
            if self.set(key, value)? != section {
                return Err(AppError::SettingOutsideSection {
                    key: key.clone(),
                    section: section.title(),
                });
            }
        }
        self.save_section(section, path, notifier)
    }

    fn unknown_key(key: &str) -> AppError {
        AppError::UnknownField {
            field: key.to_string(),
            expected: Self::KEYS.join(", "),
        }
    }

    /// Saves after editing one section, and confirms which one.
    pub fn save_section(
        &self,
        section: Section,
        path: &Path,
        notifier: &dyn Notifier,
    ) -> Result<()> {
        self.save(path)?;
        info!("{} settings saved", section.title());
        notifier.notify(Toast::new(
            "Settings saved",
            format!("{} settings have been updated successfully.", section.title()),
        ));
        Ok(())
    }

    /// The fields of one section as labelled figures.
    pub fn stats(&self, section: Section) -> Vec<Stat> {
        match section {
            Section::Business => {
                let b = &self.business;
                vec![
                    Stat::new("Business Name", &b.name),
                    Stat::new("Email", &b.email),
                    Stat::new("Phone", &b.phone),
                    Stat::new("Address", &b.address),
                    Stat::new("Tax ID", &b.tax_id),
                ]
            }
            Section::Pricing => {
                let p = &self.pricing;
                vec![
                    Stat::new("Deposit", format!("{}%", p.deposit_percentage)),
                    Stat::new("Late Fee (per hour)", money(p.late_fee_per_hour)),
                    Stat::new("Cancellation Fee", money(p.cancellation_fee)),
                    Stat::new("Insurance (daily)", money(p.insurance_daily)),
                ]
            }
            Section::Notifications => {
                let n = &self.notifications;
                let on_off = |b: bool| if b { "on" } else { "off" };
                vec![
                    Stat::new("Email: new bookings", on_off(n.email_bookings)),
                    Stat::new("Email: payments", on_off(n.email_payments)),
                    Stat::new("Email: returns", on_off(n.email_returns)),
                    Stat::new("SMS: new bookings", on_off(n.sms_bookings)),
                    Stat::new("SMS: payments", on_off(n.sms_payments)),
                ]
            }
        }
    }
}

/// Notification switches accept on/off and yes/no as well as true/false.
fn parse_switch(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" => Ok(true),
        "off" | "no" => Ok(false),
        _ => parse_field(key, value),
    }
}

/// The independently saved parts of the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Business,
    Pricing,
    Notifications,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Business, Section::Pricing, Section::Notifications];

    /// Name used in the confirmation toast.
    pub fn title(self) -> &'static str {
        match self {
            Section::Business => "Business",
            Section::Pricing => "Pricing",
            Section::Notifications => "Notification",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Business => write!(f, "business"),
            Section::Pricing => write!(f, "pricing"),
            Section::Notifications => write!(f, "notifications"),
        }
    }
}

impl FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(Section::Business),
            "pricing" => Ok(Section::Pricing),
            "notifications" | "notification" => Ok(Section::Notifications),
            _ => Err(AppError::UnknownSection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.pricing.deposit_percentage, 20);
        assert_eq!(settings.users.len(), 3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(
            &path,
            "business:\n  name: Two Wheels\npricing:\n  depositPercentage: 30\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.business.name, "Two Wheels");
        assert_eq!(settings.business.email, "contact@motorent.com");
        assert_eq!(settings.pricing.deposit_percentage, 30);
        assert_eq!(settings.pricing.late_fee_per_hour, 15);
        assert!(settings.notifications.email_bookings);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");
        let mut settings = Settings::default();
        settings.notifications.sms_payments = true;
        settings.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("smsPayments: true"));
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "pricing: [1, 2").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, AppError::SettingsFormat { .. }));
        assert!(err.to_string().contains("settings.yaml"));
    }

    #[test]
    fn save_section_toasts_its_title() {
        let dir = TempDir::new().unwrap();
        let n = RecordingNotifier::new();
        Settings::default()
            .save_section(Section::Notifications, &dir.path().join("s.yaml"), &n)
            .unwrap();
        let toast = n.last().unwrap();
        assert_eq!(toast.title, "Settings saved");
        assert_eq!(
            toast.description,
            "Notification settings have been updated successfully."
        );
    }

    #[test]
    fn set_parses_by_field_type() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set("pricing.depositPercentage", "25").unwrap(),
            Section::Pricing
        );
        assert_eq!(settings.pricing.deposit_percentage, 25);
        settings.set("business.taxId", "TAX-1").unwrap();
        assert_eq!(settings.business.tax_id, "TAX-1");
        settings.set("notifications.smsPayments", "on").unwrap();
        assert!(settings.notifications.sms_payments);

        assert!(matches!(
            settings.set("pricing.depositPercentage", "a lot"),
            Err(AppError::InvalidValue { field, .. }) if field == "pricing.depositPercentage"
        ));
        for bad in ["pricing.deposit", "users.name", "name"] {
            assert!(
                matches!(settings.set(bad, "x"), Err(AppError::UnknownField { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn update_section_writes_new_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.yaml");
        let n = RecordingNotifier::new();
        let mut settings = Settings::default();
        let edits = vec![("pricing.lateFeePerHour".to_string(), "18".to_string())];
        settings
            .update_section(Section::Pricing, &edits, &path, &n)
            .unwrap();

        assert_eq!(Settings::load(&path).unwrap().pricing.late_fee_per_hour, 18);
        assert_eq!(n.last().unwrap().title, "Settings saved");
    }

    #[test]
    fn update_section_refuses_other_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.yaml");
        let n = RecordingNotifier::new();
        let edits = vec![("business.name".to_string(), "Two Wheels".to_string())];
        let err = Settings::default()
            .update_section(Section::Pricing, &edits, &path, &n)
            .unwrap_err();

        assert!(matches!(err, AppError::SettingOutsideSection { section: "Pricing", .. }));
        assert!(!path.exists());
        assert!(n.toasts().is_empty());
    }

    #[test]
    fn section_names() {
        assert_eq!("Pricing".parse::<Section>().unwrap(), Section::Pricing);
        assert_eq!(" notification ".parse::<Section>().unwrap(), Section::Notifications);
        assert!(matches!(
            "users".parse::<Section>(),
            Err(AppError::UnknownSection(s)) if s == "users"
        ));
    }

    #[test]
    fn pricing_stats() {
        let stats = Settings::default().stats(Section::Pricing);
        assert_eq!(stats[0].value, "20%");
        assert_eq!(stats[2].value, "$50");
    }
}
