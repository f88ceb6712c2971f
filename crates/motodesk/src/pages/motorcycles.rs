//! Fleet inventory.

use chrono::{Datelike, Local};
use log::debug;
use motodesk_grid::{Column, DataTable};

use super::{money, next_numeric_id, parse_field, unknown_field, Page};
use crate::data::DEFAULT_BIKE_IMAGE;
use crate::domain::{BikeStatus, Motorcycle};
use crate::error::{AppError, Result};
use crate::notify::{Notifier, Toast};

/// Form input for adding or editing a motorcycle.
///
/// Unset fields keep their current value on edit and take the defaults on
/// add.
#[derive(Debug, Clone, Default)]
pub struct MotorcycleDraft {
    pub name: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub price_per_day: Option<u32>,
    pub status: Option<BikeStatus>,
    pub image: Option<String>,
    pub year: Option<i32>,
    pub engine_cc: Option<u32>,
    pub fuel_type: Option<String>,
    pub mileage: Option<u32>,
}

impl MotorcycleDraft {
    /// Field names accepted by [`MotorcycleDraft::from_assignments`].
    pub const FIELDS: &'static [&'static str] = &[
        "name",
        "model",
        "category",
        "pricePerDay",
        "status",
        "image",
        "year",
        "engineCC",
        "fuelType",
        "mileage",
    ];

    /// Builds a draft from `field=value` pairs keyed like the JSON record.
    pub fn from_assignments(pairs: &[(String, String)]) -> Result<Self> {
        let mut draft = Self::default();
        for (field, value) in pairs {
            match field.as_str() {
                "name" => draft.name = Some(value.clone()),
                "model" => draft.model = Some(value.clone()),
                "category" => draft.category = Some(value.clone()),
                "pricePerDay" => draft.price_per_day = Some(parse_field(field, value)?),
                "status" => draft.status = Some(parse_field(field, value)?),
                "image" => draft.image = Some(value.clone()),
                "year" => draft.year = Some(parse_field(field, value)?),
                "engineCC" => draft.engine_cc = Some(parse_field(field, value)?),
                "fuelType" => draft.fuel_type = Some(value.clone()),
                "mileage" => draft.mileage = Some(parse_field(field, value)?),
                _ => return Err(unknown_field(field, Self::FIELDS)),
            }
        }
        Ok(draft)
    }

    fn apply(self, bike: &mut Motorcycle) {
        if let Some(v) = self.name {
            bike.name = v;
        }
        if let Some(v) = self.model {
            bike.model = v;
        }
        if let Some(v) = self.category {
            bike.category = v;
        }
        if let Some(v) = self.price_per_day {
            bike.price_per_day = v;
        }
        if let Some(v) = self.status {
            bike.status = v;
        }
        if let Some(v) = self.image {
            bike.image = v;
        }
        if let Some(v) = self.year {
            bike.year = v;
        }
        if let Some(v) = self.engine_cc {
            bike.engine_cc = v;
        }
        if let Some(v) = self.fuel_type {
            bike.fuel_type = v;
        }
        if let Some(v) = self.mileage {
            bike.mileage = v;
        }
    }
}

/// Inventory page: every motorcycle in the fleet.
#[derive(Debug, Clone)]
pub struct MotorcyclesPage {
    bikes: Vec<Motorcycle>,
    table: DataTable<Motorcycle>,
}

impl MotorcyclesPage {
    pub fn new(bikes: Vec<Motorcycle>) -> Result<Self> {
        let table = DataTable::new(
            vec![
                Column::new("name", "Name").sortable(),
                Column::new("category", "Category").sortable(),
                Column::new("pricePerDay", "Price/Day")
                    .sortable()
                    .render(|b: &Motorcycle| money(b.price_per_day)),
                Column::new("status", "Status").render(|b: &Motorcycle| b.status.label().to_string()),
                Column::new("actions", "Actions")
                    .render(|b: &Motorcycle| format!("#{} view · edit · delete", b.id)),
            ],
            ["name", "model", "category"],
        )?
        .search_placeholder("Search motorcycles...");
        Ok(Self { bikes, table })
    }

    /// Looks up a motorcycle by id.
    pub fn get(&self, id: &str) -> Option<&Motorcycle> {
        self.bikes.iter().find(|b| b.id == id)
    }

    /// Adds a motorcycle at the end of the inventory.
    pub fn add(&mut self, draft: MotorcycleDraft, notifier: &dyn Notifier) -> &Motorcycle {
        let mut bike = Motorcycle {
            id: next_numeric_id(self.bikes.iter().map(|b| b.id.as_str())),
            name: String::new(),
            model: String::new(),
            category: String::new(),
            price_per_day: 0,
            status: BikeStatus::Available,
            image: DEFAULT_BIKE_IMAGE.to_string(),
            year: Local::now().year(),
            engine_cc: 0,
            fuel_type: "Petrol".to_string(),
            mileage: 0,
        };
        draft.apply(&mut bike);
        debug!("adding motorcycle {} ({})", bike.id, bike.name);

        notifier.notify(Toast::new(
            "Motorcycle added",
            format!("{} has been added to inventory.", bike.name),
        ));
        self.bikes.push(bike);
        &self.bikes[self.bikes.len() - 1]
    }

    /// Merges `draft` into an existing motorcycle.
    pub fn update(
        &mut self,
        id: &str,
        draft: MotorcycleDraft,
        notifier: &dyn Notifier,
    ) -> Result<&Motorcycle> {
        let bike = self
            .bikes
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::UnknownMotorcycle(id.to_string()))?;
        draft.apply(bike);
        debug!("updated motorcycle {}", id);

        notifier.notify(Toast::new(
            "Motorcycle updated",
            format!("{} has been updated.", bike.name),
        ));
        Ok(&*bike)
    }

    /// Removes a motorcycle from the inventory.
    pub fn delete(&mut self, id: &str, notifier: &dyn Notifier) -> Result<Motorcycle> {
        let index = self
            .bikes
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::UnknownMotorcycle(id.to_string()))?;
        let bike = self.bikes.remove(index);
        debug!("deleted motorcycle {}", id);

        notifier.notify(Toast::new(
            "Motorcycle deleted",
            format!("{} has been removed from inventory.", bike.name),
        ));
        Ok(bike)
    }

    /// Counts motorcycles in `status`.
    pub fn count_by_status(&self, status: BikeStatus) -> usize {
        self.bikes.iter().filter(|b| b.status == status).count()
    }
}

impl Page for MotorcyclesPage {
    type Row = Motorcycle;

    fn title(&self) -> &'static str {
        "Motorcycles"
    }

    fn description(&self) -> &'static str {
        "Manage your motorcycle inventory"
    }

    fn rows(&self) -> &[Motorcycle] {
        &self.bikes
    }

    fn table(&self) -> &DataTable<Motorcycle> {
        &self.table
    }
}
