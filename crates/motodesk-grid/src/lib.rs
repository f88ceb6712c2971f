//! Grid - searchable, sortable, paginated views over record collections.
//!
//! A [`DataTable`] turns a slice of rows into one visible page: it filters
//! by a search query, orders by a clicked column, slices out a page, and
//! renders every cell to text. It supports:
//!
//! - Any row type implementing [`Gridable`] (and `serde_json::Value` with
//!   dot-path keys out of the box)
//! - Plain field columns and custom-rendered columns ([`Cell`])
//! - Case-insensitive substring search over a chosen set of fields
//! - Stable, three-state header sorting (ascending, descending, off)
//! - Fixed-size pages with clamping
//!
//! # Quick Start
//!
//! ```rust
//! use motodesk_grid::{Action, Column, DataTable, Gridable, Value, ViewState};
//!
//! struct Bike {
//!     name: String,
//!     category: String,
//!     price_per_day: u32,
//! }
//!
//! impl Gridable for Bike {
//!     fn field_value(&self, key: &str) -> Value<'_> {
//!         match key {
//!             "name" => Value::from(&self.name),
//!             "category" => Value::from(&self.category),
//!             "pricePerDay" => Value::from(self.price_per_day),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let bikes = vec![
//!     Bike { name: "Harley Davidson Iron 883".into(), category: "Cruiser".into(), price_per_day: 120 },
//!     Bike { name: "Ducati Monster".into(), category: "Naked".into(), price_per_day: 95 },
//!     Bike { name: "BMW R 1250 GS".into(), category: "Adventure".into(), price_per_day: 150 },
//! ];
//!
//! let table = DataTable::new(
//!     vec![
//!         Column::new("name", "Name").sortable(),
//!         Column::new("category", "Category").sortable(),
//!         Column::new("pricePerDay", "Price/Day")
//!             .sortable()
//!             .render(|b: &Bike| format!("${}", b.price_per_day)),
//!     ],
//!     ["name", "category"],
//! )
//! .unwrap();
//!
//! let state = table.dispatch(ViewState::new(), &Action::ToggleSort("pricePerDay".into()), &bikes);
//! let page = table.view(&bikes, &state);
//! assert_eq!(page.column_cells("pricePerDay"), vec!["$95", "$120", "$150"]);
//!
//! let state = table.dispatch(state, &Action::SetQuery("harley".into()), &bikes);
//! let page = table.view(&bikes, &state);
//! assert_eq!(page.rows().len(), 1);
//! ```
//!
//! # Interaction Model
//!
//! The table holds configuration only. Interaction state lives in a
//! [`ViewState`] value owned by the caller and advanced with
//! [`DataTable::dispatch`] (or the pure [`ViewState::reduce`]):
//!
//! | Action | Effect |
//! |--------|--------|
//! | `SetQuery` / `ClearQuery` | new query; back to page one if it changed |
//! | `ToggleSort(key)` | off → asc → desc → off; another key restarts at asc; back to page one |
//! | `NextPage` / `PrevPage` | one page, stopping at the ends |
//! | `FirstPage` / `LastPage` / `GoToPage(n)` | jump, clamped |

mod column;
mod error;
mod ordering;
mod search;
mod state;
mod table;
mod traits;
mod value;

pub use column::{Cell, Column, Renderer};
pub use error::{GridError, Result};
pub use ordering::{keys_for, Dir, SortKey, SortState};
pub use search::{filter_rows, normalize_query, row_matches};
pub use state::{Action, ViewState};
pub use table::{Body, DataTable, Header, PageView, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE};
pub use traits::Gridable;
pub use value::{Number, Value};
