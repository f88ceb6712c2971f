//! Column descriptors.
//!
//! A [`Column`] says how to label, sort and draw one column. How a cell is
//! drawn is a tagged union, [`Cell`]: either the row's field at the
//! column key, stringified, or a caller-supplied renderer. The table never
//! looks inside a renderer; it just calls it with the row.

use std::fmt;
use std::sync::Arc;

use crate::traits::Gridable;

/// A cell renderer supplied by the page that owns the table.
pub type Renderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a column produces its cell text.
pub enum Cell<T> {
    /// Stringify the row's field at the column key.
    Field,
    /// Call a custom renderer with the row.
    Custom(Renderer<T>),
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        match self {
            Cell::Field => Cell::Field,
            Cell::Custom(render) => Cell::Custom(Arc::clone(render)),
        }
    }
}

impl<T> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Field => write!(f, "Field"),
            Cell::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One column of a data table.
///
/// # Example
///
/// ```
/// use motodesk_grid::{Column, Gridable, Value};
///
/// struct Bike { name: String, price: u32 }
///
/// impl Gridable for Bike {
///     fn field_value(&self, key: &str) -> Value<'_> {
///         match key {
///             "name" => Value::from(&self.name),
///             "pricePerDay" => Value::from(self.price),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let columns = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("pricePerDay", "Price/Day")
///         .sortable()
///         .render(|bike: &Bike| format!("${}", bike.price)),
/// ];
///
/// let bike = Bike { name: "BMW R 1250 GS".into(), price: 150 };
/// assert_eq!(columns[0].cell_text(&bike), "BMW R 1250 GS");
/// assert_eq!(columns[1].cell_text(&bike), "$150");
/// ```
pub struct Column<T> {
    key: String,
    label: String,
    sortable: bool,
    cell: Cell<T>,
}

impl<T> Column<T> {
    /// Creates a plain, unsortable field column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            label: label.into(),
            sortable: false,
            cell: Cell::Field,
        }
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Replaces default cell rendering with a custom renderer.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.cell = Cell::Custom(Arc::new(render));
        self
    }

    /// Returns the column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if clicking the header sorts by this column.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns the cell kind.
    pub fn cell(&self) -> &Cell<T> {
        &self.cell
    }
}

impl<T: Gridable> Column<T> {
    /// Produces the text for this column's cell in `row`.
    pub fn cell_text(&self, row: &T) -> String {
        match &self.cell {
            Cell::Field => row.field_value(&self.key).to_text(),
            Cell::Custom(render) => render(row),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            cell: self.cell.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("cell", &self.cell)
            .finish()
    }
}
