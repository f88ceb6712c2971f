//! Field access for rows.
//!
//! The table never knows the shape of a row. It asks for fields by key
//! through [`Gridable`] and works with whatever [`Value`] comes back.

use std::borrow::Cow;

use crate::value::{Number, Value};

/// Trait for types that can be shown in a [`DataTable`](crate::DataTable).
///
/// # Example
///
/// ```
/// use motodesk_grid::{Gridable, Value};
///
/// struct Customer {
///     name: String,
///     total_rentals: u32,
/// }
///
/// impl Gridable for Customer {
///     fn field_value(&self, key: &str) -> Value<'_> {
///         match key {
///             "name" => Value::from(&self.name),
///             "totalRentals" => Value::from(self.total_rentals),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let c = Customer { name: "Ana".into(), total_rentals: 4 };
/// assert_eq!(c.field_value("totalRentals").to_text(), "4");
/// ```
pub trait Gridable {
    /// Returns the value stored under `key`, or [`Value::None`] if the row
    /// has no such field.
    fn field_value(&self, key: &str) -> Value<'_>;
}

impl<T: Gridable + ?Sized> Gridable for &T {
    fn field_value(&self, key: &str) -> Value<'_> {
        (**self).field_value(key)
    }
}

/// JSON rows resolve keys as dot-paths: `"customer.name"` walks into the
/// `customer` object, and numeric segments index arrays.
///
/// Objects and arrays are not displayable and come back as `None`.
impl Gridable for serde_json::Value {
    fn field_value(&self, key: &str) -> Value<'_> {
        let mut current = self;
        for segment in key.split('.') {
            let next = match current {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Value::None,
            }
        }

        match current {
            serde_json::Value::String(s) => Value::String(Cow::Borrowed(s)),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => json_number(n),
            _ => Value::None,
        }
    }
}

fn json_number(n: &serde_json::Number) -> Value<'static> {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::U64(u))
    } else {
        n.as_f64()
            .map(|f| Value::Number(Number::F64(f)))
            .unwrap_or(Value::None)
    }
}
