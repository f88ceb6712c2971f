//! Runtime field values extracted from rows.
//!
//! The [`Value`] enum is what a row hands back when the table asks for one
//! of its fields. It is deliberately small: the table only ever needs to
//! stringify a value (for cells and search) or compare two of them (for
//! sorting).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// A field value, borrowed from the row when possible.
///
/// # Example
///
/// ```
/// use motodesk_grid::{Number, Value};
///
/// struct Bike {
///     name: String,
///     price_per_day: u32,
/// }
///
/// fn field<'a>(bike: &'a Bike, key: &str) -> Value<'a> {
///     match key {
///         "name" => Value::from(bike.name.as_str()),
///         "pricePerDay" => Value::Number(Number::from(bike.price_per_day)),
///         _ => Value::None,
///     }
/// }
///
/// let bike = Bike { name: "Ducati Monster".into(), price_per_day: 95 };
/// assert_eq!(field(&bike, "pricePerDay").to_text(), "95");
/// assert_eq!(field(&bike, "missing").to_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value.
    String(Cow<'a, str>),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Field absent, null, or not displayable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Interprets the value as a number.
    ///
    /// Numbers pass through; strings are accepted when their trimmed text
    /// parses as a float. Everything else yields `None`.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }

    /// Renders the value as cell text. `None` renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::None => String::new(),
        }
    }

    /// Converts into a value that owns its data.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Number(n) => Value::Number(n),
            Value::Bool(b) => Value::Bool(b),
            Value::None => Value::None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::String(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'static> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl From<bool> for Value<'static> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::None)
    }
}

/// Numeric value that keeps integer precision until it has to compare
/// against a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed representations.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$t> for Value<'static> {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_text_per_variant() {
        assert_eq!(Value::from("Harley").to_text(), "Harley");
        assert_eq!(Value::from(120u32).to_text(), "120");
        assert_eq!(Value::from(-3i32).to_text(), "-3");
        assert_eq!(Value::from(12.5f64).to_text(), "12.5");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::None.to_text(), "");
    }

    #[test]
    fn numeric_parses_strings() {
        assert_eq!(Value::from(" 42 ").numeric(), Some(42.0));
        assert_eq!(Value::from("4.5").numeric(), Some(4.5));
        assert_eq!(Value::from("BK-001").numeric(), None);
        assert_eq!(Value::from("NaN").numeric(), None);
        assert_eq!(Value::from(true).numeric(), None);
        assert_eq!(Value::None.numeric(), None);
    }

    #[test]
    fn option_conversion() {
        let present: Option<&str> = Some("x");
        let absent: Option<&str> = None;
        assert_eq!(Value::from(present), Value::from("x"));
        assert!(Value::from(absent).is_none());
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn into_owned_keeps_content() {
        let name = String::from("Triumph");
        let owned = Value::from(&name).into_owned();
        drop(name);
        assert_eq!(owned.as_str(), Some("Triumph"));
    }
}
