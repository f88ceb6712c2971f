//! Sort direction, sort state, and value comparison.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sort: which column, and which way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Key of the column being sorted.
    pub key: String,
    /// The sort direction.
    pub dir: Dir,
}

impl SortState {
    /// Ascending sort on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        SortState {
            key: key.into(),
            dir: Dir::Asc,
        }
    }

    /// Descending sort on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        SortState {
            key: key.into(),
            dir: Dir::Desc,
        }
    }

    /// Orders two precomputed keys under this sort's direction.
    ///
    /// Missing values go last whichever way the sort runs.
    pub fn compare(&self, a: &SortKey, b: &SortKey) -> Ordering {
        match (a, b) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
            _ => self.dir.apply(a.cmp_present(b)),
        }
    }
}

/// A value reduced to the form it sorts by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Numeric key.
    Number(f64),
    /// Lowercased text key.
    Text(String),
    /// The row has no value for the column.
    Missing,
}

impl SortKey {
    fn cmp_present(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // keys_for never mixes the two kinds within one column
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

/// Computes the sort keys for one column's values.
///
/// If every present value reads as a number (a numeric value, or text
/// that parses as one) the column sorts numerically. Otherwise the whole
/// column sorts as case-insensitive text, so a stray label in a numeric
/// column never makes the order inconsistent.
pub fn keys_for(values: &[Value<'_>]) -> Vec<SortKey> {
    let numeric = values
        .iter()
        .filter(|v| !v.is_none())
        .all(|v| v.numeric().is_some());

    values
        .iter()
        .map(|value| match value {
            Value::None => SortKey::Missing,
            v if numeric => v
                .numeric()
                .map(SortKey::Number)
                .unwrap_or(SortKey::Missing),
            v => SortKey::Text(v.to_text().to_lowercase()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    fn keys(values: &[Value<'_>]) -> Vec<SortKey> {
        keys_for(values)
    }

    #[test]
    fn numbers_sort_numerically() {
        let k = keys(&[Value::from(95u32), Value::from(120u32)]);
        assert_eq!(SortState::asc("p").compare(&k[0], &k[1]), Ordering::Less);
    }

    #[test]
    fn numeric_strings_sort_numerically() {
        // "95" < "120" as numbers even though "1" < "9" as text
        let k = keys(&[
            Value::from("95"),
            Value::from("120"),
            Value::Number(Number::F64(94.5)),
        ]);
        let asc = SortState::asc("p");
        assert_eq!(asc.compare(&k[0], &k[1]), Ordering::Less);
        assert_eq!(asc.compare(&k[0], &k[2]), Ordering::Greater);
    }

    #[test]
    fn text_sorts_case_insensitively() {
        let k = keys(&[
            Value::from("apple"),
            Value::from("Banana"),
            Value::from("KAWASAKI"),
            Value::from("kawasaki"),
        ]);
        let asc = SortState::asc("name");
        assert_eq!(asc.compare(&k[0], &k[1]), Ordering::Less);
        assert_eq!(asc.compare(&k[2], &k[3]), Ordering::Equal);
    }

    #[test]
    fn mixed_column_falls_back_to_text() {
        let k = keys(&[Value::from("9"), Value::from("10"), Value::from("1a")]);
        assert!(k.iter().all(|key| matches!(key, SortKey::Text(_))));
        // as text: "10" < "1a" < "9"
        let asc = SortState::asc("code");
        assert_eq!(asc.compare(&k[1], &k[2]), Ordering::Less);
        assert_eq!(asc.compare(&k[2], &k[0]), Ordering::Less);
    }

    #[test]
    fn none_sorts_last_both_directions() {
        let k = keys(&[Value::from("x"), Value::None, Value::None]);
        let asc = SortState::asc("k");
        let desc = SortState::desc("k");
        assert_eq!(asc.compare(&k[1], &k[0]), Ordering::Greater);
        assert_eq!(desc.compare(&k[1], &k[0]), Ordering::Greater);
        assert_eq!(desc.compare(&k[0], &k[1]), Ordering::Less);
        assert_eq!(asc.compare(&k[1], &k[2]), Ordering::Equal);
    }

    #[test]
    fn sort_state_serializes() {
        let json = serde_json::to_string(&SortState::desc("pricePerDay")).unwrap();
        assert_eq!(json, r#"{"key":"pricePerDay","dir":"desc"}"#);
    }
}
