//! Case-insensitive substring search over a fixed set of fields.

use crate::traits::Gridable;

/// Normalizes a raw search box string into the form rows are matched
/// against: trimmed and lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Tests whether `row` matches an already-normalized query.
///
/// A row matches when any of `keys`, stringified and lowercased, contains
/// the query. An empty query matches every row. Missing fields read as
/// the empty string.
pub fn row_matches<T, S>(row: &T, keys: &[S], needle: &str) -> bool
where
    T: Gridable + ?Sized,
    S: AsRef<str>,
{
    if needle.is_empty() {
        return true;
    }
    keys.iter().any(|key| {
        row.field_value(key.as_ref())
            .to_text()
            .to_lowercase()
            .contains(needle)
    })
}

/// Filters `rows` down to those matching `query`, preserving input order.
///
/// # Example
///
/// ```
/// use motodesk_grid::filter_rows;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Harley Davidson Iron 883", "category": "Cruiser"}),
///     json!({"name": "Ducati Monster", "category": "Naked"}),
/// ];
/// let hits = filter_rows(&rows, &["name", "category"], "  HARLEY ");
/// assert_eq!(hits.len(), 1);
/// ```
pub fn filter_rows<'a, T, S>(rows: &'a [T], keys: &[S], query: &str) -> Vec<&'a T>
where
    T: Gridable,
    S: AsRef<str>,
{
    let needle = normalize_query(query);
    rows.iter()
        .filter(|row| row_matches(*row, keys, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<serde_json::Value> {
        vec![
            json!({"id": "BK-001", "customerName": "Sarah Chen", "amount": 360}),
            json!({"id": "BK-002", "customerName": "Marcus Webb", "amount": 95}),
            json!({"id": "BK-003", "customerName": "Priya Nair"}),
        ]
    }

    #[test]
    fn empty_and_blank_queries_keep_everything() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, &["id"], "").len(), 3);
        assert_eq!(filter_rows(&rows, &["id"], "   ").len(), 3);
    }

    #[test]
    fn matches_any_key_case_insensitively() {
        let rows = rows();
        let hits = filter_rows(&rows, &["id", "customerName"], "webb");
        assert_eq!(hits, vec![&rows[1]]);

        let hits = filter_rows(&rows, &["id", "customerName"], "bk-00");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn numbers_are_searched_as_text() {
        let rows = rows();
        let hits = filter_rows(&rows, &["amount"], "36");
        assert_eq!(hits, vec![&rows[0]]);
    }

    #[test]
    fn missing_fields_never_match_nor_fail() {
        let rows = rows();
        let hits = filter_rows(&rows, &["amount", "nonexistent"], "9");
        assert_eq!(hits, vec![&rows[1]]);
    }

    #[test]
    fn only_listed_keys_are_searched() {
        let rows = rows();
        assert!(filter_rows(&rows, &["id"], "sarah").is_empty());
    }
}
