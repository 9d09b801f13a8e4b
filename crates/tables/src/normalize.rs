//! Conversion of driver rows into the canonical [`RowSet`] form.

use crate::models::{Row, RowSet, Value};

/// Repacks rows from any representation that yields ordered
/// `(column, value)` pairs. Values pass through untouched.
pub fn normalize<I, R>(raw: I) -> RowSet
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = (String, Value)>,
{
    let rows: Vec<Row> = raw
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect();
    RowSet::from_rows(rows)
}
