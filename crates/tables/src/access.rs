//! The data-access capability the inspector calls into.

use async_trait::async_trait;

use crate::errors::InspectError;
use crate::models::Value;

/// A driver row flattened to `(column, value)` pairs in select order.
pub type RawRow = Vec<(String, Value)>;

/// Schema and row queries against named connections.
///
/// Implementations must report a missing table as `Ok(false)` from
/// [`DataAccess::table_exists`] and as [`InspectError::TableNotFound`] from
/// the other two methods.
#[async_trait]
pub trait DataAccess: Send + Sync {
    async fn table_exists(&self, table: &str, connection: &str) -> Result<bool, InspectError>;

    /// Column names in table definition order.
    async fn list_columns(&self, table: &str, connection: &str)
    -> Result<Vec<String>, InspectError>;

    /// Reads rows. `columns` restricts and orders the projection; `None`
    /// selects every column. `limit` caps the number of rows.
    async fn fetch_rows(
        &self,
        table: &str,
        connection: &str,
        columns: Option<&[String]>,
        limit: Option<u64>,
    ) -> Result<Vec<RawRow>, InspectError>;
}
