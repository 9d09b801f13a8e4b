//! Schema checks and projected row reads on top of a [`DataAccess`].

use tracing::debug;

use crate::access::DataAccess;
use crate::errors::InspectError;
use crate::models::{RowSet, TableSpec};
use crate::normalize::normalize;

/// Reads table metadata and rows through an injected [`DataAccess`].
pub struct TableInspector<A> {
    access: A,
}

impl<A: DataAccess> TableInspector<A> {
    pub fn new(access: A) -> Self {
        Self { access }
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub async fn table_exists(&self, table: &str, connection: &str) -> Result<bool, InspectError> {
        self.access.table_exists(table, connection).await
    }

    pub async fn list_columns(
        &self,
        table: &str,
        connection: &str,
    ) -> Result<Vec<String>, InspectError> {
        self.access.list_columns(table, connection).await
    }

    /// Fails with [`InspectError::TableNotFound`] when the table is absent.
    pub async fn ensure_exists(&self, table: &str, connection: &str) -> Result<(), InspectError> {
        if self.table_exists(table, connection).await? {
            Ok(())
        } else {
            Err(InspectError::TableNotFound(table.to_string()))
        }
    }

    /// Reads the rows described by `spec`.
    ///
    /// Existence is checked before anything is fetched. A non-empty
    /// exclusion set projects the table's columns minus the excluded ones,
    /// keeping definition order.
    pub async fn fetch_rows(&self, spec: &TableSpec) -> Result<RowSet, InspectError> {
        self.ensure_exists(&spec.table, &spec.connection).await?;

        let projection = if spec.exclude.is_empty() {
            None
        } else {
            let columns: Vec<String> = self
                .list_columns(&spec.table, &spec.connection)
                .await?
                .into_iter()
                .filter(|column| !spec.exclude.contains(column))
                .collect();
            Some(columns)
        };

        let raw = self
            .access
            .fetch_rows(
                &spec.table,
                &spec.connection,
                projection.as_deref(),
                spec.limit,
            )
            .await?;

        debug!(
            "Fetched {} rows from {} on {}",
            raw.len(),
            spec.table,
            spec.connection
        );

        Ok(normalize(raw))
    }
}
