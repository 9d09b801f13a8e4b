//! In-memory [`DataAccess`] for tests and offline runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::access::{DataAccess, RawRow};
use crate::errors::InspectError;
use crate::models::Value;

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Tables held in memory, grouped by connection name.
#[derive(Debug, Default)]
pub struct MemoryDataAccess {
    connections: BTreeMap<String, BTreeMap<String, MemoryTable>>,
    fetches: AtomicUsize,
}

impl MemoryDataAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty connection.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connections.entry(connection.into()).or_default();
        self
    }

    /// Adds a table. Each row holds one value per column, in column order.
    pub fn with_table(
        mut self,
        connection: impl Into<String>,
        table: impl Into<String>,
        columns: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> Self {
        let data = MemoryTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        };
        self.connections
            .entry(connection.into())
            .or_default()
            .insert(table.into(), data);
        self
    }

    /// Number of row fetches served so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn table(&self, table: &str, connection: &str) -> Result<&MemoryTable, InspectError> {
        self.connections
            .get(connection)
            .ok_or_else(|| InspectError::UnknownConnection(connection.to_string()))?
            .get(table)
            .ok_or_else(|| InspectError::TableNotFound(table.to_string()))
    }
}

#[async_trait]
impl DataAccess for MemoryDataAccess {
    async fn table_exists(&self, table: &str, connection: &str) -> Result<bool, InspectError> {
        match self.table(table, connection) {
            Ok(_) => Ok(true),
            Err(InspectError::TableNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_columns(
        &self,
        table: &str,
        connection: &str,
    ) -> Result<Vec<String>, InspectError> {
        Ok(self.table(table, connection)?.columns.clone())
    }

    async fn fetch_rows(
        &self,
        table: &str,
        connection: &str,
        columns: Option<&[String]>,
        limit: Option<u64>,
    ) -> Result<Vec<RawRow>, InspectError> {
        let source = self.table(table, connection)?;
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let projection: Vec<usize> = match columns {
            Some(requested) => requested
                .iter()
                .filter_map(|c| source.columns.iter().position(|have| have == c))
                .collect(),
            None => (0..source.columns.len()).collect(),
        };
        let take = limit.map_or(source.rows.len(), |n| n as usize);

        Ok(source
            .rows
            .iter()
            .take(take)
            .map(|values| {
                projection
                    .iter()
                    .map(|&i| {
                        let value = values.get(i).cloned().unwrap_or(Value::Null);
                        (source.columns[i].clone(), value)
                    })
                    .collect()
            })
            .collect())
    }
}
