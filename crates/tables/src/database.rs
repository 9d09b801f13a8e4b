use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row, TypeInfo};
use tracing::debug;

use crate::access::{DataAccess, RawRow};
use crate::errors::InspectError;
use crate::models::Value;
use crate::query_builder::SelectBuilder;

/// Column types decoded natively. Every other type is read as its text
/// representation.
const NATIVE_TYPES: &[&str] = &[
    "int2", "int4", "int8", "float4", "float8", "bool", "text", "varchar", "bpchar", "name",
    "json", "jsonb",
];

/// PostgreSQL-backed [`DataAccess`], one pool per connection name.
#[derive(Clone, Default)]
pub struct PgDataAccess {
    pools: HashMap<String, PgPool>,
}

impl PgDataAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool under a connection name.
    pub fn with_pool(mut self, connection: impl Into<String>, pool: PgPool) -> Self {
        self.pools.insert(connection.into(), pool);
        self
    }

    /// Creates lazily-connecting pools for every `name -> url` entry, so
    /// connections that are never used are never opened.
    pub fn connect_lazy(connections: &BTreeMap<String, String>) -> Result<Self, InspectError> {
        let mut access = Self::new();
        for (name, url) in connections {
            let pool = PgPoolOptions::new().max_connections(2).connect_lazy(url)?;
            access.pools.insert(name.clone(), pool);
        }
        Ok(access)
    }

    fn pool(&self, connection: &str) -> Result<&PgPool, InspectError> {
        self.pools
            .get(connection)
            .ok_or_else(|| InspectError::UnknownConnection(connection.to_string()))
    }

    /// Column names and their `udt_name` in definition order.
    async fn column_types(
        &self,
        pool: &PgPool,
        table: &str,
    ) -> Result<Vec<(String, String)>, InspectError> {
        let columns: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT column_name::text, udt_name::text
            FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1
            ORDER BY ordinal_position
            "#,
        )
        .bind(table)
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }
}

#[async_trait]
impl DataAccess for PgDataAccess {
    async fn table_exists(&self, table: &str, connection: &str) -> Result<bool, InspectError> {
        let pool = self.pool(connection)?;
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    async fn list_columns(
        &self,
        table: &str,
        connection: &str,
    ) -> Result<Vec<String>, InspectError> {
        let pool = self.pool(connection)?;
        let columns = self.column_types(pool, table).await?;
        if columns.is_empty() && !self.table_exists(table, connection).await? {
            return Err(InspectError::TableNotFound(table.to_string()));
        }
        Ok(columns.into_iter().map(|(name, _)| name).collect())
    }

    async fn fetch_rows(
        &self,
        table: &str,
        connection: &str,
        columns: Option<&[String]>,
        limit: Option<u64>,
    ) -> Result<Vec<RawRow>, InspectError> {
        let pool = self.pool(connection)?;
        let types = self.column_types(pool, table).await?;
        if types.is_empty() && !self.table_exists(table, connection).await? {
            return Err(InspectError::TableNotFound(table.to_string()));
        }

        let type_of: HashMap<&str, &str> = types
            .iter()
            .map(|(name, udt)| (name.as_str(), udt.as_str()))
            .collect();
        let projection: Vec<&str> = match columns {
            Some(requested) => requested
                .iter()
                .map(String::as_str)
                .filter(|c| type_of.contains_key(c))
                .collect(),
            None => types.iter().map(|(name, _)| name.as_str()).collect(),
        };

        let mut qb = SelectBuilder::new(table);
        for column in projection {
            if NATIVE_TYPES.contains(&type_of[column]) {
                qb.add_column(column);
            } else {
                qb.add_text_column(column);
            }
        }
        qb.limit(limit);

        let sql = qb.build();
        debug!("Fetching rows: {sql}");

        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(decode_row).collect()
    }
}

/// Converts a row into `(column, value)` pairs by its wire types.
fn decode_row(row: &PgRow) -> Result<RawRow, InspectError> {
    row.columns()
        .iter()
        .map(|column| {
            let idx = column.ordinal();
            let value = match column.type_info().name() {
                "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(|v| Value::Int(v.into())),
                "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(|v| Value::Int(v.into())),
                "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::Int),
                // Through the shortest decimal form so 0.1f32 stays 0.1.
                "FLOAT4" => row
                    .try_get::<Option<f32>, _>(idx)?
                    .map(|v| Value::Float(v.to_string().parse().unwrap_or(f64::from(v)))),
                "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.map(Value::Float),
                "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(Value::Bool),
                "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => {
                    row.try_get::<Option<String>, _>(idx)?.map(Value::Text)
                }
                "JSON" | "JSONB" => row
                    .try_get::<Option<serde_json::Value>, _>(idx)?
                    .map(|json| Value::Text(json.to_string())),
                other => {
                    return Err(InspectError::UnsupportedType {
                        column: column.name().to_string(),
                        type_name: other.to_string(),
                    });
                }
            };
            Ok((column.name().to_string(), value.unwrap_or(Value::Null)))
        })
        .collect()
}
