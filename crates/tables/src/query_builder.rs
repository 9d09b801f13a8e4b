//! SQL builder for projected, capped table reads.
//!
//! Identifiers come from the catalog rather than from bound parameters, so
//! every table and column name is quoted before it reaches the statement.

/// Quotes an identifier for PostgreSQL, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Builder for `SELECT <columns> FROM <table> [LIMIT n]` statements.
///
/// # Example
/// ```ignore
/// let mut qb = SelectBuilder::new("users");
/// qb.add_column("id").add_text_column("created_at");
/// qb.limit(Some(10));
/// assert_eq!(
///     qb.build(),
///     r#"SELECT "id", "created_at"::text AS "created_at" FROM "users" LIMIT 10"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct SelectBuilder {
    table: String,
    columns: Vec<String>,
    limit: Option<u64>,
}

impl SelectBuilder {
    /// Creates a builder for the given table with an empty projection.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            limit: None,
        }
    }

    /// Adds a column selected with its native type.
    pub fn add_column(&mut self, column: &str) -> &mut Self {
        self.columns.push(quote_ident(column));
        self
    }

    /// Adds a column cast to text, keeping the column name as its alias.
    pub fn add_text_column(&mut self, column: &str) -> &mut Self {
        let quoted = quote_ident(column);
        self.columns.push(format!("{quoted}::text AS {quoted}"));
        self
    }

    /// Caps the number of rows. `None` reads everything.
    pub fn limit(&mut self, limit: Option<u64>) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Returns the number of projected columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Builds the statement. An empty projection selects zero columns,
    /// which PostgreSQL accepts and which still yields one row per record.
    pub fn build(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.columns.join(", "),
            quote_ident(&self.table)
        );
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }
}
