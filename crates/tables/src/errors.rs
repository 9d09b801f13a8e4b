use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Table {0} was not found.")]
    TableNotFound(String),

    #[error("Unknown database connection: {0}")]
    UnknownConnection(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported type {type_name} for column {column}")]
    UnsupportedType { column: String, type_name: String },
}

impl InspectError {
    /// True when the error means the requested table is absent.
    pub fn is_table_not_found(&self) -> bool {
        matches!(self, InspectError::TableNotFound(_))
    }
}
