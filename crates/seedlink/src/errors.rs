use std::path::PathBuf;

use tables::InspectError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Table {0} was not found.")]
    TableNotFound(String),

    #[error("Inspection failed: {0}")]
    Inspect(InspectError),

    #[error("Table {table} does not map to a valid class name ({class})")]
    InvalidClassName { table: String, class: String },

    #[error("Class {class} is already generated from table {first} in this run")]
    DuplicateClass { class: String, first: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid registry marker: {0}")]
    Marker(#[from] regex::Error),
}

impl From<InspectError> for GenerateError {
    fn from(err: InspectError) -> Self {
        match err {
            InspectError::TableNotFound(table) => GenerateError::TableNotFound(table),
            other => GenerateError::Inspect(other),
        }
    }
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| GenerateError::Io { path, source }
    }
}
