//! Table introspection and row extraction for seedlink.
//!
//! This crate answers three questions about a table on a named connection:
//! does it exist, which columns does it have, and what rows does it hold.
//! Drivers are hidden behind the [`DataAccess`] capability so the code
//! generator never touches a connection pool directly.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tables::prelude::*;
//!
//! let inspector = TableInspector::new(PgDataAccess::new().with_pool("default", pool));
//! let spec = TableSpec::new("user_accounts", "default")
//!     .with_exclude(["password"])
//!     .with_limit(Some(100));
//! let rows = inspector.fetch_rows(&spec).await?;
//! ```

pub mod access;
pub mod database;
pub mod errors;
pub mod inspector;
pub mod memory;
pub mod models;
pub mod normalize;
pub mod query_builder;

pub use access::{DataAccess, RawRow};
pub use database::PgDataAccess;
pub use errors::InspectError;
pub use inspector::TableInspector;
pub use memory::MemoryDataAccess;
pub use models::{DEFAULT_CHUNK_SIZE, Row, RowSet, TableSpec, Value};
pub use normalize::normalize;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::{
        DataAccess, InspectError, MemoryDataAccess, PgDataAccess, Row, RowSet, TableInspector,
        TableSpec, Value,
    };
}
