//! Db module — PostgreSQL/SQLite connection, catalog, upsert, and backup helpers.

pub mod backup;
pub mod error;
pub mod model;
#[cfg(feature = "postgres")]
pub mod pg;
pub mod pgpass;
pub(crate) mod sql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use backup::run_container_backup;
pub use error::{DbError, Result};
pub use model::{Criterion, PrimaryKey};
pub use pgpass::{parse_pgpass, PgCredentials};
