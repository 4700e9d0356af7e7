//! PostgreSQL store for mag-import
//!
//! One table, `mag`, keyed logically by (date, elevation, lat, lon) with an
//! independent UUID id column. The importer needs exactly three operations:
//! point lookup by key, insert, and update of one component column by id.
//!
//! The table is expected to exist already; this tool runs no DDL.

mod error;
mod opts;
mod store;

pub use error::StoreError;
pub use opts::PgOpts;
pub use store::MagStore;
