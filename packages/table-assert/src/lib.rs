//! Row-count assertions for database tests.
//!
//! A [`DbTestContext`] wraps the shared database handle and offers
//! `assert_table_has_many_rows` plus the one/zero row shorthands. [`Setup`]
//! opens the handle once and hands it to both the context and a
//! [`DataFactory`]. The `oracle_dates` helpers render timestamps as Oracle
//! `to_date(...)` literals for use inside conditions.

pub mod assertions;
pub mod condition;
pub mod error;
pub mod logging;
pub mod oracle_dates;
pub mod setup;

pub use assertions::DbTestContext;
pub use condition::Condition;
pub use error::{RowCountMismatch, TableAssertError};
pub use oracle_dates::{
    time_as_oracle_dt, time_as_oracle_dt_offset, time_as_oracle_dtm, time_as_oracle_dtm_offset,
};
pub use setup::{DataFactory, Setup};

pub use db_interface::{
    ConnectParams, DatabaseInterface, DbInterfaceError, DbKind, ResultSet, SeaOrmInterface,
    SharedDatabase,
};
pub use sea_orm::Value;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    logging::init();
}
