//! Database interface used by the table assertions.
//! Connection parameters, the `DatabaseInterface` seam and its sea-orm backed implementation.

pub mod config;
pub mod error;
pub mod interface;
pub mod placeholders;
pub mod sea_interface;

pub use config::{sanitize_db_url, ConnectParams, DbKind};
pub use error::DbInterfaceError;
pub use interface::{DatabaseInterface, ResultSet, Row, SharedDatabase};
pub use sea_interface::SeaOrmInterface;
