use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::Value;

use crate::error::DbInterfaceError;

/// One result row, columns in select-list order
pub type Row = Vec<Value>;

/// Handle shared by every test context for the lifetime of a run
pub type SharedDatabase = Arc<dyn DatabaseInterface>;

/// Rows returned by a statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn all_rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// First column of the first row, if any
    pub fn first_value(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for ResultSet {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Executes SQL text with positional `?` binds.
///
/// Implementations must fail, never truncate or pad, when the number of
/// placeholders differs from the number of binds.
#[async_trait]
pub trait DatabaseInterface: Send + Sync {
    async fn execute_sql(&self, sql: &str, binds: Vec<Value>)
        -> Result<ResultSet, DbInterfaceError>;
}
