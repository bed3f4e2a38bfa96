use std::fmt;

use db_interface::{DbInterfaceError, SharedDatabase};
use sea_orm::Value;
use tracing::{debug, warn};

use crate::condition::Condition;
use crate::error::{RowCountMismatch, TableAssertError};

/// Per-run handle that test cases hold to run row-count assertions.
///
/// Cloning is cheap; every clone shares the same database interface.
#[derive(Clone)]
pub struct DbTestContext {
    db: SharedDatabase,
}

impl DbTestContext {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &SharedDatabase {
        &self.db
    }

    /// Runs `select count(*) from <table> <condition>` and returns the count.
    ///
    /// Neither `table` nor a raw condition is escaped.
    pub async fn count_rows(
        &self,
        table: &str,
        condition: &Condition,
    ) -> Result<u64, TableAssertError> {
        let sql = format!("select count(*) from {} {}", table, condition.sql());
        let results = self
            .db
            .execute_sql(&sql, condition.binds().to_vec())
            .await?;

        let value = results
            .first_value()
            .ok_or_else(|| DbInterfaceError::query(&sql, "count query returned no rows"))?;
        let count = count_from_value(value).ok_or_else(|| {
            DbInterfaceError::query(&sql, format!("count query returned {value:?}, not a count"))
        })?;
        Ok(count)
    }

    /// Asserts that `table` holds exactly `expected` rows matching `condition`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use table_assert::{Condition, DbTestContext, TableAssertError};
    /// # async fn run(ctx: &DbTestContext) -> Result<(), TableAssertError> {
    /// ctx.assert_table_has_many_rows(
    ///     "users",
    ///     10,
    ///     Condition::parameterized("where status = ?", ["locked"]),
    ///     Some("Ensure the users table has 10 locked rows"),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn assert_table_has_many_rows(
        &self,
        table: &str,
        expected: u64,
        condition: impl Into<Condition>,
        message: Option<&str>,
    ) -> Result<(), TableAssertError> {
        let condition = condition.into();
        let actual = self.count_rows(table, &condition).await?;
        debug!(table, expected, actual, condition = %condition, "row count checked");

        if actual == expected {
            return Ok(());
        }

        let mismatch = RowCountMismatch {
            table: table.to_string(),
            expected,
            actual,
            condition,
            message: message.map(str::to_string),
        };
        warn!(table, expected, actual, "row count mismatch");
        Err(TableAssertError::Mismatch(mismatch))
    }

    /// Asserts that `table` holds exactly one row matching `condition`.
    ///
    /// ```no_run
    /// # use table_assert::{DbTestContext, TableAssertError};
    /// # async fn run(ctx: &DbTestContext) -> Result<(), TableAssertError> {
    /// ctx.assert_table_has_one_row(
    ///     "users",
    ///     "where username = 'foouser'",
    ///     Some("Ensure the users table has a single row"),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn assert_table_has_one_row(
        &self,
        table: &str,
        condition: impl Into<Condition>,
        message: Option<&str>,
    ) -> Result<(), TableAssertError> {
        self.assert_table_has_many_rows(table, 1, condition, message)
            .await
    }

    /// Asserts that no row of `table` matches `condition`.
    pub async fn assert_table_has_zero_rows(
        &self,
        table: &str,
        condition: impl Into<Condition>,
        message: Option<&str>,
    ) -> Result<(), TableAssertError> {
        self.assert_table_has_many_rows(table, 0, condition, message)
            .await
    }
}

impl fmt::Debug for DbTestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbTestContext").finish_non_exhaustive()
    }
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::TinyInt(Some(n)) => u64::try_from(*n).ok(),
        Value::SmallInt(Some(n)) => u64::try_from(*n).ok(),
        Value::Int(Some(n)) => u64::try_from(*n).ok(),
        Value::BigInt(Some(n)) => u64::try_from(*n).ok(),
        Value::TinyUnsigned(Some(n)) => Some(u64::from(*n)),
        Value::SmallUnsigned(Some(n)) => Some(u64::from(*n)),
        Value::Unsigned(Some(n)) => Some(u64::from(*n)),
        Value::BigUnsigned(Some(n)) => Some(*n),
        Value::Double(Some(n)) if n.fract() == 0.0 && *n >= 0.0 => Some(*n as u64),
        Value::String(Some(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
