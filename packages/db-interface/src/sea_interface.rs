use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, QueryResult,
    Statement, Value,
};
use tracing::{debug, info};

use crate::config::{sanitize_db_url, ConnectParams, DbKind};
use crate::error::DbInterfaceError;
use crate::interface::{DatabaseInterface, ResultSet, Row};
use crate::placeholders::{count_placeholders, number_placeholders};

/// Lifetime for in-memory SQLite pools. A recycled connection would be a fresh,
/// empty database, so the single connection is kept for the whole run.
const MEMORY_POOL_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// `DatabaseInterface` over a single sea-orm connection.
pub struct SeaOrmInterface {
    conn: DatabaseConnection,
}

impl SeaOrmInterface {
    /// Opens one connection. No retries; a failure is returned as-is.
    pub async fn connect(params: &ConnectParams) -> Result<Self, DbInterfaceError> {
        let url = params.to_url();
        info!(
            "connect=start kind={:?} url={}",
            params.kind,
            sanitize_db_url(&url)
        );

        let conn = Database::connect(connect_options(params.kind, url))
            .await
            .map_err(|e| DbInterfaceError::Connection {
                message: format!("failed to connect to {:?} database: {}", params.kind, e),
            })?;

        info!("connect=done kind={:?}", params.kind);
        Ok(Self { conn })
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.conn
    }

    fn prepare(&self, sql: &str, binds: Vec<Value>) -> Result<Statement, DbInterfaceError> {
        let placeholders = count_placeholders(sql);
        if placeholders != binds.len() {
            return Err(DbInterfaceError::query(
                sql,
                format!(
                    "statement has {} placeholder(s) but {} bind value(s) were supplied",
                    placeholders,
                    binds.len()
                ),
            ));
        }

        let backend = self.conn.get_database_backend();
        let text = match backend {
            DatabaseBackend::Postgres => number_placeholders(sql),
            _ => sql.to_string(),
        };
        Ok(Statement::from_sql_and_values(backend, &text, binds))
    }
}

#[async_trait]
impl DatabaseInterface for SeaOrmInterface {
    async fn execute_sql(
        &self,
        sql: &str,
        binds: Vec<Value>,
    ) -> Result<ResultSet, DbInterfaceError> {
        let stmt = self.prepare(sql, binds)?;
        debug!(sql = %stmt.sql, binds = ?stmt.values, "execute_sql");

        let rows = self
            .conn
            .query_all(stmt)
            .await
            .map_err(|e| DbInterfaceError::query(sql, e.to_string()))?;

        let rows = rows
            .iter()
            .map(|row| row_values(sql, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResultSet::new(rows))
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if kind == DbKind::SqliteMemory {
        opt.idle_timeout(MEMORY_POOL_LIFETIME)
            .max_lifetime(MEMORY_POOL_LIFETIME);
    }
    opt
}

fn row_values(sql: &str, row: &QueryResult) -> Result<Row, DbInterfaceError> {
    let names = row.column_names();
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            column_value(row, idx).ok_or_else(|| {
                DbInterfaceError::query(
                    sql,
                    format!("column {idx} ({name}) has a type that cannot be decoded"),
                )
            })
        })
        .collect()
}

macro_rules! decode_as {
    ($row:expr, $idx:expr, $($ty:ty),+ $(,)?) => {
        $(
            if let Ok(v) = $row.try_get_by_index::<Option<$ty>>($idx) {
                return Some(Value::from(v));
            }
        )+
    };
}

/// Reads a column as the first type that decodes. Nulls decode as `BigInt(None)`.
fn column_value(row: &QueryResult, idx: usize) -> Option<Value> {
    decode_as!(
        row,
        idx,
        i64,
        i32,
        i16,
        f64,
        f32,
        String,
        bool,
        Vec<u8>,
        time::OffsetDateTime,
        time::PrimitiveDateTime,
        time::Date,
        time::Time,
    );
    None
}
