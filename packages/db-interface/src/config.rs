use std::env;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::DbInterfaceError;

/// Characters left as-is in the userinfo part of a connection URL
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Database engine behind a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbKind {
    /// PostgreSQL server reached over the network
    Postgres,
    /// SQLite database stored in a file, `service` is the path
    SqliteFile,
    /// Private in-memory SQLite database
    SqliteMemory,
}

impl DbKind {
    pub fn parse(value: &str) -> Result<Self, DbInterfaceError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite-file" => Ok(Self::SqliteFile),
            "sqlite-memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(DbInterfaceError::config(format!(
                "Unsupported DB_KIND '{other}' (expected postgres, sqlite or sqlite-memory)"
            ))),
        }
    }
}

/// Everything needed to open the test database.
///
/// Mirrors the classic `connect(user, password, service, host, port)` signature;
/// `service` is the database name for Postgres and the file path for SQLite.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub kind: DbKind,
    pub user: String,
    pub password: String,
    pub service: String,
    pub host: String,
    pub port: u16,
}

impl ConnectParams {
    pub fn postgres(
        user: impl Into<String>,
        password: impl Into<String>,
        service: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            kind: DbKind::Postgres,
            user: user.into(),
            password: password.into(),
            service: service.into(),
            host: host.into(),
            port,
        }
    }

    pub fn sqlite_file(path: impl Into<String>) -> Self {
        Self {
            kind: DbKind::SqliteFile,
            user: String::new(),
            password: String::new(),
            service: path.into(),
            host: String::new(),
            port: 0,
        }
    }

    pub fn sqlite_memory() -> Self {
        Self {
            kind: DbKind::SqliteMemory,
            user: String::new(),
            password: String::new(),
            service: String::new(),
            host: String::new(),
            port: 0,
        }
    }

    /// Reads connection parameters from the environment.
    ///
    /// - `DB_KIND`: `postgres` (default), `sqlite` or `sqlite-memory`
    /// - `DB_USER`, `DB_PASSWORD`, `DB_SERVICE`: required for Postgres
    /// - `DB_SERVICE`: file path for `sqlite`
    /// - `DB_HOST` (default `localhost`), `DB_PORT` (default `5432`)
    pub fn from_env() -> Result<Self, DbInterfaceError> {
        let kind = match env::var("DB_KIND") {
            Ok(value) => DbKind::parse(&value)?,
            Err(_) => DbKind::Postgres,
        };

        match kind {
            DbKind::Postgres => Ok(Self::postgres(
                must_var("DB_USER")?,
                must_var("DB_PASSWORD")?,
                must_var("DB_SERVICE")?,
                env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
                port()?,
            )),
            DbKind::SqliteFile => Ok(Self::sqlite_file(must_var("DB_SERVICE")?)),
            DbKind::SqliteMemory => Ok(Self::sqlite_memory()),
        }
    }

    /// Builds the connection URL understood by sea-orm
    pub fn to_url(&self) -> String {
        match self.kind {
            DbKind::Postgres => format!(
                "postgresql://{}:{}@{}:{}/{}",
                utf8_percent_encode(&self.user, USERINFO),
                utf8_percent_encode(&self.password, USERINFO),
                self.host,
                self.port,
                self.service
            ),
            DbKind::SqliteFile => format!("sqlite://{}?mode=rwc", self.service),
            DbKind::SqliteMemory => "sqlite::memory:".to_string(),
        }
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("kind", &self.kind)
            .field("user", &self.user)
            .field("password", &"***")
            .field("service", &self.service)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn port() -> Result<u16, DbInterfaceError> {
    match env::var("DB_PORT") {
        Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
            DbInterfaceError::config(format!("DB_PORT must be a port number, got '{raw}'"))
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DbInterfaceError> {
    env::var(name).map_err(|_| {
        DbInterfaceError::config(format!("Required environment variable '{name}' is not set"))
    })
}

/// Mask the password in a connection URL so it can be logged.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = auth_part.find("://") else {
        return url.to_string();
    };

    match auth_part[scheme_end + 3..].find(':') {
        Some(colon_pos) => {
            let scheme_user = &auth_part[..scheme_end + 3 + colon_pos];
            format!("{scheme_user}:***@{host_part}")
        }
        None => url.to_string(),
    }
}
