use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbInterfaceError {
    #[error("Configuration error: {message}")]
    Config { message: String },
    #[error("Connection error: {message}")]
    Connection { message: String },
    #[error("Query execution error: {message} (sql: {sql})")]
    QueryExecution { sql: String, message: String },
}

impl DbInterfaceError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn query(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryExecution {
            sql: sql.into(),
            message: message.into(),
        }
    }
}
