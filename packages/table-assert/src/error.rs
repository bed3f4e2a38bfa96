use std::fmt;

use db_interface::DbInterfaceError;
use thiserror::Error;

use crate::condition::Condition;

#[derive(Debug, Error)]
pub enum TableAssertError {
    /// The count query could not be run or its result was not a count
    #[error(transparent)]
    Database(#[from] DbInterfaceError),
    #[error("{0}")]
    Mismatch(RowCountMismatch),
}

impl TableAssertError {
    pub fn mismatch(&self) -> Option<&RowCountMismatch> {
        match self {
            Self::Mismatch(mismatch) => Some(mismatch),
            Self::Database(_) => None,
        }
    }
}

/// Details of a failed row-count assertion.
///
/// Renders as `A count of <expected> was expected but was <actual> for <table> <condition>`,
/// preceded by the caller's message on its own line when one was given.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCountMismatch {
    pub table: String,
    pub expected: u64,
    pub actual: u64,
    pub condition: Condition,
    pub message: Option<String>,
}

impl fmt::Display for RowCountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(head) = self.message.as_deref().filter(|m| !m.is_empty()) {
            f.write_str(head)?;
            if !head.ends_with('.') {
                f.write_str(".")?;
            }
            f.write_str("\n")?;
        }
        write!(
            f,
            "A count of <{}> was expected but was <{}> for <{}> <{}>",
            self.expected, self.actual, self.table, self.condition
        )
    }
}
