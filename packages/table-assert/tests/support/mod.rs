#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use table_assert::{DatabaseInterface, DbInterfaceError, DbTestContext, ResultSet, Value};

/// In-memory stand-in that reports a fixed row count and logs every statement.
pub struct FixedCountDatabase {
    count: i64,
    statements: Mutex<Vec<(String, Vec<Value>)>>,
}

impl FixedCountDatabase {
    pub fn new(count: i64) -> Arc<Self> {
        Arc::new(Self {
            count,
            statements: Mutex::new(Vec::new()),
        })
    }

    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.statements.lock().expect("statement log poisoned").clone()
    }
}

#[async_trait]
impl DatabaseInterface for FixedCountDatabase {
    async fn execute_sql(
        &self,
        sql: &str,
        binds: Vec<Value>,
    ) -> Result<ResultSet, DbInterfaceError> {
        self.statements
            .lock()
            .expect("statement log poisoned")
            .push((sql.to_string(), binds));
        Ok(ResultSet::new(vec![vec![Value::BigInt(Some(self.count))]]))
    }
}

pub fn context_with_count(count: i64) -> (DbTestContext, Arc<FixedCountDatabase>) {
    let db = FixedCountDatabase::new(count);
    (DbTestContext::new(db.clone()), db)
}

pub fn current_thread_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build current-thread runtime")
}
