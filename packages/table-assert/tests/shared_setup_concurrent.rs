//! Concurrent first calls share a single process-wide context.

mod common;

use std::sync::Arc;

use table_assert::{Condition, ConnectParams, Setup, TableAssertError};

const CALLERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_connect_once() -> Result<(), TableAssertError> {
    let handles: Vec<_> = (0..CALLERS)
        .map(|_| tokio::spawn(async { Setup::shared(&ConnectParams::sqlite_memory()).await }))
        .collect();

    let mut contexts = Vec::with_capacity(CALLERS);
    for handle in handles {
        contexts.push(handle.await.expect("setup task panicked")?);
    }

    let first = &contexts[0];
    for ctx in &contexts[1..] {
        assert!(Arc::ptr_eq(first.database(), ctx.database()));
    }

    first
        .database()
        .execute_sql("create table callers (id integer primary key)", Vec::new())
        .await?;
    for (id, ctx) in contexts.iter().enumerate() {
        ctx.database()
            .execute_sql("insert into callers (id) values (?)", vec![(id as i64).into()])
            .await?;
    }
    first
        .assert_table_has_many_rows("callers", CALLERS as u64, Condition::None, None)
        .await?;
    Ok(())
}

