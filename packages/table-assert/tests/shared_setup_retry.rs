//! A failed first connection does not poison the process-wide context.

mod common;

use std::sync::Arc;

use table_assert::{ConnectParams, DbInterfaceError, Setup, TableAssertError};

#[tokio::test]
async fn test_failed_first_connection_is_retried() -> Result<(), TableAssertError> {
    let unreachable = ConnectParams::sqlite_file("/nonexistent-dir/for/sure/shared.db");

    let err = Setup::shared(&unreachable).await.unwrap_err();
    assert!(matches!(err, DbInterfaceError::Connection { .. }));

    let ctx = Setup::shared(&ConnectParams::sqlite_memory()).await?;
    ctx.database()
        .execute_sql("create table retries (id integer primary key)", Vec::new())
        .await?;

    // Once connected, the bad parameters are ignored
    let again = Setup::shared(&unreachable).await?;
    assert!(Arc::ptr_eq(ctx.database(), again.database()));
    again
        .assert_table_has_zero_rows("retries", None::<&str>, None)
        .await?;
    Ok(())
}
