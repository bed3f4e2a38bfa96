use std::sync::Arc;

use db_interface::{ConnectParams, DbInterfaceError, SeaOrmInterface, SharedDatabase};
use tokio::sync::OnceCell;
use tracing::info;

use crate::assertions::DbTestContext;

/// Data-seeding helper that needs the same database handle as the assertions
pub trait DataFactory {
    fn set_database_interface(&mut self, db: SharedDatabase);
}

static SHARED: OnceCell<DbTestContext> = OnceCell::const_new();

/// Opens the test database and wires it into a [`DbTestContext`].
pub struct Setup;

impl Setup {
    /// Connects once and registers the handle with `factory` and the returned context.
    ///
    /// Connection failures propagate unchanged.
    pub async fn connect<F>(
        params: &ConnectParams,
        factory: &mut F,
    ) -> Result<DbTestContext, DbInterfaceError>
    where
        F: DataFactory + ?Sized,
    {
        let db: SharedDatabase = Arc::new(SeaOrmInterface::connect(params).await?);
        Ok(Self::with_interface(db, factory))
    }

    pub async fn connect_without_factory(
        params: &ConnectParams,
    ) -> Result<DbTestContext, DbInterfaceError> {
        let db: SharedDatabase = Arc::new(SeaOrmInterface::connect(params).await?);
        Ok(DbTestContext::new(db))
    }

    /// [`Setup::connect`] with parameters read by [`ConnectParams::from_env`].
    pub async fn from_env<F>(factory: &mut F) -> Result<DbTestContext, DbInterfaceError>
    where
        F: DataFactory + ?Sized,
    {
        let params = ConnectParams::from_env()?;
        Self::connect(&params, factory).await
    }

    /// Hands an existing interface to `factory` and wraps it in a context.
    pub fn with_interface<F>(db: SharedDatabase, factory: &mut F) -> DbTestContext
    where
        F: DataFactory + ?Sized,
    {
        factory.set_database_interface(Arc::clone(&db));
        DbTestContext::new(db)
    }

    /// Process-wide context, connected on first use.
    ///
    /// Later calls return the first context and ignore `params`. A failed
    /// first connection leaves the cell empty so the next call tries again.
    pub async fn shared(params: &ConnectParams) -> Result<DbTestContext, DbInterfaceError> {
        let ctx = SHARED
            .get_or_try_init(|| async {
                info!("setup=shared kind={:?}", params.kind);
                Self::connect_without_factory(params).await
            })
            .await?;
        Ok(ctx.clone())
    }
}
