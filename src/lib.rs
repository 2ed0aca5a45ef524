//! SHELF application library
//!
//! Book library CRUD and URL cleanup, packaged as kernel modules.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;

use std::sync::Arc;

use anyhow::Context;
use shelf_db::DbPool;
use shelf_kernel::settings::{DatabaseSettings, StorageBackend};

use books::{InMemoryBookStore, PgBookStore, SharedBookStore};

/// Open the configured book store. The pool is returned alongside when the
/// backend is Postgres so the caller can run migrations and close it.
pub async fn connect_store(
    settings: &DatabaseSettings,
) -> anyhow::Result<(SharedBookStore, Option<DbPool>)> {
    match settings.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory book store; data is lost on restart");
            Ok((Arc::new(InMemoryBookStore::new()), None))
        }
        StorageBackend::Postgres => {
            let pool = shelf_db::create_pool(settings)
                .await
                .context("failed to connect to database")?;
            shelf_db::health_check(&pool)
                .await
                .context("database health check failed")?;
            tracing::info!("database connection pool created");

            Ok((Arc::new(PgBookStore::new(pool.clone())), Some(pool)))
        }
    }
}
