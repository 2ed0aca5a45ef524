//! Postgres connection pool factory and module migration runner.

use anyhow::Context;
use shelf_kernel::{settings::DatabaseSettings, Migration};
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Bookkeeping table recording which module migrations already ran.
const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations ( \
     module TEXT NOT NULL, \
     id TEXT NOT NULL, \
     applied_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
     PRIMARY KEY (module, id) \
 )";

/// Create a connection pool from the database settings.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply module migrations that have not run yet.
///
/// Each migration runs inside its own transaction together with its
/// bookkeeping row, so a failed migration leaves no trace.
pub async fn apply_migrations(
    pool: &DbPool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<usize> {
    sqlx::raw_sql(MIGRATIONS_TABLE)
        .execute(pool)
        .await
        .context("failed to create schema_migrations table")?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<(String,)> =
            sqlx::query_as("SELECT id FROM schema_migrations WHERE module = $1 AND id = $2")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await
                .with_context(|| format!("failed to look up migration {module}/{}", migration.id))?;

        if already.is_some() {
            tracing::debug!(module = %module, migration = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await.context("failed to open migration transaction")?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration {module}/{} failed", migration.id))?;
        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES ($1, $2)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to record migration {module}/{}", migration.id))?;
        tx.commit()
            .await
            .with_context(|| format!("failed to commit migration {module}/{}", migration.id))?;

        tracing::info!(module = %module, migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
