use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry).context("failed to initialize telemetry")?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        port = settings.server.port,
        "shelf-app bootstrap starting"
    );

    let (store, pool) = shelf_app::connect_store(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    shelf_app::register_all(&mut registry, store);

    if let Some(pool) = &pool {
        let applied = shelf_db::apply_migrations(pool, &registry.collect_migrations())
            .await
            .context("failed to apply migrations")?;
        tracing::info!(applied, "database migrations up to date");
    }

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("shelf-app bootstrap complete");
    let served = shelf_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    if let Some(pool) = pool {
        pool.close().await;
    }

    served
}
