//! Database connection pool

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use appdrop_shared::config::DatabaseSettings;

pub async fn create_pool(url: &str, settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(url)
        .await
}

/// Creates the `brands` table and its lookup indexes when missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS brands (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            logo TEXT,
            office_address TEXT,
            domain TEXT NOT NULL,
            email TEXT,
            password_hash TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_brands_domain ON brands (LOWER(domain))")
        .execute(pool)
        .await?;
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_brands_email ON brands (LOWER(email))")
        .execute(pool)
        .await?;

    tracing::info!("brands schema ready");
    Ok(())
}
