//! Database migration command.
//!
//! Applies the migrations under `crates/web/migrations/`. The web server never
//! migrates on startup; this command is the only path that alters the schema.

use sqlx::PgPool;

use super::CommandError;

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
