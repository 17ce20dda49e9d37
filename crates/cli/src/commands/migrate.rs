//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `SHIPPING_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Embedded from `crates/server/migrations/` at build time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use smart_shipping_server::db;

/// Errors from the migration commands.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn database_url() -> Result<SecretString, MigrationError> {
    dotenvy::dotenv().ok();

    std::env::var("SHIPPING_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("SHIPPING_DATABASE_URL"))
}

async fn connect() -> Result<PgPool, MigrationError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the URL is missing, the database is unreachable or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Log the migrations already recorded in `_sqlx_migrations`.
///
/// # Errors
///
/// Returns an error if the URL is missing or the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;

    let applied: Vec<(i64, String)> = sqlx::query_as(
        "SELECT version, description FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(&pool)
    .await
    .or_else(|e| match e {
        // Table is created by the first `migrate` run
        sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("42P01") => {
            Ok(Vec::new())
        }
        other => Err(other),
    })?;

    if applied.is_empty() {
        tracing::info!("No migrations applied yet");
    }
    for (version, description) in &applied {
        tracing::info!(version, description = %description, "Applied");
    }
    Ok(())
}
