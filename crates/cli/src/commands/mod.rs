//! CLI command implementations.

pub mod migrate;
pub mod seed;

/// Errors shared by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Auth error: {0}")]
    Auth(#[from] gripen_web::services::auth::AuthError),

    #[error("Repository error: {0}")]
    Repository(#[from] gripen_web::db::RepositoryError),
}

/// Read the database URL, preferring `GRIPEN_DATABASE_URL`.
pub(crate) fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("GRIPEN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("GRIPEN_DATABASE_URL"))
}
