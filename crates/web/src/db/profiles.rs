//! Profile repository for database operations.
//!
//! The profile is created once at the end of onboarding and never
//! auto-deleted; its presence is what flips the access guard from the
//! onboarding page to the dashboard.

use sqlx::PgPool;

use gripen_core::UserId;

use super::RepositoryError;
use crate::models::{Profile, ProfileUpdate};

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the profile for a user, if onboarding has completed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            SELECT user_id, address, created_at, updated_at
            FROM gripen.profile
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Create the profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, address: &str) -> Result<Profile, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            INSERT INTO gripen.profile (user_id, address)
            VALUES ($1, $2)
            RETURNING user_id, address, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(address)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("profile already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(profile)
    }

    /// Apply a partial profile update.
    ///
    /// The display name lives on the user row, so an update touching both
    /// fields runs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<(), RepositoryError> {
        if update.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        if let Some(address) = &update.address {
            let result = sqlx::query(
                r"
                UPDATE gripen.profile
                SET address = $1, updated_at = now()
                WHERE user_id = $2
                ",
            )
            .bind(address)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound);
            }
        }

        if let Some(display_name) = &update.display_name {
            sqlx::query(
                r#"
                UPDATE gripen."user"
                SET display_name = $1, updated_at = now()
                WHERE id = $2
                "#,
            )
            .bind(display_name)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
