//! Room repository for database operations.
//!
//! All queries filter on the owning user id; handlers never pass a room id
//! across tenants.

use sqlx::PgPool;

use gripen_core::{RoomId, UserId};

use super::RepositoryError;
use crate::models::Room;

/// Repository for room database operations.
pub struct RoomRepository<'a> {
    pool: &'a PgPool,
}

const ROOM_SELECT: &str = r"
    SELECT r.id, r.user_id, r.name, r.description,
           COUNT(b.id) AS box_count,
           r.created_at, r.updated_at
    FROM gripen.room r
    LEFT JOIN gripen.box b ON b.room_id = r.id
    WHERE r.user_id = $1
";

impl<'a> RoomRepository<'a> {
    /// Create a new room repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's rooms with live box counts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Room>, RepositoryError> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "{ROOM_SELECT} GROUP BY r.id ORDER BY r.created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rooms)
    }

    /// Get one of a user's rooms by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Option<Room>, RepositoryError> {
        let room =
            sqlx::query_as::<_, Room>(&format!("{ROOM_SELECT} AND r.id = $2 GROUP BY r.id"))
                .bind(user_id)
                .bind(room_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(room)
    }

    /// Create a room for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Room, RepositoryError> {
        let room = sqlx::query_as::<_, Room>(
            r"
            INSERT INTO gripen.room (user_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, description,
                      0::bigint AS box_count,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(room)
    }

    /// Delete a user's room.
    ///
    /// The delete refuses rooms that still hold boxes. The UI hides the
    /// delete button for such rooms, but the constraint is enforced here so
    /// a concurrent box creation cannot slip past it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the room still holds boxes.
    /// Returns `RepositoryError::NotFound` if the room doesn't exist for this user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, user_id: UserId, room_id: RoomId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM gripen.room r
            WHERE r.id = $1 AND r.user_id = $2
              AND NOT EXISTS (SELECT 1 FROM gripen.box b WHERE b.room_id = r.id)
            ",
        )
        .bind(room_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Distinguish "still has boxes" from "no such room".
        match self.get(user_id, room_id).await? {
            Some(_) => Err(RepositoryError::Conflict(
                "room still holds boxes".to_owned(),
            )),
            None => Err(RepositoryError::NotFound),
        }
    }
}
