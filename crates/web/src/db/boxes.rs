//! Box repository for database operations.
//!
//! Boxes are written document-style: creating or updating a box carries its
//! full ordered item list, and item replacement happens wholesale inside the
//! same transaction as the box row write.

use sqlx::{PgPool, Postgres, Transaction};

use gripen_core::{BoxId, RoomId, UserId};

use super::RepositoryError;
use crate::models::{BoxItem, BoxUpdate, BoxWithItems, NewBoxItem, StorageBox};

/// Repository for box database operations.
pub struct BoxRepository<'a> {
    pool: &'a PgPool,
}

const BOX_SELECT: &str = r"
    SELECT id, user_id, room_id, box_number, description, image_path,
           created_at, updated_at
    FROM gripen.box
    WHERE user_id = $1
";

impl<'a> BoxRepository<'a> {
    /// Create a new box repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all of a user's boxes across rooms, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BoxWithItems>, RepositoryError> {
        let boxes = sqlx::query_as::<_, StorageBox>(&format!(
            "{BOX_SELECT} ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_items(boxes).await
    }

    /// List a user's boxes in one room, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Vec<BoxWithItems>, RepositoryError> {
        let boxes = sqlx::query_as::<_, StorageBox>(&format!(
            "{BOX_SELECT} AND room_id = $2 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .bind(room_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_items(boxes).await
    }

    /// Fetch one of a user's boxes by id, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(
        &self,
        user_id: UserId,
        box_id: BoxId,
    ) -> Result<Option<BoxWithItems>, RepositoryError> {
        let storage_box =
            sqlx::query_as::<_, StorageBox>(&format!("{BOX_SELECT} AND id = $2"))
                .bind(user_id)
                .bind(box_id)
                .fetch_optional(self.pool)
                .await?;

        let Some(storage_box) = storage_box else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, BoxItem>(
            r"
            SELECT id, box_id, name, quantity, category, description, position
            FROM gripen.box_item
            WHERE box_id = $1
            ORDER BY position ASC
            ",
        )
        .bind(box_id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(BoxWithItems { storage_box, items }))
    }

    /// Create a box with its item list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        room_id: RoomId,
        box_number: &str,
        description: &str,
        image_path: Option<&str>,
        items: &[NewBoxItem],
    ) -> Result<BoxWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let storage_box = sqlx::query_as::<_, StorageBox>(
            r"
            INSERT INTO gripen.box (user_id, room_id, box_number, description, image_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, room_id, box_number, description, image_path,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(room_id)
        .bind(box_number)
        .bind(description)
        .bind(image_path)
        .fetch_one(&mut *tx)
        .await?;

        let items = insert_items(&mut tx, storage_box.id, items).await?;

        tx.commit().await?;

        Ok(BoxWithItems { storage_box, items })
    }

    /// Apply a partial box update; a present item list replaces the stored
    /// one wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the box doesn't exist for this user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        box_id: BoxId,
        update: &BoxUpdate,
    ) -> Result<BoxWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let storage_box = sqlx::query_as::<_, StorageBox>(
            r"
            UPDATE gripen.box
            SET room_id = COALESCE($3, room_id),
                box_number = COALESCE($4, box_number),
                description = COALESCE($5, description),
                image_path = COALESCE($6, image_path),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, room_id, box_number, description, image_path,
                      created_at, updated_at
            ",
        )
        .bind(box_id)
        .bind(user_id)
        .bind(update.room_id)
        .bind(update.box_number.as_deref())
        .bind(update.description.as_deref())
        .bind(update.image_path.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let items = if let Some(new_items) = &update.items {
            sqlx::query("DELETE FROM gripen.box_item WHERE box_id = $1")
                .bind(box_id)
                .execute(&mut *tx)
                .await?;
            insert_items(&mut tx, box_id, new_items).await?
        } else {
            sqlx::query_as::<_, BoxItem>(
                r"
                SELECT id, box_id, name, quantity, category, description, position
                FROM gripen.box_item
                WHERE box_id = $1
                ORDER BY position ASC
                ",
            )
            .bind(box_id)
            .fetch_all(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(BoxWithItems { storage_box, items })
    }

    /// Delete a user's box, returning its stored photo path if it had one so
    /// the caller can clean up the media file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the box doesn't exist for this user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        user_id: UserId,
        box_id: BoxId,
    ) -> Result<Option<String>, RepositoryError> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            r"
            DELETE FROM gripen.box
            WHERE id = $1 AND user_id = $2
            RETURNING image_path
            ",
        )
        .bind(box_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some((image_path,)) => Ok(image_path),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// Attach ordered items to a list of boxes with one array query.
    async fn attach_items(
        &self,
        boxes: Vec<StorageBox>,
    ) -> Result<Vec<BoxWithItems>, RepositoryError> {
        if boxes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = boxes.iter().map(|b| b.id.as_i32()).collect();
        let mut items = sqlx::query_as::<_, BoxItem>(
            r"
            SELECT id, box_id, name, quantity, category, description, position
            FROM gripen.box_item
            WHERE box_id = ANY($1)
            ORDER BY position ASC
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: std::collections::HashMap<BoxId, Vec<BoxItem>> =
            std::collections::HashMap::with_capacity(boxes.len());
        for item in items.drain(..) {
            grouped.entry(item.box_id).or_default().push(item);
        }

        Ok(boxes
            .into_iter()
            .map(|storage_box| {
                let items = grouped.remove(&storage_box.id).unwrap_or_default();
                BoxWithItems { storage_box, items }
            })
            .collect())
    }
}

/// Insert a box's items with sequential positions.
async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    box_id: BoxId,
    items: &[NewBoxItem],
) -> Result<Vec<BoxItem>, RepositoryError> {
    let mut inserted = Vec::with_capacity(items.len());
    for (position, item) in (0i32..).zip(items.iter()) {
        let row = sqlx::query_as::<_, BoxItem>(
            r"
            INSERT INTO gripen.box_item (box_id, name, quantity, category, description, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, box_id, name, quantity, category, description, position
            ",
        )
        .bind(box_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.category.as_deref())
        .bind(item.description.as_deref())
        .bind(position)
        .fetch_one(&mut **tx)
        .await?;
        inserted.push(row);
    }
    Ok(inserted)
}
