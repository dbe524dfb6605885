//! Room domain type.

use chrono::{DateTime, Utc};

use gripen_core::{RoomId, UserId};

/// A named storage location owned by one user.
///
/// `box_count` is always recomputed from a live count of the room's boxes at
/// query time; it is never stored, so it cannot drift from the box table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Room {
    /// Unique room ID.
    pub id: RoomId,
    /// Owning user ID.
    pub user_id: UserId,
    /// Room name, e.g. "Living Room".
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Live count of boxes in this room.
    pub box_count: i64,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// A room with boxes in it cannot be deleted.
    #[must_use]
    pub const fn deletable(&self) -> bool {
        self.box_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(box_count: i64) -> Room {
        let now = Utc::now();
        Room {
            id: RoomId::new(1),
            user_id: UserId::new(1),
            name: "Attic".to_owned(),
            description: None,
            box_count,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_room_is_deletable() {
        assert!(room(0).deletable());
    }

    #[test]
    fn test_room_with_boxes_is_not_deletable() {
        assert!(!room(1).deletable());
    }
}
