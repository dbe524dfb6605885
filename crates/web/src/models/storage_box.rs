//! Cardboard box and item domain types.

use chrono::{DateTime, Utc};

use gripen_core::{BoxId, ItemId, RoomId, UserId};

/// A catalogued cardboard box.
///
/// The box number is a user-chosen label; it is not guaranteed unique.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StorageBox {
    /// Unique box ID.
    pub id: BoxId,
    /// Owning user ID.
    pub user_id: UserId,
    /// Room this box lives in.
    pub room_id: RoomId,
    /// User-chosen box label, e.g. "12".
    pub box_number: String,
    /// Free-text description of the contents.
    pub description: String,
    /// Relative media path of the box photo, if one was uploaded.
    pub image_path: Option<String>,
    /// When the box was created.
    pub created_at: DateTime<Utc>,
    /// When the box was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line entry inside a box.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoxItem {
    /// Unique item ID.
    pub id: ItemId,
    /// Box this item belongs to.
    pub box_id: BoxId,
    /// Item name.
    pub name: String,
    /// Quantity, taken as given (no clamping).
    pub quantity: i32,
    /// Optional category, e.g. "Books".
    pub category: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Position within the box's ordered item list.
    pub position: i32,
}

/// A box together with its ordered items, as the search and detail views
/// consume it.
#[derive(Debug, Clone)]
pub struct BoxWithItems {
    /// The box record.
    pub storage_box: StorageBox,
    /// Items ordered by position.
    pub items: Vec<BoxItem>,
}

/// A new item to write as part of a box create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoxItem {
    /// Item name.
    pub name: String,
    /// Quantity, taken as given.
    pub quantity: i32,
    /// Optional category.
    pub category: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial box update, validated before it reaches the database.
///
/// `items`, when present, replaces the box's item list wholesale inside one
/// transaction - the same shape as the original document-style write.
#[derive(Debug, Clone, Default)]
pub struct BoxUpdate {
    /// Move the box to another room.
    pub room_id: Option<RoomId>,
    /// New box label.
    pub box_number: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replace the stored photo path.
    pub image_path: Option<String>,
    /// Replace the full item list.
    pub items: Option<Vec<NewBoxItem>>,
}
