//! Integration tests for Gripen Storage.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gripen-integration-tests
//! ```
//!
//! These tests exercise the crates' public APIs in-process. They cover the
//! search and aggregation pipeline, the access guard, and the media store,
//! without requiring a running server or a live database.

use chrono::Utc;

use gripen_core::{BoxId, ItemId, RoomId, UserId};
use gripen_web::models::{BoxItem, BoxWithItems, StorageBox};

/// The user id every fixture belongs to.
pub const TEST_USER: UserId = UserId::new(1);

/// Build a box fixture with the given items.
#[must_use]
pub fn make_box(
    id: i32,
    room_id: i32,
    box_number: &str,
    description: &str,
    items: &[(&str, i32, Option<&str>)],
) -> BoxWithItems {
    let now = Utc::now();
    let box_id = BoxId::new(id);

    let items = items
        .iter()
        .enumerate()
        .map(|(position, (name, quantity, category))| BoxItem {
            id: ItemId::new(i32::try_from(position).unwrap_or(0) + 1),
            box_id,
            name: (*name).to_owned(),
            quantity: *quantity,
            category: category.map(str::to_owned),
            description: None,
            position: i32::try_from(position).unwrap_or(0),
        })
        .collect();

    BoxWithItems {
        storage_box: StorageBox {
            id: box_id,
            user_id: TEST_USER,
            room_id: RoomId::new(room_id),
            box_number: box_number.to_owned(),
            description: description.to_owned(),
            image_path: None,
            created_at: now,
            updated_at: now,
        },
        items,
    }
}
