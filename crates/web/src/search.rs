//! In-memory search and aggregation over a user's boxes.
//!
//! The room detail and all-boxes views load the full box list for the user
//! and filter it here, client-side of the database. Matching is plain
//! case-insensitive substring with no ranking.

use std::collections::{HashMap, HashSet};

use gripen_core::RoomId;

use crate::models::BoxWithItems;

/// Room constraint applied alongside the free-text term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomScope {
    /// No room constraint.
    All,
    /// Only boxes in this room.
    Room(RoomId),
}

impl RoomScope {
    fn matches(self, room_id: RoomId) -> bool {
        match self {
            Self::All => true,
            Self::Room(id) => id == room_id,
        }
    }
}

/// Whether a single box matches the search term.
///
/// Any of the box number, description, resolved room name, or a contained
/// item's name or category matching includes the box. An empty term matches
/// everything.
fn matches_term(b: &BoxWithItems, term: &str, room_names: &HashMap<RoomId, String>) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    let contains = |s: &str| s.to_lowercase().contains(&term);

    contains(&b.storage_box.box_number)
        || contains(&b.storage_box.description)
        || room_names
            .get(&b.storage_box.room_id)
            .is_some_and(|name| contains(name))
        || b.items.iter().any(|item| {
            contains(&item.name) || item.category.as_deref().is_some_and(contains)
        })
}

/// Filter boxes by free-text term and room scope.
///
/// The term match and the scope are combined with a logical AND; the scope is
/// strict equality on room id, bypassed by [`RoomScope::All`].
pub fn filter_boxes<'a>(
    boxes: &'a [BoxWithItems],
    term: &str,
    scope: RoomScope,
    room_names: &HashMap<RoomId, String>,
) -> Vec<&'a BoxWithItems> {
    boxes
        .iter()
        .filter(|b| matches_term(b, term, room_names) && scope.matches(b.storage_box.room_id))
        .collect()
}

/// Total quantity across all items in a box.
#[must_use]
pub fn item_count(b: &BoxWithItems) -> i64 {
    b.items.iter().map(|item| i64::from(item.quantity)).sum()
}

/// Number of distinct item categories in a box.
///
/// Items without a category collapse into one extra group, matching the
/// original behavior of a uniqueness set that includes the absent sentinel.
#[must_use]
pub fn category_count(b: &BoxWithItems) -> usize {
    b.items
        .iter()
        .map(|item| item.category.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use gripen_core::{BoxId, ItemId, UserId};

    use super::*;
    use crate::models::{BoxItem, StorageBox};

    fn item(box_id: i32, id: i32, name: &str, quantity: i32, category: Option<&str>) -> BoxItem {
        BoxItem {
            id: ItemId::new(id),
            box_id: BoxId::new(box_id),
            name: name.to_owned(),
            quantity,
            category: category.map(str::to_owned),
            description: None,
            position: id,
        }
    }

    fn boxed(id: i32, room: i32, number: &str, description: &str, items: Vec<BoxItem>) -> BoxWithItems {
        let now = Utc::now();
        BoxWithItems {
            storage_box: StorageBox {
                id: BoxId::new(id),
                user_id: UserId::new(1),
                room_id: RoomId::new(room),
                box_number: number.to_owned(),
                description: description.to_owned(),
                image_path: None,
                created_at: now,
                updated_at: now,
            },
            items,
        }
    }

    fn room_names() -> HashMap<RoomId, String> {
        let mut names = HashMap::new();
        names.insert(RoomId::new(1), "Living Room".to_owned());
        names.insert(RoomId::new(2), "Garage".to_owned());
        names
    }

    fn sample() -> Vec<BoxWithItems> {
        vec![
            boxed(
                1,
                1,
                "1",
                "Books and documents",
                vec![
                    item(1, 1, "Old books", 15, Some("Books")),
                    item(1, 2, "Magazines", 8, Some("Reading")),
                ],
            ),
            boxed(
                2,
                2,
                "12",
                "Tools",
                vec![item(2, 3, "Drill", 1, Some("Tools"))],
            ),
        ]
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let boxes = sample();
        let hits = filter_boxes(&boxes, "", RoomScope::All, &room_names());
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_term_matches_box_number() {
        let boxes = sample();
        let hits = filter_boxes(&boxes, "12", RoomScope::All, &room_names());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].storage_box.id, BoxId::new(2));
    }

    #[test]
    fn test_term_matches_description_case_insensitive() {
        let boxes = sample();
        let hits = filter_boxes(&boxes, "BOOKS AND", RoomScope::All, &room_names());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].storage_box.id, BoxId::new(1));
    }

    #[test]
    fn test_term_matches_room_name() {
        let boxes = sample();
        let hits = filter_boxes(&boxes, "garage", RoomScope::All, &room_names());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].storage_box.id, BoxId::new(2));
    }

    #[test]
    fn test_term_matches_item_name_and_category() {
        let boxes = sample();
        let by_name = filter_boxes(&boxes, "drill", RoomScope::All, &room_names());
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].storage_box.id, BoxId::new(2));

        let by_category = filter_boxes(&boxes, "reading", RoomScope::All, &room_names());
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].storage_box.id, BoxId::new(1));
    }

    #[test]
    fn test_unknown_room_name_is_not_a_match() {
        let boxes = sample();
        // No entry for room 1 or 2: only number/description/item fields can hit.
        let hits = filter_boxes(&boxes, "living", RoomScope::All, &HashMap::new());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_scope_is_strict_equality() {
        let boxes = sample();
        let hits = filter_boxes(&boxes, "", RoomScope::Room(RoomId::new(2)), &room_names());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].storage_box.room_id, RoomId::new(2));

        // A text match in the wrong room is still excluded.
        let hits = filter_boxes(
            &boxes,
            "drill",
            RoomScope::Room(RoomId::new(1)),
            &room_names(),
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let b = boxed(
            1,
            1,
            "1",
            "",
            vec![item(1, 1, "a", 3, None), item(1, 2, "b", 2, None)],
        );
        assert_eq!(item_count(&b), 5);

        let empty = boxed(2, 1, "2", "", vec![]);
        assert_eq!(item_count(&empty), 0);
    }

    #[test]
    fn test_category_count_collapses_absent_categories() {
        let b = boxed(
            1,
            1,
            "1",
            "",
            vec![
                item(1, 1, "a", 1, Some("Books")),
                item(1, 2, "b", 1, Some("Books")),
                item(1, 3, "c", 1, None),
            ],
        );
        // One named category plus one group for the uncategorized item.
        assert_eq!(category_count(&b), 2);
    }
}
