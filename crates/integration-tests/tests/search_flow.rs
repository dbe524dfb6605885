//! End-to-end search and aggregation scenarios over a realistic household.

use std::collections::HashMap;

use gripen_core::RoomId;
use gripen_integration_tests::make_box;
use gripen_web::search::{RoomScope, category_count, filter_boxes, item_count};

fn household() -> (Vec<gripen_web::models::BoxWithItems>, HashMap<RoomId, String>) {
    let boxes = vec![
        make_box(
            1,
            10,
            "12",
            "Tools and hardware",
            &[
                ("Drill", 1, Some("Tools")),
                ("Screwdriver set", 1, Some("Tools")),
                ("Assorted screws", 200, Some("Hardware")),
            ],
        ),
        make_box(
            2,
            10,
            "13",
            "Camping gear",
            &[("Tent", 1, Some("Outdoor")), ("Sleeping bags", 3, Some("Outdoor"))],
        ),
        make_box(
            3,
            20,
            "21",
            "Winter clothes",
            &[
                ("Wool sweaters", 8, Some("Clothing")),
                ("Mystery scarf", 1, None),
            ],
        ),
    ];

    let mut room_names = HashMap::new();
    room_names.insert(RoomId::new(10), "Garage".to_owned());
    room_names.insert(RoomId::new(20), "Attic".to_owned());

    (boxes, room_names)
}

#[test]
fn test_item_search_finds_box_across_rooms() {
    let (boxes, room_names) = household();

    let hits = filter_boxes(&boxes, "drill", RoomScope::All, &room_names);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].storage_box.box_number, "12");
}

#[test]
fn test_room_name_search_matches_every_box_in_room() {
    let (boxes, room_names) = household();

    let hits = filter_boxes(&boxes, "garage", RoomScope::All, &room_names);
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_room_scope_excludes_other_rooms() {
    let (boxes, room_names) = household();

    // "s" appears in every box somewhere; scope narrows it to one room.
    let hits = filter_boxes(&boxes, "s", RoomScope::Room(RoomId::new(20)), &room_names);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].storage_box.box_number, "21");
}

#[test]
fn test_empty_term_returns_all_in_scope() {
    let (boxes, room_names) = household();

    let all = filter_boxes(&boxes, "", RoomScope::All, &room_names);
    assert_eq!(all.len(), 3);

    let garage = filter_boxes(&boxes, "", RoomScope::Room(RoomId::new(10)), &room_names);
    assert_eq!(garage.len(), 2);
}

#[test]
fn test_category_search_is_case_insensitive() {
    let (boxes, room_names) = household();

    let hits = filter_boxes(&boxes, "CLOTHING", RoomScope::All, &room_names);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].storage_box.box_number, "21");
}

#[test]
fn test_aggregations_over_search_hits() {
    let (boxes, room_names) = household();

    let hits = filter_boxes(&boxes, "tools", RoomScope::All, &room_names);
    assert_eq!(hits.len(), 1);

    // 1 drill + 1 screwdriver set + 200 screws.
    assert_eq!(item_count(hits[0]), 202);
    // Tools and Hardware.
    assert_eq!(category_count(hits[0]), 2);
}

#[test]
fn test_uncategorized_items_count_as_one_group() {
    let (boxes, room_names) = household();

    let hits = filter_boxes(&boxes, "winter", RoomScope::All, &room_names);
    assert_eq!(hits.len(), 1);

    // Clothing plus the uncategorized group.
    assert_eq!(category_count(hits[0]), 2);
    assert_eq!(item_count(hits[0]), 9);
}
