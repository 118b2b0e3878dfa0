//! Custom assertion helpers for testing

use roommates_core::{Room, Roommate};

/// Assert rooms carry the same data, ignoring ids
pub fn assert_room_equals_ignoring_id(actual: &Room, expected: &Room) {
    assert_eq!(actual.name, expected.name, "Room names don't match");
    assert_eq!(
        actual.max_occupancy, expected.max_occupancy,
        "Room max occupancies don't match"
    );
}

/// Assert a room with exactly this id, name and occupancy is present
pub fn assert_contains_room(rooms: &[Room], expected: &Room) {
    assert!(
        rooms.iter().any(|room| room == expected),
        "Room {expected:?} not found in {rooms:?}"
    );
}

/// Assert no room carries the given id
pub fn assert_no_room_with_id(rooms: &[Room], id: i32) {
    assert!(
        rooms.iter().all(|room| room.id != id),
        "Room with id {id} still present in {rooms:?}"
    );
}

/// Assert every roommate has no resolved room
pub fn assert_rooms_unresolved(roommates: &[Roommate]) {
    for roommate in roommates {
        assert!(
            roommate.room.is_none(),
            "Roommate {} unexpectedly carries room {:?}",
            roommate.id,
            roommate.room
        );
    }
}

/// Assert every roommate lives in `room_id` and carries the joined room name
pub fn assert_all_in_room(roommates: &[Roommate], room_id: i32, room_name: &str) {
    for roommate in roommates {
        assert_eq!(
            roommate.room_id, room_id,
            "Roommate {} lives in a different room",
            roommate.id
        );
        let room = roommate
            .room
            .as_ref()
            .unwrap_or_else(|| panic!("Roommate {} has no joined room", roommate.id));
        assert_eq!(room.id, room_id, "Joined room id doesn't match");
        assert_eq!(room.name, room_name, "Joined room name doesn't match");
    }
}
