//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Room names from a realistic pool
//! - Roommate names and rent portions
//! - Property-based testing strategies

use crate::fixtures::move_in_date;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use roommates_core::{Room, Roommate};

const ROOM_NAMES: [&str; 8] = [
    "Bathroom",
    "Lavatory",
    "Front Bedroom",
    "Back Bedroom",
    "Attic",
    "Basement",
    "Den",
    "Sunroom",
];

/// Generate a realistic room name
pub fn generate_room_name() -> String {
    ROOM_NAMES[rand::thread_rng().gen_range(0..ROOM_NAMES.len())].to_string()
}

/// Generate an unsaved room with realistic data
pub fn generate_room() -> Room {
    Room::new(generate_room_name(), (1..6).fake::<i32>())
}

/// Generate a roommate living in `room_id`
pub fn generate_roommate(id: i32, room_id: i32) -> Roommate {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let year: i32 = (2015..2025).fake();
    let month: u32 = (1..13).fake();
    let day: u32 = (1..29).fake();

    Roommate::new(
        id,
        first_name,
        last_name,
        (5..60).fake::<i32>(),
        move_in_date(year, month, day),
        room_id,
    )
}

/// Generate `count` roommates spread over the given rooms, ids starting at 1
pub fn generate_roommates(count: usize, rooms: &[Room]) -> Vec<Roommate> {
    if rooms.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| generate_roommate(i as i32 + 1, rooms[i % rooms.len()].id))
        .collect()
}

/// Proptest strategy for unsaved rooms
pub fn room_strategy() -> impl Strategy<Value = Room> {
    ("[A-Za-z][A-Za-z ]{0,29}", 0i32..50).prop_map(|(name, max)| Room::new(name, max))
}

/// Proptest strategy for a batch of unsaved rooms
pub fn rooms_strategy(max_len: usize) -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec(room_strategy(), 0..max_len)
}
