//! Builder pattern implementations for easy test data construction

use crate::fixtures::move_in_date;
use chrono::NaiveDateTime;
use roommates_core::{Room, Roommate};

/// Builder for constructing Room instances in tests
pub struct RoomBuilder {
    room: Room,
}

impl Default for RoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomBuilder {
    /// Create new builder with an unsaved default room
    pub fn new() -> Self {
        Self {
            room: Room::new("Test Room", 2),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.room.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.room.name = name.into();
        self
    }

    pub fn with_max_occupancy(mut self, max_occupancy: i32) -> Self {
        self.room.max_occupancy = max_occupancy;
        self
    }

    pub fn build(self) -> Room {
        self.room
    }
}

/// Builder for constructing Roommate instances in tests
pub struct RoommateBuilder {
    roommate: Roommate,
}

impl Default for RoommateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoommateBuilder {
    /// Create new builder with default values, living in room 1
    pub fn new() -> Self {
        Self {
            roommate: Roommate::new(1, "Test", "Roommate", 50, move_in_date(2020, 1, 1), 1),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.roommate.id = id;
        self
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.roommate.first_name = first_name.into();
        self.roommate.last_name = last_name.into();
        self
    }

    pub fn with_rent_portion(mut self, rent_portion: i32) -> Self {
        self.roommate.rent_portion = rent_portion;
        self
    }

    pub fn with_move_in_date(mut self, move_in_date: NaiveDateTime) -> Self {
        self.roommate.move_in_date = move_in_date;
        self
    }

    /// Set the room foreign key without resolving the room
    pub fn in_room(mut self, room_id: i32) -> Self {
        self.roommate.room_id = room_id;
        self
    }

    /// Set the room foreign key and attach the resolved room
    pub fn with_room(mut self, room: Room) -> Self {
        self.roommate.room_id = room.id;
        self.roommate.room = Some(room);
        self
    }

    pub fn build(self) -> Roommate {
        self.roommate
    }
}
