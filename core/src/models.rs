use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical space that roommates can be assigned to.
///
/// The `id` is generated by storage on insert and never changes afterwards.
/// A room that has not been stored yet carries id `0`.
///
/// # Examples
///
/// ```rust
/// use roommates_core::models::Room;
///
/// let room = Room::new("Bathroom", 3);
/// assert_eq!(room.id, 0);
/// assert!(!room.is_persisted());
/// assert_eq!(room.to_string(), "0 Bathroom 3");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    /// Storage-generated primary key
    pub id: i32,
    /// Display name of the room
    pub name: String,
    /// Maximum number of occupants
    pub max_occupancy: i32,
}

impl Room {
    /// Create a room that has not been inserted yet
    pub fn new(name: impl Into<String>, max_occupancy: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            max_occupancy,
        }
    }

    /// Create a room with a known storage id
    pub fn with_id(id: i32, name: impl Into<String>, max_occupancy: i32) -> Self {
        Self {
            id,
            name: name.into(),
            max_occupancy,
        }
    }

    /// Whether storage has assigned an id to this room
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.name, self.max_occupancy)
    }
}

/// A person living in one room.
///
/// `room` is only populated by the join query
/// ([`RoommateRepository::get_all_with_room`](crate::repository::RoommateRepository::get_all_with_room));
/// every other read leaves it `None` and the association is carried by `room_id` alone.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use roommates_core::models::Roommate;
///
/// let move_in = NaiveDate::from_ymd_opt(2020, 1, 15)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let roommate = Roommate::new(1, "Jenna", "Solis", 20, move_in, 3);
/// assert!(roommate.room.is_none());
/// assert_eq!(roommate.full_name(), "Jenna Solis");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roommate {
    /// Storage-generated primary key
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Share of the rent, in percent
    pub rent_portion: i32,
    pub move_in_date: NaiveDateTime,
    /// Foreign key to [`Room::id`]
    pub room_id: i32,
    /// Joined room, present only when resolved by the join query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl Roommate {
    /// Create a roommate record without a resolved room
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        rent_portion: i32,
        move_in_date: NaiveDateTime,
        room_id: i32,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            rent_portion,
            move_in_date,
            room_id,
            room: None,
        }
    }

    /// Attach the resolved room
    pub fn with_room(mut self, room: Room) -> Self {
        self.room = Some(room);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name of the joined room, if it was resolved
    pub fn room_name(&self) -> Option<&str> {
        self.room.as_ref().map(|room| room.name.as_str())
    }
}

impl fmt::Display for Roommate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.first_name, self.last_name, self.rent_portion, self.move_in_date
        )?;
        if let Some(room) = &self.room {
            write!(f, " {}", room.name)?;
        }
        Ok(())
    }
}
