use crate::{
    error::Result,
    models::{Room, Roommate},
};
use async_trait::async_trait;

/// Repository trait for Room persistence
///
/// Every call is an independent round trip: implementations open a
/// connection, run one statement and release the connection before
/// returning. Nothing is cached between calls.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// List every room in storage order
    ///
    /// # Returns
    /// * `Ok(Vec<Room>)` - All rooms (may be empty)
    /// * `Err(RoommatesError::Connection)` - If the database cannot be reached
    /// * `Err(RoommatesError::Statement)` - If the query fails
    /// * `Err(RoommatesError::Mapping)` - If a row cannot be mapped
    async fn get_all(&self) -> Result<Vec<Room>>;

    /// Get a single room by id
    ///
    /// # Returns
    /// * `Ok(Some(Room))` - The room if found
    /// * `Ok(None)` - If no room exists with that id
    async fn get_by_id(&self, id: i32) -> Result<Option<Room>>;

    /// Insert a room and write the generated id back into `room`
    ///
    /// Name and max occupancy are bound as parameters; nothing is validated.
    ///
    /// # Returns
    /// * `Ok(())` - `room.id` now holds the storage-generated id
    /// * `Err(RoommatesError::Statement)` - If the insert is rejected
    async fn insert(&self, room: &mut Room) -> Result<()>;

    /// Overwrite name and max occupancy of the room with `room.id`
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows changed; `0` when the id matches nothing,
    ///   which is not an error
    async fn update(&self, room: &Room) -> Result<u64>;

    /// Delete the room with the given id
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows removed; `0` when the id matches nothing,
    ///   which is not an error
    /// * `Err(RoommatesError::Statement)` - If a roommate still references the room
    async fn delete(&self, id: i32) -> Result<u64>;
}

/// Read-only repository trait for Roommate records
#[async_trait]
pub trait RoommateRepository: Send + Sync {
    /// List every roommate in storage order, with `room` left unset
    async fn get_all(&self) -> Result<Vec<Roommate>>;

    /// Get a single roommate by id, with `room` left unset
    ///
    /// # Returns
    /// * `Ok(Some(Roommate))` - The roommate if found
    /// * `Ok(None)` - If no roommate exists with that id
    async fn get_by_id(&self, id: i32) -> Result<Option<Roommate>>;

    /// List the roommates living in `room_id`, each with the joined room attached
    ///
    /// # Returns
    /// * `Ok(Vec<Roommate>)` - One entry per roommate in the room (may be empty)
    async fn get_all_with_room(&self, room_id: i32) -> Result<Vec<Roommate>>;
}
