//! Mock implementations of the RoomRepository and RoommateRepository traits
//!
//! Both mocks provide:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Storage-order listing (ascending id, like a table scan)

use async_trait::async_trait;
use parking_lot::Mutex;
use roommates_core::{
    Result, Room, RoomRepository, Roommate, RoommateRepository, RoommatesError,
};
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

/// Shared error injection and call history
#[derive(Default)]
struct Instrumentation {
    error_injection: Mutex<Option<RoommatesError>>,
    call_history: Mutex<Vec<String>>,
}

impl Instrumentation {
    fn check_error_injection(&self) -> Result<()> {
        if let Some(error) = self.error_injection.lock().take() {
            return Err(error);
        }
        Ok(())
    }

    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }

    fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }
}

/// In-memory RoomRepository for testing
///
/// Ids are handed out from a counter and never reused, like an identity column.
#[derive(Clone)]
pub struct MockRoomRepository {
    rooms: Arc<Mutex<BTreeMap<i32, Room>>>,
    next_id: Arc<AtomicI32>,
    instrumentation: Arc<Instrumentation>,
}

impl Default for MockRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRoomRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_rooms(Vec::new())
    }

    /// Create mock repository with pre-populated rooms
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let max_id = rooms.iter().map(|room| room.id).max().unwrap_or(0);
        let rooms = rooms.into_iter().map(|room| (room.id, room)).collect();

        Self {
            rooms: Arc::new(Mutex::new(rooms)),
            next_id: Arc::new(AtomicI32::new(max_id + 1)),
            instrumentation: Arc::new(Instrumentation::default()),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: RoommatesError) {
        *self.instrumentation.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.instrumentation.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.instrumentation.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.instrumentation.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        self.instrumentation.assert_called(method);
    }

    /// Snapshot of the stored rooms
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.lock().values().cloned().collect()
    }
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn get_all(&self) -> Result<Vec<Room>> {
        self.instrumentation.record_call("get_all");
        self.instrumentation.check_error_injection()?;

        Ok(self.rooms())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Room>> {
        self.instrumentation
            .record_call_with_params("get_by_id", &format!("id={id}"));
        self.instrumentation.check_error_injection()?;

        Ok(self.rooms.lock().get(&id).cloned())
    }

    async fn insert(&self, room: &mut Room) -> Result<()> {
        self.instrumentation
            .record_call_with_params("insert", &format!("name={}", room.name));
        self.instrumentation.check_error_injection()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        room.id = id;
        self.rooms.lock().insert(id, room.clone());

        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<u64> {
        self.instrumentation
            .record_call_with_params("update", &format!("id={}", room.id));
        self.instrumentation.check_error_injection()?;

        let mut rooms = self.rooms.lock();
        match rooms.get_mut(&room.id) {
            Some(stored) => {
                stored.name = room.name.clone();
                stored.max_occupancy = room.max_occupancy;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        self.instrumentation
            .record_call_with_params("delete", &format!("id={id}"));
        self.instrumentation.check_error_injection()?;

        Ok(u64::from(self.rooms.lock().remove(&id).is_some()))
    }
}

/// In-memory RoommateRepository for testing
///
/// Holds its own copy of the rooms so the join can be resolved.
#[derive(Clone)]
pub struct MockRoommateRepository {
    roommates: Arc<Mutex<BTreeMap<i32, Roommate>>>,
    rooms: Arc<Mutex<BTreeMap<i32, Room>>>,
    instrumentation: Arc<Instrumentation>,
}

impl Default for MockRoommateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRoommateRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_household(Vec::new(), Vec::new())
    }

    /// Create mock repository with rooms and the roommates living in them
    pub fn with_household(rooms: Vec<Room>, roommates: Vec<Roommate>) -> Self {
        Self {
            roommates: Arc::new(Mutex::new(
                roommates.into_iter().map(|r| (r.id, r)).collect(),
            )),
            rooms: Arc::new(Mutex::new(
                rooms.into_iter().map(|room| (room.id, room)).collect(),
            )),
            instrumentation: Arc::new(Instrumentation::default()),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: RoommatesError) {
        *self.instrumentation.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.instrumentation.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.instrumentation.call_history.lock().clone()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        self.instrumentation.assert_called(method);
    }
}

#[async_trait]
impl RoommateRepository for MockRoommateRepository {
    async fn get_all(&self) -> Result<Vec<Roommate>> {
        self.instrumentation.record_call("get_all");
        self.instrumentation.check_error_injection()?;

        Ok(self
            .roommates
            .lock()
            .values()
            .cloned()
            .map(|mut roommate| {
                roommate.room = None;
                roommate
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Roommate>> {
        self.instrumentation
            .record_call_with_params("get_by_id", &format!("id={id}"));
        self.instrumentation.check_error_injection()?;

        Ok(self.roommates.lock().get(&id).cloned().map(|mut roommate| {
            roommate.room = None;
            roommate
        }))
    }

    async fn get_all_with_room(&self, room_id: i32) -> Result<Vec<Roommate>> {
        self.instrumentation
            .record_call_with_params("get_all_with_room", &format!("room_id={room_id}"));
        self.instrumentation.check_error_injection()?;

        // Inner join: no room, no rows.
        let room = match self.rooms.lock().get(&room_id).cloned() {
            Some(room) => room,
            None => return Ok(Vec::new()),
        };

        Ok(self
            .roommates
            .lock()
            .values()
            .filter(|roommate| roommate.room_id == room_id)
            .cloned()
            .map(|roommate| roommate.with_room(room.clone()))
            .collect())
    }
}
