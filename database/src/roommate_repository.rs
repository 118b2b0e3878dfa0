use crate::{
    common::{row_to_roommate, row_to_roommate_with_room, sqlx_error_to_roommates_error},
    connection::{ConnectionProvider, DatabaseConfig},
};
use async_trait::async_trait;
use roommates_core::{error::Result, models::Roommate, repository::RoommateRepository};
use tracing::instrument;

const SELECT_ALL_ROOMMATES: &str =
    "SELECT Id, FirstName, LastName, RentPortion, MoveInDate, RoomId FROM Roommate";

const SELECT_ROOMMATE_BY_ID: &str =
    "SELECT Id, FirstName, LastName, RentPortion, MoveInDate, RoomId FROM Roommate WHERE Id = ?";

const SELECT_ROOMMATES_WITH_ROOM: &str = r#"
    SELECT roommate.Id AS Id,
           roommate.FirstName AS FirstName,
           roommate.LastName AS LastName,
           roommate.RentPortion AS RentPortion,
           roommate.MoveInDate AS MoveInDate,
           roommate.RoomId AS RoomId,
           room.Name AS RoomName,
           room.MaxOccupancy AS RoomMaxOccupancy
    FROM Roommate roommate
    JOIN Room room ON roommate.RoomId = room.Id
    WHERE roommate.RoomId = ?
"#;

/// SQLite implementation of the RoommateRepository trait
///
/// Read-only: roommates are created and changed outside this crate.
#[derive(Debug, Clone)]
pub struct SqliteRoommateRepository {
    provider: ConnectionProvider,
}

impl SqliteRoommateRepository {
    /// Create a repository that connects with the given settings
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            provider: ConnectionProvider::new(config)?,
        })
    }

    /// Create a repository sharing an existing provider
    pub fn with_provider(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }
}

#[async_trait]
impl RoommateRepository for SqliteRoommateRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Roommate>> {
        let mut conn = self.provider.open().await?;

        let rows = sqlx::query(SELECT_ALL_ROOMMATES)
            .fetch_all(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;
        tracing::debug!(rows = rows.len(), "Fetched roommates");

        rows.iter().map(row_to_roommate).collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<Roommate>> {
        let mut conn = self.provider.open().await?;

        // At most one row; the cursor is not iterated further.
        let row = sqlx::query(SELECT_ROOMMATE_BY_ID)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;

        match row {
            Some(row) => Ok(Some(row_to_roommate(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn get_all_with_room(&self, room_id: i32) -> Result<Vec<Roommate>> {
        let mut conn = self.provider.open().await?;

        let rows = sqlx::query(SELECT_ROOMMATES_WITH_ROOM)
            .bind(room_id)
            .fetch_all(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;
        tracing::debug!(rows = rows.len(), "Fetched roommates with room");

        rows.iter()
            .map(|row| row_to_roommate_with_room(row, room_id))
            .collect()
    }
}
