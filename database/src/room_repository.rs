use crate::{
    common::{row_to_room, sqlx_error_to_roommates_error},
    connection::{ConnectionProvider, DatabaseConfig},
};
use async_trait::async_trait;
use roommates_core::{error::Result, models::Room, repository::RoomRepository};
use tracing::instrument;

const SELECT_ALL_ROOMS: &str = "SELECT Id, Name, MaxOccupancy FROM Room";

const SELECT_ROOM_BY_ID: &str = "SELECT Id, Name, MaxOccupancy FROM Room WHERE Id = ?";

const INSERT_ROOM: &str = r#"
    INSERT INTO Room (Name, MaxOccupancy)
    VALUES (?, ?)
    RETURNING Id
"#;

const UPDATE_ROOM: &str = r#"
    UPDATE Room
    SET Name = ?,
        MaxOccupancy = ?
    WHERE Id = ?
"#;

const DELETE_ROOM: &str = "DELETE FROM Room WHERE Id = ?";

/// SQLite implementation of the RoomRepository trait
///
/// Holds a [`ConnectionProvider`] and opens one connection per call.
#[derive(Debug, Clone)]
pub struct SqliteRoomRepository {
    provider: ConnectionProvider,
}

impl SqliteRoomRepository {
    /// Create a repository that connects with the given settings
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::{DatabaseConfig, SqliteRoomRepository};
    /// use roommates_core::{Room, RoomRepository};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let repo = SqliteRoomRepository::new(&DatabaseConfig::new("sqlite://roommates.sqlite"))?;
    ///
    /// let mut bathroom = Room::new("Bathroom", 3);
    /// repo.insert(&mut bathroom).await?;
    /// println!("Added the new Room with id {}", bathroom.id);
    /// # Ok(())
    /// # }
    /// ```
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
impl RoomRepository for SqliteRoomRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Room>> {
        let mut conn = self.provider.open().await?;

        let rows = sqlx::query(SELECT_ALL_ROOMS)
            .fetch_all(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;
        tracing::debug!(rows = rows.len(), "Fetched rooms");

        rows.iter().map(row_to_room).collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<Room>> {
        let mut conn = self.provider.open().await?;

        let row = sqlx::query(SELECT_ROOM_BY_ID)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;

        row.as_ref().map(row_to_room).transpose()
    }

    #[instrument(skip(self, room), fields(name = %room.name))]
    async fn insert(&self, room: &mut Room) -> Result<()> {
        let mut conn = self.provider.open().await?;

        let id: i32 = sqlx::query_scalar(INSERT_ROOM)
            .bind(&room.name)
            .bind(room.max_occupancy)
            .fetch_one(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;

        room.id = id;
        tracing::debug!(id, "Inserted room");
        Ok(())
    }

    #[instrument(skip(self, room), fields(id = room.id))]
    async fn update(&self, room: &Room) -> Result<u64> {
        let mut conn = self.provider.open().await?;

        let result = sqlx::query(UPDATE_ROOM)
            .bind(&room.name)
            .bind(room.max_occupancy)
            .bind(room.id)
            .execute(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;

        let rows_affected = result.rows_affected();
        tracing::debug!(rows_affected, "Updated room");
        Ok(rows_affected)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<u64> {
        let mut conn = self.provider.open().await?;

        let result = sqlx::query(DELETE_ROOM)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.provider.release(conn).await?;

        let rows_affected = result.rows_affected();
        tracing::debug!(rows_affected, "Deleted room");
        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_repository() -> (TempDir, SqliteRoomRepository) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.sqlite");
        let repo = SqliteRoomRepository::new(&DatabaseConfig::new(path.display().to_string()))
            .unwrap();
        repo.provider().migrate().await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_get_all_empty() {
        let (_dir, repo) = create_test_repository().await;
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_writes_id_back() {
        let (_dir, repo) = create_test_repository().await;

        let mut bathroom = Room::new("Bathroom", 3);
        repo.insert(&mut bathroom).await.unwrap();
        assert!(bathroom.id > 0);

        let mut lavatory = Room::new("Lavatory", 12);
        repo.insert(&mut lavatory).await.unwrap();
        assert!(lavatory.id > bathroom.id);

        let rooms = repo.get_all().await.unwrap();
        assert_eq!(rooms, vec![bathroom, lavatory]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_dir, repo) = create_test_repository().await;

        let mut attic = Room::new("Attic", 1);
        repo.insert(&mut attic).await.unwrap();

        let found = repo.get_by_id(attic.id).await.unwrap();
        assert_eq!(found, Some(attic));

        assert!(repo.get_by_id(99999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_silent() {
        let (_dir, repo) = create_test_repository().await;

        let mut room = Room::new("Den", 2);
        repo.insert(&mut room).await.unwrap();

        let ghost = Room::with_id(room.id + 100, "Ghost", 9);
        assert_eq!(repo.update(&ghost).await.unwrap(), 0);
        assert_eq!(repo.get_all().await.unwrap(), vec![room]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_silent() {
        let (_dir, repo) = create_test_repository().await;

        let mut room = Room::new("Den", 2);
        repo.insert(&mut room).await.unwrap();

        assert_eq!(repo.delete(room.id + 100).await.unwrap(), 0);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_name_is_bound_not_interpolated() {
        let (_dir, repo) = create_test_repository().await;

        let mut sneaky = Room::new("x'); DROP TABLE Room; --", 1);
        repo.insert(&mut sneaky).await.unwrap();

        let rooms = repo.get_all().await.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "x'); DROP TABLE Room; --");
    }

    #[tokio::test]
    async fn test_missing_schema_is_statement_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.sqlite");
        let repo = SqliteRoomRepository::new(&DatabaseConfig::new(path.display().to_string()))
            .unwrap();

        let err = repo.get_all().await.unwrap_err();
        assert!(err.is_statement(), "unexpected error: {err:?}");
    }
}
