use chrono::NaiveDateTime;
use roommates_core::{
    error::{Result, RoommatesError},
    models::{Room, Roommate},
};
use sqlx::{sqlite::SqliteRow, Row};

/// Convert SQLite row to Room model
pub fn row_to_room(row: &SqliteRow) -> Result<Room> {
    Ok(Room {
        id: column(row, "Id")?,
        name: column(row, "Name")?,
        max_occupancy: column(row, "MaxOccupancy")?,
    })
}

/// Convert SQLite row to Roommate model, leaving the room unresolved
pub fn row_to_roommate(row: &SqliteRow) -> Result<Roommate> {
    let move_in_date: NaiveDateTime = column(row, "MoveInDate")?;

    Ok(Roommate {
        id: column(row, "Id")?,
        first_name: column(row, "FirstName")?,
        last_name: column(row, "LastName")?,
        rent_portion: column(row, "RentPortion")?,
        move_in_date,
        room_id: column(row, "RoomId")?,
        room: None,
    })
}

/// Convert a Roommate JOIN Room row, attaching the joined room
///
/// The room id comes from the filter the caller supplied, the name and
/// occupancy from the joined Room columns.
pub fn row_to_roommate_with_room(row: &SqliteRow, room_id: i32) -> Result<Roommate> {
    let room = Room {
        id: room_id,
        name: column(row, "RoomName")?,
        max_occupancy: column(row, "RoomMaxOccupancy")?,
    };

    Ok(row_to_roommate(row)?.with_room(room))
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(sqlx_error_to_roommates_error)
}

/// Convert SQLx error to RoommatesError
pub fn sqlx_error_to_roommates_error(err: sqlx::Error) -> RoommatesError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if db_err.is_foreign_key_violation() || message.contains("FOREIGN KEY constraint failed")
            {
                RoommatesError::Statement(format!("Foreign key constraint violated: {message}"))
            } else {
                RoommatesError::Statement(format!("Database rejected statement: {message}"))
            }
        }
        sqlx::Error::ColumnNotFound(column) => RoommatesError::missing_column(column),
        sqlx::Error::ColumnDecode { index, source } => {
            RoommatesError::Mapping(format!("Column {index} could not be decoded: {source}"))
        }
        sqlx::Error::ColumnIndexOutOfBounds { index, len } => RoommatesError::Mapping(format!(
            "Column index {index} out of bounds for row of {len} columns"
        )),
        sqlx::Error::Decode(source) => {
            RoommatesError::Mapping(format!("Value could not be decoded: {source}"))
        }
        sqlx::Error::TypeNotFound { type_name } => {
            RoommatesError::Mapping(format!("Unknown column type: {type_name}"))
        }
        sqlx::Error::RowNotFound => {
            RoommatesError::Statement("Statement returned no rows".to_string())
        }
        sqlx::Error::Configuration(source) => {
            RoommatesError::Configuration(format!("Invalid database configuration: {source}"))
        }
        sqlx::Error::Io(io_err) => RoommatesError::Connection(format!("Database I/O error: {io_err}")),
        sqlx::Error::Tls(source) => RoommatesError::Connection(format!("Database TLS error: {source}")),
        sqlx::Error::Protocol(message) => {
            RoommatesError::Connection(format!("Database protocol error: {message}"))
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            RoommatesError::Connection(format!("Database connection lost: {err}"))
        }
        _ => RoommatesError::Statement(format!("Database operation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions};
    use std::str::FromStr;

    // A lone in-memory connection is enough to produce rows for mapping tests.
    async fn scratch() -> sqlx::SqliteConnection {
        SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .connect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_row_to_room() {
        let mut conn = scratch().await;
        let row = sqlx::query("SELECT 3 AS Id, 'Attic' AS Name, 1 AS MaxOccupancy")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        let room = row_to_room(&row).unwrap();
        assert_eq!(room, Room::with_id(3, "Attic", 1));
    }

    #[tokio::test]
    async fn test_row_to_roommate_parses_move_in_date() {
        let mut conn = scratch().await;
        let row = sqlx::query(
            "SELECT 1 AS Id, 'Jenna' AS FirstName, 'Solis' AS LastName, 20 AS RentPortion, \
             '2020-01-15 00:00:00' AS MoveInDate, 2 AS RoomId",
        )
        .fetch_one(&mut conn)
        .await
        .unwrap();

        let roommate = row_to_roommate(&row).unwrap();
        assert_eq!(roommate.first_name, "Jenna");
        assert_eq!(roommate.room_id, 2);
        assert_eq!(
            roommate.move_in_date.format("%Y-%m-%d").to_string(),
            "2020-01-15"
        );
        assert!(roommate.room.is_none());
    }

    #[tokio::test]
    async fn test_missing_column_is_mapping_error() {
        let mut conn = scratch().await;
        let row = sqlx::query("SELECT 3 AS Id, 'Attic' AS Name")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        let err = row_to_room(&row).unwrap_err();
        assert_eq!(err, RoommatesError::missing_column("MaxOccupancy"));
    }

    #[tokio::test]
    async fn test_wrong_type_is_mapping_error() {
        let mut conn = scratch().await;
        let row = sqlx::query("SELECT 'three' AS Id, 'Attic' AS Name, 1 AS MaxOccupancy")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        let err = row_to_room(&row).unwrap_err();
        assert!(err.is_mapping(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_bad_sql_is_statement_error() {
        let mut conn = scratch().await;
        let err = sqlx::query("SELECT Id FROM NoSuchTable")
            .fetch_all(&mut conn)
            .await
            .map(|_| ())
            .unwrap_err();

        let mapped = sqlx_error_to_roommates_error(err);
        assert!(mapped.is_statement(), "unexpected error: {mapped:?}");
    }
}
