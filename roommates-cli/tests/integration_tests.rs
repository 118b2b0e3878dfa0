use roommates_cli::commands::{execute, Command, OutputFormat, RoomCommand, RoommateCommand};
use roommates_cli::config::{Config, DatabaseSettings, LogFormat, LoggingConfig};
use roommates_cli::setup::{create_repositories, ensure_database_directory};
use roommates_core::{Room, RoomRepository};
use std::env;
use tempfile::TempDir;

fn test_config(temp_dir: &TempDir) -> Config {
    let db_path = temp_dir.path().join("data").join("roommates.sqlite");

    Config {
        database: DatabaseSettings {
            url: format!("sqlite://{}", db_path.display()),
            busy_timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        },
    }
}

async fn run_text(config: &Config, command: Command) -> String {
    let repos = create_repositories(config).await.unwrap();
    let mut buf = Vec::new();
    execute(&command, &repos.rooms, &repos.roommates, OutputFormat::Text, &mut buf)
        .await
        .unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn test_startup_with_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);

    ensure_database_directory(&config.database.url).unwrap();
    let repos = create_repositories(&config).await;
    assert!(repos.is_ok(), "Failed to create repositories: {:?}", repos.err());

    let repos = repos.unwrap();
    assert!(repos.rooms.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_room_commands_against_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    ensure_database_directory(&config.database.url).unwrap();

    let added = run_text(
        &config,
        Command::Rooms {
            command: RoomCommand::Add {
                name: "Bathroom".to_string(),
                max_occupancy: 3,
            },
        },
    )
    .await;
    assert_eq!(added, "Added the new Room with id 1\n");

    run_text(
        &config,
        Command::Rooms {
            command: RoomCommand::Update {
                id: 1,
                name: "Washroom".to_string(),
                max_occupancy: 15,
            },
        },
    )
    .await;

    let listed = run_text(&config, Command::Rooms { command: RoomCommand::List }).await;
    assert_eq!(listed, "1 Washroom 15\n");

    let deleted = run_text(&config, Command::Rooms { command: RoomCommand::Delete { id: 1 } }).await;
    assert_eq!(deleted, "Deleted Room with id 1\n");

    let again = run_text(&config, Command::Rooms { command: RoomCommand::Delete { id: 1 } }).await;
    assert_eq!(again, "No Room with id 1; nothing changed\n");
}

#[tokio::test]
async fn test_demo_leaves_rooms_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    ensure_database_directory(&config.database.url).unwrap();

    let repos = create_repositories(&config).await.unwrap();
    let mut attic = Room::new("Attic", 1);
    repos.rooms.insert(&mut attic).await.unwrap();

    let text = run_text(&config, Command::Demo).await;
    assert!(text.contains("Roommate with ID 1 not found"));
    assert!(text.contains("Added the new Room with id 2"));

    assert_eq!(repos.rooms.get_all().await.unwrap(), vec![attic]);
}

#[tokio::test]
async fn test_roommates_in_empty_room() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    ensure_database_directory(&config.database.url).unwrap();

    let text = run_text(
        &config,
        Command::Roommates {
            command: RoommateCommand::InRoom { room_id: 1 },
        },
    )
    .await;
    assert!(text.is_empty());
}

#[test]
fn test_configuration_loading() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.database.url, "sqlite://roommates.sqlite");
}

#[test]
fn test_environment_overrides() {
    env::set_var("DATABASE_URL", "sqlite://test_env.sqlite");
    env::set_var("LOG_LEVEL", "debug");

    let config = Config::default().merge_with_env().unwrap();

    assert_eq!(config.database.url, "sqlite://test_env.sqlite");
    assert_eq!(config.logging.level, "debug");

    env::remove_var("DATABASE_URL");
    env::remove_var("LOG_LEVEL");
}
