//! End-to-end tests of the `roommates` binary

use assert_cmd::Command;
use tempfile::TempDir;

fn roommates(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("roommates.sqlite");
    let mut cmd = Command::cargo_bin("roommates").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("CONFIG_FILE")
        .env_remove("DATABASE_URL")
        .env_remove("LOG_LEVEL")
        .env_remove("RUST_LOG")
        .arg("--database-url")
        .arg(format!("sqlite://{}", db_path.display()));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_rooms_add_then_list() {
    let temp_dir = TempDir::new().unwrap();

    let added = stdout_of(roommates(&temp_dir).args(["rooms", "add", "Bathroom", "3"]));
    assert_eq!(added, "Added the new Room with id 1\n");

    let listed = stdout_of(roommates(&temp_dir).args(["rooms", "list"]));
    assert_eq!(listed, "1 Bathroom 3\n");
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    stdout_of(roommates(&temp_dir).args(["rooms", "add", "Attic", "1"]));

    let json = stdout_of(roommates(&temp_dir).args(["--format", "json", "rooms", "get", "1"]));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Attic");
    assert_eq!(value["max_occupancy"], 1);
}

#[test]
fn test_missing_roommate_is_not_a_failure() {
    let temp_dir = TempDir::new().unwrap();

    let text = stdout_of(roommates(&temp_dir).args(["roommates", "get", "7"]));
    assert!(text.contains("Roommate with ID 7 not found"));
}

#[test]
fn test_demo_is_the_default_command() {
    let temp_dir = TempDir::new().unwrap();

    let text = stdout_of(&mut roommates(&temp_dir));
    assert!(text.starts_with("Getting All Roommates:"));
    assert!(text.contains("Added the new Room with id 1"));
}

#[test]
fn test_non_sqlite_url_exits_with_configuration_code() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("roommates")
        .unwrap()
        .current_dir(temp_dir.path())
        .env_remove("CONFIG_FILE")
        .env_remove("LOG_LEVEL")
        .args(["--database-url", "postgres://localhost/roommates", "rooms", "list"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_in_memory_url_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("roommates")
        .unwrap()
        .current_dir(temp_dir.path())
        .env_remove("CONFIG_FILE")
        .env_remove("LOG_LEVEL")
        .args(["--database-url", "sqlite::memory:", "rooms", "list"])
        .assert()
        .failure()
        .code(1);
}
