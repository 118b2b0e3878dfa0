//! Contract test helpers for validating trait implementations
//!
//! Provides standardized checks that any RoomRepository or
//! RoommateRepository implementation should pass, so the SQLite
//! repositories and the in-memory mocks are held to the same behavior.

use crate::{
    assertions::{
        assert_all_in_room, assert_contains_room, assert_no_room_with_id,
        assert_room_equals_ignoring_id, assert_rooms_unresolved,
    },
    fixtures::{bathroom, lavatory, washroom},
};
use roommates_core::{Room, RoomRepository, Roommate, RoommateRepository};

/// Run every room contract against an initially empty repository
pub async fn test_room_repository_contract<R: RoomRepository>(repo: &R) {
    test_empty_listing_contract(repo).await;
    test_insert_contract(repo).await;
    test_update_contract(repo).await;
    test_delete_contract(repo).await;
    test_bathroom_walkthrough_contract(repo).await;
}

/// An empty table lists as an empty vector, not an error
pub async fn test_empty_listing_contract<R: RoomRepository>(repo: &R) {
    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert!(rooms.is_empty(), "Expected no rooms, got {rooms:?}");
}

/// Insert assigns a fresh positive id and the room is listed afterwards
pub async fn test_insert_contract<R: RoomRepository>(repo: &R) {
    let mut room = lavatory();
    repo.insert(&mut room).await.expect("insert should succeed");

    assert!(room.id > 0, "Inserted room should have positive ID");
    assert_room_equals_ignoring_id(&room, &lavatory());

    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_contains_room(&rooms, &room);

    let fetched = repo
        .get_by_id(room.id)
        .await
        .expect("get_by_id should succeed");
    assert_eq!(fetched.as_ref(), Some(&room));

    let mut other = Room::new("Den", 2);
    repo.insert(&mut other).await.expect("insert should succeed");
    assert_ne!(other.id, room.id, "Ids must be unique");

    cleanup(repo, &[room.id, other.id]).await;
}

/// Update touches exactly the matching row; an unknown id is a silent no-op
pub async fn test_update_contract<R: RoomRepository>(repo: &R) {
    let mut target = Room::new("Target", 1);
    let mut bystander = Room::new("Bystander", 4);
    repo.insert(&mut target).await.expect("insert should succeed");
    repo.insert(&mut bystander).await.expect("insert should succeed");

    let changed = Room::with_id(target.id, "Renamed", 6);
    let affected = repo.update(&changed).await.expect("update should succeed");
    assert_eq!(affected, 1);

    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_contains_room(&rooms, &changed);
    assert_contains_room(&rooms, &bystander);

    let unknown_id = target.id.max(bystander.id) + 1000;
    let affected = repo
        .update(&Room::with_id(unknown_id, "Nobody", 0))
        .await
        .expect("update of unknown id should not fail");
    assert_eq!(affected, 0);
    assert_eq!(
        repo.get_all().await.expect("get_all should succeed"),
        rooms,
        "Unknown-id update must leave storage unchanged"
    );

    cleanup(repo, &[target.id, bystander.id]).await;
}

/// Delete removes exactly one row; an unknown id is a silent no-op
pub async fn test_delete_contract<R: RoomRepository>(repo: &R) {
    let mut doomed = Room::new("Doomed", 1);
    let mut keeper = Room::new("Keeper", 1);
    repo.insert(&mut doomed).await.expect("insert should succeed");
    repo.insert(&mut keeper).await.expect("insert should succeed");

    assert_eq!(repo.delete(doomed.id).await.expect("delete should succeed"), 1);

    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_no_room_with_id(&rooms, doomed.id);
    assert_contains_room(&rooms, &keeper);

    assert_eq!(
        repo.delete(doomed.id)
            .await
            .expect("delete of unknown id should not fail"),
        0
    );
    assert_eq!(repo.get_all().await.expect("get_all should succeed"), rooms);

    cleanup(repo, &[keeper.id]).await;
}

/// Insert Bathroom, rename it to Washroom, then delete it
pub async fn test_bathroom_walkthrough_contract<R: RoomRepository>(repo: &R) {
    let mut room = bathroom();
    repo.insert(&mut room).await.expect("insert should succeed");
    let id = room.id;
    assert!(id > 0);

    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_contains_room(&rooms, &Room::with_id(id, "Bathroom", 3));

    repo.update(&washroom(id))
        .await
        .expect("update should succeed");
    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_contains_room(&rooms, &Room::with_id(id, "Washroom", 15));

    repo.delete(id).await.expect("delete should succeed");
    let rooms = repo.get_all().await.expect("get_all should succeed");
    assert_no_room_with_id(&rooms, id);
}

/// Run the roommate contracts against a repository holding exactly `rooms` and `roommates`
pub async fn test_roommate_repository_contract<R: RoommateRepository>(
    repo: &R,
    rooms: &[Room],
    roommates: &[Roommate],
) {
    let all = repo.get_all().await.expect("get_all should succeed");
    assert_eq!(all.len(), roommates.len());
    assert_rooms_unresolved(&all);
    for expected in roommates {
        assert!(
            all.iter().any(|r| r == expected),
            "Roommate {expected:?} missing from get_all"
        );
    }

    for expected in roommates {
        let found = repo
            .get_by_id(expected.id)
            .await
            .expect("get_by_id should succeed")
            .unwrap_or_else(|| panic!("Roommate {} should exist", expected.id));
        assert_eq!(found.id, expected.id);
        assert_eq!(&found, expected);
        assert!(found.room.is_none());
    }

    let unknown_id = roommates.iter().map(|r| r.id).max().unwrap_or(0) + 1000;
    assert!(repo
        .get_by_id(unknown_id)
        .await
        .expect("get_by_id should succeed")
        .is_none());

    for room in rooms {
        let residents = repo
            .get_all_with_room(room.id)
            .await
            .expect("get_all_with_room should succeed");
        let expected = roommates.iter().filter(|r| r.room_id == room.id).count();
        assert_eq!(residents.len(), expected, "Wrong resident count for room {}", room.id);
        assert_all_in_room(&residents, room.id, &room.name);
    }

    let unknown_room = rooms.iter().map(|room| room.id).max().unwrap_or(0) + 1000;
    assert!(repo
        .get_all_with_room(unknown_room)
        .await
        .expect("get_all_with_room should succeed")
        .is_empty());
}

async fn cleanup<R: RoomRepository>(repo: &R, ids: &[i32]) {
    for id in ids {
        repo.delete(*id).await.expect("cleanup delete should succeed");
    }
}
