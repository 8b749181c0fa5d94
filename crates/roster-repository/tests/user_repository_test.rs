//! Integration tests for MySqlUserRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use roster_core::{NewUser, RosterError, UserId};
use roster_repository::{DatabasePoolInterface, MySqlUserRepository, UserRepository};

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser::new(name.to_string(), email.to_string(), "hashed_password_123".to_string())
}

#[tokio::test]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let created = repo
        .create(&new_user("Ann", "ann@example.com"))
        .await
        .expect("Failed to create user");
    assert!(created.id.into_inner() > 0);
    assert_eq!(created.password_hash, "hashed_password_123");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found, created);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo.find_by_id(UserId::new(424_242)).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_by_email() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.create(&new_user("Findme", "findme@example.com"))
        .await
        .expect("Failed to create user");

    let found = repo
        .find_by_email("findme@example.com")
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.name, "Findme");

    let missing = repo.find_by_email("nobody@example.com").await.expect("Query failed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_maps_to_email_exists() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.create(&new_user("Ann", "dup@example.com"))
        .await
        .expect("Failed to create user");

    match repo.create(&new_user("Other", "dup@example.com")).await.unwrap_err() {
        RosterError::EmailExists => {}
        other => panic!("Expected EmailExists, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_overwrites_fields() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let mut user = repo
        .create(&new_user("Ann", "ann@example.com"))
        .await
        .expect("Failed to create user");

    user.name = "Annie".to_string();
    user.email = "annie@example.com".to_string();
    user.password_hash = "new_hash".to_string();

    let updated = repo.update(&user).await.expect("Failed to update user");
    assert_eq!(updated.name, "Annie");
    assert_eq!(updated.email, "annie@example.com");
    assert_eq!(updated.password_hash, "new_hash");
    assert_eq!(updated.created_at, user.created_at);
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn test_update_to_taken_email_maps_to_email_exists() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.create(&new_user("Ann", "ann@example.com")).await.unwrap();
    let mut bob = repo.create(&new_user("Bob", "bob@example.com")).await.unwrap();

    bob.email = "ann@example.com".to_string();
    assert!(matches!(repo.update(&bob).await, Err(RosterError::EmailExists)));
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let mut user = repo.create(&new_user("Ann", "ann@example.com")).await.unwrap();
    user.id = UserId::new(user.id.into_inner() + 1000);

    assert!(matches!(repo.update(&user).await, Err(RosterError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = repo.create(&new_user("Ann", "ann@example.com")).await.unwrap();

    repo.delete(user.id).await.expect("Failed to delete user");
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());

    assert!(matches!(repo.delete(user.id).await, Err(RosterError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_orders_by_id_and_counts_all() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let mut ids = Vec::new();
    for i in 0..5 {
        let user = repo
            .create(&new_user("User", &format!("user{i}@example.com")))
            .await
            .unwrap();
        ids.push(user.id);
    }

    let (first_page, total) = repo.list(0, 2).await.expect("Query failed");
    assert_eq!(total, 5);
    assert_eq!(first_page.iter().map(|u| u.id).collect::<Vec<_>>(), ids[..2]);

    let (last_page, _) = repo.list(4, 2).await.expect("Query failed");
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].id, ids[4]);

    let (beyond, total) = repo.list(10, 2).await.expect("Query failed");
    assert!(beyond.is_empty());
    assert_eq!(total, 5);
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}
