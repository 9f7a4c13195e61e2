//! Integration tests for item queue reconciliation.
//!
//! Exercises `ItemQueueRepo` against a real database:
//! - Creating a queue on first reconcile
//! - Idempotent re-reconcile
//! - Reorder with removal
//! - Whole-call rejection on unknown or duplicate names

use assert_matches::assert_matches;
use midguardians_core::error::CoreError;
use midguardians_db::models::character::CreateCharacter;
use midguardians_db::models::user::CreateUser;
use midguardians_db::repositories::{CharacterRepo, ItemQueueRepo, UserRepo};
use midguardians_db::DbError;
use sqlx::PgPool;

const ITEM: &str = "Ammurapi shield";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_characters(pool: &PgPool, names: &[&str]) {
    let owner = UserRepo::create(
        pool,
        &CreateUser {
            username: "officer".to_string(),
            role: None,
        },
    )
    .await
    .unwrap();
    for name in names {
        CharacterRepo::create(
            pool,
            &CreateCharacter {
                owner_id: owner.id,
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn positions(pool: &PgPool) -> Vec<(String, i32)> {
    sqlx::query_as(
        "SELECT c.name, p.position FROM item_queue_positions p
         JOIN characters c ON c.id = p.character_id
         ORDER BY p.position",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_queue_is_none(pool: PgPool) {
    assert!(ItemQueueRepo::find_by_item(&pool, ITEM).await.unwrap().is_none());
    assert!(ItemQueueRepo::list_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reconcile_creates_queue(pool: PgPool) {
    seed_characters(&pool, &["Miaw", "Svedin", "Kerian"]).await;

    let queue = ItemQueueRepo::reconcile(&pool, ITEM, &names(&["Kerian", "Miaw", "Svedin"]))
        .await
        .unwrap();
    assert_eq!(queue.item_name, ITEM);
    assert_eq!(queue.ordered_names(), vec!["Kerian", "Miaw", "Svedin"]);

    let positions: Vec<i32> = queue.members.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let found = ItemQueueRepo::find_by_item(&pool, ITEM).await.unwrap().unwrap();
    assert_eq!(found, queue);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reconcile_same_list_keeps_positions(pool: PgPool) {
    seed_characters(&pool, &["A", "B", "C"]).await;
    let list = names(&["A", "B", "C"]);

    ItemQueueRepo::reconcile(&pool, ITEM, &list).await.unwrap();
    let before = positions(&pool).await;
    ItemQueueRepo::reconcile(&pool, ITEM, &list).await.unwrap();
    let after = positions(&pool).await;

    assert_eq!(before, after);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reconcile_reorders_and_removes(pool: PgPool) {
    seed_characters(&pool, &["A", "B", "C"]).await;

    ItemQueueRepo::reconcile(&pool, ITEM, &names(&["A", "B", "C"]))
        .await
        .unwrap();
    let queue = ItemQueueRepo::reconcile(&pool, ITEM, &names(&["C", "A"]))
        .await
        .unwrap();

    assert_eq!(queue.ordered_names(), vec!["C", "A"]);
    assert_eq!(
        positions(&pool).await,
        vec![("C".to_string(), 1), ("A".to_string(), 2)]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reconcile_to_empty_keeps_queue(pool: PgPool) {
    seed_characters(&pool, &["A"]).await;

    ItemQueueRepo::reconcile(&pool, ITEM, &names(&["A"]))
        .await
        .unwrap();
    let queue = ItemQueueRepo::reconcile(&pool, ITEM, &[]).await.unwrap();

    assert!(queue.is_empty());
    let all = ItemQueueRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_name_rolls_back(pool: PgPool) {
    seed_characters(&pool, &["A", "B"]).await;

    ItemQueueRepo::reconcile(&pool, ITEM, &names(&["A", "B"]))
        .await
        .unwrap();
    let result = ItemQueueRepo::reconcile(&pool, ITEM, &names(&["B", "Nobody"])).await;

    assert_matches!(
        result,
        Err(DbError::Core(CoreError::Validation(msg))) if msg.contains("Nobody")
    );
    assert_eq!(
        positions(&pool).await,
        vec![("A".to_string(), 1), ("B".to_string(), 2)]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_name_rejected(pool: PgPool) {
    seed_characters(&pool, &["A"]).await;

    let result = ItemQueueRepo::reconcile(&pool, ITEM, &names(&["A", "A"])).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert!(ItemQueueRepo::find_by_item(&pool, ITEM).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_item_is_not_found(pool: PgPool) {
    seed_characters(&pool, &["A"]).await;

    let result = ItemQueueRepo::reconcile(&pool, "Excalibur", &names(&["A"])).await;
    assert_matches!(
        result,
        Err(DbError::Core(CoreError::NotFound { entity: "Item", .. }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_queues_are_independent(pool: PgPool) {
    seed_characters(&pool, &["A", "B"]).await;

    ItemQueueRepo::reconcile(&pool, ITEM, &names(&["A", "B"]))
        .await
        .unwrap();
    ItemQueueRepo::reconcile(&pool, "Kin's Scale", &names(&["B"]))
        .await
        .unwrap();

    let all = ItemQueueRepo::list_all(&pool).await.unwrap();
    let summary: Vec<(String, Vec<String>)> = all
        .iter()
        .map(|q| (q.item_name.clone(), q.ordered_names()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ITEM.to_string(), names(&["A", "B"])),
            ("Kin's Scale".to_string(), names(&["B"])),
        ]
    );
}
