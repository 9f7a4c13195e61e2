//! Repository for `item_queues` and `item_queue_positions`.
//!
//! The only write path is [`ItemQueueRepo::reconcile`], which rewrites a whole
//! queue inside one transaction.

use std::collections::HashMap;

use midguardians_core::error::CoreError;
use midguardians_core::item_queue::{self, ItemQueue, QueueMember};
use midguardians_core::loot_tables::LootTables;
use midguardians_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::item_queue::QueuePositionRow;

/// Position columns joined with item and character names.
const POSITION_COLUMNS: &str =
    "q.item_name, p.character_id, c.name AS character_name, p.position";

pub struct ItemQueueRepo;

impl ItemQueueRepo {
    /// Every queue, including empty ones, ordered by item name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ItemQueue>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_all_on(&mut conn).await
    }

    /// Same as [`list_all`](Self::list_all) on an existing connection, so the
    /// snapshot loader can read queues inside its own transaction.
    pub(crate) async fn list_all_on(conn: &mut PgConnection) -> Result<Vec<ItemQueue>, sqlx::Error> {
        let items: Vec<String> =
            sqlx::query_scalar("SELECT item_name FROM item_queues ORDER BY item_name")
                .fetch_all(&mut *conn)
                .await?;

        let query = format!(
            "SELECT {POSITION_COLUMNS}
             FROM item_queue_positions p
             JOIN item_queues q ON q.id = p.item_queue_id
             JOIN characters c ON c.id = p.character_id
             ORDER BY q.item_name, p.position"
        );
        let rows = sqlx::query_as::<_, QueuePositionRow>(&query)
            .fetch_all(&mut *conn)
            .await?;

        let mut members: HashMap<String, Vec<QueueMember>> = HashMap::new();
        for row in rows {
            members
                .entry(row.item_name.clone())
                .or_default()
                .push(row.into());
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let queue_members = members.remove(&item).unwrap_or_default();
                ItemQueue::new(item, queue_members)
            })
            .collect())
    }

    /// The queue for one item, or `None` if no queue was ever created.
    pub async fn find_by_item(
        pool: &PgPool,
        item_name: &str,
    ) -> Result<Option<ItemQueue>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM item_queues WHERE item_name = $1")
                .bind(item_name)
                .fetch_optional(&mut *conn)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }
        let members = Self::members_on(&mut conn, item_name, false).await?;
        Ok(Some(ItemQueue::new(item_name, members)))
    }

    /// Rewrite the queue for `item_name` to exactly `character_names`, in
    /// order, with positions 1..=n.
    ///
    /// Creates the queue if absent. Unknown or duplicate names, or an item
    /// outside the loot tables, reject the whole call; any failure rolls the
    /// transaction back and leaves the previous queue untouched.
    pub async fn reconcile(
        pool: &PgPool,
        item_name: &str,
        character_names: &[String],
    ) -> Result<ItemQueue, DbError> {
        if !LootTables::get().contains_item(item_name) {
            return Err(CoreError::not_found("Item", item_name).into());
        }
        item_queue::validate_desired_names(character_names)?;

        let mut tx = pool.begin().await?;

        let desired = resolve_character_ids(&mut tx, character_names).await?;

        let queue_id: DbId = sqlx::query_scalar(
            "INSERT INTO item_queues (item_name)
             VALUES ($1)
             ON CONFLICT (item_name) DO UPDATE SET updated_at = NOW()
             RETURNING id",
        )
        .bind(item_name)
        .fetch_one(&mut *tx)
        .await?;

        let current = Self::members_on(&mut tx, item_name, true).await?;
        let plan = item_queue::plan_reconcile(&current, &desired)?;

        if !plan.removals.is_empty() {
            sqlx::query(
                "DELETE FROM item_queue_positions
                 WHERE item_queue_id = $1 AND character_id = ANY($2)",
            )
            .bind(queue_id)
            .bind(&plan.removals)
            .execute(&mut *tx)
            .await?;
        }

        for (character_id, position) in &plan.updates {
            sqlx::query(
                "UPDATE item_queue_positions SET position = $3
                 WHERE item_queue_id = $1 AND character_id = $2",
            )
            .bind(queue_id)
            .bind(character_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        for (character_id, position) in &plan.inserts {
            sqlx::query(
                "INSERT INTO item_queue_positions (item_queue_id, character_id, position)
                 VALUES ($1, $2, $3)",
            )
            .bind(queue_id)
            .bind(character_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let members = Self::members_on(&mut tx, item_name, false).await?;
        tx.commit().await?;

        tracing::info!(
            item = item_name,
            members = members.len(),
            inserted = plan.inserts.len(),
            moved = plan.updates.len(),
            removed = plan.removals.len(),
            "Item queue reconciled"
        );

        Ok(ItemQueue::new(item_name, members))
    }

    async fn members_on(
        conn: &mut PgConnection,
        item_name: &str,
        for_update: bool,
    ) -> Result<Vec<QueueMember>, sqlx::Error> {
        let lock = if for_update { "FOR UPDATE OF p" } else { "" };
        let query = format!(
            "SELECT {POSITION_COLUMNS}
             FROM item_queue_positions p
             JOIN item_queues q ON q.id = p.item_queue_id
             JOIN characters c ON c.id = p.character_id
             WHERE q.item_name = $1
             ORDER BY p.position
             {lock}"
        );
        let rows = sqlx::query_as::<_, QueuePositionRow>(&query)
            .bind(item_name)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(QueueMember::from).collect())
    }
}

/// Map names to character ids, preserving input order.
async fn resolve_character_ids(
    conn: &mut PgConnection,
    names: &[String],
) -> Result<Vec<DbId>, DbError> {
    let rows: Vec<(DbId, String)> =
        sqlx::query_as("SELECT id, name FROM characters WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(&mut *conn)
            .await?;
    let ids: HashMap<String, DbId> = rows.into_iter().map(|(id, name)| (name, id)).collect();

    names
        .iter()
        .map(|name| {
            ids.get(name).copied().ok_or_else(|| {
                DbError::Core(CoreError::Validation(format!("Unknown character '{name}'")))
            })
        })
        .collect()
}
