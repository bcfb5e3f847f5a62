use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_service::{ItemService as ItemServiceTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_item(row: &PgRow) -> Item {
    Item {
        item_id: ItemId::from_uuid(row.get("item_id")),
        owner_id: UserId::from_uuid(row.get("owner_id")),
        name: row.get("name"),
        description: row.get("description"),
        available: row.get("available"),
    }
}

/// ItemServiceのPostgreSQL実装（読み取り専用）
///
/// itemsテーブルはアイテム管理コンテキストが所有する。
pub struct ItemService {
    pool: PgPool,
}

impl ItemService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT item_id, owner_id, name, description, available
            FROM items
            WHERE item_id = $1
            "#,
        )
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_item))
    }

    /// 登録順（created_at昇順）で返す
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT item_id, owner_id, name, description, available
            FROM items
            WHERE owner_id = $1
            ORDER BY created_at ASC, item_id
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_item).collect())
    }
}
