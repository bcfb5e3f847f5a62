use crate::domain::{Comment, CommentId, ItemId, UserId};
use crate::ports::comment_repository::{CommentRepository as CommentRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_comment(row: &PgRow) -> Comment {
    Comment {
        comment_id: CommentId::from_uuid(row.get("comment_id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        author_id: UserId::from_uuid(row.get("author_id")),
        author_name: row.get("author_name"),
        text: row.get("text"),
        created_at: row.get("created_at"),
    }
}

/// CommentRepositoryのPostgreSQL実装
///
/// 投稿者名はusersとの結合で取得する。
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepositoryTrait for CommentRepository {
    async fn save(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (comment_id, item_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.value())
        .bind(comment.item_id.value())
        .bind(comment.author_id.value())
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT c.comment_id, c.item_id, c.author_id, u.name AS author_name, c.text, c.created_at
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.item_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_comment).collect())
    }

    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT c.comment_id, c.item_id, c.author_id, u.name AS author_name, c.text, c.created_at
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            JOIN items i ON i.item_id = c.item_id
            WHERE i.owner_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_comment).collect())
    }
}
