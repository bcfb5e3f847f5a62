use crate::domain::{User, UserId};
use crate::ports::user_service::{Result, UserService as UserServiceTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// UserServiceのPostgreSQL実装（読み取り専用）
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT user_id, name, email FROM users WHERE user_id = $1")
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            user_id: UserId::from_uuid(row.get("user_id")),
            name: row.get("name"),
            email: row.get("email"),
        }))
    }

    async fn exists(&self, user_id: UserId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
