use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, ItemId, UserId};

/// 貸し出されるアイテム（アイテム管理コンテキストの投影）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub available: bool,
}

impl Item {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// ユーザー（ユーザー管理コンテキストの投影）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// アイテムへのコメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
