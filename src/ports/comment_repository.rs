use crate::domain::{Comment, ItemId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// コメントリポジトリポート
///
/// コメントの保存先は予約コンテキストの外にある。
/// 予約コンテキストが決めるのは投稿の可否のみ。
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn save(&self, comment: &Comment) -> Result<()>;

    /// アイテムのコメントを投稿順に取得する
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>>;

    /// 所有者の全アイテムのコメントを投稿順に取得する
    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Comment>>;
}
