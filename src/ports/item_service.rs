use crate::domain::{Item, ItemId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムサービスポート
///
/// 予約コンテキストとアイテム管理コンテキストの境界を維持する。
/// アイテムの作成・更新はこのポートの外で行われる。
#[async_trait]
pub trait ItemService: Send + Sync {
    /// IDでアイテムを取得する
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// 所有者の全アイテムを取得する
    ///
    /// 所有者のアイテム一覧表示に使用される。
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>>;
}
