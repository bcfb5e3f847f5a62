use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーサービスポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
#[async_trait]
pub trait UserService: Send + Sync {
    /// IDでユーザーを取得する
    ///
    /// 予約者・コメント投稿者の解決に使用される。
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// ユーザーが存在するか確認する
    ///
    /// 予約一覧の取得前に使用される。
    async fn exists(&self, user_id: UserId) -> Result<bool>;
}
