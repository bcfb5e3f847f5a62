use crate::domain::{
    Booking, BookingFilter, BookingId, BookingStatus, ItemId, PageRequest, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約リポジトリポート
///
/// 予約の永続化と、一覧・集約に必要な問い合わせを抽象化する。
/// 分類の条件（`BookingFilter`）は実装側で検索時に適用すること。
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 新しい予約を保存する
    ///
    /// IDはドメイン層で採番済み。挿入のみで、既存の予約は上書きしない。
    async fn save(&self, booking: &Booking) -> Result<()>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// ステータスを条件付きで更新する
    ///
    /// 現在のステータスが`expected`の場合のみ`new_status`に更新する。
    /// 1回の原子的な操作（`UPDATE ... WHERE status = expected`）で行い、
    /// 更新できた場合は`true`、競合などで対象がなかった場合は`false`を返す。
    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new_status: BookingStatus,
    ) -> Result<bool>;

    /// 予約者の予約を検索する
    ///
    /// 開始日時の降順で、ページングを適用して返す。
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>>;

    /// 所有者のアイテムに対する予約を検索する
    ///
    /// 開始日時の降順で、ページングを適用して返す。
    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>>;

    /// アイテムの承認済み予約を開始日時の昇順で取得する
    async fn find_approved_for_item(&self, item_id: ItemId) -> Result<Vec<Booking>>;

    /// 所有者の全アイテムの承認済み予約を開始日時の昇順で取得する
    async fn find_approved_for_owner(&self, owner_id: UserId) -> Result<Vec<Booking>>;

    /// コメント可否の判定に使う予約が存在するか
    ///
    /// 条件：アイテムと予約者が一致し、
    /// (status = APPROVED かつ start < now) または status = CANCELED
    async fn exists_for_comment_eligibility(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool>;
}
