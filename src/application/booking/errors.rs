use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{BookingId, BookingStatus, InvalidPage, ItemId, UnknownBucket, UserId};

/// 予約管理アプリケーション層のエラー
///
/// ビジネスルール違反はすべて部分的な書き込みなしで即座に返される。
/// 表示用の整形は行わず、説明に必要なIDと日時のみを持つ。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// アイテムが存在しない（または所有者自身による予約）
    #[error("Item with id={0} not found")]
    ItemNotFound(ItemId),

    /// ユーザーが存在しない
    #[error("User with id={0} not found")]
    UserNotFound(UserId),

    /// 予約が存在しない（または閲覧権限がない）
    #[error("Booking with id={0} not found")]
    BookingNotFound(BookingId),

    /// アイテムが貸出不可
    #[error("Item with id={0} is not available for booking")]
    ItemNotAvailable(ItemId),

    /// 終了日時が開始日時以前
    #[error("The end date of the booking {end} cannot be earlier or equal the start date {start}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// 現在のステータスからは遷移できない
    #[error("Status of booking with id={booking_id} cannot be changed from {from}")]
    InvalidStateTransition {
        booking_id: BookingId,
        from: BookingStatus,
    },

    /// アイテムの所有者ではない
    #[error("User with id={user_id} is not the owner of item with id={item_id}")]
    NotOwner { item_id: ItemId, user_id: UserId },

    /// 未知の分類
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// コメント可能な予約がない
    #[error("User with id={user_id} did not book item with id={item_id}")]
    UserDidNotBookItem { user_id: UserId, item_id: ItemId },

    /// ページング指定が不正
    #[error("Page size must be positive")]
    InvalidPagination,

    /// BookingRepositoryのエラー
    #[error("Booking repository error")]
    BookingRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CommentRepositoryのエラー
    #[error("Comment repository error")]
    CommentRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemServiceのエラー
    #[error("Item service error")]
    ItemServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserServiceのエラー
    #[error("User service error")]
    UserServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<UnknownBucket> for BookingApplicationError {
    fn from(err: UnknownBucket) -> Self {
        BookingApplicationError::UnknownState(err.0)
    }
}

impl From<InvalidPage> for BookingApplicationError {
    fn from(err: InvalidPage) -> Self {
        match err {
            InvalidPage::ZeroLimit => BookingApplicationError::InvalidPagination,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
