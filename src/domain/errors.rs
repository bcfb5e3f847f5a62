use chrono::{DateTime, Utc};

use super::BookingStatus;

/// 予約期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingPeriodError {
    /// 終了日時が開始日時以前
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// 予約申請のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// アイテムが貸出不可
    ItemNotAvailable,
    /// 予約期間が不正
    InvalidDateRange(BookingPeriodError),
}

impl From<BookingPeriodError> for RequestBookingError {
    fn from(err: BookingPeriodError) -> Self {
        RequestBookingError::InvalidDateRange(err)
    }
}

/// ステータス遷移のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransitionError {
    /// 遷移元のステータス
    pub from: BookingStatus,
}

/// 未知の分類（state）が指定された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBucket(pub String);
