use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId, UserId};

/// コマンド：アイテムの予約を申請する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// コマンド：予約を承認または却下する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub booking_id: BookingId,
    pub owner_id: UserId,
    pub approve: bool,
}

/// コマンド：予約をキャンセルする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub booker_id: UserId,
}

/// コマンド：アイテムにコメントする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComment {
    pub item_id: ItemId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
