use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, BookingPeriodError, Item, ItemId, RequestBookingError, StatusTransitionError,
    UserId,
};

// ============================================================================
// ステータスと状態遷移
// ============================================================================

/// 予約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 承認待ち
    Waiting,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
    /// キャンセル済み
    Canceled,
}

/// ステータスを動かす操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// 所有者による承認
    Approve,
    /// 所有者による却下
    Reject,
    /// 予約者によるキャンセル
    Cancel,
}

impl StatusTransition {
    /// 所有者の判断を遷移に変換する
    pub fn from_decision(approve: bool) -> Self {
        if approve {
            StatusTransition::Approve
        } else {
            StatusTransition::Reject
        }
    }
}

impl BookingStatus {
    /// 文字列表現を取得する（永続化・APIで使用）
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }

    /// 状態遷移関数
    ///
    /// 遷移表：
    /// - WAITING → APPROVED / REJECTED / CANCELED
    /// - APPROVED → CANCELED
    /// - REJECTED, CANCELED は終端
    ///
    /// それ以外の組み合わせは`StatusTransitionError`を返す。
    pub fn transition(self, transition: StatusTransition) -> Result<Self, StatusTransitionError> {
        match (self, transition) {
            (BookingStatus::Waiting, StatusTransition::Approve) => Ok(BookingStatus::Approved),
            (BookingStatus::Waiting, StatusTransition::Reject) => Ok(BookingStatus::Rejected),
            (BookingStatus::Waiting | BookingStatus::Approved, StatusTransition::Cancel) => {
                Ok(BookingStatus::Canceled)
            }
            (from, _) => Err(StatusTransitionError { from }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// ============================================================================
// 予約期間
// ============================================================================

/// 予約期間
///
/// 不変条件：終了日時は開始日時より厳密に後。
/// 生成時に一度だけ検証され、以後変更されない。
/// 日時は保存先（TIMESTAMPTZ）と同じマイクロ秒精度に切り捨てる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingPeriodError> {
        let start = start.trunc_subsecs(6);
        let end = end.trunc_subsecs(6);
        if end <= start {
            return Err(BookingPeriodError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 期間が終了済みか（end < now）
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// 期間中か（start < now < end）
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.start < now && self.end > now
    }

    /// 期間が未来か（start > now）
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }
}

// ============================================================================
// 予約集約
// ============================================================================

/// 予約集約 - あるユーザーによる1アイテムの1回の借用申請
///
/// `item_id`、`item_owner_id`、`booker_id`、`period`は生成時に一度だけ設定される。
/// 以後変化するのは`status`のみで、変更は状態遷移関数を通す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub item_id: ItemId,
    pub item_owner_id: UserId,
    pub booker_id: UserId,
    pub period: BookingPeriod,
    pub status: BookingStatus,
}

impl Booking {
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }

    /// 予約者または所有者であれば閲覧可能
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.booker_id == user_id || self.item_owner_id == user_id
    }
}

/// 純粋関数：予約を申請する
///
/// ビジネスルール：
/// - アイテムが貸出可能であること
/// - 終了日時が開始日時より後であること
/// - 状態はWAITING
///
/// 所有者自身による予約と予約者の存在確認はアプリケーション層で
/// この関数の前に行われる（エラーの優先順位を保つため）。
/// 期間の重複は確認しない。
pub fn request_booking(
    item: &Item,
    booker_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Booking, RequestBookingError> {
    if !item.available {
        return Err(RequestBookingError::ItemNotAvailable);
    }

    let period = BookingPeriod::new(start, end)?;

    Ok(Booking {
        booking_id: BookingId::new(),
        item_id: item.item_id,
        item_owner_id: item.owner_id,
        booker_id,
        period,
        status: BookingStatus::Waiting,
    })
}

/// 純粋関数：所有者が予約を承認または却下する
///
/// WAITINGの予約のみ受け付ける。ステータス以外のフィールドは変化しない。
/// 所有者かどうかの確認は呼び出し側の責務。
pub fn decide_booking(booking: &Booking, approve: bool) -> Result<Booking, StatusTransitionError> {
    let status = booking
        .status
        .transition(StatusTransition::from_decision(approve))?;

    Ok(Booking {
        status,
        ..booking.clone()
    })
}

/// 純粋関数：予約をキャンセルする
pub fn cancel_booking(booking: &Booking) -> Result<Booking, StatusTransitionError> {
    let status = booking.status.transition(StatusTransition::Cancel)?;

    Ok(Booking {
        status,
        ..booking.clone()
    })
}
