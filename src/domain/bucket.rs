use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Booking, BookingStatus, PageRequest, UnknownBucket};

/// 予約一覧の分類（APIの`state`パラメータ）
///
/// 日時による分類（PAST/CURRENT/FUTURE）とステータスによる分類
/// （WAITING/REJECTED）は直交しており、1件の予約が複数の分類に
/// 該当し得る。1回の問い合わせで指定できる分類は1つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingBucket {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingBucket::All => "ALL",
            BookingBucket::Current => "CURRENT",
            BookingBucket::Past => "PAST",
            BookingBucket::Future => "FUTURE",
            BookingBucket::Waiting => "WAITING",
            BookingBucket::Rejected => "REJECTED",
        }
    }

    /// 分類を`now`時点の検索条件に変換する
    ///
    /// 条件はクエリ層にそのまま渡され、メモリ上ではなく検索時に適用される。
    pub fn filter(self, now: DateTime<Utc>) -> BookingFilter {
        match self {
            BookingBucket::All => BookingFilter::All,
            BookingBucket::Current => BookingFilter::Current { now },
            BookingBucket::Past => BookingFilter::Past { now },
            BookingBucket::Future => BookingFilter::Future { now },
            BookingBucket::Waiting => BookingFilter::Status(BookingStatus::Waiting),
            BookingBucket::Rejected => BookingFilter::Status(BookingStatus::Rejected),
        }
    }
}

impl std::str::FromStr for BookingBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingBucket::All),
            "CURRENT" => Ok(BookingBucket::Current),
            "PAST" => Ok(BookingBucket::Past),
            "FUTURE" => Ok(BookingBucket::Future),
            "WAITING" => Ok(BookingBucket::Waiting),
            "REJECTED" => Ok(BookingBucket::Rejected),
            _ => Err(UnknownBucket(s.to_string())),
        }
    }
}

/// クエリ層に渡す検索条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    /// 条件なし
    All,
    /// end < now
    Past { now: DateTime<Utc> },
    /// start < now AND end > now
    Current { now: DateTime<Utc> },
    /// start > now
    Future { now: DateTime<Utc> },
    /// status == 指定値
    Status(BookingStatus),
}

impl BookingFilter {
    /// 予約が条件を満たすか
    ///
    /// SQLアダプターは同じ述語をWHERE句で表現する。
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingFilter::All => true,
            BookingFilter::Past { now } => booking.period.is_past(*now),
            BookingFilter::Current { now } => booking.period.is_current(*now),
            BookingFilter::Future { now } => booking.period.is_future(*now),
            BookingFilter::Status(status) => booking.status == *status,
        }
    }
}

/// 純粋関数：条件・並び順・ページングを適用する
///
/// 開始日時の降順。同じ開始日時の予約は入力順を保つ（安定ソート）。
/// インメモリのクエリ層が使用する。
pub fn select_page(
    bookings: impl IntoIterator<Item = Booking>,
    filter: BookingFilter,
    page: PageRequest,
) -> Vec<Booking> {
    let mut selected: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| filter.matches(booking))
        .collect();

    selected.sort_by(|a, b| b.start().cmp(&a.start()));

    selected
        .into_iter()
        .skip(page.skip() as usize)
        .take(page.limit() as usize)
        .collect()
}
