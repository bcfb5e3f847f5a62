use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::{Booking, ItemId};

/// アイテムに付与する直近・次回の予約
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingMarkers {
    /// 開始日時が現在より前の予約のうち、最も遅く始まったもの
    pub last: Option<Booking>,
    /// 開始日時が現在より後の予約のうち、最も早く始まるもの
    pub next: Option<Booking>,
}

impl BookingMarkers {
    /// 所有者以外に見せる空のマーカー
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// 純粋関数：開始日時の昇順に並んだ承認済み予約から直近・次回を求める
///
/// 前提：入力は開始日時の昇順。並べ替えは行わない。
/// 開始日時が`now`と等しい予約はどちらにも該当しない。
pub fn reduce_markers(sorted_bookings: &[Booking], now: DateTime<Utc>) -> BookingMarkers {
    let mut markers = BookingMarkers::default();

    for booking in sorted_bookings {
        let start = booking.start();
        if start < now {
            // 昇順なので最後に見つかったものが直近
            markers.last = Some(booking.clone());
        } else if start > now {
            markers.next = Some(booking.clone());
            break;
        }
    }

    markers
}

/// 純粋関数：予約をアイテムごとにまとめる
///
/// グループ内の順序は入力順を保つ。
pub fn group_by_item(bookings: &[Booking]) -> HashMap<ItemId, Vec<Booking>> {
    let mut groups: HashMap<ItemId, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        groups
            .entry(booking.item_id)
            .or_default()
            .push(booking.clone());
    }
    groups
}

/// 純粋関数：複数アイテムの予約をまとめて集約する
///
/// 所有者の全アイテム分を1回の問い合わせで取得し、
/// メモリ上でアイテムごとに分けてから`reduce_markers`を適用する。
/// 予約のないアイテムは結果に含まれない。
pub fn reduce_markers_by_item(
    sorted_bookings: &[Booking],
    now: DateTime<Utc>,
) -> HashMap<ItemId, BookingMarkers> {
    group_by_item(sorted_bookings)
        .into_iter()
        .map(|(item_id, bookings)| (item_id, reduce_markers(&bookings, now)))
        .collect()
}
