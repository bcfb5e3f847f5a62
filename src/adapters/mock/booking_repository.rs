use crate::domain::{
    Booking, BookingFilter, BookingId, BookingStatus, ItemId, PageRequest, UserId, bucket,
};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// BookingRepositoryのインメモリ実装
///
/// 予約を保存順に保持する。条件・並び順・ページングは
/// ドメイン層の`bucket::select_page`で適用する。
pub struct BookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
        }
    }

    /// 条件に合う承認済み予約を開始日時の昇順で返す
    fn approved_where(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut approved: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.status == BookingStatus::Approved && predicate(b))
            .cloned()
            .collect();
        approved.sort_by_key(|b| b.start());
        approved
    }
}

impl Default for BookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    /// 既存のIDへの保存はエラー（ステータスの変更は`update_status_if`のみ）
    async fn save(&self, booking: &Booking) -> Result<()> {
        let mut bookings = self.bookings.lock().unwrap();
        if bookings.iter().any(|b| b.booking_id == booking.booking_id) {
            return Err(format!("Booking with id={} already exists", booking.booking_id).into());
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    /// ロックを保持したまま確認と更新を行う
    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new_status: BookingStatus,
    ) -> Result<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id && b.status == expected)
        {
            Some(booking) => {
                booking.status = new_status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        let owned: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.booker_id == booker_id)
            .cloned()
            .collect();
        Ok(bucket::select_page(owned, filter, page))
    }

    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        let owned: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.item_owner_id == owner_id)
            .cloned()
            .collect();
        Ok(bucket::select_page(owned, filter, page))
    }

    async fn find_approved_for_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        Ok(self.approved_where(|b| b.item_id == item_id))
    }

    async fn find_approved_for_owner(&self, owner_id: UserId) -> Result<Vec<Booking>> {
        Ok(self.approved_where(|b| b.item_owner_id == owner_id))
    }

    async fn exists_for_comment_eligibility(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        Ok(self.bookings.lock().unwrap().iter().any(|b| {
            b.booker_id == user_id
                && b.item_id == item_id
                && match b.status {
                    BookingStatus::Approved => b.start() < now,
                    BookingStatus::Canceled => true,
                    _ => false,
                }
        }))
    }
}
