use crate::domain::{
    self, Booking, BookingBucket, BookingId, BookingPeriodError, Item, ItemId,
    PageRequest, RequestBookingError, StatusTransitionError, User, UserId, commands::*,
};
use crate::ports::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 各ユースケース関数に明示的に渡される。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub item_service: Arc<dyn ItemService>,
    pub user_service: Arc<dyn UserService>,
    pub comment_repository: Arc<dyn CommentRepository>,
}

/// アイテムを取得するヘルパー関数
///
/// # エラー
/// - ItemServiceError: 取得失敗
/// - ItemNotFound: アイテムが存在しない
pub(super) async fn load_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    deps.item_service
        .find_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemServiceError)?
        .ok_or(BookingApplicationError::ItemNotFound(item_id))
}

/// ユーザーを取得するヘルパー関数
pub(super) async fn load_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.user_service
        .find_by_id(user_id)
        .await
        .map_err(BookingApplicationError::UserServiceError)?
        .ok_or(BookingApplicationError::UserNotFound(user_id))
}

/// 予約を取得するヘルパー関数（閲覧権限は確認しない）
async fn load_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    deps.booking_repository
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?
        .ok_or(BookingApplicationError::BookingNotFound(booking_id))
}

async fn ensure_user_exists(deps: &ServiceDependencies, user_id: UserId) -> Result<()> {
    let exists = deps
        .user_service
        .exists(user_id)
        .await
        .map_err(BookingApplicationError::UserServiceError)?;

    if !exists {
        return Err(BookingApplicationError::UserNotFound(user_id));
    }
    Ok(())
}

/// 遷移後の予約を条件付き更新で永続化する
///
/// 読み込み後に別のリクエストがステータスを変えていた場合は
/// 最新のステータスで`InvalidStateTransition`を返す。
async fn persist_transition(
    deps: &ServiceDependencies,
    current: &Booking,
    updated: Booking,
) -> Result<Booking> {
    let applied = deps
        .booking_repository
        .update_status_if(current.booking_id, current.status, updated.status)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    if !applied {
        let latest = load_booking(deps, current.booking_id).await?;
        tracing::debug!(
            "Status of booking id={} changed concurrently to {}",
            latest.booking_id,
            latest.status
        );
        return Err(BookingApplicationError::InvalidStateTransition {
            booking_id: latest.booking_id,
            from: latest.status,
        });
    }

    Ok(updated)
}

fn invalid_transition(
    booking_id: BookingId,
) -> impl Fn(StatusTransitionError) -> BookingApplicationError {
    move |err| BookingApplicationError::InvalidStateTransition {
        booking_id,
        from: err.from,
    }
}

/// 予約を申請する
///
/// ビジネスルール（この順で確認する）：
/// 1. アイテムが存在すること
/// 2. 申請者がアイテムの所有者でないこと（所有者の場合もItemNotFound）
/// 3. 申請者が存在すること
/// 4. アイテムが貸出可能であること
/// 5. 終了日時が開始日時より後であること
///
/// 同じアイテムの予約期間の重複は確認しない。
///
/// # 一貫性保証
///
/// 貸出可否の確認と保存は1つのトランザクションではない。
/// 確認後に所有者が貸出可否を変更した場合でも予約は保存される。
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<Booking> {
    // 1. アイテムの存在確認
    let item = load_item(deps, cmd.item_id).await?;

    // 2. 自分のアイテムは「存在しない」扱い
    if item.is_owned_by(cmd.booker_id) {
        return Err(BookingApplicationError::ItemNotFound(item.item_id));
    }

    // 3. 予約者の存在確認
    let booker = load_user(deps, cmd.booker_id).await?;

    // 4, 5. ドメイン層の純粋関数を呼び出し
    let booking = domain::booking::request_booking(&item, booker.user_id, cmd.start, cmd.end)
        .map_err(|e| match e {
            RequestBookingError::ItemNotAvailable => {
                BookingApplicationError::ItemNotAvailable(item.item_id)
            }
            RequestBookingError::InvalidDateRange(BookingPeriodError::EndNotAfterStart {
                start,
                end,
            }) => BookingApplicationError::InvalidDateRange { start, end },
        })?;

    // 6. 保存
    deps.booking_repository
        .save(&booking)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    tracing::debug!(
        "Booking saved with id={}: item={}, booker={}",
        booking.booking_id,
        booking.item_id,
        booking.booker_id
    );

    Ok(booking)
}

/// 予約を取得する
///
/// 予約者とアイテム所有者のみ閲覧可能。
/// それ以外のユーザーには権限エラーではなくBookingNotFoundを返す。
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    user_id: UserId,
) -> Result<Booking> {
    let booking = load_booking(deps, booking_id).await?;

    if !booking.is_visible_to(user_id) {
        return Err(BookingApplicationError::BookingNotFound(booking_id));
    }

    tracing::debug!("Booking with id={} was obtained", booking_id);
    Ok(booking)
}

/// 予約者の予約一覧を取得する
///
/// ユーザーの存在確認を分類の解釈より先に行うため、
/// 存在しないユーザーと未知の分類が重なった場合はUserNotFoundになる。
pub async fn list_for_booker(
    deps: &ServiceDependencies,
    user_id: UserId,
    state: &str,
    page: PageRequest,
    now: DateTime<Utc>,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, user_id).await?;
    let bucket: BookingBucket = state.parse()?;

    let bookings = deps
        .booking_repository
        .find_by_booker(user_id, bucket.filter(now), page)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    tracing::debug!(
        "Received {} bookings in {} for the user with id={}",
        bookings.len(),
        bucket.as_str(),
        user_id
    );
    Ok(bookings)
}

/// 所有者のアイテムに対する予約一覧を取得する
///
/// 分類の扱いは`list_for_booker`と同じ。
pub async fn list_for_item_owner(
    deps: &ServiceDependencies,
    user_id: UserId,
    state: &str,
    page: PageRequest,
    now: DateTime<Utc>,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, user_id).await?;
    let bucket: BookingBucket = state.parse()?;

    let bookings = deps
        .booking_repository
        .find_by_item_owner(user_id, bucket.filter(now), page)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    tracing::debug!(
        "Received {} bookings in {} for the items of the user with id={}",
        bookings.len(),
        bucket.as_str(),
        user_id
    );
    Ok(bookings)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 操作者がアイテムの所有者であること（NotOwner）
/// - 予約がWAITINGであること（InvalidStateTransition）
///
/// ステータスの更新は条件付き更新で行い、同時に承認された場合は
/// 一方のみが成功する。
pub async fn decide_booking(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<Booking> {
    let booking = load_booking(deps, cmd.booking_id).await?;

    if booking.item_owner_id != cmd.owner_id {
        return Err(BookingApplicationError::NotOwner {
            item_id: booking.item_id,
            user_id: cmd.owner_id,
        });
    }

    let decided = domain::booking::decide_booking(&booking, cmd.approve)
        .map_err(invalid_transition(booking.booking_id))?;

    let decided = persist_transition(deps, &booking, decided).await?;

    tracing::debug!(
        "Booking with id={} was updated to {}",
        decided.booking_id,
        decided.status
    );
    Ok(decided)
}

/// 予約をキャンセルする
///
/// 予約者のみキャンセル可能。それ以外のユーザーにはBookingNotFoundを返す。
/// WAITINGまたはAPPROVEDの予約のみ受け付ける。
pub async fn cancel_booking(deps: &ServiceDependencies, cmd: CancelBooking) -> Result<Booking> {
    let booking = load_booking(deps, cmd.booking_id).await?;

    if booking.booker_id != cmd.booker_id {
        return Err(BookingApplicationError::BookingNotFound(cmd.booking_id));
    }

    let canceled = domain::booking::cancel_booking(&booking)
        .map_err(invalid_transition(booking.booking_id))?;

    let canceled = persist_transition(deps, &booking, canceled).await?;

    tracing::debug!("Booking with id={} was canceled", canceled.booking_id);
    Ok(canceled)
}

