use crate::application::booking::{
    self as service, BookingApplicationError, ServiceDependencies,
};
use crate::domain::{
    BookingBucket, BookingId, ItemId, PageRequest, UserId,
    commands::{CancelBooking, CreateBooking, CreateComment, DecideBooking},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        BookingResponse, CommentResponse, CreateBookingRequest, CreateCommentRequest, DecideQuery,
        ItemDetailsResponse, ListBookingsQuery,
    },
};

/// リクエストしたユーザーのIDを運ぶヘッダー
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// ヘッダーからリクエストしたユーザーのIDを取り出す
fn requesting_user(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let value = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing {} header", USER_ID_HEADER)))?;

    value
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .map(UserId::from_uuid)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid {} header", USER_ID_HEADER)))
}

/// 分類とページングをサービス呼び出し前に検証する
///
/// 未知の分類はユーザーの存在確認より先にUnknownStateとなる。
fn parse_list_query(query: &ListBookingsQuery) -> Result<(BookingBucket, PageRequest), ApiError> {
    let bucket: BookingBucket = query
        .state()
        .parse()
        .map_err(BookingApplicationError::from)?;
    let page = PageRequest::new(query.offset(), query.limit())
        .map_err(BookingApplicationError::from)?;
    Ok((bucket, page))
}

// ============================================================================
// Booking handlers
// ============================================================================

/// POST /bookings - 予約を申請
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booker_id = requesting_user(&headers)?;

    let cmd = CreateBooking {
        item_id: ItemId::from_uuid(req.item_id),
        booker_id,
        start: req.start,
        end: req.end,
    };

    let booking = service::create_booking(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// GET /bookings/:id - 予約を取得（予約者と所有者のみ）
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let user_id = requesting_user(&headers)?;

    let booking =
        service::get_booking(&state.service_deps, BookingId::from_uuid(booking_id), user_id)
            .await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings - 予約者の予約一覧
///
/// クエリパラメータ:
/// - state: ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED（既定はALL）
/// - from: 何件目から（既定は0）
/// - size: ページサイズ（既定は100）
pub async fn list_for_booker(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let (bucket, page) = parse_list_query(&query)?;
    let user_id = requesting_user(&headers)?;

    let bookings = service::list_for_booker(
        &state.service_deps,
        user_id,
        bucket.as_str(),
        page,
        Utc::now(),
    )
    .await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner - 所有者のアイテムに対する予約一覧
///
/// クエリパラメータは`GET /bookings`と同じ。
pub async fn list_for_item_owner(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let (bucket, page) = parse_list_query(&query)?;
    let user_id = requesting_user(&headers)?;

    let bookings = service::list_for_item_owner(
        &state.service_deps,
        user_id,
        bucket.as_str(),
        page,
        Utc::now(),
    )
    .await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// PATCH /bookings/:id?approved=bool - 予約を承認または却下（所有者のみ）
pub async fn decide_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<DecideQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    let owner_id = requesting_user(&headers)?;

    let cmd = DecideBooking {
        booking_id: BookingId::from_uuid(booking_id),
        owner_id,
        approve: query.approved,
    };

    let booking = service::decide_booking(&state.service_deps, cmd).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// PATCH /bookings/:id/cancel - 予約をキャンセル（予約者のみ）
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booker_id = requesting_user(&headers)?;

    let cmd = CancelBooking {
        booking_id: BookingId::from_uuid(booking_id),
        booker_id,
    };

    let booking = service::cancel_booking(&state.service_deps, cmd).await?;
    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Item handlers
// ============================================================================

/// GET /items/:id - アイテム詳細
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemDetailsResponse>, ApiError> {
    let viewer_id = requesting_user(&headers)?;

    let details = service::get_item_details(
        &state.service_deps,
        ItemId::from_uuid(item_id),
        viewer_id,
        Utc::now(),
    )
    .await?;
    Ok(Json(ItemDetailsResponse::from(details)))
}

/// GET /items - 所有者のアイテム一覧
pub async fn list_owner_items(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ItemDetailsResponse>>, ApiError> {
    let owner_id = requesting_user(&headers)?;

    let items = service::list_owner_items(&state.service_deps, owner_id, Utc::now()).await?;
    Ok(Json(
        items.into_iter().map(ItemDetailsResponse::from).collect(),
    ))
}

/// POST /items/:id/comment - コメントを投稿
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let author_id = requesting_user(&headers)?;

    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Comment text must not be blank".to_string(),
        ));
    }

    let cmd = CreateComment {
        item_id: ItemId::from_uuid(item_id),
        author_id,
        text: req.text,
        created_at: Utc::now(),
    };

    let comment = service::create_comment(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}
