use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::booking::ItemDetails;
use crate::domain::{Booking, BookingBucket, Comment, PageRequest};

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    /// 分類（既定はALL）
    pub state: Option<String>,
    /// 何件目から（ページ番号の算出に使われる）
    pub from: Option<u32>,
    /// ページサイズ
    pub size: Option<u32>,
}

impl ListBookingsQuery {
    pub fn state(&self) -> &str {
        self.state
            .as_deref()
            .unwrap_or(BookingBucket::All.as_str())
    }

    pub fn offset(&self) -> u32 {
        self.from.unwrap_or(0)
    }

    pub fn limit(&self) -> u32 {
        self.size.unwrap_or(PageRequest::DEFAULT_LIMIT)
    }
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id）
#[derive(Debug, Deserialize)]
pub struct DecideQuery {
    pub approved: bool,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.booking_id.value(),
            item_id: booking.item_id.value(),
            booker_id: booking.booker_id.value(),
            start: booking.start(),
            end: booking.end(),
            status: booking.status.as_str().to_string(),
        }
    }
}

/// アイテム詳細に埋め込む予約の要約
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortBookingResponse {
    pub id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<Booking> for ShortBookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.booking_id.value(),
            booker_id: booking.booker_id.value(),
            start: booking.start(),
            end: booking.end(),
        }
    }
}

/// コメント投稿リクエスト（POST /items/:id/comment）
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// コメントレスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.value(),
            text: comment.text,
            author_name: comment.author_name,
            created: comment.created_at,
        }
    }
}

/// アイテム詳細レスポンス（GET /items/:id と GET /items）
///
/// 直近・次回の予約は所有者が閲覧した場合のみ値を持つ。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailsResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub last_booking: Option<ShortBookingResponse>,
    pub next_booking: Option<ShortBookingResponse>,
    pub comments: Vec<CommentResponse>,
}

impl From<ItemDetails> for ItemDetailsResponse {
    fn from(details: ItemDetails) -> Self {
        Self {
            id: details.item.item_id.value(),
            name: details.item.name,
            description: details.item.description,
            available: details.item.available,
            last_booking: details.markers.last.map(ShortBookingResponse::from),
            next_booking: details.markers.next.map(ShortBookingResponse::from),
            comments: details
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
