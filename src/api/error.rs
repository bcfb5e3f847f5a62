use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエストの形式に関するエラーを
/// HTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    /// ヘッダーや本文の形式が不正
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

fn business_error(status: StatusCode, error_type: &str, err: &BookingApplicationError) -> Response {
    tracing::warn!("{}", err);
    let body = Json(ErrorResponse::new(error_type, err.to_string()));
    (status, body).into_response()
}

fn infrastructure_error(
    error_type: &str,
    message: &str,
    source: &(dyn std::error::Error + Send + Sync),
) -> Response {
    // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
    tracing::error!("{}: {}", message, source);
    let body = Json(ErrorResponse::new(error_type, message));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::BadRequest(message) => {
                tracing::warn!("{}", message);
                let body = Json(ErrorResponse::new("BAD_REQUEST", message));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::Application(err) => err,
        };

        use BookingApplicationError as E;
        match &err {
            // 404 Not Found - リソースが存在しない（または見せない）
            E::ItemNotFound(_) => business_error(StatusCode::NOT_FOUND, "ITEM_NOT_FOUND", &err),
            E::UserNotFound(_) => business_error(StatusCode::NOT_FOUND, "USER_NOT_FOUND", &err),
            E::BookingNotFound(_) => {
                business_error(StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND", &err)
            }

            // 403 Forbidden - 所有者以外による操作
            E::NotOwner { .. } => business_error(StatusCode::FORBIDDEN, "NOT_OWNER", &err),

            // 400 Bad Request - ビジネスルール違反
            E::ItemNotAvailable(_) => {
                business_error(StatusCode::BAD_REQUEST, "ITEM_NOT_AVAILABLE", &err)
            }
            E::InvalidDateRange { .. } => {
                business_error(StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE", &err)
            }
            E::InvalidStateTransition { .. } => {
                business_error(StatusCode::BAD_REQUEST, "INVALID_STATE_TRANSITION", &err)
            }
            E::UnknownState(_) => business_error(StatusCode::BAD_REQUEST, "UNKNOWN_STATE", &err),
            E::UserDidNotBookItem { .. } => {
                business_error(StatusCode::BAD_REQUEST, "USER_DID_NOT_BOOK_ITEM", &err)
            }
            E::InvalidPagination => {
                business_error(StatusCode::BAD_REQUEST, "INVALID_PAGINATION", &err)
            }

            // 500 Internal Server Error - システム障害
            E::BookingRepositoryError(e) => {
                infrastructure_error("BOOKING_REPOSITORY_ERROR", "Booking repository error", e.as_ref())
            }
            E::CommentRepositoryError(e) => {
                infrastructure_error("COMMENT_REPOSITORY_ERROR", "Comment repository error", e.as_ref())
            }
            E::ItemServiceError(e) => {
                infrastructure_error("ITEM_SERVICE_ERROR", "Item service error", e.as_ref())
            }
            E::UserServiceError(e) => {
                infrastructure_error("USER_SERVICE_ERROR", "User service error", e.as_ref())
            }
        }
    }
}
