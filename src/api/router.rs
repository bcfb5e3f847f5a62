use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, cancel_booking, create_booking, create_comment, decide_booking, get_booking,
    get_item, list_for_booker, list_for_item_owner, list_owner_items,
};

/// Creates the API router with all booking endpoints
///
/// Bookings:
/// - POST /bookings - Request a booking
/// - GET /bookings - List bookings of the requesting user
/// - GET /bookings/owner - List bookings on the requesting user's items
/// - GET /bookings/:id - Get a booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
/// - PATCH /bookings/:id/cancel - Cancel a booking
///
/// Items:
/// - GET /items - List the requesting user's items
/// - GET /items/:id - Get item details
/// - POST /items/:id/comment - Comment on an item
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/bookings", post(create_booking).get(list_for_booker))
        .route("/bookings/owner", get(list_for_item_owner))
        .route("/bookings/:id", get(get_booking).patch(decide_booking))
        .route("/bookings/:id/cancel", patch(cancel_booking))
        .route("/items", get(list_owner_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/comment", post(create_comment))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
