mod booking_service;
mod comments;
mod errors;
mod item_details;

pub use booking_service::{
    ServiceDependencies, cancel_booking, create_booking, decide_booking, get_booking,
    list_for_booker, list_for_item_owner,
};
pub use comments::{check_comment_eligibility, create_comment};
pub use errors::{BookingApplicationError, Result};
pub use item_details::{ItemDetails, get_item_details, list_owner_items};
