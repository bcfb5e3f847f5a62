pub mod booking;
pub mod bucket;
pub mod commands;
pub mod errors;
pub mod item;
pub mod timeline;
pub mod value_objects;

pub use booking::{Booking, BookingPeriod, BookingStatus, StatusTransition};
pub use bucket::{BookingBucket, BookingFilter};
pub use errors::*;
pub use item::{Comment, Item, User};
pub use timeline::BookingMarkers;
pub use value_objects::*;
