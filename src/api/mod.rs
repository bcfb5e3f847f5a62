pub mod error;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use handlers::{AppState, USER_ID_HEADER};
pub use router::create_router;
pub use types::*;
