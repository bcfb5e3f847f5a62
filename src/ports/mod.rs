pub mod booking_repository;
pub mod comment_repository;
pub mod item_service;
pub mod user_service;

pub use booking_repository::BookingRepository;
pub use comment_repository::CommentRepository;
pub use item_service::ItemService;
pub use user_service::UserService;
