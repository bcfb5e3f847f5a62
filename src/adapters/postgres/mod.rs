pub mod booking_repository;
pub mod comment_repository;
pub mod item_service;
pub mod user_service;

// パブリックに型を再エクスポート
pub use booking_repository::BookingRepository as PostgresBookingRepository;
pub use comment_repository::CommentRepository as PostgresCommentRepository;
pub use item_service::ItemService as PostgresItemService;
pub use user_service::UserService as PostgresUserService;
