/// Service layer - business rules over the repositories
pub mod comments;
pub mod posts;

pub use comments::CommentService;
pub use posts::PostService;
