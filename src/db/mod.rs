/// Database repositories
pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;
