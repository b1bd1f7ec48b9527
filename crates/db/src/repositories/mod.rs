//! Zero-sized repositories over `&PgPool`, one per entity.

mod artwork_repo;
mod collection_repo;
mod comment_repo;
mod feed_repo;
mod prompt_repo;
mod session_repo;
mod stats_repo;
mod tag_repo;
mod user_repo;

pub use artwork_repo::ArtworkRepo;
pub use collection_repo::CollectionRepo;
pub use comment_repo::CommentRepo;
pub use feed_repo::FeedRepo;
pub use prompt_repo::PromptRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use tag_repo::{normalize_tag_name, TagRepo};
pub use user_repo::UserRepo;
