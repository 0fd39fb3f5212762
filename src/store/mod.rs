//! Document store boundary.
//!
//! The persistence engine is a collaborator, not part of the core: the
//! orchestration layer only requires atomic single-document read and write
//! with last-writer-wins semantics. There is no optimistic-concurrency
//! token; two concurrent appends to the same lesson may race and the last
//! write wins. Accepted limitation.

pub mod memory;

use uuid::Uuid;

use crate::auth::CallerId;
use crate::error::AppResult;
use crate::models::{ForumPost, Lesson};

pub use memory::MemoryStore;

/// Generic persistence for lessons, forum posts and per-user counters.
/// Failures surface as [`crate::error::AppError::Persistence`].
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_lesson(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn get_lesson(&self, id: Uuid) -> AppResult<Option<Lesson>>;
    /// All lessons owned by `owner`, newest first.
    async fn list_lessons(&self, owner: CallerId) -> AppResult<Vec<Lesson>>;
    /// Whole-document replacement keyed by `lesson.id`.
    async fn update_lesson(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn delete_lesson(&self, id: Uuid) -> AppResult<()>;

    async fn insert_post(&self, post: ForumPost) -> AppResult<ForumPost>;
    async fn get_post(&self, id: Uuid) -> AppResult<Option<ForumPost>>;
    /// Every post, newest first. Filtering and pagination happen above
    /// this boundary.
    async fn list_posts(&self) -> AppResult<Vec<ForumPost>>;
    async fn update_post(&self, post: ForumPost) -> AppResult<ForumPost>;
    async fn delete_post(&self, id: Uuid) -> AppResult<()>;

    /// Adjust a user's running comment counter by `delta`.
    async fn adjust_comment_count(&self, user: CallerId, delta: i64) -> AppResult<()>;
    async fn comment_count(&self, user: CallerId) -> AppResult<i64>;
}
