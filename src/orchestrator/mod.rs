//! Orchestration layer.
//!
//! ## Responsibilities
//!
//! This layer owns the per-operation control flow and the failure policy:
//!
//! ### `lesson` - lesson orchestrator
//! - sequences generation and resource search for one request
//! - absorbs provider failures with fallback content (never fails a lesson
//!   because a provider is down)
//! - enforces ownership on every lesson mutation and single-read
//! - appends (never replaces) regenerated quizzes, searched resources and
//!   generated homework
//!
//! ### `forum` - forum aggregator
//! - CRUD plus counters (views, likes, per-user comment count) over the
//!   document store
//! - ownership checks on every mutation; reads are open
//!
//! ## Layering
//!
//! ```text
//! orchestrator (policy: sequencing, fallback, ownership)
//!     |
//! services (capabilities: generation, resource search, fallback content)
//!     |
//! clients (transports: chat completion, web search)
//!     |
//! store (persistence boundary)
//! ```

pub mod forum;
pub mod lesson;

pub use forum::{CreatePostRequest, ForumAggregator, PostFilter, PostPage, PostUpdate};
pub use lesson::{
    CreateLessonRequest, GenerateLessonRequest, HomeworkRequest, HomeworkUpdate,
    LessonOrchestrator, LessonUpdate,
};
