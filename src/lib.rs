//! # EdBridge
//!
//! Lesson generation and forum backend for teachers: a chat-completion
//! provider writes the content, a web-search provider finds resources, and
//! a fixed fallback policy keeps every operation productive when either
//! provider is down.
//!
//! ## Architecture
//!
//! The system is layered strictly top-down:
//!
//! ### ① Clients
//! - `clients/` - provider transports, one trait per capability
//! - `GroqClient` - chat completion over the OpenAI-compatible API
//! - `TavilyClient` - web search restricted to educational domains
//!
//! ### ② Services
//! - `services/` - capabilities over the raw transports
//! - `GenerationService` - prompt assembly and payload parsing
//! - `ResourceSearchService` - search, normalize, classify; never fails
//! - `fallback` - the deterministic substitute content
//!
//! ### ③ Orchestration
//! - `orchestrator/lesson` - sequencing, fallback policy, ownership, CRUD
//! - `orchestrator/forum` - forum posts, comments and counters
//!
//! ### ④ Store
//! - `store/` - atomic single-document persistence behind a trait

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod store;
pub mod utils;

// Re-export common types.
pub use auth::CallerId;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ForumPost, Lesson};
pub use orchestrator::{ForumAggregator, LessonOrchestrator};
pub use store::{DocumentStore, MemoryStore};
