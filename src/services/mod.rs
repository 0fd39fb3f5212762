pub mod classify;
pub mod fallback;
pub mod generation;
pub mod resource_search;

pub use generation::{GenerationService, LessonContext};
pub use resource_search::ResourceSearchService;
