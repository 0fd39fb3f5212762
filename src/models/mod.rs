pub mod forum;
pub mod generated;
pub mod lesson;

pub use forum::{Comment, ForumCategory, ForumPost};
pub use generated::{GeneratedHomework, LessonContent, QuizPayload, Suggestions};
pub use lesson::{Homework, HomeworkKind, HomeworkQuestion, Lesson, QuizQuestion, Resource, ResourceType};
