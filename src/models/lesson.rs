//! Lesson domain records.
//!
//! Wire names are camelCase to stay compatible with the existing document
//! shapes. All list fields are plain `Vec`s with serde defaults so a lesson
//! never carries null/absent lists, even when generation fell back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CallerId;

/// A persisted bundle of generated educational content for one
/// topic/subject/grade combination.
///
/// Owner is immutable after creation; `updated_at` is bumped on every
/// mutation. The append-style operations (quiz regeneration, resource
/// search, homework generation) extend the lists rather than replacing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub topic: String,
    pub subject: String,
    /// Free-form grade token, not strictly numeric ("K", "7", "College").
    pub grade_level: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub real_world_examples: Vec<String>,
    #[serde(default)]
    pub homework: Vec<Homework>,
    #[serde(default)]
    pub additional_notes: String,
    pub owner: CallerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    /// Default title used whenever generation did not supply one.
    pub fn default_title(topic: &str, grade_level: &str) -> String {
        format!("{} for Grade {}", topic, grade_level)
    }

    /// Bump the mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One quiz question. MCQ-style questions carry exactly 4 options and a
/// single-letter answer "A".."D"; non-MCQ questions leave `options` empty
/// and put free text in `answer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Inferred medium of a supplementary resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Article,
    Interactive,
    Image,
    Document,
    Other,
}

impl ResourceType {
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Interactive => "interactive",
            ResourceType::Image => "image",
            ResourceType::Document => "document",
            ResourceType::Other => "other",
        }
    }

    /// Parse a caller-supplied hint. Unrecognized hints coerce to `None`
    /// so free text never leaks into the enum.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "video" => Some(ResourceType::Video),
            "article" => Some(ResourceType::Article),
            "interactive" => Some(ResourceType::Interactive),
            "image" => Some(ResourceType::Image),
            "document" => Some(ResourceType::Document),
            "other" => Some(ResourceType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A link to supplementary educational material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// Truncated to at most 100 chars.
    pub title: String,
    /// Truncated to at most ~200 chars, preferring a sentence boundary.
    pub description: String,
    pub url: String,
    /// Hostname derived from the url, "www." stripped.
    pub source: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// Homework question kinds, shared by the assignment and its questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkKind {
    Mcq,
    ShortAnswer,
    Diagram,
    Creative,
    #[default]
    Other,
}

impl HomeworkKind {
    pub fn name(self) -> &'static str {
        match self {
            HomeworkKind::Mcq => "mcq",
            HomeworkKind::ShortAnswer => "short_answer",
            HomeworkKind::Diagram => "diagram",
            HomeworkKind::Creative => "creative",
            HomeworkKind::Other => "other",
        }
    }

    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "mcq" => Some(HomeworkKind::Mcq),
            "short_answer" => Some(HomeworkKind::ShortAnswer),
            "diagram" => Some(HomeworkKind::Diagram),
            "creative" => Some(HomeworkKind::Creative),
            "other" => Some(HomeworkKind::Other),
            _ => None,
        }
    }
}

fn default_points() -> i64 {
    1
}

/// One homework question. `options` is populated for MCQs only; `answer`
/// holds a letter for MCQs and free text or grading criteria otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeworkQuestion {
    pub question: String,
    #[serde(rename = "type", default)]
    pub kind: HomeworkKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_points")]
    pub points: i64,
}

/// A homework assignment embedded in a lesson.
///
/// `total_points` is carried as reported by generation; it is not validated
/// against the sum of question points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: HomeworkKind,
    #[serde(default)]
    pub questions: Vec<HomeworkQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub total_points: i64,
}
