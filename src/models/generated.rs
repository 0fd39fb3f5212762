//! Typed partial records for provider responses.
//!
//! The generation provider is asked for one JSON object per kind, but the
//! shapes it actually returns are best treated as partial: any key may be
//! missing. Each kind gets an explicit partial type with defined
//! merge-under/defaulting semantics instead of runtime shape probing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lesson::{HomeworkQuestion, QuizQuestion};

/// Partial lesson-content response. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonContent {
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub learning_outcomes: Vec<String>,
    pub activities: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub real_world_examples: Vec<String>,
}

/// Quiz responses arrive either as `{"questions": [...]}` or as a bare
/// array of the same question shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuizPayload {
    Wrapped { questions: Vec<QuizQuestion> },
    Bare(Vec<QuizQuestion>),
}

impl QuizPayload {
    pub fn into_questions(self) -> Vec<QuizQuestion> {
        match self {
            QuizPayload::Wrapped { questions } => questions,
            QuizPayload::Bare(questions) => questions,
        }
    }
}

/// Partial homework response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedHomework {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Vec<HomeworkQuestion>,
    pub total_points: Option<i64>,
}

/// Improvement suggestions across the seven fixed pedagogical categories.
///
/// Values are kept loose (`serde_json::Value`) on purpose: providers answer
/// with strings, lists or nested maps and the rendering side copes; the
/// server only guarantees that after [`Suggestions::merge_under`] every
/// category key is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestions {
    pub content_enhancement: Option<Value>,
    pub learning_outcomes: Option<Value>,
    pub activities: Option<Value>,
    pub assessment: Option<Value>,
    pub real_world_relevance: Option<Value>,
    pub differentiation: Option<Value>,
    pub technology_integration: Option<Value>,
}

impl Suggestions {
    /// Merge-under: present values win, `fallback` fills only absent keys.
    pub fn merge_under(self, fallback: Suggestions) -> Suggestions {
        Suggestions {
            content_enhancement: self.content_enhancement.or(fallback.content_enhancement),
            learning_outcomes: self.learning_outcomes.or(fallback.learning_outcomes),
            activities: self.activities.or(fallback.activities),
            assessment: self.assessment.or(fallback.assessment),
            real_world_relevance: self.real_world_relevance.or(fallback.real_world_relevance),
            differentiation: self.differentiation.or(fallback.differentiation),
            technology_integration: self.technology_integration.or(fallback.technology_integration),
        }
    }

    /// True when all seven category keys hold a value.
    pub fn is_complete(&self) -> bool {
        self.content_enhancement.is_some()
            && self.learning_outcomes.is_some()
            && self.activities.is_some()
            && self.assessment.is_some()
            && self.real_world_relevance.is_some()
            && self.differentiation.is_some()
            && self.technology_integration.is_some()
    }
}
