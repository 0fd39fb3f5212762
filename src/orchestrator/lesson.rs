//! Lesson orchestrator.
//!
//! One-shot coordination per operation: validate, load and guard, call the
//! capability services, absorb provider failures with fallback content,
//! assemble the record fully in memory, then persist with a single store
//! call. Only validation, authorization, not-found and persistence failures
//! reach the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{assert_owner, CallerId};
use crate::clients::{GenerationApi, GroqClient, SearchApi, TavilyClient};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Homework, HomeworkKind, Lesson, QuizQuestion, Resource, Suggestions};
use crate::services::{
    fallback, resource_search::DEFAULT_MAX_RESULTS, GenerationService, LessonContext,
    ResourceSearchService,
};
use crate::store::DocumentStore;

const DEFAULT_QUIZ_COUNT: usize = 5;
const DEFAULT_HOMEWORK_COUNT: usize = 10;
const DEFAULT_DIFFICULTY: &str = "medium";

/// Request payload for lesson generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateLessonRequest {
    pub topic: String,
    pub subject: String,
    pub grade_level: String,
    pub additional_notes: String,
}

/// Request payload for manual lesson creation (no providers involved).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLessonRequest {
    pub topic: String,
    pub subject: String,
    pub grade_level: String,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub additional_notes: Option<String>,
}

/// Partial lesson update; only present fields are replaced. Owner and
/// creation timestamp are immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub learning_outcomes: Option<Vec<String>>,
    pub activities: Option<Vec<String>>,
    pub quiz: Option<Vec<QuizQuestion>>,
    pub resources: Option<Vec<Resource>>,
    pub real_world_examples: Option<Vec<String>>,
    pub additional_notes: Option<String>,
}

/// Request payload for homework generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeworkRequest {
    pub question_types: Vec<HomeworkKind>,
    pub number_of_questions: Option<usize>,
    pub difficulty: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial homework update; only present fields are replaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeworkUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub total_points: Option<i64>,
}

/// Central coordinator for lesson operations.
pub struct LessonOrchestrator<G: GenerationApi, S: SearchApi, D: DocumentStore> {
    generation: GenerationService<G>,
    search: ResourceSearchService<S>,
    store: Arc<D>,
    /// Result count requested from the search provider when the caller does
    /// not supply one.
    max_results: usize,
}

impl<D: DocumentStore> LessonOrchestrator<GroqClient, TavilyClient, D> {
    /// Wire up the production providers from configuration.
    pub fn from_config(config: &Config, store: Arc<D>) -> Self {
        Self::new(
            GenerationService::new(GroqClient::new(config)),
            ResourceSearchService::new(TavilyClient::new(config)),
            store,
        )
        .with_max_results(config.search_max_results)
    }
}

impl<G: GenerationApi, S: SearchApi, D: DocumentStore> LessonOrchestrator<G, S, D> {
    pub fn new(
        generation: GenerationService<G>,
        search: ResourceSearchService<S>,
        store: Arc<D>,
    ) -> Self {
        Self {
            generation,
            search,
            store,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override the default search result count.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Generate and persist a complete lesson.
    ///
    /// Provider failures are absorbed: generation falls back to placeholder
    /// content, search falls back to the deterministic resource set. Only a
    /// persistence failure aborts the operation.
    pub async fn generate_lesson(
        &self,
        req: GenerateLessonRequest,
        owner: CallerId,
    ) -> AppResult<Lesson> {
        require_fields(&[
            ("topic", &req.topic),
            ("subject", &req.subject),
            ("gradeLevel", &req.grade_level),
        ])?;

        info!(topic = %req.topic, subject = %req.subject, grade = %req.grade_level, "generating lesson");

        let ctx = LessonContext {
            topic: &req.topic,
            subject: &req.subject,
            grade_level: &req.grade_level,
            additional_notes: &req.additional_notes,
        };
        let query = resource_query(&req.topic, &req.subject, &req.grade_level);

        // The two provider calls are independent; running them concurrently
        // changes latency, not observable results.
        let (content, resources) = tokio::join!(
            self.generation.generate_lesson_content(&ctx),
            self.search.search(&query, "all", self.max_results, &req.topic),
        );

        let content = content.unwrap_or_else(|e| {
            warn!("lesson content generation failed ({e}), substituting fallback content");
            fallback::lesson_content(&req.topic, &req.subject, &req.grade_level)
        });

        let now = Utc::now();
        let lesson = Lesson {
            id: Uuid::new_v4(),
            title: content
                .title
                .unwrap_or_else(|| Lesson::default_title(&req.topic, &req.grade_level)),
            explanation: content.explanation.unwrap_or_default(),
            learning_outcomes: content.learning_outcomes,
            activities: content.activities,
            quiz: content.quiz,
            resources,
            real_world_examples: content.real_world_examples,
            homework: Vec::new(),
            topic: req.topic,
            subject: req.subject,
            grade_level: req.grade_level,
            additional_notes: req.additional_notes,
            owner,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_lesson(lesson).await
    }

    /// Generate additional quiz questions and append them to the lesson.
    /// Returns the newly generated questions.
    pub async fn regenerate_quiz(
        &self,
        lesson_id: Uuid,
        caller: CallerId,
        count: Option<usize>,
        difficulty: Option<&str>,
    ) -> AppResult<Vec<QuizQuestion>> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;
        let count = count.unwrap_or(DEFAULT_QUIZ_COUNT);
        let difficulty = difficulty.unwrap_or(DEFAULT_DIFFICULTY);

        let questions = match self.generation.generate_quiz(&lesson, count, difficulty).await {
            Ok(questions) => questions,
            Err(e) => {
                warn!(%lesson_id, "quiz generation failed ({e}), no new questions added");
                fallback::quiz()
            }
        };

        lesson.quiz.extend(questions.iter().cloned());
        lesson.touch();
        self.store.update_lesson(lesson).await?;

        Ok(questions)
    }

    /// Search for additional resources and append them to the lesson.
    /// Returns the newly found resources.
    pub async fn append_resources(
        &self,
        lesson_id: Uuid,
        caller: CallerId,
        resource_type_hint: Option<&str>,
        max_results: Option<usize>,
    ) -> AppResult<Vec<Resource>> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;
        let hint = resource_type_hint.unwrap_or("all");
        let max_results = max_results.unwrap_or(self.max_results);

        let query = resource_query(&lesson.topic, &lesson.subject, &lesson.grade_level);
        let found = self.search.search(&query, hint, max_results, &lesson.topic).await;

        lesson.resources.extend(found.iter().cloned());
        lesson.touch();
        self.store.update_lesson(lesson).await?;

        Ok(found)
    }

    /// Produce improvement suggestions for a lesson. Pure advise operation:
    /// the lesson is not mutated. The result always carries all seven
    /// category keys; absent ones are backfilled from the fixed fallback
    /// map (merge-under).
    pub async fn improve_lesson(
        &self,
        lesson_id: Uuid,
        caller: CallerId,
    ) -> AppResult<Suggestions> {
        let lesson = self.load_owned(lesson_id, caller).await?;

        let suggestions = match self.generation.generate_suggestions(&lesson).await {
            Ok(partial) => partial.merge_under(fallback::suggestions()),
            Err(e) => {
                warn!(%lesson_id, "suggestion generation failed ({e}), using fallback map");
                fallback::suggestions()
            }
        };

        Ok(suggestions)
    }

    /// Generate a homework assignment and append it to the lesson. Returns
    /// the new assignment.
    pub async fn generate_homework(
        &self,
        lesson_id: Uuid,
        caller: CallerId,
        req: HomeworkRequest,
    ) -> AppResult<Homework> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;

        let question_types = if req.question_types.is_empty() {
            vec![
                HomeworkKind::Mcq,
                HomeworkKind::ShortAnswer,
                HomeworkKind::Diagram,
                HomeworkKind::Creative,
            ]
        } else {
            req.question_types
        };
        let count = req.number_of_questions.unwrap_or(DEFAULT_HOMEWORK_COUNT);
        let difficulty = req.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY);

        let generated = match self
            .generation
            .generate_homework(&lesson, &question_types, count, difficulty)
            .await
        {
            Ok(generated) => generated,
            Err(e) => {
                warn!(%lesson_id, "homework generation failed ({e}), substituting placeholder");
                fallback::homework(&lesson.topic, &lesson.grade_level)
            }
        };

        let points_sum: i64 = generated.questions.iter().map(|q| q.points).sum();
        let homework = Homework {
            id: Uuid::new_v4(),
            title: generated
                .title
                .unwrap_or_else(|| format!("{} Homework Assignment", lesson.topic)),
            description: generated.description.unwrap_or_default(),
            kind: question_types.first().copied().unwrap_or_default(),
            questions: generated.questions,
            due_date: req.due_date,
            total_points: generated.total_points.unwrap_or(points_sum),
        };

        lesson.homework.push(homework.clone());
        lesson.touch();
        self.store.update_lesson(lesson).await?;

        Ok(homework)
    }

    // ---------- plain CRUD ----------

    /// All lessons owned by the caller, newest first.
    pub async fn list_lessons(&self, caller: CallerId) -> AppResult<Vec<Lesson>> {
        self.store.list_lessons(caller).await
    }

    /// Single lesson read. Lessons are private: owner only.
    pub async fn get_lesson(&self, lesson_id: Uuid, caller: CallerId) -> AppResult<Lesson> {
        self.load_owned(lesson_id, caller).await
    }

    /// Create a lesson without touching any provider.
    pub async fn create_lesson(
        &self,
        req: CreateLessonRequest,
        owner: CallerId,
    ) -> AppResult<Lesson> {
        require_fields(&[
            ("topic", &req.topic),
            ("subject", &req.subject),
            ("gradeLevel", &req.grade_level),
        ])?;

        let now = Utc::now();
        let lesson = Lesson {
            id: Uuid::new_v4(),
            title: req
                .title
                .unwrap_or_else(|| Lesson::default_title(&req.topic, &req.grade_level)),
            explanation: req.explanation.unwrap_or_default(),
            learning_outcomes: Vec::new(),
            activities: Vec::new(),
            quiz: Vec::new(),
            resources: Vec::new(),
            real_world_examples: Vec::new(),
            homework: Vec::new(),
            topic: req.topic,
            subject: req.subject,
            grade_level: req.grade_level,
            additional_notes: req.additional_notes.unwrap_or_default(),
            owner,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_lesson(lesson).await
    }

    /// Owner-only partial update.
    pub async fn update_lesson(
        &self,
        lesson_id: Uuid,
        caller: CallerId,
        update: LessonUpdate,
    ) -> AppResult<Lesson> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;

        if let Some(title) = update.title {
            lesson.title = title;
        }
        if let Some(explanation) = update.explanation {
            lesson.explanation = explanation;
        }
        if let Some(outcomes) = update.learning_outcomes {
            lesson.learning_outcomes = outcomes;
        }
        if let Some(activities) = update.activities {
            lesson.activities = activities;
        }
        if let Some(quiz) = update.quiz {
            lesson.quiz = quiz;
        }
        if let Some(resources) = update.resources {
            lesson.resources = resources;
        }
        if let Some(examples) = update.real_world_examples {
            lesson.real_world_examples = examples;
        }
        if let Some(notes) = update.additional_notes {
            lesson.additional_notes = notes;
        }

        lesson.touch();
        self.store.update_lesson(lesson).await
    }

    /// Owner-only delete.
    pub async fn delete_lesson(&self, lesson_id: Uuid, caller: CallerId) -> AppResult<()> {
        let lesson = self.load_owned(lesson_id, caller).await?;
        self.store.delete_lesson(lesson.id).await
    }

    /// Owner-only partial update of one embedded homework assignment.
    pub async fn update_homework(
        &self,
        lesson_id: Uuid,
        homework_id: Uuid,
        caller: CallerId,
        update: HomeworkUpdate,
    ) -> AppResult<Homework> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;

        let homework = lesson
            .homework
            .iter_mut()
            .find(|h| h.id == homework_id)
            .ok_or_else(|| AppError::not_found("homework", homework_id))?;

        if let Some(title) = update.title {
            homework.title = title;
        }
        if let Some(description) = update.description {
            homework.description = description;
        }
        if let Some(due_date) = update.due_date {
            homework.due_date = Some(due_date);
        }
        if let Some(total_points) = update.total_points {
            homework.total_points = total_points;
        }
        let updated = homework.clone();

        lesson.touch();
        self.store.update_lesson(lesson).await?;

        Ok(updated)
    }

    /// Owner-only removal of one embedded homework assignment.
    pub async fn delete_homework(
        &self,
        lesson_id: Uuid,
        homework_id: Uuid,
        caller: CallerId,
    ) -> AppResult<()> {
        let mut lesson = self.load_owned(lesson_id, caller).await?;

        let before = lesson.homework.len();
        lesson.homework.retain(|h| h.id != homework_id);
        if lesson.homework.len() == before {
            return Err(AppError::not_found("homework", homework_id));
        }

        lesson.touch();
        self.store.update_lesson(lesson).await?;

        Ok(())
    }

    /// Load a lesson and enforce ownership in one step.
    async fn load_owned(&self, lesson_id: Uuid, caller: CallerId) -> AppResult<Lesson> {
        let lesson = self
            .store
            .get_lesson(lesson_id)
            .await?
            .ok_or_else(|| AppError::not_found("lesson", lesson_id))?;
        assert_owner(lesson.owner, caller)?;
        Ok(lesson)
    }
}

fn resource_query(topic: &str, subject: &str, grade_level: &str) -> String {
    format!("{} {} grade {} educational resources", topic, subject, grade_level)
}

/// Fail with a validation error naming every empty required field.
fn require_fields(fields: &[(&'static str, &str)]) -> AppResult<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_fields_lists_every_missing_field() {
        let err = require_fields(&[("topic", ""), ("subject", "Science"), ("gradeLevel", "  ")])
            .unwrap_err();
        match err {
            AppError::Validation(missing) => {
                assert_eq!(missing, vec!["topic".to_string(), "gradeLevel".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn resource_query_shape() {
        assert_eq!(
            resource_query("Photosynthesis", "Science", "7"),
            "Photosynthesis Science grade 7 educational resources"
        );
    }
}
