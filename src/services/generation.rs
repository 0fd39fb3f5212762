//! Generation service - capability layer.
//!
//! Builds one natural-language instruction per content kind describing the
//! desired JSON shape, sends it through a [`GenerationApi`] transport and
//! parses the reply into the typed partial record for that kind. Parse
//! failures are recoverable and carry the raw text; this layer never
//! substitutes fallback content itself - that policy belongs to the caller.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::clients::GenerationApi;
use crate::error::GenerationError;
use crate::models::{
    GeneratedHomework, HomeworkKind, Lesson, LessonContent, QuizPayload, QuizQuestion, Suggestions,
};
use crate::utils::logging::truncate_text;

const LESSON_SYSTEM_ROLE: &str = "You are an expert educator and curriculum designer. Create \
     detailed, engaging, and pedagogically sound lesson content tailored to the appropriate \
     grade level.";
const QUIZ_SYSTEM_ROLE: &str = "You are an expert educator specializing in assessment design. \
     Create clear, relevant, and pedagogically sound quiz questions appropriate for the \
     specified grade level.";
const IMPROVEMENT_SYSTEM_ROLE: &str = "You are an expert educational consultant who specializes \
     in curriculum improvement. Provide specific, actionable suggestions to enhance lesson plans.";
const HOMEWORK_SYSTEM_ROLE: &str = "You are an expert educator specializing in creating \
     effective homework assignments. Design clear, engaging, and pedagogically sound homework \
     that reinforces learning objectives and assesses student understanding.";

/// Request context for lesson-content generation.
#[derive(Debug, Clone)]
pub struct LessonContext<'a> {
    pub topic: &'a str,
    pub subject: &'a str,
    pub grade_level: &'a str,
    pub additional_notes: &'a str,
}

/// Generation service.
///
/// Stateless apart from its transport; a single attempt per call, no retry.
pub struct GenerationService<G: GenerationApi> {
    api: G,
}

impl<G: GenerationApi> GenerationService<G> {
    pub fn new(api: G) -> Self {
        Self { api }
    }

    /// Generate full lesson content for a topic/subject/grade request.
    pub async fn generate_lesson_content(
        &self,
        ctx: &LessonContext<'_>,
    ) -> Result<LessonContent, GenerationError> {
        let prompt = build_lesson_prompt(ctx);
        let raw = self.api.chat(LESSON_SYSTEM_ROLE, &prompt, 4000).await?;
        parse_payload::<LessonContent>(raw)
    }

    /// Generate `count` additional quiz questions for an existing lesson.
    pub async fn generate_quiz(
        &self,
        lesson: &Lesson,
        count: usize,
        difficulty: &str,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let prompt = build_quiz_prompt(lesson, count, difficulty);
        let raw = self.api.chat(QUIZ_SYSTEM_ROLE, &prompt, 2000).await?;
        parse_payload::<QuizPayload>(raw).map(QuizPayload::into_questions)
    }

    /// Generate improvement suggestions across the seven fixed categories.
    /// The result may be partial; the caller is responsible for merge-under
    /// backfill.
    pub async fn generate_suggestions(
        &self,
        lesson: &Lesson,
    ) -> Result<Suggestions, GenerationError> {
        let prompt = build_improvement_prompt(lesson);
        let raw = self.api.chat(IMPROVEMENT_SYSTEM_ROLE, &prompt, 3000).await?;
        parse_payload::<Suggestions>(raw)
    }

    /// Generate a homework assignment for an existing lesson.
    pub async fn generate_homework(
        &self,
        lesson: &Lesson,
        question_types: &[HomeworkKind],
        count: usize,
        difficulty: &str,
    ) -> Result<GeneratedHomework, GenerationError> {
        let prompt = build_homework_prompt(lesson, question_types, count, difficulty);
        let raw = self.api.chat(HOMEWORK_SYSTEM_ROLE, &prompt, 4000).await?;
        parse_payload::<GeneratedHomework>(raw)
    }
}

/// Parse the completion text as the typed partial record for its kind.
/// Malformed JSON or a mismatched shape is a recoverable `Parse` failure
/// carrying the raw text.
fn parse_payload<T: DeserializeOwned>(raw: String) -> Result<T, GenerationError> {
    match serde_json::from_str::<T>(&raw) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!(
                "generation response failed to parse: {e}; raw preview: {}",
                truncate_text(&raw, 200)
            );
            Err(GenerationError::Parse { raw })
        }
    }
}

fn build_lesson_prompt(ctx: &LessonContext<'_>) -> String {
    let notes = if ctx.additional_notes.trim().is_empty() {
        String::new()
    } else {
        format!("Additional context: {}\n", ctx.additional_notes)
    };

    format!(
        r#"You are an expert educator creating a comprehensive lesson for grade {grade} students about "{topic}" in the subject of {subject}.
{notes}
Please create a complete lesson with the following components:

1. Title: A catchy, descriptive title for this lesson
2. Explanation: A clear, grade-appropriate explanation of the topic that is engaging and informative. Use simple language appropriate for grade {grade} students.
3. Learning Outcomes: 3-5 specific learning outcomes that students should achieve by the end of this lesson
4. Activities: 2-3 engaging hands-on activities or exercises that reinforce the topic
5. Quiz: 3-5 multiple-choice questions to assess understanding, each with 4 options (A, B, C, D) and the correct answer
6. Real-World Examples: 2-3 current, real-world examples or applications of this topic that students can relate to

Format your response as a single JSON object with the following structure:
{{
  "title": "Lesson title",
  "explanation": "Detailed explanation of the topic",
  "learningOutcomes": ["outcome1", "outcome2", "outcome3"],
  "activities": ["activity1", "activity2", "activity3"],
  "quiz": [
    {{
      "question": "Question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "A/B/C/D",
      "explanation": "Why this is the correct answer"
    }}
  ],
  "realWorldExamples": ["example1", "example2", "example3"]
}}"#,
        grade = ctx.grade_level,
        topic = ctx.topic,
        subject = ctx.subject,
        notes = notes,
    )
}

fn build_quiz_prompt(lesson: &Lesson, count: usize, difficulty: &str) -> String {
    let context = if lesson.explanation.trim().is_empty() {
        String::new()
    } else {
        format!(
            "Use this explanation as context: {}...\n",
            truncate_text(&lesson.explanation, 500)
        )
    };

    format!(
        r#"Create {count} multiple-choice quiz questions about "{topic}" for grade {grade} students studying {subject}.
The difficulty level should be {difficulty}.

{context}
For each question:
1. Provide the question text
2. Provide 4 possible answers (labeled A, B, C, D)
3. Indicate the correct answer (A, B, C, or D)
4. Provide a brief explanation for why the answer is correct

Format the response as a JSON object of the form {{"questions": [...]}}."#,
        count = count,
        topic = lesson.topic,
        grade = lesson.grade_level,
        subject = lesson.subject,
        difficulty = difficulty,
        context = context,
    )
}

fn build_improvement_prompt(lesson: &Lesson) -> String {
    let snapshot = serde_json::json!({
        "topic": lesson.topic,
        "subject": lesson.subject,
        "gradeLevel": lesson.grade_level,
        "explanation": lesson.explanation,
        "learningOutcomes": lesson.learning_outcomes,
        "activities": lesson.activities,
        "quiz": lesson.quiz,
        "realWorldExamples": lesson.real_world_examples,
    });
    let snapshot = serde_json::to_string_pretty(&snapshot).unwrap_or_default();

    format!(
        r#"As an expert educator, please analyze this lesson plan and provide specific suggestions for improvement.

LESSON DETAILS:
Topic: {topic}
Subject: {subject}
Grade Level: {grade}

CURRENT LESSON CONTENT:
{snapshot}

Please provide detailed improvement suggestions in the following categories:

1. Content Enhancement: How can the explanation be improved for clarity, engagement, and depth?
2. Learning Outcomes: Are the learning outcomes specific, measurable, and appropriate? How can they be improved?
3. Activities: How can the activities be more engaging, effective, or innovative?
4. Assessment: How can the quiz questions be improved or expanded?
5. Real-World Relevance: How can the real-world examples be more current, relevant, or impactful?
6. Differentiation: Suggestions for adapting this lesson for different learning styles or abilities
7. Technology Integration: Ideas for incorporating educational technology

For each category, provide at least 3-5 specific, actionable suggestions.

Format your response as a JSON object with these categories as keys and detailed suggestions as string values:
{{
  "contentEnhancement": "...",
  "learningOutcomes": "...",
  "activities": "...",
  "assessment": "...",
  "realWorldRelevance": "...",
  "differentiation": "...",
  "technologyIntegration": "..."
}}"#,
        topic = lesson.topic,
        subject = lesson.subject,
        grade = lesson.grade_level,
        snapshot = snapshot,
    )
}

fn build_homework_prompt(
    lesson: &Lesson,
    question_types: &[HomeworkKind],
    count: usize,
    difficulty: &str,
) -> String {
    let context = if lesson.explanation.trim().is_empty() {
        String::new()
    } else {
        format!(
            "Use this explanation as context: {}...\n",
            truncate_text(&lesson.explanation, 500)
        )
    };
    let outcomes = if lesson.learning_outcomes.is_empty() {
        String::new()
    } else {
        format!("Learning outcomes: {}\n", lesson.learning_outcomes.join(", "))
    };

    let mut type_lines = String::new();
    if question_types.contains(&HomeworkKind::Mcq) {
        type_lines.push_str(
            "- Multiple-choice questions (MCQs) with 4 options each and one correct answer\n",
        );
    }
    if question_types.contains(&HomeworkKind::ShortAnswer) {
        type_lines.push_str("- Short answer questions that require brief written responses\n");
    }
    if question_types.contains(&HomeworkKind::Diagram) {
        type_lines.push_str(
            "- Diagram-based questions that involve labeling, drawing, or interpreting visual information\n",
        );
    }
    if question_types.contains(&HomeworkKind::Creative) {
        type_lines.push_str(
            "- Creative prompts that encourage critical thinking and application of knowledge\n",
        );
    }

    format!(
        r#"As an expert educator, create a comprehensive homework assignment for grade {grade} students about "{topic}" in the subject of {subject}.

{context}{outcomes}
Create a homework assignment with {count} questions of difficulty level {difficulty}.

Include a mix of the following question types:
{type_lines}
For each question:
1. Provide clear instructions
2. For MCQs, include 4 options (A, B, C, D) and indicate the correct answer
3. For all questions, provide a brief explanation or rubric for grading

Format the response as a JSON object with the following structure:
{{
  "title": "Homework assignment title",
  "description": "Brief description of the homework assignment",
  "questions": [
    {{
      "question": "Question text",
      "type": "mcq/short_answer/diagram/creative",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "Correct answer or grading criteria",
      "explanation": "Explanation or grading rubric",
      "points": 5
    }}
  ],
  "totalPoints": 50
}}"#,
        grade = lesson.grade_level,
        topic = lesson.topic,
        subject = lesson.subject,
        context = context,
        outcomes = outcomes,
        count = count,
        difficulty = difficulty,
        type_lines = type_lines,
    )
}
