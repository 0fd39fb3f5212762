//! Deterministic substitute content for failed provider calls.
//!
//! Pure functions, no I/O. Invoked by the orchestration layer when the
//! generation provider fails (either transport or parse) and by the search
//! service when the search provider fails or returns nothing. String
//! interpolation never panics, including on empty topic/subject/grade.

use serde_json::json;

use crate::models::{
    GeneratedHomework, HomeworkKind, HomeworkQuestion, Lesson, LessonContent, QuizQuestion,
    Resource, ResourceType, Suggestions,
};

/// Placeholder lesson content: default title, a generic explanation, 3
/// learning outcomes, 2 activities, exactly one MCQ with answer "A" and one
/// real-world example.
pub fn lesson_content(topic: &str, subject: &str, grade_level: &str) -> LessonContent {
    LessonContent {
        title: Some(Lesson::default_title(topic, grade_level)),
        explanation: Some(format!(
            "This lesson introduces {} to grade {} students as part of their {} studies. \
             The generated explanation was unavailable, so this placeholder keeps the \
             lesson usable until content is regenerated.",
            topic, grade_level, subject
        )),
        learning_outcomes: vec![
            format!("Understand the key concepts of {}", topic),
            format!("Explain {} in their own words", topic),
            format!("Apply what they learned about {} to new situations", topic),
        ],
        activities: vec![
            format!("Discuss {} in small groups", topic),
            format!("Create a short presentation about {}", topic),
        ],
        quiz: vec![QuizQuestion {
            question: format!("What is the main concept of {}?", topic),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            answer: "A".to_string(),
            explanation: "This is a placeholder question.".to_string(),
        }],
        real_world_examples: vec![format!("Example of {} in everyday life", topic)],
    }
}

/// Quiz regeneration degrades to "no new questions" rather than inventing
/// placeholders mid-list.
pub fn quiz() -> Vec<QuizQuestion> {
    Vec::new()
}

/// The fixed seven-category suggestion map. Used whole on total failure and
/// as the merge-under base for partial responses.
pub fn suggestions() -> Suggestions {
    Suggestions {
        content_enhancement: Some(json!(
            "Consider adding more detailed explanations and examples that connect to students' \
             prior knowledge. Use visual aids and analogies to make complex concepts more \
             accessible. Break down the topic into smaller, manageable chunks for better \
             comprehension."
        )),
        learning_outcomes: Some(json!(
            "Make learning outcomes more specific, measurable, and aligned with curriculum \
             standards. Include outcomes that address different cognitive levels (remembering, \
             understanding, applying, analyzing, evaluating, creating). Ensure outcomes are \
             clearly communicated to students."
        )),
        activities: Some(json!(
            "Incorporate more hands-on, inquiry-based activities that promote active learning. \
             Include collaborative group work that encourages peer discussion and knowledge \
             sharing. Add activities that cater to different learning styles and abilities."
        )),
        assessment: Some(json!(
            "Include a variety of assessment types beyond multiple-choice questions. Add \
             formative assessments throughout the lesson to check for understanding. Create \
             rubrics for evaluating student work that align with learning outcomes."
        )),
        real_world_relevance: Some(json!(
            "Connect the topic to current events or issues that students can relate to. Include \
             examples from different cultural contexts to make the content more inclusive. Show \
             how the knowledge can be applied to solve real-world problems."
        )),
        differentiation: Some(json!(
            "Provide options for visual, auditory, and kinesthetic learners. Create tiered \
             assignments that allow students to work at their appropriate challenge level. \
             Offer choice in how students demonstrate their learning."
        )),
        technology_integration: Some(json!(
            "Incorporate educational apps or online tools that enhance the learning experience. \
             Use digital collaboration tools to facilitate group work. Consider using multimedia \
             resources to explain complex concepts."
        )),
    }
}

/// Minimal single-question placeholder homework.
pub fn homework(topic: &str, grade_level: &str) -> GeneratedHomework {
    GeneratedHomework {
        title: Some(format!("{} Homework Assignment", topic)),
        description: Some(format!(
            "Homework assignment for {} (Grade {})",
            topic, grade_level
        )),
        questions: vec![HomeworkQuestion {
            question: format!("What is the main concept of {}?", topic),
            kind: HomeworkKind::Mcq,
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            answer: "A".to_string(),
            explanation: "This is a placeholder question.".to_string(),
            points: 5,
        }],
        total_points: Some(5),
    }
}

/// Deterministic domain-targeted resource set built from the topic alone.
/// No network call. Searching supplementary material must never block
/// lesson creation, so this is the guaranteed floor.
pub fn resources(topic: &str) -> Vec<Resource> {
    let query = urlencoding::encode(topic.trim()).into_owned();
    vec![
        Resource {
            title: format!("Khan Academy: {}", topic),
            description: format!(
                "Free lessons, videos and practice exercises covering {}.",
                topic
            ),
            url: format!(
                "https://www.khanacademy.org/search?page_search_query={}",
                query
            ),
            source: "khanacademy.org".to_string(),
            resource_type: ResourceType::Interactive,
        },
        Resource {
            title: format!("YouTube lessons on {}", topic),
            description: format!("Educational videos explaining {} at every level.", topic),
            url: format!(
                "https://www.youtube.com/results?search_query={}+lesson",
                query
            ),
            source: "youtube.com".to_string(),
            resource_type: ResourceType::Video,
        },
        Resource {
            title: format!("Encyclopaedia Britannica: {}", topic),
            description: format!("Reference articles and background reading on {}.", topic),
            url: format!("https://www.britannica.com/search?query={}", query),
            source: "britannica.com".to_string(),
            resource_type: ResourceType::Article,
        },
        Resource {
            title: format!("National Geographic Education: {}", topic),
            description: format!(
                "Articles, maps and media from National Geographic related to {}.",
                topic
            ),
            url: format!("https://www.nationalgeographic.com/search?q={}", query),
            source: "nationalgeographic.com".to_string(),
            resource_type: ResourceType::Article,
        },
        Resource {
            title: format!("PBS LearningMedia: {}", topic),
            description: format!(
                "Classroom-ready interactive lessons and media about {}.",
                topic
            ),
            url: format!("https://www.pbslearningmedia.org/search/?q={}", query),
            source: "pbslearningmedia.org".to_string(),
            resource_type: ResourceType::Interactive,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_content_has_exact_placeholder_shape() {
        let content = lesson_content("Photosynthesis", "Science", "7");
        assert_eq!(content.title.as_deref(), Some("Photosynthesis for Grade 7"));
        assert_eq!(content.learning_outcomes.len(), 3);
        assert_eq!(content.activities.len(), 2);
        assert_eq!(content.quiz.len(), 1);
        assert_eq!(content.quiz[0].answer, "A");
        assert_eq!(content.quiz[0].options.len(), 4);
        assert_eq!(content.real_world_examples.len(), 1);
    }

    #[test]
    fn lesson_content_tolerates_empty_inputs() {
        let content = lesson_content("", "", "");
        assert_eq!(content.title.as_deref(), Some(" for Grade "));
        assert_eq!(content.quiz.len(), 1);
    }

    #[test]
    fn suggestions_map_is_complete() {
        assert!(suggestions().is_complete());
    }

    #[test]
    fn quiz_fallback_is_empty() {
        assert!(quiz().is_empty());
    }

    #[test]
    fn homework_total_points_match_single_question() {
        let hw = homework("Fractions", "4");
        assert_eq!(hw.questions.len(), 1);
        assert_eq!(hw.total_points, Some(hw.questions[0].points));
        assert_eq!(hw.questions[0].kind, HomeworkKind::Mcq);
    }

    #[test]
    fn resource_set_is_deterministic_and_five_strong() {
        let a = resources("Photosynthesis");
        let b = resources("Photosynthesis");
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
        assert!(a.iter().any(|r| r.resource_type == ResourceType::Video));
        assert!(a.iter().all(|r| r.url.contains("Photosynthesis")));
    }

    #[test]
    fn resource_urls_escape_query_metacharacters() {
        let set = resources("acids & bases #1");
        for r in &set {
            let query = r.url.split('=').last().unwrap();
            assert!(!query.contains('&'), "unescaped & in {}", r.url);
            assert!(!query.contains('#'), "unescaped # in {}", r.url);
            assert!(!query.contains(' '), "unescaped space in {}", r.url);
        }
        assert!(set[0].url.contains("acids%20%26%20bases%20%231"));
    }
}
