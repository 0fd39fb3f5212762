use std::env;
use std::sync::Arc;

use anyhow::{bail, Result};

use edbridge::utils::logging;
use edbridge::{CallerId, Config, LessonOrchestrator, MemoryStore};
use edbridge::orchestrator::GenerateLessonRequest;

/// One-shot demo: generate a single lesson from the command line and print
/// it as JSON. `GROQ_API_KEY` / `TAVILY_API_KEY` unset means the fallback
/// content path, which is still a complete lesson.
#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (topic, subject, grade_level, additional_notes) = match args.as_slice() {
        [topic, subject, grade] => (topic.clone(), subject.clone(), grade.clone(), String::new()),
        [topic, subject, grade, notes] => {
            (topic.clone(), subject.clone(), grade.clone(), notes.clone())
        }
        _ => bail!("usage: edbridge <topic> <subject> <grade-level> [notes]"),
    };

    let config = Config::from_env();
    let store = Arc::new(MemoryStore::new());
    let orchestrator = LessonOrchestrator::from_config(&config, store);

    let lesson = orchestrator
        .generate_lesson(
            GenerateLessonRequest {
                topic,
                subject,
                grade_level,
                additional_notes,
            },
            CallerId::new(),
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&lesson)?);

    Ok(())
}
