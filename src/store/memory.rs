//! In-memory document store.
//!
//! Backs tests and the demo binary. Each map access holds the lock for the
//! duration of one read-modify-write, which gives the atomic
//! single-document semantics the boundary promises.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::CallerId;
use crate::error::{AppError, AppResult};
use crate::models::{ForumPost, Lesson};
use crate::store::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    lessons: RwLock<HashMap<Uuid, Lesson>>,
    posts: RwLock<HashMap<Uuid, ForumPost>>,
    comment_counts: RwLock<HashMap<CallerId, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        let mut lessons = self.lessons.write().await;
        lessons.insert(lesson.id, lesson.clone());
        Ok(lesson)
    }

    async fn get_lesson(&self, id: Uuid) -> AppResult<Option<Lesson>> {
        Ok(self.lessons.read().await.get(&id).cloned())
    }

    async fn list_lessons(&self, owner: CallerId) -> AppResult<Vec<Lesson>> {
        let lessons = self.lessons.read().await;
        let mut owned: Vec<Lesson> = lessons
            .values()
            .filter(|l| l.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        let mut lessons = self.lessons.write().await;
        if !lessons.contains_key(&lesson.id) {
            return Err(AppError::not_found("lesson", lesson.id));
        }
        lessons.insert(lesson.id, lesson.clone());
        Ok(lesson)
    }

    async fn delete_lesson(&self, id: Uuid) -> AppResult<()> {
        let mut lessons = self.lessons.write().await;
        lessons
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("lesson", id))
    }

    async fn insert_post(&self, post: ForumPost) -> AppResult<ForumPost> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> AppResult<Option<ForumPost>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list_posts(&self) -> AppResult<Vec<ForumPost>> {
        let posts = self.posts.read().await;
        let mut all: Vec<ForumPost> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_post(&self, post: ForumPost) -> AppResult<ForumPost> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(AppError::not_found("post", post.id));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> AppResult<()> {
        let mut posts = self.posts.write().await;
        posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("post", id))
    }

    async fn adjust_comment_count(&self, user: CallerId, delta: i64) -> AppResult<()> {
        let mut counts = self.comment_counts.write().await;
        *counts.entry(user).or_insert(0) += delta;
        Ok(())
    }

    async fn comment_count(&self, user: CallerId) -> AppResult<i64> {
        Ok(self.comment_counts.read().await.get(&user).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lesson(owner: CallerId) -> Lesson {
        let now = Utc::now();
        Lesson {
            id: Uuid::new_v4(),
            topic: "Topic".to_string(),
            subject: "Subject".to_string(),
            grade_level: "5".to_string(),
            title: "Topic for Grade 5".to_string(),
            explanation: String::new(),
            learning_outcomes: vec![],
            activities: vec![],
            quiz: vec![],
            resources: vec![],
            real_world_examples: vec![],
            homework: vec![],
            additional_notes: String::new(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn lesson_round_trip_and_owner_scoping() {
        let store = MemoryStore::new();
        let alice = CallerId::new();
        let bob = CallerId::new();

        let mine = store.insert_lesson(lesson(alice)).await.unwrap();
        store.insert_lesson(lesson(bob)).await.unwrap();

        let fetched = store.get_lesson(mine.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, mine.id);

        let listed = store.list_lessons(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner, alice);
    }

    #[tokio::test]
    async fn updating_missing_lesson_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update_lesson(lesson(CallerId::new())).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn comment_counter_moves_by_delta() {
        let store = MemoryStore::new();
        let user = CallerId::new();

        store.adjust_comment_count(user, 1).await.unwrap();
        store.adjust_comment_count(user, 1).await.unwrap();
        store.adjust_comment_count(user, -1).await.unwrap();
        assert_eq!(store.comment_count(user).await.unwrap(), 1);
    }
}
