//! Forum flows against the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use edbridge::models::ForumCategory;
use edbridge::orchestrator::{CreatePostRequest, ForumAggregator, PostFilter, PostUpdate};
use edbridge::{CallerId, DocumentStore, MemoryStore};

fn forum() -> (ForumAggregator<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (ForumAggregator::new(Arc::clone(&store)), store)
}

fn post(title: &str, category: ForumCategory, tags: &[&str]) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: format!("{title} content"),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[tokio::test]
async fn category_filter_narrows_the_listing() {
    let (forum, _) = forum();
    let owner = CallerId::new();
    forum
        .create_post(
            post("Station rotation", ForumCategory::TeachingStrategies, &[]),
            owner,
            "Ada",
        )
        .await
        .unwrap();
    forum
        .create_post(
            post("Grading software", ForumCategory::TechnologyIntegration, &[]),
            owner,
            "Ada",
        )
        .await
        .unwrap();

    let page = forum
        .list_posts(PostFilter {
            category: Some(ForumCategory::TeachingStrategies),
            ..PostFilter::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.posts[0].title, "Station rotation");
}

#[tokio::test]
async fn update_patches_only_the_supplied_fields() {
    let (forum, _) = forum();
    let owner = CallerId::new();
    let created = forum
        .create_post(
            post("Draft title", ForumCategory::GeneralDiscussion, &["tips"]),
            owner,
            "Ada",
        )
        .await
        .unwrap();

    let updated = forum
        .update_post(
            created.id,
            owner,
            PostUpdate {
                title: Some("Final title".to_string()),
                ..PostUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final title");
    assert_eq!(updated.content, "Draft title content");
    assert_eq!(updated.tags, vec!["tips".to_string()]);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn comment_flow_updates_post_and_counter() {
    let (forum, store) = forum();
    let owner = CallerId::new();
    let commenter = CallerId::new();
    let created = forum
        .create_post(
            post("Homework load", ForumCategory::GeneralDiscussion, &[]),
            owner,
            "Ada",
        )
        .await
        .unwrap();

    let with_comment = forum
        .add_comment(created.id, commenter, "Grace", "We cap it at 30 minutes.")
        .await
        .unwrap();
    assert_eq!(with_comment.comments.len(), 1);
    assert_eq!(with_comment.comments[0].owner_display_name, "Grace");
    assert_eq!(store.comment_count(commenter).await.unwrap(), 1);

    let cleaned = forum
        .delete_comment(created.id, with_comment.comments[0].id, commenter)
        .await
        .unwrap();
    assert!(cleaned.comments.is_empty());
    assert_eq!(store.comment_count(commenter).await.unwrap(), 0);
}

#[tokio::test]
async fn missing_post_reads_are_not_found() {
    let (forum, _) = forum();
    let err = forum.get_post(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("post"));
}

#[tokio::test]
async fn overlong_titles_are_rejected() {
    let (forum, _) = forum();
    let err = forum
        .create_post(
            post(&"x".repeat(201), ForumCategory::GeneralDiscussion, &[]),
            CallerId::new(),
            "Ada",
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
