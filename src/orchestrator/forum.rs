//! Forum aggregator.
//!
//! CRUD and counters over the document store. Reads are open to any
//! authenticated caller; mutations are owner-only. Counter behavior is
//! deliberate and quirky: views bump on every single read including the
//! owner's, likes have no per-caller dedup, and the per-user comment
//! counter moves on post create/delete as well as on comments.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{assert_owner, CallerId};
use crate::error::{AppError, AppResult};
use crate::models::{Comment, ForumCategory, ForumPost};
use crate::store::DocumentStore;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;
const MAX_TITLE_CHARS: usize = 200;

/// Listing filter. Page numbers are 1-based.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostFilter {
    pub page: usize,
    pub limit: usize,
    pub category: Option<ForumCategory>,
    pub tag: Option<String>,
    /// Case-insensitive substring match over title, content and tags.
    pub search: Option<String>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            tag: None,
            search: None,
        }
    }
}

/// Neighbor page reference for pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// One page of posts.
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    /// Number of posts in this page.
    pub count: usize,
    /// Number of posts matching the filter overall.
    pub total: usize,
    pub pagination: Pagination,
    pub posts: Vec<ForumPost>,
}

/// Request payload for post creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial post update; only present fields are replaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<ForumCategory>,
    pub tags: Option<Vec<String>>,
}

/// Forum CRUD and counters.
pub struct ForumAggregator<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> ForumAggregator<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// List posts, newest first, with filtering and pagination.
    pub async fn list_posts(&self, filter: PostFilter) -> AppResult<PostPage> {
        let all = self.store.list_posts().await?;

        let needle = filter.search.as_deref().map(str::to_lowercase);
        let matching: Vec<ForumPost> = all
            .into_iter()
            .filter(|post| {
                if let Some(category) = filter.category {
                    if post.category != category {
                        return false;
                    }
                }
                if let Some(tag) = &filter.tag {
                    if !post.tags.iter().any(|t| t == tag) {
                        return false;
                    }
                }
                if let Some(needle) = &needle {
                    let hit = post.title.to_lowercase().contains(needle)
                        || post.content.to_lowercase().contains(needle)
                        || post.tags.iter().any(|t| t.to_lowercase().contains(needle));
                    if !hit {
                        return false;
                    }
                }
                true
            })
            .collect();

        let total = matching.len();
        let page = filter.page.max(1);
        let limit = filter.limit.max(1);
        // Caller-supplied page numbers can be arbitrarily large.
        let start = page.saturating_sub(1).saturating_mul(limit);
        let end = start.saturating_add(limit).min(total);

        let posts = if start < total {
            matching[start..end].to_vec()
        } else {
            Vec::new()
        };

        let pagination = Pagination {
            next: (end < total).then(|| PageRef {
                page: page.saturating_add(1),
                limit,
            }),
            prev: (start > 0).then(|| PageRef {
                page: page - 1,
                limit,
            }),
        };

        Ok(PostPage {
            count: posts.len(),
            total,
            pagination,
            posts,
        })
    }

    /// Single post read. Bumps `views` by exactly one on every call,
    /// whoever the caller is.
    pub async fn get_post(&self, post_id: Uuid) -> AppResult<ForumPost> {
        let mut post = self.load(post_id).await?;
        post.views += 1;
        self.store.update_post(post).await
    }

    /// Create a post. Also bumps the owner's running comment counter by
    /// one (the counter tracks forum activity, not just comments).
    pub async fn create_post(
        &self,
        req: CreatePostRequest,
        owner: CallerId,
        owner_display_name: &str,
    ) -> AppResult<ForumPost> {
        let mut missing = Vec::new();
        if req.title.trim().is_empty() {
            missing.push("title".to_string());
        }
        if req.content.trim().is_empty() {
            missing.push("content".to_string());
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(missing));
        }
        if req.title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::Validation(vec!["title".to_string()]));
        }

        let now = Utc::now();
        let post = ForumPost {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content,
            category: req.category,
            tags: req.tags,
            owner,
            owner_display_name: owner_display_name.to_string(),
            comments: Vec::new(),
            likes: 0,
            views: 0,
            created_at: now,
            updated_at: now,
        };

        info!(post_id = %post.id, %owner, "creating forum post");
        let post = self.store.insert_post(post).await?;
        self.store.adjust_comment_count(owner, 1).await?;

        Ok(post)
    }

    /// Owner-only partial update.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        caller: CallerId,
        update: PostUpdate,
    ) -> AppResult<ForumPost> {
        let mut post = self.load(post_id).await?;
        assert_owner(post.owner, caller)?;

        if let Some(title) = update.title {
            if title.chars().count() > MAX_TITLE_CHARS {
                return Err(AppError::Validation(vec!["title".to_string()]));
            }
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(category) = update.category {
            post.category = category;
        }
        if let Some(tags) = update.tags {
            post.tags = tags;
        }

        post.touch();
        self.store.update_post(post).await
    }

    /// Owner-only delete. Decrements the owner's comment counter by exactly
    /// one regardless of how many comments the post carried.
    pub async fn delete_post(&self, post_id: Uuid, caller: CallerId) -> AppResult<()> {
        let post = self.load(post_id).await?;
        assert_owner(post.owner, caller)?;

        self.store.delete_post(post.id).await?;
        self.store.adjust_comment_count(caller, -1).await?;

        Ok(())
    }

    /// Append a comment and bump the commenter's counter.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        caller: CallerId,
        caller_display_name: &str,
        content: &str,
    ) -> AppResult<ForumPost> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(vec!["content".to_string()]));
        }

        let mut post = self.load(post_id).await?;
        post.comments.push(Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            owner: caller,
            owner_display_name: caller_display_name.to_string(),
            created_at: Utc::now(),
        });
        post.touch();

        let post = self.store.update_post(post).await?;
        self.store.adjust_comment_count(caller, 1).await?;

        Ok(post)
    }

    /// Remove a comment. Only the comment's own owner may remove it; the
    /// post owner has no special power here.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        caller: CallerId,
    ) -> AppResult<ForumPost> {
        let mut post = self.load(post_id).await?;

        let comment = post
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AppError::not_found("comment", comment_id))?;
        assert_owner(comment.owner, caller)?;

        post.comments.retain(|c| c.id != comment_id);
        post.touch();

        let post = self.store.update_post(post).await?;
        self.store.adjust_comment_count(caller, -1).await?;

        Ok(post)
    }

    /// Unconditional like: +1 per call, no per-caller dedup.
    pub async fn like_post(&self, post_id: Uuid) -> AppResult<ForumPost> {
        let mut post = self.load(post_id).await?;
        post.likes += 1;
        self.store.update_post(post).await
    }

    async fn load(&self, post_id: Uuid) -> AppResult<ForumPost> {
        self.store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("post", post_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn aggregator() -> ForumAggregator<MemoryStore> {
        ForumAggregator::new(Arc::new(MemoryStore::new()))
    }

    fn request(title: &str, tags: &[&str]) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: format!("{title} body"),
            category: ForumCategory::GeneralDiscussion,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn pagination_reports_neighbor_pages() {
        let forum = aggregator();
        let owner = CallerId::new();
        for i in 0..5 {
            forum
                .create_post(request(&format!("Post {i}"), &[]), owner, "Ada")
                .await
                .unwrap();
        }

        let page = forum
            .list_posts(PostFilter {
                page: 2,
                limit: 2,
                ..PostFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.count, 2);
        assert_eq!(page.pagination.next, Some(PageRef { page: 3, limit: 2 }));
        assert_eq!(page.pagination.prev, Some(PageRef { page: 1, limit: 2 }));
    }

    #[tokio::test]
    async fn absurd_page_numbers_yield_an_empty_page() {
        let forum = aggregator();
        let owner = CallerId::new();
        forum
            .create_post(request("Only post", &[]), owner, "Ada")
            .await
            .unwrap();

        let page = forum
            .list_posts(PostFilter {
                page: usize::MAX,
                limit: 10,
                ..PostFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.count, 0);
        assert!(page.pagination.next.is_none());
    }

    #[tokio::test]
    async fn search_matches_title_content_and_tags_case_insensitively() {
        let forum = aggregator();
        let owner = CallerId::new();
        forum
            .create_post(request("Fractions warmup", &["math"]), owner, "Ada")
            .await
            .unwrap();
        forum
            .create_post(request("Reading circle", &["literacy"]), owner, "Ada")
            .await
            .unwrap();

        let hits = forum
            .list_posts(PostFilter {
                search: Some("FRACTIONS".to_string()),
                ..PostFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.total, 1);

        let by_tag = forum
            .list_posts(PostFilter {
                tag: Some("literacy".to_string()),
                ..PostFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_tag.total, 1);
        assert_eq!(by_tag.posts[0].title, "Reading circle");
    }

    #[tokio::test]
    async fn every_read_bumps_views_even_for_the_owner() {
        let forum = aggregator();
        let owner = CallerId::new();
        let post = forum
            .create_post(request("Counters", &[]), owner, "Ada")
            .await
            .unwrap();

        forum.get_post(post.id).await.unwrap();
        let seen = forum.get_post(post.id).await.unwrap();
        assert_eq!(seen.views, 2);
    }

    #[tokio::test]
    async fn likes_accumulate_without_dedup() {
        let forum = aggregator();
        let post = forum
            .create_post(request("Likes", &[]), CallerId::new(), "Ada")
            .await
            .unwrap();

        forum.like_post(post.id).await.unwrap();
        let liked = forum.like_post(post.id).await.unwrap();
        assert_eq!(liked.likes, 2);
    }

    #[tokio::test]
    async fn post_lifecycle_moves_the_owner_counter() {
        let store = Arc::new(MemoryStore::new());
        let forum = ForumAggregator::new(Arc::clone(&store));
        let owner = CallerId::new();

        let post = forum
            .create_post(request("Lifecycle", &[]), owner, "Ada")
            .await
            .unwrap();
        assert_eq!(store.comment_count(owner).await.unwrap(), 1);

        let commenter = CallerId::new();
        forum
            .add_comment(post.id, commenter, "Grace", "great idea")
            .await
            .unwrap();
        forum
            .add_comment(post.id, commenter, "Grace", "one more thing")
            .await
            .unwrap();
        assert_eq!(store.comment_count(commenter).await.unwrap(), 2);

        // delete drops the owner's counter by one, no matter how many
        // comments the post carried
        forum.delete_post(post.id, owner).await.unwrap();
        assert_eq!(store.comment_count(owner).await.unwrap(), 0);
        assert_eq!(store.comment_count(commenter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn non_owner_cannot_mutate() {
        let forum = aggregator();
        let owner = CallerId::new();
        let stranger = CallerId::new();
        let post = forum
            .create_post(request("Locked", &[]), owner, "Ada")
            .await
            .unwrap();

        let err = forum
            .update_post(
                post.id,
                stranger,
                PostUpdate {
                    title: Some("Hijacked".to_string()),
                    ..PostUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = forum.delete_post(post.id, stranger).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let unchanged = forum.get_post(post.id).await.unwrap();
        assert_eq!(unchanged.title, "Locked");
    }

    #[tokio::test]
    async fn only_the_comment_owner_may_remove_it() {
        let forum = aggregator();
        let post_owner = CallerId::new();
        let commenter = CallerId::new();
        let post = forum
            .create_post(request("Comments", &[]), post_owner, "Ada")
            .await
            .unwrap();
        let post = forum
            .add_comment(post.id, commenter, "Grace", "hello")
            .await
            .unwrap();
        let comment_id = post.comments[0].id;

        let err = forum
            .delete_comment(post.id, comment_id, post_owner)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let cleaned = forum
            .delete_comment(post.id, comment_id, commenter)
            .await
            .unwrap();
        assert!(cleaned.comments.is_empty());
    }

    #[tokio::test]
    async fn blank_fields_are_named_in_the_validation_error() {
        let forum = aggregator();
        let blank = CreatePostRequest {
            title: "  ".to_string(),
            content: String::new(),
            category: ForumCategory::GeneralDiscussion,
            tags: vec![],
        };
        let err = forum
            .create_post(blank, CallerId::new(), "Ada")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field(s): title, content");
    }
}
