//! Reactive data store synchronizing client state with the backend.
//!
//! [`BlogStore`] pairs the API client with the reducer state in
//! [`state`]: every user action performs its HTTP call, then dispatches
//! [`Action`] variants through the single transition function and publishes
//! a whole-state snapshot on a watch channel. Consumers never observe
//! partial updates; racing actions resolve last-write-wins.
//!
//! Failure policy (per action):
//! - fetches fall back (hardcoded categories / empty topic list) and
//!   surface a message in `state.error` without propagating out of
//!   `initialize`;
//! - creates and votes surface a message *and* return the error so the
//!   calling view can also react.
//!
//! User-facing messages follow a three-tier priority: the server's error
//! body, then a network-absence message, then a generic fallback.

mod state;

pub use state::{
    Action, CategoryIndex, StoreState, RECENT_TOPICS_LIMIT, TOTAL_MEMBERS_PLACEHOLDER,
};

use crate::api::{ApiClient, ApiError};
use crate::dates::now_timestamp;
use crate::error::{CareSyncError, Result};
use crate::model::{
    BlogPost, CategoryStats, ForumCategory, NewPost, NewTopic, Post, Topic, TotalStats,
    VotePayload,
};
use crate::validation::{Validator, MAX_TITLE_CHARS};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

/// Author attributed to submissions made without a signed-in name.
pub const ANONYMOUS_AUTHOR: &str = "משתמש אנונימי";

/// Tag marking a topic created through the reply fallback path.
pub const REPLY_FALLBACK_TAG: &str = "reply";

const GENERIC_LOAD_ERROR: &str = "Failed to load forum data. Please try again.";
const GENERIC_TOPIC_ERROR: &str = "Failed to create topic. Please try again.";
const GENERIC_REPLY_ERROR: &str = "Failed to post reply. Please try again.";
const GENERIC_VOTE_ERROR: &str = "Failed to record vote. Please try again.";

/// Wire body for `POST /topics`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTopicBody<'a> {
    title: &'a str,
    content: &'a str,
    tags: &'a [String],
    category_id: u64,
    author: &'a str,
    date: String,
}

/// Wire body for `POST /topics/:id/posts`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostBody<'a> {
    content: &'a str,
    topic_id: u64,
    author: &'a str,
    date: String,
}

/// Client-side store for blog posts, forum categories and their topics.
#[derive(Debug)]
pub struct BlogStore {
    api: ApiClient,
    state: RwLock<StoreState>,
    tx: watch::Sender<StoreState>,
    /// Capability cache: set after the reply endpoint first answers 404,
    /// so later replies go straight to the topic-creation fallback.
    replies_unsupported: AtomicBool,
}

impl BlogStore {
    /// Creates a store seeded with static fallback content.
    pub fn new(api: ApiClient) -> Self {
        let state = StoreState::new();
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            api,
            state: RwLock::new(state),
            tx,
            replies_unsupported: AtomicBool::new(false),
        }
    }

    /// Subscribes to whole-state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    /// A clone of the current state.
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Applies an action and publishes the new snapshot.
    async fn dispatch(&self, action: Action) {
        let mut state = self.state.write().await;
        state.apply(action);
        let _ = self.tx.send(state.clone());
    }

    // =========================================================================
    // Initialization / fetches
    // =========================================================================

    /// Fetches categories and topics, replacing the seeded state.
    ///
    /// Failures are caught here: they surface as a string in
    /// `state.error` and never propagate to the caller.
    pub async fn initialize(&self) {
        self.dispatch(Action::LoadingStarted).await;
        self.dispatch(Action::ErrorSet(None)).await;

        let forums = self.fetch_forums().await;
        let topics = self.fetch_topics().await;

        if let Err(e) = forums.and(topics) {
            self.dispatch(Action::ErrorSet(Some(user_message(&e, GENERIC_LOAD_ERROR))))
                .await;
        }
        self.dispatch(Action::LoadingFinished).await;
    }

    /// Fetches the category list from `GET /forums`.
    ///
    /// On failure the hardcoded fallback list is loaded instead and the
    /// error is returned for the caller to surface.
    pub async fn fetch_forums(&self) -> Result<()> {
        match self.api.get::<Value>("/forums").await {
            Ok(value) => {
                let categories: Vec<ForumCategory> = parse_array(value, "/forums");
                let categories = if categories.is_empty() {
                    warn!("No categories from backend, keeping fallback list");
                    crate::model::fallback_categories()
                } else {
                    categories
                };
                info!("Loaded {} forum categories", categories.len());
                self.dispatch(Action::ForumsLoaded(categories)).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch forums, using fallback categories: {e}");
                self.dispatch(Action::ForumsLoaded(crate::model::fallback_categories()))
                    .await;
                Err(e.into())
            }
        }
    }

    /// Fetches all topics from `GET /topics` and regroups them by category.
    ///
    /// On failure (or a non-array body) an empty list is attached and the
    /// error is returned for the caller to surface.
    pub async fn fetch_topics(&self) -> Result<()> {
        match self.api.get::<Value>("/topics").await {
            Ok(value) => {
                let topics: Vec<Topic> = parse_array(value, "/topics");
                info!("Loaded {} topics", topics.len());
                self.dispatch(Action::TopicsLoaded(topics)).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch topics: {e}");
                self.dispatch(Action::TopicsLoaded(Vec::new())).await;
                Err(e.into())
            }
        }
    }

    /// Loads the authoritative reply list for one topic.
    ///
    /// Reads `GET /topics/:id/posts`; when that endpoint is missing (404)
    /// the topic detail `GET /topics/:id` is fetched instead and its
    /// embedded replies used. The merged list replaces the topic's local
    /// replies.
    pub async fn fetch_posts_for_topic(&self, topic_id: u64) -> Result<Vec<Post>> {
        let posts: Vec<Post> = match self
            .api
            .get::<Value>(&format!("/topics/{topic_id}/posts"))
            .await
        {
            Ok(value) => parse_array(value, "/topics/:id/posts"),
            Err(e) if e.is_not_found() => {
                warn!("Posts endpoint unavailable, reading topic {topic_id} directly");
                let topic: Topic = self.api.get(&format!("/topics/{topic_id}")).await?;
                topic.posts
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} replies for topic {topic_id}", posts.len());
        self.dispatch(Action::PostsLoaded {
            topic_id,
            posts: posts.clone(),
        })
        .await;
        Ok(posts)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a topic in the given category.
    ///
    /// On success the full topic list is re-fetched to reconcile derived
    /// state; if that re-fetch fails, the server's echoed topic is merged
    /// locally instead. On failure the derived message is stored for
    /// display and the error is returned to the caller.
    pub async fn add_topic_to_category(&self, category_id: u64, topic: NewTopic) -> Result<Topic> {
        Validator::validate_title(&topic.title)?;
        Validator::validate_content(&topic.content)?;
        Validator::validate_tags(&topic.tags)?;
        {
            let state = self.state.read().await;
            if state.category_by_id(category_id).is_none() {
                return Err(CareSyncError::not_found(format!(
                    "Unknown category id {category_id}"
                )));
            }
        }

        self.dispatch(Action::LoadingStarted).await;

        let author = author_or_anonymous(&topic.author);
        let body = CreateTopicBody {
            title: topic.title.trim(),
            content: &topic.content,
            tags: &topic.tags,
            category_id,
            author,
            date: now_timestamp(),
        };

        match self.api.post::<Topic, _>("/topics", &body).await {
            Ok(created) => {
                info!("Created topic {} in category {category_id}", created.id);
                if self.fetch_topics().await.is_err() {
                    // Reconciliation failed; fall back to merging the echo
                    self.dispatch(Action::TopicAdded {
                        category_id,
                        topic: created.clone(),
                    })
                    .await;
                }
                self.dispatch(Action::ErrorSet(None)).await;
                self.dispatch(Action::LoadingFinished).await;
                Ok(created)
            }
            Err(e) => {
                let message = user_message(&e.into(), GENERIC_TOPIC_ERROR);
                self.dispatch(Action::ErrorSet(Some(message.clone()))).await;
                self.dispatch(Action::LoadingFinished).await;
                Err(CareSyncError::Store(message))
            }
        }
    }

    /// Posts a reply to a topic.
    ///
    /// When the reply endpoint is missing (404), the capability is
    /// remembered and the reply is created as a new topic tagged
    /// [`REPLY_FALLBACK_TAG`] instead of failing the user-visible action.
    /// The confirmed post is merged into the owning topic by identity.
    pub async fn add_post_to_topic(&self, topic_id: u64, post: NewPost) -> Result<Post> {
        Validator::validate_content(&post.content)?;

        self.dispatch(Action::LoadingStarted).await;

        let author = author_or_anonymous(&post.author).to_string();
        let result = if self.replies_unsupported.load(Ordering::Relaxed) {
            self.create_reply_topic(topic_id, &post, &author).await
        } else {
            let body = CreatePostBody {
                content: &post.content,
                topic_id,
                author: &author,
                date: now_timestamp(),
            };
            match self
                .api
                .post::<Post, _>(&format!("/topics/{topic_id}/posts"), &body)
                .await
            {
                Ok(created) => Ok(created),
                Err(e) if e.is_not_found() => {
                    warn!("Reply endpoint unavailable, creating a tagged topic instead");
                    self.replies_unsupported.store(true, Ordering::Relaxed);
                    self.create_reply_topic(topic_id, &post, &author).await
                }
                Err(e) => Err(e.into()),
            }
        };

        match result {
            Ok(created) => {
                self.dispatch(Action::PostAdded {
                    topic_id,
                    post: created.clone(),
                })
                .await;
                self.dispatch(Action::ErrorSet(None)).await;
                self.dispatch(Action::LoadingFinished).await;
                Ok(created)
            }
            Err(e) => {
                let message = user_message(&e, GENERIC_REPLY_ERROR);
                self.dispatch(Action::ErrorSet(Some(message.clone()))).await;
                self.dispatch(Action::LoadingFinished).await;
                Err(CareSyncError::Store(message))
            }
        }
    }

    /// Fallback path: the reply becomes a topic tagged "reply" in the
    /// owning topic's category.
    async fn create_reply_topic(
        &self,
        topic_id: u64,
        post: &NewPost,
        author: &str,
    ) -> Result<Post> {
        let category_id = {
            let state = self.state.read().await;
            state
                .topic_by_id(topic_id)
                .and_then(|t| state.index().id_for_name(&t.category))
        }
        .ok_or_else(|| {
            CareSyncError::not_found(format!("No category owns topic id {topic_id}"))
        })?;

        let title: String = post.content.trim().chars().take(MAX_TITLE_CHARS).collect();
        let tags = vec![REPLY_FALLBACK_TAG.to_string()];
        let body = CreateTopicBody {
            title: &title,
            content: &post.content,
            tags: &tags,
            category_id,
            author,
            date: now_timestamp(),
        };

        let created: Topic = self.api.post("/topics", &body).await?;
        info!(
            "Reply to topic {topic_id} recorded as fallback topic {}",
            created.id
        );
        Ok(Post {
            id: created.id,
            content: post.content.clone(),
            author: author.to_string(),
            date: created.date,
            topic_id,
            upvotes: 0,
            downvotes: 0,
            parent_id: None,
        })
    }

    /// Votes on a topic; on success only the matching counter is bumped
    /// locally, without a re-fetch.
    pub async fn vote_on_topic(&self, topic_id: u64, is_upvote: bool) -> Result<()> {
        match self
            .api
            .post::<Value, _>(
                &format!("/topics/{topic_id}/vote"),
                &VotePayload { is_upvote },
            )
            .await
        {
            Ok(_) => {
                self.dispatch(Action::TopicVoted {
                    topic_id,
                    is_upvote,
                })
                .await;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e.into(), GENERIC_VOTE_ERROR);
                self.dispatch(Action::ErrorSet(Some(message.clone()))).await;
                Err(CareSyncError::Store(message))
            }
        }
    }

    /// Votes on a reply; same local-increment contract as topic votes.
    pub async fn vote_on_post(&self, post_id: u64, is_upvote: bool) -> Result<()> {
        match self
            .api
            .post::<Value, _>(&format!("/posts/{post_id}/vote"), &VotePayload { is_upvote })
            .await
        {
            Ok(_) => {
                self.dispatch(Action::PostVoted { post_id, is_upvote }).await;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e.into(), GENERIC_VOTE_ERROR);
                self.dispatch(Action::ErrorSet(Some(message.clone()))).await;
                Err(CareSyncError::Store(message))
            }
        }
    }

    // =========================================================================
    // Derivations (snapshot reads)
    // =========================================================================

    /// Site-wide aggregate counters.
    pub async fn total_stats(&self) -> TotalStats {
        self.state.read().await.total_stats()
    }

    /// Per-category aggregate counters.
    pub async fn category_stats(&self, category_id: u64) -> CategoryStats {
        self.state.read().await.category_stats(category_id)
    }

    /// The most recently created topics, newest first.
    pub async fn recent_topics(&self) -> Vec<Topic> {
        self.state.read().await.recent_topics()
    }

    /// Finds a blog post by slug.
    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.state.read().await.blog_post_by_slug(slug).cloned()
    }

    /// Finds a category by id.
    pub async fn category_by_id(&self, id: u64) -> Option<ForumCategory> {
        self.state.read().await.category_by_id(id).cloned()
    }

    /// Finds a topic by slug.
    pub async fn topic_by_slug(&self, slug: &str) -> Option<Topic> {
        self.state.read().await.topic_by_slug(slug).cloned()
    }

    /// Checks backend reachability.
    pub async fn health_check(&self) -> bool {
        self.api.health_check().await
    }
}

fn author_or_anonymous(author: &str) -> &str {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        ANONYMOUS_AUTHOR
    } else {
        trimmed
    }
}

/// Derives the user-facing message for a failed action.
///
/// Priority: the server's error body, then the network-absence (or
/// session-expiry) message, then the caller's generic fallback.
fn user_message(err: &CareSyncError, generic: &str) -> String {
    match err {
        CareSyncError::Api(api) => {
            if let Some(msg) = api.server_message() {
                msg.to_string()
            } else if api.is_unreachable() || matches!(api, ApiError::SessionExpired) {
                api.to_string()
            } else {
                generic.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Deserializes an array body element-by-element, tolerating deviations.
///
/// A non-array body yields an empty collection; elements that fail to
/// deserialize are skipped.
fn parse_array<T: serde::de::DeserializeOwned>(value: Value, path: &str) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping malformed element from {path}: {e}");
                    None
                }
            })
            .collect(),
        other => {
            warn!("Expected array from {path}, got {other}; substituting empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_tiering() {
        let server = CareSyncError::Api(ApiError::Server {
            status: 500,
            message: "database down".to_string(),
        });
        assert_eq!(user_message(&server, "generic"), "database down");

        let network = CareSyncError::Api(ApiError::Network);
        assert_eq!(
            user_message(&network, "generic"),
            "Network error. Please check your connection."
        );

        let anonymous_server = CareSyncError::Api(ApiError::Server {
            status: 500,
            message: String::new(),
        });
        assert_eq!(user_message(&anonymous_server, "generic"), "generic");
    }

    #[test]
    fn test_parse_array_tolerates_deviations() {
        let topics: Vec<Topic> = parse_array(serde_json::json!({"not": "an array"}), "/topics");
        assert!(topics.is_empty());

        let topics: Vec<Topic> = parse_array(
            serde_json::json!([
                {"id": 1, "title": "ok"},
                "garbage",
                {"id": 2, "title": "also ok"}
            ]),
            "/topics",
        );
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn test_author_defaulting() {
        assert_eq!(author_or_anonymous(""), ANONYMOUS_AUTHOR);
        assert_eq!(author_or_anonymous("  "), ANONYMOUS_AUTHOR);
        assert_eq!(author_or_anonymous(" דן לוי "), "דן לוי");
    }
}
