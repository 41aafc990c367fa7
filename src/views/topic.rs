//! Single-topic page: the thread, its replies, and vote/reply handlers.

use crate::dates::format_relative_time;
use crate::error::Result;
use crate::forms::ReplyDraft;
use crate::model::Post;
use crate::store::{BlogStore, StoreState};
use tracing::warn;

/// One reply in the thread.
#[derive(Debug, Clone)]
pub struct ReplyRow {
    pub id: u64,
    pub author: String,
    pub date_label: String,
    pub content: String,
    pub score: i64,
}

/// Everything the topic page renders.
#[derive(Debug, Clone)]
pub struct TopicView {
    pub id: u64,
    /// Breadcrumb: the owning category's display name.
    pub category: String,
    pub title: String,
    pub author: String,
    pub date_label: String,
    pub views: usize,
    pub tags: Vec<String>,
    pub content: String,
    /// Net score shown between the vote arrows.
    pub score: i64,
    /// Total votes cast, shown in the footer.
    pub votes_cast: usize,
    pub reply_count: usize,
    pub replies: Vec<ReplyRow>,
}

impl TopicView {
    /// Builds the page for a topic slug, or `None` when no such topic.
    pub fn build(state: &StoreState, slug: &str) -> Option<Self> {
        let topic = state.topic_by_slug(slug)?;
        Some(Self {
            id: topic.id,
            category: topic.category.clone(),
            title: topic.title.clone(),
            author: topic.author.clone(),
            date_label: format_relative_time(&topic.date),
            views: topic.views,
            tags: topic.tags.clone(),
            content: topic.content.clone(),
            score: topic.score(),
            votes_cast: topic.upvotes + topic.downvotes,
            reply_count: topic.replies,
            replies: topic
                .posts
                .iter()
                .map(|post| ReplyRow {
                    id: post.id,
                    author: post.author.clone(),
                    date_label: format_relative_time(&post.date),
                    content: post.content.clone(),
                    score: post.score(),
                })
                .collect(),
        })
    }
}

/// Page mount: refreshes the thread's replies from the backend and
/// returns the view, or `None` when no such topic.
///
/// A failed refresh is not fatal; the page renders the replies already
/// in the store.
pub async fn mount_topic(store: &BlogStore, slug: &str) -> Option<TopicView> {
    let topic = store.topic_by_slug(slug).await?;
    if let Err(e) = store.fetch_posts_for_topic(topic.id).await {
        warn!("Failed to refresh replies for topic {}: {e}", topic.id);
    }
    TopicView::build(&store.snapshot().await, slug)
}

/// Reply form submission.
pub async fn submit_reply(store: &BlogStore, topic_id: u64, draft: &ReplyDraft) -> Result<Post> {
    let payload = draft.validate()?;
    store.add_post_to_topic(topic_id, payload).await
}

/// Topic vote arrows.
pub async fn vote_topic(store: &BlogStore, topic_id: u64, is_upvote: bool) -> Result<()> {
    store.vote_on_topic(topic_id, is_upvote).await
}

/// Reply vote arrows.
pub async fn vote_post(store: &BlogStore, post_id: u64, is_upvote: bool) -> Result<()> {
    store.vote_on_post(post_id, is_upvote).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::now_timestamp;
    use crate::model::{Post, Topic};
    use crate::store::Action;

    fn topic_with_reply() -> StoreState {
        let mut state = StoreState::new();
        state.apply(Action::TopicAdded {
            category_id: 1,
            topic: Topic {
                id: 10,
                title: "כותרת".to_string(),
                content: "תוכן".to_string(),
                author: "שירה כהן".to_string(),
                date: now_timestamp(),
                tags: vec!["חרדה".to_string()],
                replies: 0,
                views: 89,
                last_activity: now_timestamp(),
                category: String::new(),
                is_hot: false,
                posts: Vec::new(),
                upvotes: 25,
                downvotes: 2,
                slug: "some-topic".to_string(),
            },
        });
        state.apply(Action::PostAdded {
            topic_id: 10,
            post: Post {
                id: 100,
                content: "תגובה".to_string(),
                author: "דן לוי".to_string(),
                date: now_timestamp(),
                topic_id: 10,
                upvotes: 8,
                downvotes: 1,
                parent_id: None,
            },
        });
        state
    }

    #[test]
    fn test_topic_view_fields() {
        let state = topic_with_reply();
        let view = TopicView::build(&state, "some-topic").unwrap();

        assert_eq!(view.category, "חרדה ודיכאון");
        assert_eq!(view.score, 23);
        assert_eq!(view.votes_cast, 27);
        assert_eq!(view.reply_count, 1);
        assert_eq!(view.replies.len(), 1);
        assert_eq!(view.replies[0].score, 7);
        assert_eq!(view.date_label, "עכשיו");
    }

    #[test]
    fn test_topic_view_missing_slug() {
        let state = StoreState::new();
        assert!(TopicView::build(&state, "missing").is_none());
    }
}
