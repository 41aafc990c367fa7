//! Blog listing and single-article pages.
//!
//! A blog post's comment section is its embedded forum category's topic
//! list; the article page therefore shows the article body followed by
//! that category's topics and the new-topic form.

use super::forum::TopicRow;
use crate::dates::{format_date_for_display, format_relative_time};
use crate::error::Result;
use crate::forms::TopicDraft;
use crate::model::Topic;
use crate::store::{BlogStore, StoreState};

/// One row on the blog listing page.
#[derive(Debug, Clone)]
pub struct BlogRow {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date_label: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub topic_count: usize,
}

/// The blog listing page.
#[derive(Debug, Clone)]
pub struct BlogListingView {
    pub rows: Vec<BlogRow>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl BlogListingView {
    pub fn build(state: &StoreState) -> Self {
        let rows = state
            .blog_posts
            .iter()
            .map(|post| BlogRow {
                id: post.id,
                slug: post.slug.clone(),
                title: post.title.clone(),
                excerpt: post.excerpt.clone(),
                author: post.author.clone(),
                date_label: format_date_for_display(&post.date),
                read_time: post.read_time.clone(),
                tags: post.tags.clone(),
                topic_count: post.total_topics,
            })
            .collect();

        Self {
            rows,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }
}

/// A single article with its discussion thread list.
#[derive(Debug, Clone)]
pub struct BlogPostView {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date_label: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub category_id: u64,
    pub category_name: String,
    pub category_description: String,
    pub category_icon: String,
    pub total_topics: usize,
    pub total_posts: usize,
    pub topics: Vec<TopicRow>,
}

impl BlogPostView {
    /// Builds the article page for a slug, or `None` when no such post.
    pub fn build(state: &StoreState, slug: &str) -> Option<Self> {
        let post = state.blog_post_by_slug(slug)?;
        Some(Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            date_label: format_date_for_display(&post.date),
            read_time: post.read_time.clone(),
            tags: post.tags.clone(),
            category_id: post.forum_category.id,
            category_name: post.forum_category.name.clone(),
            category_description: post.forum_category.description.clone(),
            category_icon: post.forum_category.icon.clone(),
            total_topics: post.total_topics,
            total_posts: post.total_posts,
            topics: post.topics.iter().map(TopicRow::from_topic).collect(),
        })
    }

    /// Relative label for a topic's last activity, for thread list rows.
    pub fn activity_label(topic: &Topic) -> String {
        format_relative_time(&topic.last_activity)
    }
}

/// New-topic form submission from the article page.
///
/// Validates the draft, then drives the store action; the returned error
/// (if any) is already the user-facing message.
pub async fn submit_topic(
    store: &BlogStore,
    category_id: u64,
    draft: &TopicDraft,
) -> Result<Topic> {
    let payload = draft.validate()?;
    store.add_topic_to_category(category_id, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_listing_from_seed() {
        let state = StoreState::new();
        let view = BlogListingView::build(&state);
        assert_eq!(view.rows.len(), 3);
        // Legacy Hebrew dates pass through as display text
        assert_eq!(view.rows[0].date_label, "15 בינואר 2025");
    }

    #[test]
    fn test_blog_post_view_by_slug() {
        let state = StoreState::new();
        let view = BlogPostView::build(&state, "how-to-deal-with-social-anxiety").unwrap();
        assert_eq!(view.category_id, 1);
        assert_eq!(view.category_name, "חרדה ודיכאון");
        assert!(view.topics.is_empty());

        assert!(BlogPostView::build(&state, "no-such-slug").is_none());
    }
}
