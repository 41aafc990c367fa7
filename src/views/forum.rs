//! Forum landing page: category cards, site-wide stats, recent topics.

use crate::dates::{format_relative_time, parse_timestamp};
use crate::model::{Topic, TotalStats};
use crate::store::{BlogStore, StoreState};

/// One category tile on the forum listing.
#[derive(Debug, Clone)]
pub struct CategoryCard {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub total_topics: usize,
    pub total_posts: usize,
    /// Relative label of the most recent activity in the category, if any.
    pub last_activity: Option<String>,
}

/// One row in a topic listing.
#[derive(Debug, Clone)]
pub struct TopicRow {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub created_label: String,
    pub replies: usize,
    pub views: usize,
    pub score: i64,
    pub is_hot: bool,
}

impl TopicRow {
    pub(crate) fn from_topic(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            slug: topic.slug.clone(),
            title: topic.title.clone(),
            author: topic.author.clone(),
            category: topic.category.clone(),
            created_label: format_relative_time(&topic.date),
            replies: topic.replies,
            views: topic.views,
            score: topic.score(),
            is_hot: topic.is_hot,
        }
    }
}

/// Everything the forum landing page renders.
#[derive(Debug, Clone)]
pub struct ForumPageView {
    pub categories: Vec<CategoryCard>,
    pub stats: TotalStats,
    pub recent_topics: Vec<TopicRow>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ForumPageView {
    /// Builds the page from a state snapshot.
    pub fn build(state: &StoreState) -> Self {
        let categories = state
            .forum_categories
            .iter()
            .map(|category| CategoryCard {
                id: category.id,
                name: category.name.clone(),
                description: category.description.clone(),
                icon: category.icon.clone(),
                total_topics: category.total_topics,
                total_posts: category.total_posts,
                last_activity: latest_activity(&category.topics).map(format_relative_time),
            })
            .collect();

        let recent_topics = state
            .recent_topics()
            .iter()
            .map(TopicRow::from_topic)
            .collect();

        Self {
            categories,
            stats: state.total_stats(),
            recent_topics,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }
}

/// The raw timestamp of the most recent activity among `topics`.
///
/// Timestamps arrive in mixed formats, so the latest instant is chosen
/// on the parsed value; lexicographic comparison is only the fallback
/// when nothing parses at all.
fn latest_activity(topics: &[Topic]) -> Option<&str> {
    let latest = topics
        .iter()
        .filter_map(|t| parse_timestamp(&t.last_activity).map(|at| (at, t.last_activity.as_str())))
        .max_by_key(|(at, _)| *at);
    match latest {
        Some((_, raw)) => Some(raw),
        None => topics.iter().map(|t| t.last_activity.as_str()).max(),
    }
}

/// Page mount: triggers store initialization and returns the first view.
pub async fn mount_forum(store: &BlogStore) -> ForumPageView {
    store.initialize().await;
    ForumPageView::build(&store.snapshot().await)
}
