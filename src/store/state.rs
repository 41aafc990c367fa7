//! Store state and the single transition function.
//!
//! All mutation flows through [`StoreState::apply`] on tagged [`Action`]
//! variants. Aggregate counters are recomputed there after every mutation,
//! so the per-category and per-post totals can never drift from the
//! underlying collections. Categories are joined by id through a
//! [`CategoryIndex`]; topics arriving from the backend keyed by category
//! display name are resolved to ids on entry.

use crate::dates::parse_timestamp;
use crate::model::{
    fallback_categories, seed_blog_posts, BlogPost, CategoryStats, ForumCategory, Post, Topic,
    TotalStats,
};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Member count shown in total stats.
// TODO: source this from the auth service once it exposes a member count.
pub const TOTAL_MEMBERS_PLACEHOLDER: usize = 1234;

/// Maximum number of topics returned by `recent_topics`.
pub const RECENT_TOPICS_LIMIT: usize = 10;

/// Lookup index over the category list.
///
/// `id_by_name` exists only to resolve the backend's name-keyed topic
/// groups; every join inside the store goes through ids.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    slot_by_id: HashMap<u64, usize>,
    id_by_name: HashMap<String, u64>,
}

impl CategoryIndex {
    /// Builds the index from a category list.
    pub fn build(categories: &[ForumCategory]) -> Self {
        let mut index = Self::default();
        for (slot, category) in categories.iter().enumerate() {
            index.slot_by_id.insert(category.id, slot);
            if index
                .id_by_name
                .insert(category.name.clone(), category.id)
                .is_some()
            {
                warn!("Duplicate category name {:?}, keeping later id", category.name);
            }
        }
        index
    }

    /// Resolves a category display name to its id.
    pub fn id_for_name(&self, name: &str) -> Option<u64> {
        self.id_by_name.get(name).copied()
    }

    /// Position of a category id in the category list.
    pub fn slot_for_id(&self, id: u64) -> Option<usize> {
        self.slot_by_id.get(&id).copied()
    }
}

/// State transitions, dispatched exclusively through [`StoreState::apply`].
#[derive(Debug, Clone)]
pub enum Action {
    /// An asynchronous action started.
    LoadingStarted,
    /// An asynchronous action finished.
    LoadingFinished,
    /// Set or clear the user-facing error message.
    ErrorSet(Option<String>),
    /// Categories arrived from the backend (or the fallback list).
    ForumsLoaded(Vec<ForumCategory>),
    /// The full topic list arrived from the backend.
    TopicsLoaded(Vec<Topic>),
    /// A created topic was confirmed by the server.
    TopicAdded { category_id: u64, topic: Topic },
    /// A created reply was confirmed by the server.
    PostAdded { topic_id: u64, post: Post },
    /// The authoritative reply list for one topic arrived from the backend.
    PostsLoaded { topic_id: u64, posts: Vec<Post> },
    /// A topic vote was confirmed by the server.
    TopicVoted { topic_id: u64, is_upvote: bool },
    /// A reply vote was confirmed by the server.
    PostVoted { post_id: u64, is_upvote: bool },
}

/// The authoritative client-side state.
#[derive(Debug, Clone)]
pub struct StoreState {
    pub blog_posts: Vec<BlogPost>,
    pub forum_categories: Vec<ForumCategory>,
    pub is_loading: bool,
    pub error: Option<String>,
    index: CategoryIndex,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreState {
    /// Fresh state seeded with static fallback content.
    pub fn new() -> Self {
        let blog_posts = seed_blog_posts();
        let forum_categories = fallback_categories();
        let index = CategoryIndex::build(&forum_categories);
        let mut state = Self {
            blog_posts,
            forum_categories,
            is_loading: false,
            error: None,
            index,
        };
        state.recompute_counters();
        state
    }

    /// The category lookup index.
    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Applies one action. The only place state changes.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadingStarted => self.is_loading = true,
            Action::LoadingFinished => self.is_loading = false,
            Action::ErrorSet(error) => self.error = error,
            Action::ForumsLoaded(categories) => {
                self.forum_categories = categories;
                self.index = CategoryIndex::build(&self.forum_categories);
            }
            Action::TopicsLoaded(topics) => self.attach_topics(topics),
            Action::TopicAdded { category_id, topic } => self.add_topic(category_id, topic),
            Action::PostAdded { topic_id, post } => self.add_post(topic_id, post),
            Action::PostsLoaded { topic_id, posts } => self.for_each_topic_mut(|topic| {
                if topic.id == topic_id {
                    topic.posts = posts.clone();
                    topic.replies = posts.len();
                }
            }),
            Action::TopicVoted {
                topic_id,
                is_upvote,
            } => self.for_each_topic_mut(|topic| {
                if topic.id == topic_id {
                    if is_upvote {
                        topic.upvotes += 1;
                    } else {
                        topic.downvotes += 1;
                    }
                }
            }),
            Action::PostVoted { post_id, is_upvote } => self.for_each_topic_mut(|topic| {
                for post in &mut topic.posts {
                    if post.id == post_id {
                        if is_upvote {
                            post.upvotes += 1;
                        } else {
                            post.downvotes += 1;
                        }
                    }
                }
            }),
        }
        self.recompute_counters();
    }

    /// Groups fetched topics by resolved category id and attaches each
    /// group to its category and to the blog post embedding that category.
    fn attach_topics(&mut self, topics: Vec<Topic>) {
        let mut groups: HashMap<u64, Vec<Topic>> = HashMap::new();
        for mut topic in topics {
            match self.index.id_for_name(&topic.category) {
                Some(category_id) => {
                    // Canonicalize the display name to the indexed category's
                    if let Some(slot) = self.index.slot_for_id(category_id) {
                        topic.category = self.forum_categories[slot].name.clone();
                    }
                    groups.entry(category_id).or_default().push(topic);
                }
                None => {
                    warn!(
                        "Dropping topic {} with unknown category {:?}",
                        topic.id, topic.category
                    );
                }
            }
        }

        for category in &mut self.forum_categories {
            category.topics = groups.get(&category.id).cloned().unwrap_or_default();
        }
        for post in &mut self.blog_posts {
            post.topics = groups
                .get(&post.forum_category.id)
                .cloned()
                .unwrap_or_default();
        }
    }

    fn add_topic(&mut self, category_id: u64, mut topic: Topic) {
        if let Some(slot) = self.index.slot_for_id(category_id) {
            topic.category = self.forum_categories[slot].name.clone();
            self.forum_categories[slot].topics.push(topic.clone());
        } else {
            warn!("Topic added to unknown category id {category_id}");
        }
        for post in &mut self.blog_posts {
            if post.forum_category.id == category_id {
                post.topics.push(topic.clone());
            }
        }
    }

    fn add_post(&mut self, topic_id: u64, post: Post) {
        self.for_each_topic_mut(|topic| {
            if topic.id == topic_id {
                topic.posts.push(post.clone());
                topic.replies += 1;
            }
        });
    }

    /// Visits every topic in both collections.
    ///
    /// Topics are denormalized into the category list and the blog post
    /// list; mutations must hit both copies or the views diverge.
    fn for_each_topic_mut<F: FnMut(&mut Topic)>(&mut self, mut f: F) {
        for category in &mut self.forum_categories {
            for topic in &mut category.topics {
                f(topic);
            }
        }
        for post in &mut self.blog_posts {
            for topic in &mut post.topics {
                f(topic);
            }
        }
    }

    /// Rederives every aggregate counter from the collections.
    fn recompute_counters(&mut self) {
        for category in &mut self.forum_categories {
            category.total_topics = category.topics.len();
            category.total_posts = category.topics.iter().map(|t| t.posts.len()).sum();
        }
        for post in &mut self.blog_posts {
            post.total_topics = post.topics.len();
            post.total_posts = post.topics.iter().map(|t| t.posts.len()).sum();
        }
    }

    // =========================================================================
    // Pure derivations
    // =========================================================================

    /// Finds a blog post by slug.
    pub fn blog_post_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.blog_posts.iter().find(|p| p.slug == slug)
    }

    /// Finds a category by id.
    pub fn category_by_id(&self, id: u64) -> Option<&ForumCategory> {
        self.index
            .slot_for_id(id)
            .and_then(|slot| self.forum_categories.get(slot))
    }

    /// Finds the blog post whose embedded category has the given id.
    pub fn blog_post_by_category(&self, category_id: u64) -> Option<&BlogPost> {
        self.blog_posts
            .iter()
            .find(|p| p.forum_category.id == category_id)
    }

    /// Finds a topic by slug across all blog posts.
    pub fn topic_by_slug(&self, slug: &str) -> Option<&Topic> {
        self.blog_posts
            .iter()
            .flat_map(|p| p.topics.iter())
            .find(|t| t.slug == slug)
    }

    /// Finds a topic by id across all blog posts.
    pub fn topic_by_id(&self, id: u64) -> Option<&Topic> {
        self.blog_posts
            .iter()
            .flat_map(|p| p.topics.iter())
            .find(|t| t.id == id)
    }

    /// Per-category aggregate counters.
    pub fn category_stats(&self, category_id: u64) -> CategoryStats {
        match self.category_by_id(category_id) {
            Some(category) => CategoryStats {
                total_topics: category.topics.len(),
                total_posts: category.topics.iter().map(|t| t.posts.len()).sum(),
            },
            None => CategoryStats::default(),
        }
    }

    /// Site-wide aggregate counters.
    ///
    /// Totals are sums of the per-category counters; `new_topics` counts
    /// topics with activity inside the last 24 hours.
    pub fn total_stats(&self) -> TotalStats {
        let total_topics = self.forum_categories.iter().map(|c| c.total_topics).sum();
        let total_posts = self.forum_categories.iter().map(|c| c.total_posts).sum();

        let day_ago = Utc::now() - Duration::hours(24);
        let new_topics = self
            .forum_categories
            .iter()
            .flat_map(|c| c.topics.iter())
            .filter(|t| {
                parse_timestamp(&t.last_activity)
                    .map(|at| at > day_ago)
                    .unwrap_or(false)
            })
            .count();

        TotalStats {
            total_topics,
            total_posts,
            total_members: TOTAL_MEMBERS_PLACEHOLDER,
            new_topics,
        }
    }

    /// The most recently created topics, newest first, capped at
    /// [`RECENT_TOPICS_LIMIT`]. Each topic's `category` field is set to
    /// the owning blog post's category name.
    pub fn recent_topics(&self) -> Vec<Topic> {
        let mut all: Vec<Topic> = Vec::new();
        for post in &self.blog_posts {
            for topic in &post.topics {
                let mut topic = topic.clone();
                topic.category = post.forum_category.name.clone();
                all.push(topic);
            }
        }

        all.sort_by_key(|t| {
            std::cmp::Reverse(parse_timestamp(&t.date).map(|d| d.timestamp()).unwrap_or(i64::MIN))
        });
        all.truncate(RECENT_TOPICS_LIMIT);
        all
    }
}
