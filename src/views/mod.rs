//! Page view-models.
//!
//! Plain display structs built from a store snapshot, plus the interaction
//! handlers each page wires to its controls. Rendering chrome (layout,
//! routing, styling) lives outside this crate; these types carry exactly
//! the data a page shows and translate user interactions into store
//! actions.

mod blog;
mod forum;
mod topic;

pub use blog::{submit_topic, BlogListingView, BlogPostView, BlogRow};
pub use forum::{mount_forum, CategoryCard, ForumPageView, TopicRow};
pub use topic::{mount_topic, submit_reply, vote_post, vote_topic, ReplyRow, TopicView};
