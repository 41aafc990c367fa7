//! Command execution: wires the store to the terminal.

use super::args::Command;
use crate::api::{ApiClient, ApiConfig};
use crate::error::{CareSyncError, Result};
use crate::forms::{ReplyDraft, TopicDraft};
use crate::store::BlogStore;
use crate::views::{
    mount_topic, submit_reply, submit_topic, vote_post, vote_topic, BlogListingView, BlogPostView,
    ForumPageView, TopicView,
};

/// Execute a parsed command against the configured backend.
pub async fn run(command: Command) -> Result<()> {
    let config = ApiConfig::load();
    let store = BlogStore::new(ApiClient::new(&config));

    match command {
        Command::Forums => {
            store.initialize().await;
            print_forums(&ForumPageView::build(&store.snapshot().await));
        }
        Command::Blog => {
            store.initialize().await;
            print_blog_listing(&BlogListingView::build(&store.snapshot().await));
        }
        Command::Post { slug } => {
            store.initialize().await;
            let state = store.snapshot().await;
            let view = BlogPostView::build(&state, &slug)
                .ok_or_else(|| CareSyncError::not_found(format!("No blog post '{slug}'")))?;
            print_blog_post(&view);
        }
        Command::Topic { slug } => {
            store.initialize().await;
            let view = mount_topic(&store, &slug)
                .await
                .ok_or_else(|| CareSyncError::not_found(format!("No topic '{slug}'")))?;
            print_topic(&view);
        }
        Command::NewTopic {
            category_id,
            title,
            content,
            tags,
        } => {
            store.initialize().await;
            let mut draft = TopicDraft::new();
            draft.title = title;
            draft.content = content;
            for tag in &tags {
                draft.add_tag(tag);
            }
            let topic = submit_topic(&store, category_id, &draft).await?;
            println!("Created topic #{} '{}' ({})", topic.id, topic.title, topic.slug);
        }
        Command::Reply { topic_id, content } => {
            store.initialize().await;
            let mut draft = ReplyDraft::new();
            draft.content = content;
            let post = submit_reply(&store, topic_id, &draft).await?;
            println!("Posted reply #{} on topic #{}", post.id, post.topic_id);
        }
        Command::VoteTopic { topic_id, upvote } => {
            store.initialize().await;
            vote_topic(&store, topic_id, upvote).await?;
            println!(
                "Recorded {} for topic #{topic_id}",
                if upvote { "upvote" } else { "downvote" }
            );
        }
        Command::VotePost { post_id, upvote } => {
            store.initialize().await;
            vote_post(&store, post_id, upvote).await?;
            println!(
                "Recorded {} for post #{post_id}",
                if upvote { "upvote" } else { "downvote" }
            );
        }
        Command::Health => {
            if store.health_check().await {
                println!("Backend is reachable");
            } else {
                println!("Backend is unreachable");
            }
        }
    }

    Ok(())
}

fn print_forums(view: &ForumPageView) {
    if let Some(error) = &view.error {
        println!("! {error}");
        println!();
    }

    println!("=== Categories ===");
    for card in &view.categories {
        println!(
            "{} {} (#{}) - {} topics, {} posts",
            card.icon, card.name, card.id, card.total_topics, card.total_posts
        );
        println!("    {}", card.description);
        if let Some(activity) = &card.last_activity {
            println!("    Last activity: {activity}");
        }
    }

    println!();
    println!("=== Stats ===");
    println!(
        "{} topics, {} posts, {} members, {} new today",
        view.stats.total_topics,
        view.stats.total_posts,
        view.stats.total_members,
        view.stats.new_topics
    );

    if !view.recent_topics.is_empty() {
        println!();
        println!("=== Recent topics ===");
        for row in &view.recent_topics {
            print_topic_row(row);
        }
    }
}

fn print_topic_row(row: &crate::views::TopicRow) {
    println!(
        "{}#{} [{}] {} - {} ({}, {} replies, {} views, score {})",
        if row.is_hot { "* " } else { "" },
        row.id,
        row.category,
        row.title,
        row.author,
        row.created_label,
        row.replies,
        row.views,
        row.score
    );
}

fn print_blog_listing(view: &BlogListingView) {
    if let Some(error) = &view.error {
        println!("! {error}");
        println!();
    }

    for row in &view.rows {
        println!("{} ({})", row.title, row.slug);
        println!(
            "    {} | {} | {} | {} threads",
            row.author, row.date_label, row.read_time, row.topic_count
        );
        println!("    {}", row.excerpt);
        if !row.tags.is_empty() {
            println!("    Tags: {}", row.tags.join(", "));
        }
    }
}

fn print_blog_post(view: &BlogPostView) {
    println!("{}", view.title);
    println!(
        "{} | {} | {}",
        view.author, view.date_label, view.read_time
    );
    if !view.tags.is_empty() {
        println!("Tags: {}", view.tags.join(", "));
    }
    println!();
    println!("{}", view.content);
    println!();
    println!(
        "=== {} {} - {} topics, {} posts ===",
        view.category_icon, view.category_name, view.total_topics, view.total_posts
    );
    for row in &view.topics {
        print_topic_row(row);
    }
}

fn print_topic(view: &TopicView) {
    println!("[{}] {}", view.category, view.title);
    println!(
        "{} | {} | {} views | score {} ({} votes)",
        view.author, view.date_label, view.views, view.score, view.votes_cast
    );
    if !view.tags.is_empty() {
        println!("Tags: {}", view.tags.join(", "));
    }
    println!();
    println!("{}", view.content);
    println!();
    println!("=== {} replies ===", view.reply_count);
    for reply in &view.replies {
        println!(
            "#{} {} ({}, score {})",
            reply.id, reply.author, reply.date_label, reply.score
        );
        println!("    {}", reply.content);
    }
}
