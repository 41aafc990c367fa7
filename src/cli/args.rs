//! Command-line argument parsing for the caresync browser.

use crate::error::{CareSyncError, Result};
use std::env;
use std::process;

/// Command-line interface commands
#[derive(Debug)]
pub enum Command {
    /// Forum landing page: categories, stats, recent topics.
    Forums,
    /// Blog listing.
    Blog,
    /// A single blog post with its discussion threads.
    Post { slug: String },
    /// A single topic thread with replies.
    Topic { slug: String },
    /// Create a topic in a category.
    NewTopic {
        category_id: u64,
        title: String,
        content: String,
        tags: Vec<String>,
    },
    /// Reply to a topic.
    Reply { topic_id: u64, content: String },
    /// Vote on a topic.
    VoteTopic { topic_id: u64, upvote: bool },
    /// Vote on a reply.
    VotePost { post_id: u64, upvote: bool },
    /// Backend health check.
    Health,
}

/// Parse command line arguments into a Command
pub fn parse_args() -> Result<Command> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "forums" => Ok(Command::Forums),
        "blog" => Ok(Command::Blog),
        "post" => {
            if args.len() < 3 {
                eprintln!("Error: post requires a slug");
                eprintln!("Usage: caresync post <slug>");
                process::exit(1);
            }
            Ok(Command::Post {
                slug: args[2].clone(),
            })
        }
        "topic" => {
            if args.len() < 3 {
                eprintln!("Error: topic requires a slug");
                eprintln!("Usage: caresync topic <slug>");
                process::exit(1);
            }
            Ok(Command::Topic {
                slug: args[2].clone(),
            })
        }
        "new-topic" => {
            if args.len() < 5 {
                eprintln!("Error: new-topic requires a category id, title and content");
                eprintln!("Usage: caresync new-topic <category_id> <title> <content> [tags...]");
                process::exit(1);
            }
            let category_id = parse_id(&args[2], "category id")?;
            Ok(Command::NewTopic {
                category_id,
                title: args[3].clone(),
                content: args[4].clone(),
                tags: args[5..].to_vec(),
            })
        }
        "reply" => {
            if args.len() < 4 {
                eprintln!("Error: reply requires a topic id and content");
                eprintln!("Usage: caresync reply <topic_id> <content>");
                process::exit(1);
            }
            let topic_id = parse_id(&args[2], "topic id")?;
            Ok(Command::Reply {
                topic_id,
                content: args[3].clone(),
            })
        }
        "vote-topic" => {
            if args.len() < 4 {
                eprintln!("Error: vote-topic requires a topic id and up|down");
                eprintln!("Usage: caresync vote-topic <topic_id> <up|down>");
                process::exit(1);
            }
            Ok(Command::VoteTopic {
                topic_id: parse_id(&args[2], "topic id")?,
                upvote: parse_direction(&args[3])?,
            })
        }
        "vote-post" => {
            if args.len() < 4 {
                eprintln!("Error: vote-post requires a post id and up|down");
                eprintln!("Usage: caresync vote-post <post_id> <up|down>");
                process::exit(1);
            }
            Ok(Command::VotePost {
                post_id: parse_id(&args[2], "post id")?,
                upvote: parse_direction(&args[3])?,
            })
        }
        "health" => Ok(Command::Health),
        other => {
            eprintln!("Error: unknown command '{other}'");
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_id(raw: &str, what: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| CareSyncError::validation(format!("Invalid {what}: {raw}")))
}

fn parse_direction(raw: &str) -> Result<bool> {
    match raw {
        "up" => Ok(true),
        "down" => Ok(false),
        other => Err(CareSyncError::validation(format!(
            "Invalid vote direction '{other}' (expected up or down)"
        ))),
    }
}

fn print_usage() {
    eprintln!("caresync - CareSync forum browser");
    eprintln!();
    eprintln!("Usage: caresync <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  forums                                        Show categories, stats and recent topics");
    eprintln!("  blog                                          Show the blog listing");
    eprintln!("  post <slug>                                   Show a blog post and its threads");
    eprintln!("  topic <slug>                                  Show a topic thread with replies");
    eprintln!("  new-topic <category_id> <title> <content> [tags...]");
    eprintln!("                                                Create a topic");
    eprintln!("  reply <topic_id> <content>                    Reply to a topic");
    eprintln!("  vote-topic <topic_id> <up|down>               Vote on a topic");
    eprintln!("  vote-post <post_id> <up|down>                 Vote on a reply");
    eprintln!("  health                                        Check backend reachability");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CARESYNC_API_URL        Backend base URL");
    eprintln!("  CARESYNC_TIMEOUT_SECS   Request timeout in seconds");
    eprintln!("  CARESYNC_TOKEN_FILE     Path of the persisted session token");
}
