//! Domain types for the blog/forum feature set.
//!
//! These mirror the backend's camelCase JSON wire shapes. Every collection
//! and counter carries a serde default so a backend that omits a field (or
//! an older backend revision) still deserializes.
//!
//! Entity relationships: each `BlogPost` embeds the `ForumCategory` serving
//! as its comment section; each `Topic` belongs to exactly one category and
//! holds its `Post` replies. On the wire a topic names its category by
//! display string; the store resolves that to a category id on arrival
//! (see `store::CategoryIndex`).

use serde::{Deserialize, Serialize};

/// An article whose comment section is a forum category's topic list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub slug: String,
    pub forum_category: ForumCategory,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub total_posts: usize,
    #[serde(default)]
    pub total_topics: usize,
}

/// A named grouping of topics, paired 1:1 with a blog post's embedded
/// category metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub total_posts: usize,
    #[serde(default)]
    pub total_topics: usize,
}

/// A forum thread, owned by one category, containing replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// Creation timestamp (RFC 3339 or legacy Hebrew calendar text).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: usize,
    #[serde(default)]
    pub views: usize,
    #[serde(default)]
    pub last_activity: String,
    /// Category display name as sent by the backend.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub upvotes: usize,
    #[serde(default)]
    pub downvotes: usize,
    #[serde(default)]
    pub slug: String,
}

impl Topic {
    /// Net score shown next to the vote arrows.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// A single reply within a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub topic_id: u64,
    #[serde(default)]
    pub upvotes: usize,
    #[serde(default)]
    pub downvotes: usize,
    /// Parent post for nested replies. Declared on the wire but the UI
    /// renders replies flat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

impl Post {
    /// Net score shown next to the vote arrows.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// Draft of a new topic; the store adds the target category and timestamp
/// when building the wire request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
}

/// Draft of a new reply; the store adds the owning topic and timestamp
/// when building the wire request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    #[serde(default)]
    pub author: String,
}

/// Body of a vote request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    pub is_upvote: bool,
}

/// Aggregate counters shown on the forum landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TotalStats {
    pub total_topics: usize,
    pub total_posts: usize,
    pub total_members: usize,
    pub new_topics: usize,
}

/// Per-category aggregate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryStats {
    pub total_topics: usize,
    pub total_posts: usize,
}

fn category(id: u64, name: &str, description: &str, icon: &str) -> ForumCategory {
    ForumCategory {
        id,
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        topics: Vec::new(),
        total_posts: 0,
        total_topics: 0,
    }
}

/// Hardcoded category list used when `/forums` is unreachable.
pub fn fallback_categories() -> Vec<ForumCategory> {
    vec![
        category(
            1,
            "חרדה ודיכאון",
            "שיתוף חוויות וטיפים להתמודדות עם חרדה ודיכאון",
            "😰",
        ),
        category(
            2,
            "יחסים ומשפחה",
            "דיונים על יחסים, משפחה וקשרים בין-אישיים",
            "👨‍👩‍👧‍👦",
        ),
        category(
            3,
            "טכניקות הרגעה",
            "שיטות וטכניקות להרגעה וניהול מתח",
            "🧘‍♀️",
        ),
        category(4, "תמיכה הדדית", "מרחב לתמיכה הדדית ושיתוף חוויות", "🤝"),
    ]
}

/// Static blog posts seeded at store creation, replaced by server data
/// during initialization when the backend is reachable.
pub fn seed_blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: 1,
            title: "כיצד להתמודד עם חרדה חברתית".to_string(),
            excerpt: "מדריך מקיף להתמודדות עם חרדה חברתית וכיצד לבנות ביטחון עצמי...".to_string(),
            content: "תוכן מלא של המאמר על חרדה חברתית...".to_string(),
            author: "ד\"ר שרה כהן".to_string(),
            date: "15 בינואר 2025".to_string(),
            tags: vec![
                "חרדה".to_string(),
                "בריאות נפשית".to_string(),
                "טיפול".to_string(),
            ],
            read_time: "5 דקות קריאה".to_string(),
            slug: "how-to-deal-with-social-anxiety".to_string(),
            forum_category: category(
                1,
                "חרדה ודיכאון",
                "שיתוף חוויות וטיפים להתמודדות עם חרדה ודיכאון",
                "😰",
            ),
            topics: Vec::new(),
            total_posts: 0,
            total_topics: 0,
        },
        BlogPost {
            id: 2,
            title: "השפעת הטכנולוגיה על בריאות הנפש".to_string(),
            excerpt: "כיצד השימוש בסמארטפונים ורשתות חברתיות משפיע על בריאותנו הנפשית..."
                .to_string(),
            content: "תוכן מלא של המאמר על השפעת הטכנולוגיה...".to_string(),
            author: "פרופ׳ דוד לוי".to_string(),
            date: "12 בינואר 2025".to_string(),
            tags: vec![
                "טכנולוגיה".to_string(),
                "בריאות נפשית".to_string(),
                "מחקר".to_string(),
            ],
            read_time: "7 דקות קריאה".to_string(),
            slug: "technology-impact-on-mental-health".to_string(),
            forum_category: category(
                3,
                "טכניקות הרגעה",
                "שיטות וטכניקות להרגעה וניהול מתח",
                "🧘‍♀️",
            ),
            topics: Vec::new(),
            total_posts: 0,
            total_topics: 0,
        },
        BlogPost {
            id: 3,
            title: "טיפים לשיפור איכות השינה".to_string(),
            excerpt: "מדריך מעשי לשיפור איכות השינה ויצירת שגרת שינה בריאה...".to_string(),
            content: "תוכן מלא של המאמר על שיפור השינה...".to_string(),
            author: "ד\"ר מיכל גולדברג".to_string(),
            date: "10 בינואר 2025".to_string(),
            tags: vec![
                "שינה".to_string(),
                "בריאות".to_string(),
                "אורח חיים".to_string(),
            ],
            read_time: "4 דקות קריאה".to_string(),
            slug: "tips-for-better-sleep".to_string(),
            forum_category: category(
                2,
                "יחסים ומשפחה",
                "דיונים על יחסים, משפחה וקשרים בין-אישיים",
                "👨‍👩‍👧‍👦",
            ),
            topics: Vec::new(),
            total_posts: 0,
            total_topics: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_wire_shape() {
        let json = serde_json::json!({
            "id": 7,
            "title": "T",
            "content": "C",
            "author": "A",
            "date": "2025-01-15T10:00:00Z",
            "tags": ["a"],
            "replies": 2,
            "views": 10,
            "lastActivity": "2025-01-15T11:00:00Z",
            "category": "חרדה ודיכאון",
            "isHot": true,
            "posts": [],
            "upvotes": 3,
            "downvotes": 1,
            "slug": "t"
        });
        let topic: Topic = serde_json::from_value(json).unwrap();
        assert_eq!(topic.last_activity, "2025-01-15T11:00:00Z");
        assert!(topic.is_hot);
        assert_eq!(topic.score(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        // A minimal backend response still deserializes
        let topic: Topic = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "bare"
        }))
        .unwrap();
        assert!(topic.posts.is_empty());
        assert_eq!(topic.upvotes, 0);
        assert!(!topic.is_hot);

        let post: Post = serde_json::from_value(serde_json::json!({
            "id": 1
        }))
        .unwrap();
        assert!(post.parent_id.is_none());
    }

    #[test]
    fn test_vote_payload_wire_shape() {
        let value = serde_json::to_value(VotePayload { is_upvote: true }).unwrap();
        assert_eq!(value, serde_json::json!({"isUpvote": true}));
    }

    #[test]
    fn test_seed_content_consistent() {
        let posts = seed_blog_posts();
        let categories = fallback_categories();
        assert_eq!(posts.len(), 3);
        assert_eq!(categories.len(), 4);

        // Every seeded blog post embeds a category present in the fallback list
        for post in &posts {
            assert!(categories.iter().any(|c| c.id == post.forum_category.id
                && c.name == post.forum_category.name));
        }
    }
}
