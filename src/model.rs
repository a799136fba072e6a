//! # Domain Model
//!
//! Core entities of the board: [`Post`], [`Author`], [`Comment`] and the
//! closed [`Category`] enumeration.
//!
//! A post never disappears because it expired — `expires_at` is informational
//! and only feeds the "days remaining" label in the presentation layer, which
//! may well be zero or negative.
//!
//! Comment threads are exactly one level deep: a comment may carry replies,
//! but a reply never carries replies of its own. [`Post::add_reply`] enforces
//! this instead of trusting callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardError, Result};

/// The closed set of post categories offered by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Events,
    Expertise,
    #[serde(rename = "Open Positions")]
    OpenPositions,
    #[serde(rename = "Partner Hunt")]
    PartnerHunt,
    Projects,
    Research,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Events,
        Category::Expertise,
        Category::OpenPositions,
        Category::PartnerHunt,
        Category::Projects,
        Category::Research,
        Category::Other,
    ];

    /// Human-readable label, as shown in the filter panel and on cards.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Events => "Events",
            Category::Expertise => "Expertise",
            Category::OpenPositions => "Open Positions",
            Category::PartnerHunt => "Partner Hunt",
            Category::Projects => "Projects",
            Category::Research => "Research",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub sector: String,
}

/// Comment authors carry an avatar reference instead of an affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Pdf,
    Image,
    Spreadsheet,
    Archive,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub kind: AttachmentKind,
    /// Opaque locator (URL or path); the core never dereferences it.
    pub locator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: CommentAuthor,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(author: CommentAuthor, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            content: content.into(),
            created_at: Utc::now(),
            likes: 0,
            replies: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Free text, may contain Markdown markup.
    pub description: String,
    /// Duplicate-free; insertion order is the chip display order.
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub likes: u32,
    pub is_paywalled: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(
        title: impl Into<String>,
        category: Category,
        author: Author,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category,
            author,
            created_at: now,
            expires_at: now + chrono::Duration::days(30),
            description: description.into(),
            tags: Vec::new(),
            attachments: Vec::new(),
            likes: 0,
            is_paywalled: false,
            comments: Vec::new(),
        }
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Signed whole days until expiry; zero or negative means expired.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at
            .date_naive()
            .signed_duration_since(now.date_naive())
            .num_days()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.days_remaining(now) <= 0
    }

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Attach a reply under the top-level comment `parent`.
    ///
    /// Returns `Ok(false)` when no comment with that id exists (a stale id is
    /// a no-op, not a failure). Replying to a reply is refused: threads stay
    /// one level deep.
    pub fn add_reply(&mut self, parent: Uuid, mut reply: Comment) -> Result<bool> {
        if self
            .comments
            .iter()
            .any(|c| c.replies.iter().any(|r| r.id == parent))
        {
            return Err(BoardError::Validation(
                "replies cannot be nested".to_string(),
            ));
        }
        match self.comments.iter_mut().find(|c| c.id == parent) {
            Some(comment) => {
                reply.replies.clear();
                comment.replies.push(reply);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Like a comment or a reply. Returns whether anything matched.
    pub fn like_comment(&mut self, comment_id: Uuid) -> bool {
        for comment in &mut self.comments {
            if comment.id == comment_id {
                comment.likes = comment.likes.saturating_add(1);
                return true;
            }
            for reply in &mut comment.replies {
                if reply.id == comment_id {
                    reply.likes = reply.likes.saturating_add(1);
                    return true;
                }
            }
        }
        false
    }

    /// Total comment count including replies, for the card footer.
    pub fn comment_count(&self) -> usize {
        self.comments
            .iter()
            .map(|c| 1 + c.replies.len())
            .sum()
    }
}

/// Flag a post to moderation. There is no backend; the report is only
/// logged so the surrounding UI can confirm the action.
pub fn report_post(post: &Post, reason: &str) {
    log::info!("reported post {:?} ({}): {}", post.title, post.id, reason);
}

/// Same for a single comment.
pub fn report_comment(post: &Post, comment_id: Uuid, reason: &str) {
    log::info!(
        "reported comment {} on post {:?}: {}",
        comment_id,
        post.title,
        reason
    );
}
