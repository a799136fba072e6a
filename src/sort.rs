//! Sort modes for the result list.
//!
//! Sorting is stable, so posts with equal keys keep their relative input
//! order. [`SortMode::parse`] returns `None` for unknown mode strings;
//! callers treat that as "leave the order alone" rather than an error.

use serde::{Deserialize, Serialize};

use crate::model::Post;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Descending `created_at`.
    #[default]
    Newest,
    /// Ascending `created_at`.
    Oldest,
    /// Descending like count ("most relevant").
    MostLiked,
}

impl SortMode {
    pub fn parse(s: &str) -> Option<SortMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(SortMode::Newest),
            "oldest" => Some(SortMode::Oldest),
            "relevant" | "most-liked" | "liked" => Some(SortMode::MostLiked),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Newest => "Newest First",
            SortMode::Oldest => "Oldest First",
            SortMode::MostLiked => "Most Relevant",
        }
    }
}

/// Returns a new, re-ordered collection; the input is not mutated.
pub fn sort_posts(posts: &[Post], mode: SortMode) -> Vec<Post> {
    let mut sorted: Vec<Post> = posts.to_vec();
    match mode {
        SortMode::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Oldest => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::MostLiked => sorted.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Category};
    use chrono::{TimeZone, Utc};

    fn post(title: &str, day: u32, likes: u32) -> Post {
        let author = Author {
            id: "a1".into(),
            name: "A".into(),
            affiliation: "B".into(),
            sector: "Energy".into(),
        };
        let mut p = Post::new(title, Category::Research, author, "");
        p.created_at = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
        p.likes = likes;
        p
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn newest_descends_oldest_ascends() {
        let posts = vec![post("mid", 10, 0), post("new", 20, 0), post("old", 1, 0)];
        assert_eq!(titles(&sort_posts(&posts, SortMode::Newest)), vec!["new", "mid", "old"]);
        assert_eq!(titles(&sort_posts(&posts, SortMode::Oldest)), vec!["old", "mid", "new"]);
        // input untouched
        assert_eq!(titles(&posts), vec!["mid", "new", "old"]);
    }

    #[test]
    fn most_liked_descends_and_is_stable() {
        let posts = vec![post("a", 1, 5), post("b", 2, 50), post("c", 3, 5)];
        assert_eq!(titles(&sort_posts(&posts, SortMode::MostLiked)), vec!["b", "a", "c"]);
    }

    #[test]
    fn parse_accepts_ui_aliases() {
        assert_eq!(SortMode::parse("newest"), Some(SortMode::Newest));
        assert_eq!(SortMode::parse("Oldest"), Some(SortMode::Oldest));
        assert_eq!(SortMode::parse("relevant"), Some(SortMode::MostLiked));
        assert_eq!(SortMode::parse("most-liked"), Some(SortMode::MostLiked));
        assert_eq!(SortMode::parse("alphabetical"), None);
    }
}
