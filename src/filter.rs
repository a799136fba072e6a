//! # Filter Predicate Engine
//!
//! [`apply_filters`] narrows a post collection by a [`FacetSelection`]. It is
//! a pure function: no state, no side effects, input order preserved.
//!
//! Each facet narrows the output of the previous step. An unset facet is a
//! no-op — an empty category set means "all categories", never "none". The
//! fully empty selection is the identity and returns the input unchanged.
//!
//! Matching rules:
//! - free text: case-insensitive substring of title, description, any tag or
//!   the author name
//! - categories / sectors: membership
//! - tags: a post passes with at least one selected tag (OR, not AND)
//! - paywall: exact match unless the tri-state is `Any`
//! - dates: `date_from` is an inclusive lower bound at midnight UTC compared
//!   against the full timestamp; `date_to` is applied as
//!   `created_at < date_to + 1 day`, so the whole end day is included no
//!   matter the post's time-of-day

use chrono::{Days, NaiveTime};

use crate::model::Post;
use crate::selection::{AccessFilter, FacetSelection};

pub fn apply_filters(posts: &[Post], selection: &FacetSelection) -> Vec<Post> {
    let mut filtered: Vec<Post> = posts.to_vec();

    if !selection.query.is_empty() {
        let needle = selection.query.to_lowercase();
        filtered.retain(|post| matches_query(post, &needle));
    }

    if !selection.categories.is_empty() {
        filtered.retain(|post| {
            selection
                .categories
                .iter()
                .any(|c| c == post.category.label())
        });
    }

    if !selection.sectors.is_empty() {
        filtered.retain(|post| selection.sectors.iter().any(|s| *s == post.author.sector));
    }

    if !selection.tags.is_empty() {
        filtered.retain(|post| post.tags.iter().any(|tag| selection.tags.contains(tag)));
    }

    if selection.access != AccessFilter::Any {
        filtered.retain(|post| selection.access.matches(post.is_paywalled));
    }

    if let Some(from) = selection.date_from {
        let lower = from.and_time(NaiveTime::MIN).and_utc();
        filtered.retain(|post| post.created_at >= lower);
    }

    if let Some(to) = selection.date_to {
        if let Some(next_day) = to.checked_add_days(Days::new(1)) {
            let upper = next_day.and_time(NaiveTime::MIN).and_utc();
            filtered.retain(|post| post.created_at < upper);
        }
    }

    filtered
}

fn matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.description.to_lowercase().contains(needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || post.author.name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Category};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn post(
        title: &str,
        category: Category,
        sector: &str,
        tags: &[&str],
        created_at: DateTime<Utc>,
        is_paywalled: bool,
    ) -> Post {
        let author = Author {
            id: "a1".into(),
            name: "Dr. Sarah Thompson".into(),
            affiliation: "AI Ethics Institute".into(),
            sector: sector.into(),
        };
        let mut p = Post::new(title, category, author, "A practical framework.")
            .with_tags(tags.iter().copied());
        p.created_at = created_at;
        p.is_paywalled = is_paywalled;
        p
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn sample() -> Vec<Post> {
        vec![
            post(
                "EU Funding Guide",
                Category::Research,
                "Higher Education",
                &["AI", "Policy"],
                at(2024, 1, 15, 9),
                false,
            ),
            post(
                "AI Ethics Workshop",
                Category::Events,
                "Non-profit",
                &["AI Ethics", "Workshop"],
                at(2024, 2, 10, 14),
                true,
            ),
            post(
                "Solar Grid Pilot",
                Category::Projects,
                "Energy",
                &["Renewable Energy"],
                at(2024, 3, 1, 8),
                false,
            ),
        ]
    }

    #[test]
    fn empty_selection_is_identity() {
        let posts = sample();
        let out = apply_filters(&posts, &FacetSelection::default());
        assert_eq!(out.len(), posts.len());
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["EU Funding Guide", "AI Ethics Workshop", "Solar Grid Pilot"]);
    }

    #[test]
    fn free_text_matches_title_description_tags_and_author() {
        let posts = sample();

        let mut sel = FacetSelection::default();
        sel.query = "funding".into();
        assert_eq!(apply_filters(&posts, &sel).len(), 1);

        sel.query = "FRAMEWORK".into(); // description, case-insensitive
        assert_eq!(apply_filters(&posts, &sel).len(), 3);

        sel.query = "renewable".into(); // tag
        assert_eq!(apply_filters(&posts, &sel)[0].title, "Solar Grid Pilot");

        sel.query = "thompson".into(); // author name
        assert_eq!(apply_filters(&posts, &sel).len(), 3);

        sel.query = "quantum".into();
        assert!(apply_filters(&posts, &sel).is_empty());
    }

    #[test]
    fn category_facet_is_membership() {
        let posts = sample();
        let mut sel = FacetSelection::default();
        sel.toggle_category("Research", true);
        sel.toggle_category("Projects", true);

        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.category != Category::Events));
    }

    #[test]
    fn sector_facet_uses_author_sector() {
        let posts = sample();
        let mut sel = FacetSelection::default();
        sel.toggle_sector("Energy", true);
        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Solar Grid Pilot");
    }

    #[test]
    fn tag_facet_has_or_semantics() {
        let posts = vec![
            post("only ai", Category::Research, "Energy", &["AI"], at(2024, 1, 1, 0), false),
            post("only research", Category::Research, "Energy", &["Research"], at(2024, 1, 2, 0), false),
            post("neither", Category::Research, "Energy", &["Other"], at(2024, 1, 3, 0), false),
        ];
        let mut sel = FacetSelection::default();
        sel.toggle_tag("AI", true);
        sel.toggle_tag("Research", true);

        let out = apply_filters(&posts, &sel);
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["only ai", "only research"]);
    }

    #[test]
    fn paywall_tristate() {
        let posts = sample();
        let mut sel = FacetSelection::default();

        sel.access = AccessFilter::FreeOnly;
        assert_eq!(apply_filters(&posts, &sel).len(), 2);

        sel.access = AccessFilter::PaywalledOnly;
        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "AI Ethics Workshop");
    }

    #[test]
    fn date_from_is_inclusive_at_full_precision() {
        let posts = vec![
            post("before", Category::Other, "Media", &[], at(2024, 2, 9, 23), false),
            post("on the day", Category::Other, "Media", &[], at(2024, 2, 10, 0), false),
        ];
        let mut sel = FacetSelection::default();
        sel.date_from = NaiveDate::from_ymd_opt(2024, 2, 10);

        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "on the day");
    }

    #[test]
    fn date_to_includes_entire_end_day() {
        let posts = vec![
            post("late on june 1", Category::Other, "Media", &[], at(2024, 6, 1, 23), false),
            post("start of june 2", Category::Other, "Media", &[], at(2024, 6, 2, 0), false),
        ];
        let mut sel = FacetSelection::default();
        sel.date_to = NaiveDate::from_ymd_opt(2024, 6, 1);

        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "late on june 1");
    }

    #[test]
    fn narrowing_steps_compose() {
        let posts = sample();
        let mut sel = FacetSelection::default();
        sel.query = "ai".into();
        sel.toggle_category("Events", true);
        sel.access = AccessFilter::PaywalledOnly;

        let out = apply_filters(&posts, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "AI Ethics Workshop");
    }
}
