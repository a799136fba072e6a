//! Facet vocabularies.
//!
//! The filter panel is one implementation parameterized by a
//! [`FacetCatalog`] — which values each facet offers — rather than separate
//! panel variants per page. The built-in catalog mirrors the board's
//! editorial lists; [`FacetCatalog::from_posts`] derives a catalog from
//! whatever collection is actually loaded.

use crate::model::{Category, Post};

pub const SECTORS: &[&str] = &[
    "Information Technology",
    "Higher Education",
    "Digital Services",
    "Non-profit",
    "Agriculture",
    "Transportation",
    "Healthcare",
    "Finance",
    "Manufacturing",
    "Energy",
    "Telecommunications",
    "Retail",
    "Media",
    "Construction",
    "Hospitality",
    "Real Estate",
    "Legal Services",
    "Consulting",
    "Aerospace",
    "Automotive",
];

pub const TAGS: &[&str] = &[
    "AI",
    "Machine Learning",
    "EU Project",
    "Smart Cities",
    "Technology",
    "Horizon Europe",
    "Renewable Energy",
    "Academic",
    "Research",
    "Solar Energy",
    "Digital Europe",
    "Cybersecurity",
    "SME",
    "Critical Infrastructure",
    "Network Security",
    "AI Ethics",
    "Workshop",
    "Governance",
    "Policy",
    "Brussels",
    "Agriculture",
    "Sustainability",
    "IoT",
    "Precision Farming",
    "Food Security",
    "Urban Mobility",
    "Transportation",
    "Carbon Reduction",
];

#[derive(Debug, Clone)]
pub struct FacetCatalog {
    pub categories: Vec<String>,
    pub sectors: Vec<String>,
    pub tags: Vec<String>,
}

impl FacetCatalog {
    /// The board's editorial vocabulary: every category, the curated sector
    /// and tag lists.
    pub fn builtin() -> Self {
        Self {
            categories: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            sectors: SECTORS.iter().map(|s| s.to_string()).collect(),
            tags: TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Catalog of the values that actually occur in `posts`, in first-seen
    /// order. Keeps the panel honest when the collection is small.
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let mut sectors: Vec<String> = Vec::new();
        let mut tags: Vec<String> = Vec::new();
        for post in posts {
            push_unique(&mut categories, post.category.label());
            push_unique(&mut sectors, &post.author.sector);
            for tag in &post.tags {
                push_unique(&mut tags, tag);
            }
        }
        Self {
            categories,
            sectors,
            tags,
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
