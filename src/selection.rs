//! # Facet Selection
//!
//! [`FacetSelection`] is the query a user is building in the filter panel:
//! free text, three multi-value facets, the paywall tri-state and an optional
//! date window. It is plain data — the predicate engine in [`crate::filter`]
//! interprets it, the controller in [`crate::controller`] owns the live copy,
//! and the saved-search store persists snapshots of it.
//!
//! Multi-value facets behave as sets: no duplicates, membership-only
//! filtering. Insertion order is still kept because it is the order the
//! selected-filter chips are displayed in.
//!
//! Date bounds are calendar days. The panel's pickers produce whole days, and
//! the end-of-range day is included in full regardless of a post's
//! time-of-day (see [`crate::filter`] for the exact comparison).
//!
//! Persisted snapshots store dates as ISO-8601 strings. An unparseable date
//! in a stored snapshot degrades to "no bound" rather than poisoning the
//! whole entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Paywall facet: a tri-state, not a boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessFilter {
    /// No preference; the facet is inactive.
    #[default]
    Any,
    FreeOnly,
    PaywalledOnly,
}

impl AccessFilter {
    pub fn matches(&self, is_paywalled: bool) -> bool {
        match self {
            AccessFilter::Any => true,
            AccessFilter::FreeOnly => !is_paywalled,
            AccessFilter::PaywalledOnly => is_paywalled,
        }
    }

    pub fn parse(s: &str) -> Option<AccessFilter> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Some(AccessFilter::Any),
            "free" | "free-only" => Some(AccessFilter::FreeOnly),
            "paywalled" | "paywalled-only" => Some(AccessFilter::PaywalledOnly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessFilter::Any => "Any",
            AccessFilter::FreeOnly => "Free Access",
            AccessFilter::PaywalledOnly => "Paywalled",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSelection {
    /// Free-text query; empty matches everything.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub access: AccessFilter,
    /// Inclusive lower bound on `created_at`, as a calendar day.
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `created_at`; the whole day is included.
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub date_to: Option<NaiveDate>,
}

impl FacetSelection {
    /// True when no facet narrows anything: the identity selection.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.categories.is_empty()
            && self.sectors.is_empty()
            && self.tags.is_empty()
            && self.access == AccessFilter::Any
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    pub fn toggle_category(&mut self, name: &str, on: bool) {
        toggle(&mut self.categories, name, on);
    }

    pub fn toggle_sector(&mut self, name: &str, on: bool) {
        toggle(&mut self.sectors, name, on);
    }

    pub fn toggle_tag(&mut self, name: &str, on: bool) {
        toggle(&mut self.tags, name, on);
    }

    /// Value equality where the multi-value facets compare as sets.
    ///
    /// `["Events", "Research"]` and `["Research", "Events"]` are the same
    /// selection; the chip display order is not part of the query's meaning.
    pub fn is_equivalent(&self, other: &FacetSelection) -> bool {
        self.query == other.query
            && set_equal(&self.categories, &other.categories)
            && set_equal(&self.sectors, &other.sectors)
            && set_equal(&self.tags, &other.tags)
            && self.access == other.access
            && self.date_from == other.date_from
            && self.date_to == other.date_to
    }
}

fn toggle(values: &mut Vec<String>, value: &str, on: bool) {
    if on {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    } else {
        values.retain(|v| v != value);
    }
}

fn set_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b_sorted: Vec<&str> = b.iter().map(String::as_str).collect();
    a_sorted.sort_unstable();
    b_sorted.sort_unstable();
    a_sorted == b_sorted
}

fn de_lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            log::warn!("dropping unparseable date {:?} from stored selection", s);
            None
        }
    }))
}
