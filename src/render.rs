//! # Rendering Module
//!
//! Turns the controller's read surface into display strings: the facet
//! panel, the saved-search picker, result rows and detail cards. All
//! functions are pure string builders — printing is the binary's job, and
//! every time-dependent label takes `now` explicitly.
//!
//! Category glyphs and colors live in one lookup table instead of being
//! scattered through the card builders.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use colored::{Color, Colorize};
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, TagEnd};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::{Category, Comment, Post};
use crate::saved::SavedSearch;
use crate::selection::{AccessFilter, FacetSelection};
use crate::sort::SortMode;
use crate::vocab::FacetCatalog;

pub const LINE_WIDTH: usize = 92;

/// Facet rows shown per panel section before collapsing into "(+N more)".
pub const PANEL_FACET_ROWS: usize = 8;

pub struct CategoryStyle {
    pub glyph: &'static str,
    pub color: Color,
}

static CATEGORY_STYLES: Lazy<HashMap<Category, CategoryStyle>> = Lazy::new(|| {
    let mut styles = HashMap::new();
    styles.insert(Category::Events, CategoryStyle { glyph: "▣", color: Color::Yellow });
    styles.insert(Category::Expertise, CategoryStyle { glyph: "✦", color: Color::Cyan });
    styles.insert(Category::OpenPositions, CategoryStyle { glyph: "☰", color: Color::Green });
    styles.insert(Category::PartnerHunt, CategoryStyle { glyph: "⚑", color: Color::Red });
    styles.insert(Category::Projects, CategoryStyle { glyph: "⚙", color: Color::Blue });
    styles.insert(Category::Research, CategoryStyle { glyph: "◉", color: Color::Magenta });
    styles.insert(Category::Other, CategoryStyle { glyph: "·", color: Color::White });
    styles
});

pub fn category_style(category: Category) -> &'static CategoryStyle {
    // the table covers every variant
    &CATEGORY_STYLES[&category]
}

fn category_badge(category: Category) -> String {
    let style = category_style(category);
    format!("{} {}", style.glyph, category.label())
        .color(style.color)
        .to_string()
}

/// One chip per active facet value, in display order.
pub fn selection_chips(selection: &FacetSelection) -> Vec<String> {
    let mut chips = Vec::new();
    if !selection.query.is_empty() {
        chips.push(format!("Search: \"{}\"", selection.query));
    }
    for c in &selection.categories {
        chips.push(c.color(Color::Blue).to_string());
    }
    for s in &selection.sectors {
        chips.push(s.color(Color::Green).to_string());
    }
    for t in &selection.tags {
        chips.push(t.color(Color::Magenta).to_string());
    }
    if selection.access != AccessFilter::Any {
        chips.push(selection.access.label().color(Color::Yellow).to_string());
    }
    if let Some(from) = selection.date_from {
        chips.push(format!("From: {}", short_date(from)));
    }
    if let Some(to) = selection.date_to {
        chips.push(format!("To: {}", short_date(to)));
    }
    chips
}

/// Uncolored one-line summary, used as the picker tooltip.
pub fn describe_selection(selection: &FacetSelection) -> String {
    let mut parts = Vec::new();
    if !selection.query.is_empty() {
        parts.push(format!("Search: \"{}\"", selection.query));
    }
    if !selection.categories.is_empty() {
        parts.push(format!("Categories: {}", selection.categories.join(", ")));
    }
    if !selection.sectors.is_empty() {
        parts.push(format!("Sectors: {}", selection.sectors.join(", ")));
    }
    if !selection.tags.is_empty() {
        parts.push(format!("Tags: {}", selection.tags.join(", ")));
    }
    if selection.access != AccessFilter::Any {
        parts.push(format!("Access: {}", selection.access.label()));
    }
    match (selection.date_from, selection.date_to) {
        (Some(from), Some(to)) => {
            parts.push(format!("From: {}, To: {}", short_date(from), short_date(to)))
        }
        (Some(from), None) => parts.push(format!("From: {}", short_date(from))),
        (None, Some(to)) => parts.push(format!("To: {}", short_date(to))),
        (None, None) => {}
    }
    if parts.is_empty() {
        "No filters applied".to_string()
    } else {
        parts.join(" · ")
    }
}

/// The full filter panel for a facet catalog and the live selection.
pub fn facet_panel(catalog: &FacetCatalog, selection: &FacetSelection) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Filter By".bold()));

    let chips = selection_chips(selection);
    if !chips.is_empty() {
        out.push_str("Selected Filters: ");
        out.push_str(&chips.join("  "));
        out.push('\n');
    }

    facet_section(&mut out, "Categories", &catalog.categories, &selection.categories);
    facet_section(&mut out, "Sectors", &catalog.sectors, &selection.sectors);
    facet_section(&mut out, "Tags", &catalog.tags, &selection.tags);

    out.push_str(&format!("{}\n", "Access Type".bold()));
    for (label, value) in [
        ("Free Access Only", AccessFilter::FreeOnly),
        ("Paywalled Only", AccessFilter::PaywalledOnly),
    ] {
        let mark = if selection.access == value { "(x)" } else { "( )" };
        out.push_str(&format!("  {} {}\n", mark, label));
    }

    out.push_str(&format!("{}\n", "Date Range".bold()));
    out.push_str(&format!("  From: {}\n", date_or_placeholder(selection.date_from)));
    out.push_str(&format!("  To:   {}\n", date_or_placeholder(selection.date_to)));
    out
}

fn facet_section(out: &mut String, title: &str, offered: &[String], selected: &[String]) {
    out.push_str(&format!("{}\n", title.bold()));
    let mut shown = 0;
    for value in offered {
        let on = selected.iter().any(|s| s == value);
        // collapsed rows never hide an active selection
        if shown >= PANEL_FACET_ROWS && !on {
            continue;
        }
        let mark = if on { "[x]" } else { "[ ]" };
        out.push_str(&format!("  {} {}\n", mark, value));
        shown += 1;
    }
    if offered.len() > shown {
        out.push_str(&format!("      (+{} more)\n", offered.len() - shown));
    }
}

fn date_or_placeholder(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => short_date(d),
        None => "Select date".dimmed().to_string(),
    }
}

/// The saved-search picker with the active entry marked.
pub fn saved_search_picker(
    entries: &[SavedSearch],
    active: Option<uuid::Uuid>,
    dirty: bool,
) -> String {
    let mut out = String::new();
    let save_hint = if dirty { "save available" } else { "nothing to save" };
    out.push_str(&format!("{} ({})\n", "Saved Searches".bold(), save_hint));

    if entries.is_empty() {
        out.push_str("  No saved searches yet\n");
        return out;
    }
    for entry in entries {
        let marker = if active == Some(entry.id) { "●" } else { " " };
        out.push_str(&format!(
            "{} {} — {}\n",
            marker,
            entry.name.bold(),
            short_date(entry.created_at.date_naive()).dimmed(),
        ));
        out.push_str(&format!("    {}\n", describe_selection(&entry.selection).dimmed()));
    }
    out
}

pub fn results_header(count: usize, sort: SortMode) -> String {
    let noun = if count == 1 { "resource" } else { "resources" };
    format!("{} {} found · {}", count, noun, sort.label())
}

/// One list row: index, category badge, title, likes, age.
pub fn post_row(index: usize, post: &Post, now: DateTime<Utc>) -> String {
    let title = truncate_to_width(&post.title, 48);
    let paywall = if post.is_paywalled {
        format!(" {}", "(paywalled)".dimmed())
    } else {
        String::new()
    };
    format!(
        "{:>2}. {} {}{}  {}♥  {}",
        index,
        category_badge(post.category),
        title,
        paywall,
        post.likes,
        time_ago(now, post.created_at).dimmed(),
    )
}

/// Full detail card, comments included.
pub fn post_card(post: &Post, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", category_badge(post.category), post.title.bold()));
    out.push_str(&format!(
        "by {} — {} ({})\n",
        post.author.name, post.author.affiliation, post.author.sector
    ));
    out.push_str(&format!(
        "posted {} ({}) · {}\n",
        short_date(post.created_at.date_naive()),
        time_ago(now, post.created_at),
        expiry_label(post, now),
    ));
    let access = if post.is_paywalled { "Paywalled" } else { "Free Access" };
    out.push_str(&format!(
        "{}♥ · {} comments · {}\n",
        post.likes,
        post.comment_count(),
        access
    ));
    if !post.tags.is_empty() {
        let tags: Vec<String> = post
            .tags
            .iter()
            .map(|t| format!("#{}", t).color(Color::Magenta).to_string())
            .collect();
        out.push_str(&format!("tags: {}\n", tags.join(" ")));
    }
    for attachment in &post.attachments {
        out.push_str(&format!("attachment: {} ({:?})\n", attachment.name, attachment.kind));
    }
    out.push('\n');
    out.push_str(&markdown_preview(&post.description, LINE_WIDTH * 3));
    out.push('\n');
    if !post.comments.is_empty() {
        out.push('\n');
        for comment in &post.comments {
            render_comment(&mut out, comment, now, 0);
        }
    }
    out
}

fn render_comment(out: &mut String, comment: &Comment, now: DateTime<Utc>, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    out.push_str(&format!(
        "{}{} ({}♥, {}): {}\n",
        indent,
        comment.author.name.bold(),
        comment.likes,
        time_ago(now, comment.created_at),
        comment.content,
    ));
    for reply in &comment.replies {
        render_comment(out, reply, now, depth + 1);
    }
}

pub fn expiry_label(post: &Post, now: DateTime<Utc>) -> String {
    let days = post.days_remaining(now);
    if days <= 0 {
        "Expired".color(Color::Red).to_string()
    } else if days == 1 {
        "1 day remaining".to_string()
    } else {
        format!("{} days remaining", days)
    }
}

/// Strip Markdown markup down to plain text and cap the width.
fn markdown_preview(text: &str, max_width: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new(text) {
        match event {
            Event::Text(t) => plain.push_str(&t),
            Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak | Event::HardBreak => plain.push(' '),
            // block boundaries become a single space; inline ends (emphasis,
            // links) must not split words from their punctuation
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => plain.push(' '),
            _ => {}
        }
    }
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_to_width(&collapsed, max_width)
}

fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = (now - then).to_std().unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}

fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use chrono::TimeZone;

    fn no_color() {
        colored::control::set_override(false);
    }

    fn post() -> Post {
        let author = Author {
            id: "a1".into(),
            name: "Dr. Elena Rodriguez".into(),
            affiliation: "ERC".into(),
            sector: "Higher Education".into(),
        };
        let mut p = Post::new(
            "EU Funding Guide",
            Category::Research,
            author,
            "A guide to **Horizon Europe** and *more*.",
        )
        .with_tags(["Policy"]);
        p.created_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        p.expires_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        p.likes = 7;
        p
    }

    #[test]
    fn chips_follow_display_order() {
        no_color();
        let mut sel = FacetSelection::default();
        sel.query = "ai".into();
        sel.toggle_category("Research", true);
        sel.toggle_tag("Policy", true);
        sel.access = AccessFilter::FreeOnly;

        let chips = selection_chips(&sel);
        assert_eq!(chips[0], "Search: \"ai\"");
        assert_eq!(chips[1], "Research");
        assert_eq!(chips[2], "Policy");
        assert_eq!(chips[3], "Free Access");
    }

    #[test]
    fn describe_selection_empty_and_full() {
        no_color();
        assert_eq!(describe_selection(&FacetSelection::default()), "No filters applied");

        let mut sel = FacetSelection::default();
        sel.toggle_category("Events", true);
        sel.date_to = NaiveDate::from_ymd_opt(2024, 6, 1);
        let text = describe_selection(&sel);
        assert!(text.contains("Categories: Events"));
        assert!(text.contains("To: Jun 1, 2024"));
    }

    #[test]
    fn panel_marks_selected_values_and_collapses_long_lists() {
        no_color();
        let catalog = FacetCatalog::builtin();
        let mut sel = FacetSelection::default();
        sel.toggle_sector("Automotive", true); // dead last in the catalog

        let panel = facet_panel(&catalog, &sel);
        assert!(panel.contains("[x] Automotive"));
        assert!(panel.contains("[ ] Events"));
        assert!(panel.contains("more)"));
        assert!(panel.contains("( ) Free Access Only"));
        assert!(panel.contains("Select date"));
    }

    #[test]
    fn picker_shows_empty_state_and_active_marker() {
        no_color();
        let empty = saved_search_picker(&[], None, false);
        assert!(empty.contains("No saved searches yet"));
        assert!(empty.contains("nothing to save"));

        let entry = SavedSearch {
            id: uuid::Uuid::new_v4(),
            name: "EU calls".into(),
            selection: FacetSelection::default(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        };
        let picker = saved_search_picker(std::slice::from_ref(&entry), Some(entry.id), true);
        assert!(picker.contains("● EU calls"));
        assert!(picker.contains("No filters applied"));
        assert!(picker.contains("save available"));
    }

    #[test]
    fn results_header_counts() {
        assert_eq!(results_header(1, SortMode::Newest), "1 resource found · Newest First");
        assert_eq!(
            results_header(12, SortMode::MostLiked),
            "12 resources found · Most Relevant"
        );
    }

    #[test]
    fn card_carries_expiry_and_plain_description() {
        no_color();
        let p = post();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let card = post_card(&p, now);
        assert!(card.contains("Expired"));
        assert!(card.contains("A guide to Horizon Europe and more."));
        assert!(!card.contains("**"));
        assert!(card.contains("#Policy"));
        assert!(card.contains("Free Access"));
    }

    #[test]
    fn expiry_label_counts_down() {
        no_color();
        let mut p = post();
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap();
        assert_eq!(expiry_label(&p, now), "2 days remaining");
        p.expires_at = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(expiry_label(&p, now), "1 day remaining");
    }

    #[test]
    fn truncation_is_width_aware() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a very long title that keeps going", 10);
        assert!(cut.ends_with('…'));
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 10);
    }
}
