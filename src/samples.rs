//! The in-memory sample collection.
//!
//! There is no post supply service; the board runs on this fixed set, the
//! way the original pages embed their sample data. Expiry dates are mixed on
//! purpose: some posts are long past their deadline and must still show up
//! (flagged as expired), one is about to lapse.

use chrono::{Duration, TimeZone, Utc};

use crate::model::{
    Attachment, AttachmentKind, Author, Category, Comment, CommentAuthor, Post,
};

fn author(id: &str, name: &str, affiliation: &str, sector: &str) -> Author {
    Author {
        id: id.into(),
        name: name.into(),
        affiliation: affiliation.into(),
        sector: sector.into(),
    }
}

fn commenter(id: &str, name: &str) -> CommentAuthor {
    CommentAuthor {
        id: id.into(),
        name: name.into(),
        avatar: format!("/avatars/{}.png", id),
    }
}

fn comment(id: &str, name: &str, content: &str, likes: u32) -> Comment {
    let mut c = Comment::new(commenter(id, name), content);
    c.likes = likes;
    c
}

/// Build the sample collection. Ids are fresh on every call; everything else
/// is deterministic except the one relative expiry.
pub fn sample_posts() -> Vec<Post> {
    let mut posts = Vec::new();

    let mut p = Post::new(
        "Comprehensive Guide to EU Funding Programs 2024",
        Category::Research,
        author("a1", "Dr. Elena Rodriguez", "European Research Council", "Higher Education"),
        "A comprehensive guide covering all major EU funding programs including \
         **Horizon Europe**, Digital Europe Programme, and LIFE Programme. Detailed \
         information on application procedures, eligibility criteria, and success \
         strategies for securing EU funding.",
    )
    .with_tags(["EU Project", "Horizon Europe", "Research", "Policy"]);
    p.created_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
    p.likes = 156;
    p.attachments.push(Attachment {
        name: "EU_Funding_Guide_2024.pdf".into(),
        kind: AttachmentKind::Pdf,
        locator: "/files/EU_Funding_Guide_2024.pdf".into(),
    });
    let c = comment(
        "u2",
        "Prof. Michael Chen",
        "Excellent resource! This guide helped our university secure three major grants this year.",
        12,
    );
    let parent = c.id;
    p.add_comment(c);
    p.add_reply(
        parent,
        comment("u7", "Dr. Elena Rodriguez", "Glad it was useful — updates coming in March.", 3),
    )
    .ok();
    posts.push(p);

    let mut p = Post::new(
        "AI Ethics Framework for European Organizations",
        Category::Expertise,
        author("a2", "Dr. Sarah Thompson", "AI Ethics Institute", "Non-profit"),
        "A practical framework for implementing AI ethics in European organizations, \
         covering GDPR compliance, algorithmic transparency, and responsible AI \
         development practices. Includes case studies and implementation templates.",
    )
    .with_tags(["AI Ethics", "AI", "Governance", "Policy"]);
    p.created_at = Utc.with_ymd_and_hms(2024, 2, 10, 14, 0, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
    p.likes = 89;
    p.is_paywalled = true;
    posts.push(p);

    let mut p = Post::new(
        "Sustainable Technology Innovation Handbook",
        Category::Projects,
        author("a3", "Dr. Lars Andersen", "Green Tech Alliance", "Energy"),
        "Handbook covering sustainable technology innovations, renewable energy \
         solutions, and green technology implementation strategies, with case \
         studies from successful European green tech projects.",
    )
    .with_tags(["Sustainability", "Renewable Energy", "Solar Energy", "Carbon Reduction"]);
    p.created_at = Utc.with_ymd_and_hms(2024, 3, 5, 8, 15, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
    p.likes = 134;
    p.add_comment(comment(
        "u3",
        "Maria Gonzalez",
        "This handbook is a goldmine for anyone working in sustainable technology.",
        8,
    ));
    posts.push(p);

    let mut p = Post::new(
        "Digital Transformation Best Practices for SMEs",
        Category::Expertise,
        author("a4", "Thomas Weber", "Digital Innovation Hub", "Digital Services"),
        "A practical guide for small and medium enterprises undergoing digital \
         transformation: technology adoption strategies, change management, and \
         digital skills development.",
    )
    .with_tags(["SME", "Technology", "Digital Europe"]);
    p.created_at = Utc.with_ymd_and_hms(2024, 4, 12, 11, 45, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2025, 4, 12, 0, 0, 0).unwrap();
    p.likes = 67;
    p.is_paywalled = true;
    posts.push(p);

    let mut p = Post::new(
        "Cybersecurity Framework for Critical Infrastructure",
        Category::Research,
        author("a5", "Dr. Anna Kowalski", "Cybersecurity Research Institute", "Information Technology"),
        "Cybersecurity framework designed for protecting critical infrastructure in \
         Europe: threat assessment methodologies, incident response procedures, and \
         compliance guidelines.",
    )
    .with_tags(["Cybersecurity", "Critical Infrastructure", "Network Security"]);
    p.created_at = Utc.with_ymd_and_hms(2024, 5, 8, 16, 20, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2025, 5, 8, 0, 0, 0).unwrap();
    p.likes = 98;
    p.add_comment(comment(
        "u4",
        "Robert Johnson",
        "Essential reading for anyone involved in infrastructure security.",
        5,
    ));
    posts.push(p);

    let mut p = Post::new(
        "Partner Hunt: Smart Cities Consortium for Horizon Call",
        Category::PartnerHunt,
        author("a6", "Ingrid Svensson", "Nordic Urban Lab", "Information Technology"),
        "Looking for municipal and academic partners to join a Horizon Europe \
         consortium on smart city mobility data platforms. Deadline passed for the \
         2023 call; kept for reference.",
    )
    .with_tags(["Smart Cities", "EU Project", "Urban Mobility", "IoT"]);
    p.created_at = Utc.with_ymd_and_hms(2023, 5, 20, 10, 0, 0).unwrap();
    p.expires_at = Utc.with_ymd_and_hms(2023, 7, 15, 0, 0, 0).unwrap();
    p.likes = 24;
    posts.push(p);

    let mut p = Post::new(
        "Workshop: AI Governance and Policy in Brussels",
        Category::Events,
        author("a7", "Policy Forum Europe", "Policy Forum Europe", "Non-profit"),
        "Two-day workshop on AI governance, bringing together regulators, industry \
         and academia. Registration closes soon.",
    )
    .with_tags(["Workshop", "Governance", "Policy", "Brussels", "AI"]);
    p.created_at = Utc::now() - Duration::days(12);
    p.expires_at = Utc::now() + Duration::days(8);
    p.likes = 45;
    posts.push(p);

    posts
}
