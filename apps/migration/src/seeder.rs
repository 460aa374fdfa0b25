//! Demo data: 5 authors, 8 categories, 20 tags, 30 published posts and
//! 10 drafts, each post carrying 1 to 5 tags.
//!
//! Every value is derived from the row index so repeated runs against a
//! fresh database produce the same content.

use chrono::{DateTime, Duration, Utc};
use sea_orm_migration::sea_orm::{DbConn, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use quire_core::domain::{Author, Category, Post, Tag};
use quire_core::error::RepoError;
use quire_core::ports::{BaseRepository, PostRepository};
use quire_infra::database::entity::user;
use quire_infra::{SqlAuthorRepository, SqlCategoryRepository, SqlPostRepository, SqlTagRepository};

const AUTHORS: [&str; 5] = [
    "Maya Lindqvist",
    "Tomasz Wrona",
    "Priya Raman",
    "Jonah Okafor",
    "Elena Duarte",
];

const CATEGORIES: [(&str, &str); 8] = [
    ("Engineering", "#EF4444"),
    ("Design", "#F97316"),
    ("Product", "#EAB308"),
    ("Culture", "#22C55E"),
    ("Data", "#3B82F6"),
    ("Security", "#8B5CF6"),
    ("Career", "#EC4899"),
    ("Open Source", "#06B6D4"),
];

const TAGS: [&str; 20] = [
    "Rust", "Postgres", "Testing", "Performance", "Tooling", "Async", "Caching", "Search",
    "Accessibility", "Typography", "Hiring", "Remote", "Metrics", "Privacy", "Linux",
    "Networking", "Compilers", "Mentoring", "Writing", "Release",
];

const TAG_COLORS: [&str; 6] = [
    "#6B7280", "#9CA3AF", "#374151", "#1F2937", "#111827", "#4B5563",
];

const OPENERS: [&str; 8] = [
    "Getting Started with",
    "A Field Guide to",
    "Lessons Learned from",
    "Rethinking",
    "The Hidden Cost of",
    "Notes on",
    "Scaling",
    "Debugging",
];

const SUBJECTS: [&str; 5] = [
    "Async Services",
    "Database Indexes",
    "Static Sites",
    "Remote Teams",
    "Release Pipelines",
];

const SENTENCES: [&str; 6] = [
    "Small, boring changes compound faster than heroic rewrites.",
    "Measure first, then decide which part of the system actually hurts.",
    "Every abstraction leaks eventually, so pick the ones that leak politely.",
    "The best documentation is the test that fails when the behaviour changes.",
    "Shipping weekly forces the hard conversations to happen early.",
    "A clear error message saves more time than a clever optimisation.",
];

const PUBLISHED_POSTS: usize = 30;
const DRAFT_POSTS: usize = 10;

/// What a seeding run created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub authors: usize,
    pub categories: usize,
    pub tags: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
}

/// Populate an empty, migrated database.
///
/// Returns `None` without touching anything when authors already exist.
pub async fn seed(db: &DbConn) -> Result<Option<SeedSummary>, RepoError> {
    let existing = user::Entity::find()
        .count(db)
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;
    if existing > 0 {
        tracing::info!(existing, "Database already has authors, skipping seed");
        return Ok(None);
    }

    let author_repo = SqlAuthorRepository::new(db.clone());
    let category_repo = SqlCategoryRepository::new(db.clone());
    let tag_repo = SqlTagRepository::new(db.clone());
    let post_repo = SqlPostRepository::new(db.clone());

    let mut authors = Vec::with_capacity(AUTHORS.len());
    for name in AUTHORS {
        let email = format!("{}@quire.test", name.to_lowercase().replace(' ', "."));
        let author =
            BaseRepository::<Author, Uuid>::create(&author_repo, Author::new(name.into(), email))
                .await?;
        authors.push(author);
    }

    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for (i, (name, color)) in CATEGORIES.into_iter().enumerate() {
        let category = Category::new(name)
            .with_description(sentence(i))
            .with_color(color);
        categories.push(BaseRepository::<Category, Uuid>::create(&category_repo, category).await?);
    }

    let mut tags = Vec::with_capacity(TAGS.len());
    for (i, name) in TAGS.into_iter().enumerate() {
        let tag = Tag::new(name).with_color(TAG_COLORS[i % TAG_COLORS.len()]);
        tags.push(BaseRepository::<Tag, Uuid>::create(&tag_repo, tag).await?);
    }

    let now = Utc::now();
    for i in 0..PUBLISHED_POSTS + DRAFT_POSTS {
        let author = &authors[i % authors.len()];
        let mut post = Post::new(author.id, title(i), content(i)).with_excerpt(sentence(i + 1));

        // Roughly one post in ten has no category
        if i % 10 != 9 {
            post = post.with_category(categories[i % categories.len()].id);
        }
        if i % 5 < 3 {
            post = post.with_featured_image(format!(
                "https://picsum.photos/800/400?random={}",
                i + 1
            ));
        }
        if i < PUBLISHED_POSTS {
            let views = (i as i64 * 7_919) % 4_990 + 10;
            let likes = (i as i64 * 131) % 500;
            post = post.with_counts(views, likes).publish(published_at(now, i));
        }

        let post = BaseRepository::<Post, Uuid>::create(&post_repo, post).await?;

        // 1 to 5 distinct tags; a stride of 3 never repeats within 20 tags
        let tag_count = 1 + (i * 3) % 5;
        for k in 0..tag_count {
            let tag = &tags[(i * 7 + k * 3) % tags.len()];
            post_repo.attach_tag(post.id, tag.id).await?;
        }
    }

    let summary = SeedSummary {
        authors: authors.len(),
        categories: categories.len(),
        tags: tags.len(),
        published_posts: PUBLISHED_POSTS,
        draft_posts: DRAFT_POSTS,
    };
    tracing::info!(?summary, "Blog data seeded");

    Ok(Some(summary))
}

fn title(i: usize) -> String {
    format!(
        "{} {}",
        OPENERS[i % OPENERS.len()],
        SUBJECTS[(i / OPENERS.len()) % SUBJECTS.len()]
    )
}

fn sentence(i: usize) -> String {
    SENTENCES[i % SENTENCES.len()].to_string()
}

fn content(i: usize) -> String {
    let paragraphs = 5 + i % 8;
    (0..paragraphs)
        .map(|p| {
            (0..4)
                .map(|s| SENTENCES[(i + p + s) % SENTENCES.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Spread over the last year, distinct per post.
fn published_at(now: DateTime<Utc>, i: usize) -> DateTime<Utc> {
    now - Duration::days((i as i64 * 11) % 365) - Duration::hours(i as i64)
}
