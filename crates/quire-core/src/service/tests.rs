use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::{CategoryFacet, PostStatus, TagFacet};
use crate::error::RepoError;
use crate::listing::{PER_PAGE, SortOrder};
use crate::ports::BaseRepository;

/// In-memory store implementing every port, counting calls per method.
#[derive(Default)]
struct FakeStore {
    posts: Mutex<Vec<Post>>,
    categories: Mutex<Vec<Category>>,
    tags: Mutex<Vec<Tag>>,
    post_tags: Mutex<Vec<(Uuid, Uuid)>>,
    authors: Mutex<Vec<Author>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl FakeStore {
    fn record(&self, call: &'static str) {
        *self.calls.lock().unwrap().entry(call).or_default() += 1;
    }

    fn calls(&self, call: &'static str) -> usize {
        self.calls.lock().unwrap().get(call).copied().unwrap_or(0)
    }

    fn views(&self, id: Uuid) -> i64 {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.views_count)
            .unwrap()
    }

    fn matches(&self, post: &Post, query: &ListingQuery) -> bool {
        if !post.is_published() {
            return false;
        }
        if let Some(slug) = &query.filters.category {
            let categories = self.categories.lock().unwrap();
            let hit = categories
                .iter()
                .any(|c| Some(c.id) == post.category_id && &c.slug == slug);
            if !hit {
                return false;
            }
        }
        if let Some(slug) = &query.filters.tag {
            let tags = self.tags.lock().unwrap();
            let post_tags = self.post_tags.lock().unwrap();
            let hit = post_tags.iter().any(|(post_id, tag_id)| {
                *post_id == post.id && tags.iter().any(|t| t.id == *tag_id && &t.slug == slug)
            });
            if !hit {
                return false;
            }
        }
        if let Some(term) = &query.filters.search {
            let term = term.to_lowercase();
            let hit = post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term)
                || post
                    .excerpt
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for FakeStore {
    async fn list_published(&self, query: &ListingQuery) -> Result<PageSlice<Post>, RepoError> {
        self.record("list_published");
        let mut matched: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| self.matches(p, query))
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Newest => matched.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            SortOrder::Oldest => matched.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
            SortOrder::Popular => matched.sort_by(|a, b| b.views_count.cmp(&a.views_count)),
        }

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(PER_PAGE as usize)
            .collect();
        Ok(PageSlice { items, total })
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug && p.is_published())
            .cloned())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        self.record("increment_views");
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id).ok_or(RepoError::NotFound)?;
        post.views_count += 1;
        Ok(())
    }

    async fn find_related(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut related: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_published() && p.id != post.id)
            .filter(|p| post.category_id.is_none() || p.category_id == post.category_id)
            .cloned()
            .collect();
        related.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        related.truncate(limit as usize);
        Ok(related)
    }

    async fn attach_tag(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let mut post_tags = self.post_tags.lock().unwrap();
        if !post_tags.contains(&(post_id, tag_id)) {
            post_tags.push((post_id, tag_id));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, entity: Category) -> Result<Category, RepoError> {
        self.categories.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl CategoryRepository for FakeStore {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        self.record("categories_by_ids");
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn published_facets(&self) -> Result<Vec<CategoryFacet>, RepoError> {
        let posts = self.posts.lock().unwrap();
        let mut facets: Vec<CategoryFacet> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .map(|c| CategoryFacet {
                category: c.clone(),
                published_posts_count: posts
                    .iter()
                    .filter(|p| p.is_published() && p.category_id == Some(c.id))
                    .count() as u64,
            })
            .filter(|f| f.published_posts_count > 0)
            .collect();
        facets.sort_by(|a, b| a.category.name.cmp(&b.category.name));
        Ok(facets)
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        Ok(self.tags.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, entity: Tag) -> Result<Tag, RepoError> {
        self.tags.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl TagRepository for FakeStore {
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>, RepoError> {
        self.record("tags_for_posts");
        let tags = self.tags.lock().unwrap();
        Ok(self
            .post_tags
            .lock()
            .unwrap()
            .iter()
            .filter(|(post_id, _)| post_ids.contains(post_id))
            .filter_map(|(post_id, tag_id)| {
                tags.iter()
                    .find(|t| t.id == *tag_id)
                    .map(|t| (*post_id, t.clone()))
            })
            .collect())
    }

    async fn published_facets(&self) -> Result<Vec<TagFacet>, RepoError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        Ok(self.authors.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, entity: Author) -> Result<Author, RepoError> {
        self.authors.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl AuthorRepository for FakeStore {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        self.record("authors_by_ids");
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }
}

fn service(store: &Arc<FakeStore>) -> BlogService {
    BlogService::new(store.clone(), store.clone(), store.clone(), store.clone())
}

fn day(n: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
}

struct Seeded {
    store: Arc<FakeStore>,
    author: Author,
    news: Category,
}

async fn seeded() -> Seeded {
    let store = Arc::new(FakeStore::default());
    let author = BaseRepository::<Author, Uuid>::create(
        store.as_ref(),
        Author::new("Ada".into(), "ada@example.com".into()),
    )
    .await
    .unwrap();
    let news = BaseRepository::<Category, Uuid>::create(store.as_ref(), Category::new("News"))
        .await
        .unwrap();
    Seeded {
        store,
        author,
        news,
    }
}

async fn add_post(store: &FakeStore, post: Post) -> Post {
    BaseRepository::<Post, Uuid>::create(store, post).await.unwrap()
}

#[tokio::test]
async fn test_listing_attaches_relations_in_batches() {
    let Seeded {
        store,
        author,
        news,
    } = seeded().await;
    let rust = BaseRepository::<Tag, Uuid>::create(store.as_ref(), Tag::new("Rust"))
        .await
        .unwrap();

    for n in 0..5 {
        let post = add_post(
            &store,
            Post::new(author.id, format!("Post {n}"), "body")
                .with_category(news.id)
                .publish(day(n)),
        )
        .await;
        store.attach_tag(post.id, rust.id).await.unwrap();
    }

    let page = service(&store)
        .listing(&ListingParams::default(), "/")
        .await
        .unwrap();

    assert_eq!(page.posts.data.len(), 5);
    for card in &page.posts.data {
        assert_eq!(card.author.name, "Ada");
        assert_eq!(card.category.as_ref().map(|c| c.slug.as_str()), Some("news"));
        assert_eq!(card.tags.len(), 1);
        assert_eq!(card.tags[0].slug, "rust");
    }

    assert_eq!(store.calls("authors_by_ids"), 1);
    assert_eq!(store.calls("categories_by_ids"), 1);
    assert_eq!(store.calls("tags_for_posts"), 1);
}

#[tokio::test]
async fn test_listing_echoes_normalized_filters() {
    let Seeded { store, .. } = seeded().await;

    let params = ListingParams {
        category: Some(" news ".into()),
        search: Some("".into()),
        sort: Some("sideways".into()),
        page: Some("2".into()),
        ..Default::default()
    };
    let page = service(&store).listing(&params, "/").await.unwrap();

    assert_eq!(page.filters.category.as_deref(), Some("news"));
    assert_eq!(page.filters.search, None);
    assert_eq!(page.sort, SortOrder::Newest);
    assert_eq!(page.posts.current_page, 2);
    assert!(page.posts.data.is_empty());
}

#[tokio::test]
async fn test_listing_with_no_matches_skips_relation_queries() {
    let Seeded { store, .. } = seeded().await;

    let page = service(&store)
        .listing(&ListingParams::default(), "/")
        .await
        .unwrap();

    assert_eq!(page.posts.total, 0);
    assert_eq!(page.posts.last_page, 1);
    assert_eq!(store.calls("authors_by_ids"), 0);
    assert_eq!(store.calls("tags_for_posts"), 0);
}

#[tokio::test]
async fn test_listing_facets_count_published_only() {
    let Seeded {
        store,
        author,
        news,
    } = seeded().await;

    add_post(
        &store,
        Post::new(author.id, "Live", "body")
            .with_category(news.id)
            .publish(day(1)),
    )
    .await;
    add_post(
        &store,
        Post::new(author.id, "Draft", "body").with_category(news.id),
    )
    .await;

    let page = service(&store)
        .listing(&ListingParams::default(), "/")
        .await
        .unwrap();

    assert_eq!(page.categories.len(), 1);
    assert_eq!(page.categories[0].published_posts_count, 1);
}

#[tokio::test]
async fn test_show_increments_views_and_reflects_it() {
    let Seeded {
        store,
        author,
        news,
    } = seeded().await;
    let post = add_post(
        &store,
        Post::new(author.id, "Hello World", "body")
            .with_category(news.id)
            .with_counts(10, 2)
            .publish(day(1)),
    )
    .await;

    let detail = service(&store).show("hello-world").await.unwrap();

    assert_eq!(detail.post.post.views_count, 11);
    assert_eq!(store.views(post.id), 11);
    assert_eq!(detail.post.author.name, "Ada");
    assert_eq!(detail.post.category.unwrap().name, "News");
}

#[tokio::test]
async fn test_show_missing_slug_is_not_found_without_mutation() {
    let Seeded { store, author, .. } = seeded().await;
    let post = add_post(&store, Post::new(author.id, "Hello", "body").publish(day(1))).await;

    let err = service(&store).show("does-not-exist").await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
    assert_eq!(store.calls("increment_views"), 0);
    assert_eq!(store.views(post.id), 0);
}

#[tokio::test]
async fn test_show_draft_is_not_found() {
    let Seeded { store, author, .. } = seeded().await;
    add_post(
        &store,
        Post::new(author.id, "Secret", "body").with_status(PostStatus::Draft),
    )
    .await;

    let err = service(&store).show("secret").await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(store.calls("increment_views"), 0);
}

#[tokio::test]
async fn test_show_related_posts_share_category_newest_first() {
    let Seeded {
        store,
        author,
        news,
    } = seeded().await;
    let other = BaseRepository::<Category, Uuid>::create(store.as_ref(), Category::new("Other"))
        .await
        .unwrap();

    for n in 0..4 {
        add_post(
            &store,
            Post::new(author.id, format!("News {n}"), "body")
                .with_category(news.id)
                .publish(day(n)),
        )
        .await;
    }
    add_post(
        &store,
        Post::new(author.id, "Elsewhere", "body")
            .with_category(other.id)
            .publish(day(10)),
    )
    .await;

    let detail = service(&store).show("news-0").await.unwrap();
    let titles: Vec<&str> = detail
        .related_posts
        .iter()
        .map(|r| r.post.title.as_str())
        .collect();

    assert_eq!(titles, vec!["News 3", "News 2", "News 1"]);
    assert!(detail.related_posts.iter().all(|r| r.author.name == "Ada"));
}

#[tokio::test]
async fn test_show_missing_author_is_internal_error() {
    let Seeded { store, .. } = seeded().await;
    add_post(
        &store,
        Post::new(Uuid::new_v4(), "Orphan", "body").publish(day(1)),
    )
    .await;

    let err = service(&store).show("orphan").await.unwrap_err();

    assert!(matches!(err, DomainError::Internal(_)));
}
