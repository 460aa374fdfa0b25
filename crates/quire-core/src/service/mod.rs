//! Blog service - turns matched posts into listing and detail view models.
//!
//! Relations are loaded with one batch query per relation for the whole
//! page, never one query per post.

mod view;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Author, Category, Post, Tag};
use crate::error::DomainError;
use crate::listing::{ListingParams, ListingQuery, PageSlice, Paginated};
use crate::ports::{AuthorRepository, CategoryRepository, PostRepository, TagRepository};

pub use view::{ListingPage, PostCard, PostDetail, RelatedPost};

/// Maximum number of related posts on a detail page.
pub const RELATED_POSTS_LIMIT: u64 = 3;

/// Read side of the blog: the paginated listing and the post detail page.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
        authors: Arc<dyn AuthorRepository>,
    ) -> Self {
        Self {
            posts,
            categories,
            tags,
            authors,
        }
    }

    /// Build the listing page for raw request parameters.
    ///
    /// `path` is the route the pagination links point back to.
    pub async fn listing(
        &self,
        params: &ListingParams,
        path: &str,
    ) -> Result<ListingPage, DomainError> {
        let query = ListingQuery::from_params(params);

        let PageSlice { items, total } = self.posts.list_published(&query).await?;
        let post_ids: Vec<Uuid> = items.iter().map(|p| p.id).collect();
        let mut relations = self.load_relations(&items, &post_ids).await?;

        let cards = items
            .into_iter()
            .map(|post| relations.card(post))
            .collect::<Result<Vec<_>, _>>()?;

        let categories = self.categories.published_facets().await?;
        let tags = self.tags.published_facets().await?;

        Ok(ListingPage {
            posts: Paginated::new(cards, total, &query, path),
            categories,
            tags,
            filters: query.filters,
            sort: query.sort,
        })
    }

    /// Resolve a published post by slug and record the view.
    ///
    /// Every successful call adds exactly one view; a miss mutates nothing.
    pub async fn show(&self, slug: &str) -> Result<PostDetail, DomainError> {
        let mut post = self
            .posts
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))?;

        self.posts.increment_views(post.id).await?;
        post.views_count += 1;

        let related = self.posts.find_related(&post, RELATED_POSTS_LIMIT).await?;

        let mut loaded = Vec::with_capacity(related.len() + 1);
        loaded.push(post.clone());
        loaded.extend(related.iter().cloned());
        let mut relations = self.load_relations(&loaded, &[post.id]).await?;

        let post = relations.card(post)?;
        let related_posts = related
            .into_iter()
            .map(|post| relations.related(post))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PostDetail {
            post,
            related_posts,
        })
    }

    /// Load authors and categories for `posts`, and tags for `tagged` post ids.
    async fn load_relations(
        &self,
        posts: &[Post],
        tagged: &[Uuid],
    ) -> Result<Relations, DomainError> {
        let author_ids: Vec<Uuid> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let category_ids: Vec<Uuid> = posts
            .iter()
            .filter_map(|p| p.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut relations = Relations::default();

        if !author_ids.is_empty() {
            for author in self.authors.find_by_ids(&author_ids).await? {
                relations.authors.insert(author.id, author);
            }
        }
        if !category_ids.is_empty() {
            for category in self.categories.find_by_ids(&category_ids).await? {
                relations.categories.insert(category.id, category);
            }
        }
        if !tagged.is_empty() {
            for (post_id, tag) in self.tags.find_for_posts(tagged).await? {
                relations.tags.entry(post_id).or_default().push(tag);
            }
        }

        Ok(relations)
    }
}

#[derive(Default)]
struct Relations {
    authors: HashMap<Uuid, Author>,
    categories: HashMap<Uuid, Category>,
    tags: HashMap<Uuid, Vec<Tag>>,
}

impl Relations {
    fn card(&mut self, post: Post) -> Result<PostCard, DomainError> {
        let author = self.author(&post)?;
        let category = self.category(&post);
        let tags = self.tags.remove(&post.id).unwrap_or_default();

        Ok(PostCard {
            post,
            author,
            category,
            tags,
        })
    }

    fn related(&self, post: Post) -> Result<RelatedPost, DomainError> {
        let author = self.author(&post)?;
        let category = self.category(&post);

        Ok(RelatedPost {
            post,
            author,
            category,
        })
    }

    fn author(&self, post: &Post) -> Result<Author, DomainError> {
        self.authors.get(&post.author_id).cloned().ok_or_else(|| {
            DomainError::Internal(format!(
                "post {} references missing author {}",
                post.id, post.author_id
            ))
        })
    }

    fn category(&self, post: &Post) -> Option<Category> {
        post.category_id
            .and_then(|id| self.categories.get(&id))
            .cloned()
    }
}
