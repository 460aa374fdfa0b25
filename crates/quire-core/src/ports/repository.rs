use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Category, CategoryFacet, Post, Tag, TagFacet};
use crate::error::RepoError;
use crate::listing::{ListingQuery, PageSlice};

/// Generic repository trait shared by every entity store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;
}

/// Post store - the listing query and the detail-page reads.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of published posts matching the query, plus the total match count.
    async fn list_published(&self, query: &ListingQuery) -> Result<PageSlice<Post>, RepoError>;

    /// Resolve a published post by its slug.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Add one to the stored view count in a single storage-side operation.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// Other published posts, sharing the post's category when it has one,
    /// most recently published first.
    async fn find_related(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Attach a tag to a post. Attaching twice is a no-op.
    async fn attach_tag(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;

    /// Categories with at least one published post, ordered by name.
    async fn published_facets(&self) -> Result<Vec<CategoryFacet>, RepoError>;
}

#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// Tags attached to any of the given posts, as `(post_id, tag)` pairs.
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>, RepoError>;

    /// Tags with at least one published post, ordered by name.
    async fn published_facets(&self) -> Result<Vec<TagFacet>, RepoError>;
}

#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError>;
}
