//! Assembled view models handed to the presentation layer.

use crate::domain::{Author, Category, CategoryFacet, Post, Tag, TagFacet};
use crate::listing::{ListingFilters, Paginated, SortOrder};

/// A post with everything a listing card or detail page shows.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub post: Post,
    pub author: Author,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// A related-post suggestion. Tags are not loaded for these.
#[derive(Debug, Clone)]
pub struct RelatedPost {
    pub post: Post,
    pub author: Author,
    pub category: Option<Category>,
}

/// Everything the listing page renders.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub posts: Paginated<PostCard>,
    pub categories: Vec<CategoryFacet>,
    pub tags: Vec<TagFacet>,
    /// Normalized filter state, echoed so pagination and filter controls can keep it.
    pub filters: ListingFilters,
    pub sort: SortOrder,
}

/// Everything the detail page renders.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostCard,
    pub related_posts: Vec<RelatedPost>,
}
