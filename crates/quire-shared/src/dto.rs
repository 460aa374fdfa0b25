//! Data Transfer Objects - the listing and detail payloads.
//!
//! Ids are rendered as strings and timestamps as RFC 3339 strings.

use serde::{Deserialize, Serialize};

/// Author as shown next to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// A category in the listing sidebar with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFacetResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub published_posts_count: u64,
}

/// A tag in the listing sidebar with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagFacetResponse {
    #[serde(flatten)]
    pub tag: TagResponse,
    pub published_posts_count: u64,
}

/// A post card on the listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub views_count: i64,
    pub likes_count: i64,
    pub published_at: Option<String>,
    pub author: AuthorResponse,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
}

/// The full post on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub summary: PostSummaryResponse,
    pub content: String,
    pub status: String,
    pub reading_time_minutes: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// A suggestion under a post. Carries no tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub views_count: i64,
    pub published_at: Option<String>,
    pub author: AuthorResponse,
    pub category: Option<CategoryResponse>,
}

/// A pagination control. A null url is a disabled control or an ellipsis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinkResponse {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub links: Vec<PageLinkResponse>,
}

/// The normalized filter state echoed back to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub sort: String,
}

/// Payload of the listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListingResponse {
    pub posts: PaginatedResponse<PostSummaryResponse>,
    pub categories: Vec<CategoryFacetResponse>,
    pub tags: Vec<TagFacetResponse>,
    pub filters: FiltersResponse,
}

/// Payload of the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostShowResponse {
    pub post: PostDetailResponse,
    pub related_posts: Vec<RelatedPostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> TagResponse {
        TagResponse {
            id: "t1".into(),
            name: "Rust".into(),
            slug: "rust".into(),
            color: "#6B7280".into(),
        }
    }

    #[test]
    fn test_facet_is_flat() {
        let facet = TagFacetResponse {
            tag: tag(),
            published_posts_count: 4,
        };

        let json = serde_json::to_value(&facet).unwrap();

        assert_eq!(json["slug"], "rust");
        assert_eq!(json["published_posts_count"], 4);
        assert!(json.get("tag").is_none());
    }

    #[test]
    fn test_detail_flattens_summary() {
        let detail = PostDetailResponse {
            summary: PostSummaryResponse {
                id: "p1".into(),
                title: "Hello".into(),
                slug: "hello".into(),
                excerpt: None,
                featured_image: None,
                views_count: 3,
                likes_count: 0,
                published_at: Some("2024-01-01T00:00:00+00:00".into()),
                author: AuthorResponse {
                    id: "a1".into(),
                    name: "Ada".into(),
                },
                category: None,
                tags: vec![tag()],
            },
            content: "Body".into(),
            status: "published".into(),
            reading_time_minutes: 1,
            created_at: "2024-01-01T00:00:00+00:00".into(),
            updated_at: "2024-01-01T00:00:00+00:00".into(),
        };

        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["title"], "Hello");
        assert_eq!(json["content"], "Body");
        assert_eq!(json["author"]["name"], "Ada");
        assert!(json["category"].is_null());
        assert_eq!(json["tags"][0]["slug"], "rust");
    }
}
