//! Maps assembled view models onto the wire DTOs.

use chrono::{DateTime, Utc};

use quire_core::domain::{Author, Category, CategoryFacet, Tag, TagFacet};
use quire_core::listing::PageLink;
use quire_core::service::{ListingPage, PostCard, PostDetail, RelatedPost};
use quire_shared::dto::{
    AuthorResponse, CategoryFacetResponse, CategoryResponse, FiltersResponse, PageLinkResponse,
    PaginatedResponse, PostDetailResponse, PostListingResponse, PostShowResponse,
    PostSummaryResponse, RelatedPostResponse, TagFacetResponse, TagResponse,
};

pub fn listing(page: ListingPage) -> PostListingResponse {
    let posts = page.posts.map(summary);

    PostListingResponse {
        posts: PaginatedResponse {
            data: posts.data,
            current_page: posts.current_page,
            last_page: posts.last_page,
            per_page: posts.per_page,
            total: posts.total,
            from: posts.from,
            to: posts.to,
            links: posts.links.into_iter().map(page_link).collect(),
        },
        categories: page.categories.into_iter().map(category_facet).collect(),
        tags: page.tags.into_iter().map(tag_facet).collect(),
        filters: FiltersResponse {
            category: page.filters.category,
            tag: page.filters.tag,
            search: page.filters.search,
            sort: page.sort.as_str().to_string(),
        },
    }
}

pub fn detail(detail: PostDetail) -> PostShowResponse {
    let post = &detail.post.post;
    let content = post.content.clone();
    let status = post.status.to_string();
    let reading_time_minutes = post.reading_time_minutes();
    let created_at = post.created_at.to_rfc3339();
    let updated_at = post.updated_at.to_rfc3339();

    PostShowResponse {
        post: PostDetailResponse {
            summary: summary(detail.post),
            content,
            status,
            reading_time_minutes,
            created_at,
            updated_at,
        },
        related_posts: detail.related_posts.into_iter().map(related).collect(),
    }
}

fn summary(card: PostCard) -> PostSummaryResponse {
    let PostCard {
        post,
        author,
        category,
        tags,
    } = card;

    PostSummaryResponse {
        id: post.id.to_string(),
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        views_count: post.views_count,
        likes_count: post.likes_count,
        published_at: timestamp(post.published_at),
        author: author_ref(author),
        category: category.map(category_ref),
        tags: tags.into_iter().map(tag_ref).collect(),
    }
}

fn related(related: RelatedPost) -> RelatedPostResponse {
    let RelatedPost {
        post,
        author,
        category,
    } = related;

    RelatedPostResponse {
        id: post.id.to_string(),
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        views_count: post.views_count,
        published_at: timestamp(post.published_at),
        author: author_ref(author),
        category: category.map(category_ref),
    }
}

fn timestamp(at: Option<DateTime<Utc>>) -> Option<String> {
    at.map(|at| at.to_rfc3339())
}

fn author_ref(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id.to_string(),
        name: author.name,
    }
}

fn category_ref(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id.to_string(),
        name: category.name,
        slug: category.slug,
        description: category.description,
        color: category.color,
    }
}

fn tag_ref(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id.to_string(),
        name: tag.name,
        slug: tag.slug,
        color: tag.color,
    }
}

fn category_facet(facet: CategoryFacet) -> CategoryFacetResponse {
    CategoryFacetResponse {
        category: category_ref(facet.category),
        published_posts_count: facet.published_posts_count,
    }
}

fn tag_facet(facet: TagFacet) -> TagFacetResponse {
    TagFacetResponse {
        tag: tag_ref(facet.tag),
        published_posts_count: facet.published_posts_count,
    }
}

fn page_link(link: PageLink) -> PageLinkResponse {
    PageLinkResponse {
        url: link.url,
        label: link.label,
        active: link.active,
    }
}
