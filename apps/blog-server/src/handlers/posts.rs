//! Post listing and detail endpoints.

use actix_web::{HttpRequest, HttpResponse, web};
use quire_core::listing::ListingParams;

use crate::middleware::error::AppResult;
use crate::presenter;
use crate::state::AppState;

/// Paginated listing of published posts.
///
/// GET / and GET /api/posts
/// Query: category, tag, search, sort (newest|oldest|popular), page
pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<ListingParams>,
) -> AppResult<HttpResponse> {
    let page = state.blog.listing(&params, req.path()).await?;

    Ok(HttpResponse::Ok().json(presenter::listing(page)))
}

/// A published post with its related posts. Counts one view.
///
/// GET /posts/{slug} and GET /api/posts/{slug}
pub async fn show(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    tracing::debug!(%slug, "Showing post");

    let detail = state.blog.show(&slug).await?;

    Ok(HttpResponse::Ok().json(presenter::detail(detail)))
}
