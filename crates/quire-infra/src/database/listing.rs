//! Listing query composer.
//!
//! Builds the SeaORM selects behind the public listing and the related-post
//! suggestions. Every read goes through [`published`], so the definition of
//! "publicly visible" lives in exactly one place.

use sea_orm::sea_query::{Expr, LikeExpr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QueryTrait, Select};

use quire_core::domain::Post;
use quire_core::listing::{ListingQuery, SortOrder};

use super::entity::{category, post, post_tag, tag};

const LIKE_ESCAPE: char = '\\';

/// Posts that may appear on public pages.
pub fn published() -> Condition {
    Condition::all()
        .add(post::Column::Status.eq(post::Status::Published))
        .add(post::Column::PublishedAt.is_not_null())
}

/// Published posts matching every active filter, in the requested order.
///
/// Filters are ANDed with each other and with [`published`]. Ties in the
/// primary sort key are broken by id so pages are stable between requests.
pub fn listing_select(query: &ListingQuery) -> Select<post::Entity> {
    let filters = &query.filters;

    let select = post::Entity::find()
        .filter(published())
        .apply_if(filters.category.as_deref(), |q, slug| {
            q.filter(in_category(slug))
        })
        .apply_if(filters.tag.as_deref(), |q, slug| q.filter(has_tag(slug)))
        .apply_if(filters.search.as_deref(), |q, term| {
            q.filter(matches_search(term))
        });

    match query.sort {
        SortOrder::Newest => select
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::Id),
        SortOrder::Oldest => select
            .order_by_asc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id),
        SortOrder::Popular => select
            .order_by_desc(post::Column::ViewsCount)
            .order_by_asc(post::Column::Id),
    }
}

/// Other published posts for a detail page, newest first.
///
/// Restricted to the post's category when it has one.
pub fn related_select(current: &Post) -> Select<post::Entity> {
    post::Entity::find()
        .filter(published())
        .filter(post::Column::Id.ne(current.id))
        .apply_if(current.category_id, |q, category_id| {
            q.filter(post::Column::CategoryId.eq(category_id))
        })
        .order_by_desc(post::Column::PublishedAt)
        .order_by_desc(post::Column::Id)
}

/// Category slug matches exactly.
fn in_category(slug: &str) -> SimpleExpr {
    post::Column::CategoryId.in_subquery(
        Query::select()
            .column((category::Entity, category::Column::Id))
            .from(category::Entity)
            .and_where(category::Column::Slug.eq(slug))
            .to_owned(),
    )
}

/// At least one attached tag has the slug.
fn has_tag(slug: &str) -> SimpleExpr {
    post::Column::Id.in_subquery(
        Query::select()
            .column((post_tag::Entity, post_tag::Column::PostId))
            .from(post_tag::Entity)
            .inner_join(
                tag::Entity,
                Expr::col((tag::Entity, tag::Column::Id))
                    .equals((post_tag::Entity, post_tag::Column::TagId)),
            )
            .and_where(tag::Column::Slug.eq(slug))
            .to_owned(),
    )
}

/// Case-insensitive substring of title, excerpt or content.
fn matches_search(term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::col((post::Entity, post::Column::SearchText))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Make `%`, `_` and the escape character match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}
