//! SeaORM repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use uuid::Uuid;

use quire_core::domain::{Author, Category, CategoryFacet, Post, Tag, TagFacet};
use quire_core::error::RepoError;
use quire_core::listing::{ListingQuery, PageSlice, last_page};
use quire_core::ports::{AuthorRepository, CategoryRepository, PostRepository, TagRepository};

use super::base::{SqlRepository, repo_error};
use super::entity::{category, post, post_tag, tag, user};
use super::listing::{listing_select, published, related_select};

/// Post repository.
pub type SqlPostRepository = SqlRepository<post::Entity>;

/// Category repository.
pub type SqlCategoryRepository = SqlRepository<category::Entity>;

/// Tag repository.
pub type SqlTagRepository = SqlRepository<tag::Entity>;

/// Author repository, backed by the `users` table.
pub type SqlAuthorRepository = SqlRepository<user::Entity>;

const PUBLISHED_POSTS_COUNT: &str = "published_posts_count";

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list_published(&self, query: &ListingQuery) -> Result<PageSlice<Post>, RepoError> {
        let paginator = listing_select(query).paginate(&self.db, query.per_page());

        let total = paginator.num_items().await.map_err(repo_error)?;
        if query.page > last_page(total, query.per_page()) {
            tracing::debug!(page = query.page, total, "Requested page is past the end");
            return Ok(PageSlice {
                items: Vec::new(),
                total,
            });
        }

        let models = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(repo_error)?;

        tracing::debug!(
            page = query.page,
            sort = query.sort.as_str(),
            total,
            returned = models.len(),
            "Listed published posts"
        );

        Ok(PageSlice {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(%slug, "Finding published post by slug");

        let result = post::Entity::find()
            .filter(published())
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let result = post::Entity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(repo_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn find_related(&self, current: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = related_select(current)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn attach_tag(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let link = post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        };

        post_tag::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for SqlCategoryRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn published_facets(&self) -> Result<Vec<CategoryFacet>, RepoError> {
        let counts: HashMap<Uuid, i64> = post::Entity::find()
            .select_only()
            .column(post::Column::CategoryId)
            .column_as(
                Expr::col((post::Entity, post::Column::Id)).count(),
                PUBLISHED_POSTS_COUNT,
            )
            .filter(published())
            .filter(post::Column::CategoryId.is_not_null())
            .group_by(post::Column::CategoryId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .map_err(repo_error)?
            .into_iter()
            .collect();

        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let categories = category::Entity::find()
            .filter(category::Column::Id.is_in(counts.keys().copied()))
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(categories
            .into_iter()
            .map(|model| {
                let count = counts.get(&model.id).copied().unwrap_or_default();
                CategoryFacet {
                    category: model.into(),
                    published_posts_count: count as u64,
                }
            })
            .collect())
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>, RepoError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = post_tag::Entity::find()
            .find_also_related(tag::Entity)
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .order_by_asc(tag::Column::Name)
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, tag)| tag.map(|tag| (link.post_id, tag.into())))
            .collect())
    }

    async fn published_facets(&self) -> Result<Vec<TagFacet>, RepoError> {
        let counts: HashMap<Uuid, i64> = post_tag::Entity::find()
            .select_only()
            .column(post_tag::Column::TagId)
            .column_as(
                Expr::col((post_tag::Entity, post_tag::Column::PostId)).count(),
                PUBLISHED_POSTS_COUNT,
            )
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(published())
            .group_by(post_tag::Column::TagId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .map_err(repo_error)?
            .into_iter()
            .collect();

        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let tags = tag::Entity::find()
            .filter(tag::Column::Id.is_in(counts.keys().copied()))
            .order_by_asc(tag::Column::Name)
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(tags
            .into_iter()
            .map(|model| {
                let count = counts.get(&model.id).copied().unwrap_or_default();
                TagFacet {
                    tag: model.into(),
                    published_posts_count: count as u64,
                }
            })
            .collect())
    }
}

#[async_trait]
impl AuthorRepository for SqlAuthorRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
