//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use blog_core::domain::{PageRequest, Post, PostFilter, PostPage, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn filter_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(username) = &filter.username {
        condition = condition.add(post::Column::AuthorUsername.eq(username.as_str()));
    }
    if let Some(tag) = &filter.tag {
        condition = condition.add(Expr::cust_with_values(
            r#"? = ANY("posts"."tags")"#,
            [tag.clone()],
        ));
    }

    condition
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<PostPage, RepoError> {
        tracing::debug!(?filter, page = page.page, "Listing posts");

        let query = PostEntity::find().filter(filter_condition(filter));
        let total = query.clone().count(&self.db).await.map_err(repo_error)?;

        // Past the end. Also keeps the bound offset below i64::MAX.
        if page.offset() >= total {
            return Ok(PostPage {
                items: Vec::new(),
                total,
            });
        }

        let models = query
            .order_by_desc(post::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(PostPage {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        // An UPDATE with no SET clause is not valid SQL.
        if patch.is_empty() {
            return BaseRepository::<Post, Uuid>::find_by_id(self, id).await;
        }

        let updated = PostEntity::update_many()
            .set(post::ActiveModel::from(patch))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(updated.into_iter().next().map(Into::into))
    }
}
