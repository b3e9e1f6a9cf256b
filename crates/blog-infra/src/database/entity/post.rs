//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blog_core::domain::{Author, PostPatch};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub author_username: String,
    pub published_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for blog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            tags: model.tags,
            author: Author {
                id: model.author_id,
                username: model.author_username,
            },
            published_date: model.published_date.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<blog_core::domain::Post> for ActiveModel {
    fn from(post: blog_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            body: Set(post.body),
            tags: Set(post.tags),
            author_id: Set(post.author.id),
            author_username: Set(post.author.username),
            published_date: Set(post.published_date.into()),
        }
    }
}

/// Only the fields present in the patch are written.
impl From<PostPatch> for ActiveModel {
    fn from(patch: PostPatch) -> Self {
        Self {
            title: patch.title.map_or(NotSet, Set),
            body: patch.body.map_or(NotSet, Set),
            tags: patch.tags.map_or(NotSet, Set),
            ..Default::default()
        }
    }
}
