use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PageRequest, Post, PostFilter, PostPage, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting an absent ID is not an error.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest first, cut to the requested page.
    async fn find_page(&self, filter: &PostFilter, page: PageRequest)
    -> Result<PostPage, RepoError>;

    /// Apply a partial update. `None` when no post has this id.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError>;
}
