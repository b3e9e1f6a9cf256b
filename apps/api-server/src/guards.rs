//! Per-request guards for post routes.
//!
//! Handlers thread a [`PostContext`] through the guards in route order. Each
//! guard either records what it learned on the context or short-circuits the
//! request with an error.

use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Post, parse_post_id};
use blog_core::ports::{BaseRepository, PostRepository};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// State attached to a single request as it passes the guards.
#[derive(Debug, Default)]
pub struct PostContext {
    pub post_id: Option<Uuid>,
    pub post: Option<Post>,
    pub identity: Option<Identity>,
}

impl PostContext {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            ..Default::default()
        }
    }

    /// Id recorded by [`check_object_id`].
    pub fn post_id(&self) -> AppResult<Uuid> {
        self.post_id
            .ok_or_else(|| AppError::Internal("post id read before check_object_id".to_string()))
    }

    /// Take the post attached by [`load_post`].
    pub fn into_post(self) -> AppResult<Post> {
        self.post
            .ok_or_else(|| AppError::Internal("post read before load_post".to_string()))
    }
}

/// Reject ids the store could never hold, before touching the store.
pub fn check_object_id(ctx: &mut PostContext, raw: &str) -> AppResult<Uuid> {
    let id = parse_post_id(raw)?;
    ctx.post_id = Some(id);
    Ok(id)
}

/// Attach the post if it exists. Returns whether it did.
pub async fn find_post(ctx: &mut PostContext, posts: &dyn PostRepository) -> AppResult<bool> {
    let id = ctx.post_id()?;
    ctx.post = posts.find_by_id(id).await?;
    Ok(ctx.post.is_some())
}

/// Attach the post, or answer 404.
pub async fn load_post(ctx: &mut PostContext, posts: &dyn PostRepository) -> AppResult<()> {
    if find_post(ctx, posts).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound {
            entity_type: "post",
        }
        .into())
    }
}

/// Require a verified caller.
pub fn check_logged_in(ctx: &PostContext) -> AppResult<&Identity> {
    ctx.identity
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

/// Require that the caller wrote the attached post.
pub fn check_own_post(ctx: &PostContext) -> AppResult<()> {
    let identity = check_logged_in(ctx)?;
    let post = ctx
        .post
        .as_ref()
        .ok_or_else(|| AppError::Internal("check_own_post ran before load_post".to_string()))?;

    post.ensure_owned_by(identity.user_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::Author;
    use blog_infra::InMemoryPostRepository;

    fn identity(name: &str) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    fn post_by(identity: &Identity) -> Post {
        Post::new(identity.as_author(), "t".into(), "b".into(), vec![])
    }

    #[test]
    fn test_check_object_id() {
        let mut ctx = PostContext::default();
        assert!(matches!(
            check_object_id(&mut ctx, "123"),
            Err(AppError::MalformedId(_))
        ));
        assert!(ctx.post_id.is_none());

        let id = Uuid::now_v7();
        check_object_id(&mut ctx, &id.to_string()).unwrap();
        assert_eq!(ctx.post_id, Some(id));
    }

    #[actix_web::test]
    async fn test_load_post_attaches_or_404s() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.save(post_by(&identity("alice"))).await.unwrap();

        let mut ctx = PostContext::default();
        check_object_id(&mut ctx, &saved.id.to_string()).unwrap();
        load_post(&mut ctx, &repo).await.unwrap();
        assert_eq!(ctx.into_post().unwrap().id, saved.id);

        let mut ctx = PostContext::default();
        check_object_id(&mut ctx, &Uuid::now_v7().to_string()).unwrap();
        assert!(matches!(
            load_post(&mut ctx, &repo).await,
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_check_own_post() {
        let alice = identity("alice");
        let post = post_by(&alice);

        let ctx = PostContext {
            post: Some(post.clone()),
            identity: Some(alice),
            ..Default::default()
        };
        assert!(check_own_post(&ctx).is_ok());

        let ctx = PostContext {
            post: Some(post.clone()),
            identity: Some(identity("mallory")),
            ..Default::default()
        };
        assert!(matches!(check_own_post(&ctx), Err(AppError::Forbidden)));

        let ctx = PostContext {
            post: Some(post),
            ..Default::default()
        };
        assert!(matches!(
            check_own_post(&ctx),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_author_is_built_from_identity() {
        let alice = identity("alice");
        assert_eq!(
            alice.as_author(),
            Author {
                id: alice.user_id,
                username: "alice".to_string(),
            }
        );
    }
}
