//! Post handlers.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use serde_json::Value;

use blog_core::domain::{PageRequest, Post, PostFilter, PostPatch, last_page};
use blog_core::ports::{BaseRepository, PostRepository};
use blog_core::sanitize::{preview_body, sanitize_body};
use blog_core::validation::{FieldRule, UPDATE_POST_SCHEMA, WRITE_POST_SCHEMA, validate};
use blog_shared::dto::{
    AuthorResponse, ListPostsQuery, PostResponse, UpdatePostRequest, WritePostRequest,
};

use crate::guards::{
    PostContext, check_logged_in, check_object_id, check_own_post, find_post, load_post,
};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Response header carrying the number of the last page of a listing.
pub const LAST_PAGE_HEADER: &str = "Last-Page";

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        body: post.body,
        tags: post.tags,
        author: AuthorResponse {
            id: post.author.id.to_string(),
            username: post.author.username,
        },
        published_date: post
            .published_date
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Check a JSON payload against `schema`, then read it as `T`.
fn parse_payload<T: DeserializeOwned>(schema: &[FieldRule], payload: Value) -> AppResult<T> {
    validate(schema, &payload).into_result()?;
    serde_json::from_value(payload).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /api/posts
pub async fn write(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let ctx = PostContext::new(identity.0);
    let author = check_logged_in(&ctx)?.as_author();

    let req: WritePostRequest = parse_payload(WRITE_POST_SCHEMA, body.into_inner())?;
    let post = Post::new(author, req.title, sanitize_body(&req.body), req.tags);

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = %saved.id, author = %saved.author.username, "Post created");

    Ok(HttpResponse::Ok().json(post_response(saved)))
}

/// GET /api/posts?page=&tag=&username=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let requested = query.page.unwrap_or(1);
    let page = u64::try_from(requested)
        .ok()
        .and_then(|page| PageRequest::new(page, state.page_size))
        .ok_or_else(|| AppError::BadRequest(format!("page must be at least 1, got {requested}")))?;

    let filter = PostFilter {
        username: non_empty(query.username),
        tag: non_empty(query.tag),
    };

    let result = state.posts.find_page(&filter, page).await?;
    let last = last_page(result.total, page.page_size);

    let previews: Vec<PostResponse> = result
        .items
        .into_iter()
        .map(|mut post| {
            post.body = preview_body(&post.body);
            post_response(post)
        })
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header((LAST_PAGE_HEADER, last.to_string()))
        .json(previews))
}

/// GET /api/posts/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let mut ctx = PostContext::default();
    check_object_id(&mut ctx, &path)?;
    load_post(&mut ctx, state.posts.as_ref()).await?;

    Ok(HttpResponse::Ok().json(post_response(ctx.into_post()?)))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: OptionalIdentity,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let mut ctx = PostContext::new(identity.0);
    let id = check_object_id(&mut ctx, &path)?;
    load_post(&mut ctx, state.posts.as_ref()).await?;
    check_logged_in(&ctx)?;
    check_own_post(&ctx)?;

    let req: UpdatePostRequest = parse_payload(UPDATE_POST_SCHEMA, body.into_inner())?;
    let patch = PostPatch {
        title: req.title,
        body: req.body.as_deref().map(sanitize_body),
        tags: req.tags,
    };

    // The post can vanish between the lookup and the write.
    let updated = state
        .posts
        .update_by_id(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(updated)))
}

/// DELETE /api/posts/{id}
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let mut ctx = PostContext::new(identity.0);
    let id = check_object_id(&mut ctx, &path)?;
    check_logged_in(&ctx)?;

    if find_post(&mut ctx, state.posts.as_ref()).await? {
        check_own_post(&ctx)?;
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
