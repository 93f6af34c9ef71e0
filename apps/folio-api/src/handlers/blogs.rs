//! Blog handlers.

use actix_web::{HttpResponse, web};

use folio_core::domain::{PostInput, TagInput};
use folio_shared::dto::{PostPayload, TagsPayload};

use crate::middleware::admin::AdminCredential;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .blogs
        .list_posts()
        .await
        .map_err(AppError::or_internal("Failed to load blogs."))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blogs/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .blogs
        .get_post(&path)
        .await
        .map_err(AppError::or_internal("Failed to load blog."))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blogs - requires the admin credential
pub async fn create_post(
    state: web::Data<AppState>,
    credential: AdminCredential,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .blogs
        .create_post(post_input(body.into_inner()), credential.as_deref())
        .await
        .map_err(AppError::or_internal("Failed to publish blog."))?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/blogs/{id} - requires the admin credential
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    credential: AdminCredential,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .blogs
        .update_post(&path, post_input(body.into_inner()), credential.as_deref())
        .await
        .map_err(AppError::or_internal("Failed to update blog."))?;

    Ok(HttpResponse::Ok().json(post))
}

fn post_input(payload: PostPayload) -> PostInput {
    PostInput {
        title: payload.title.unwrap_or_default(),
        summary: payload.summary,
        content: payload.content.unwrap_or_default(),
        tags: payload.tags.map(tag_input),
    }
}

fn tag_input(tags: TagsPayload) -> TagInput {
    match tags {
        TagsPayload::List(values) => {
            TagInput::List(values.iter().map(TagsPayload::stringify).collect())
        }
        TagsPayload::Text(text) => TagInput::Text(text),
        TagsPayload::Other(value) => TagInput::Text(TagsPayload::scalar_text(&value)),
    }
}
