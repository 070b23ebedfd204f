use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::domain::comment::{Comment, CommentDto};
use crate::domain::resource::not_found;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::View;

#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "comments",
    responses(
        (status = 200, description = "Comments listed", body = [CommentDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<CommentDto>>)> {
    let comments = state.comment_service.get_all_comments().await?;
    Ok((StatusCode::OK, Json(comments)))
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment found", body = CommentDto),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let comment = state
        .comment_service
        .get_comment_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Comment>(id))?;

    Ok((StatusCode::OK, Json(comment)))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comments",
    request_body = CommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Json(dto): Json<CommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;
    let created = state.comment_service.create_comment(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;
    let updated = state.comment_service.update_comment(id, dto).await?;
    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.comment_service.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comment section of one post, with an empty comment bound for the form.
#[utoipa::path(
    get,
    path = "/api/comments/{id}/comments",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "post-comments view", body = View),
        (status = 400, description = "Unknown post"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn post_comments_view(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<View> {
    let comments = state.comment_service.comments_by_post_id(post_id).await?;

    View::new("post-comments")
        .with("comments", comments)?
        .with("comment", CommentDto::default())?
        .with("post_id", post_id)
}

#[utoipa::path(
    get,
    path = "/comments",
    tag = "views",
    responses(
        (status = 200, description = "comments view", body = View),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn comments_view(State(state): State<AppState>) -> AppResult<View> {
    let comments = state.comment_service.get_all_comments().await?;

    View::new("comments")
        .with("comments", comments)?
        .with("comment", CommentDto::default())
}
