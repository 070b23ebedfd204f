use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;
use handlers::{blogs, comments, posts};

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod views;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/", get(blogs::index))
        .route("/blogs/{blog}", get(blogs::blog_page))
        .route("/comments", get(comments::comments_view))
        .nest("/api/comments", comment_routes())
        .nest("/api/posts", post_routes())
        .with_state(state)
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/{id}/comments", get(comments::post_comments_view))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
