use axum::extract::{Path, State};

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::View;

#[utoipa::path(
    get,
    path = "/",
    tag = "views",
    responses(
        (status = 200, description = "index view", body = View),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn index(State(state): State<AppState>) -> AppResult<View> {
    let posts = state.blog_service.index().await?;
    View::new("index").with("posts", posts)
}

/// Listing page of one author's blog.
#[utoipa::path(
    get,
    path = "/blogs/{blog}",
    tag = "views",
    params(
        ("blog" = String, Path, description = "Blog slug")
    ),
    responses(
        (status = 200, description = "blog-post view", body = View),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn blog_page(
    State(state): State<AppState>,
    Path(blog): Path<String>,
) -> AppResult<View> {
    let page = state.blog_service.blog_page(&blog).await?;

    View::new("blog-post")
        .with("blog", blog)?
        .with("posts", page.posts)?
        .with("all_tags", page.tags)
}
