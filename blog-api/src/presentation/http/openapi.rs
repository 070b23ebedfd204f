use utoipa::OpenApi;

use crate::domain::comment::CommentDto;
use crate::domain::post::PostDto;
use crate::presentation::http::views::View;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::comments::list_comments,
        crate::presentation::http::handlers::comments::get_comment,
        crate::presentation::http::handlers::comments::create_comment,
        crate::presentation::http::handlers::comments::update_comment,
        crate::presentation::http::handlers::comments::delete_comment,
        crate::presentation::http::handlers::comments::post_comments_view,
        crate::presentation::http::handlers::comments::comments_view,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::blogs::index,
        crate::presentation::http::handlers::blogs::blog_page
    ),
    components(
        schemas(
            CommentDto,
            PostDto,
            View
        )
    ),
    tags(
        (name = "comments", description = "Comment endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "views", description = "Page models for server-side rendering")
    )
)]
pub(crate) struct ApiDoc;
