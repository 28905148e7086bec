/// Post handlers - HTTP endpoints for posts and their comments
use crate::error::Result;
use crate::metrics::{COMMENTS_CREATED_TOTAL, POSTS_CREATED_TOTAL};
use crate::middleware::AuthenticatedUser;
use crate::models::{CreateCommentRequest, CreatePostRequest};
use crate::AppState;
use actix_web::{web, HttpResponse};

/// Create a new post authored by the authenticated caller
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state.content.create_post(&user.0, &req.title, &req.content);

    POSTS_CREATED_TOTAL.inc();
    tracing::info!(post_id = post.id, author = %post.author, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// List every post with its comments. Public.
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.content.list_posts())
}

/// Append a comment to a post
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    post_id: web::Path<u64>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let comment = state.content.add_comment(post_id, &user.0, &req.content)?;

    COMMENTS_CREATED_TOTAL.inc();
    tracing::info!(
        post_id,
        comment_id = comment.id,
        author = %comment.author,
        "Comment added"
    );

    Ok(HttpResponse::Created().json(comment))
}
