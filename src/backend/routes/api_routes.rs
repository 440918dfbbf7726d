/**
 * API Route Configuration
 *
 * Every route added here requires authentication; `create_router` wraps
 * them in `auth_middleware`.
 *
 * # Routes
 *
 * ## Users
 * - `GET /api/auth/me`, `GET|PUT /api/users/me`, `GET /api/users/{user_id}`
 *
 * ## Groups
 * - `GET|POST /api/groups`, `GET|PUT|DELETE /api/groups/{group_id}`
 * - `POST /api/groups/join`, `POST /api/groups/{group_id}/leave`
 * - `GET /api/groups/{group_id}/members`
 * - `DELETE /api/groups/{group_id}/members/{member_id}`
 * - `POST /api/groups/{group_id}/members/{member_id}/promote`
 * - `GET /api/groups/{group_id}/reports`, `PUT /api/groups/{group_id}/reports/{report_id}`
 *
 * ## Books
 * - `GET /api/books/search`, `GET /api/books/{book_id}`
 * - `GET|POST /api/groups/{group_id}/books`
 * - `DELETE /api/groups/{group_id}/books/{book_id}`
 *
 * ## Progress
 * - `GET|POST /api/progress`, `PUT|DELETE /api/progress/{progress_id}`
 * - `GET /api/progress/groups/{group_id}/books/{book_id}[/all]`
 *
 * ## Comments
 * - `POST /api/groups/{group_id}/comments`
 * - `GET /api/groups/{group_id}/books/{book_id}/comments[/ahead]`
 * - `GET|PUT|DELETE /api/comments/{comment_id}`
 * - `POST|DELETE /api/comments/{comment_id}/like`
 * - `POST /api/comments/{comment_id}/report`
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, get_user, update_me};
use crate::backend::books::handlers as books;
use crate::backend::comments::handlers as comments;
use crate::backend::groups::handlers as groups;
use crate::backend::progress::handlers as progress;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Users
        .route("/api/auth/me", get(get_me))
        .route("/api/users/me", get(get_me).put(update_me))
        .route("/api/users/{user_id}", get(get_user))
        // Groups
        .route("/api/groups", get(groups::list_groups).post(groups::create_group))
        .route("/api/groups/join", post(groups::join_group))
        .route(
            "/api/groups/{group_id}",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
        .route("/api/groups/{group_id}/leave", post(groups::leave_group))
        .route("/api/groups/{group_id}/members", get(groups::list_members))
        .route(
            "/api/groups/{group_id}/members/{member_id}",
            delete(groups::remove_member),
        )
        .route(
            "/api/groups/{group_id}/members/{member_id}/promote",
            post(groups::promote_member),
        )
        .route("/api/groups/{group_id}/reports", get(groups::list_reports))
        .route(
            "/api/groups/{group_id}/reports/{report_id}",
            put(groups::review_report),
        )
        // Books
        .route("/api/books/search", get(books::search_books))
        .route("/api/books/{book_id}", get(books::get_book))
        .route(
            "/api/groups/{group_id}/books",
            get(books::list_group_books).post(books::add_group_book),
        )
        .route(
            "/api/groups/{group_id}/books/{book_id}",
            delete(books::remove_group_book),
        )
        // Reading progress
        .route(
            "/api/progress",
            get(progress::list_my_progress).post(progress::record_progress),
        )
        .route(
            "/api/progress/groups/{group_id}/books/{book_id}",
            get(progress::get_my_book_progress),
        )
        .route(
            "/api/progress/groups/{group_id}/books/{book_id}/all",
            get(progress::list_group_book_progress),
        )
        .route(
            "/api/progress/{progress_id}",
            put(progress::update_progress).delete(progress::delete_progress),
        )
        // Comments
        .route("/api/groups/{group_id}/comments", post(comments::create_comment))
        .route(
            "/api/groups/{group_id}/books/{book_id}/comments",
            get(comments::list_comments),
        )
        .route(
            "/api/groups/{group_id}/books/{book_id}/comments/ahead",
            get(comments::list_ahead_comments),
        )
        .route(
            "/api/comments/{comment_id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route(
            "/api/comments/{comment_id}/like",
            post(comments::like_comment).delete(comments::unlike_comment),
        )
        .route("/api/comments/{comment_id}/report", post(comments::report_comment))
}
