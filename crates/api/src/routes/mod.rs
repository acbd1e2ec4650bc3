pub mod subscription;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /subscriptions                         list, create
/// /subscriptions/get_for_period          period total (POST)
/// /subscriptions/{id}                    get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/subscriptions", subscription::router())
}
