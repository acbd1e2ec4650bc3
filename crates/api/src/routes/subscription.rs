//! Route definitions for subscriptions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscription;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// POST   /get_for_period   -> get_for_period
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscription::list).post(subscription::create))
        .route("/get_for_period", post(subscription::get_for_period))
        .route(
            "/{id}",
            get(subscription::get_by_id)
                .put(subscription::update)
                .delete(subscription::delete),
        )
}
