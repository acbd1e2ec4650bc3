//! Handlers for the `/subscriptions` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use subtrack_core::subscription::{
    validate_for_create, validate_for_update, validate_period, PeriodInput, PeriodTotal,
    Subscription, SubscriptionInput,
};
use subtrack_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

/// POST /api/v1/subscriptions
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SubscriptionInput>,
) -> AppResult<(StatusCode, Json<Subscription>)> {
    let new_sub = validate_for_create(&input)?;
    let id = SubscriptionRepo::create(&state.pool, &new_sub).await?;
    tracing::info!(id, service_name = %new_sub.service_name, "Subscription created");
    Ok((StatusCode::CREATED, Json(new_sub.with_id(id))))
}

/// GET /api/v1/subscriptions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Subscription>>> {
    let subs = SubscriptionRepo::list(&state.pool).await?;
    Ok(Json(subs))
}

/// GET /api/v1/subscriptions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Subscription>> {
    let sub = SubscriptionRepo::get_by_id(&state.pool, id).await?;
    Ok(Json(sub))
}

/// PUT /api/v1/subscriptions/{id}
///
/// Loads the current record first, so an unknown id is a 404 even when the
/// body is also invalid. The body rejection is only raised after the load.
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Result<ValidJson<SubscriptionInput>, AppError>,
) -> AppResult<Json<Subscription>> {
    let existing = SubscriptionRepo::get_by_id(&state.pool, id).await?;
    let ValidJson(input) = body?;
    let updated = validate_for_update(&existing, &input)?;
    SubscriptionRepo::update(&state.pool, &updated).await?;
    tracing::info!(id, "Subscription updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/subscriptions/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    SubscriptionRepo::delete(&state.pool, id).await?;
    tracing::info!(id, "Subscription deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/subscriptions/get_for_period
///
/// Total price of subscriptions starting within `[start, end]`.
pub async fn get_for_period(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<PeriodInput>,
) -> AppResult<Json<PeriodTotal>> {
    let query = validate_period(&input)?;
    let total = SubscriptionRepo::sum_for_period(&state.pool, &query).await?;
    Ok(Json(PeriodTotal { total }))
}
