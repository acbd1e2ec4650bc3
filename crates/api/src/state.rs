/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is the only state shared between requests. Cloning is cheap: the
/// pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each repository call checks out one
    /// connection and returns it when the statement finishes.
    pub pool: subtrack_db::DbPool,
}
