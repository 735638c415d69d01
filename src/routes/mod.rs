pub mod health;
pub mod stats;
pub mod upload;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

pub use health::health_check;
pub use stats::average_age;
pub use upload::upload_users_csv;
pub use users::{create_user, delete_user, list_users};

use crate::AppState;

/// Build the API router
///
/// Cross-cutting layers (CORS, request tracing) are added by the binary so
/// tests can drive the bare routes.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/users", post(create_user).get(list_users))
        .route("/users/:id", delete(delete_user))
        .route(
            "/users/upload_csv",
            post(upload_users_csv).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/users/average_age", get(average_age))
        .with_state(state)
}
