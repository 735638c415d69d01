use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::stats::average_age_by_initial;
use crate::AppState;

/// Average age grouped by the first character of each name
///
/// An empty store yields `{}`.
pub async fn average_age(State(state): State<AppState>) -> Json<BTreeMap<String, f64>> {
    let store = state.store.read().await;
    let averages = average_age_by_initial(store.iter());

    Json(averages)
}
