pub mod error;
pub mod home;
pub mod responses;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ax_state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(home::welcome))
        .route("/{form_id}/filteredResponses", get(responses::filtered_responses))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
