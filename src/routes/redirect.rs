use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::{info, instrument};

use crate::startup::AppState;

/// Hand a short code straight off to the backend's redirect endpoint.
/// Resolving the code is entirely the backend's job; an unknown code gets
/// whatever the backend answers, there is no fallback here.
#[instrument(name = "HTTP: Redirect handoff", skip(state))]
pub async fn redirect(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let target = state.link_service.redirect_url(&code);
    info!(short_code = %code, "Redirecting to {}", target);
    Redirect::temporary(&target)
}
