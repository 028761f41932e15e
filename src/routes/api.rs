use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::models::short_url::CreateShortUrl;
use crate::startup::AppState;

/// Pass-through proxy for the backend's create endpoint.
///
/// Whatever the backend answers, success or error, is relayed to the caller
/// with its status and JSON body unchanged. Only a transport failure is
/// rewritten, into a fixed 500 with a generic message; the underlying error
/// never reaches the caller.
#[instrument(name = "API: Create short URL", skip(state, payload))]
pub async fn create_short_url(
    State(state): State<AppState>,
    Json(payload): Json<CreateShortUrl>,
) -> Response {
    match state.link_service.forward_create(&payload.url).await {
        Ok(reply) => {
            let status =
                StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(reply.body)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
