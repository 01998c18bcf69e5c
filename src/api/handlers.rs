use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    api::dtos::{AutofillRequest, AutofillResponse, ErrorResponse},
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/autofill",
    tag = "autofill",
    request_body = AutofillRequest,
    responses(
        (status = 200, description = "Form directives for the page", body = AutofillResponse),
        (status = 400, description = "Missing or oversized URL", body = ErrorResponse)
    )
)]
pub async fn autofill(
    State(state): State<AppState>,
    Json(payload): Json<AutofillRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        warn!(error = %error, "rejected autofill request");
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let profile = payload.profile.unwrap_or(state.default_profile);
    let outcome = state.autofill.run(payload.url.trim(), profile).await;

    Json(AutofillResponse {
        profile: outcome.profile,
        commands: outcome.commands,
        fields: outcome.fields,
        media: outcome.media,
    })
    .into_response()
}
