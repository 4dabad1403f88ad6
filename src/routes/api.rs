use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::{
    responses::JsonResponse,
    routes::auth::AccessToken,
    services::oura::{DateRange, OuraApiError, OuraResource},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// Fills missing bounds with the default range. Values are forwarded unvalidated.
    pub fn into_range(self) -> DateRange {
        let defaults = DateRange::default();
        DateRange {
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
        }
    }
}

pub async fn get_user_info(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Response {
    proxy(&state, OuraResource::PersonalInfo, &token, None).await
}

pub async fn get_sleep_data(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(range): Query<DateRangeQuery>,
) -> Response {
    proxy(&state, OuraResource::Sleep, &token, Some(range.into_range())).await
}

pub async fn get_activity_data(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(range): Query<DateRangeQuery>,
) -> Response {
    proxy(&state, OuraResource::DailyActivity, &token, Some(range.into_range())).await
}

pub async fn get_readiness_data(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(range): Query<DateRangeQuery>,
) -> Response {
    proxy(&state, OuraResource::DailyReadiness, &token, Some(range.into_range())).await
}

// Upstream bodies are relayed with 200 whatever status Oura answered with.
async fn proxy(
    state: &AppState,
    resource: OuraResource,
    token: &str,
    range: Option<DateRange>,
) -> Response {
    match state.oura_api.fetch(resource, token, range.as_ref()).await {
        Ok(body) => Json(body).into_response(),
        Err(OuraApiError::InvalidResponse { status }) => {
            error!(%status, path = resource.path(), "Oura API returned a non-JSON body");
            JsonResponse::bad_gateway("Oura API returned an invalid response").into_response()
        }
        Err(e) => {
            error!(path = resource.path(), "Oura API request failed: {e}");
            JsonResponse::bad_gateway("Failed to reach the Oura API").into_response()
        }
    }
}
