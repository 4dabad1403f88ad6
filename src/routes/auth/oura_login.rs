use axum::{
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use reqwest::Url;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    responses::JsonResponse,
    services::oauth::oura::{errors::OuraAuthError, models::OuraCallback},
    state::AppState,
    utils::csrf::generate_csrf_token,
};

pub const OURA_SCOPES: &str = "email personal daily heartrate tag workout session spo2 ring_configuration stress heart_health";
const STATE_COOKIE: &str = "oauth_state";
const STATE_COOKIE_MAX_MINUTES: i64 = 10;

/// Redirects to Oura's OAuth authorization page with CSRF protection
pub async fn oura_login(State(state): State<AppState>, jar: CookieJar) -> Response {
    let oauth = &state.config.oauth;
    let Some(client_id) = oauth.client_id.as_deref() else {
        error!("OURA_CLIENT_ID is not configured, refusing to start the OAuth flow");
        return JsonResponse::server_error(
            &OuraAuthError::MissingConfiguration("OURA_CLIENT_ID").to_string(),
        )
        .into_response();
    };

    let state_token = generate_csrf_token();
    let url = match authorization_url(
        &oauth.authorize_url,
        client_id,
        &oauth.redirect_uri,
        &state_token,
    ) {
        Ok(url) => url,
        Err(e) => {
            error!("Invalid Oura authorization URL {}: {e}", oauth.authorize_url);
            return JsonResponse::server_error("Invalid Oura authorization URL").into_response();
        }
    };

    let jar = jar.add(build_state_cookie(&state_token, state.config.auth_cookie_secure));
    info!("Redirecting to Oura authorization page");

    (StatusCode::FOUND, jar, [(LOCATION, url.to_string())]).into_response()
}

/// Handles the Oura OAuth callback: validates state, exchanges the code and caches
/// the resulting access token.
pub async fn oura_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<OuraCallback>,
) -> Response {
    if let Some(error) = params.error {
        let reason = params.error_description.unwrap_or(error);
        warn!("Oura authorization was not granted: {reason}");
        let jar = clear_state_cookie(jar, state.config.auth_cookie_secure);
        return (
            jar,
            JsonResponse::bad_request(&OuraAuthError::AuthorizationDenied(reason).to_string()),
        )
            .into_response();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        let jar = clear_state_cookie(jar, state.config.auth_cookie_secure);
        return (
            jar,
            JsonResponse::bad_request(&OuraAuthError::MissingCode.to_string()),
        )
            .into_response();
    };

    let expected_state = match jar.get(STATE_COOKIE).map(|c| c.value().to_string()) {
        Some(state) => state,
        None => {
            warn!("Oura callback without a state cookie");
            return JsonResponse::bad_request(&OuraAuthError::MissingStateCookie.to_string())
                .into_response();
        }
    };

    if params.state.as_deref() != Some(expected_state.as_str()) {
        warn!("Oura callback state did not match the issued value");
        return JsonResponse::bad_request(&OuraAuthError::InvalidState.to_string())
            .into_response();
    }

    let jar = clear_state_cookie(jar, state.config.auth_cookie_secure);

    match state.oura_oauth.exchange_code_for_token(&code).await {
        Ok(token) => {
            state.token_store.set(token.access_token.clone());
            info!(
                has_access_token = token.access_token.is_some(),
                "Oura authorization code exchanged"
            );

            let body = json!({
                "message": "Authentication successful!",
                "access_token": token.access_token,
                "instructions": "The token is cached for /api/* calls. You can also pass it as ?token= or an Authorization: Bearer header.",
                "full_response": token.raw,
            });
            (jar, Json(body)).into_response()
        }
        Err(OuraAuthError::ProviderRejected { status, details }) => {
            warn!(%status, "Oura token endpoint rejected the authorization code");
            let body = json!({
                "error": "Failed to retrieve token",
                "details": details,
            });
            (StatusCode::BAD_REQUEST, jar, Json(body)).into_response()
        }
        Err(e @ OuraAuthError::MissingConfiguration(_)) => {
            error!("Oura token exchange is not configured: {e}");
            (jar, JsonResponse::server_error(&e.to_string())).into_response()
        }
        Err(e) => {
            error!("Oura token exchange error: {e}");
            (jar, JsonResponse::bad_gateway("Failed to reach the Oura token endpoint")).into_response()
        }
    }
}

fn authorization_url(
    base: &str,
    client_id: &str,
    redirect_uri: &str,
    state_token: &str,
) -> anyhow::Result<Url> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state_token)
        .append_pair("scope", OURA_SCOPES);
    Ok(url)
}

fn build_state_cookie(value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value.to_owned()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::minutes(STATE_COOKIE_MAX_MINUTES))
        .build()
}

fn clear_state_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((STATE_COOKIE, String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();
    jar.add(cookie)
}
