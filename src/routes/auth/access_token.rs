use axum::{
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{responses::JsonResponse, state::AppState};

pub const MISSING_TOKEN_MESSAGE: &str = "Missing access token. Please login first.";

/// Picks the bearer token for an upstream call.
///
/// Priority: explicit `token` parameter, then the request's bearer header, then the
/// cached token from the last login. Empty values are skipped.
pub fn resolve_access_token(
    query_token: Option<&str>,
    bearer_token: Option<&str>,
    cached_token: Option<String>,
) -> Option<String> {
    query_token
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token.filter(|t| !t.is_empty()))
        .map(str::to_owned)
        .or_else(|| cached_token.filter(|t| !t.is_empty()))
}

fn bearer_from_parts(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}

#[derive(Deserialize, Default)]
struct TokenOverride {
    token: Option<String>,
}

/// Resolved Oura access token. Rejects with 401 before any upstream call.
#[derive(Debug, PartialEq)]
pub struct AccessToken(pub String);

impl FromRequestParts<AppState> for AccessToken {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query = Query::<TokenOverride>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        resolve_access_token(
            query.token.as_deref(),
            bearer_from_parts(parts),
            state.token_store.get(),
        )
        .map(AccessToken)
        .ok_or_else(|| JsonResponse::unauthorized(MISSING_TOKEN_MESSAGE).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;

    use crate::config::Config;
    use crate::services::oauth::oura::mock_oura_oauth::MockOuraOAuth;
    use crate::services::token_store::InMemoryTokenStore;

    fn state_with_cache(cached: Option<&str>) -> AppState {
        let mut state = AppState::test_stub(
            Config::test_stub("http://unused", "http://unused"),
            Arc::new(MockOuraOAuth::default()),
        );
        if let Some(token) = cached {
            state.token_store = Arc::new(InMemoryTokenStore::with_token(token));
        }
        state
    }

    async fn extract(uri: &str, bearer: Option<&str>, state: &AppState) -> Result<AccessToken, Response> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = bearer {
            builder = builder.header(AUTHORIZATION, value);
        }
        let mut parts = builder.body(()).unwrap().into_parts().0;
        AccessToken::from_request_parts(&mut parts, state).await
    }

    #[test]
    fn request_token_beats_header_and_cache() {
        assert_eq!(
            resolve_access_token(Some("query"), Some("header"), Some("cached".into())).as_deref(),
            Some("query")
        );
    }

    #[test]
    fn header_beats_cache() {
        assert_eq!(
            resolve_access_token(None, Some("header"), Some("cached".into())).as_deref(),
            Some("header")
        );
    }

    #[test]
    fn cache_is_the_last_resort() {
        assert_eq!(
            resolve_access_token(None, None, Some("cached".into())).as_deref(),
            Some("cached")
        );
        assert_eq!(resolve_access_token(None, None, None), None);
    }

    #[test]
    fn empty_values_are_skipped() {
        assert_eq!(
            resolve_access_token(Some(""), Some(""), Some("cached".into())).as_deref(),
            Some("cached")
        );
        assert_eq!(resolve_access_token(Some(""), None, Some(String::new())), None);
    }

    #[tokio::test]
    async fn extractor_reads_query_then_header_then_cache() {
        let state = state_with_cache(Some("cached"));

        let token = extract("/api/user?token=override", Some("Bearer header"), &state).await;
        assert_eq!(token.unwrap(), AccessToken("override".into()));

        let token = extract("/api/user", Some("Bearer header"), &state).await;
        assert_eq!(token.unwrap(), AccessToken("header".into()));

        let token = extract("/api/user", None, &state).await;
        assert_eq!(token.unwrap(), AccessToken("cached".into()));
    }

    #[tokio::test]
    async fn extractor_ignores_non_bearer_authorization() {
        let state = state_with_cache(Some("cached"));
        let token = extract("/api/user", Some("Basic dXNlcjpwYXNz"), &state).await;
        assert_eq!(token.unwrap(), AccessToken("cached".into()));

        let token = extract("/api/user", Some("bearer lower"), &state).await;
        assert_eq!(token.unwrap(), AccessToken("lower".into()));
    }

    #[tokio::test]
    async fn extractor_rejects_with_401_when_nothing_resolves() {
        let state = state_with_cache(None);
        let rejection = extract("/api/user?token=", None, &state)
            .await
            .expect_err("no token anywhere");

        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(rejection.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], MISSING_TOKEN_MESSAGE);
    }
}
