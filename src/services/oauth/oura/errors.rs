// services/oauth/oura/errors.rs
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OuraAuthError {
    #[error("{0} not set")]
    MissingConfiguration(&'static str),
    #[error("Missing 'oauth_state' cookie")]
    MissingStateCookie,
    #[error("Invalid state parameter")]
    InvalidState,
    #[error("Missing authorization code")]
    MissingCode,
    #[error("Authorization was not granted: {0}")]
    AuthorizationDenied(String),
    #[error("Oura token endpoint responded with status {status}")]
    ProviderRejected { status: StatusCode, details: Value },
    #[error("Oura token request failed: {0}")]
    TokenExchangeFailed(#[source] reqwest::Error),
    #[error("Invalid token JSON: {0}")]
    InvalidTokenJson(String),
}
