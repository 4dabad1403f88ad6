// services/oauth/oura/models.rs
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct OuraCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Result of a successful code exchange: the raw provider body plus the token
/// pulled out of it. `access_token` is not validated and may be absent.
#[derive(Debug, Clone, Default)]
pub struct OuraTokenResponse {
    pub access_token: Option<String>,
    pub raw: Value,
}

impl OuraTokenResponse {
    pub fn from_raw(raw: Value) -> Self {
        let access_token = raw
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Self { access_token, raw }
    }
}
