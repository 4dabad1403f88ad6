use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::OAuthProviderConfig;
use crate::services::oauth::oura::{
    errors::OuraAuthError, models::OuraTokenResponse, service::OuraOAuthService,
};

pub struct OuraOAuthClient {
    pub client: Client,
    pub config: OAuthProviderConfig,
}

#[async_trait]
impl OuraOAuthService for OuraOAuthClient {
    async fn exchange_code_for_token(
        &self,
        code: &str,
    ) -> Result<OuraTokenResponse, OuraAuthError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(OuraAuthError::MissingConfiguration("OURA_CLIENT_ID"))?;

        let res = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", client_id),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(OuraAuthError::TokenExchangeFailed)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            // Oura answers with JSON errors; anything else is kept as text.
            let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            return Err(OuraAuthError::ProviderRejected { status, details });
        }

        let raw: Value = res
            .json()
            .await
            .map_err(|e| OuraAuthError::InvalidTokenJson(e.to_string()))?;

        Ok(OuraTokenResponse::from_raw(raw))
    }
}
