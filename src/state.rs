use crate::config::Config;
use crate::services::oauth::oura::{client::OuraOAuthClient, service::OuraOAuthService};
use crate::services::oura::OuraApiClient;
use crate::services::token_store::{InMemoryTokenStore, TokenStore};
use crate::services::webhooks::WebhookBuffer;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub oura_oauth: Arc<dyn OuraOAuthService>,
    pub oura_api: Arc<OuraApiClient>,
    pub token_store: Arc<dyn TokenStore>,
    pub webhooks: Arc<WebhookBuffer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http_client = Client::new();

        let oura_oauth = Arc::new(OuraOAuthClient {
            client: http_client.clone(),
            config: config.oauth.clone(),
        });
        let oura_api = Arc::new(OuraApiClient::new(http_client, config.api_base_url.clone()));

        AppState {
            config: Arc::new(config),
            oura_oauth,
            oura_api,
            token_store: Arc::new(InMemoryTokenStore::default()),
            webhooks: Arc::new(WebhookBuffer::default()),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State with an isolated token store and webhook buffer, using `oura_oauth`
    /// for code exchange and `config.api_base_url` for data calls.
    pub fn test_stub(config: Config, oura_oauth: Arc<dyn OuraOAuthService>) -> Self {
        let oura_api = Arc::new(OuraApiClient::new(
            Client::new(),
            config.api_base_url.clone(),
        ));
        AppState {
            config: Arc::new(config),
            oura_oauth,
            oura_api,
            token_store: Arc::new(InMemoryTokenStore::default()),
            webhooks: Arc::new(WebhookBuffer::default()),
        }
    }
}
