// services/oauth/oura/service.rs

use super::{errors::OuraAuthError, models::OuraTokenResponse};
use async_trait::async_trait;

#[async_trait]
pub trait OuraOAuthService: Send + Sync {
    async fn exchange_code_for_token(&self, code: &str)
        -> Result<OuraTokenResponse, OuraAuthError>;
}
