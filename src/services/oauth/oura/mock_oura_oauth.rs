use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::services::oauth::oura::{
    errors::OuraAuthError, models::OuraTokenResponse, service::OuraOAuthService,
};

pub enum MockExchange {
    Granted(Value),
    Rejected(StatusCode, Value),
}

/// Replays scripted token-endpoint outcomes in order and counts calls.
#[derive(Default)]
pub struct MockOuraOAuth {
    responses: Mutex<VecDeque<MockExchange>>,
    calls: AtomicUsize,
    codes: Mutex<Vec<String>>,
}

impl MockOuraOAuth {
    pub fn new(responses: Vec<MockExchange>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn granting(tokens: &[&str]) -> Self {
        Self::new(
            tokens
                .iter()
                .map(|t| MockExchange::Granted(json!({ "access_token": t, "token_type": "bearer" })))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OuraOAuthService for MockOuraOAuth {
    async fn exchange_code_for_token(
        &self,
        code: &str,
    ) -> Result<OuraTokenResponse, OuraAuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().unwrap().push(code.to_string());

        match self.responses.lock().unwrap().pop_front() {
            Some(MockExchange::Granted(raw)) => Ok(OuraTokenResponse::from_raw(raw)),
            Some(MockExchange::Rejected(status, details)) => {
                Err(OuraAuthError::ProviderRejected { status, details })
            }
            None => Err(OuraAuthError::InvalidTokenJson(
                "no scripted response left".into(),
            )),
        }
    }
}
