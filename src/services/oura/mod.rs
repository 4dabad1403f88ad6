use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_START_DATE: &str = "2023-01-01";
pub const DEFAULT_END_DATE: &str = "2024-01-01";

/// Upstream collections the proxy exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuraResource {
    PersonalInfo,
    Sleep,
    DailyActivity,
    DailyReadiness,
}

impl OuraResource {
    pub fn path(self) -> &'static str {
        match self {
            OuraResource::PersonalInfo => "/usercollection/personal_info",
            OuraResource::Sleep => "/usercollection/sleep",
            OuraResource::DailyActivity => "/usercollection/daily_activity",
            OuraResource::DailyReadiness => "/usercollection/daily_readiness",
        }
    }

    pub fn accepts_date_range(self) -> bool {
        !matches!(self, OuraResource::PersonalInfo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OuraApiError {
    #[error("failed to perform Oura API request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Oura API returned a non-JSON body (status {status})")]
    InvalidResponse { status: StatusCode },
}

/// Thin GET client for the Oura v2 data API.
///
/// Bodies come back as raw JSON whatever the status code; interpreting upstream
/// errors is left to the caller.
pub struct OuraApiClient {
    client: Client,
    base_url: String,
}

impl OuraApiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(
        &self,
        resource: OuraResource,
        access_token: &str,
        range: Option<&DateRange>,
    ) -> Result<Value, OuraApiError> {
        let url = build_url(&self.base_url, resource.path());
        let mut request = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json");

        // Personal info has no date window; a range passed for it is dropped.
        if let Some(range) = range.filter(|_| resource.accepts_date_range()) {
            request = request.query(&[
                ("start_date", range.start_date.as_str()),
                ("end_date", range.end_date.as_str()),
            ]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, path = resource.path(), "Oura API returned an error payload");
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|_| OuraApiError::InvalidResponse { status })
    }
}

fn build_url(base: &str, path: &str) -> String {
    let trimmed_base = base.trim_end_matches('/');
    if path.is_empty() {
        trimmed_base.to_string()
    } else {
        let trimmed_path = path.trim_start_matches('/');
        format!("{}/{}", trimmed_base, trimmed_path)
    }
}
