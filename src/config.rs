use std::env;

pub const OURA_AUTHORIZE_URL: &str = "https://cloud.ouraring.com/oauth/authorize";
pub const OURA_TOKEN_URL: &str = "https://api.ouraring.com/oauth/token";
pub const OURA_API_BASE_URL: &str = "https://api.ouraring.com/v2";
pub const OURA_SANDBOX_API_BASE_URL: &str = "https://api.ouraring.com/v2/sandbox";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/auth/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";

/// Which Oura deployment the proxy talks to. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamEnvironment {
    Live,
    Sandbox,
}

impl UpstreamEnvironment {
    /// The environment selected at build time via the `sandbox` feature.
    pub fn build_default() -> Self {
        if cfg!(feature = "sandbox") {
            UpstreamEnvironment::Sandbox
        } else {
            UpstreamEnvironment::Live
        }
    }

    pub fn api_base_url(self) -> &'static str {
        match self {
            UpstreamEnvironment::Live => OURA_API_BASE_URL,
            UpstreamEnvironment::Sandbox => OURA_SANDBOX_API_BASE_URL,
        }
    }
}

#[derive(Clone)]
pub struct OAuthProviderConfig {
    pub client_id: Option<String>,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub server_address: String,
    /// `None` allows any origin.
    pub frontend_origin: Option<String>,
    pub auth_cookie_secure: bool,
    pub environment: UpstreamEnvironment,
    pub api_base_url: String,
    pub oauth: OAuthProviderConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // Load .env file

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment = match non_empty("OURA_SANDBOX_MODE") {
            Some(flag) if parse_flag(&flag) => UpstreamEnvironment::Sandbox,
            Some(_) => UpstreamEnvironment::Live,
            None => UpstreamEnvironment::build_default(),
        };

        let redirect_uri =
            non_empty("OURA_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());

        let auth_cookie_secure = match non_empty("AUTH_COOKIE_SECURE") {
            Some(flag) => parse_flag(&flag),
            None => redirect_uri.starts_with("https://"),
        };

        let frontend_origin = non_empty("FRONTEND_ORIGIN").filter(|origin| origin != "*");

        Config {
            server_address: non_empty("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            frontend_origin,
            auth_cookie_secure,
            environment,
            api_base_url: environment.api_base_url().to_string(),
            oauth: OAuthProviderConfig {
                client_id: non_empty("OURA_CLIENT_ID"),
                client_secret: non_empty("OURA_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri,
                authorize_url: OURA_AUTHORIZE_URL.to_string(),
                token_url: OURA_TOKEN_URL.to_string(),
            },
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
impl Config {
    /// Configuration with fake credentials whose upstream URLs point at local mocks.
    pub fn test_stub(api_base_url: &str, token_url: &str) -> Self {
        Config {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            frontend_origin: None,
            auth_cookie_secure: false,
            environment: UpstreamEnvironment::Live,
            api_base_url: api_base_url.to_string(),
            oauth: OAuthProviderConfig {
                client_id: Some("test-client-id".into()),
                client_secret: "test-client-secret".into(),
                redirect_uri: DEFAULT_REDIRECT_URI.into(),
                authorize_url: OURA_AUTHORIZE_URL.into(),
                token_url: token_url.to_string(),
            },
        }
    }
}
