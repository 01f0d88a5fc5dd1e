use std::env;
use std::fmt;
use std::time::Duration;

use crate::branding::DEFAULT_IDLE_TIMEOUT;
use crate::models::{DEFAULT_LOGO_MODEL, DEFAULT_NAME_MODEL};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// An API secret. Held in memory only; `Debug` and `Display` never show it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value.trim().to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: Option<ApiKey>,
    pub hf_api_token: Option<ApiKey>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let gemini_api_key = env::var("GOOGLE_API_KEY").ok().and_then(ApiKey::new);
        let hf_api_token = env::var("HF_API_TOKEN").ok().and_then(ApiKey::new);

        Credentials {
            gemini_api_key,
            hf_api_token,
        }
    }

    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = ApiKey::new(key);
        self
    }

    pub fn with_hf_token(mut self, token: impl Into<String>) -> Self {
        self.hf_api_token = ApiKey::new(token);
        self
    }

    /// The credential gate: ready only when both secrets are present.
    pub fn is_ready(&self) -> bool {
        self.gemini_api_key.is_some() && self.hf_api_token.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub gemini_base_url: String,
    pub hf_base_url: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            hf_base_url: DEFAULT_HF_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let gemini_base_url = env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url);
        let hf_base_url = env::var("HF_BASE_URL").unwrap_or(defaults.hf_base_url);
        let timeout = env::var("LOGOFLOW_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        ServiceConfig {
            gemini_base_url,
            hf_base_url,
            timeout,
        }
    }

    pub fn with_gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = url.into();
        self
    }

    pub fn with_hf_base_url(mut self, url: impl Into<String>) -> Self {
        self.hf_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub name_model: String,
    pub logo_model: String,
    pub services: ServiceConfig,
    /// Form sessions idle for longer than this are dropped.
    pub session_idle_timeout: Duration,
    /// Used by the JSON API; the form pages take keys from the session instead.
    pub credentials: Credentials,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            name_model: DEFAULT_NAME_MODEL.to_string(),
            logo_model: DEFAULT_LOGO_MODEL.to_string(),
            services: ServiceConfig::default(),
            session_idle_timeout: DEFAULT_IDLE_TIMEOUT,
            credentials: Credentials::default(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);
        let name_model = env::var("LOGOFLOW_NAME_MODEL").unwrap_or(defaults.name_model);
        let logo_model = env::var("LOGOFLOW_LOGO_MODEL").unwrap_or(defaults.logo_model);
        let session_idle_timeout = env::var("LOGOFLOW_SESSION_IDLE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle_timeout);

        ServerConfig {
            host,
            port,
            name_model,
            logo_model,
            services: ServiceConfig::from_env(),
            session_idle_timeout,
            credentials: Credentials::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_session_idle_timeout(mut self, timeout: Duration) -> Self {
        self.session_idle_timeout = timeout;
        self
    }

    pub fn with_services(mut self, services: ServiceConfig) -> Self {
        self.services = services;
        self
    }

    pub fn with_models(mut self, name_model: impl Into<String>, logo_model: impl Into<String>) -> Self {
        self.name_model = name_model.into();
        self.logo_model = logo_model.into();
        self
    }
}
