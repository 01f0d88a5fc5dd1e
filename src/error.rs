use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoflowError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Model not found: {model}. Try a different model.")]
    ModelNotFound { model: String },

    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Response error: {0}")]
    ResponseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session error: {0}")]
    SessionError(String),
}

impl LogoflowError {
    /// True when the failure came from (or on the way to) an external service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            LogoflowError::ModelNotFound { .. }
                | LogoflowError::ServiceError { .. }
                | LogoflowError::RequestError(_)
                | LogoflowError::ResponseError(_)
        )
    }
}

impl From<reqwest::Error> for LogoflowError {
    fn from(e: reqwest::Error) -> Self {
        LogoflowError::RequestError(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for LogoflowError {
    fn from(e: serde_json::Error) -> Self {
        LogoflowError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogoflowError>;
