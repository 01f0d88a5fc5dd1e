#[cfg(test)]
pub(crate) mod fake;
pub mod image_client;
pub mod text_client;

use crate::{
    config::{ApiKey, ServiceConfig},
    error::{LogoflowError, Result},
    models::LogoArtifact,
};
use async_trait::async_trait;
use std::sync::Arc;

pub use image_client::HuggingFaceImageClient;
pub use text_client::GeminiTextClient;

/// Text-generation boundary: one blocking request, one free-text reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, api_key: &ApiKey, model: &str, prompt: &str) -> Result<String>;
}

/// Text-to-image boundary: one blocking request, one raster image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        api_key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> Result<LogoArtifact>;
}

#[derive(Clone)]
pub struct LogoflowClient {
    text_client: Arc<dyn TextGenerator>,
    image_client: Arc<dyn ImageGenerator>,
}

impl LogoflowClient {
    pub fn new(text_client: Arc<dyn TextGenerator>, image_client: Arc<dyn ImageGenerator>) -> Self {
        Self {
            text_client,
            image_client,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LogoflowError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            Arc::new(GeminiTextClient::new(http.clone(), &config.gemini_base_url)),
            Arc::new(HuggingFaceImageClient::new(http, &config.hf_base_url)),
        ))
    }

    pub fn text(&self) -> &dyn TextGenerator {
        self.text_client.as_ref()
    }

    pub fn image(&self) -> &dyn ImageGenerator {
        self.image_client.as_ref()
    }
}
