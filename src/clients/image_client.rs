use crate::{
    clients::ImageGenerator,
    config::ApiKey,
    error::{LogoflowError, Result},
    logger,
    models::{HfErrorBody, LogoArtifact, TextToImagePayload},
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

#[derive(Clone)]
pub struct HuggingFaceImageClient {
    client: Client,
    base_url: String,
}

impl HuggingFaceImageClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceImageClient {
    async fn generate_image(
        &self,
        api_key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> Result<LogoArtifact> {
        let _timer = logger::timer(&format!("text-to-image {}", model));
        log::info!("Generating image with model: {}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .bearer_auth(api_key.expose())
            .header("Accept", "image/png")
            .json(&TextToImagePayload { inputs: prompt })
            .send()
            .await?;

        let status = response.status();
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            let message = match serde_json::from_str::<HfErrorBody>(&body) {
                Ok(HfErrorBody {
                    error: serde_json::Value::String(s),
                }) => s,
                Ok(HfErrorBody { error }) => error.to_string(),
                Err(_) => body.into_owned(),
            };
            log::error!("Image service returned {} for model {}", status, model);
            return Err(LogoflowError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        if !mime_type.starts_with("image/") {
            return Err(LogoflowError::ResponseError(format!(
                "Expected an image, got content type '{}'",
                mime_type
            )));
        }

        if bytes.is_empty() {
            return Err(LogoflowError::ResponseError("No image generated".into()));
        }

        Ok(LogoArtifact {
            data: bytes.to_vec(),
            mime_type,
            model: model.to_string(),
        })
    }
}
