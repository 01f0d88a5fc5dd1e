use crate::{
    clients::TextGenerator,
    config::ApiKey,
    error::{LogoflowError, Result},
    logger,
    models::{GeminiErrorBody, GeminiRequest, GeminiResponse},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

#[derive(Clone)]
pub struct GeminiTextClient {
    client: Client,
    base_url: String,
}

impl GeminiTextClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn parse_error(status: StatusCode, body: &str, model: &str) -> LogoflowError {
        if status == StatusCode::NOT_FOUND {
            return LogoflowError::ModelNotFound {
                model: model.to_string(),
            };
        }

        let message = serde_json::from_str::<GeminiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.to_string());

        LogoflowError::ServiceError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiTextClient {
    async fn generate_text(&self, api_key: &ApiKey, model: &str, prompt: &str) -> Result<String> {
        let _timer = logger::timer(&format!("gemini {}", model));
        log::info!("Invoking model: {}", model);
        log::debug!("Text generation prompt: {}", prompt);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key.expose())
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Gemini returned {} for model {}", status, model);
            return Err(Self::parse_error(status, &body, model));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| LogoflowError::ResponseError(e.to_string()))?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LogoflowError::ServiceError {
                status: status.as_u16(),
                message: format!("Prompt blocked: {}", reason),
            });
        }

        parsed
            .text()
            .ok_or_else(|| LogoflowError::ResponseError("No candidates in Gemini response".into()))
    }
}
