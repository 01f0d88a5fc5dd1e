use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct TextToImagePayload<'a> {
    pub inputs: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HfErrorBody {
    pub error: serde_json::Value,
}

/// A generated logo: raw image bytes as returned by the image service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoArtifact {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub model: String,
}

impl LogoArtifact {
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}
