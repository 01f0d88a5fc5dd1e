use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_LOGO_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub category: ModelCategory,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Text,
    Image,
}

impl ModelInfo {
    fn new(id: &str, name: &str, provider: &str, category: ModelCategory, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            category,
            description: description.to_string(),
        }
    }
}

/// Models offered for brand name generation, default first.
pub fn name_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new(
            DEFAULT_NAME_MODEL,
            "Gemini 3 Flash (preview)",
            "google",
            ModelCategory::Text,
            "Fast branding expert",
        ),
        ModelInfo::new(
            "gemini-2.5-flash",
            "Gemini 2.5 Flash",
            "google",
            ModelCategory::Text,
            "Stable fallback when preview models are unavailable",
        ),
        ModelInfo::new(
            "gemini-2.5-pro",
            "Gemini 2.5 Pro",
            "google",
            ModelCategory::Text,
            "Slower, more deliberate naming",
        ),
    ]
}

/// Models offered for logo generation, default first.
pub fn logo_models() -> Vec<ModelInfo> {
    vec![ModelInfo::new(
        DEFAULT_LOGO_MODEL,
        "FLUX.1 schnell",
        "huggingface",
        ModelCategory::Image,
        "Free serverless tier text-to-image",
    )]
}
