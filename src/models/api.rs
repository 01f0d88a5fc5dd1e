use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateNamesRequest {
    #[serde(default)]
    pub description: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateLogoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesResponse {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoResponse {
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
