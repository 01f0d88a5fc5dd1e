use crate::{
    branding::prompt::logo_prompt,
    clients::ImageGenerator,
    config::ApiKey,
    error::Result,
    models::{LogoArtifact, DEFAULT_LOGO_MODEL},
};

/// Asks the image service for a logo of `name`.
///
/// Returns `Ok(None)` without calling the service when `api_key` is absent.
/// Artifacts are never cached: every call regenerates.
pub async fn generate_logo(
    generator: &dyn ImageGenerator,
    name: &str,
    description: &str,
    model: Option<&str>,
    api_key: Option<&ApiKey>,
) -> Result<Option<LogoArtifact>> {
    let Some(api_key) = api_key else {
        log::warn!("Skipping logo generation: no image credential");
        return Ok(None);
    };

    let model = model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_LOGO_MODEL);

    log::info!("🎨 Designing logo for {}", name);
    let logo = generator
        .generate_image(api_key, model, &logo_prompt(name, description))
        .await?;

    Ok(Some(logo))
}
