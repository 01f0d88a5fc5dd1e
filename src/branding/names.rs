use crate::{
    branding::prompt::name_prompt,
    clients::TextGenerator,
    config::ApiKey,
    error::Result,
    models::DEFAULT_NAME_MODEL,
};

pub const MAX_CANDIDATES: usize = 3;

/// Splits a comma-separated reply into at most three trimmed candidates.
///
/// Short replies yield fewer candidates; empty segments are dropped.
pub fn parse_candidates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .take(MAX_CANDIDATES)
        .map(String::from)
        .collect()
}

/// Asks the text-generation service for brand names.
///
/// Returns an empty list without calling the service when `api_key` is absent.
/// The caller is responsible for rejecting an empty `description`.
pub async fn generate_names(
    generator: &dyn TextGenerator,
    description: &str,
    model: Option<&str>,
    api_key: Option<&ApiKey>,
) -> Result<Vec<String>> {
    let Some(api_key) = api_key else {
        log::warn!("Skipping name generation: no text-generation credential");
        return Ok(Vec::new());
    };

    let model = model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_NAME_MODEL);

    let reply = generator
        .generate_text(api_key, model, &name_prompt(description))
        .await?;
    log::debug!("Raw name reply: {}", reply);

    let names = parse_candidates(&reply);
    if names.len() < MAX_CANDIDATES {
        log::warn!("Expected {} names, got {}", MAX_CANDIDATES, names.len());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fake::{FakeReply, FakeTextGenerator};
    use crate::error::LogoflowError;

    #[test]
    fn keeps_first_three_trimmed() {
        assert_eq!(
            parse_candidates("Nova, Zenith Labs , Pulse,Extra"),
            vec!["Nova", "Zenith Labs", "Pulse"]
        );
    }

    #[test]
    fn single_segment_is_not_padded() {
        assert_eq!(parse_candidates("SingleName"), vec!["SingleName"]);
    }

    #[test]
    fn blank_segments_are_dropped() {
        assert_eq!(parse_candidates(" A ,, B\n"), vec!["A", "B"]);
        assert!(parse_candidates("  ").is_empty());
    }

    #[tokio::test]
    async fn missing_credential_makes_no_call() {
        let fake = FakeTextGenerator::replying("A, B, C");
        let names = generate_names(&fake, "a bakery", None, None).await.unwrap();
        assert!(names.is_empty());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn sends_prompt_and_default_model() {
        let fake = FakeTextGenerator::replying("AeroStride, Velocity Runners, EcoPulse");
        let key = ApiKey::new("g-key").unwrap();

        let names = generate_names(&fake, "Sneakers", Some("  "), Some(&key))
            .await
            .unwrap();

        assert_eq!(names, vec!["AeroStride", "Velocity Runners", "EcoPulse"]);
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, DEFAULT_NAME_MODEL);
        assert_eq!(calls[0].api_key, "g-key");
        assert_eq!(calls[0].prompt, name_prompt("Sneakers"));
    }

    #[tokio::test]
    async fn unknown_model_is_reported() {
        let fake = FakeTextGenerator::with(FakeReply::NotFound);
        let key = ApiKey::new("g-key").unwrap();

        let err = generate_names(&fake, "x", Some("gemini-0"), Some(&key))
            .await
            .unwrap_err();

        assert!(matches!(err, LogoflowError::ModelNotFound { .. }));
        assert_eq!(fake.calls().len(), 1);
    }
}
