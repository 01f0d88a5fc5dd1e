use crate::config::Credentials;

/// The two external services, each unlocked by its own credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    TextGeneration,
    ImageGeneration,
}

impl Service {
    pub fn credential_label(&self) -> &'static str {
        match self {
            Service::TextGeneration => "Google Gemini API Key",
            Service::ImageGeneration => "Hugging Face Token",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            Service::TextGeneration => "GOOGLE_API_KEY",
            Service::ImageGeneration => "HF_API_TOKEN",
        }
    }

    pub fn unlocks(&self) -> &'static str {
        match self {
            Service::TextGeneration => "generating creative brand names",
            Service::ImageGeneration => "designing your unique logo",
        }
    }

    pub fn all() -> [Service; 2] {
        [Service::TextGeneration, Service::ImageGeneration]
    }
}

pub struct CredentialGate<'a> {
    credentials: &'a Credentials,
}

impl<'a> CredentialGate<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    pub fn is_ready(&self) -> bool {
        self.credentials.is_ready()
    }

    pub fn missing(&self) -> Vec<Service> {
        Service::all()
            .into_iter()
            .filter(|service| match service {
                Service::TextGeneration => self.credentials.gemini_api_key.is_none(),
                Service::ImageGeneration => self.credentials.hf_api_token.is_none(),
            })
            .collect()
    }

    /// One line per credential, saying which capability it unlocks.
    pub fn guidance(&self) -> Vec<String> {
        Service::all()
            .iter()
            .map(|s| format!("{}: for {}.", s.credential_label(), s.unlocks()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_lists_missing_services() {
        let none = Credentials::new();
        assert!(!CredentialGate::new(&none).is_ready());
        assert_eq!(
            CredentialGate::new(&none).missing(),
            vec![Service::TextGeneration, Service::ImageGeneration]
        );

        let text_only = Credentials::new().with_gemini_key("g");
        assert_eq!(
            CredentialGate::new(&text_only).missing(),
            vec![Service::ImageGeneration]
        );

        let both = text_only.with_hf_token("h");
        let gate = CredentialGate::new(&both);
        assert!(gate.is_ready());
        assert!(gate.missing().is_empty());
    }

    #[test]
    fn guidance_maps_each_credential_to_its_capability() {
        let creds = Credentials::new();
        let guidance = CredentialGate::new(&creds).guidance();
        assert_eq!(guidance.len(), 2);
        assert!(guidance[0].starts_with("Google Gemini API Key"));
        assert!(guidance[0].contains("brand names"));
        assert!(guidance[1].starts_with("Hugging Face Token"));
        assert!(guidance[1].contains("logo"));
    }
}
