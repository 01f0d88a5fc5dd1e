//! The branding pipeline: credential gate, name generation, name selection and
//! logo generation. Everything here is independent of the web layer.

pub mod gate;
pub mod logo;
pub mod names;
pub mod prompt;
pub mod session;

pub use gate::{CredentialGate, Service};
pub use logo::generate_logo;
pub use names::{generate_names, parse_candidates, MAX_CANDIDATES};
pub use prompt::{logo_prompt, name_prompt, LOGO_STYLE};
pub use session::{Session, SessionId, SessionStore, DEFAULT_IDLE_TIMEOUT};
