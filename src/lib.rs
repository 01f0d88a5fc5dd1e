//! Logoflow: brand name candidates from a text-generation model and a logo for
//! the chosen name from a text-to-image model.
//!
//! ```no_run
//! use logoflow::{branding, ApiKey, LogoflowClient, ServiceConfig};
//!
//! # async fn demo() -> logoflow::Result<()> {
//! let client = LogoflowClient::from_config(&ServiceConfig::from_env())?;
//! let key = ApiKey::new(std::env::var("GOOGLE_API_KEY").unwrap_or_default());
//! let names = branding::generate_names(client.text(), "A bakery for night owls", None, key.as_ref()).await?;
//! println!("{:?}", names);
//! # Ok(())
//! # }
//! ```

pub mod branding;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;

pub use clients::{GeminiTextClient, HuggingFaceImageClient, ImageGenerator, LogoflowClient, TextGenerator};
pub use config::{ApiKey, Credentials, ServerConfig, ServiceConfig};
pub use error::{LogoflowError, Result};
pub use models::*;
