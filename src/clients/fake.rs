//! In-memory generators for tests. They record every call so tests can prove
//! that nothing reached the network.

use super::{ImageGenerator, TextGenerator};
use crate::{
    config::ApiKey,
    error::{LogoflowError, Result},
    models::LogoArtifact,
};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub enum FakeReply {
    Ok(String),
    NotFound,
    Fail(u16, String),
}

impl FakeReply {
    fn to_result(&self, model: &str) -> Result<String> {
        match self {
            FakeReply::Ok(s) => Ok(s.clone()),
            FakeReply::NotFound => Err(LogoflowError::ModelNotFound {
                model: model.to_string(),
            }),
            FakeReply::Fail(status, message) => Err(LogoflowError::ServiceError {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

pub struct FakeTextGenerator {
    reply: Mutex<FakeReply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTextGenerator {
    pub fn replying(reply: &str) -> Self {
        Self::with(FakeReply::Ok(reply.to_string()))
    }

    pub fn with(reply: FakeReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: FakeReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate_text(&self, api_key: &ApiKey, model: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.expose().to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        let reply = self.reply.lock().unwrap().clone();
        reply.to_result(model)
    }
}

pub struct FakeImageGenerator {
    reply: Mutex<FakeReply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeImageGenerator {
    /// Replies with the given bytes as a PNG.
    pub fn png(bytes: &str) -> Self {
        Self::with(FakeReply::Ok(bytes.to_string()))
    }

    pub fn with(reply: FakeReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate_image(
        &self,
        api_key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> Result<LogoArtifact> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.expose().to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        let reply = self.reply.lock().unwrap().clone();
        reply.to_result(model).map(|data| LogoArtifact {
            data: data.into_bytes(),
            mime_type: "image/png".to_string(),
            model: model.to_string(),
        })
    }
}
