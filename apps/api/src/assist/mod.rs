//! AI Suggestion Adapter: summarize, suggest and import/rewrite.
//!
//! Each operation is a stateless request/response over a `LanguageModel`.
//! Every failure (transport, provider, unparseable reply) collapses into the
//! single `AiError` kind; provider text is kept only as diagnostic detail.

pub mod handlers;
pub mod import;
pub mod prompts;
pub mod suggest;
pub mod summarize;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Text-generation backend. `LlmClient` is the production implementation;
/// tests substitute canned replies.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete_json(&self, prompt: &str, system: &str)
        -> Result<serde_json::Value, LlmError>;
}

#[derive(Debug, Error)]
#[error("AI generation failed")]
pub struct AiError {
    pub detail: String,
}

impl AiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<LlmError> for AiError {
    fn from(err: LlmError) -> Self {
        AiError::new(err.to_string())
    }
}

/// Calls the model and decodes its JSON reply into `T`.
pub(crate) async fn complete<T: serde::de::DeserializeOwned>(
    model: &dyn LanguageModel,
    prompt: &str,
    system: &str,
) -> Result<T, AiError> {
    let value = model.complete_json(prompt, system).await?;
    serde_json::from_value(value).map_err(|e| AiError::new(format!("unexpected reply shape: {e}")))
}
