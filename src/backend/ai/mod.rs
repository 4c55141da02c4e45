//! # AI Layer
//!
//! Seam to the language-model collaborator. The domain layer builds a
//! prompt string from a financial snapshot, sends it through
//! [`LanguageModel`], and gets markdown-flavored prose back. Outline
//! responses may embed a sentinel-delimited JSON block; [`outline`]
//! extracts it.

pub mod http;
pub mod outline;
pub mod prompts;

use anyhow::Result;
use async_trait::async_trait;

pub use http::GenerativeClient;

/// A text-generation collaborator: prompt in, prose out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
