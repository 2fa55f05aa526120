use std::sync::Arc;

use async_trait::async_trait;

use ae_core::{Error, Result};

pub mod echo;
pub mod gemini;

pub use echo::EchoModel;
pub use gemini::GeminiModel;

/// A generative-text backend: one prompt in, one text response out.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Cheap connectivity probe for `ae check`.
    async fn check(&self) -> Result<()> {
        self.generate("Say \"Hello, I am working!\"").await.map(|_| ())
    }
}

/// Creates a model by name. `echo` needs no credentials and is meant for
/// offline runs and tests.
pub fn create_model(name: &str, api_key: Option<String>) -> Result<Arc<dyn TextModel>> {
    match name {
        "gemini" => Ok(Arc::new(GeminiModel::new(api_key)?)),
        "echo" => Ok(Arc::new(EchoModel::new())),
        other => Err(Error::Generation(format!("unknown model: {}", other))),
    }
}
