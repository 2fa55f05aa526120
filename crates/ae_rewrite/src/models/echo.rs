use async_trait::async_trait;

use ae_core::Result;

use super::TextModel;

/// Deterministic offline model: wraps the prompt's first line in minimal
/// HTML. Lets the whole pipeline run without credentials.
#[derive(Debug, Default)]
pub struct EchoModel;

impl EchoModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextModel for EchoModel {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let first_line = prompt.lines().next().unwrap_or_default();
        Ok(format!(
            "<h2>Rewritten</h2><p>{}</p>",
            first_line
        ))
    }
}
