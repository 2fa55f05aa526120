use std::sync::Arc;

use tracing::info;

use ae_core::{ExtractedContent, Result};

pub mod models;
pub mod prompt;

pub use models::{create_model, TextModel};
pub use prompt::build_prompt;

/// Turns one original article plus up to two competitor extracts into
/// rewritten HTML via a single text-model call.
///
/// No retry here; transient failures are the orchestrator's problem.
pub struct Rewriter {
    model: Arc<dyn TextModel>,
}

impl Rewriter {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn rewrite(
        &self,
        title: &str,
        content: &str,
        competitors: &[ExtractedContent],
    ) -> Result<String> {
        info!("✍️ Rewriting article: {}", title);
        let prompt = build_prompt(title, content, competitors);
        let rewritten = self.model.generate(&prompt).await?;
        info!("Article rewritten ({} chars)", rewritten.len());
        Ok(rewritten)
    }
}

pub mod prelude {
    pub use super::models::{create_model, TextModel};
    pub use super::Rewriter;
    pub use ae_core::{Error, ExtractedContent, Result};
}
