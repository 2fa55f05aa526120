pub mod config;
pub mod orchestrator;

pub use config::PipelineConfig;
pub use orchestrator::{Orchestrator, RunSummary};

pub mod prelude {
    pub use super::config::PipelineConfig;
    pub use super::orchestrator::{Orchestrator, RunSummary};
    pub use ae_core::{Article, ArticleStore, Clock, Error, Result};
}
