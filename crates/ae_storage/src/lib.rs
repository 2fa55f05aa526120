use std::sync::Arc;

use ae_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::api::ApiStore;
pub use backends::memory::MemoryStore;

/// Creates a store by name. `api` talks to the remote CRUD service and
/// needs its base url; `memory` is self-contained.
pub fn create_store(kind: &str, base_url: Option<&str>) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "api" => {
            let base_url = base_url
                .ok_or_else(|| Error::Storage("api store requires a base url".to_string()))?;
            Ok(Arc::new(ApiStore::new(base_url)?))
        }
        other => Err(Error::Storage(format!("unknown store backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::{create_store, ApiStore, MemoryStore};
    pub use ae_core::{Article, ArticleFilter, ArticleStore, Error, Result};
}
