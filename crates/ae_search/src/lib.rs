pub mod fallback;
pub mod finder;
pub mod keywords;

pub use fallback::fallback_competitors;
pub use finder::{CompetitorFinder, GoogleSearch, SearchBackend, SearchError, SearchItem};
pub use keywords::{extract_keywords, relaxed_query};

pub mod prelude {
    pub use super::finder::{CompetitorFinder, SearchBackend};
    pub use ae_core::{CompetitorResult, Error, Result};
}
