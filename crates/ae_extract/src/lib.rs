pub mod extractor;
pub mod fetch;

pub use extractor::ContentExtractor;
pub use fetch::{HttpFetcher, PageFetcher};

pub mod prelude {
    pub use super::extractor::ContentExtractor;
    pub use super::fetch::PageFetcher;
    pub use ae_core::{Error, ExtractedContent, Result};
}
