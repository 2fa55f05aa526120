pub mod clock;
pub mod error;
pub mod store;
pub mod types;

pub use clock::{Clock, NoopClock, SystemClock};
pub use error::Error;
pub use store::{ArticleFilter, ArticleStore};
pub use types::{Article, CompetitorResult, ExtractedContent};

pub type Result<T> = std::result::Result<T, Error>;
