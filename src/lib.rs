pub mod analysis;
pub mod error;
pub mod index;
pub mod postings;
pub mod query;

pub use analysis::{stem, Tokenizer};
pub use error::{CuttleError, Result};
pub use index::{IndexBuilder, IndexConfig, IndexReader, IndexStats};
pub use query::{search, SearchHit, SearchResults};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
