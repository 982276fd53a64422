//! Text analysis: tokenization and stemming
//!
//! Both the indexing and query paths normalize text identically: maximal
//! ASCII-alphanumeric runs, lowercased, then Porter-stemmed. Keeping the two
//! sides symmetric is what makes `worlds` in a document findable by `world`
//! in a query.

mod stemmer;
mod tokenizer;

pub use stemmer::{stem, stem_str};
pub use tokenizer::{Tokenizer, MAX_TOKEN_LEN};
