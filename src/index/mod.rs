//! Bounded-memory inverted index: build side and read side
//!
//! The builder streams documents from a manifest, accumulating postings in an
//! open-addressed term table until a memory budget is hit, then spills a
//! lexicographically sorted block file. When the manifest is exhausted the
//! blocks are k-way merged into the final three artifacts:
//!
//! - `docs.bin`: doc-id -> (title, url) directory
//! - `lexicon.bin`: sorted term directory with postings offsets
//! - `postings.bin`: concatenated sorted doc-id runs
//!
//! `IndexReader` loads the three files back and serves term lookups for the
//! query engine.

mod arena;
mod block;
mod builder;
mod doc_set;
mod docs;
mod format;
mod manifest;
mod merge;
mod reader;
mod term_table;

pub use arena::*;
pub use block::*;
pub use builder::*;
pub use doc_set::*;
pub use docs::*;
pub use format::*;
pub use manifest::*;
pub use merge::*;
pub use reader::*;
pub use term_table::*;
