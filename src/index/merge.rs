//! External k-way merge of block files
//!
//! All `.blk` files are opened as streaming readers and drained in
//! lexicographic term order. Readers positioned at the same term contribute
//! their doc-id lists to one sorted union, which is appended to
//! `postings.bin` as a contiguous run; the lexicon collects (term, offset,
//! length) records and is written sorted once every reader is exhausted.
//!
//! Per-block sorting makes the merge linear and streaming: memory per block
//! is one term's name and postings, regardless of corpus size.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::arena::Arena;
use super::block::BlockReader;
use super::format::{write_lex_header, write_post_header, LexRec, POST_HEADER_LEN};
use crate::error::Result;
use crate::postings;

/// Summary of a completed merge.
#[derive(Clone, Copy, Debug)]
pub struct MergeStats {
    pub term_count: u32,
    pub avg_term_len: f64,
    pub postings_bytes: u64,
}

#[derive(Default)]
struct LexiconBuilder {
    recs: Vec<LexRec>,
    pool: Arena,
    sum_term_len: u64,
}

impl LexiconBuilder {
    fn add_term(&mut self, term: &[u8], postings_off: u64, postings_len: u32) {
        let term_off = self.pool.used() as u64;
        self.pool.add(term);
        self.recs.push(LexRec {
            term_off,
            term_len: term.len() as u16,
            flags: 0,
            df: postings_len,
            postings_off,
            postings_len,
            reserved: 0,
        });
        self.sum_term_len += term.len() as u64;
    }

    fn avg_term_len(&self) -> f64 {
        if self.recs.is_empty() {
            0.0
        } else {
            self.sum_term_len as f64 / self.recs.len() as f64
        }
    }

    /// Sort records by (bytes, length) and write `lexicon.bin`.
    fn write_to(&mut self, path: &Path) -> Result<()> {
        let LexiconBuilder { recs, pool, .. } = self;
        recs.sort_unstable_by(|a, b| {
            pool.get(a.term_off as usize, a.term_len as usize)
                .cmp(pool.get(b.term_off as usize, b.term_len as usize))
        });

        let mut w = BufWriter::new(File::create(path)?);
        write_lex_header(&mut w, recs.len() as u32, pool.used() as u64)?;
        for rec in recs.iter() {
            rec.write_to(&mut w)?;
        }
        w.write_all(pool.bytes())?;
        w.flush()?;
        Ok(())
    }
}

fn block_paths(blocks_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(blocks_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "blk") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Merge every block under `blocks_dir` into the final lexicon and postings
/// files. A build that never flushed (empty corpus) still produces both
/// files with valid headers and zero terms.
pub fn merge_blocks(
    blocks_dir: &Path,
    lexicon_path: &Path,
    postings_path: &Path,
) -> Result<MergeStats> {
    let mut readers = block_paths(blocks_dir)?
        .iter()
        .map(|p| BlockReader::open(p))
        .collect::<Result<Vec<_>>>()?;

    let mut w = BufWriter::new(File::create(postings_path)?);
    write_post_header(&mut w)?;
    let mut cursor = POST_HEADER_LEN as u64;
    let mut lex = LexiconBuilder::default();

    loop {
        let smallest: Option<Vec<u8>> = readers
            .iter()
            .filter_map(|r| r.current())
            .map(|e| e.term.clone())
            .min();
        let Some(term) = smallest else { break };

        // union of every reader positioned at this term
        let mut merged: Vec<u32> = Vec::new();
        for reader in readers.iter_mut() {
            if reader.current().is_some_and(|e| e.term == term) {
                if let Some(entry) = reader.pop()? {
                    merged = if merged.is_empty() {
                        entry.docs
                    } else {
                        postings::union(&merged, &entry.docs)
                    };
                }
            }
        }

        for &doc_id in &merged {
            w.write_all(&doc_id.to_le_bytes())?;
        }
        lex.add_term(&term, cursor, merged.len() as u32);
        cursor += merged.len() as u64 * 4;
    }

    w.flush()?;
    lex.write_to(lexicon_path)?;

    Ok(MergeStats {
        term_count: lex.recs.len() as u32,
        avg_term_len: lex.avg_term_len(),
        postings_bytes: cursor,
    })
}
