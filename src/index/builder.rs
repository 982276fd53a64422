//! Index build driver
//!
//! Streams the manifest line by line: each entry gets a dense doc-id, its
//! corpus file is tokenized and stemmed, and the per-document dedup set
//! gates one posting append per distinct term. After every document the term
//! table's approximate footprint is checked against the memory budget and a
//! sorted block is flushed when it is reached. Once the manifest is
//! exhausted the remaining table is flushed, `docs.bin` is written, and the
//! blocks are merged into the final lexicon and postings files.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::block::write_block;
use super::doc_set::DocTermSet;
use super::docs::DocsBuilder;
use super::manifest;
use super::merge::merge_blocks;
use super::term_table::TermTable;
use crate::analysis::{stem, Tokenizer};
use crate::error::{CuttleError, Result};

const READ_BUF_BYTES: usize = 1 << 20;

/// Build parameters. Defaults mirror the CLI defaults.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    pub manifest: PathBuf,
    pub corpus_dir: PathBuf,
    pub out_dir: PathBuf,
    pub mem_budget_bytes: u64,
    pub report_every_bytes: u64,
}

impl IndexConfig {
    pub fn new(manifest: impl Into<PathBuf>, corpus_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            corpus_dir: corpus_dir.into(),
            out_dir: PathBuf::from("out"),
            mem_budget_bytes: 512 << 20,
            report_every_bytes: 200 << 20,
        }
    }
}

/// Counters reported when a build completes.
#[derive(Clone, Copy, Debug)]
pub struct IndexStats {
    pub doc_count: u32,
    pub total_bytes: u64,
    pub total_tokens: u64,
    pub avg_unique_terms_per_doc: f64,
    pub blocks_written: u32,
    pub term_count: u32,
    pub postings_bytes: u64,
    pub elapsed: Duration,
}

pub struct IndexBuilder {
    config: IndexConfig,
    blocks_dir: PathBuf,
    docs: DocsBuilder,
    terms: TermTable,
    seen: DocTermSet,
    tokenizer: Tokenizer,
    scratch: Vec<u8>,
    read_buf: Vec<u8>,
    block_id: u32,
    total_bytes: u64,
    total_tokens: u64,
    unique_terms_sum: u64,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        let blocks_dir = config.out_dir.join("blocks");
        Self {
            config,
            blocks_dir,
            docs: DocsBuilder::new(),
            terms: TermTable::new(),
            seen: DocTermSet::new(),
            tokenizer: Tokenizer::new(),
            scratch: Vec::new(),
            read_buf: vec![0u8; READ_BUF_BYTES],
            block_id: 0,
            total_bytes: 0,
            total_tokens: 0,
            unique_terms_sum: 0,
        }
    }

    /// Run the whole build and return its statistics.
    pub fn run(mut self) -> Result<IndexStats> {
        let start = Instant::now();
        fs::create_dir_all(&self.config.out_dir)?;
        fs::create_dir_all(&self.blocks_dir)?;

        let manifest_file = File::open(&self.config.manifest)
            .map_err(|err| CuttleError::manifest(&self.config.manifest, err))?;
        let mut next_report = self.config.report_every_bytes;

        for line in BufReader::new(manifest_file).lines() {
            let line = line?;
            let Some(entry) = manifest::parse_line(&line) else {
                continue;
            };
            let doc_id = self.docs.add_doc(&entry.title, &entry.url);
            let doc_path = self.config.corpus_dir.join(format!("{}.txt", entry.doc_id));
            self.process_doc(&doc_path, doc_id)?;

            if next_report > 0 && self.total_bytes >= next_report {
                self.report_progress(start.elapsed());
                next_report += self.config.report_every_bytes;
            }
            if self.terms.approx_mem_bytes() as u64 >= self.config.mem_budget_bytes {
                self.flush_block()?;
            }
        }

        if !self.terms.is_empty() {
            self.flush_block()?;
        }

        self.docs.write_to(&self.config.out_dir.join("docs.bin"))?;

        info!("merging {} blocks", self.block_id);
        let merge = merge_blocks(
            &self.blocks_dir,
            &self.config.out_dir.join("lexicon.bin"),
            &self.config.out_dir.join("postings.bin"),
        )?;
        info!(
            "lexicon: {} terms, avg term len {:.3}, postings {} bytes",
            merge.term_count, merge.avg_term_len, merge.postings_bytes
        );

        let elapsed = start.elapsed();
        let doc_count = self.docs.doc_count();
        let stats = IndexStats {
            doc_count,
            total_bytes: self.total_bytes,
            total_tokens: self.total_tokens,
            avg_unique_terms_per_doc: if doc_count > 0 {
                self.unique_terms_sum as f64 / doc_count as f64
            } else {
                0.0
            },
            blocks_written: self.block_id,
            term_count: merge.term_count,
            postings_bytes: merge.postings_bytes,
            elapsed,
        };
        info!(
            "done: docs={} bytes={} tokens={} avg_unique_terms/doc={:.1} time={:.2}s",
            stats.doc_count,
            stats.total_bytes,
            stats.total_tokens,
            stats.avg_unique_terms_per_doc,
            elapsed.as_secs_f64()
        );
        Ok(stats)
    }

    /// Tokenize and ingest one corpus file. A missing file is a warning: the
    /// doc-id stays assigned with an empty contribution.
    fn process_doc(&mut self, path: &Path, doc_id: u32) -> Result<()> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(err) => {
                warn!("cannot open {}: {}", path.display(), err);
                return Ok(());
            }
        };

        let Self {
            terms,
            seen,
            tokenizer,
            scratch,
            read_buf,
            total_bytes,
            total_tokens,
            unique_terms_sum,
            ..
        } = self;

        seen.reset();
        let mut unique_in_doc = 0u64;
        let mut emit = |token: &[u8]| {
            *total_tokens += 1;
            scratch.clear();
            scratch.extend_from_slice(token);
            stem(scratch);
            if scratch.is_empty() {
                return;
            }
            if !seen.contains_or_add(scratch) {
                terms.add_posting(scratch, doc_id);
                unique_in_doc += 1;
            }
        };

        loop {
            let n = file.read(read_buf)?;
            if n == 0 {
                break;
            }
            *total_bytes += n as u64;
            tokenizer.feed(&read_buf[..n], &mut emit);
        }
        tokenizer.finish(&mut emit);
        drop(emit);

        *unique_terms_sum += unique_in_doc;
        Ok(())
    }

    fn flush_block(&mut self) -> Result<()> {
        let path = self.blocks_dir.join(format!("block_{:04}.blk", self.block_id));
        info!(
            "flushing {} ({} terms, ~{} of table memory)",
            path.display(),
            self.terms.len(),
            format_mb(self.terms.approx_mem_bytes() as u64)
        );
        write_block(&path, &self.terms)?;
        self.terms.clear();
        self.block_id += 1;
        Ok(())
    }

    fn report_progress(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        let kb = self.total_bytes as f64 / 1024.0;
        let doc_count = self.docs.doc_count();
        let avg_unique = if doc_count > 0 {
            self.unique_terms_sum as f64 / doc_count as f64
        } else {
            0.0
        };
        info!(
            "progress: docs={} bytes={} tokens={} avg_unique_terms/doc={:.1} terms_in_table={} mem~{} speed={:.1} KB/s",
            doc_count,
            self.total_bytes,
            self.total_tokens,
            avg_unique,
            self.terms.len(),
            format_mb(self.terms.approx_mem_bytes() as u64),
            if secs > 0.0 { kb / secs } else { 0.0 }
        );
    }
}

fn format_mb(bytes: u64) -> String {
    format!("{} MB", bytes >> 20)
}
