//! Temporary block files
//!
//! Each memory-triggered flush writes the live term table, sorted
//! lexicographically, as one `.blk` file; the merger later streams all of
//! them back. A block is written once and read once, never rewritten.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::format::{read_u16, read_u32, BLOCK_MAGIC};
use super::term_table::TermTable;
use crate::error::{CuttleError, Result};

/// Flush `table` to `path`, sorted by (bytes, length). Returns the number of
/// terms written. The caller clears the table afterwards.
pub fn write_block(path: &Path, table: &TermTable) -> Result<u32> {
    let entries = table.sorted_entries();
    let mut w = BufWriter::new(File::create(path)?);

    w.write_all(BLOCK_MAGIC)?;
    w.write_all(&(entries.len() as u32).to_le_bytes())?;
    for (term, docs) in &entries {
        w.write_all(&(term.len() as u16).to_le_bytes())?;
        w.write_all(&(docs.len() as u32).to_le_bytes())?;
        w.write_all(term)?;
        for &doc_id in *docs {
            w.write_all(&doc_id.to_le_bytes())?;
        }
    }
    w.flush()?;
    Ok(entries.len() as u32)
}

/// One decoded term of a block file.
pub struct BlockEntry {
    pub term: Vec<u8>,
    pub docs: Vec<u32>,
}

/// Streaming reader over one block file, holding one term at a time.
pub struct BlockReader {
    r: BufReader<File>,
    remaining: u32,
    current: Option<BlockEntry>,
}

impl BlockReader {
    pub fn open(path: &Path) -> Result<Self> {
        let mut r = BufReader::new(File::open(path)?);
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != BLOCK_MAGIC {
            return Err(CuttleError::format(path, "bad block magic"));
        }
        let remaining = read_u32(&mut r)?;
        let mut reader = Self {
            r,
            remaining,
            current: None,
        };
        reader.load_next()?;
        Ok(reader)
    }

    /// The entry under the cursor; `None` once the block is exhausted.
    pub fn current(&self) -> Option<&BlockEntry> {
        self.current.as_ref()
    }

    /// Take the current entry and advance the cursor.
    pub fn pop(&mut self) -> Result<Option<BlockEntry>> {
        let entry = self.current.take();
        self.load_next()?;
        Ok(entry)
    }

    fn load_next(&mut self) -> Result<()> {
        if self.remaining == 0 {
            self.current = None;
            return Ok(());
        }
        let term_len = read_u16(&mut self.r)? as usize;
        let df = read_u32(&mut self.r)? as usize;
        let mut term = vec![0u8; term_len];
        self.r.read_exact(&mut term)?;
        let mut docs = Vec::with_capacity(df);
        for _ in 0..df {
            docs.push(read_u32(&mut self.r)?);
        }
        self.remaining -= 1;
        self.current = Some(BlockEntry { term, docs });
        Ok(())
    }
}
