//! Read side of the on-disk index
//!
//! Loads `docs.bin`, `lexicon.bin`, and `postings.bin` wholly into memory,
//! validating magic and version on each. Term lookup is a binary search over
//! the sorted lexicon records; postings access is range-checked so that a
//! corrupt record yields an empty list rather than an out-of-bounds read.

use std::path::Path;

use super::format::{
    parse_docs_header, parse_lex_header, parse_post_header, DocRec, LexRec, DOCS_HEADER_LEN,
    DOC_REC_LEN, LEX_HEADER_LEN, LEX_REC_LEN, POST_HEADER_LEN,
};
use crate::error::{CuttleError, Result};

pub struct IndexReader {
    doc_recs: Vec<DocRec>,
    doc_pool: Vec<u8>,
    lex_recs: Vec<LexRec>,
    term_pool: Vec<u8>,
    postings: Vec<u32>,
}

impl IndexReader {
    /// Load the three index files from `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        let docs_path = dir.join("docs.bin");
        let data = std::fs::read(&docs_path)?;
        let header =
            parse_docs_header(&data).map_err(|reason| CuttleError::format(&docs_path, reason))?;
        let recs_end = DOCS_HEADER_LEN + header.count as usize * DOC_REC_LEN;
        let pool_end = recs_end + header.pool_bytes as usize;
        if pool_end > data.len() {
            return Err(CuttleError::format(&docs_path, "truncated file"));
        }
        let doc_recs: Vec<DocRec> = (0..header.count as usize)
            .map(|i| DocRec::parse(&data[DOCS_HEADER_LEN + i * DOC_REC_LEN..]))
            .collect();
        let doc_pool = data[recs_end..pool_end].to_vec();

        let lex_path = dir.join("lexicon.bin");
        let data = std::fs::read(&lex_path)?;
        let header =
            parse_lex_header(&data).map_err(|reason| CuttleError::format(&lex_path, reason))?;
        let recs_end = LEX_HEADER_LEN + header.count as usize * LEX_REC_LEN;
        let pool_end = recs_end + header.pool_bytes as usize;
        if pool_end > data.len() {
            return Err(CuttleError::format(&lex_path, "truncated file"));
        }
        let lex_recs: Vec<LexRec> = (0..header.count as usize)
            .map(|i| LexRec::parse(&data[LEX_HEADER_LEN + i * LEX_REC_LEN..]))
            .collect();
        let term_pool = data[recs_end..pool_end].to_vec();

        let post_path = dir.join("postings.bin");
        let data = std::fs::read(&post_path)?;
        parse_post_header(&data).map_err(|reason| CuttleError::format(&post_path, reason))?;
        let postings: Vec<u32> = data[POST_HEADER_LEN..]
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            doc_recs,
            doc_pool,
            lex_recs,
            term_pool,
            postings,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.doc_recs.len() as u32
    }

    pub fn term_count(&self) -> u32 {
        self.lex_recs.len() as u32
    }

    pub fn doc_title(&self, doc_id: u32) -> &str {
        self.doc_recs
            .get(doc_id as usize)
            .and_then(|r| self.pool_str(&self.doc_pool, r.title_off, r.title_len))
            .unwrap_or("")
    }

    pub fn doc_url(&self, doc_id: u32) -> &str {
        self.doc_recs
            .get(doc_id as usize)
            .and_then(|r| self.pool_str(&self.doc_pool, r.url_off, r.url_len))
            .unwrap_or("")
    }

    /// Binary search for `term` under the (bytes, length) order of the
    /// lexicon, returning the record index.
    pub fn find_term(&self, term: &[u8]) -> Option<usize> {
        self.lex_recs
            .binary_search_by(|rec| self.term_bytes(rec).cmp(term))
            .ok()
    }

    pub fn lex_rec(&self, index: usize) -> &LexRec {
        &self.lex_recs[index]
    }

    /// The term bytes of a lexicon record.
    pub fn term_bytes(&self, rec: &LexRec) -> &[u8] {
        let start = rec.term_off as usize;
        self.term_pool
            .get(start..start + rec.term_len as usize)
            .unwrap_or(&[])
    }

    /// The postings run of a lexicon record; empty when the recorded range
    /// escapes the postings file.
    pub fn postings(&self, rec: &LexRec) -> &[u32] {
        let Some(byte_off) = rec.postings_off.checked_sub(POST_HEADER_LEN as u64) else {
            return &[];
        };
        if byte_off % 4 != 0 {
            return &[];
        }
        let start = (byte_off / 4) as usize;
        let end = start + rec.postings_len as usize;
        self.postings.get(start..end).unwrap_or(&[])
    }

    /// Postings for `term`, or empty when absent.
    pub fn term_postings(&self, term: &[u8]) -> &[u32] {
        match self.find_term(term) {
            Some(i) => self.postings(&self.lex_recs[i]),
            None => &[],
        }
    }

    fn pool_str<'a>(&self, pool: &'a [u8], off: u64, len: u32) -> Option<&'a str> {
        let start = off as usize;
        let bytes = pool.get(start..start + len as usize)?;
        std::str::from_utf8(bytes).ok()
    }
}
