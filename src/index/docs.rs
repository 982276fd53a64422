//! Document directory builder
//!
//! Append-only mapping from dense doc-id to (title, url). Strings are
//! concatenated into a pool, offsets captured before each write; the doc-id
//! is the record's position in insertion order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::arena::Arena;
use super::format::{write_docs_header, DocRec};
use crate::error::Result;

#[derive(Default)]
pub struct DocsBuilder {
    recs: Vec<DocRec>,
    pool: Arena,
}

impl DocsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and return its doc-id.
    pub fn add_doc(&mut self, title: &str, url: &str) -> u32 {
        let title_off = self.pool.used() as u64;
        self.pool.add(title.as_bytes());
        let url_off = self.pool.used() as u64;
        self.pool.add(url.as_bytes());
        self.recs.push(DocRec {
            title_off,
            title_len: title.len() as u32,
            url_off,
            url_len: url.len() as u32,
        });
        (self.recs.len() - 1) as u32
    }

    pub fn doc_count(&self) -> u32 {
        self.recs.len() as u32
    }

    /// Emit `docs.bin`: header, record array, string pool.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        write_docs_header(&mut w, self.doc_count(), self.pool.used() as u64)?;
        for rec in &self.recs {
            rec.write_to(&mut w)?;
        }
        w.write_all(self.pool.bytes())?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::format::{parse_docs_header, DOCS_HEADER_LEN, DOC_REC_LEN};

    #[test]
    fn test_doc_ids_are_dense() {
        let mut docs = DocsBuilder::new();
        assert_eq!(docs.add_doc("first", "http://a"), 0);
        assert_eq!(docs.add_doc("second", ""), 1);
        assert_eq!(docs.add_doc("third", "http://c"), 2);
        assert_eq!(docs.doc_count(), 3);
    }

    #[test]
    fn test_written_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.bin");

        let mut docs = DocsBuilder::new();
        docs.add_doc("title one", "http://one");
        docs.add_doc("title two", "http://two");
        docs.write_to(&path).unwrap();

        let data = std::fs::read(&path).unwrap();
        let header = parse_docs_header(&data).unwrap();
        assert_eq!(header.count, 2);

        let rec = DocRec::parse(&data[DOCS_HEADER_LEN..]);
        let pool = &data[DOCS_HEADER_LEN + 2 * DOC_REC_LEN..];
        assert_eq!(pool.len() as u64, header.pool_bytes);
        let title = &pool[rec.title_off as usize..(rec.title_off + rec.title_len as u64) as usize];
        let url = &pool[rec.url_off as usize..(rec.url_off + rec.url_len as u64) as usize];
        assert_eq!(title, b"title one");
        assert_eq!(url, b"http://one");
    }

    #[test]
    fn test_empty_directory_still_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.bin");
        DocsBuilder::new().write_to(&path).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), DOCS_HEADER_LEN);
        assert_eq!(parse_docs_header(&data).unwrap().count, 0);
    }
}
