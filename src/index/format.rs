//! On-disk layouts shared by the build and read sides
//!
//! Three persistent files plus the temporary block format, each guarded by a
//! four-byte magic. Persistent headers carry a version and a 32-byte reserved
//! tail. All integers are little-endian.
//!
//! ```text
//! docs.bin     DOCS header | DocRec * doc_count  | string pool
//! lexicon.bin  LEXI header | LexRec * term_count | term pool
//! postings.bin POST header | u32 doc-ids, back to back
//! *.blk        BLK1 count  | (term_len u16, df u32, term, doc-ids) * count
//! ```

use std::io::{self, Read, Write};

pub const FORMAT_VERSION: u32 = 1;

pub const DOCS_MAGIC: &[u8; 4] = b"DOCS";
pub const LEX_MAGIC: &[u8; 4] = b"LEXI";
pub const POST_MAGIC: &[u8; 4] = b"POST";
pub const BLOCK_MAGIC: &[u8; 4] = b"BLK1";

pub const HEADER_RESERVED: usize = 32;

/// magic + version + count + pool bytes + reserved
pub const DOCS_HEADER_LEN: usize = 4 + 4 + 4 + 8 + HEADER_RESERVED;
pub const LEX_HEADER_LEN: usize = 4 + 4 + 4 + 8 + HEADER_RESERVED;
/// magic + version + reserved
pub const POST_HEADER_LEN: usize = 4 + 4 + HEADER_RESERVED;

pub const DOC_REC_LEN: usize = 8 + 4 + 8 + 4;
pub const LEX_REC_LEN: usize = 8 + 2 + 2 + 4 + 8 + 4 + 4;

/// Fixed record of the document directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocRec {
    pub title_off: u64,
    pub title_len: u32,
    pub url_off: u64,
    pub url_len: u32,
}

impl DocRec {
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.title_off.to_le_bytes())?;
        w.write_all(&self.title_len.to_le_bytes())?;
        w.write_all(&self.url_off.to_le_bytes())?;
        w.write_all(&self.url_len.to_le_bytes())
    }

    /// Decode from a buffer of at least `DOC_REC_LEN` bytes.
    pub fn parse(buf: &[u8]) -> Self {
        Self {
            title_off: u64_at(buf, 0),
            title_len: u32_at(buf, 8),
            url_off: u64_at(buf, 12),
            url_len: u32_at(buf, 20),
        }
    }
}

/// Fixed record of the lexicon. `flags` and `reserved` are written as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexRec {
    pub term_off: u64,
    pub term_len: u16,
    pub flags: u16,
    pub df: u32,
    pub postings_off: u64,
    pub postings_len: u32,
    pub reserved: u32,
}

impl LexRec {
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.term_off.to_le_bytes())?;
        w.write_all(&self.term_len.to_le_bytes())?;
        w.write_all(&self.flags.to_le_bytes())?;
        w.write_all(&self.df.to_le_bytes())?;
        w.write_all(&self.postings_off.to_le_bytes())?;
        w.write_all(&self.postings_len.to_le_bytes())?;
        w.write_all(&self.reserved.to_le_bytes())
    }

    /// Decode from a buffer of at least `LEX_REC_LEN` bytes.
    pub fn parse(buf: &[u8]) -> Self {
        Self {
            term_off: u64_at(buf, 0),
            term_len: u16_at(buf, 8),
            flags: u16_at(buf, 10),
            df: u32_at(buf, 12),
            postings_off: u64_at(buf, 16),
            postings_len: u32_at(buf, 24),
            reserved: u32_at(buf, 28),
        }
    }
}

/// Parsed header of `docs.bin` or `lexicon.bin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeader {
    pub count: u32,
    pub pool_bytes: u64,
}

fn write_table_header<W: Write>(
    w: &mut W,
    magic: &[u8; 4],
    count: u32,
    pool_bytes: u64,
) -> io::Result<()> {
    w.write_all(magic)?;
    w.write_all(&FORMAT_VERSION.to_le_bytes())?;
    w.write_all(&count.to_le_bytes())?;
    w.write_all(&pool_bytes.to_le_bytes())?;
    w.write_all(&[0u8; HEADER_RESERVED])
}

fn parse_table_header(buf: &[u8], magic: &[u8; 4]) -> Result<TableHeader, &'static str> {
    if buf.len() < DOCS_HEADER_LEN {
        return Err("truncated header");
    }
    if &buf[..4] != magic {
        return Err("bad magic");
    }
    if u32_at(buf, 4) != FORMAT_VERSION {
        return Err("unsupported version");
    }
    Ok(TableHeader {
        count: u32_at(buf, 8),
        pool_bytes: u64_at(buf, 12),
    })
}

pub fn write_docs_header<W: Write>(w: &mut W, doc_count: u32, pool_bytes: u64) -> io::Result<()> {
    write_table_header(w, DOCS_MAGIC, doc_count, pool_bytes)
}

pub fn parse_docs_header(buf: &[u8]) -> Result<TableHeader, &'static str> {
    parse_table_header(buf, DOCS_MAGIC)
}

pub fn write_lex_header<W: Write>(w: &mut W, term_count: u32, pool_bytes: u64) -> io::Result<()> {
    write_table_header(w, LEX_MAGIC, term_count, pool_bytes)
}

pub fn parse_lex_header(buf: &[u8]) -> Result<TableHeader, &'static str> {
    parse_table_header(buf, LEX_MAGIC)
}

pub fn write_post_header<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(POST_MAGIC)?;
    w.write_all(&FORMAT_VERSION.to_le_bytes())?;
    w.write_all(&[0u8; HEADER_RESERVED])
}

pub fn parse_post_header(buf: &[u8]) -> Result<(), &'static str> {
    if buf.len() < POST_HEADER_LEN {
        return Err("truncated header");
    }
    if &buf[..4] != POST_MAGIC {
        return Err("bad magic");
    }
    if u32_at(buf, 4) != FORMAT_VERSION {
        return Err("unsupported version");
    }
    Ok(())
}

pub(crate) fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    let mut b = [0u8; 2];
    r.read_exact(&mut b)?;
    Ok(u16::from_le_bytes(b))
}

pub(crate) fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

fn u16_at(buf: &[u8], off: usize) -> u16 {
    let mut b = [0u8; 2];
    b.copy_from_slice(&buf[off..off + 2]);
    u16::from_le_bytes(b)
}

fn u32_at(buf: &[u8], off: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&buf[off..off + 4]);
    u32::from_le_bytes(b)
}

fn u64_at(buf: &[u8], off: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[off..off + 8]);
    u64::from_le_bytes(b)
}
