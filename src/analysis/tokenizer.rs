//! Streaming byte tokenizer
//!
//! Partitions an input byte stream into maximal runs of ASCII alphanumerics,
//! lowercasing on the fly. Anything else (whitespace, punctuation, bytes
//! above 0x7f) terminates the current token. The tokenizer is push-driven so
//! the caller can feed it straight from its own read buffer without
//! assembling the whole document in memory.

/// Maximum token length in bytes. A longer alphanumeric run keeps the first
/// 255 bytes and drops the tail; the run is never split into two tokens.
pub const MAX_TOKEN_LEN: usize = 255;

/// Incremental tokenizer over a stream of byte chunks.
///
/// State never crosses files: `finish` flushes the trailing token and leaves
/// the tokenizer ready for the next input.
#[derive(Default)]
pub struct Tokenizer {
    buf: Vec<u8>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(MAX_TOKEN_LEN),
        }
    }

    /// Feed one chunk, invoking `emit` for every token completed within it.
    pub fn feed<F: FnMut(&[u8])>(&mut self, chunk: &[u8], emit: &mut F) {
        for &c in chunk {
            if c.is_ascii_alphanumeric() {
                if self.buf.len() < MAX_TOKEN_LEN {
                    self.buf.push(c.to_ascii_lowercase());
                }
            } else if !self.buf.is_empty() {
                emit(&self.buf);
                self.buf.clear();
            }
        }
    }

    /// Flush the trailing token, if any, at end of input.
    pub fn finish<F: FnMut(&[u8])>(&mut self, emit: &mut F) {
        if !self.buf.is_empty() {
            emit(&self.buf);
            self.buf.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut tok = Tokenizer::new();
        let mut emit = |t: &[u8]| out.push(String::from_utf8(t.to_vec()).unwrap());
        tok.feed(text.as_bytes(), &mut emit);
        tok.finish(&mut emit);
        out
    }

    #[test]
    fn test_basic_tokenization() {
        assert_eq!(
            tokens("Hello, hello WORLD."),
            vec!["hello", "hello", "world"]
        );
    }

    #[test]
    fn test_digits_and_mixed_runs() {
        assert_eq!(tokens("abc123 4x4"), vec!["abc123", "4x4"]);
    }

    #[test]
    fn test_non_alnum_bytes_split_tokens() {
        assert_eq!(tokens("foo-bar_baz"), vec!["foo", "bar", "baz"]);
        assert_eq!(tokens("a\u{e9}b"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokens("").is_empty());
        assert!(tokens("... !!! ---").is_empty());
    }

    #[test]
    fn test_long_run_truncates_without_splitting() {
        let long = "a".repeat(400) + " b";
        let toks = tokens(&long);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].len(), MAX_TOKEN_LEN);
        assert_eq!(toks[1], "b");
    }

    #[test]
    fn test_token_spanning_chunks() {
        let mut out = Vec::new();
        let mut tok = Tokenizer::new();
        let mut emit = |t: &[u8]| out.push(t.to_vec());
        tok.feed(b"hel", &mut emit);
        tok.feed(b"lo world", &mut emit);
        tok.finish(&mut emit);
        assert_eq!(out, vec![b"hello".to_vec(), b"world".to_vec()]);
    }
}
