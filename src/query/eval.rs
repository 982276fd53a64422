//! Postfix stack machine
//!
//! Operands are owned sorted doc-id vectors. A term pushes a copy of its
//! postings run (or an empty list when absent); NOT complements against
//! `[0, doc_count)`; AND and OR are the two-pointer combinators, with the
//! cheap shortcuts for empty inputs. Popping an empty stack yields an empty
//! operand, and anything left on the stack beyond the result is dropped.

use super::rpn::{to_rpn, RpnItem};
use crate::index::IndexReader;
use crate::postings::{complement, intersect, union};

/// One result row: the doc-id with its directory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub doc_id: u32,
    pub title: String,
    pub url: String,
}

/// A page of results plus the total match count.
#[derive(Clone, Debug, Default)]
pub struct SearchResults {
    pub total_hits: u32,
    pub hits: Vec<SearchHit>,
}

/// Evaluate a postfix query to the full sorted doc-id result list.
pub fn evaluate(index: &IndexReader, rpn: &[RpnItem]) -> Vec<u32> {
    let mut stack: Vec<Vec<u32>> = Vec::new();
    for item in rpn {
        match item {
            RpnItem::Term(term) => {
                stack.push(index.term_postings(term.as_bytes()).to_vec());
            }
            RpnItem::Not => {
                let a = stack.pop().unwrap_or_default();
                stack.push(complement(&a, index.doc_count()));
            }
            RpnItem::And => {
                let b = stack.pop().unwrap_or_default();
                let a = stack.pop().unwrap_or_default();
                if a.is_empty() || b.is_empty() {
                    stack.push(Vec::new());
                } else {
                    stack.push(intersect(&a, &b));
                }
            }
            RpnItem::Or => {
                let b = stack.pop().unwrap_or_default();
                let a = stack.pop().unwrap_or_default();
                if a.is_empty() {
                    stack.push(b);
                } else if b.is_empty() {
                    stack.push(a);
                } else {
                    stack.push(union(&a, &b));
                }
            }
        }
    }
    stack.pop().unwrap_or_default()
}

/// Parse, evaluate, and page one query line.
pub fn search(index: &IndexReader, line: &str, offset: u32, limit: u32) -> SearchResults {
    let rpn = to_rpn(line);
    let ids = evaluate(index, &rpn);
    let total_hits = ids.len() as u32;

    let mut hits = Vec::new();
    for &doc_id in ids.iter().skip(offset as usize) {
        if hits.len() as u32 >= limit {
            break;
        }
        if doc_id >= index.doc_count() {
            continue;
        }
        hits.push(SearchHit {
            doc_id,
            title: index.doc_title(doc_id).to_string(),
            url: index.doc_url(doc_id).to_string(),
        });
    }
    SearchResults { total_hits, hits }
}
