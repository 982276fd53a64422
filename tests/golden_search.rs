//! End-to-end golden results: build a small corpus on disk, load it back,
//! and pin the Boolean query semantics, including the stemming behavior
//! shared by the build and query paths.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use cuttle::query::to_rpn;
use cuttle::{search, IndexBuilder, IndexConfig, IndexReader};

fn build_index(dir: &Path, docs: &[(&str, &str, &str)]) -> IndexReader {
    let corpus = dir.join("corpus");
    fs::create_dir_all(&corpus).unwrap();
    let manifest_path = dir.join("manifest.jsonl");
    let mut manifest = fs::File::create(&manifest_path).unwrap();
    for (doc_id, title, text) in docs {
        fs::write(corpus.join(format!("{}.txt", doc_id)), text).unwrap();
        let line = json!({
            "doc_id": doc_id,
            "title": title,
            "url": format!("http://example.com/{}", doc_id),
        });
        writeln!(manifest, "{}", line).unwrap();
    }
    drop(manifest);

    let mut config = IndexConfig::new(manifest_path, corpus);
    config.out_dir = dir.join("out");
    IndexBuilder::new(config).run().unwrap();
    IndexReader::open(&dir.join("out")).unwrap()
}

fn greetings_fixture() -> (TempDir, IndexReader) {
    let tmp = TempDir::new().unwrap();
    let index = build_index(
        tmp.path(),
        &[
            ("A", "Doc A", "Hello, hello WORLD."),
            ("B", "Doc B", "world of worlds"),
            ("C", "Doc C", "greetings"),
        ],
    );
    (tmp, index)
}

fn ids(index: &IndexReader, query: &str) -> Vec<u32> {
    cuttle::query::evaluate(index, &to_rpn(query))
}

#[test]
fn golden_single_terms() {
    let (_tmp, index) = greetings_fixture();

    assert_eq!(ids(&index, "hello"), vec![0]);
    // `world` and `worlds` are stored under the common stem
    assert_eq!(ids(&index, "world"), vec![0, 1]);
    assert_eq!(ids(&index, "worlds"), vec![0, 1]);
    assert_eq!(ids(&index, "greetings"), vec![2]);
    assert_eq!(ids(&index, "greeting"), vec![2]);
}

#[test]
fn golden_boolean_operators() {
    let (_tmp, index) = greetings_fixture();

    assert_eq!(ids(&index, "hello & world"), vec![0]);
    assert_eq!(ids(&index, "hello | greetings"), vec![0, 2]);
    assert_eq!(ids(&index, "!hello"), vec![1, 2]);
    assert_eq!(ids(&index, "(hello | greetings) & !world"), vec![2]);
}

#[test]
fn golden_implicit_and() {
    let (_tmp, index) = greetings_fixture();

    assert_eq!(ids(&index, "hello world"), ids(&index, "hello & world"));
    assert_eq!(
        ids(&index, "hello !world"),
        ids(&index, "hello & !world")
    );
}

#[test]
fn golden_queries_with_no_terms() {
    let (_tmp, index) = greetings_fixture();

    assert!(ids(&index, "").is_empty());
    assert!(ids(&index, "?.,").is_empty());

    let results = search(&index, "...", 0, 50);
    assert_eq!(results.total_hits, 0);
    assert!(results.hits.is_empty());
}

#[test]
fn golden_result_rows_carry_directory_entries() {
    let (_tmp, index) = greetings_fixture();

    let results = search(&index, "world", 0, 50);
    assert_eq!(results.total_hits, 2);
    assert_eq!(results.hits[0].doc_id, 0);
    assert_eq!(results.hits[0].title, "Doc A");
    assert_eq!(results.hits[0].url, "http://example.com/A");
    assert_eq!(results.hits[1].doc_id, 1);
    assert_eq!(results.hits[1].title, "Doc B");
}

#[test]
fn golden_offset_and_limit() {
    let (_tmp, index) = greetings_fixture();

    let page = search(&index, "!hello", 1, 1);
    assert_eq!(page.total_hits, 2);
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].doc_id, 2);

    let empty_page = search(&index, "!hello", 10, 5);
    assert_eq!(empty_page.total_hits, 2);
    assert!(empty_page.hits.is_empty());
}

#[test]
fn golden_case_and_punctuation_insensitive() {
    let (_tmp, index) = greetings_fixture();

    assert_eq!(ids(&index, "HELLO"), vec![0]);
    assert_eq!(ids(&index, "hello, world."), ids(&index, "hello & world"));
}

#[test]
fn golden_oversized_token_matches_oversized_query() {
    let tmp = TempDir::new().unwrap();
    let long_word = "z".repeat(300);
    let text = format!("{} short", long_word);
    let index = build_index(tmp.path(), &[("big", "Big", &text)]);

    // both sides clamp to 255 bytes, so the truncated forms agree
    assert_eq!(ids(&index, &long_word), vec![0]);
    assert_eq!(ids(&index, &"z".repeat(255)), vec![0]);
    assert_eq!(index.term_count(), 2);
}
