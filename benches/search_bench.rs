use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

use cuttle::analysis::stem_str;
use cuttle::postings::{intersect, union};
use cuttle::query::to_rpn;
use cuttle::{IndexBuilder, IndexConfig, IndexReader};

struct BenchEnv {
    _tmp: TempDir,
    index: IndexReader,
}

const VOCAB: &[&str] = &[
    "search", "engine", "index", "query", "document", "boolean", "posting", "lexicon", "merge",
    "stemming", "running", "connected", "worlds", "greetings", "tokens",
];

fn build_env(doc_count: usize) -> BenchEnv {
    let tmp = TempDir::new().unwrap();
    let corpus = tmp.path().join("corpus");
    fs::create_dir_all(&corpus).unwrap();
    let manifest_path = tmp.path().join("manifest.jsonl");
    let mut manifest = fs::File::create(&manifest_path).unwrap();

    for doc in 0..doc_count {
        let mut text = String::new();
        for (w, word) in VOCAB.iter().enumerate() {
            if (doc + w) % 3 != 0 {
                text.push_str(word);
                text.push(' ');
            }
        }
        let doc_id = format!("doc{}", doc);
        fs::write(corpus.join(format!("{}.txt", doc_id)), text).unwrap();
        writeln!(manifest, "{{\"doc_id\": \"{}\"}}", doc_id).unwrap();
    }
    drop(manifest);

    let mut config = IndexConfig::new(manifest_path, corpus);
    config.out_dir = tmp.path().join("out");
    IndexBuilder::new(config).run().unwrap();
    let index = IndexReader::open(&tmp.path().join("out")).unwrap();
    BenchEnv { _tmp: tmp, index }
}

fn bench_stemmer(c: &mut Criterion) {
    let words: Vec<&str> = VOCAB.iter().cycle().take(1000).copied().collect();
    c.bench_function("porter_stem_1000_words", |b| {
        b.iter(|| {
            for word in &words {
                black_box(stem_str(word));
            }
        });
    });
}

fn bench_list_ops(c: &mut Criterion) {
    let evens: Vec<u32> = (0..100_000).map(|i| i * 2).collect();
    let thirds: Vec<u32> = (0..100_000).map(|i| i * 3).collect();

    c.bench_function("intersect_100k", |b| {
        b.iter(|| black_box(intersect(&evens, &thirds)));
    });
    c.bench_function("union_100k", |b| {
        b.iter(|| black_box(union(&evens, &thirds)));
    });
}

fn bench_query(c: &mut Criterion) {
    let counts = [1_000usize, 10_000];
    let envs: Vec<(usize, BenchEnv)> =
        counts.iter().map(|&n| (n, build_env(n))).collect();

    let mut group = c.benchmark_group("boolean_query");
    for (count, env) in envs.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), env, |b, env| {
            let rpn = to_rpn("(search | query) & index & !merge");
            b.iter(|| {
                black_box(cuttle::query::evaluate(&env.index, &rpn));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stemmer, bench_list_ops, bench_query);
criterion_main!(benches);
