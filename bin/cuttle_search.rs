use anyhow::Result;
use clap::Parser;
use cuttle::{search, IndexReader};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cuttle-search")]
#[command(about = "Run Boolean queries against a cuttle index", long_about = None)]
struct Args {
    /// Index directory produced by cuttle-index
    #[arg(long)]
    index: PathBuf,

    /// Maximum result rows to print per query
    #[arg(long, default_value_t = 50)]
    limit: u32,

    /// Result rows to skip before printing
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Print only the per-query stats line
    #[arg(long)]
    stats_only: bool,

    /// Print the document count and exit
    #[arg(long)]
    print_doccount: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let index = IndexReader::open(&args.index)?;

    if args.print_doccount {
        println!("{}", index.doc_count());
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let start = Instant::now();
        let results = search(&index, &line, args.offset, args.limit);
        let elapsed = start.elapsed();

        if !args.stats_only {
            for hit in &results.hits {
                println!("{}\t{}\t{}", hit.doc_id, hit.title, hit.url);
            }
        }
        println!(
            "[STATS] query=\"{}\" hits={} shown={} offset={} time={:.6} sec",
            line,
            results.total_hits,
            results.hits.len(),
            args.offset,
            elapsed.as_secs_f64()
        );
    }
    Ok(())
}
