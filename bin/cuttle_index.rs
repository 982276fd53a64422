use anyhow::Result;
use clap::Parser;
use cuttle::{IndexBuilder, IndexConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "cuttle-index")]
#[command(about = "Build a disk-resident Boolean search index", long_about = None)]
struct Args {
    /// Manifest file, one JSON object per line with doc_id/title/url
    #[arg(long)]
    manifest: PathBuf,

    /// Corpus directory holding <doc_id>.txt files
    #[arg(long)]
    corpus: PathBuf,

    /// Output directory for docs.bin, lexicon.bin, postings.bin
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Memory budget for the in-memory term table, in MiB
    #[arg(long, default_value_t = 512)]
    mem_mb: u64,

    /// Progress report cadence, in MiB of corpus read (0 disables)
    #[arg(long, default_value_t = 200)]
    report_mb: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("cuttle-index v{}", cuttle::VERSION);
    info!("  manifest: {}", args.manifest.display());
    info!("  corpus:   {}", args.corpus.display());
    info!("  out:      {}", args.out.display());
    info!("  mem budget: {} MiB", args.mem_mb);

    let mut config = IndexConfig::new(args.manifest, args.corpus);
    config.out_dir = args.out;
    config.mem_budget_bytes = args.mem_mb << 20;
    config.report_every_bytes = args.report_mb << 20;

    let stats = IndexBuilder::new(config).run()?;

    info!(
        "indexed {} docs, {} terms, {} blocks, {:.1} KB/s",
        stats.doc_count,
        stats.term_count,
        stats.blocks_written,
        if stats.elapsed.as_secs_f64() > 0.0 {
            stats.total_bytes as f64 / 1024.0 / stats.elapsed.as_secs_f64()
        } else {
            0.0
        }
    );
    Ok(())
}
