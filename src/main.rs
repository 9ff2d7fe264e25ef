use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use precis::batch::{self, ProcessingConfig};
use precis::discovery;
use precis::reader;
use precis::summarizer::{Summarizer, SummaryMode};

#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(about = "Frequency-based extractive summarizer for plain-text documents")]
#[command(version)]
struct Args {
    /// Text file to summarize, or a directory to process in batch
    input: PathBuf,

    /// Summary mode: brief, detailed, bullet (unknown values use the
    /// standard preset)
    #[arg(long, default_value = "brief")]
    mode: String,

    /// Overwrite even existing summary files
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path (batch mode)
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured JSON logging, same sink for library and CLI events
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting precis");
    info!(?args, "Parsed CLI arguments");

    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let mode = SummaryMode::from_name(&args.mode);
    if mode == SummaryMode::Standard && args.mode != "standard" {
        info!("Unrecognized mode '{}', using standard preset", args.mode);
    }

    if args.input.is_file() {
        summarize_single_file(&args, mode).await
    } else if args.input.is_dir() {
        run_batch(&args, mode).await
    } else {
        anyhow::bail!("Input path is neither a file nor a directory: {}", args.input.display());
    }
}

/// Summarize one file and print the result to stdout.
async fn summarize_single_file(args: &Args, mode: SummaryMode) -> Result<()> {
    let summarizer = Summarizer::new()?;
    // A broken single-file read is always fatal; there is nothing to record
    // stats against.
    let file_reader = reader::TextFileReader::new(reader::ReaderConfig { fail_fast: true });
    let (text, _stats) = if args.use_mmap {
        file_reader.read_text_mmap(&args.input)?
    } else {
        file_reader.read_text(&args.input).await?
    };

    let outcome = summarizer.summarize_outcome(&text, mode);
    info!(
        sentences_total = outcome.sentences_total,
        sentences_selected = outcome.sentences_selected,
        "Summarized {}",
        args.input.display()
    );

    println!("{}", outcome.text);
    Ok(())
}

/// Discover text files under the input directory and summarize them all.
async fn run_batch(args: &Args, mode: SummaryMode) -> Result<()> {
    let discovery_config = discovery::DiscoveryConfig {
        fail_fast: args.fail_fast,
    };

    info!("Starting file discovery in: {}", args.input.display());
    let discovered = discovery::collect_discovered_files(&args.input, discovery_config).await?;

    let valid_files: Vec<PathBuf> = discovered
        .iter()
        .filter(|f| f.error.is_none())
        .map(|f| f.path.clone())
        .collect();
    let invalid_count = discovered.len() - valid_files.len();

    println!(
        "precis v{} - discovered {} text files ({} with issues)",
        env!("CARGO_PKG_VERSION"),
        discovered.len(),
        invalid_count
    );

    let config = ProcessingConfig {
        mode,
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
        use_mmap: args.use_mmap,
        show_progress: !args.no_progress,
        concurrency: 0,
    };

    let stats = batch::process_files(&valid_files, &config).await?;
    batch::write_run_stats(&stats, &args.stats_out).await?;

    println!("Batch summarization complete:");
    println!("  Summarized: {} files", stats.files_processed);
    println!("  Skipped (existing summary): {} files", stats.files_skipped);
    if stats.files_failed > 0 {
        println!("  Failed: {} files", stats.files_failed);
    }
    println!("  Total words processed: {}", stats.total_words_processed);
    println!("  Total sentences detected: {}", stats.total_sentences_detected);
    println!("  Stats written to: {}", args.stats_out.display());

    Ok(())
}
