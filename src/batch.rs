// WHY: bounded concurrency keeps memory proportional to the worker cap, not
// to the number of discovered files

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tracing::{debug, info, warn};

use crate::incremental;
use crate::reader::{ReaderConfig, TextFileReader};
use crate::summarizer::{Summarizer, SummaryMode};

/// Configuration for a batch summarization run
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Summary mode applied to every file in the run
    pub mode: SummaryMode,
    /// Re-summarize files whose summary output already exists
    pub overwrite_all: bool,
    /// Abort on first error instead of recording it per file
    pub fail_fast: bool,
    /// Read sources through a memory map instead of async buffered I/O
    pub use_mmap: bool,
    /// Render a console progress bar
    pub show_progress: bool,
    /// Worker cap; 0 selects the number of available CPUs
    pub concurrency: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            mode: SummaryMode::Standard,
            overwrite_all: false,
            fail_fast: false,
            use_mmap: false,
            show_progress: false,
            concurrency: 0,
        }
    }
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// Source file path
    pub path: String,
    /// Characters in the source text, spaces included
    pub chars_processed: u64,
    /// Whitespace-delimited words in the source text
    pub words_processed: u64,
    /// Sentences found by segmentation
    pub sentences_detected: u64,
    /// Sentences contributing to the written summary
    pub sentences_selected: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Processing status (success, skipped, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            words_processed: 0,
            sentences_detected: 0,
            sentences_selected: 0,
            processing_time_ms: 0,
            status: "skipped".to_string(),
            error: None,
        }
    }

    fn failed(path: &Path, elapsed_ms: u64, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            words_processed: 0,
            sentences_detected: 0,
            sentences_selected: 0,
            processing_time_ms: elapsed_ms,
            status: "failed".to_string(),
            error: Some(error),
        }
    }
}

/// Aggregate statistics for a whole run
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Run start as unix seconds
    pub run_start: u64,
    /// Summary mode the run was performed with
    pub mode: String,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_words_processed: u64,
    pub total_sentences_detected: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

/// Summarize every file in `files`, writing each summary beside its source,
/// and return aggregate run statistics.
pub async fn process_files(files: &[PathBuf], config: &ProcessingConfig) -> Result<RunStats> {
    let run_start = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let overall_start = Instant::now();

    let summarizer = Arc::new(Summarizer::new()?);
    let concurrency = if config.concurrency > 0 {
        config.concurrency
    } else {
        num_cpus::get().max(1)
    };

    info!(
        files = files.len(),
        concurrency,
        mode = config.mode.as_str(),
        "Starting batch summarization"
    );

    let progress = if config.show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut result_stream = stream::iter(files.to_vec())
        .map(|path| {
            let summarizer = Arc::clone(&summarizer);
            let config = config.clone();
            async move { process_one(path, &config, &summarizer).await }
        })
        .buffer_unordered(concurrency);

    let mut file_stats = Vec::with_capacity(files.len());
    while let Some(result) = result_stream.next().await {
        match result {
            Ok(stats) => {
                progress.inc(1);
                file_stats.push(stats);
            }
            Err(e) => {
                // Only surfaced under fail_fast; in-flight work is dropped.
                progress.abandon();
                return Err(e);
            }
        }
    }
    progress.finish_and_clear();

    // Completion order is nondeterministic under concurrency; report stats
    // in a stable order.
    file_stats.sort_by(|a, b| a.path.cmp(&b.path));

    let stats = RunStats {
        run_start,
        mode: config.mode.as_str().to_string(),
        total_processing_time_ms: overall_start.elapsed().as_millis() as u64,
        total_chars_processed: file_stats.iter().map(|s| s.chars_processed).sum(),
        total_words_processed: file_stats.iter().map(|s| s.words_processed).sum(),
        total_sentences_detected: file_stats.iter().map(|s| s.sentences_detected).sum(),
        files_processed: count_status(&file_stats, "success"),
        files_skipped: count_status(&file_stats, "skipped"),
        files_failed: count_status(&file_stats, "failed"),
        file_stats,
    };

    info!(
        processed = stats.files_processed,
        skipped = stats.files_skipped,
        failed = stats.files_failed,
        "Batch summarization completed"
    );
    Ok(stats)
}

fn count_status(stats: &[FileStats], status: &str) -> u64 {
    stats.iter().filter(|s| s.status == status).count() as u64
}

/// Summarize a single file and write its summary output.
///
/// Returns `Err` only under `fail_fast`; otherwise failures are recorded in
/// the returned stats.
async fn process_one(
    path: PathBuf,
    config: &ProcessingConfig,
    summarizer: &Summarizer,
) -> Result<FileStats> {
    let start = Instant::now();

    if !config.overwrite_all && incremental::summary_file_exists(&path) {
        debug!("Summary already exists, skipping: {}", path.display());
        return Ok(FileStats::skipped(&path));
    }

    let reader = TextFileReader::new(ReaderConfig {
        fail_fast: config.fail_fast,
    });
    let (text, read_stats) = if config.use_mmap {
        reader.read_text_mmap(&path)?
    } else {
        reader.read_text(&path).await?
    };

    if let Some(error) = read_stats.read_error {
        return Ok(FileStats::failed(
            &path,
            start.elapsed().as_millis() as u64,
            error,
        ));
    }

    let outcome = summarizer.summarize_outcome(&text, config.mode);

    if let Err(e) = incremental::write_summary_file(&path, &outcome.text).await {
        let error_msg = format!("Failed to write summary for {}: {}", path.display(), e);
        warn!("{}", error_msg);
        if config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }
        return Ok(FileStats::failed(
            &path,
            start.elapsed().as_millis() as u64,
            error_msg,
        ));
    }

    Ok(FileStats {
        path: path.display().to_string(),
        chars_processed: text.chars().count() as u64,
        words_processed: text.split_whitespace().count() as u64,
        sentences_detected: outcome.sentences_total as u64,
        sentences_selected: outcome.sentences_selected as u64,
        processing_time_ms: start.elapsed().as_millis() as u64,
        status: "success".to_string(),
        error: None,
    })
}

/// Serialize run statistics as pretty JSON to the given path.
pub async fn write_run_stats(stats: &RunStats, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(path, content).await?;
    info!("Wrote run stats to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEXT: &str =
        "Cats are great. Cats sleep a lot. Dogs bark at cats. The weather is nice today.";

    fn config(mode: SummaryMode) -> ProcessingConfig {
        ProcessingConfig {
            mode,
            ..ProcessingConfig::default()
        }
    }

    #[tokio::test]
    async fn test_process_files_writes_summaries() {
        let temp_dir = TempDir::new().unwrap();
        let doc = temp_dir.path().join("doc.txt");
        std::fs::write(&doc, TEXT).unwrap();

        let stats = process_files(&[doc.clone()], &config(SummaryMode::Brief))
            .await
            .unwrap();

        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.mode, "brief");

        let summary = incremental::read_summary_file(&doc).unwrap();
        assert!(summary.ends_with('\n'));
        assert!(summary.contains("Cats are great."));
    }

    #[tokio::test]
    async fn test_second_run_skips_existing_summaries() {
        let temp_dir = TempDir::new().unwrap();
        let doc = temp_dir.path().join("doc.txt");
        std::fs::write(&doc, TEXT).unwrap();

        let first = process_files(&[doc.clone()], &config(SummaryMode::Brief))
            .await
            .unwrap();
        assert_eq!(first.files_processed, 1);

        let second = process_files(&[doc.clone()], &config(SummaryMode::Brief))
            .await
            .unwrap();
        assert_eq!(second.files_processed, 0);
        assert_eq!(second.files_skipped, 1);

        let overwrite = ProcessingConfig {
            overwrite_all: true,
            ..config(SummaryMode::Brief)
        };
        let third = process_files(&[doc], &overwrite).await.unwrap();
        assert_eq!(third.files_processed, 1);
    }

    #[tokio::test]
    async fn test_totals_match_file_stats() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        std::fs::write(&a, TEXT).unwrap();
        std::fs::write(&b, "One sentence only").unwrap();

        let stats = process_files(&[a, b], &config(SummaryMode::Standard))
            .await
            .unwrap();

        assert_eq!(stats.files_processed, 2);
        let char_sum: u64 = stats.file_stats.iter().map(|s| s.chars_processed).sum();
        let word_sum: u64 = stats.file_stats.iter().map(|s| s.words_processed).sum();
        assert_eq!(stats.total_chars_processed, char_sum);
        assert_eq!(stats.total_words_processed, word_sum);
        assert_eq!(
            stats.total_sentences_detected,
            stats.file_stats.iter().map(|s| s.sentences_detected).sum::<u64>()
        );
    }

    #[tokio::test]
    async fn test_missing_file_recorded_as_failed() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let stats = process_files(&[missing], &config(SummaryMode::Brief))
            .await
            .unwrap();
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.file_stats[0].status, "failed");
        assert!(stats.file_stats[0].error.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_fail_fast() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let fail_fast = ProcessingConfig {
            fail_fast: true,
            ..config(SummaryMode::Brief)
        };
        assert!(process_files(&[missing], &fail_fast).await.is_err());
    }

    #[tokio::test]
    async fn test_mmap_and_async_paths_agree() {
        let temp_dir = TempDir::new().unwrap();
        let doc = temp_dir.path().join("doc.txt");
        std::fs::write(&doc, TEXT).unwrap();

        let async_stats = process_files(&[doc.clone()], &config(SummaryMode::Bullet))
            .await
            .unwrap();
        let async_summary = incremental::read_summary_file(&doc).unwrap();

        let mmap_config = ProcessingConfig {
            use_mmap: true,
            overwrite_all: true,
            ..config(SummaryMode::Bullet)
        };
        let mmap_stats = process_files(&[doc.clone()], &mmap_config).await.unwrap();
        let mmap_summary = incremental::read_summary_file(&doc).unwrap();

        assert_eq!(async_summary, mmap_summary);
        assert_eq!(
            async_stats.total_sentences_detected,
            mmap_stats.total_sentences_detected
        );
    }

    #[tokio::test]
    async fn test_run_stats_json_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let doc = temp_dir.path().join("doc.txt");
        std::fs::write(&doc, TEXT).unwrap();

        let stats = process_files(&[doc], &config(SummaryMode::Detailed))
            .await
            .unwrap();
        let stats_path = temp_dir.path().join("run_stats.json");
        write_run_stats(&stats, &stats_path).await.unwrap();

        let loaded: RunStats =
            serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
        assert_eq!(loaded.files_processed, stats.files_processed);
        assert_eq!(loaded.mode, "detailed");
        assert_eq!(loaded.file_stats.len(), stats.file_stats.len());
    }
}
