use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::incremental::SUMMARY_SUFFIX;

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Discovers all `*.txt` files recursively under the given root directory,
/// skipping previously generated summary outputs. Returns an async stream of
/// validated file paths.
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    // WHY: futures::stream provides sufficient async iteration without an
    // async_stream dependency
    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move { state.next_file().await.map(|result| (result, state)) },
    )
}

/// True for paths this tool generated itself; they must never be
/// re-summarized on a later run.
fn is_generated_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SUMMARY_SUFFIX))
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        // Initialize glob iterator on first call
        if self.glob_iter.is_none() {
            let pattern = format!("{}/**/*.txt", self.root_dir.display());
            debug!("Starting file discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("File discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        while let Some(ref mut glob_iter) = self.glob_iter {
            match glob_iter.next() {
                Some(Ok(path)) => {
                    if is_generated_output(&path) {
                        debug!("Skipping generated output: {}", path.display());
                        continue;
                    }
                    debug!("Found file: {}", path.display());
                    return Some(self.validate_file(path).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                    // Continue to next file on non-fatal glob errors
                    continue;
                }
                None => {
                    info!("File discovery completed");
                    return None;
                }
            }
        }
        None
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        debug!("Validating file: {}", path.display());

        // Check if file is accessible
        match fs::metadata(&path).await {
            Ok(metadata) => {
                if !metadata.is_file() {
                    let error = format!("Path is not a file: {}", path.display());
                    warn!("{}", error);
                    return Ok(FileValidation {
                        path,
                        error: Some(error),
                    });
                }
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error));
                }
                return Ok(FileValidation {
                    path,
                    error: Some(error),
                });
            }
        }

        // UTF-8 validation happens naturally when the file is read
        Ok(FileValidation { path, error: None })
    }
}

/// Collect all discovered files into a Vec for easier processing
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }

    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Convenience function to find all valid text files (only paths, not
/// validation details)
pub async fn find_text_files<P: AsRef<Path>>(root_dir: P) -> Result<Vec<PathBuf>> {
    let config = DiscoveryConfig::default();
    let validations = collect_discovered_files(root_dir, config).await?;

    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}
