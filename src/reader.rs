use anyhow::Result;
use memmap2::Mmap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Statistics for file reading operations
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Reads whole text documents, either via async buffered I/O or through a
/// memory map for large inputs.
pub struct TextFileReader {
    config: ReaderConfig,
}

impl TextFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the full file contents with async I/O, validating UTF-8.
    ///
    /// Under `fail_fast` any failure is returned as an error; otherwise the
    /// failure is recorded in the stats and an empty text is returned.
    pub async fn read_text<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of file: {}", path.display());

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error_msg = format!("Failed to read file {}: {}", path.display(), e);
                return self.read_failure(path, 0, start_time, error_msg);
            }
        };

        let byte_count = bytes.len() as u64;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                let error_msg = format!("UTF-8 validation failed for {}: {}", path.display(), e);
                return self.read_failure(path, byte_count, start_time, error_msg);
            }
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {}: {} bytes in {}ms",
            path.display(),
            byte_count,
            stats.duration_ms
        );
        Ok((text, stats))
    }

    /// Read the full file contents through a memory map.
    ///
    /// WHY: avoids a heap copy of the raw bytes for large documents; the
    /// UTF-8 check runs over the mapped region before the text is owned.
    pub fn read_text_mmap<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting mmap read of file: {}", path.display());

        let mapped = std::fs::File::open(path)
            .and_then(|file| unsafe { Mmap::map(&file) });
        let mmap = match mapped {
            Ok(mmap) => mmap,
            Err(e) => {
                let error_msg = format!("Failed to mmap file {}: {}", path.display(), e);
                return self.read_failure(path, 0, start_time, error_msg);
            }
        };

        let byte_count = mmap.len() as u64;
        let text = match std::str::from_utf8(&mmap) {
            Ok(text) => text.to_string(),
            Err(e) => {
                let error_msg = format!("UTF-8 validation failed for {}: {}", path.display(), e);
                return self.read_failure(path, byte_count, start_time, error_msg);
            }
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {} via mmap: {} bytes in {}ms",
            path.display(),
            byte_count,
            stats.duration_ms
        );
        Ok((text, stats))
    }

    fn read_failure(
        &self,
        path: &Path,
        bytes_read: u64,
        start_time: std::time::Instant,
        error_msg: String,
    ) -> Result<(String, ReadStats)> {
        warn!("{}", error_msg);

        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: Some(error_msg),
        };
        Ok((String::new(), stats))
    }
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = TextFileReader::new(ReaderConfig::default());
    let (text, _stats) = reader.read_text(file_path).await?;
    Ok(text)
}
