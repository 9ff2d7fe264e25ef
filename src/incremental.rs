// WHY: summaries land beside their sources so reruns can skip completed work
// without a separate state store

use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to a source file's stem to name its summary output.
pub const SUMMARY_SUFFIX: &str = "_precis.txt";

/// Generate the summary file path for a given source file.
///
/// `reports/q3.txt` -> `reports/q3_precis.txt`
pub fn summary_file_path(source_path: &Path) -> PathBuf {
    let mut summary_path = source_path.to_path_buf();
    let file_stem = summary_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    summary_path.set_file_name(format!("{file_stem}{SUMMARY_SUFFIX}"));
    summary_path
}

/// Check if a summary file already exists for the given source file.
pub fn summary_file_exists<P: AsRef<Path>>(source_path: P) -> bool {
    summary_file_path(source_path.as_ref()).exists()
}

/// Read the summary file content for a given source file.
///
/// # Example
/// ```no_run
/// use precis::incremental::read_summary_file;
/// let summary = read_summary_file("reports/q3.txt").expect("Failed to read summary file");
/// ```
pub fn read_summary_file<P: AsRef<Path>>(source_path: P) -> Result<String, io::Error> {
    std::fs::read_to_string(summary_file_path(source_path.as_ref()))
}

/// Write a complete summary file (with trailing newline) for a given source.
pub async fn write_summary_file<P: AsRef<Path>>(
    source_path: P,
    summary: &str,
) -> Result<PathBuf, io::Error> {
    let summary_path = summary_file_path(source_path.as_ref());
    let content = if summary.ends_with('\n') {
        summary.to_string()
    } else {
        format!("{summary}\n")
    };
    tokio::fs::write(&summary_path, content).await?;
    Ok(summary_path)
}
