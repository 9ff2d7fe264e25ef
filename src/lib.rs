pub mod batch;
pub mod discovery;
pub mod incremental;
pub mod reader;
pub mod summarizer;

// Re-export main types for convenient access
pub use summarizer::{
    summarize_text, Summarizer, SummaryMode, SummaryOutcome, NO_TEXT_SENTINEL,
};

// Re-export batch processing types for the CLI and integration tests
pub use batch::{process_files, FileStats, ProcessingConfig, RunStats};

// Re-export incremental output utilities
pub use incremental::{
    read_summary_file, summary_file_exists, summary_file_path, write_summary_file,
};
