//! Configuration for reading and filtering Parquet data.

/// Configuration for [`crate::reader::read_parquet_with_predicate`]
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Number of rows per decoded record batch
    pub batch_size: usize,
    /// Restrict decoding to requested columns plus the predicate's fields
    pub project_columns: bool,
    /// Batch count at which predicate evaluation switches to rayon
    pub parallel_threshold: usize,
    /// Log how many rows survived the predicate for each file
    pub log_selectivity: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            project_columns: true,
            parallel_threshold: 4,
            log_selectivity: true,
        }
    }
}
