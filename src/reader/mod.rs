//! Parquet reading with post-decode filtering: the predicate runs on each
//! decoded batch, after column projection.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;

use crate::config::ReaderConfig;
use crate::engine;
use crate::predicate::Expr;

/// Read a Parquet file and keep only the rows matching `expr`
///
/// With `columns` set and [`ReaderConfig::project_columns`] enabled, only
/// the requested columns and the top-level columns the predicate needs are
/// decoded; the returned batches carry that union of columns. Batches left
/// empty by the predicate are dropped.
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `expr` - Predicate to apply, usually produced by a criteria object
/// * `columns` - Optional list of columns to return
/// * `config` - Batch size, projection and parallelism settings
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded, or if the
/// predicate cannot be evaluated against the file's columns.
pub fn read_parquet_with_predicate(
    path: &Path,
    expr: &Expr,
    columns: Option<&[&str]>,
    config: &ReaderConfig,
) -> anyhow::Result<Vec<RecordBatch>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open parquet file: {}", path.display()))?;

    let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet file: {}", path.display()))?
        .with_batch_size(config.batch_size);

    if let (true, Some(columns)) = (config.project_columns, columns) {
        let mut wanted: BTreeSet<String> = expr.required_columns().into_iter().collect();
        wanted.extend(columns.iter().map(|c| (*c).to_string()));

        let file_schema = builder.schema().clone();
        let indices = wanted
            .iter()
            .filter_map(|name| match file_schema.index_of(name) {
                Ok(idx) => Some(idx),
                Err(_) => {
                    log::warn!("Column {name} not found in {}, skipping", path.display());
                    None
                }
            })
            .sorted()
            .collect_vec();

        let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
        builder = builder.with_projection(mask);
    }

    let reader = builder
        .build()
        .with_context(|| format!("Failed to build parquet reader for {}", path.display()))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read record batch from {}", path.display()))?;
    let total_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();

    let filtered = engine::filter_batches(&batches, expr, config.parallel_threshold)
        .with_context(|| format!("Failed to apply predicate `{expr}` to {}", path.display()))?;

    if config.log_selectivity {
        let kept: usize = filtered.iter().map(RecordBatch::num_rows).sum();
        if kept == 0 {
            log::info!(
                "No records matched the filter criteria in file: {}",
                path.display()
            );
        } else {
            log::debug!(
                "Applied predicate to file {}: kept {kept} of {total_rows} rows in {} batches",
                path.display(),
                filtered.len()
            );
        }
    }

    Ok(filtered)
}

/// Read several Parquet files in parallel, applying the same predicate to each
///
/// Batches are returned in file order.
///
/// # Errors
/// Returns the first error raised by [`read_parquet_with_predicate`].
pub fn read_parquet_files_with_predicate(
    paths: &[PathBuf],
    expr: &Expr,
    columns: Option<&[&str]>,
    config: &ReaderConfig,
) -> anyhow::Result<Vec<RecordBatch>> {
    let per_file = paths
        .par_iter()
        .map(|path| read_parquet_with_predicate(path, expr, columns, config))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let batches = per_file.into_iter().flatten().collect_vec();
    log::info!(
        "Loaded {} matching batches from {} Parquet files",
        batches.len(),
        paths.len()
    );
    Ok(batches)
}
