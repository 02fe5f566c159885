mod utils;

use std::fs::File;
use std::path::{Path, PathBuf};

use criteria_filter::filter::{
    BaseConditions, DateTimeFilter, RangeConditions, StringFilter, TextConditions,
};
use criteria_filter::{
    BookCriteria, Criteria, Expr, ReaderConfig, field_predicate, read_parquet_files_with_predicate,
    read_parquet_with_predicate,
};
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;
use utils::{at, books_batch, ids, init_logging};

fn write_books(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let batch = books_batch();
    let file = File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

#[test]
fn test_read_with_criteria_predicate() -> anyhow::Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let path = write_books(dir.path(), "books.parquet");

    let mut author_name = StringFilter::new();
    author_name.set_contains("jane");
    let criteria = BookCriteria {
        author_name: Some(author_name),
        ..BookCriteria::default()
    };

    let batches = read_parquet_with_predicate(
        &path,
        &criteria.to_predicate(),
        None,
        &ReaderConfig::default(),
    )?;

    assert_eq!(ids(&batches), vec![5, 7]);
    assert_eq!(batches[0].num_columns(), 7);
    Ok(())
}

#[test]
fn test_projection_keeps_requested_and_predicate_columns() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_books(dir.path(), "books.parquet");

    let mut updated = DateTimeFilter::new();
    updated
        .set_greater_than_or_equal(at(2024, 3, 5, 8, 0, 0))
        .set_less_than_or_equal(at(2024, 3, 5, 8, 0, 0));
    let expr = field_predicate("updated_at", Some(&updated));

    let batches =
        read_parquet_with_predicate(&path, &expr, Some(&["id"][..]), &ReaderConfig::default())?;

    assert_eq!(ids(&batches), vec![1, 2, 5]);
    let schema = batches[0].schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["id", "updated_at"]);
    Ok(())
}

#[test]
fn test_small_batches_are_filtered_and_empty_ones_dropped() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_books(dir.path(), "books.parquet");
    let config = ReaderConfig {
        batch_size: 2,
        parallel_threshold: 2,
        ..ReaderConfig::default()
    };

    let mut title = StringFilter::new();
    title.set_specified(true).set_greater_than("O".to_string());
    let expr = field_predicate("title", Some(&title));

    let batches = read_parquet_with_predicate(&path, &expr, None, &config)?;
    assert_eq!(ids(&batches), vec![3, 5]);
    assert!(batches.iter().all(|b| b.num_rows() > 0));
    Ok(())
}

#[test]
fn test_read_many_files_in_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let paths = vec![
        write_books(dir.path(), "a.parquet"),
        write_books(dir.path(), "b.parquet"),
    ];

    let mut title = StringFilter::new();
    title.set_equals("Dune".to_string());
    let expr = field_predicate("title", Some(&title));

    let batches =
        read_parquet_files_with_predicate(&paths, &expr, None, &ReaderConfig::default())?;
    assert_eq!(ids(&batches), vec![1, 1]);
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let path = Path::new("/nonexistent/books.parquet");
    let err = read_parquet_with_predicate(path, &Expr::AlwaysTrue, None, &ReaderConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/books.parquet"));
}

#[test]
fn test_predicate_on_unknown_column_fails_with_context() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_books(dir.path(), "books.parquet");

    let mut isbn = StringFilter::new();
    isbn.set_contains("978");
    let expr = field_predicate("isbn", Some(&isbn));

    let err = read_parquet_with_predicate(&path, &expr, None, &ReaderConfig::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("column 'isbn' not found"));
    Ok(())
}
