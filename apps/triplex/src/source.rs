//! # Input Sources
//!
//! The file boundary: statement and query files are validated and opened
//! here, before anything reaches the store. Every failure at this boundary is
//! `KgError::SourceUnavailable` and aborts that file only.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use triplex_core::{FactStore, ImportReport, Importer, KgError, QueryReport, QueryRunner};

/// Validate an input path.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
pub fn validate_file_path(path: &Path) -> Result<PathBuf, KgError> {
    let canonical = path.canonicalize().map_err(|e| {
        KgError::SourceUnavailable(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(KgError::SourceUnavailable(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<(), KgError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        KgError::SourceUnavailable(format!("Cannot read file metadata: {}", e))
    })?;

    if metadata.len() > max_size {
        return Err(KgError::SourceUnavailable(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate and open a line-oriented input file.
pub fn open_source(path: &Path, max_size: u64) -> Result<BufReader<File>, KgError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, max_size)?;

    let file = File::open(&validated).map_err(|e| {
        KgError::SourceUnavailable(format!("Cannot open '{}': {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Import a statement file into `store`.
///
/// Skipped lines are logged at `warn`.
pub fn import_file<S: FactStore + ?Sized>(
    store: &mut S,
    importer: &Importer,
    path: &Path,
    max_size: u64,
) -> Result<ImportReport, KgError> {
    tracing::info!(
        "Importing statements from {:?} (on_malformed: {})",
        path,
        importer.policy()
    );

    let reader = open_source(path, max_size)?;
    let report = importer.import_reader(store, reader).inspect_err(|e| {
        tracing::error!("Import of {:?} stopped: {}", path, e);
    })?;

    for skipped in &report.skipped {
        tracing::warn!(
            "{}:{}: skipped malformed statement: {}",
            path.display(),
            skipped.line,
            skipped.reason
        );
    }
    tracing::info!(
        "Imported {} new facts from {} lines ({} duplicates, {} skipped)",
        report.imported,
        report.lines,
        report.duplicates,
        report.skipped.len()
    );

    Ok(report)
}

/// Run a query file against `store`, writing answers to `out`.
pub fn run_query_file<S: FactStore + ?Sized, W: Write + ?Sized>(
    store: &S,
    runner: &QueryRunner,
    path: &Path,
    max_size: u64,
    out: &mut W,
) -> Result<QueryReport, KgError> {
    tracing::info!("Running queries from {:?}", path);

    let reader = open_source(path, max_size)?;
    let report = runner.run(store, reader, out)?;

    for skipped in &report.skipped {
        tracing::warn!(
            "{}:{}: skipped malformed pattern: {}",
            path.display(),
            skipped.line,
            skipped.reason
        );
    }
    tracing::debug!(
        "Answered {} patterns ({} matched, {} not found)",
        report.queries,
        report.matched,
        report.not_found
    );

    Ok(report)
}
