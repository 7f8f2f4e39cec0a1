//! # CLI Commands Implementation

use crate::config::Config;
use crate::source::{import_file, run_query_file};
use std::io::Write;
use std::path::{Path, PathBuf};
use triplex_core::{
    Fact, FactStore, ImportReport, Importer, KgError, KnowledgeGraph, Pattern, SharedGraph,
};

/// Import every file in order, stopping at the first failing file.
fn load_store<S: FactStore + ?Sized>(
    store: &mut S,
    config: &Config,
    files: &[PathBuf],
) -> Result<ImportReport, KgError> {
    let importer = Importer::new(config.import.on_malformed);
    let mut total = ImportReport::default();

    for path in files {
        let report = import_file(store, &importer, path, config.import.max_file_size)?;
        total.lines += report.lines;
        total.imported += report.imported;
        total.duplicates += report.duplicates;
        total.skipped.extend(report.skipped);
    }

    Ok(total)
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Import `triples` into the process-wide store, then answer `queries` on stdout.
pub fn cmd_run(config: &Config, triples: &Path, queries: &Path) -> Result<(), KgError> {
    let mut store: SharedGraph = triplex_core::global().clone();
    load_store(&mut store, config, &[triples.to_path_buf()])?;

    let runner = config.query_runner();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_query_file(
        &store,
        &runner,
        queries,
        config.import.max_file_size,
        &mut out,
    )?;
    out.flush()?;

    Ok(())
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

/// Answer one pattern against the given statement files.
pub fn cmd_query(
    config: &Config,
    json_mode: bool,
    triples: &[PathBuf],
    pattern: &str,
) -> Result<(), KgError> {
    let mut graph = KnowledgeGraph::new();
    load_store(&mut graph, config, triples)?;

    let parsed = Pattern::parse(pattern)?;
    tracing::debug!("Looking up bucket '{}'", parsed.key());
    let facts: Option<Vec<Fact>> = FactStore::query(
        &graph,
        parsed.subject.as_str(),
        parsed.predicate.as_str(),
        parsed.object.as_str(),
    )?;

    if json_mode {
        let identifiers = facts
            .as_ref()
            .map(|fs| fs.iter().map(|f| f.identifier().to_string()).collect::<Vec<_>>());
        let output = serde_json::json!({
            "pattern": parsed.to_string(),
            "found": identifiers.is_some(),
            "facts": identifiers,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    let runner = config.query_runner();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.write_answer(&mut out, &parsed.to_string(), facts.as_deref())?;
    out.flush()?;

    Ok(())
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Show store metrics after importing the given statement files.
pub fn cmd_stats(config: &Config, json_mode: bool, triples: &[PathBuf]) -> Result<(), KgError> {
    let mut graph = KnowledgeGraph::new();
    let report = load_store(&mut graph, config, triples)?;
    let metrics = graph.metrics();

    if json_mode {
        let output = serde_json::json!({
            "import": report,
            "metrics": metrics,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Triplex Store Status");
    println!("====================");
    println!("Files:         {}", triples.len());
    println!("Lines:         {}", report.lines);
    println!("Duplicates:    {}", report.duplicates);
    println!("Skipped:       {}", report.skipped.len());
    println!();
    println!("{}", metrics);

    Ok(())
}
