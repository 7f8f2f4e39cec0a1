//! # Importer
//!
//! Reads statement lines from a stream into any [`FactStore`].
//!
//! - One statement per non-empty line: `bob is_in kitchen.`
//! - Blank lines are ignored
//! - Malformed lines (not exactly three valid tokens) follow [`MalformedPolicy`]
//!
//! Lines imported before a failure stay imported: the store is additive and
//! each line is committed on its own.

use crate::KgError;
use crate::graph::FactStore;
use crate::statement::Statement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// What to do with a line that is not a valid statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop at the first bad line and return its error.
    #[default]
    Abort,
    /// Record the bad line in the report and keep going.
    Skip,
}

impl FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown policy '{}'. Use: abort, skip", other)),
        }
    }
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// A line that was rejected under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// Why it was rejected.
    pub reason: String,
}

/// Summary of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Non-empty lines read.
    pub lines: usize,
    /// Lines that registered a new fact.
    pub imported: usize,
    /// Lines whose fact was already registered.
    pub duplicates: usize,
    /// Lines rejected under the skip policy.
    pub skipped: Vec<LineError>,
}

/// Turn a per-line failure into a line-numbered error.
///
/// Returns `None` for failures that are not about the line itself.
pub(crate) fn line_error(err: &KgError, line: usize) -> Option<LineError> {
    match err {
        KgError::MalformedStatement { reason, .. } => Some(LineError {
            line,
            reason: reason.clone(),
        }),
        KgError::InvalidToken(reason) => Some(LineError {
            line,
            reason: reason.clone(),
        }),
        _ => None,
    }
}

/// Decode one raw line of a stream, dropping a trailing `\r`.
///
/// A line that is not UTF-8 is malformed like any other bad line, so it
/// follows the caller's [`MalformedPolicy`] instead of failing the stream.
pub(crate) fn decode_line(mut bytes: Vec<u8>, line: usize) -> Result<String, KgError> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| KgError::MalformedStatement {
        line,
        reason: format!("line is not valid UTF-8: {}", e.utf8_error()),
    })
}

/// Statement stream importer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    policy: MalformedPolicy,
}

impl Importer {
    /// Create an importer with the given malformed-line policy.
    #[must_use]
    pub fn new(policy: MalformedPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    /// Import one statement line.
    pub fn import_line<S: FactStore + ?Sized>(
        store: &mut S,
        text: &str,
        line: usize,
    ) -> Result<bool, KgError> {
        let stmt = Statement::parse_line(text, line)?;
        let registration = store.import_statement(&stmt.subject, &stmt.predicate, &stmt.object)?;
        Ok(registration.is_new())
    }

    /// Import every statement line from `reader`.
    ///
    /// # Errors
    /// - `KgError::Io` if reading fails
    /// - `KgError::MalformedStatement` for the first bad line under `Abort`
    /// - any store error (e.g. `KgError::LockPoisoned`)
    pub fn import_reader<S: FactStore + ?Sized, R: BufRead>(
        &self,
        store: &mut S,
        reader: R,
    ) -> Result<ImportReport, KgError> {
        let mut report = ImportReport::default();

        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let line = idx.saturating_add(1);
            let text = match decode_line(bytes?, line) {
                Ok(text) if text.trim().is_empty() => continue,
                other => other,
            };
            report.lines = report.lines.saturating_add(1);

            match text.and_then(|text| Self::import_line(store, &text, line)) {
                Ok(true) => report.imported = report.imported.saturating_add(1),
                Ok(false) => report.duplicates = report.duplicates.saturating_add(1),
                Err(err) => {
                    let Some(bad) = line_error(&err, line) else {
                        return Err(err);
                    };
                    match self.policy {
                        MalformedPolicy::Abort => {
                            return Err(KgError::MalformedStatement {
                                line: bad.line,
                                reason: bad.reason,
                            });
                        }
                        MalformedPolicy::Skip => report.skipped.push(bad),
                    }
                }
            }
        }

        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::KnowledgeGraph;
    use std::io::Cursor;

    const TRIPLES: &str = "Bob is_in kitchen.\n\namy is_in office.\nbob is_in kitchen.\n";

    #[test]
    fn import_counts_new_and_duplicate_lines() {
        let mut graph = KnowledgeGraph::new();
        let report = Importer::default()
            .import_reader(&mut graph, Cursor::new(TRIPLES))
            .expect("import");

        assert_eq!(report.lines, 3);
        assert_eq!(report.imported, 2);
        assert_eq!(report.duplicates, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(graph.metrics().fact_count, 2);
    }

    #[test]
    fn abort_keeps_lines_before_the_failure() {
        let mut graph = KnowledgeGraph::new();
        let input = "a r b.\nbroken line.\nc r d.\n";
        let err = Importer::new(MalformedPolicy::Abort)
            .import_reader(&mut graph, Cursor::new(input))
            .expect_err("malformed");

        assert!(matches!(err, KgError::MalformedStatement { line: 2, .. }));
        assert!(graph.query("a", "r", "b").expect("query").is_some());
        assert!(graph.query("c", "r", "d").expect("query").is_none());
    }

    #[test]
    fn skip_records_bad_lines_and_continues() {
        let mut graph = KnowledgeGraph::new();
        let input = "a r b.\nbroken line.\n? r d.\nc r d.\n";
        let report = Importer::new(MalformedPolicy::Skip)
            .import_reader(&mut graph, Cursor::new(input))
            .expect("import");

        assert_eq!(report.imported, 2);
        let lines: Vec<_> = report.skipped.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn period_delimited_line_imports() {
        let mut graph = KnowledgeGraph::new();
        let report = Importer::default()
            .import_reader(&mut graph, Cursor::new("bob.is_in.kitchen.\r\n"))
            .expect("import");

        assert_eq!(report.imported, 1);
        let found = graph.query("bob", "is_in", "kitchen").expect("query");
        assert_eq!(found.map(|fs| fs.len()), Some(1));
    }

    #[test]
    fn undecodable_line_follows_skip_policy() {
        let mut graph = KnowledgeGraph::new();
        let input: &[u8] = b"a r b.\n\xff\xfe bad line.\nc r d.\n";
        let report = Importer::new(MalformedPolicy::Skip)
            .import_reader(&mut graph, Cursor::new(input))
            .expect("import");

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(graph.query("c", "r", "d").expect("query").is_some());
    }

    #[test]
    fn undecodable_line_aborts_by_default() {
        let mut graph = KnowledgeGraph::new();
        let input: &[u8] = b"a r b.\n\xff\xfe bad line.\nc r d.\n";
        let err = Importer::default()
            .import_reader(&mut graph, Cursor::new(input))
            .expect_err("abort");

        assert!(matches!(err, KgError::MalformedStatement { line: 2, .. }));
        assert_eq!(graph.metrics().fact_count, 1);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("SKIP".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Skip));
        assert_eq!("abort".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Abort));
        assert!("ignore".parse::<MalformedPolicy>().is_err());
    }
}
