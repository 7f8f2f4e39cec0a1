//! # Query Runner
//!
//! Answers pattern lines from a stream against any [`FactStore`].
//!
//! For each non-empty line `bob is_in ?` the runner writes:
//!
//! ```text
//! bob is_in ?             (the pattern, when echo is on)
//! bob is_in kitchen.      (one matching fact identifier per line)
//!                         (blank separator)
//! ```
//!
//! or the null marker in place of the matches when the pattern shape was
//! never indexed.

use crate::graph::FactStore;
use crate::importer::{LineError, MalformedPolicy, decode_line, line_error};
use crate::primitives::NULL_MARKER;
use crate::statement::Pattern;
use crate::{Fact, KgError};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Summary of one query run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    /// Patterns answered.
    pub queries: usize,
    /// Patterns with at least one match.
    pub matched: usize,
    /// Patterns answered with the null marker.
    pub not_found: usize,
    /// Lines rejected under the skip policy.
    pub skipped: Vec<LineError>,
}

/// Pattern stream runner.
#[derive(Debug, Clone)]
pub struct QueryRunner {
    policy: MalformedPolicy,
    echo: bool,
    null_marker: String,
}

impl Default for QueryRunner {
    fn default() -> Self {
        Self::new(MalformedPolicy::default())
    }
}

impl QueryRunner {
    /// Create a runner that echoes patterns and prints `<null>` for misses.
    #[must_use]
    pub fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            echo: true,
            null_marker: NULL_MARKER.to_string(),
        }
    }

    /// Whether to print each pattern before its results.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Marker printed when a pattern was never indexed.
    #[must_use]
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    /// Parse and answer a single pattern.
    pub fn execute<S: FactStore + ?Sized>(
        store: &S,
        text: &str,
        line: usize,
    ) -> Result<Option<Vec<Fact>>, KgError> {
        let pattern = Pattern::parse_line(text, line)?;
        store.query(
            pattern.subject.as_str(),
            pattern.predicate.as_str(),
            pattern.object.as_str(),
        )
    }

    /// Write the answer block for one pattern.
    pub fn write_answer<W: Write + ?Sized>(
        &self,
        out: &mut W,
        text: &str,
        facts: Option<&[Fact]>,
    ) -> Result<(), KgError> {
        if self.echo {
            writeln!(out, "{}", text.trim())?;
        }
        match facts {
            Some(facts) => {
                for fact in facts {
                    writeln!(out, "{}", fact.identifier())?;
                }
            }
            None => writeln!(out, "{}", self.null_marker)?,
        }
        writeln!(out)?;
        Ok(())
    }

    /// Answer every pattern line from `reader`, writing to `out`.
    ///
    /// # Errors
    /// - `KgError::Io` if reading or writing fails
    /// - `KgError::MalformedStatement` for the first bad line under `Abort`
    /// - any store error
    pub fn run<S: FactStore + ?Sized, R: BufRead, W: Write + ?Sized>(
        &self,
        store: &S,
        reader: R,
        out: &mut W,
    ) -> Result<QueryReport, KgError> {
        let mut report = QueryReport::default();

        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let line = idx.saturating_add(1);
            let text = match decode_line(bytes?, line) {
                Ok(text) if text.trim().is_empty() => continue,
                other => other,
            };

            let answer = text.and_then(|text| {
                let facts = Self::execute(store, &text, line)?;
                Ok((text, facts))
            });
            let (text, facts) = match answer {
                Ok(answer) => answer,
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
                        MalformedPolicy::Skip => {
                            report.skipped.push(bad);
                            continue;
                        }
                    }
                }
            };

            report.queries = report.queries.saturating_add(1);
            if facts.is_some() {
                report.matched = report.matched.saturating_add(1);
            } else {
                report.not_found = report.not_found.saturating_add(1);
            }
            self.write_answer(out, &text, facts.as_deref())?;
        }

        out.flush()?;
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

    fn populated() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        graph.import_statement("bob", "is_in", "kitchen").expect("1");
        graph.import_statement("amy", "is_in", "office").expect("2");
        graph
    }

    fn run(runner: &QueryRunner, graph: &KnowledgeGraph, input: &str) -> (QueryReport, String) {
        let mut out = Vec::new();
        let report = runner
            .run(graph, Cursor::new(input), &mut out)
            .expect("run");
        (report, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn run_prints_matches_and_null_marker() {
        let graph = populated();
        let (report, out) = run(&QueryRunner::default(), &graph, "Bob is_in ?\n\ncarl ? ?\n");

        assert_eq!(
            out,
            "Bob is_in ?\nbob is_in kitchen.\n\ncarl ? ?\n<null>\n\n"
        );
        assert_eq!(report.queries, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(report.not_found, 1);
    }

    #[test]
    fn run_without_echo_uses_custom_marker() {
        let graph = populated();
        let runner = QueryRunner::default()
            .with_echo(false)
            .with_null_marker("none");
        let (_, out) = run(&runner, &graph, "? is_in ?\nzed ? ?\n");

        assert_eq!(out, "bob is_in kitchen.\namy is_in office.\n\nnone\n\n");
    }

    #[test]
    fn run_aborts_on_malformed_pattern() {
        let graph = populated();
        let mut out = Vec::new();
        let err = QueryRunner::default()
            .run(&graph, Cursor::new("bob ?\n"), &mut out)
            .expect_err("malformed");

        assert!(matches!(err, KgError::MalformedStatement { line: 1, .. }));
    }

    #[test]
    fn run_skips_malformed_pattern_when_asked() {
        let graph = populated();
        let runner = QueryRunner::new(MalformedPolicy::Skip);
        let (report, out) = run(&runner, &graph, "bob ?\namy ? ?\n");

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.queries, 1);
        assert_eq!(out, "amy ? ?\namy is_in office.\n\n");
    }

    #[test]
    fn undecodable_pattern_is_skipped_when_asked() {
        let graph = populated();
        let runner = QueryRunner::new(MalformedPolicy::Skip).with_echo(false);
        let input: &[u8] = b"\xff ? ?\namy.is_in.?\n";
        let mut out = Vec::new();
        let report = runner
            .run(&graph, Cursor::new(input), &mut out)
            .expect("run");

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 1);
        assert_eq!(String::from_utf8(out).expect("utf8"), "amy is_in office.\n\n");
    }

    #[test]
    fn execute_single_pattern() {
        let graph = populated();
        let facts = QueryRunner::execute(&graph, "? ? office", 0)
            .expect("execute")
            .expect("found");

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].identifier(), "amy is_in office.");
    }
}
