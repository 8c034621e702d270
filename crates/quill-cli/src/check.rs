//! Implementation of the `quill check` command.

use quill_core::cref::generate;
use quill_core::model::{SymbolGraph, SymbolId};

use crate::project::Project;

/// A symbol whose cref did not lead back to it.
#[derive(Debug)]
pub struct CheckFailure {
    pub repository: String,
    pub cref: String,
    pub reason: String,
}

/// Outcome of a round-trip check.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print each failure followed by a one-line total.
    pub fn print_summary(&self) {
        for failure in &self.failures {
            println!("  {} {}: {}", failure.repository, failure.cref, failure.reason);
        }
        println!(
            "Checked {} identifier(s), {} failure(s)",
            self.checked,
            self.failures.len()
        );
    }
}

/// Generate, reparse and resolve every symbol of every repository.
pub fn check(project: &Project) -> CheckReport {
    let mut report = CheckReport::default();
    for repo in &project.repositories {
        let graph = repo.graph();
        for symbol in graph.symbols() {
            report.checked += 1;
            let failure = |cref: String, reason: String| CheckFailure {
                repository: graph.name.clone(),
                cref,
                reason,
            };
            let cref = match generate(graph, symbol) {
                Ok(cref) => cref,
                Err(err) => {
                    report.failures.push(failure(format!("{symbol:?}"), err.to_string()));
                    continue;
                }
            };
            match graph.find(&cref) {
                Some(found) if found == symbol => {}
                Some(other) => report.failures.push(failure(
                    cref.to_string(),
                    format!("resolved to {}", describe(graph, other)),
                )),
                None => report
                    .failures
                    .push(failure(cref.to_string(), "did not resolve".to_string())),
            }
        }
    }
    report
}

fn describe(graph: &SymbolGraph, symbol: SymbolId) -> String {
    generate(graph, symbol).map_or_else(|_| format!("{symbol:?}"), |cref| cref.to_string())
}
