//! Implementation of the `quill list` command.

use anyhow::{Context, Result};
use regex::Regex;

use quill_core::codedoc::GraphRepository;
use quill_core::cref::generate;

use crate::project::Project;

/// Options for listing identifiers.
#[derive(Debug)]
pub struct ListOptions {
    /// Regular expression the cref must match.
    pub filter: Option<String>,
    /// List supporting repositories too.
    pub all: bool,
}

/// One listed symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub cref: String,
    pub display_name: String,
}

/// Print `cref<TAB>display name` for each matching symbol.
pub fn list(project: &Project, options: &ListOptions) -> Result<()> {
    for entry in entries(project, options)? {
        println!("{}\t{}", entry.cref, entry.display_name);
    }
    Ok(())
}

/// Collect matching symbols in graph order.
pub fn entries(project: &Project, options: &ListOptions) -> Result<Vec<ListEntry>> {
    let filter = options
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --filter pattern")?;

    let repositories: &[GraphRepository] = if options.all {
        &project.repositories
    } else {
        project.target().map(std::slice::from_ref).unwrap_or_default()
    };

    let mut entries = Vec::new();
    for repo in repositories {
        let graph = repo.graph();
        for symbol in graph.symbols() {
            let cref = generate(graph, symbol)?;
            if filter.as_ref().is_some_and(|re| !re.is_match(cref.as_str())) {
                continue;
            }
            entries.push(ListEntry {
                cref: cref.to_string(),
                display_name: repo.formatter().display_name(graph, symbol)?,
            });
        }
    }
    Ok(entries)
}
