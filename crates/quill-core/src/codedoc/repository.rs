//! Member repositories

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::builder::ModelBuilder;
use super::model::{DetailLevel, Member};
use super::search::SearchContext;
use crate::cref::{generate, CRef};
use crate::display::DisplayNameFormatter;
use crate::model::{SymbolGraph, SymbolId};
use crate::xmldoc::XmlDocOverlay;

static NEXT_REPOSITORY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        RepositoryId(NEXT_REPOSITORY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A source of member models
pub trait MemberRepository: Send + Sync {
    fn id(&self) -> RepositoryId;

    /// Human readable name, usually the library name
    fn name(&self) -> &str;

    /// Crefs of every namespace this repository documents
    fn namespaces(&self) -> Vec<CRef>;

    /// Look up a member, resolving outside references through `context`
    fn lookup_in(&self, cref: &CRef, detail: DetailLevel, context: &SearchContext<'_>) -> Option<Member>;

    /// Look up a member without any other repositories to fall back on
    fn lookup(&self, cref: &CRef, detail: DetailLevel) -> Option<Member> {
        self.lookup_in(cref, detail, &SearchContext::empty(detail))
    }
}

/// A repository backed by one symbol graph and an optional doc overlay
#[derive(Debug)]
pub struct GraphRepository {
    id: RepositoryId,
    name: String,
    graph: SymbolGraph,
    overlay: Option<XmlDocOverlay>,
    formatter: DisplayNameFormatter,
    qualified: DisplayNameFormatter,
}

impl GraphRepository {
    /// Create a repository named after the graph's library
    pub fn new(graph: SymbolGraph) -> Self {
        Self {
            id: RepositoryId::next(),
            name: graph.name.clone(),
            graph,
            overlay: None,
            formatter: DisplayNameFormatter::default(),
            qualified: DisplayNameFormatter::qualified(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: XmlDocOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Formatter for short display names; full names always use a qualified formatter
    #[must_use]
    pub fn with_formatter(mut self, formatter: DisplayNameFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    pub fn overlay(&self) -> Option<&XmlDocOverlay> {
        self.overlay.as_ref()
    }

    pub fn formatter(&self) -> &DisplayNameFormatter {
        &self.formatter
    }

    pub(crate) fn qualified_formatter(&self) -> &DisplayNameFormatter {
        &self.qualified
    }

    /// Build the model of a symbol of this graph directly
    pub fn member(&self, symbol: SymbolId, detail: DetailLevel, context: &SearchContext<'_>) -> Option<Member> {
        ModelBuilder::new(self, context, detail).build(symbol)
    }
}

impl MemberRepository for GraphRepository {
    fn id(&self) -> RepositoryId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespaces(&self) -> Vec<CRef> {
        self.graph
            .namespaces()
            .filter_map(|(id, _)| generate(&self.graph, SymbolId::Namespace(id)).ok())
            .collect()
    }

    fn lookup_in(&self, cref: &CRef, detail: DetailLevel, context: &SearchContext<'_>) -> Option<Member> {
        let symbol = self.graph.find(cref)?;
        self.member(symbol, detail, context)
    }
}
