//! Cross-repository lookups with cycle protection

use std::collections::HashSet;

use tracing::debug;

use super::model::{DetailLevel, Member};
use super::repository::{MemberRepository, RepositoryId};
use crate::cref::CRef;

/// An ordered set of repositories to search, plus the ones already consulted
///
/// Contexts are cheap to derive and belong to a single call. A repository
/// resolving its own references searches through the context it was handed,
/// which already marks it visited, so two repositories that refer to each
/// other cannot recurse forever.
#[derive(Clone)]
pub struct SearchContext<'r> {
    repositories: Vec<&'r dyn MemberRepository>,
    visited: HashSet<RepositoryId>,
    detail: DetailLevel,
}

impl<'r> SearchContext<'r> {
    pub fn new(repositories: Vec<&'r dyn MemberRepository>, detail: DetailLevel) -> Self {
        Self {
            repositories,
            visited: HashSet::new(),
            detail,
        }
    }

    /// A context with no repositories to fall back on
    pub fn empty(detail: DetailLevel) -> Self {
        Self::new(Vec::new(), detail)
    }

    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    pub fn repositories(&self) -> &[&'r dyn MemberRepository] {
        &self.repositories
    }

    pub fn is_visited(&self, repository: RepositoryId) -> bool {
        self.visited.contains(&repository)
    }

    /// Same repositories and visits, different detail level
    #[must_use]
    pub fn with_detail(&self, detail: DetailLevel) -> Self {
        Self {
            repositories: self.repositories.clone(),
            visited: self.visited.clone(),
            detail,
        }
    }

    /// A context where every repository except `repository` counts as visited
    #[must_use]
    pub fn clone_with_one_unvisited(&self, repository: RepositoryId) -> Self {
        let visited = self
            .repositories
            .iter()
            .map(|repo| repo.id())
            .filter(|&id| id != repository)
            .collect();
        Self {
            repositories: self.repositories.clone(),
            visited,
            detail: self.detail,
        }
    }

    /// First hit among unvisited repositories, in order
    pub fn search(&self, cref: &CRef) -> Option<Member> {
        let mut visited = self.visited.clone();
        for repository in &self.repositories {
            if !visited.insert(repository.id()) {
                continue;
            }
            let nested = Self {
                repositories: self.repositories.clone(),
                visited: visited.clone(),
                detail: self.detail,
            };
            if let Some(member) = repository.lookup_in(cref, self.detail, &nested) {
                debug!(cref = %cref, repository = repository.name(), "search hit");
                return Some(member);
            }
        }
        debug!(cref = %cref, "search miss");
        None
    }
}
