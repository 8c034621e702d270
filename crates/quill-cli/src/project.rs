//! Loading the configured repositories.

use anyhow::{Context, Result};
use std::path::Path;

use quill_core::codedoc::{DetailLevel, GraphRepository, MemberRepository, SearchContext};
use quill_core::config::QuillConfig;

/// The target repository followed by its supporting repositories.
pub struct Project {
    pub repositories: Vec<GraphRepository>,
}

impl Project {
    /// Load the configuration at `path` and every repository it names.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "No {} found. Pass --config to point at a project file.",
                path.display()
            ));
        }
        let config = QuillConfig::from_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let repositories = config
            .open_repositories()
            .context("Failed to load repositories")?;
        tracing::debug!(count = repositories.len(), "opened repositories");
        Ok(Self { repositories })
    }

    pub fn from_repositories(repositories: Vec<GraphRepository>) -> Self {
        Self { repositories }
    }

    /// The repository being documented; configuration always lists it first.
    pub fn target(&self) -> Option<&GraphRepository> {
        self.repositories.first()
    }

    /// A search over all repositories in configured order.
    pub fn context(&self, detail: DetailLevel) -> SearchContext<'_> {
        SearchContext::new(
            self.repositories
                .iter()
                .map(|repo| repo as &dyn MemberRepository)
                .collect(),
            detail,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::testutil::test_library;
    use std::fs;

    #[test]
    fn test_open_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Project::open(&dir.path().join("quill.toml")).err().unwrap();
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn test_open_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.json"), test_library().to_json().unwrap()).unwrap();
        fs::write(dir.path().join("quill.toml"), "[target]\ngraph = \"lib.json\"\n").unwrap();

        let project = Project::open(&dir.path().join("quill.toml")).unwrap();
        assert_eq!(project.target().unwrap().name(), "TestLibrary1");
        assert_eq!(project.context(DetailLevel::Minimum).repositories().len(), 1);
    }
}
