//! Project configuration (`quill.toml`) parsing and validation.
//!
//! ```toml
//! [target]
//! graph = "TestLibrary1.json"
//! docs = ["TestLibrary1.xml"]
//!
//! [[supporting]]
//! name = "mscorlib"
//! graph = "mscorlib.json"
//!
//! [docs]
//! inheritdoc = "explicit-or-missing"
//!
//! [display]
//! include-namespace = true
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codedoc::{GraphRepository, MemberRepository};
use crate::display::DisplayNameFormatter;
use crate::model::{GraphLoadError, SymbolGraph};
use crate::xmldoc::{load_xml_doc_file, DocLoadError, InheritDocMode, XmlDocOverlay};

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Graph(#[from] GraphLoadError),

    #[error(transparent)]
    Docs(#[from] DocLoadError),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("repository name must not be empty")]
    EmptyName,

    #[error("repository '{0}' is configured more than once")]
    DuplicateRepository(String),
}

/// The complete quill.toml configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuillConfig {
    /// The library being documented (required).
    pub target: RepositoryConfig,

    /// Libraries consulted for references the target cannot resolve, in order.
    #[serde(default)]
    pub supporting: Vec<RepositoryConfig>,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// One symbol graph with its doc files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Repository name; defaults to the graph's library name.
    #[serde(default)]
    pub name: Option<String>,

    /// Path to the symbol graph JSON.
    #[serde(default)]
    pub graph: PathBuf,

    /// XML doc files, merged in order.
    #[serde(default)]
    pub docs: Vec<PathBuf>,
}

/// Doc overlay behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    #[serde(default)]
    pub inheritdoc: InheritDocMode,
}

/// Display name options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct DisplayConfig {
    #[serde(default)]
    pub include_namespace: bool,

    #[serde(default = "default_true")]
    pub show_generic_parameters: bool,

    #[serde(default)]
    pub show_declaring_type: bool,

    #[serde(default = "default_separator")]
    pub list_separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            include_namespace: false,
            show_generic_parameters: true,
            show_declaring_type: false,
            list_separator: default_separator(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_separator() -> String {
    ", ".to_string()
}

impl QuillConfig {
    /// Load a configuration from a file, resolving paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.target.graph.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("target.graph"));
        }
        if self
            .supporting
            .iter()
            .any(|repo| repo.graph.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingField("supporting.graph"));
        }

        let mut names = HashSet::new();
        for repo in self.repositories() {
            if let Some(name) = &repo.name {
                if name.trim().is_empty() {
                    return Err(ConfigError::EmptyName);
                }
                if !names.insert(name.as_str()) {
                    return Err(ConfigError::DuplicateRepository(name.clone()));
                }
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        for repo in std::iter::once(&mut self.target).chain(self.supporting.iter_mut()) {
            resolve(&mut repo.graph);
            repo.docs.iter_mut().for_each(resolve);
        }
    }

    /// Target first, then supporting repositories in order.
    pub fn repositories(&self) -> impl Iterator<Item = &RepositoryConfig> {
        std::iter::once(&self.target).chain(&self.supporting)
    }

    /// The formatter described by `[display]`.
    #[must_use]
    pub fn formatter(&self) -> DisplayNameFormatter {
        DisplayNameFormatter::new()
            .with_namespace(self.display.include_namespace)
            .with_generic_parameters(self.display.show_generic_parameters)
            .with_declaring_type(self.display.show_declaring_type)
            .with_list_separator(self.display.list_separator.clone())
    }

    /// Load every configured graph and doc file.
    ///
    /// # Errors
    ///
    /// Returns an error if a graph or doc file fails to load, or if two
    /// repositories end up with the same name.
    pub fn open_repositories(&self) -> Result<Vec<GraphRepository>, ConfigError> {
        let mut opened = Vec::new();
        let mut names = HashSet::new();
        for repo in self.repositories() {
            let repository = self.open_repository(repo)?;
            // Unnamed repositories take the library name from the graph
            if !names.insert(repository.name().to_string()) {
                return Err(ConfigError::DuplicateRepository(repository.name().to_string()));
            }
            opened.push(repository);
        }
        Ok(opened)
    }

    fn open_repository(&self, config: &RepositoryConfig) -> Result<GraphRepository, ConfigError> {
        let graph = SymbolGraph::load(&config.graph)?;
        let mut repository = GraphRepository::new(graph).with_formatter(self.formatter());
        if let Some(name) = &config.name {
            repository = repository.with_name(name.clone());
        }
        if !config.docs.is_empty() {
            let mut overlay = XmlDocOverlay::new(self.docs.inheritdoc);
            for path in &config.docs {
                overlay.extend(load_xml_doc_file(path)?);
            }
            repository = repository.with_overlay(overlay);
        }
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[target]
graph = "lib.json"
"#;
        let config = QuillConfig::parse(toml).unwrap();
        assert_eq!(config.target.graph, PathBuf::from("lib.json"));
        assert!(config.supporting.is_empty());
        assert_eq!(config.docs.inheritdoc, InheritDocMode::Explicit);
        assert!(config.display.show_generic_parameters);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[target]
name = "Lib"
graph = "lib.json"
docs = ["lib.xml", "extra.xml"]

[[supporting]]
name = "mscorlib"
graph = "mscorlib.json"

[docs]
inheritdoc = "explicit-or-missing"

[display]
include-namespace = true
list-separator = ","
"#;
        let config = QuillConfig::parse(toml).unwrap();
        assert_eq!(config.target.docs.len(), 2);
        assert_eq!(config.supporting.len(), 1);
        assert_eq!(config.docs.inheritdoc, InheritDocMode::ExplicitOrMissing);
        let formatter = config.formatter();
        assert!(formatter.include_namespace);
        assert_eq!(formatter.list_separator, ",");
        assert_eq!(config.repositories().count(), 2);
    }

    #[test]
    fn missing_target_graph() {
        let toml = r#"
[target]
name = "Lib"
"#;
        let err = QuillConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("target.graph")));
    }

    #[test]
    fn missing_target_section() {
        let err = QuillConfig::parse("").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn empty_name_rejected() {
        let toml = r#"
[target]
name = " "
graph = "lib.json"
"#;
        let err = QuillConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyName));
    }

    #[test]
    fn duplicate_names_rejected() {
        let toml = r#"
[target]
name = "Lib"
graph = "lib.json"

[[supporting]]
name = "Lib"
graph = "other.json"
"#;
        let err = QuillConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRepository(name) if name == "Lib"));
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
[target]
graph = "lib.json"
colour = "blue"
"#;
        let err = QuillConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn unknown_inheritdoc_mode_rejected() {
        let toml = r#"
[target]
graph = "lib.json"

[docs]
inheritdoc = "always"
"#;
        assert!(matches!(
            QuillConfig::parse(toml).unwrap_err(),
            ConfigError::Parse(..)
        ));
    }
}
